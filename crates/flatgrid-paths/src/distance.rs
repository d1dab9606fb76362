/// Manhattan (L1) distance between two `(x, y)` coordinate pairs.
#[inline]
pub fn manhattan(a: (usize, usize), b: (usize, usize)) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

/// Chebyshev (L∞) distance between two `(x, y)` coordinate pairs.
#[inline]
pub fn chebyshev(a: (usize, usize), b: (usize, usize)) -> usize {
    a.0.abs_diff(b.0).max(a.1.abs_diff(b.1))
}
