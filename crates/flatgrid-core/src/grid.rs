//! The [`Grid`] type — a rectangular grid addressed by flat row-major index.
//!
//! A `Grid` maps every index in `0..=last_cell` to an optional cell value.
//! Finite grids are dense; a grid built with a declared width wider than its
//! source text is *infinite* and leaves the padding indices absent. Absence
//! is a first-class state: probing an unmapped index yields "no value", not
//! a default.

use std::fmt;

use crate::dir::Direction;

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A rectangular grid of values addressed by flat index.
///
/// The index space is row-major: `index = x + y * width`. Values are
/// immutable after construction; transforms such as [`invert`](Grid::invert)
/// and [`digits`](Grid::digits) return new grids.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T> {
    cells: Vec<Option<T>>,
    width: usize,
    height: usize,
    infinite: bool,
}

impl<T> Grid<T> {
    /// Create a grid of the given dimensions with every cell set to `value`.
    pub fn solid(width: usize, height: usize, value: T) -> Result<Self, GridError>
    where
        T: Clone,
    {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyInput);
        }
        Ok(Self {
            cells: vec![Some(value); width * height],
            width,
            height,
            infinite: false,
        })
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the declared width exceeds the source text's natural width,
    /// leaving some indices legitimately unmapped.
    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.infinite
    }

    /// The highest valid index, `width * height - 1`.
    #[inline]
    pub fn last_cell(&self) -> usize {
        self.width * self.height - 1
    }

    /// The larger of width and height.
    #[inline]
    pub fn max_dimension(&self) -> usize {
        self.width.max(self.height)
    }

    /// Number of indices in the grid, mapped or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid holds no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // -----------------------------------------------------------------------
    // Coordinate transforms
    // -----------------------------------------------------------------------

    /// Column of `index`.
    #[inline]
    pub fn x(&self, index: usize) -> usize {
        index % self.width
    }

    /// Row of `index`.
    #[inline]
    pub fn y(&self, index: usize) -> usize {
        index / self.width
    }

    /// Flat index of `(x, y)`.
    #[inline]
    pub fn cell_id(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }

    /// The value at `index`, or `None` if the index is off the grid or
    /// unmapped (infinite-grid padding).
    #[inline]
    pub fn at(&self, index: usize) -> Option<&T> {
        self.cells.get(index).and_then(|c| c.as_ref())
    }

    #[inline]
    fn present(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(Some(_)))
    }

    /// Row-major iterator over `(index, value)` pairs of mapped cells.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|v| (i, v)))
    }

    // -----------------------------------------------------------------------
    // Neighbor queries
    // -----------------------------------------------------------------------

    /// The 4-connected neighbors of `index` that exist on the grid, in
    /// `[north, west, east, south]` order.
    ///
    /// A candidate survives only if it is mapped and lies on the same row
    /// (west/east) or column (north/south) as `index`. The row check is what
    /// stops `index ± 1` from wrapping onto the adjacent row at a boundary.
    pub fn neighbors4(&self, index: usize) -> Vec<usize> {
        let mut out = Vec::with_capacity(4);
        for (cand, same_row) in self.raw4(index) {
            let Some(c) = cand else { continue };
            if !self.present(c) {
                continue;
            }
            let aligned = if same_row {
                self.y(c) == self.y(index)
            } else {
                self.x(c) == self.x(index)
            };
            if aligned {
                out.push(c);
            }
        }
        out
    }

    /// Diagnostic 4-neighbor query: every direction reports either the
    /// neighbor index or [`Probe::OffBoard`], preserving
    /// `[north, west, east, south]` positional order.
    ///
    /// Not supported on infinite grids, where an unmapped index is padding
    /// rather than off-board.
    pub fn probe4(&self, index: usize) -> Result<[Probe; 4], GridError> {
        if self.infinite {
            return Err(GridError::Infinite("probe4"));
        }
        let mut out = [Probe::OffBoard; 4];
        for (slot, (cand, same_row)) in out.iter_mut().zip(self.raw4(index)) {
            let Some(c) = cand else { continue };
            if !self.present(c) {
                continue;
            }
            let aligned = if same_row {
                self.y(c) == self.y(index)
            } else {
                self.x(c) == self.x(index)
            };
            if aligned {
                *slot = Probe::Valid(c);
            }
        }
        Ok(out)
    }

    /// Raw 4-neighbor candidates in `[north, west, east, south]` order.
    /// `None` means the subtraction left the index space entirely. The
    /// boolean flags candidates that must share a row with `index` (the
    /// others must share a column).
    fn raw4(&self, index: usize) -> [(Option<usize>, bool); 4] {
        [
            (index.checked_sub(self.width), false),
            (index.checked_sub(1), true),
            (Some(index + 1), true),
            (Some(index + self.width), false),
        ]
    }

    /// The 8-connected neighbors of `index` that exist on the grid, in
    /// row-major order.
    ///
    /// West-side candidates are generated only when `x(index) > 0` and
    /// east-side ones only when `x(index) < width - 1`; vertical off-board
    /// candidates fall out of the mapped-index filter. Not supported on
    /// infinite grids.
    pub fn neighbors8(&self, index: usize) -> Result<Vec<usize>, GridError> {
        if self.infinite {
            return Err(GridError::Infinite("neighbors8"));
        }
        let x = self.x(index);
        let west = x > 0;
        let east = x + 1 < self.width;
        let north = index.checked_sub(self.width);
        let mut cands: Vec<Option<usize>> = Vec::with_capacity(8);
        if west {
            cands.push(north.map(|n| n - 1));
        }
        cands.push(north);
        if east {
            cands.push(north.map(|n| n + 1));
        }
        if west {
            cands.push(index.checked_sub(1));
        }
        if east {
            cands.push(Some(index + 1));
        }
        if west {
            cands.push(Some(index + self.width - 1));
        }
        cands.push(Some(index + self.width));
        if east {
            cands.push(Some(index + self.width + 1));
        }
        Ok(cands
            .into_iter()
            .flatten()
            .filter(|&c| self.present(c))
            .collect())
    }

    // -----------------------------------------------------------------------
    // Boundary queries
    // -----------------------------------------------------------------------

    /// Whether `index` sits on the given boundary of the grid.
    pub fn on_edge(&self, index: usize, dir: Direction) -> bool {
        match dir {
            Direction::North => self.y(index) == 0,
            Direction::South => self.y(index) == self.height - 1,
            Direction::West => self.x(index) == 0,
            Direction::East => self.x(index) == self.width - 1,
        }
    }

    /// Index deltas for `[north, east, south, west]`, for callers doing raw
    /// directional arithmetic instead of the bounds-checked neighbor query.
    #[inline]
    pub fn compass_deltas(&self) -> [isize; 4] {
        let w = self.width as isize;
        [-w, 1, w, -1]
    }

    // -----------------------------------------------------------------------
    // Structural transforms
    // -----------------------------------------------------------------------

    /// Transpose: the value at `(x, y)` moves to `(y, x)` in a new grid with
    /// width and height swapped. Applying twice restores the original.
    pub fn invert(&self) -> Grid<T>
    where
        T: Clone,
    {
        let mut cells: Vec<Option<T>> = vec![None; self.width * self.height];
        for (i, v) in self.iter() {
            cells[self.x(i) * self.height + self.y(i)] = Some(v.clone());
        }
        Grid {
            cells,
            width: self.height,
            height: self.width,
            infinite: self.infinite,
        }
    }
}

// ---------------------------------------------------------------------------
// Text construction
// ---------------------------------------------------------------------------

impl Grid<char> {
    /// Build a grid from multiline text, one character per cell.
    ///
    /// Lines are the non-empty lines of `text` and must all have the width
    /// of the first.
    pub fn from_text(text: &str) -> Result<Self, GridError> {
        Self::from_text_with_width(text, None)
    }

    /// Like [`from_text`](Self::from_text), but with a declared width.
    ///
    /// A declared width greater than the natural line width produces an
    /// infinite grid: each row's trailing indices stay unmapped. A declared
    /// width below the natural width is rejected.
    pub fn from_text_with_width(
        text: &str,
        declared_width: Option<usize>,
    ) -> Result<Self, GridError> {
        let lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
        if lines.is_empty() {
            return Err(GridError::EmptyInput);
        }
        let natural = lines[0].chars().count();
        for (line, l) in lines.iter().enumerate() {
            let w = l.chars().count();
            if w != natural {
                return Err(GridError::UnevenLines {
                    line,
                    width: w,
                    expected: natural,
                });
            }
        }
        let width = declared_width.unwrap_or(natural);
        if width < natural {
            return Err(GridError::NarrowWidth {
                declared: width,
                natural,
            });
        }
        let height = lines.len();
        let mut cells: Vec<Option<char>> = vec![None; width * height];
        for (i, ch) in lines.iter().flat_map(|l| l.chars()).enumerate() {
            cells[width * (i / natural) + (i % natural)] = Some(ch);
        }
        Ok(Self {
            cells,
            width,
            height,
            infinite: width > natural,
        })
    }
}

impl Grid<u32> {
    /// Build a digit grid directly from multiline text.
    pub fn from_digits(text: &str) -> Result<Self, GridError> {
        Grid::from_text(text)?.digits()
    }
}

// ---------------------------------------------------------------------------
// Digit coercion
// ---------------------------------------------------------------------------

/// A cell value that can be read as a decimal digit.
///
/// `char` parses (and can fail); `u32` is the identity, which makes
/// [`Grid::digits`] idempotent: coercing an already-numeric grid is a no-op.
pub trait DigitCell {
    /// The digit value of this cell.
    fn digit(&self) -> Result<u32, GridError>;
}

impl DigitCell for char {
    fn digit(&self) -> Result<u32, GridError> {
        self.to_digit(10).ok_or(GridError::NotADigit(*self))
    }
}

impl DigitCell for u32 {
    fn digit(&self) -> Result<u32, GridError> {
        Ok(*self)
    }
}

impl<T: DigitCell> Grid<T> {
    /// Convert every mapped cell to its decimal digit value.
    pub fn digits(&self) -> Result<Grid<u32>, GridError> {
        let mut cells = Vec::with_capacity(self.cells.len());
        for c in &self.cells {
            cells.push(match c {
                Some(v) => Some(v.digit()?),
                None => None,
            });
        }
        Ok(Grid {
            cells,
            width: self.width,
            height: self.height,
            infinite: self.infinite,
        })
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

impl<T: fmt::Display> fmt::Display for Grid<T> {
    /// Newline-joined rows in row-major order. Unmapped cells render as
    /// nothing, so finite single-character grids round-trip with
    /// [`Grid::from_text`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                f.write_str("\n")?;
            }
            for x in 0..self.width {
                if let Some(v) = self.at(self.cell_id(x, y)) {
                    write!(f, "{v}")?;
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Probe
// ---------------------------------------------------------------------------

/// Outcome of one direction of a [`Grid::probe4`] query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Probe {
    /// The neighbor exists at this index.
    Valid(usize),
    /// No cell in that direction.
    OffBoard,
}

impl Probe {
    /// The neighbor index, if any.
    #[inline]
    pub fn index(self) -> Option<usize> {
        match self {
            Probe::Valid(i) => Some(i),
            Probe::OffBoard => None,
        }
    }
}

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Errors from grid construction and queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The input text had no non-empty lines, or a dimension was zero.
    EmptyInput,
    /// A line's width differed from the first line's.
    UnevenLines {
        line: usize,
        width: usize,
        expected: usize,
    },
    /// The declared width is smaller than the natural line width.
    NarrowWidth { declared: usize, natural: usize },
    /// A cell value could not be read as a decimal digit.
    NotADigit(char),
    /// The operation does not support infinite grids.
    Infinite(&'static str),
    /// The character does not name a cardinal direction.
    InvalidDirection(char),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "grid: empty input"),
            Self::UnevenLines {
                line,
                width,
                expected,
            } => write!(
                f,
                "grid: line {line} has width {width}, expected {expected}"
            ),
            Self::NarrowWidth { declared, natural } => write!(
                f,
                "grid: declared width {declared} is below natural width {natural}"
            ),
            Self::NotADigit(c) => write!(f, "grid: {c:?} is not a digit"),
            Self::Infinite(op) => write!(f, "grid: {op} does not support infinite grids"),
            Self::InvalidDirection(c) => write!(f, "grid: {c:?} is not a cardinal direction"),
        }
    }
}

impl std::error::Error for GridError {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = Grid::from_text("ab\ncd").unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid<char> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn probe_round_trip() {
        let p = Probe::Valid(7);
        let json = serde_json::to_string(&p).unwrap();
        let back: Probe = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
