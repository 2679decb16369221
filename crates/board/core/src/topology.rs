//! Irregular board shapes and cell occupiability.
//!
//! A shape is stored exactly as encounters describe it, from the white
//! player's perspective:
//!
//! ```text
//! 0: "800000000"
//! 1: "700000000"
//! 2: "600011000"
//! ...
//! 7: "100000000"
//! 8: " abcdefgh"   <- header row (file letters)
//! ```
//!
//! The first column carries the rank label and the trailing header row carries
//! the file letters. The array is upside down relative to rank: the row holding
//! rank `r` sits at index `height - 1 - r`, where `height` counts the header.

use crate::error::{BoardError, ErrorSeverity};
use crate::notation::Placement;

/// Cell marker for an absent or impassable cell.
pub const IMPASSABLE: char = '0';

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("board shape needs at least one cell row and a header row")]
    MissingRows,

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl BoardError for ShapeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingRows => "SHAPE_MISSING_ROWS",
            Self::RaggedRow { .. } => "SHAPE_RAGGED_ROW",
        }
    }
}

/// Immutable board outline: cell rows followed by one header row.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<String>", into = "Vec<String>")
)]
pub struct BoardShape {
    rows: Vec<Vec<char>>,
}

impl BoardShape {
    /// Builds a shape from its row strings, header row last.
    pub fn new<I, S>(rows: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows: Vec<Vec<char>> = rows
            .into_iter()
            .map(|row| row.as_ref().chars().collect())
            .collect();

        if rows.len() < 2 {
            return Err(ShapeError::MissingRows);
        }

        let expected = rows[0].len();
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != expected)
        {
            return Err(ShapeError::RaggedRow {
                row,
                expected,
                found: cells.len(),
            });
        }

        Ok(Self { rows })
    }

    /// Number of rows including the header row.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns per row, including the rank label column.
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// The trailing row carrying the file letters.
    pub fn header(&self) -> &[char] {
        &self.rows[self.rows.len() - 1]
    }

    /// The cell rows, excluding the header.
    pub fn cell_rows(&self) -> &[Vec<char>] {
        &self.rows[..self.rows.len() - 1]
    }

    /// Whether `placement` names a cell that exists on this board.
    ///
    /// Placements that fall outside the rows or columns of the shape are simply
    /// not occupiable.
    pub fn is_occupiable(&self, placement: Placement) -> bool {
        let Some(column) = self.header().iter().position(|&c| c == placement.file()) else {
            return false;
        };
        let Some(row) = usize::try_from(placement.rank())
            .ok()
            .and_then(|rank| (self.height() - 1).checked_sub(rank))
        else {
            return false;
        };

        // Rank 0 lands on the header row, which holds no cells.
        self.cell_rows()
            .get(row)
            .and_then(|cells| cells.get(column))
            .is_some_and(|&cell| cell != IMPASSABLE)
    }

    /// Every occupiable cell with the shape row and column it was read from.
    pub fn cells(&self) -> impl Iterator<Item = ShapeCell> + '_ {
        let header = self.header();
        self.cell_rows()
            .iter()
            .enumerate()
            .flat_map(move |(row, cells)| {
                let rank = (self.height() - 1 - row) as u32;
                cells
                    .iter()
                    .enumerate()
                    .filter(|&(_, &cell)| cell != IMPASSABLE)
                    .filter_map(move |(column, _)| {
                        let placement = Placement::new(header[column], rank).ok()?;
                        Some(ShapeCell {
                            placement,
                            row,
                            column,
                        })
                    })
            })
    }

    /// Occupiable placements in shape order (top row first).
    pub fn occupiable_placements(&self) -> Vec<Placement> {
        self.cells().map(|cell| cell.placement).collect()
    }
}

/// An occupiable cell and where it sits in the shape array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeCell {
    pub placement: Placement,
    pub row: usize,
    pub column: usize,
}

/// Free-function form used by the cursor and interaction code.
pub fn is_occupiable(shape: &BoardShape, placement: Placement) -> bool {
    shape.is_occupiable(placement)
}

impl TryFrom<Vec<String>> for BoardShape {
    type Error = ShapeError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<BoardShape> for Vec<String> {
    fn from(shape: BoardShape) -> Self {
        shape
            .rows
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn courtyard() -> BoardShape {
        BoardShape::new([
            "800000000",
            "700000000",
            "600011000",
            "500011000",
            "400011000",
            "300011000",
            "200000000",
            "100000000",
            " abcdefgh",
        ])
        .unwrap()
    }

    fn placement(notation: &str) -> Placement {
        notation.parse().unwrap()
    }

    #[test]
    fn row_two_only_opens_its_non_zero_columns() {
        let shape = courtyard();
        // Row index 2 holds rank 9 - 1 - 2 = 6.
        let open: Vec<char> = "abcdefgh"
            .chars()
            .filter(|&file| shape.is_occupiable(Placement::new(file, 6).unwrap()))
            .collect();
        assert_eq!(open, vec!['d', 'e']);
    }

    #[test]
    fn ranks_outside_the_shape_are_not_occupiable() {
        let shape = courtyard();
        assert!(!shape.is_occupiable(placement("d9")));
        assert!(!shape.is_occupiable(placement("d42")));
        // Rank 0 resolves to the header row.
        assert!(!shape.is_occupiable(placement("d0")));
    }

    #[test]
    fn files_missing_from_the_header_are_not_occupiable() {
        let shape = BoardShape::new(["311", "211", "111", " ab"]).unwrap();
        assert!(shape.is_occupiable(placement("b2")));
        assert!(!shape.is_occupiable(placement("c2")));
    }

    #[test]
    fn lists_occupiable_cells_top_row_first() {
        let cells: Vec<String> = courtyard()
            .occupiable_placements()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(cells, ["d6", "e6", "d5", "e5", "d4", "e4", "d3", "e3"]);
    }

    #[test]
    fn rejects_ragged_or_headless_shapes() {
        assert_eq!(
            BoardShape::new(["200", "10", " ab"]),
            Err(ShapeError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(BoardShape::new([" ab"]), Err(ShapeError::MissingRows));
    }
}
