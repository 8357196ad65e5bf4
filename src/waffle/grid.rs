//! Expansion of category records into waffle grid cells.

use log::{debug, warn};
use serde::Serialize;

use crate::error::{WaffleError, WaffleResult};
use crate::input::CategoryRecord;

use super::layout::{cell_position, GRID_CAPACITY};

/// Subcategory whose value is the answer to reveal.
pub const ANSWER_SUBCATEGORY: &str = "no";

/// One person in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub index: usize,
    pub subcategory: String,
    pub row: usize,
    pub column: usize,
}

/// All cells of one category, in fill order.
#[derive(Debug, Clone)]
pub struct WaffleGrid {
    pub category: String,
    cells: Vec<GridCell>,
    answer: usize,
}

/// Number of cells a record occupies. Fractional values round up so that a
/// partially present person is still drawn.
fn cell_count(category: &str, record: &CategoryRecord) -> WaffleResult<usize> {
    let value = record.value;
    if !value.is_finite() {
        return Err(WaffleError::InvalidData(format!(
            "{}/{} has non-finite value {}",
            category, record.subcategory, value
        )));
    }
    if value <= 0.0 {
        return Ok(0);
    }
    if value.fract() != 0.0 {
        warn!(
            "{}/{} has fractional value {}; rounding up to {}",
            category,
            record.subcategory,
            value,
            value.ceil()
        );
    }
    // Values beyond the grid are caught by the overflow check below.
    Ok(value.ceil().min((GRID_CAPACITY + 1) as f64) as usize)
}

impl WaffleGrid {
    /// Build the grid for `category` from its records, in record order.
    pub fn build(category: &str, records: &[CategoryRecord]) -> WaffleResult<Self> {
        let answer_record = records
            .iter()
            .find(|r| r.subcategory == ANSWER_SUBCATEGORY)
            .ok_or_else(|| WaffleError::MissingAnswer(category.to_string()))?;
        let answer = cell_count(category, answer_record)?;

        let mut cells = Vec::with_capacity(GRID_CAPACITY);
        for record in records {
            let count = cell_count(category, record)?;
            if cells.len() + count > GRID_CAPACITY {
                return Err(WaffleError::GridOverflow {
                    category: category.to_string(),
                    cells: cells.len() + count,
                });
            }
            for _ in 0..count {
                let index = cells.len();
                let (row, column) = cell_position(index);
                cells.push(GridCell {
                    index,
                    subcategory: record.subcategory.clone(),
                    row,
                    column,
                });
            }
        }

        if cells.len() < GRID_CAPACITY {
            debug!("{}: grid has {} of {} cells", category, cells.len(), GRID_CAPACITY);
        }

        Ok(WaffleGrid {
            category: category.to_string(),
            cells,
            answer,
        })
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&GridCell> {
        self.cells.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True number of highlighted people.
    pub fn answer(&self) -> usize {
        self.answer
    }

    /// Number of cells assigned to the answer subcategory.
    pub fn highlighted_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.subcategory == ANSWER_SUBCATEGORY)
            .count()
    }

    /// Check that `index` names a cell of this grid.
    pub fn check_index(&self, index: usize) -> WaffleResult<()> {
        if index < self.cells.len() {
            Ok(())
        } else {
            Err(WaffleError::CellOutOfRange {
                category: self.category.clone(),
                index,
                len: self.cells.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(sub: &str, value: f64) -> CategoryRecord {
        CategoryRecord::new("water", sub, value)
    }

    #[test]
    fn test_build_full_grid() {
        let grid = WaffleGrid::build("water", &[rec("no", 11.0), rec("yes", 89.0)]).unwrap();
        assert_eq!(grid.len(), 100);
        assert_eq!(grid.answer(), 11);
        assert_eq!(grid.highlighted_count(), 11);
        assert_eq!(grid.cell(10).unwrap().subcategory, "no");
        assert_eq!(grid.cell(11).unwrap().subcategory, "yes");
        let last = grid.cell(99).unwrap();
        assert_eq!((last.row, last.column), (0, 9));
    }

    #[test]
    fn test_record_order_drives_fill_order() {
        let grid = WaffleGrid::build("water", &[rec("yes", 3.0), rec("no", 2.0)]).unwrap();
        let subs: Vec<&str> = grid.cells().iter().map(|c| c.subcategory.as_str()).collect();
        assert_eq!(subs, vec!["yes", "yes", "yes", "no", "no"]);
        assert_eq!(grid.answer(), 2);
    }

    #[test]
    fn test_fractional_value_rounds_up() {
        let grid = WaffleGrid::build("water", &[rec("no", 2.5), rec("yes", 0.0)]).unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid.answer(), 3);
    }

    #[test]
    fn test_missing_answer() {
        let err = WaffleGrid::build("water", &[rec("yes", 100.0)]).unwrap_err();
        assert!(matches!(err, WaffleError::MissingAnswer(ref c) if c == "water"));
    }

    #[test]
    fn test_overflow() {
        let err = WaffleGrid::build("water", &[rec("no", 60.0), rec("yes", 41.0)]).unwrap_err();
        assert!(matches!(err, WaffleError::GridOverflow { cells: 101, .. }));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(WaffleGrid::build("water", &[rec("no", f64::NAN)]).is_err());
    }

    #[test]
    fn test_check_index() {
        let grid = WaffleGrid::build("water", &[rec("no", 4.0)]).unwrap();
        assert!(grid.check_index(3).is_ok());
        assert!(matches!(
            grid.check_index(4),
            Err(WaffleError::CellOutOfRange { index: 4, len: 4, .. })
        ));
    }
}
