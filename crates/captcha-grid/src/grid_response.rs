//! Row-based object label grids, as returned by a vision labeling model.

use serde::{Deserialize, Serialize};

use crate::types::{GridError, GridResult, MatchVector, RowId};

/// Number of labels each row must carry.
pub const ROW_LEN: usize = 3;

/// A validated 3x3 grid of object labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRowGrid")]
pub struct RowGrid {
    row1: Vec<String>,
    row2: Vec<String>,
    row3: Vec<String>,
}

/// Unvalidated wire shape of a labeling response.
#[derive(Debug, Deserialize)]
struct RawRowGrid {
    row1: Vec<String>,
    row2: Vec<String>,
    row3: Vec<String>,
}

impl TryFrom<RawRowGrid> for RowGrid {
    type Error = GridError;

    fn try_from(raw: RawRowGrid) -> GridResult<Self> {
        RowGrid::new(raw.row1, raw.row2, raw.row3)
    }
}

fn check_row(row: RowId, labels: &[String]) -> GridResult<()> {
    if labels.len() != ROW_LEN {
        return Err(GridError::Shape {
            row,
            len: labels.len(),
        });
    }
    Ok(())
}

impl RowGrid {
    /// Validate three rows into a grid. Rows are checked in order and the
    /// first one without exactly three labels is reported.
    pub fn new(row1: Vec<String>, row2: Vec<String>, row3: Vec<String>) -> GridResult<Self> {
        check_row(RowId::Row1, &row1)?;
        check_row(RowId::Row2, &row2)?;
        check_row(RowId::Row3, &row3)?;
        Ok(Self { row1, row2, row3 })
    }

    /// Parse and validate a JSON object of the form
    /// `{"row1": [..], "row2": [..], "row3": [..]}`.
    pub fn from_json(text: &str) -> GridResult<Self> {
        let raw: RawRowGrid = serde_json::from_str(text)?;
        raw.try_into()
    }

    pub fn row(&self, row: RowId) -> &[String] {
        match row {
            RowId::Row1 => &self.row1,
            RowId::Row2 => &self.row2,
            RowId::Row3 => &self.row3,
        }
    }

    /// All nine labels in row-major order.
    pub fn flatten(&self) -> Vec<&str> {
        self.row1
            .iter()
            .chain(&self.row2)
            .chain(&self.row3)
            .map(String::as_str)
            .collect()
    }

    /// Case-insensitive match of every label against `query`.
    pub fn flattened_matches(&self, query: &str) -> MatchVector {
        match_query(&self.flatten(), query)
    }
}

/// Compare each label to `query` ignoring case. No trimming or substring matching.
pub fn match_query<S: AsRef<str>>(labels: &[S], query: &str) -> MatchVector {
    let query = query.to_lowercase();
    labels
        .iter()
        .map(|label| label.as_ref().to_lowercase() == query)
        .collect()
}
