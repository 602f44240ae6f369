//! Core data types shared by the geometry engine and the grid response model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::GridCell;

/// A normalized bounding box reported by an external object detector.
///
/// Each bound is a fraction of the image width or height. Values outside
/// `[0, 1]` or NaN are not rejected here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DetectedObject {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Scale the normalized box into absolute pixel coordinates.
    pub fn to_cell(&self, width: f64, height: f64) -> GridCell {
        GridCell::new(
            self.x_min * width,
            self.x_max * width,
            self.y_min * height,
            self.y_max * height,
        )
    }
}

/// One boolean per grid cell, positionally aligned with the partition
/// (or the flattened row grid) it was computed against.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchVector(Vec<bool>);

impl MatchVector {
    /// A vector of `len` unmatched cells.
    pub fn all_false(len: usize) -> Self {
        Self(vec![false; len])
    }

    /// Mark cell `index` as matched. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize) {
        if let Some(flag) = self.0.get_mut(index) {
            *flag = true;
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    /// Indices of every matched cell, ascending.
    pub fn matched_indices(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, &hit)| hit.then_some(i))
            .collect()
    }

    pub fn into_inner(self) -> Vec<bool> {
        self.0
    }
}

impl From<Vec<bool>> for MatchVector {
    fn from(flags: Vec<bool>) -> Self {
        Self(flags)
    }
}

impl FromIterator<bool> for MatchVector {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Identity of a row in a [`crate::RowGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowId {
    Row1,
    Row2,
    Row3,
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RowId::Row1 => "row1",
            RowId::Row2 => "row2",
            RowId::Row3 => "row3",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in the grid core.
#[derive(thiserror::Error, Debug)]
pub enum GridError {
    #[error("Shape error: {row} must contain exactly 3 items, got {len}")]
    Shape { row: RowId, len: usize },

    #[error("Precondition violated: {0}")]
    Precondition(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Transcription error: {0}")]
    Transcription(String),
}

/// Convenience result type.
pub type GridResult<T> = Result<T, GridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detected_object_scaling() {
        let obj = DetectedObject::new(0.25, 0.5, 0.1, 0.2);
        let cell = obj.to_cell(400.0, 100.0);
        assert_eq!(cell, GridCell::new(100.0, 200.0, 10.0, 20.0));
    }

    #[test]
    fn test_match_vector_set_ignores_out_of_range() {
        let mut v = MatchVector::all_false(4);
        v.set(2);
        v.set(9);
        assert_eq!(v.as_slice(), &[false, false, true, false]);
        assert_eq!(v.matched_indices(), vec![2]);
    }

    #[test]
    fn test_match_vector_serializes_as_array() {
        let v = MatchVector::from(vec![true, false]);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[true,false]");
    }

    #[test]
    fn test_shape_error_message() {
        let err = GridError::Shape {
            row: RowId::Row2,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "Shape error: row2 must contain exactly 3 items, got 2"
        );
    }
}
