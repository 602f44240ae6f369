//! captcha-grid: grid geometry core for captcha solving.
//!
//! Partitions an image into an N x N grid, projects detector boxes onto its
//! cells, and matches row-based label grids against a query.

pub mod capture;
pub mod geometry;
pub mod grid_response;
pub mod partition;
pub mod transcript;
pub mod types;

pub use capture::{decode_base64, decode_base64_image, split_into_cells};
pub use geometry::{GridCell, Vec2};
pub use grid_response::{match_query, RowGrid};
pub use partition::{map_objects_to_cells, partition, GridPartition, MAX_CELLS};
pub use transcript::parse_transcription;
pub use types::*;
