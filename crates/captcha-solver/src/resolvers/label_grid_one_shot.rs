//! Resolver: label_grid_one_shot, a single vision call labelling all nine cells.

use std::sync::Arc;

use captcha_grid::RowGrid;

use crate::backends::GridLabeler;
use crate::types::{CaptchaAnswer, SolverResult};

use super::{require_query, Resolver, ResolverKind};

pub struct LabelGridOneShotResolver {
    labeler: Arc<dyn GridLabeler>,
}

impl LabelGridOneShotResolver {
    pub fn new(labeler: Arc<dyn GridLabeler>) -> Self {
        Self { labeler }
    }
}

impl Resolver for LabelGridOneShotResolver {
    fn kind(&self) -> ResolverKind {
        ResolverKind::LabelGridOneShot
    }

    fn solve(&self, data: &str, query: Option<&str>) -> SolverResult<CaptchaAnswer> {
        let query = require_query(self.kind(), query)?;

        let reply = self.labeler.label_grid(data)?;
        let grid = RowGrid::from_json(&reply).inspect_err(|e| {
            tracing::warn!("Labeling reply is not a valid 3x3 grid: {e}");
        })?;

        Ok(CaptchaAnswer::Grid(grid.flattened_matches(query)))
    }
}
