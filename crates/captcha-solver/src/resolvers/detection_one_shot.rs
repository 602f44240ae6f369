//! Resolver: detection_one_shot, object detection projected onto the grid.

use std::sync::Arc;

use captcha_grid::{decode_base64_image, map_objects_to_cells, GridPartition};

use crate::backends::ObjectDetector;
use crate::config::ProviderConfig;
use crate::types::{CaptchaAnswer, SolverResult};

use super::{require_query, Resolver, ResolverKind};

pub struct DetectionOneShotResolver {
    detector: Arc<dyn ObjectDetector>,
    width: u32,
    height: u32,
    grid_size: u32,
}

impl DetectionOneShotResolver {
    pub fn new(detector: Arc<dyn ObjectDetector>, config: &ProviderConfig) -> Self {
        Self {
            detector,
            width: config.image_size.width,
            height: config.image_size.height,
            grid_size: config.grid_size,
        }
    }
}

impl Resolver for DetectionOneShotResolver {
    fn kind(&self) -> ResolverKind {
        ResolverKind::DetectionOneShot
    }

    fn solve(&self, data: &str, query: Option<&str>) -> SolverResult<CaptchaAnswer> {
        let query = require_query(self.kind(), query)?;
        let image = decode_base64_image(data)?;

        let objects = self.detector.detect(&image, query)?;
        tracing::debug!("Detector returned {} objects for {query:?}", objects.len());

        let partition = GridPartition::new(self.width, self.height, self.grid_size)?;
        Ok(CaptchaAnswer::Grid(map_objects_to_cells(&objects, &partition)))
    }
}
