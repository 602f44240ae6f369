//! Capability traits for the external inference services resolvers call.
//!
//! Each trait is one network round-trip to a third-party model. These are
//! the only blocking points of a resolve; retries and timeouts belong to the
//! implementation.

use std::sync::Arc;

use captcha_grid::DetectedObject;
use image::DynamicImage;

use crate::types::SolverResult;

/// Finds objects matching a query and reports normalized bounding boxes.
pub trait ObjectDetector: Send + Sync {
    fn detect(&self, image: &DynamicImage, query: &str) -> SolverResult<Vec<DetectedObject>>;
}

/// Labels every cell of a 3x3 captcha in one call.
///
/// Returns the model's raw JSON reply, `{"row1": [..], "row2": [..], "row3": [..]}`.
pub trait GridLabeler: Send + Sync {
    fn label_grid(&self, image_base64: &str) -> SolverResult<String>;
}

/// Answers a free-text question about a single cropped cell.
pub trait CellClassifier: Send + Sync {
    fn classify(&self, cell: &DynamicImage, query: &str) -> SolverResult<String>;
}

/// Speech-to-text over raw audio bytes.
pub trait AudioTranscriber: Send + Sync {
    fn transcribe(&self, audio: &[u8]) -> SolverResult<String>;
}

/// The set of inference backends available to resolver factories.
#[derive(Clone, Default)]
pub struct Backends {
    pub detector: Option<Arc<dyn ObjectDetector>>,
    pub grid_labeler: Option<Arc<dyn GridLabeler>>,
    /// Names the object in a cell.
    pub cell_labeler: Option<Arc<dyn CellClassifier>>,
    /// Answers yes or no to "is this a {query}?".
    pub cell_questioner: Option<Arc<dyn CellClassifier>>,
    pub transcriber: Option<Arc<dyn AudioTranscriber>>,
}

impl Backends {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_detector(mut self, detector: Arc<dyn ObjectDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    pub fn with_grid_labeler(mut self, labeler: Arc<dyn GridLabeler>) -> Self {
        self.grid_labeler = Some(labeler);
        self
    }

    pub fn with_cell_labeler(mut self, labeler: Arc<dyn CellClassifier>) -> Self {
        self.cell_labeler = Some(labeler);
        self
    }

    pub fn with_cell_questioner(mut self, questioner: Arc<dyn CellClassifier>) -> Self {
        self.cell_questioner = Some(questioner);
        self
    }

    pub fn with_transcriber(mut self, transcriber: Arc<dyn AudioTranscriber>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }
}
