//! Resolver strategies and their dispatch registry.

pub mod audio;
pub mod detection_one_shot;
pub mod label_grid_one_shot;
pub mod multi_shot;
pub mod registry;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{CaptchaAnswer, SolverError, SolverResult};

pub use audio::AudioTranscriptionResolver;
pub use detection_one_shot::DetectionOneShotResolver;
pub use label_grid_one_shot::LabelGridOneShotResolver;
pub use multi_shot::{AnswerRule, MultiShotResolver};
pub use registry::{ResolverFactory, ResolverRegistry};

/// Identifier of a resolver strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverKind {
    /// One call labels all nine cells as a row grid.
    LabelGridOneShot,
    /// One detector call; boxes are projected onto the grid.
    DetectionOneShot,
    /// One call per cropped cell, asking for the object name.
    LabelMultiShot,
    /// One call per cropped cell, asking a yes/no question.
    YesNoMultiShot,
    /// Speech-to-text of an audio captcha.
    AudioTranscription,
}

impl ResolverKind {
    pub const ALL: [ResolverKind; 5] = [
        ResolverKind::LabelGridOneShot,
        ResolverKind::DetectionOneShot,
        ResolverKind::LabelMultiShot,
        ResolverKind::YesNoMultiShot,
        ResolverKind::AudioTranscription,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResolverKind::LabelGridOneShot => "label_grid_one_shot",
            ResolverKind::DetectionOneShot => "detection_one_shot",
            ResolverKind::LabelMultiShot => "label_multi_shot",
            ResolverKind::YesNoMultiShot => "yes_no_multi_shot",
            ResolverKind::AudioTranscription => "audio_transcription",
        }
    }

    pub fn is_audio(&self) -> bool {
        matches!(self, ResolverKind::AudioTranscription)
    }

    pub fn description(&self) -> &'static str {
        match self {
            ResolverKind::LabelGridOneShot => "Label the whole 3x3 grid in one vision call",
            ResolverKind::DetectionOneShot => "Detect query objects and map box centers to cells",
            ResolverKind::LabelMultiShot => "Name the object in each cropped cell",
            ResolverKind::YesNoMultiShot => "Ask whether each cropped cell shows the query",
            ResolverKind::AudioTranscription => "Transcribe audio and extract the two answer words",
        }
    }
}

impl fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A strategy that turns raw captcha media into an answer.
pub trait Resolver: Send + Sync {
    fn kind(&self) -> ResolverKind;

    /// Solve a base64-encoded captcha. Image resolvers require `query`.
    fn solve(&self, data: &str, query: Option<&str>) -> SolverResult<CaptchaAnswer>;
}

pub(crate) fn require_query(kind: ResolverKind, query: Option<&str>) -> SolverResult<&str> {
    query.ok_or(SolverError::MissingQuery(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serde_matches_display() {
        for kind in ResolverKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
            let back: ResolverKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn test_only_transcription_is_audio() {
        let audio: Vec<_> = ResolverKind::ALL.iter().filter(|k| k.is_audio()).collect();
        assert_eq!(audio, vec![&ResolverKind::AudioTranscription]);
    }

    #[test]
    fn test_require_query() {
        assert_eq!(
            require_query(ResolverKind::DetectionOneShot, Some("bed")).unwrap(),
            "bed"
        );
        assert!(matches!(
            require_query(ResolverKind::DetectionOneShot, None),
            Err(SolverError::MissingQuery(ResolverKind::DetectionOneShot))
        ));
    }
}
