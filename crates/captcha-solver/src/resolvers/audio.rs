//! Resolver: audio_transcription, speech-to-text followed by answer extraction.

use std::sync::Arc;

use captcha_grid::{decode_base64, parse_transcription};

use crate::backends::AudioTranscriber;
use crate::types::{CaptchaAnswer, SolverResult};

use super::{Resolver, ResolverKind};

pub struct AudioTranscriptionResolver {
    transcriber: Arc<dyn AudioTranscriber>,
}

impl AudioTranscriptionResolver {
    pub fn new(transcriber: Arc<dyn AudioTranscriber>) -> Self {
        Self { transcriber }
    }
}

impl Resolver for AudioTranscriptionResolver {
    fn kind(&self) -> ResolverKind {
        ResolverKind::AudioTranscription
    }

    /// The query is ignored.
    fn solve(&self, data: &str, _query: Option<&str>) -> SolverResult<CaptchaAnswer> {
        let audio = decode_base64(data)?;
        let text = self.transcriber.transcribe(&audio)?;
        tracing::debug!("Transcription: {text:?}");

        let words = parse_transcription(&text)?;
        Ok(CaptchaAnswer::Words(words.to_vec()))
    }
}
