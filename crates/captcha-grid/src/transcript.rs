//! Extraction of the answer words from an audio captcha transcription.

use crate::types::{GridError, GridResult};

/// Phrase that precedes the two answer words in the audio prompt.
const ANSWER_MARKER: &str = "spoken by me. ";

fn clean_word(word: &str) -> String {
    word.replace('.', "").trim().to_lowercase()
}

/// Return the two words that follow "spoken by me. " in the transcription.
///
/// Words are split on single spaces, stripped of periods, trimmed and
/// lowercased.
pub fn parse_transcription(transcription: &str) -> GridResult<[String; 2]> {
    let (_, after_marker) = transcription.split_once(ANSWER_MARKER).ok_or_else(|| {
        GridError::Transcription("Failed to parse audio transcription: marker not found".to_string())
    })?;

    let mut words = after_marker.split(' ');
    match (words.next(), words.next()) {
        (Some(first), Some(second)) => Ok([clean_word(first), clean_word(second)]),
        _ => Err(GridError::Transcription(
            "Failed to parse audio transcription: fewer than two words".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_words_extracted() {
        let text = "Please type the words spoken by me. Orange. Bicycle. Thank you.";
        let words = parse_transcription(text).unwrap();
        assert_eq!(words, ["orange".to_string(), "bicycle".to_string()]);
    }

    #[test]
    fn test_missing_marker() {
        let err = parse_transcription("nothing useful here").unwrap_err();
        assert!(matches!(err, GridError::Transcription(_)));
    }

    #[test]
    fn test_single_word() {
        let err = parse_transcription("words spoken by me. Lonely").unwrap_err();
        assert!(matches!(err, GridError::Transcription(_)));
    }

    #[test]
    fn test_double_space_yields_empty_word() {
        let words = parse_transcription("spoken by me. One  two").unwrap();
        assert_eq!(words, ["one".to_string(), String::new()]);
    }
}
