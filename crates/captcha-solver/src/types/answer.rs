//! Resolver output types.

use captcha_grid::MatchVector;
use serde::{Deserialize, Serialize};

/// What a resolver produced: a per-cell match vector or the spoken words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaptchaAnswer {
    Grid(MatchVector),
    Words(Vec<String>),
}

impl CaptchaAnswer {
    pub fn as_grid(&self) -> Option<&MatchVector> {
        match self {
            CaptchaAnswer::Grid(v) => Some(v),
            CaptchaAnswer::Words(_) => None,
        }
    }

    pub fn as_words(&self) -> Option<&[String]> {
        match self {
            CaptchaAnswer::Words(w) => Some(w),
            CaptchaAnswer::Grid(_) => None,
        }
    }
}

/// Envelope returned to callers, serialised as `{"response": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptchaResponse {
    pub response: CaptchaAnswer,
}

impl From<CaptchaAnswer> for CaptchaResponse {
    fn from(response: CaptchaAnswer) -> Self {
        Self { response }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_json_shape() {
        let grid = CaptchaResponse::from(CaptchaAnswer::Grid(MatchVector::from(vec![
            true, false,
        ])));
        assert_eq!(
            serde_json::to_value(&grid).unwrap(),
            serde_json::json!({ "response": [true, false] })
        );

        let words = CaptchaResponse::from(CaptchaAnswer::Words(vec!["a".into(), "b".into()]));
        assert_eq!(
            serde_json::to_value(&words).unwrap(),
            serde_json::json!({ "response": ["a", "b"] })
        );
    }
}
