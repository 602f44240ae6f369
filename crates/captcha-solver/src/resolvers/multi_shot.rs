//! Resolvers: label_multi_shot and yes_no_multi_shot, one inference call per cell.

use std::sync::Arc;
use std::time::Duration;

use captcha_grid::{decode_base64_image, split_into_cells, GridPartition, MatchVector};

use crate::backends::CellClassifier;
use crate::config::ProviderConfig;
use crate::types::{CaptchaAnswer, SolverResult};

use super::{require_query, Resolver, ResolverKind};

/// How a per-cell answer is compared with the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerRule {
    /// The answer names the object: trimmed, lowercased, periods removed,
    /// then compared with the query as given.
    Label,
    /// The answer is yes or no: trimmed and lowercased, then compared with `yes`.
    YesNo,
}

impl AnswerRule {
    pub fn is_match(&self, answer: &str, query: &str) -> bool {
        match self {
            AnswerRule::Label => answer.trim().to_lowercase().replace('.', "") == query,
            AnswerRule::YesNo => answer.trim().to_lowercase() == "yes",
        }
    }
}

pub struct MultiShotResolver {
    classifier: Arc<dyn CellClassifier>,
    rule: AnswerRule,
    width: u32,
    height: u32,
    grid_size: u32,
    interval: Duration,
}

impl MultiShotResolver {
    pub fn new(classifier: Arc<dyn CellClassifier>, rule: AnswerRule, config: &ProviderConfig) -> Self {
        Self {
            classifier,
            rule,
            width: config.image_size.width,
            height: config.image_size.height,
            grid_size: config.grid_size,
            interval: Duration::from_millis(config.request_interval_ms),
        }
    }
}

impl Resolver for MultiShotResolver {
    fn kind(&self) -> ResolverKind {
        match self.rule {
            AnswerRule::Label => ResolverKind::LabelMultiShot,
            AnswerRule::YesNo => ResolverKind::YesNoMultiShot,
        }
    }

    fn solve(&self, data: &str, query: Option<&str>) -> SolverResult<CaptchaAnswer> {
        let query = require_query(self.kind(), query)?;
        let image = decode_base64_image(data)?;
        let partition = GridPartition::new(self.width, self.height, self.grid_size)?;

        let mut matches = MatchVector::all_false(partition.len());
        for (index, cell) in split_into_cells(&image, &partition).iter().enumerate() {
            if index > 0 && !self.interval.is_zero() {
                std::thread::sleep(self.interval);
            }
            let answer = self.classifier.classify(cell, query)?;
            let hit = self.rule.is_match(&answer, query);
            tracing::debug!("Cell {index}: answer {answer:?} -> {hit}");
            if hit {
                matches.set(index);
            }
        }

        Ok(CaptchaAnswer::Grid(matches))
    }
}
