//! Resolver registration and dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use crate::backends::Backends;
use crate::config::SolverConfig;
use crate::types::{SolverError, SolverResult};

use super::{
    AnswerRule, AudioTranscriptionResolver, DetectionOneShotResolver, LabelGridOneShotResolver,
    MultiShotResolver, Resolver, ResolverKind,
};

/// Builds a resolver from the configuration and the available backends.
pub type ResolverFactory =
    Arc<dyn Fn(&SolverConfig, &Backends) -> SolverResult<Box<dyn Resolver>> + Send + Sync>;

/// Dispatch table from resolver kind to factory.
#[derive(Clone, Default)]
pub struct ResolverRegistry {
    factories: HashMap<ResolverKind, ResolverFactory>,
}

fn unavailable(kind: ResolverKind, backend: &'static str) -> SolverError {
    SolverError::BackendUnavailable { kind, backend }
}

fn label_grid_one_shot(_: &SolverConfig, backends: &Backends) -> SolverResult<Box<dyn Resolver>> {
    let labeler = backends
        .grid_labeler
        .clone()
        .ok_or_else(|| unavailable(ResolverKind::LabelGridOneShot, "grid labeler"))?;
    Ok(Box::new(LabelGridOneShotResolver::new(labeler)))
}

fn detection_one_shot(config: &SolverConfig, backends: &Backends) -> SolverResult<Box<dyn Resolver>> {
    let detector = backends
        .detector
        .clone()
        .ok_or_else(|| unavailable(ResolverKind::DetectionOneShot, "object detector"))?;
    Ok(Box::new(DetectionOneShotResolver::new(detector, &config.provider)))
}

fn label_multi_shot(config: &SolverConfig, backends: &Backends) -> SolverResult<Box<dyn Resolver>> {
    let labeler = backends
        .cell_labeler
        .clone()
        .ok_or_else(|| unavailable(ResolverKind::LabelMultiShot, "cell labeler"))?;
    Ok(Box::new(MultiShotResolver::new(labeler, AnswerRule::Label, &config.provider)))
}

fn yes_no_multi_shot(config: &SolverConfig, backends: &Backends) -> SolverResult<Box<dyn Resolver>> {
    let questioner = backends
        .cell_questioner
        .clone()
        .ok_or_else(|| unavailable(ResolverKind::YesNoMultiShot, "cell questioner"))?;
    Ok(Box::new(MultiShotResolver::new(questioner, AnswerRule::YesNo, &config.provider)))
}

fn audio_transcription(_: &SolverConfig, backends: &Backends) -> SolverResult<Box<dyn Resolver>> {
    let transcriber = backends
        .transcriber
        .clone()
        .ok_or_else(|| unavailable(ResolverKind::AudioTranscription, "transcriber"))?;
    Ok(Box::new(AudioTranscriptionResolver::new(transcriber)))
}

impl ResolverRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with a factory for every [`ResolverKind`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ResolverKind::LabelGridOneShot, Arc::new(label_grid_one_shot));
        registry.register(ResolverKind::DetectionOneShot, Arc::new(detection_one_shot));
        registry.register(ResolverKind::LabelMultiShot, Arc::new(label_multi_shot));
        registry.register(ResolverKind::YesNoMultiShot, Arc::new(yes_no_multi_shot));
        registry.register(ResolverKind::AudioTranscription, Arc::new(audio_transcription));
        registry
    }

    /// Register or replace the factory for `kind`.
    pub fn register(&mut self, kind: ResolverKind, factory: ResolverFactory) {
        if self.factories.insert(kind, factory).is_some() {
            tracing::debug!("Replaced factory for {kind}");
        }
    }

    /// Build a fresh resolver for `kind`.
    pub fn create(
        &self,
        kind: ResolverKind,
        config: &SolverConfig,
        backends: &Backends,
    ) -> SolverResult<Box<dyn Resolver>> {
        let factory = self
            .factories
            .get(&kind)
            .ok_or(SolverError::ResolverNotRegistered(kind))?;
        factory(config, backends)
    }

    /// Registered kinds, in [`ResolverKind::ALL`] order.
    pub fn kinds(&self) -> Vec<ResolverKind> {
        ResolverKind::ALL
            .into_iter()
            .filter(|k| self.factories.contains_key(k))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_kind() {
        let registry = ResolverRegistry::with_defaults();
        assert_eq!(registry.kinds(), ResolverKind::ALL.to_vec());
    }

    #[test]
    fn test_unregistered_kind() {
        let registry = ResolverRegistry::new();
        let result = registry.create(
            ResolverKind::DetectionOneShot,
            &SolverConfig::default(),
            &Backends::new(),
        );
        assert!(matches!(
            result,
            Err(SolverError::ResolverNotRegistered(ResolverKind::DetectionOneShot))
        ));
    }

    #[test]
    fn test_missing_backend() {
        let registry = ResolverRegistry::with_defaults();
        for kind in ResolverKind::ALL {
            let result = registry.create(kind, &SolverConfig::default(), &Backends::new());
            match result {
                Err(SolverError::BackendUnavailable { kind: k, .. }) => assert_eq!(k, kind),
                Err(other) => panic!("unexpected error for {kind}: {other}"),
                Ok(_) => panic!("{kind} built without a backend"),
            }
        }
    }
}
