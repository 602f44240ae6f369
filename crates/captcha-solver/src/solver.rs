//! Entry point that picks resolvers and walks the fallback chain.

use crate::backends::Backends;
use crate::config::SolverConfig;
use crate::resolvers::{ResolverKind, ResolverRegistry};
use crate::types::{CaptchaResponse, SolverError, SolverResult};

/// Solves image and audio captchas with the configured resolvers.
pub struct CaptchaSolver {
    config: SolverConfig,
    registry: ResolverRegistry,
    backends: Backends,
}

impl CaptchaSolver {
    /// Create a solver using the built-in resolver factories.
    pub fn new(config: SolverConfig, backends: Backends) -> Self {
        Self::with_registry(config, ResolverRegistry::with_defaults(), backends)
    }

    pub fn with_registry(config: SolverConfig, registry: ResolverRegistry, backends: Backends) -> Self {
        Self {
            config,
            registry,
            backends,
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn registry(&self) -> &ResolverRegistry {
        &self.registry
    }

    /// Default resolver first, then each fallback not already tried.
    pub fn chain(&self, default: ResolverKind, fallback: &[ResolverKind]) -> Vec<ResolverKind> {
        let mut chain = vec![default];
        for kind in fallback {
            if !chain.contains(kind) {
                chain.push(*kind);
            }
        }
        chain
    }

    /// Solve a base64-encoded image captcha for objects named `query`.
    pub fn solve_image(&self, data: &str, query: &str) -> SolverResult<CaptchaResponse> {
        let provider = &self.config.provider;
        let chain = self.chain(provider.default_image_resolver, &provider.image_fallback);
        self.solve_with_chain(&chain, data, Some(query))
    }

    /// Solve a base64-encoded audio captcha.
    pub fn solve_audio(&self, data: &str) -> SolverResult<CaptchaResponse> {
        let provider = &self.config.provider;
        let chain = self.chain(provider.default_audio_resolver, &provider.audio_fallback);
        self.solve_with_chain(&chain, data, None)
    }

    /// Solve with exactly one resolver, no fallback.
    pub fn solve_with(
        &self,
        kind: ResolverKind,
        data: &str,
        query: Option<&str>,
    ) -> SolverResult<CaptchaResponse> {
        let resolver = self.registry.create(kind, &self.config, &self.backends)?;
        tracing::info!("Solving with {kind}");
        Ok(resolver.solve(data, query)?.into())
    }

    fn solve_with_chain(
        &self,
        chain: &[ResolverKind],
        data: &str,
        query: Option<&str>,
    ) -> SolverResult<CaptchaResponse> {
        let mut last_error = None;
        let mut attempts = 0;

        for &kind in chain {
            attempts += 1;
            match self.solve_with(kind, data, query) {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() => {
                    tracing::warn!("Resolver {kind} failed: {e}");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        match last_error {
            Some(last) => Err(SolverError::Exhausted {
                attempts,
                last: Box::new(last),
            }),
            None => Err(SolverError::Config("resolver chain is empty".to_string())),
        }
    }
}
