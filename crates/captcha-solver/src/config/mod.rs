//! Configuration loading and resolution.

use std::path::{Path, PathBuf};

use captcha_grid::MAX_CELLS;
use serde::{Deserialize, Serialize};

use crate::resolvers::ResolverKind;
use crate::types::{SolverError, SolverResult};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "CAPTCHA_CONFIG";
/// Environment override for the grid size.
pub const GRID_SIZE_ENV: &str = "CAPTCHA_GRID_SIZE";
/// Environment override for the image size, as `WIDTHxHEIGHT`.
pub const IMAGE_SIZE_ENV: &str = "CAPTCHA_IMAGE_SIZE";

/// Coordinate space the grid is laid over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    /// Parse `640x480` (also accepts `X`).
    pub fn parse(text: &str) -> Option<Self> {
        let (w, h) = text.trim().split_once(['x', 'X'])?;
        Some(Self {
            width: w.trim().parse().ok()?,
            height: h.trim().parse().ok()?,
        })
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        Self {
            width: 640,
            height: 640,
        }
    }
}

/// Settings for the image and audio resolvers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub image_size: ImageSize,
    pub grid_size: u32,
    pub default_image_resolver: ResolverKind,
    pub default_audio_resolver: ResolverKind,
    pub image_fallback: Vec<ResolverKind>,
    pub audio_fallback: Vec<ResolverKind>,
    /// Pause between consecutive per-cell inference calls.
    pub request_interval_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            image_size: ImageSize::default(),
            grid_size: 3,
            default_image_resolver: ResolverKind::LabelGridOneShot,
            default_audio_resolver: ResolverKind::AudioTranscription,
            image_fallback: vec![
                ResolverKind::DetectionOneShot,
                ResolverKind::LabelGridOneShot,
                ResolverKind::LabelMultiShot,
                ResolverKind::YesNoMultiShot,
            ],
            audio_fallback: vec![ResolverKind::AudioTranscription],
            request_interval_ms: 2000,
        }
    }
}

/// Top-level solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub provider: ProviderConfig,
}

impl SolverConfig {
    /// Read a JSON config file, apply environment overrides, and validate.
    pub fn load(path: &Path) -> SolverResult<Self> {
        Self::read(path)?.with_env_overrides()?.validated()
    }

    /// Read and validate a JSON config file, ignoring the environment.
    pub fn from_file(path: &Path) -> SolverResult<Self> {
        Self::read(path)?.validated()
    }

    fn read(path: &Path) -> SolverResult<Self> {
        tracing::info!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load from `path` when given, otherwise start from defaults.
    pub fn from_env_or_default(path: Option<&Path>) -> SolverResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Self::default().with_env_overrides()?.validated(),
        }
    }

    fn with_env_overrides(mut self) -> SolverResult<Self> {
        if let Ok(value) = std::env::var(GRID_SIZE_ENV) {
            self.provider.grid_size = value.trim().parse().map_err(|_| {
                SolverError::Config(format!("{GRID_SIZE_ENV} is not a number: {value}"))
            })?;
        }
        if let Ok(value) = std::env::var(IMAGE_SIZE_ENV) {
            self.provider.image_size = ImageSize::parse(&value).ok_or_else(|| {
                SolverError::Config(format!("{IMAGE_SIZE_ENV} must look like 640x640, got {value}"))
            })?;
        }
        Ok(self)
    }

    /// Reject settings no resolver can work with.
    pub fn validate(&self) -> SolverResult<()> {
        let provider = &self.provider;
        if provider.grid_size == 0 {
            return Err(SolverError::Config("grid_size must be at least 1".to_string()));
        }
        let cells = (provider.grid_size as usize).saturating_mul(provider.grid_size as usize);
        if cells > MAX_CELLS {
            return Err(SolverError::Config(format!(
                "grid_size {} exceeds the limit of {MAX_CELLS} cells",
                provider.grid_size
            )));
        }
        if provider.image_size.width == 0 || provider.image_size.height == 0 {
            return Err(SolverError::Config(format!(
                "image_size must be non-zero, got {}x{}",
                provider.image_size.width, provider.image_size.height
            )));
        }
        if provider.default_image_resolver.is_audio() {
            return Err(SolverError::Config(format!(
                "default_image_resolver cannot be the audio resolver {}",
                provider.default_image_resolver
            )));
        }
        if !provider.default_audio_resolver.is_audio() {
            return Err(SolverError::Config(format!(
                "default_audio_resolver must be an audio resolver, got {}",
                provider.default_audio_resolver
            )));
        }
        if let Some(kind) = provider.image_fallback.iter().find(|k| k.is_audio()) {
            return Err(SolverError::Config(format!(
                "image_fallback cannot contain the audio resolver {kind}"
            )));
        }
        if let Some(kind) = provider.audio_fallback.iter().find(|k| !k.is_audio()) {
            return Err(SolverError::Config(format!(
                "audio_fallback must only contain audio resolvers, got {kind}"
            )));
        }
        Ok(())
    }

    fn validated(self) -> SolverResult<Self> {
        self.validate()?;
        Ok(self)
    }
}

/// Resolve the config file path.
pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(env_path));
    }

    let cwd_config = PathBuf::from(".captcha/config.json");
    if cwd_config.exists() {
        return Some(cwd_config);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.provider.grid_size, 3);
        assert_eq!(config.provider.image_size, ImageSize::default());
        assert_eq!(
            config.provider.default_image_resolver,
            ResolverKind::LabelGridOneShot
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SolverConfig =
            serde_json::from_str(r#"{"provider": {"grid_size": 4}}"#).unwrap();
        assert_eq!(config.provider.grid_size, 4);
        assert_eq!(config.provider.image_size.width, 640);
        assert_eq!(config.provider.audio_fallback, vec![ResolverKind::AudioTranscription]);
    }

    #[test]
    fn test_image_size_parse() {
        assert_eq!(
            ImageSize::parse("320x200"),
            Some(ImageSize {
                width: 320,
                height: 200
            })
        );
        assert_eq!(ImageSize::parse(" 10 X 20 ").map(|s| s.height), Some(20));
        assert_eq!(ImageSize::parse("320"), None);
        assert_eq!(ImageSize::parse("axb"), None);
    }

    #[test]
    fn test_validate_rejects_zero_grid() {
        let mut config = SolverConfig::default();
        config.provider.grid_size = 0;
        assert!(matches!(config.validate(), Err(SolverError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_swapped_defaults() {
        let mut config = SolverConfig::default();
        config.provider.default_image_resolver = ResolverKind::AudioTranscription;
        assert!(config.validate().is_err());

        let mut config = SolverConfig::default();
        config.provider.default_audio_resolver = ResolverKind::DetectionOneShot;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_grid() {
        let mut config = SolverConfig::default();
        config.provider.grid_size = 65536;
        assert!(matches!(config.validate(), Err(SolverError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_mixed_fallbacks() {
        let mut config = SolverConfig::default();
        config.provider.image_fallback.push(ResolverKind::AudioTranscription);
        assert!(matches!(config.validate(), Err(SolverError::Config(_))));

        let mut config = SolverConfig::default();
        config.provider.audio_fallback = vec![
            ResolverKind::AudioTranscription,
            ResolverKind::LabelGridOneShot,
        ];
        assert!(matches!(config.validate(), Err(SolverError::Config(_))));
    }

    #[test]
    fn test_explicit_path_wins() {
        assert_eq!(
            resolve_config_path(Some("/tmp/custom.json")),
            Some(PathBuf::from("/tmp/custom.json"))
        );
    }
}
