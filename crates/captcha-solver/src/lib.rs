//! captcha-solver: pluggable captcha resolvers on top of the captcha-grid core.

pub mod backends;
pub mod config;
pub mod resolvers;
pub mod solver;
pub mod types;

pub use backends::{AudioTranscriber, Backends, CellClassifier, GridLabeler, ObjectDetector};
pub use config::{resolve_config_path, ImageSize, ProviderConfig, SolverConfig};
pub use resolvers::{Resolver, ResolverKind, ResolverRegistry};
pub use solver::CaptchaSolver;
pub use types::{CaptchaAnswer, CaptchaResponse, SolverError, SolverResult};
