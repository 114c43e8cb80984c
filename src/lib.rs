//! Template transformation engine and generation driver for parameterized
//! calendar crew app skeletons.
//!
//! The engine is pure: it turns (path, raw content) pairs plus an
//! [`AppConfig`] into transformed content. The [`renderer`] module is the
//! filesystem collaborator that feeds it and materializes the result.

pub mod args;
pub mod conditional;
pub mod contents;
pub mod keys;
mod log;
pub mod manifest;
pub mod palette;
pub mod renderer;

pub use conditional::FeatureFlags;
pub use contents::{transform_str, Contents};
pub use keys::Substitutions;
pub use manifest::{AppConfig, AppConfigBuilder, BackendPlatform, Values};
pub use palette::{Palette, Rgb};
pub use renderer::{RenderSummary, Renderer};
