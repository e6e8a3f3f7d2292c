//! IconForge Server library.
//!
//! Generates sets of four stylistically consistent icons from a theme
//! prompt via Replicate's flux-schnell model.
//!
//! ## Structure
//!
//! - `styles` - Fixed catalog of the five visual style presets
//! - `prompts` - Prompt composition for one generation request
//! - `use_cases/` - Multi-image orchestration
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod prompts;
pub mod styles;
pub mod use_cases;

pub use app::App;
