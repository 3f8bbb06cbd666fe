//! Infinite Craft engine library.
//!
//! ## Structure
//!
//! - `stores/` - Per-room vocabulary state and the room registry
//! - `use_cases/` - Crafting and listing orchestration
//! - `infrastructure/` - Ports plus their adapters (LLM, SQLite, clock, config)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use app::App;
