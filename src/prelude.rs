//! Prelude module for headless_date_picker crate.
//!
//! Re-exports the derive_more derives used across modules.

pub use derive_more::{Deref, Display};
