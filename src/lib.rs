//! Neongrid Engine - WASM front-end engine for the Neongrid launch page
//!
//! Architecture:
//! - core/     - Shared primitives (vectors, RNG, easing)
//! - domain/   - Configuration and the form field model
//! - systems/  - Particle field, matrix reveal, tween, form, modal
//! - page/     - Orchestration (`PageCore`) and the JS facade
//! - dom/      - Browser wiring: events, canvas, styles, fetch

pub mod core;
pub mod domain;
pub mod systems;
pub mod page;
pub mod dom;

// Convenience re-exports for embedders
pub use domain::config::PageConfig;
pub use domain::fields::{FieldId, FormFields};
pub use page::{Page, PageCore};
pub use systems::form::{FormError, FormPhase, SubmitOutcome};
pub use systems::modal::ModalPhase;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"🦀 Neongrid WASM Engine initialized!".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
