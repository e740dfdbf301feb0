//! Terminal front-end for the `ayat` annotation workbench.
//!
//! The UI shows one verse at a time, turns mouse drags and caret moves into
//! selections for the tracker in `ayat-core`, and lists, previews and edits
//! the annotations the service holds for that verse. A second tab filters
//! annotations across the corpus for bulk editing.

mod app;
mod components;
pub mod input;
pub mod logging;
mod runtime;
pub mod style;

pub use app::{App, SessionOptions, SessionOutcome};
pub use runtime::run;

pub use crate::input::QueryInput;
pub use crate::style::{StyleConfig, Theme, builtin_themes, default_theme};
