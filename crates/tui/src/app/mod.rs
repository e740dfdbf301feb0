//! Core application state and behavior for the annotation workbench.
//!
//! The [`App`] type owns the verse display, the annotation list and the link
//! to the service worker. Supporting modules partition the implementation:
//! input handling for the verse tab, overlays (annotation form, template
//! picker, verse search), the bulk-edit grid, service replies and rendering.

mod actions;
mod form;
mod grid;
mod render;
mod search;
mod service;
mod state;
mod templates;


pub(crate) use service::ServiceLink;
pub use state::{App, SessionOptions, SessionOutcome};
