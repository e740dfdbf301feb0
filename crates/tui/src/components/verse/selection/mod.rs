//! Caret, drag and clipboard handling for the verse pane.
//!
//! Terminal input is turned into a [`PaneSelection`], the verse pane's
//! implementation of the tracker's selection provider.

mod caret;
mod clipboard;
mod provider;

pub(crate) use caret::Caret;
pub(crate) use clipboard::{ClipboardRoute, copy_to_clipboard};
pub(crate) use provider::PaneSelection;

#[cfg(test)]
mod tests;
