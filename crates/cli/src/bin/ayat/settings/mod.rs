//! Configuration loading and resolution.
//!
//! `load` layers default files, explicit `--config` files and `AYAT__*`
//! environment variables, applies CLI overrides on top and validates the
//! result into a [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;

pub(crate) use loader::load;
pub(crate) use resolved::ResolvedConfig;
