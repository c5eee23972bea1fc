//! Infrastructure layer for the options editor.
//!
//! Contains OS-facing adapters: the filesystem directory probe, TOML file
//! storage for the options, and the JSON command bridge used by the
//! presentation layer.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `vmping_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod filesystem;
pub mod storage;
pub mod ui_bridge;
