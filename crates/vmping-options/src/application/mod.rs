//! Application layer use cases for the options editor.
//!
//! Use cases in this layer orchestrate the pure validators from
//! `vmping_core` and depend on abstractions ([`store::OptionsStore`],
//! [`vmping_core::DirectoryProbe`]) rather than concrete storage or
//! filesystem code.
//!
//! # Sub-modules
//!
//! - **`store`**        – The options store abstraction and an in-memory
//!   implementation.
//!
//! - **`commit`**       – Runs the three section validators in order and
//!   decides what is written to the store, and when.
//!
//! - **`edit_session`** – The single-editor slot and the session token that
//!   owns the display form between load and commit.

pub mod commit;
pub mod edit_session;
pub mod store;
