//! Domain entities for the vmPing options editor.
//!
//! This module contains pure data and rules with no infrastructure
//! dependencies: it can be compiled and tested on any platform without any
//! external setup.

/// The canonical options record and its defaults.
pub mod options;

/// Ping-interval display units.
pub mod interval;

/// Field-located validation errors and normalization notes.
pub mod error;
