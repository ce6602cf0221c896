//! Shared types, collaborator traits, and core utilities for the Forge settings stack.
//!
//! This crate holds the foundational types shared between the settings core,
//! the admin resolver and all adapter implementations. Adapter crates depend
//! only on this crate, so they compile in parallel with the feature crates.

#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod prelude;
pub mod settings_adapter;
pub mod types;

// vim: ts=4
