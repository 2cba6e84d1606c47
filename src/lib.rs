//! Interactive client registration backed by SQLite.
//!
//! Layers, innermost first: [`domain`], [`infrastructure`], [`application`], [`cli`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
