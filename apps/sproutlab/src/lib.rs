//! # sproutlab (library surface)
//!
//! The application crate exposes its modules as a library so integration
//! tests can build the router and CLI plumbing in-process.

pub mod api;
pub mod cli;
pub mod config;
