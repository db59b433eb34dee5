//! Core Traits and Abstractions for Transferbuf
//!
//! The traits in this module are the seams between the transfer buffer and
//! its collaborators.
//!
//! ## Module Organization
//!
//! - [`source`] - Lockable reading sources drained by a transfer buffer
//! - [`time`] - Time source abstraction for stamping readings

pub mod source;
pub mod time;

pub use source::ReadingSource;
pub use time::TimeSource;
