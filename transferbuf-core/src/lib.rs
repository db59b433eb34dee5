//! Core transfer engine for Transferbuf
//!
//! Stages time-stamped sensor readings between an acquisition task and a
//! network transmitter. The transfer buffer pulls new readings out of a
//! shared source, drops non-advancing and closely spaced duplicate samples,
//! and keeps a short tail of already transmitted readings so those checks
//! stay correct from one transmission cycle to the next.
//!
//! Key constraints:
//! - One consumer per channel, no internal threads
//! - Source lock held only for the duration of a scan
//! - Bounded memory: storage compacts back to its target after a discard
//!
//! ```no_run
//! use transferbuf_core::{Reading, SourceBuffer, TransferBuffer};
//!
//! let source = SourceBuffer::new();
//! let mut transfer = TransferBuffer::new();
//!
//! // acquisition side
//! source.push(Reading::at_millis(21.5, 1_700_000_000_000));
//!
//! // transmitter side
//! if transfer.append(&source, "room/temp", 0) > 0 {
//!     let sent = transfer.len(); // send(transfer.iter())
//!     transfer.discard(sent, 1);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[macro_use]
mod macros;

pub mod config;
pub mod constants;
pub mod errors;
pub mod reading;
#[cfg(feature = "std")]
pub mod source;
pub mod time;
pub mod traits;
pub mod transfer;

// Public API
pub use config::TransferConfig;
pub use errors::{ConfigError, ConfigResult};
pub use reading::Reading;
#[cfg(feature = "std")]
pub use source::{SourceBuffer, SourceGuard};
pub use time::{ReadingTime, Timestamp};
pub use traits::{ReadingSource, TimeSource};
pub use transfer::{TransferBuffer, TransferStats};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
