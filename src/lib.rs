//! `rohcstar-wlsb`: Window-based Least Significant Bits (W-LSB) encoding for ROHC.
//!
//! ROHC (RFC 3095) compresses slowly changing header fields such as RTP
//! sequence numbers, RTP timestamps and IP-IDs by sending only their low-order
//! bits. The compressor keeps a window of values the decompressor may be using
//! as a reference and sends enough bits that *any* of them decodes correctly.
//!
//! ## Core Concepts
//!
//! - **[`WlsbWindow`]**: Fixed-capacity ring of reference values for one field.
//!   Answers "how many bits does this value need?" and forgets references once
//!   the decompressor acknowledges them.
//! - **[`IntervalFunction`]**: The interpretation interval `f(v_ref, k, p)`.
//!   [`Rfc3095Interval`] is the standard one; windows accept any implementation.
//! - **[`encode_lsb`] / [`decode_lsb`]**: The per-value encoding the chosen
//!   width is used for.
//! - **[`FieldWindows`]**: The SN, TS and IP-ID windows of one compression context.
//!
//! ## Quick Start
//!
//! ```rust
//! use rohcstar_wlsb::{ShiftParameter, WlsbError, WlsbWindow, decode_lsb, encode_lsb};
//! use rohcstar_wlsb::types::SequenceNumber;
//!
//! fn main() -> Result<(), WlsbError> {
//!     // 16-bit RTP sequence numbers, four references.
//!     let mut window = WlsbWindow::new(16, 4, ShiftParameter::RtpSequenceNumber)?;
//!
//!     for sn in 100..104u16 {
//!         window.insert(SequenceNumber::new(sn), sn as u32);
//!     }
//!
//!     // Compressor: pick the width and send the LSBs.
//!     let k = window.find_min_bits(104)?;
//!     let lsbs = encode_lsb(104, k)?;
//!
//!     // Decompressor: any reference still in the window decodes the same value.
//!     for reference in 100..104u32 {
//!         assert_eq!(decode_lsb(lsbs, reference, k, ShiftParameter::RtpSequenceNumber)?, 104);
//!     }
//!
//!     // Feedback for SN 102 drops the references up to and including it.
//!     window.acknowledge(SequenceNumber::new(102));
//!     assert_eq!(window.len(), 1);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Window bookkeeping is reported through [`tracing`] at `trace` level. The
//! crate never installs a subscriber; errors are returned, not logged.

pub mod config;
pub mod constants;
pub mod context;
pub mod encodings;
pub mod error;
pub mod interval;
pub mod types;
pub mod window;

#[cfg(test)]
mod tidy;

pub use config::{FieldKind, WlsbConfig};
pub use context::{FieldBits, FieldWindows};
pub use encodings::{decode_lsb, decode_lsb_with, encode_lsb};
pub use error::WlsbError;
pub use interval::{IntervalFunction, LsbInterval, Rfc3095Interval, ShiftParameter};
pub use window::{WindowEntry, WlsbWindow};
