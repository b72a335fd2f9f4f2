//! W-LSB error types.
//!
//! Every failure in this crate is returned to the immediate caller as a
//! [`WlsbError`]. The `thiserror` crate is used for the definitions.

use thiserror::Error;

/// Errors produced by W-LSB windows and LSB encoding helpers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WlsbError {
    /// Storage for the window slots could not be reserved.
    ///
    /// Fatal to the owning context: compression of the field must be abandoned.
    #[error("Cannot allocate W-LSB window with {capacity} slots")]
    Allocation { capacity: usize },

    /// Construction parameters were rejected before any window was created.
    #[error("Invalid W-LSB configuration for '{parameter}': {description}")]
    Config {
        parameter: &'static str,
        description: String,
    },

    /// The window holds no reference value, so no LSB width can be derived.
    ///
    /// Recoverable: the caller sends the field uncompressed for this packet.
    #[error("No reference value available in W-LSB window")]
    NoReferenceAvailable,

    /// LSB encoding or decoding was called with unusable arguments.
    #[error("Invalid LSB operation for field '{field_name}': {description}")]
    InvalidLsbOperation {
        field_name: &'static str,
        description: String,
    },
}
