//! LSB encoding and decoding against a W-LSB interpretation interval.
//!
//! The compressor sends the `k` least significant bits chosen by
//! [`WlsbWindow::find_min_bits`](crate::window::WlsbWindow::find_min_bits).
//! The decompressor rebuilds the value as the unique member of
//! `f(v_ref, k, p)` with those low bits (RFC 3095, Section 4.5.1).

use crate::constants::WLSB_MAX_FIELD_BITS;
use crate::error::WlsbError;
use crate::interval::{IntervalFunction, Rfc3095Interval, ShiftParameter, field_mask};

/// Encodes a value by extracting its `num_lsb_bits` least significant bits.
///
/// `num_lsb_bits == 0` is valid and encodes to 0: the decompressor recovers
/// the value from the reference alone.
///
/// # Errors
/// - [`WlsbError::InvalidLsbOperation`] - `num_lsb_bits` exceeds 32
pub fn encode_lsb(value: u32, num_lsb_bits: u8) -> Result<u32, WlsbError> {
    check_num_lsb_bits(num_lsb_bits)?;
    Ok(value & field_mask(num_lsb_bits))
}

/// Reconstructs a value from its LSBs using the RFC 3095 interval function.
///
/// # Parameters
/// - `received_lsbs`: The LSB-encoded part of the value.
/// - `reference_value`: The decompressor's reference (`v_ref`).
/// - `num_lsb_bits`: The number of LSBs (`k`) that were sent.
/// - `shift`: The shift parameter (`p`) of the field.
///
/// # Errors
/// See [`decode_lsb_with`].
pub fn decode_lsb(
    received_lsbs: u32,
    reference_value: u32,
    num_lsb_bits: u8,
    shift: ShiftParameter,
) -> Result<u32, WlsbError> {
    decode_lsb_with(
        &Rfc3095Interval,
        received_lsbs,
        reference_value,
        num_lsb_bits,
        shift,
    )
}

/// Reconstructs a value from its LSBs using `interval_function`.
///
/// The interval `f(v_ref, k, p)` holds exactly `2^k` consecutive values, so
/// exactly one of them carries `received_lsbs` in its low `k` bits.
///
/// # Errors
/// - [`WlsbError::InvalidLsbOperation`] - `num_lsb_bits` exceeds 32, `received_lsbs`
///   does not fit in `num_lsb_bits`, or the candidate falls outside the interval
pub fn decode_lsb_with<F: IntervalFunction + ?Sized>(
    interval_function: &F,
    received_lsbs: u32,
    reference_value: u32,
    num_lsb_bits: u8,
    shift: ShiftParameter,
) -> Result<u32, WlsbError> {
    check_num_lsb_bits(num_lsb_bits)?;

    let lsb_mask = field_mask(num_lsb_bits);
    if received_lsbs & !lsb_mask != 0 {
        return Err(WlsbError::InvalidLsbOperation {
            field_name: "received_lsbs",
            description: format!(
                "Received LSB value {:#x} is too large for {} LSBs (max value {:#x}).",
                received_lsbs, num_lsb_bits, lsb_mask
            ),
        });
    }

    let interval = interval_function.interval(reference_value, num_lsb_bits, shift);
    let candidate = interval
        .min
        .wrapping_add(received_lsbs.wrapping_sub(interval.min) & lsb_mask);

    if interval.contains(candidate) {
        Ok(candidate)
    } else {
        Err(WlsbError::InvalidLsbOperation {
            field_name: "received_lsbs",
            description: format!(
                "Cannot be resolved in interpretation interval [{:#x}, {:#x}]. LSBs: {:#x}, ref: {:#x}, k: {}, shift: {:?}.",
                interval.min, interval.max, received_lsbs, reference_value, num_lsb_bits, shift
            ),
        })
    }
}

fn check_num_lsb_bits(num_lsb_bits: u8) -> Result<(), WlsbError> {
    if num_lsb_bits > WLSB_MAX_FIELD_BITS {
        return Err(WlsbError::InvalidLsbOperation {
            field_name: "num_lsb_bits",
            description: format!(
                "Number of LSBs (k) cannot exceed {}, got {}.",
                WLSB_MAX_FIELD_BITS, num_lsb_bits
            ),
        });
    }
    Ok(())
}
