//! The W-LSB interpretation interval `f(v_ref, k, p)` (RFC 3095, Section 4.5.1).
//!
//! For a reference value `v_ref`, a number of LSBs `k` and a shift parameter `p`,
//! the interpretation interval is
//!
//! ```text
//! f(v_ref, k, p) = [v_ref - p, v_ref + (2^k - 1) - p]
//! ```
//!
//! All arithmetic wraps modulo `2^32`; an interval whose lower bound is
//! numerically greater than its upper bound straddles the wrap-around point.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::constants::{RTP_SN_SMALL_K_THRESHOLD, RTP_TS_SMALL_K_THRESHOLD, WLSB_MAX_FIELD_BITS};

/// Shift parameter `p` applied when computing an interpretation interval.
///
/// Most fields use a constant `p`. RTP sequence numbers and timestamps derive
/// `p` from the number of bits `k` being sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftParameter {
    /// Constant shift, independent of `k`.
    Fixed(i32),
    /// RTP SN: `p = 1` for `k <= 4`, otherwise `p = 2^(k-5) - 1` (RFC 3095, Sec 5.7).
    RtpSequenceNumber,
    /// RTP TS: `p = 0` for `k <= 2`, otherwise `p = 2^(k-2) - 1` (RFC 3095, Sec 4.5.4).
    RtpTimestamp,
}

impl ShiftParameter {
    /// Resolves the concrete `p` for `num_lsb_bits`.
    pub fn resolve(self, num_lsb_bits: u8) -> i64 {
        match self {
            ShiftParameter::Fixed(p) => p as i64,
            ShiftParameter::RtpSequenceNumber => {
                if num_lsb_bits <= RTP_SN_SMALL_K_THRESHOLD {
                    1
                } else {
                    (1i64 << (num_lsb_bits - 5)) - 1
                }
            }
            ShiftParameter::RtpTimestamp => {
                if num_lsb_bits <= RTP_TS_SMALL_K_THRESHOLD {
                    0
                } else {
                    (1i64 << (num_lsb_bits - 2)) - 1
                }
            }
        }
    }
}

impl Default for ShiftParameter {
    fn default() -> Self {
        ShiftParameter::Fixed(0)
    }
}

impl From<i32> for ShiftParameter {
    fn from(p: i32) -> Self {
        ShiftParameter::Fixed(p)
    }
}

/// Inclusive interpretation interval `[min, max]`, possibly wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LsbInterval {
    /// Lower bound, `v_ref - p`.
    pub min: u32,
    /// Upper bound, `v_ref + 2^k - 1 - p`.
    pub max: u32,
}

impl LsbInterval {
    /// Returns `true` if `value` lies in the interval, modulo `2^32`.
    #[inline]
    pub fn contains(&self, value: u32) -> bool {
        value.wrapping_sub(self.min) <= self.max.wrapping_sub(self.min)
    }

    /// Returns `true` if `value` lies in the interval taken as a range of
    /// integers around `reference`, without reducing modulo `2^32`.
    ///
    /// The offset of `min` below `reference` is read as a signed 32-bit shift.
    /// An interval that only contains `value` by wrapping past `u32::MAX`
    /// does not count.
    #[inline]
    pub fn contains_unwrapped(&self, reference: u32, value: u32) -> bool {
        let shift = reference.wrapping_sub(self.min) as i32 as i64;
        let min = reference as i64 - shift;
        let max = min + self.max.wrapping_sub(self.min) as i64;
        (min..=max).contains(&(value as i64))
    }
}

/// Source of interpretation intervals for W-LSB windows and decoding.
///
/// Implementations must be pure. Callers search `k` upward and stop at the
/// first interval that contains the value.
pub trait IntervalFunction: Debug {
    /// Computes `f(reference, num_lsb_bits, shift)`.
    fn interval(&self, reference: u32, num_lsb_bits: u8, shift: ShiftParameter) -> LsbInterval;
}

/// The interval function defined by RFC 3095, Section 4.5.1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rfc3095Interval;

impl IntervalFunction for Rfc3095Interval {
    fn interval(&self, reference: u32, num_lsb_bits: u8, shift: ShiftParameter) -> LsbInterval {
        let width = field_mask(num_lsb_bits);
        // Two's complement truncation keeps negative `p` correct under wrapping.
        let p = shift.resolve(num_lsb_bits) as u32;
        let min = reference.wrapping_sub(p);
        LsbInterval {
            min,
            max: min.wrapping_add(width),
        }
    }
}

/// Mask with the low `bits` bits set. Saturates at 32 bits.
#[inline]
pub(crate) fn field_mask(bits: u8) -> u32 {
    if bits >= WLSB_MAX_FIELD_BITS {
        u32::MAX
    } else {
        (1u32 << bits) - 1
    }
}
