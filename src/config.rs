//! W-LSB window configuration.
//!
//! A [`WlsbConfig`] captures everything needed to build a window for one
//! header field. Presets for the fields of an RTP/UDP/IPv4 flow are available
//! through [`WlsbConfig::for_field`]. Configs derive `serde` traits so they can
//! be embedded in a larger context configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_WLSB_WINDOW_WIDTH, IP_ID_SHIFT_PARAMETER, IPV4_ID_FIELD_BITS, RTP_SN_FIELD_BITS,
    RTP_TS_FIELD_BITS, SN_SHIFT_PARAMETER,
};
use crate::error::WlsbError;
use crate::interval::ShiftParameter;
use crate::window::validate_window_parameters;

/// Header fields with RFC 3095 W-LSB defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// 16-bit RTP sequence number, k-dependent shift.
    RtpSequenceNumber,
    /// 32-bit RTP timestamp, k-dependent shift.
    RtpTimestamp,
    /// 16-bit IPv4 identification offset, `p = 0`.
    IpId,
    /// 16-bit non-RTP sequence number, `p = -1`.
    SequenceNumber,
}

/// Parameters of a single W-LSB window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WlsbConfig {
    /// Width of the field in bits; also the uncompressed fallback width.
    pub max_bits: u8,
    /// Number of reference values retained.
    pub window_width: usize,
    /// Shift parameter `p`.
    pub shift: ShiftParameter,
}

impl WlsbConfig {
    /// RFC 3095 defaults for `kind` with the default window width.
    pub fn for_field(kind: FieldKind) -> Self {
        let (max_bits, shift) = match kind {
            FieldKind::RtpSequenceNumber => (RTP_SN_FIELD_BITS, ShiftParameter::RtpSequenceNumber),
            FieldKind::RtpTimestamp => (RTP_TS_FIELD_BITS, ShiftParameter::RtpTimestamp),
            FieldKind::IpId => (
                IPV4_ID_FIELD_BITS,
                ShiftParameter::Fixed(IP_ID_SHIFT_PARAMETER),
            ),
            FieldKind::SequenceNumber => {
                (RTP_SN_FIELD_BITS, ShiftParameter::Fixed(SN_SHIFT_PARAMETER))
            }
        };

        Self {
            max_bits,
            window_width: DEFAULT_WLSB_WINDOW_WIDTH,
            shift,
        }
    }

    /// Returns a copy with a different window width.
    pub fn with_window_width(mut self, window_width: usize) -> Self {
        self.window_width = window_width;
        self
    }

    /// Checks that a window can be built from this config.
    ///
    /// # Errors
    /// - [`WlsbError::Config`] - `max_bits` outside 1..=32 or zero `window_width`
    pub fn validate(&self) -> Result<(), WlsbError> {
        validate_window_parameters(self.max_bits, self.window_width)
    }
}

impl Default for WlsbConfig {
    fn default() -> Self {
        Self::for_field(FieldKind::RtpSequenceNumber)
    }
}
