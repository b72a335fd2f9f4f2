//! W-LSB windows of one RTP/UDP/IPv4 compression context.
//!
//! A ROHC Profile 1 compressor keeps one window per LSB-encoded field. The
//! windows advance together: every sent packet records its SN, TS and IP-ID
//! under the same sequence number, and an acknowledgment for that sequence
//! number trims all three.

use crate::config::{FieldKind, WlsbConfig};
use crate::error::WlsbError;
use crate::types::{IpId, SequenceNumber, Timestamp};
use crate::window::WlsbWindow;

/// Number of LSBs each field needs for the next packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldBits {
    /// LSBs needed for the RTP sequence number.
    pub sn: u8,
    /// LSBs needed for the RTP timestamp.
    pub ts: u8,
    /// LSBs needed for the IPv4 identification.
    pub ip_id: u8,
}

/// SN, TS and IP-ID windows owned by a single compression context.
#[derive(Debug, Clone)]
pub struct FieldWindows {
    sn_window: WlsbWindow,
    ts_window: WlsbWindow,
    ip_id_window: WlsbWindow,
}

impl FieldWindows {
    /// Creates the three windows with RFC 3095 defaults and `window_width` slots each.
    ///
    /// # Errors
    /// - [`WlsbError::Config`] - `window_width` is zero
    /// - [`WlsbError::Allocation`] - Slot storage could not be reserved
    pub fn new(window_width: usize) -> Result<Self, WlsbError> {
        Self::from_configs(
            &WlsbConfig::for_field(FieldKind::RtpSequenceNumber).with_window_width(window_width),
            &WlsbConfig::for_field(FieldKind::RtpTimestamp).with_window_width(window_width),
            &WlsbConfig::for_field(FieldKind::IpId).with_window_width(window_width),
        )
    }

    /// Creates the three windows from explicit configs.
    ///
    /// # Errors
    /// Same as [`FieldWindows::new`].
    pub fn from_configs(
        sn_config: &WlsbConfig,
        ts_config: &WlsbConfig,
        ip_id_config: &WlsbConfig,
    ) -> Result<Self, WlsbError> {
        Ok(Self {
            sn_window: WlsbWindow::from_config(sn_config)?,
            ts_window: WlsbWindow::from_config(ts_config)?,
            ip_id_window: WlsbWindow::from_config(ip_id_config)?,
        })
    }

    /// Records the field values of a packet that was just sent.
    pub fn record_packet(
        &mut self,
        sequence_number: SequenceNumber,
        timestamp: Timestamp,
        ip_id: IpId,
    ) {
        self.sn_window
            .insert(sequence_number, sequence_number.as_u32());
        self.ts_window.insert(sequence_number, timestamp.as_u32());
        self.ip_id_window.insert(sequence_number, ip_id.as_u32());
    }

    /// Computes how many LSBs of each field the next packet must carry.
    ///
    /// Fields whose window is empty need their full width.
    pub fn required_bits(
        &self,
        sequence_number: SequenceNumber,
        timestamp: Timestamp,
        ip_id: IpId,
    ) -> FieldBits {
        FieldBits {
            sn: self.sn_window.required_bits(sequence_number.as_u32()),
            ts: self.ts_window.required_bits(timestamp.as_u32()),
            ip_id: self.ip_id_window.required_bits(ip_id.as_u32()),
        }
    }

    /// Applies a decompressor acknowledgment to every window.
    pub fn acknowledge(&mut self, sequence_number: SequenceNumber) {
        self.sn_window.acknowledge(sequence_number);
        self.ts_window.acknowledge(sequence_number);
        self.ip_id_window.acknowledge(sequence_number);
    }

    /// Empties all windows, e.g. when the context falls back to IR.
    pub fn clear(&mut self) {
        self.sn_window.clear();
        self.ts_window.clear();
        self.ip_id_window.clear();
    }

    /// RTP sequence number window.
    pub fn sn_window(&self) -> &WlsbWindow {
        &self.sn_window
    }

    /// RTP timestamp window.
    pub fn ts_window(&self) -> &WlsbWindow {
        &self.ts_window
    }

    /// IPv4 identification window.
    pub fn ip_id_window(&self) -> &WlsbWindow {
        &self.ip_id_window
    }
}
