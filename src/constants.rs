//! W-LSB constants drawn from RFC 3095.
//!
//! Field widths and fixed shift parameters for the header fields a ROHC
//! compression context tracks with W-LSB windows.

// --- Window Defaults ---

/// Default number of reference values a W-LSB window retains.
pub const DEFAULT_WLSB_WINDOW_WIDTH: usize = 4;
/// Widest field a W-LSB window can track, in bits.
pub const WLSB_MAX_FIELD_BITS: u8 = 32;

// --- Field Widths ---

/// Width of the RTP sequence number field.
pub const RTP_SN_FIELD_BITS: u8 = 16;
/// Width of the RTP timestamp field.
pub const RTP_TS_FIELD_BITS: u8 = 32;
/// Width of the IPv4 identification field.
pub const IPV4_ID_FIELD_BITS: u8 = 16;

// --- Fixed Shift Parameters (RFC 3095, Sec 4.5.1, 4.5.5) ---

/// `p` for non-RTP sequence numbers: interval is `[v_ref + 1, v_ref + 2^k]`.
pub const SN_SHIFT_PARAMETER: i32 = -1;
/// `p` for IP-ID offsets: interval is `[v_ref, v_ref + 2^k - 1]`.
pub const IP_ID_SHIFT_PARAMETER: i32 = 0;

// --- Computed Shift Thresholds (RFC 3095, Sec 4.5.3, 4.5.4, 5.7) ---

/// Up to this many bits an RTP SN interval uses `p = 1`.
pub const RTP_SN_SMALL_K_THRESHOLD: u8 = 4;
/// Up to this many bits an RTP TS interval uses `p = 0`.
pub const RTP_TS_SMALL_K_THRESHOLD: u8 = 2;
