//! Header field newtypes tracked by W-LSB windows.
//!
//! Wrapping the raw integers keeps a sequence number from being passed where a
//! timestamp is expected. All types are `#[repr(transparent)]`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generates a transparent field newtype with conversions to the `u32`
/// domain that W-LSB windows operate in.
macro_rules! field_newtype {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty) => $prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[derive(Serialize, Deserialize)]
        #[repr(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            /// Creates a new instance
            #[inline]
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Raw value
            #[inline]
            pub const fn value(self) -> $inner {
                self.0
            }

            /// Widened value as stored in a W-LSB window.
            #[inline]
            pub const fn as_u32(self) -> u32 {
                self.0 as u32
            }

            /// Wrapping addition
            #[inline]
            pub const fn wrapping_add(self, rhs: $inner) -> Self {
                Self(self.0.wrapping_add(rhs))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline]
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            #[inline]
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<$inner> for $name {
            #[inline]
            fn eq(&self, other: &$inner) -> bool {
                self.0 == *other
            }
        }
    };
}

field_newtype!(
    /// Packet sequence number (16 bits on the wire) that keys window entries.
    SequenceNumber(u16) => "SN"
);

field_newtype!(
    /// RTP timestamp.
    Timestamp(u32) => "TS"
);

field_newtype!(
    /// IPv4 identification field.
    IpId(u16) => "IP_ID"
);
