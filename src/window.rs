//! Compressor-side W-LSB window (RFC 3095, Section 4.5.2).
//!
//! A [`WlsbWindow`] keeps the most recent reference values sent for one header
//! field. For every new value the compressor asks the window how many LSBs are
//! needed so that the decompressor can rebuild the value from *any* reference
//! still in the window. Acknowledgments from the decompressor shrink the window.
//!
//! ## Layout
//!
//! ```text
//!   slots:  [ 8 | 5 | 6 | 7 ]      capacity = 4
//!             ^   ^
//!             |   oldest_index = 1
//!             next_index = 1 after the ring filled and 8 overwrote 4
//! ```
//!
//! Used slots always form a single run in ring order starting at
//! `oldest_index`. Insertion extends the run at `next_index`; acknowledgment
//! cuts a prefix off the run.

use tracing::{debug, trace};

use crate::config::WlsbConfig;
use crate::constants::WLSB_MAX_FIELD_BITS;
use crate::error::WlsbError;
use crate::interval::{IntervalFunction, Rfc3095Interval, ShiftParameter};
use crate::types::SequenceNumber;

/// One slot of a W-LSB window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowEntry {
    /// Sequence number of the packet that carried `value`, widened from 16 bits.
    pub sequence_number: u32,
    /// Uncompressed field value used as a reference.
    pub value: u32,
    /// `false` for an empty slot.
    pub used: bool,
}

/// Fixed-capacity sliding window of reference values for one header field.
#[derive(Debug, Clone)]
pub struct WlsbWindow<F: IntervalFunction = Rfc3095Interval> {
    slots: Vec<WindowEntry>,
    oldest_index: usize,
    next_index: usize,
    max_bits: u8,
    shift_parameter: ShiftParameter,
    interval_function: F,
}

impl WlsbWindow<Rfc3095Interval> {
    /// Creates an empty window using the RFC 3095 interval function.
    ///
    /// # Parameters
    /// - `max_bits`: Width of the tracked field (1..=32); the uncompressed fallback width.
    /// - `capacity`: Number of reference values retained (at least 1).
    /// - `shift_parameter`: The `p` used when computing interpretation intervals.
    ///
    /// # Errors
    /// - [`WlsbError::Config`] - `max_bits` or `capacity` out of range
    /// - [`WlsbError::Allocation`] - Slot storage could not be reserved
    pub fn new(
        max_bits: u8,
        capacity: usize,
        shift_parameter: impl Into<ShiftParameter>,
    ) -> Result<Self, WlsbError> {
        Self::with_interval_function(max_bits, capacity, shift_parameter, Rfc3095Interval)
    }

    /// Creates an empty window from a [`WlsbConfig`].
    ///
    /// # Errors
    /// Same as [`WlsbWindow::new`].
    pub fn from_config(config: &WlsbConfig) -> Result<Self, WlsbError> {
        Self::new(config.max_bits, config.window_width, config.shift)
    }
}

impl<F: IntervalFunction> WlsbWindow<F> {
    /// Creates an empty window that delegates interval computation to
    /// `interval_function`.
    ///
    /// # Errors
    /// - [`WlsbError::Config`] - `max_bits` or `capacity` out of range
    /// - [`WlsbError::Allocation`] - Slot storage could not be reserved
    pub fn with_interval_function(
        max_bits: u8,
        capacity: usize,
        shift_parameter: impl Into<ShiftParameter>,
        interval_function: F,
    ) -> Result<Self, WlsbError> {
        validate_window_parameters(max_bits, capacity)?;

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| WlsbError::Allocation { capacity })?;
        slots.resize(capacity, WindowEntry::default());

        let shift_parameter = shift_parameter.into();
        debug!(max_bits, capacity, ?shift_parameter, "created W-LSB window");

        Ok(Self {
            slots,
            oldest_index: 0,
            next_index: 0,
            max_bits,
            shift_parameter,
            interval_function,
        })
    }

    /// Number of slots in the window.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Width of the tracked field in bits.
    #[inline]
    pub fn max_bits(&self) -> u8 {
        self.max_bits
    }

    /// Shift parameter used for interval computation.
    #[inline]
    pub fn shift_parameter(&self) -> ShiftParameter {
        self.shift_parameter
    }

    /// Slot index of the oldest reference (or the next free slot if empty).
    #[inline]
    pub fn oldest_index(&self) -> usize {
        self.oldest_index
    }

    /// Slot index the next insertion writes to.
    #[inline]
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Raw slot storage, in slot order rather than window order.
    pub fn entries(&self) -> &[WindowEntry] {
        &self.slots
    }

    /// Number of references currently held.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|entry| entry.used).count()
    }

    /// Returns `true` if no reference is held.
    pub fn is_empty(&self) -> bool {
        !self.slots.iter().any(|entry| entry.used)
    }

    /// Iterates the held references oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &WindowEntry> + '_ {
        self.ring_positions()
            .map(|position| &self.slots[position])
            .take_while(|entry| entry.used)
    }

    /// Records `value` as sent with `sequence_number`.
    ///
    /// When the window is full the oldest reference is dropped without notice.
    /// A compressor that relies on acknowledgments must therefore acknowledge
    /// before the window wraps past unacknowledged values.
    pub fn insert(&mut self, sequence_number: SequenceNumber, value: u32) {
        let capacity = self.capacity();

        if self.slots[self.next_index].used {
            trace!(
                evicted_sn = self.slots[self.oldest_index].sequence_number,
                "W-LSB window full, evicting oldest reference"
            );
            self.oldest_index = (self.oldest_index + 1) % capacity;
        }

        self.slots[self.next_index] = WindowEntry {
            sequence_number: sequence_number.as_u32(),
            value,
            used: true,
        };
        self.next_index = (self.next_index + 1) % capacity;
    }

    /// Finds the minimal number of LSBs of `value` that every held reference
    /// can decode unambiguously.
    ///
    /// Only the smallest and largest reference values are probed: the result
    /// is the larger of the two per-reference minima, or `max_bits` when no
    /// `k < max_bits` fits. A shift that moves with `k` (RTP SN at `k = 5`)
    /// can leave one extreme uncovered at that width; the width is then raised
    /// until both extremes cover `value`.
    ///
    /// Containment is tested on the unwrapped interval
    /// `[v_ref - p, v_ref - p + 2^k - 1]`, so the references covering `value`
    /// form one contiguous numeric range. A window that straddles the field's
    /// wrap-around (SN 65535 followed by 0, or a timestamp passing `u32::MAX`)
    /// therefore needs `max_bits` until the pre-wrap references leave it.
    ///
    /// # Errors
    /// - [`WlsbError::NoReferenceAvailable`] - The window is empty
    pub fn find_min_bits(&self, value: u32) -> Result<u8, WlsbError> {
        let (min_ref, max_ref) = self
            .reference_bounds()
            .ok_or(WlsbError::NoReferenceAvailable)?;

        Ok(self.min_bits_between(min_ref, max_ref, value))
    }

    /// Like [`WlsbWindow::find_min_bits`], but an empty window yields
    /// `max_bits` so the caller sends the field uncompressed.
    pub fn required_bits(&self, value: u32) -> u8 {
        self.reference_bounds()
            .map_or(self.max_bits, |(min_ref, max_ref)| {
                self.min_bits_between(min_ref, max_ref, value)
            })
    }

    /// Drops every reference up to and including the one sent with
    /// `sequence_number`.
    ///
    /// Unknown sequence numbers (already evicted, never sent, or acknowledged
    /// before) are ignored.
    pub fn acknowledge(&mut self, sequence_number: SequenceNumber) {
        match self.position_of(sequence_number) {
            Some(index) => self.remove_through(index),
            None => trace!(%sequence_number, "acknowledged SN not in W-LSB window"),
        }
    }

    /// Sum of all held values.
    pub fn sum(&self) -> u64 {
        self.slots
            .iter()
            .filter(|entry| entry.used)
            .map(|entry| entry.value as u64)
            .sum()
    }

    /// Truncated mean of all held values; 0 for an empty window.
    pub fn mean(&self) -> u32 {
        let (sum, count) = self
            .slots
            .iter()
            .filter(|entry| entry.used)
            .fold((0u64, 0u64), |(sum, count), entry| {
                (sum + entry.value as u64, count + 1)
            });

        if count == 0 {
            0
        } else {
            (sum / count) as u32
        }
    }

    /// Empties the window and resets both cursors.
    pub fn clear(&mut self) {
        self.slots.fill(WindowEntry::default());
        self.oldest_index = 0;
        self.next_index = 0;
    }

    /// Checks the ring invariants, panicking on violation.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn debug_validate_invariants(&self) {
        let capacity = self.capacity();
        assert!(capacity >= 1);
        assert!(self.oldest_index < capacity);
        assert!(self.next_index < capacity);

        let used = self.len();
        let run = self.iter().count();
        assert_eq!(run, used, "used W-LSB entries are not one contiguous run");

        if used == capacity {
            assert_eq!(self.next_index, self.oldest_index);
        } else {
            assert_eq!(self.next_index, (self.oldest_index + used) % capacity);
        }
    }

    /// Slot positions in window order, starting at the oldest.
    fn ring_positions(&self) -> impl Iterator<Item = usize> + use<F> {
        let capacity = self.capacity();
        let oldest = self.oldest_index;
        (0..capacity).map(move |offset| (oldest + offset) % capacity)
    }

    fn position_of(&self, sequence_number: SequenceNumber) -> Option<usize> {
        let target = sequence_number.as_u32();
        self.ring_positions().find(|&position| {
            let entry = &self.slots[position];
            entry.used && entry.sequence_number == target
        })
    }

    /// Marks `oldest_index..=index` (ring order) unused and re-derives both cursors.
    fn remove_through(&mut self, index: usize) {
        let capacity = self.capacity();
        let removed = (index + capacity - self.oldest_index) % capacity + 1;

        for offset in 0..removed {
            self.slots[(self.oldest_index + offset) % capacity].used = false;
        }

        self.oldest_index = (index + 1) % capacity;

        self.next_index = self.oldest_index;
        for _ in 0..capacity {
            if !self.slots[self.next_index].used {
                break;
            }
            self.next_index = (self.next_index + 1) % capacity;
        }

        trace!(
            index,
            removed,
            oldest_index = self.oldest_index,
            next_index = self.next_index,
            "W-LSB window compacted after acknowledgment"
        );
    }

    fn reference_bounds(&self) -> Option<(u32, u32)> {
        self.slots
            .iter()
            .filter(|entry| entry.used)
            .fold(None, |bounds, entry| match bounds {
                None => Some((entry.value, entry.value)),
                Some((min, max)) => Some((min.min(entry.value), max.max(entry.value))),
            })
    }

    fn min_bits_between(&self, min_ref: u32, max_ref: u32, value: u32) -> u8 {
        let bits_for_min = self.min_bits_for_reference(min_ref, value);
        let bits_for_max = self.min_bits_for_reference(max_ref, value);

        (bits_for_min.max(bits_for_max)..self.max_bits)
            .find(|&num_lsb_bits| {
                self.covers(min_ref, num_lsb_bits, value)
                    && self.covers(max_ref, num_lsb_bits, value)
            })
            .unwrap_or(self.max_bits)
    }

    fn min_bits_for_reference(&self, reference: u32, value: u32) -> u8 {
        (0..self.max_bits)
            .find(|&num_lsb_bits| self.covers(reference, num_lsb_bits, value))
            .unwrap_or(self.max_bits)
    }

    fn covers(&self, reference: u32, num_lsb_bits: u8, value: u32) -> bool {
        self.interval_function
            .interval(reference, num_lsb_bits, self.shift_parameter)
            .contains_unwrapped(reference, value)
    }
}

/// Rejects window parameters that cannot describe a usable window.
pub(crate) fn validate_window_parameters(max_bits: u8, capacity: usize) -> Result<(), WlsbError> {
    if max_bits == 0 || max_bits > WLSB_MAX_FIELD_BITS {
        return Err(WlsbError::Config {
            parameter: "max_bits",
            description: format!(
                "must be between 1 and {}, got {}",
                WLSB_MAX_FIELD_BITS, max_bits
            ),
        });
    }
    if capacity == 0 {
        return Err(WlsbError::Config {
            parameter: "capacity",
            description: "window must hold at least one reference".to_string(),
        });
    }
    Ok(())
}
