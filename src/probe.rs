//! Probe sequences.
//!
//! Every table operation resolves a key by walking its probe sequence: the
//! home slot from the primary hash, then successive candidates found by
//! stepping *backward* through the slot array, wrapping at zero. The
//! probing mode decides how the step size evolves.

use crate::hash::{Hasher, Key};

/// Collision-resolution strategy for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMode {
    /// Step backward one slot at a time.
    Linear,
    /// Step backward by a per-key decrement from the secondary hash, so
    /// keys sharing a home slot still follow different sequences.
    Double,
    /// Step backward by a decrement that grows by one each probe, giving
    /// cumulative offsets of 1, 3, 6, ... from the home slot.
    Quadratic,
}

/// A probe sequence for one key.
///
/// The sequence is a pure function of the key, the capacity, and the mode:
/// no state survives between operations, so restarting the sequence for
/// the same key revisits exactly the same slots.
///
/// Quadratic sequences are not guaranteed to visit every slot for an
/// arbitrary capacity. The table bounds each scan at `capacity` candidates,
/// so such sequences terminate; callers who need full coverage must pair
/// the mode with a suitable capacity.
pub struct Probe {
    /// The current candidate slot.
    pub i: usize,
    capacity: usize,
    dec: usize,
    mode: ProbeMode,
}

impl Probe {
    /// Starts the probe sequence for `key` at its home slot.
    pub fn start<H: Hasher>(hasher: &H, key: Key, capacity: usize, mode: ProbeMode) -> Probe {
        let dec = match mode {
            ProbeMode::Linear => 1,
            ProbeMode::Double => hasher.decrement(key, capacity),
            // grows to 1 on the first step
            ProbeMode::Quadratic => 0,
        };

        Probe {
            i: hasher.slot(key, capacity),
            capacity,
            dec,
            mode,
        }
    }

    /// Advances to the next candidate slot.
    #[inline]
    pub fn next(&mut self) {
        if let ProbeMode::Quadratic = self.mode {
            self.dec += 1;
        }

        // step backward, wrapped to stay in 0..capacity
        self.i = (self.i + self.capacity - self.dec % self.capacity) % self.capacity;
    }
}
