//! The table ADT.

use std::cell::Cell;
use std::fmt;
use std::mem;

use crate::hash::{Algorithm, Hasher, Key};
use crate::probe::{Probe, ProbeMode};

/// Error returned when a table cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The requested capacity was zero.
    #[error("table capacity must be positive")]
    InvalidCapacity,
}

/// The outcome of [`Table::insert`].
#[derive(Debug, PartialEq, Eq)]
pub enum Insert<V> {
    /// The key was not present and the table took ownership of the value.
    Inserted,
    /// The key was present; its previous value is handed back.
    Replaced(V),
    /// The table had no room for a new key; the value is handed back and
    /// the table is untouched.
    Rejected(V),
}

// One cell of the slot array.
//
// `Empty` means never occupied since the array was built, and is the stop
// condition for unsuccessful scans. Deletion never restores `Empty`; it
// leaves a `Tombstone`, which scans skip over and inserts may reuse.
enum Slot<V> {
    Empty,
    Tombstone,
    Occupied { key: Key, value: V },
}

/// An open-addressing hash table with a fixed capacity.
///
/// The table owns every stored value. One slot is always reserved free, so
/// at most `capacity - 1` entries fit; inserting past that limit returns
/// [`Insert::Rejected`] and the caller decides whether to [`rehash`] into
/// a larger table.
///
/// [`rehash`]: Table::rehash
pub struct Table<V, H = Algorithm> {
    slots: Box<[Slot<V>]>,
    len: usize,
    mode: ProbeMode,
    hasher: H,
    // slots examined by the most recent insert/get/remove
    probes: Cell<usize>,
}

impl<V> Table<V> {
    /// Creates an empty table with the default hash algorithm.
    ///
    /// Fails with [`Error::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize, mode: ProbeMode) -> Result<Table<V>, Error> {
        Table::with_hasher(capacity, mode, Algorithm::default())
    }
}

impl<V, H: Hasher> Table<V, H> {
    /// Creates an empty table that places keys with `hasher`.
    ///
    /// Fails with [`Error::InvalidCapacity`] if `capacity` is zero.
    pub fn with_hasher(capacity: usize, mode: ProbeMode, hasher: H) -> Result<Table<V, H>, Error> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }

        let mut slots = Vec::new();
        slots.resize_with(capacity, || Slot::Empty);

        Ok(Table {
            slots: slots.into_boxed_slice(),
            len: 0,
            mode,
            hasher,
            probes: Cell::new(0),
        })
    }

    /// The number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The probing mode the table was built with.
    pub fn mode(&self) -> ProbeMode {
        self.mode
    }

    /// Live entries divided by capacity.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Whether the table has reached its usable limit of `capacity - 1`
    /// entries. The last slot stays free so that an unsuccessful probe
    /// sequence always hits a stop condition.
    ///
    /// # Panics
    ///
    /// Panics if the reservation has been violated, which would mean the
    /// table's internal state is corrupt.
    pub fn is_full(&self) -> bool {
        match self.capacity() - self.len {
            0 => panic!(
                "{} occupied entries have overrun the reserved slot in a table of capacity {}",
                self.len,
                self.capacity(),
            ),
            1 => true,
            _ => false,
        }
    }

    /// Inserts `value` under `key`, walking the key's probe sequence.
    ///
    /// If the key is already present its value is swapped out and returned
    /// as [`Insert::Replaced`], even when the table is full. A new key
    /// reuses the first tombstone seen on its sequence, or lands on the
    /// terminating empty slot. A table already holding `capacity - 1`
    /// entries rejects new keys without mutating anything.
    pub fn insert(&mut self, key: Key, value: V) -> Insert<V> {
        let capacity = self.capacity();
        let mut probe = Probe::start(&self.hasher, key, capacity, self.mode);
        let home = probe.i;

        let mut tombstone = None;
        let mut open = None;
        let mut probes = 0;

        for step in 0..capacity {
            if step > 0 && probe.i == home {
                // walked the whole cycle without a match or an empty slot
                break;
            }
            probes += 1;

            match &mut self.slots[probe.i] {
                Slot::Occupied { key: k, value: v } if *k == key => {
                    self.probes.set(probes);
                    return Insert::Replaced(mem::replace(v, value));
                }
                Slot::Occupied { .. } => {}
                // remember the first tombstone but keep scanning: an exact
                // match deeper in the sequence takes precedence
                Slot::Tombstone => tombstone = tombstone.or(Some(probe.i)),
                Slot::Empty => {
                    open = Some(probe.i);
                    break;
                }
            }

            probe.next();
        }
        self.probes.set(probes);

        // a full table can still replace, so this check comes after the scan
        if self.is_full() {
            return Insert::Rejected(value);
        }

        let Some(target) = tombstone.or(open) else {
            // the sequence cycled without covering a reusable slot, which
            // quadratic probing permits on an unfriendly capacity
            return Insert::Rejected(value);
        };

        self.slots[target] = Slot::Occupied { key, value };
        self.len += 1;
        Insert::Inserted
    }

    /// Returns a reference to the value stored under `key`.
    pub fn get(&self, key: Key) -> Option<&V> {
        let capacity = self.capacity();
        let mut probe = Probe::start(&self.hasher, key, capacity, self.mode);
        let home = probe.i;

        let mut found = None;
        let mut probes = 0;

        for step in 0..capacity {
            if step > 0 && probe.i == home {
                break;
            }
            probes += 1;

            match &self.slots[probe.i] {
                Slot::Occupied { key: k, value } if *k == key => {
                    found = Some(value);
                    break;
                }
                Slot::Empty => break,
                // occupied by another key, or a tombstone: keep scanning
                _ => {}
            }

            probe.next();
        }
        self.probes.set(probes);

        found
    }

    /// Removes `key`, returning ownership of its value to the caller.
    ///
    /// The vacated slot becomes a tombstone, not an empty slot, so probe
    /// sequences that pass through it keep working. A miss leaves the
    /// table untouched.
    pub fn remove(&mut self, key: Key) -> Option<V> {
        let capacity = self.capacity();
        let mut probe = Probe::start(&self.hasher, key, capacity, self.mode);
        let home = probe.i;

        let mut found = None;
        let mut probes = 0;

        for step in 0..capacity {
            if step > 0 && probe.i == home {
                break;
            }
            probes += 1;

            match &self.slots[probe.i] {
                Slot::Occupied { key: k, .. } if *k == key => {
                    found = Some(probe.i);
                    break;
                }
                Slot::Empty => break,
                _ => {}
            }

            probe.next();
        }
        self.probes.set(probes);

        let target = found?;
        match mem::replace(&mut self.slots[target], Slot::Tombstone) {
            Slot::Occupied { value, .. } => {
                self.len -= 1;
                Some(value)
            }
            _ => unreachable!("matched slot was occupied"),
        }
    }

    /// Rebuilds the table into a fresh slot array of `new_capacity`,
    /// keeping the probing mode and hasher.
    ///
    /// Live entries move into the new array in slot order; tombstones are
    /// discarded. Fails with [`Error::InvalidCapacity`] if `new_capacity`
    /// is zero.
    ///
    /// # Panics
    ///
    /// Panics if an entry cannot be moved, which means `new_capacity` is
    /// too small for the live entries or the old table held a duplicate
    /// key. Either is a broken invariant, not a recoverable condition.
    pub fn rehash(self, new_capacity: usize) -> Result<Table<V, H>, Error> {
        let Table {
            slots,
            len,
            mode,
            hasher,
            ..
        } = self;

        let mut new = Table::with_hasher(new_capacity, mode, hasher)?;
        for slot in slots.into_vec() {
            if let Slot::Occupied { key, value } = slot {
                match new.insert(key, value) {
                    Insert::Inserted => {}
                    Insert::Replaced(_) => panic!("duplicate key {key} while rehashing"),
                    Insert::Rejected(_) => panic!(
                        "no open slot for key {key} while rehashing into capacity {new_capacity}"
                    ),
                }
            }
        }
        debug_assert_eq!(new.len, len);

        Ok(new)
    }

    /// Returns the key stored at `index`, or `None` if the slot holds no
    /// live entry (empty and tombstone slots are indistinguishable here).
    ///
    /// # Panics
    ///
    /// Panics if `index` is not within `0..capacity`.
    pub fn peek(&self, index: usize) -> Option<Key> {
        assert!(
            index < self.capacity(),
            "slot index {index} out of range for capacity {}",
            self.capacity(),
        );

        match self.slots[index] {
            Slot::Occupied { key, .. } => Some(key),
            _ => None,
        }
    }

    /// The number of tombstone slots.
    pub fn tombstone_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Tombstone))
            .count()
    }

    /// The number of candidate slots examined by the most recently
    /// completed [`insert`](Table::insert), [`get`](Table::get), or
    /// [`remove`](Table::remove). Overwritten by each of those calls.
    pub fn last_probe_count(&self) -> usize {
        self.probes.get()
    }

    /// Iterates over the live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Key, &V)> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied { key, value } => Some((*key, value)),
            _ => None,
        })
    }
}

impl<V: fmt::Debug, H> fmt::Debug for Table<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (i, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => map.entry(&i, &"empty"),
                Slot::Tombstone => map.entry(&i, &"tombstone"),
                Slot::Occupied { key, value } => map.entry(&i, &(key, value)),
            };
        }
        map.finish()
    }
}
