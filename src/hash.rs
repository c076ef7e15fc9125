//! The hash capability consumed by the table.
//!
//! A [`Hasher`] turns a key into a home slot and, for double hashing, a
//! probe decrement. The table stores one at construction and treats it as
//! an opaque strategy; the built-in [`Algorithm`] family covers the common
//! choices for small integer keys.

use rand::Rng;

/// Keys are fixed-width integers.
pub type Key = u32;

/// A source of home slots and probe decrements.
///
/// Implementations must be deterministic: the same `(key, capacity)` pair
/// always yields the same result, across every operation on a table.
pub trait Hasher {
    /// The home slot for `key` in a table with `capacity` slots.
    ///
    /// Must return an index in `0..capacity`.
    fn slot(&self, key: Key, capacity: usize) -> usize;

    /// The probe decrement for `key`, used only by double hashing.
    ///
    /// Must return a value in `1..capacity`, derived from an algorithm
    /// distinct from [`slot`](Hasher::slot) so that double hashing does
    /// not degenerate into linear probing.
    fn decrement(&self, key: Key, capacity: usize) -> usize;
}

/// The built-in hash family.
///
/// Each algorithm mixes the four little-endian bytes of the key into a
/// 32-bit value, which [`Hasher::slot`] reduces modulo the table capacity.
/// The probe decrement always comes from modified Bernstein, which is not
/// a member of the primary family.
///
/// [`Algorithm::Modulo`] is the default. It barely mixes at all, which
/// makes it the right choice when tests need to place keys in known slots,
/// and the worst choice for sequential keys under linear probing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Algorithm {
    /// The key itself, reduced modulo the capacity.
    Modulo,
    /// Bernstein's multiplicative hash.
    Djb,
    /// Shift-add-xor.
    Sax,
    /// Fowler/Noll/Vo.
    Fnv,
    /// Jenkins' one-at-a-time.
    Oat,
    /// Jenkins' full-avalanche lookup hash.
    Jen,
    /// The ELF/PJW object-file hash.
    Elf,
    /// A rotating hash xored against a table of random words.
    Jsw(Box<[u32; 256]>),
    /// Tabulation hashing over the key's bytes.
    Tab(Box<[[u32; 256]; 4]>),
}

impl Algorithm {
    /// Builds the JSW rotating hash with a freshly generated random table.
    pub fn jsw(rng: &mut impl Rng) -> Algorithm {
        let mut table = Box::new([0u32; 256]);
        for word in table.iter_mut() {
            *word = rng.gen();
        }
        Algorithm::Jsw(table)
    }

    /// Builds a tabulation hash with one random table per key byte.
    pub fn tab(rng: &mut impl Rng) -> Algorithm {
        let mut tables = Box::new([[0u32; 256]; 4]);
        for table in tables.iter_mut() {
            for word in table.iter_mut() {
                *word = rng.gen();
            }
        }
        Algorithm::Tab(tables)
    }

    fn mix(&self, key: Key) -> u32 {
        match self {
            Algorithm::Modulo => key,
            Algorithm::Djb => djb(key),
            Algorithm::Sax => sax(key),
            Algorithm::Fnv => fnv(key),
            Algorithm::Oat => oat(key),
            Algorithm::Jen => jen(key),
            Algorithm::Elf => elf(key),
            Algorithm::Jsw(table) => jsw(key, table),
            Algorithm::Tab(tables) => tab(key, tables),
        }
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::Modulo
    }
}

impl Hasher for Algorithm {
    fn slot(&self, key: Key, capacity: usize) -> usize {
        self.mix(key) as usize % capacity
    }

    fn decrement(&self, key: Key, capacity: usize) -> usize {
        (djb_xor(key) as usize % capacity).max(1)
    }
}

fn djb(key: Key) -> u32 {
    let mut h: u32 = 0;
    for b in key.to_le_bytes() {
        h = h.wrapping_mul(33).wrapping_add(b as u32);
    }
    h
}

// Modified Bernstein: addition swapped for xor in the combining step.
fn djb_xor(key: Key) -> u32 {
    let mut h: u32 = 0;
    for b in key.to_le_bytes() {
        h = h.wrapping_mul(33) ^ b as u32;
    }
    h
}

fn sax(key: Key) -> u32 {
    let mut h: u32 = 0;
    for b in key.to_le_bytes() {
        h ^= (h << 5).wrapping_add(h >> 2).wrapping_add(b as u32);
    }
    h
}

fn fnv(key: Key) -> u32 {
    let mut h: u32 = 2_166_136_261;
    for b in key.to_le_bytes() {
        h = h.wrapping_mul(16_777_619) ^ b as u32;
    }
    h
}

fn oat(key: Key) -> u32 {
    let mut h: u32 = 0;
    for b in key.to_le_bytes() {
        h = h.wrapping_add(b as u32);
        h = h.wrapping_add(h << 10);
        h ^= h >> 6;
    }
    h = h.wrapping_add(h << 3);
    h ^= h >> 11;
    h.wrapping_add(h << 15)
}

fn jen(key: Key) -> u32 {
    // Jenkins' lookup hash specialized to a single 4-byte block. The
    // initial state must be constant so lookups can recompute it.
    let mut a: u32 = 0x9e3779b9_u32.wrapping_add(key);
    let mut b: u32 = 0x9e3779b9;
    let mut c: u32 = 4;

    a = a.wrapping_sub(b).wrapping_sub(c) ^ (c >> 13);
    b = b.wrapping_sub(c).wrapping_sub(a) ^ (a << 8);
    c = c.wrapping_sub(a).wrapping_sub(b) ^ (b >> 13);
    a = a.wrapping_sub(b).wrapping_sub(c) ^ (c >> 12);
    b = b.wrapping_sub(c).wrapping_sub(a) ^ (a << 16);
    c = c.wrapping_sub(a).wrapping_sub(b) ^ (b >> 5);
    a = a.wrapping_sub(b).wrapping_sub(c) ^ (c >> 3);
    b = b.wrapping_sub(c).wrapping_sub(a) ^ (a << 10);
    c.wrapping_sub(a).wrapping_sub(b) ^ (b >> 15)
}

fn elf(key: Key) -> u32 {
    let mut h: u32 = 0;
    for b in key.to_le_bytes() {
        h = (h << 4).wrapping_add(b as u32);
        let g = h & 0xf000_0000;
        if g != 0 {
            h ^= g >> 24;
        }
        h &= !g;
    }
    h
}

fn jsw(key: Key, table: &[u32; 256]) -> u32 {
    let mut h: u32 = 16_777_551;
    for b in key.to_le_bytes() {
        h = h.rotate_left(1) ^ table[b as usize];
    }
    h
}

fn tab(key: Key, tables: &[[u32; 256]; 4]) -> u32 {
    let mut h: u32 = 0;
    for (i, b) in key.to_le_bytes().into_iter().enumerate() {
        h ^= tables[i][b as usize];
    }
    h
}
