#![allow(dead_code)]

use loquat::{ProbeMode, Table};

pub const MODES: [ProbeMode; 3] = [
    ProbeMode::Linear,
    ProbeMode::Double,
    ProbeMode::Quadratic,
];

// Run the test on each probing mode. Prime capacities keep linear and
// double sequences full cycles; quadratic coverage is weaker everywhere,
// so mode-generic tests stick to keys with distinct home slots.
pub fn with_table<V>(capacity: usize, mut test: impl FnMut(&dyn Fn() -> Table<V>)) {
    for mode in MODES {
        test(&|| Table::new(capacity, mode).unwrap());
    }
}
