use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use loquat::{Algorithm, Insert, Key, ProbeMode, Table};

// A prime capacity keeps double hashing's cycles full-length.
const CAPACITY: usize = 65_537;
const SIZE: usize = 32_000;

const MODES: [(&str, ProbeMode); 3] = [
    ("linear", ProbeMode::Linear),
    ("double", ProbeMode::Double),
    ("quadratic", ProbeMode::Quadratic),
];

#[derive(Clone, Copy)]
struct RandomKeys {
    state: Key,
}

impl RandomKeys {
    fn new() -> Self {
        RandomKeys { state: 0 }
    }
}

impl Iterator for RandomKeys {
    type Item = Key;

    fn next(&mut self) -> Option<Key> {
        // Add 1 then multiply by 2^32 / the golden ratio; odd multiplier,
        // so the sequence never repeats a key.
        self.state = self.state.wrapping_add(1).wrapping_mul(2_654_435_769);
        Some(self.state)
    }
}

fn compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");

    for (name, mode) in MODES {
        group.bench_function(name, |b| {
            let mut table = Table::with_hasher(CAPACITY, mode, Algorithm::Fnv).unwrap();

            // quadratic probing can reject before the table fills, so only
            // look up the keys that actually landed
            let mut keys = Vec::new();
            for key in RandomKeys::new().take(SIZE) {
                if let Insert::Inserted = table.insert(key, key) {
                    keys.push(key);
                }
            }

            b.iter(|| {
                for &key in &keys {
                    black_box(assert_eq!(table.get(key), Some(&key)));
                }
            });
        });
    }
    group.finish();

    let mut group = c.benchmark_group("insert");

    for (name, mode) in MODES {
        group.bench_function(name, |b| {
            b.iter_batched(
                || Table::with_hasher(CAPACITY, mode, Algorithm::Fnv).unwrap(),
                |mut table| {
                    for key in RandomKeys::new().take(SIZE) {
                        black_box(table.insert(key, key));
                    }
                    table
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, compare);
criterion_main!(benches);
