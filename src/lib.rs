#![doc = include_str!("../README.md")]

mod hash;
mod probe;
mod table;

pub use hash::{Algorithm, Hasher, Key};
pub use probe::{Probe, ProbeMode};
pub use table::{Error, Insert, Table};
