//! On-Off Keying: bit 1 switches the light source ON (amplitude 1), bit 0
//! switches it OFF (amplitude 0).
use crate::{Bit, bit_to_level};

/// Decision level halfway between the OFF and ON amplitudes.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

pub fn tx_ook_signal<I: Iterator<Item = Bit>>(message: I) -> impl Iterator<Item = f64> {
    message.map(bit_to_level)
}

/// Samples at or above `threshold` are read as ON.
pub fn rx_ook_signal<I: Iterator<Item = f64>>(
    signal: I,
    threshold: f64,
) -> impl Iterator<Item = Bit> {
    signal.map(move |sample| sample >= threshold)
}
