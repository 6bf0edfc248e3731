//! Manchester line coding (IEEE 802.3 convention).
//!
//! Every bit becomes a pair of half-bit chips with a transition in the
//! middle: 1 → (0, 1), 0 → (1, 0). The guaranteed transition keeps the light
//! source at a 50% duty cycle regardless of the payload.
use itertools::Itertools;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{Bit, LinkError, Result, ook::DEFAULT_THRESHOLD};

/// What the decoder does with a chip pair that is neither (0, 1) nor (1, 0).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeWordPolicy {
    /// Decode invalid pairs as 0 and carry on.
    #[default]
    Substitute,
    /// Fail on the first invalid pair.
    Strict,
}

#[inline]
fn codeword(bit: Bit) -> [Bit; 2] {
    if bit { [false, true] } else { [true, false] }
}

pub fn tx_manchester_signal<I: Iterator<Item = Bit>>(message: I) -> impl Iterator<Item = Bit> {
    message.flat_map(codeword)
}

/// Fraction of chips that are ON.
pub fn energy_ratio(encoded: &[Bit]) -> f64 {
    if encoded.is_empty() {
        return 0f64;
    }
    encoded.iter().filter(|&&chip| chip).count() as f64 / encoded.len() as f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManchesterDecoder {
    pub threshold: f64,
    pub policy: CodeWordPolicy,
}

impl Default for ManchesterDecoder {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            policy: CodeWordPolicy::default(),
        }
    }
}

impl ManchesterDecoder {
    pub fn new(threshold: f64, policy: CodeWordPolicy) -> Self {
        Self { threshold, policy }
    }

    pub fn strict(threshold: f64) -> Self {
        Self::new(threshold, CodeWordPolicy::Strict)
    }

    fn chips<'a>(&self, signal: &'a [f64]) -> Result<impl Iterator<Item = (Bit, Bit)> + 'a> {
        if signal.len() % 2 != 0 {
            return Err(LinkError::MalformedFrame { len: signal.len() });
        }
        let threshold = self.threshold;
        // Strictly above the threshold counts as ON.
        Ok(signal.iter().map(move |&sample| sample > threshold).tuples())
    }

    /// Binarize `signal` and decode it pair by pair.
    pub fn decode(&self, signal: &[f64]) -> Result<Vec<Bit>> {
        let mut invalid = 0usize;
        let mut bits = Vec::with_capacity(signal.len() / 2);
        for (index, pair) in self.chips(signal)?.enumerate() {
            match pair {
                (false, true) => bits.push(true),
                (true, false) => bits.push(false),
                (first, second) => match self.policy {
                    CodeWordPolicy::Strict => {
                        return Err(LinkError::InvalidCodeWord {
                            index,
                            pair: (first as u8, second as u8),
                        });
                    }
                    CodeWordPolicy::Substitute => {
                        invalid += 1;
                        bits.push(false);
                    }
                },
            }
        }
        if invalid > 0 {
            warn!("substituted 0 for {} invalid Manchester codewords", invalid);
        }
        Ok(bits)
    }

    /// Number of chip pairs in `signal` that are not valid codewords.
    pub fn count_invalid_codewords(&self, signal: &[f64]) -> Result<usize> {
        Ok(self.chips(signal)?.filter(|(a, b)| a == b).count())
    }
}

/// Decode with the default threshold and the given policy.
pub fn rx_manchester_signal(signal: &[f64], policy: CodeWordPolicy) -> Result<Vec<Bit>> {
    ManchesterDecoder::new(DEFAULT_THRESHOLD, policy).decode(signal)
}
