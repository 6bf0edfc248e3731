//! Bit error rate: measured from bit streams and predicted from SNR.
use std::f64::consts::SQRT_2;

use crate::{Bit, LinkError, Result, erfc, undb};

/// Gaussian tail probability, Q(x) = P(Z > x) for Z ~ N(0, 1).
#[inline]
pub fn qfunc(x: f64) -> f64 {
    0.5 * erfc(x / SQRT_2)
}

/// Fraction of positions where `tx` and `rx` disagree.
pub fn ber(tx: &[Bit], rx: &[Bit]) -> Result<f64> {
    if tx.len() != rx.len() {
        return Err(LinkError::LengthMismatch {
            tx: tx.len(),
            rx: rx.len(),
        });
    }
    if tx.is_empty() {
        return Ok(0f64);
    }
    Ok(bit_errors(tx, rx) as f64 / tx.len() as f64)
}

#[inline]
fn bit_errors(tx: &[Bit], rx: &[Bit]) -> usize {
    tx.iter()
        .zip(rx.iter())
        .map(|(&ti, &ri)| if ti == ri { 0 } else { 1 })
        .sum()
}

/// Threshold-detected OOK: Q(sqrt(2 · SNR)).
pub fn theoretical_ook_ber(snr_db: f64) -> f64 {
    qfunc((2f64 * undb(snr_db)).sqrt())
}

pub fn theoretical_bers(snrs_db: &[f64]) -> Vec<f64> {
    snrs_db.iter().cloned().map(theoretical_ook_ber).collect()
}

/// Accumulates errors over several transmitted blocks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BitErrorCounter {
    errors: usize,
    bits: usize,
}

impl BitErrorCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, tx: &[Bit], rx: &[Bit]) -> Result<()> {
        if tx.len() != rx.len() {
            return Err(LinkError::LengthMismatch {
                tx: tx.len(),
                rx: rx.len(),
            });
        }
        self.errors += bit_errors(tx, rx);
        self.bits += tx.len();
        Ok(())
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn bits(&self) -> usize {
        self.bits
    }

    pub fn ber(&self) -> f64 {
        if self.bits == 0 {
            0f64
        } else {
            self.errors as f64 / self.bits as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linspace;
    use assert_approx_eq::assert_approx_eq;
    use rstest::rstest;

    #[test]
    fn identical_streams() {
        let tx = vec![true, false, true, true, false];
        assert_eq!(ber(&tx, &tx).unwrap(), 0.0);
    }

    #[test]
    fn flipped_streams() {
        let tx = vec![true, false, true, true, false];
        let rx: Vec<Bit> = tx.iter().map(|&b| !b).collect();
        assert_eq!(ber(&tx, &rx).unwrap(), 1.0);
    }

    #[test]
    fn one_in_four() {
        let tx = [true, true, true, true];
        let rx = [true, true, true, false];
        assert_eq!(ber(&tx, &rx).unwrap(), 0.25);
    }

    #[test]
    fn mismatched_lengths() {
        assert_eq!(
            ber(&[true, false], &[true]),
            Err(LinkError::LengthMismatch { tx: 2, rx: 1 })
        );
    }

    #[test]
    fn empty_streams() {
        assert_eq!(ber(&[], &[]).unwrap(), 0.0);
    }

    #[rstest]
    #[case(0.0, 0.5)]
    #[case(1.0, 0.158_655_253_931_457_05)]
    #[case(3.0, 0.001_349_898_031_630_094_6)]
    fn gaussian_tail(#[case] x: f64, #[case] expected: f64) {
        assert_approx_eq!(qfunc(x), expected, expected * 1e-12);
    }

    #[rstest]
    #[case(0.0, 0.078_649_603_525_142_57)]
    #[case(10.0, 3.872_108_215_522_048e-6)]
    fn ook_reference_points(#[case] snr_db: f64, #[case] expected: f64) {
        assert_approx_eq!(theoretical_ook_ber(snr_db), expected, expected * 1e-10);
    }

    #[test]
    fn theory_decreases_with_snr() {
        let snrs: Vec<f64> = linspace(-5.0, 20.0, 26).collect();
        let bers = theoretical_bers(&snrs);
        for pair in bers.windows(2) {
            assert!(pair[1] < pair[0], "{:?}", pair);
        }
        assert!(bers[0] <= 0.5);
        assert!(*bers.last().unwrap() < 1e-40);
    }

    #[test]
    fn counter_accumulates() {
        let mut counter = BitErrorCounter::new();
        counter.update(&[true, true], &[true, false]).unwrap();
        counter.update(&[false, false], &[false, false]).unwrap();
        assert_eq!(counter.errors(), 1);
        assert_eq!(counter.bits(), 4);
        assert_eq!(counter.ber(), 0.25);
        assert!(counter.update(&[true], &[]).is_err());
        assert_eq!(counter.bits(), 4);
        assert_eq!(BitErrorCounter::new().ber(), 0.0);
    }
}
