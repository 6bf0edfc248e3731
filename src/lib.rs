//! Optical wireless link simulation.
//!
//! Three independent pipelines live here: free-space path loss with
//! Beer-Lambert attenuation ([`path_loss`]), a noise-free Manchester coded
//! OOK link ([`manchester`], [`ook`]) and an OOK link over AWGN
//! ([`awgn`], [`ber`]). [`link`] wires the stages together and [`report`]
//! hands the resulting vectors to whoever draws or prints them.
use std::f64::consts::FRAC_2_SQRT_PI;

use rand::Rng;

pub mod awgn;
pub mod ber;
pub mod config;
pub mod error;
pub mod link;
pub mod manchester;
pub mod ook;
pub mod path_loss;
#[cfg(feature = "python")]
mod python;
pub mod report;

pub use crate::error::{LinkError, Result};

pub type Bit = bool;

const MAX_ITER: usize = 1000;
const FPMIN: f64 = f64::MIN_POSITIVE / f64::EPSILON;

#[inline]
pub fn db(x: f64) -> f64 {
    10f64 * x.log10()
}

#[inline]
pub fn undb(x: f64) -> f64 {
    10f64.powf(x / 10f64)
}

#[inline]
pub fn linspace(start: f64, stop: f64, num: usize) -> impl Iterator<Item = f64> {
    let step = if num > 1 {
        (stop - start) / ((num - 1) as f64)
    } else {
        0f64
    };
    (0..num).map(move |i| start + step * (i as f64))
}

#[inline]
pub fn bit_to_level(bit: Bit) -> f64 {
    if bit { 1_f64 } else { 0_f64 }
}

/// Draw `num_bits` uniformly distributed bits from `rng`.
pub fn random_bits<R: Rng + ?Sized>(num_bits: usize, rng: &mut R) -> Vec<Bit> {
    (0..num_bits).map(|_| rng.random::<Bit>()).collect()
}

/// Calculates the power per sample (mean of squared samples).
#[inline]
pub fn avg_power(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0f64;
    }
    signal.iter().map(|&sample| sample * sample).sum::<f64>() / signal.len() as f64
}

// erf(x) = P(1/2, x^2), the regularized lower incomplete gamma function.
// Series expansion, good for x^2 < 1.5.
fn erf_series(x: f64) -> f64 {
    let x2 = x * x;
    let mut ap = 0.5;
    let mut del = 2f64;
    let mut sum = del;
    for _ in 0..MAX_ITER {
        ap += 1f64;
        del *= x2 / ap;
        sum += del;
        if del.abs() < sum.abs() * f64::EPSILON {
            break;
        }
    }
    sum * (-x2).exp() * x * FRAC_2_SQRT_PI / 2f64
}

// erfc(x) = Q(1/2, x^2), evaluated with a modified Lentz continued fraction.
// Converges quickly for x^2 >= 1.5.
fn erfc_continued_fraction(x: f64) -> f64 {
    let x2 = x * x;
    let mut b = x2 + 0.5;
    let mut c = 1f64 / FPMIN;
    let mut d = 1f64 / b;
    let mut h = d;
    for i in 1..MAX_ITER {
        let i = i as f64;
        let an = -i * (i - 0.5);
        b += 2f64;
        d = an * d + b;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = b + an / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1f64 / d;
        let del = d * c;
        h *= del;
        if (del - 1f64).abs() < f64::EPSILON {
            break;
        }
    }
    (-x2).exp() * x * FRAC_2_SQRT_PI / 2f64 * h
}

/// Complementary error function, accurate to a few ulps over the real line.
pub fn erfc(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x < 0f64 {
        return 2f64 - erfc(-x);
    }
    if x * x < 1.5 {
        1f64 - erf_series(x)
    } else {
        erfc_continued_fraction(x)
    }
}
