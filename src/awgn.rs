//! Additive white Gaussian noise channel for real-valued intensity signals.
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::{LinkError, Result, avg_power, undb};

/// Noise standard deviation that puts `signal_power` at `snr_db` above the
/// noise floor.
pub fn noise_sigma(signal_power: f64, snr_db: f64) -> Result<f64> {
    if !snr_db.is_finite() {
        return Err(LinkError::InvalidParameter(format!(
            "SNR must be finite, got {} dB",
            snr_db
        )));
    }
    let noise_power = signal_power / undb(snr_db);
    if !noise_power.is_finite() || noise_power < 0f64 {
        return Err(LinkError::InvalidParameter(format!(
            "noise power {} is not usable",
            noise_power
        )));
    }
    Ok(noise_power.sqrt())
}

/// Add independent zero-mean Gaussian noise with standard deviation `sigma`
/// to every sample.
pub fn awgn<'r, I, R>(signal: I, sigma: f64, rng: &'r mut R) -> Result<impl Iterator<Item = f64> + 'r>
where
    I: Iterator<Item = f64> + 'r,
    R: Rng + ?Sized,
{
    // Normal::new accepts a negative standard deviation and mirrors it.
    if !(sigma >= 0f64 && sigma.is_finite()) {
        return Err(LinkError::InvalidParameter(format!(
            "noise sigma must be non-negative and finite, got {}",
            sigma
        )));
    }
    let normal = Normal::new(0f64, sigma)
        .map_err(|e| LinkError::InvalidParameter(format!("noise sigma {}: {}", sigma, e)))?;
    Ok(signal.map(move |sample| sample + normal.sample(&mut *rng)))
}

/// Corrupt `signal` with AWGN at `snr_db`, measured against the average
/// power of `signal` itself.
pub fn add_noise<R: Rng + ?Sized>(signal: &[f64], snr_db: f64, rng: &mut R) -> Result<Vec<f64>> {
    if signal.is_empty() {
        return Ok(Vec::new());
    }
    let sigma = noise_sigma(avg_power(signal), snr_db)?;
    if sigma == 0f64 {
        return Ok(signal.to_vec());
    }
    Ok(awgn(signal.iter().cloned(), sigma, rng)?.collect())
}
