//! Free-space path loss and Beer-Lambert atmospheric attenuation.
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{LinkError, Result, db, report::Series};

/// Speed of light in vacuum, m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Attenuation experienced by an optical beam in a given weather.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub name: String,
    pub attenuation_db_per_km: f64,
}

impl WeatherCondition {
    pub fn new(name: &str, attenuation_db_per_km: f64) -> Self {
        Self {
            name: String::from(name),
            attenuation_db_per_km,
        }
    }

    pub fn clear_air() -> Self {
        Self::new("Clear air", 0.1)
    }

    pub fn haze() -> Self {
        Self::new("Haze", 4.2)
    }

    pub fn light_fog() -> Self {
        Self::new("Light fog", 20.0)
    }

    pub fn heavy_fog() -> Self {
        Self::new("Heavy fog", 85.0)
    }

    pub fn presets() -> Vec<Self> {
        vec![
            Self::clear_air(),
            Self::haze(),
            Self::light_fog(),
            Self::heavy_fog(),
        ]
    }
}

#[inline]
pub fn mw_to_dbm(p_mw: f64) -> f64 {
    db(p_mw)
}

fn check_positive(what: &str, value: f64) -> Result<()> {
    if value > 0f64 && value.is_finite() {
        Ok(())
    } else {
        Err(LinkError::Domain(format!(
            "{} must be positive and finite, got {}",
            what, value
        )))
    }
}

fn check_distances(distances: &[f64]) -> Result<()> {
    distances
        .iter()
        .try_for_each(|&d| check_positive("distance", d))
}

/// Upper bound on the number of points `distance_range` will produce.
pub const MAX_DISTANCE_POINTS: usize = 1_000_000;

/// `start, start + step, ...` up to and including `stop`.
pub fn distance_range(start: f64, stop: f64, step: f64) -> Result<Vec<f64>> {
    check_positive("start distance", start)?;
    check_positive("distance step", step)?;
    if !stop.is_finite() || stop < start {
        return Err(LinkError::InvalidParameter(format!(
            "distance range {}..{} is empty",
            start, stop
        )));
    }
    let steps = ((stop - start) / step + 1e-9).floor();
    if !(steps < MAX_DISTANCE_POINTS as f64) {
        return Err(LinkError::InvalidParameter(format!(
            "distance range {}..{} in steps of {} exceeds {} points",
            start, stop, step, MAX_DISTANCE_POINTS
        )));
    }
    let num = steps as usize + 1;
    Ok((0..num).map(|i| start + step * i as f64).collect())
}

/// Carrier frequency of light with the given wavelength.
pub fn carrier_frequency(wavelength: f64) -> Result<f64> {
    check_positive("wavelength", wavelength)?;
    Ok(SPEED_OF_LIGHT / wavelength)
}

/// FSPL(d) = 20·log10(d) + 20·log10(f) + 20·log10(4π/c), in dB.
pub fn free_space_path_loss(
    distances: &[f64],
    frequency: f64,
    speed_of_light: f64,
) -> Result<Vec<f64>> {
    check_distances(distances)?;
    check_positive("frequency", frequency)?;
    check_positive("speed of light", speed_of_light)?;

    let constant = 20f64 * frequency.log10() + 20f64 * (4f64 * PI / speed_of_light).log10();
    Ok(distances
        .iter()
        .map(|&d| 20f64 * d.log10() + constant)
        .collect())
}

/// Received power in dBm after Beer-Lambert decay, Pr = Pt·exp(-γ·d) with
/// γ converted from dB/km to per metre.
pub fn received_power(
    pt_mw: f64,
    attenuation_db_per_km: f64,
    distances: &[f64],
) -> Result<Vec<f64>> {
    check_positive("transmit power", pt_mw)?;
    check_distances(distances)?;
    if !(attenuation_db_per_km >= 0f64 && attenuation_db_per_km.is_finite()) {
        return Err(LinkError::Domain(format!(
            "attenuation must be non-negative and finite, got {} dB/km",
            attenuation_db_per_km
        )));
    }

    let gamma_per_m = attenuation_db_per_km / 1000f64;
    Ok(distances
        .iter()
        .map(|&d| mw_to_dbm(pt_mw * (-gamma_per_m * d).exp()))
        .collect())
}

/// One received-power series per weather condition over the same distances.
pub fn attenuation_curves(
    pt_mw: f64,
    conditions: &[WeatherCondition],
    distances: &[f64],
) -> Result<Vec<Series>> {
    conditions
        .iter()
        .map(|condition| -> Result<Series> {
            let power = received_power(pt_mw, condition.attenuation_db_per_km, distances)?;
            Ok(Series::new(
                format!(
                    "{} ({} dB/km)",
                    condition.name, condition.attenuation_db_per_km
                ),
                distances.to_vec(),
                power,
            ))
        })
        .collect()
}
