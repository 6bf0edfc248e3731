//! End-to-end pipelines: parameters in, result vectors out.
use log::{debug, info};
use rand::Rng;
use serde::Serialize;

use crate::{
    Bit, Result,
    awgn::add_noise,
    ber::{BitErrorCounter, ber, theoretical_bers},
    config::{AwgnConfig, ManchesterConfig, PathLossConfig},
    manchester::{ManchesterDecoder, energy_ratio, tx_manchester_signal},
    ook::{rx_ook_signal, tx_ook_signal},
    path_loss::{SPEED_OF_LIGHT, attenuation_curves, carrier_frequency, free_space_path_loss},
    random_bits,
    report::{Publish, Reporter, Series},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathLossReport {
    pub distances: Vec<f64>,
    pub frequency: f64,
    pub fspl_db: Vec<f64>,
    pub received_power_dbm: Vec<Series>,
}

pub fn run_path_loss(config: &PathLossConfig) -> Result<PathLossReport> {
    let distances = config.distances()?;
    let frequency = carrier_frequency(config.wavelength_m)?;
    let fspl_db = free_space_path_loss(&distances, frequency, SPEED_OF_LIGHT)?;
    let received_power_dbm = attenuation_curves(config.tx_power_mw, &config.conditions, &distances)?;
    debug!(
        "path loss over {} distances for {} conditions",
        distances.len(),
        config.conditions.len()
    );
    Ok(PathLossReport {
        distances,
        frequency,
        fspl_db,
        received_power_dbm,
    })
}

impl Publish for PathLossReport {
    fn publish(&self, reporter: &mut dyn Reporter) {
        reporter.series(&Series::new(
            "Free-space path loss (dB)",
            self.distances.clone(),
            self.fspl_db.clone(),
        ));
        for curve in &self.received_power_dbm {
            reporter.series(curve);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManchesterReport {
    pub bits: Vec<Bit>,
    pub encoded: Vec<Bit>,
    pub modulated: Vec<f64>,
    pub decoded: Vec<Bit>,
    pub ber: f64,
    pub energy_ratio: f64,
    pub invalid_codewords: usize,
}

/// Noise-free Li-Fi link: Manchester encode, OOK, threshold decode.
pub fn run_manchester_link<R: Rng + ?Sized>(
    config: &ManchesterConfig,
    rng: &mut R,
) -> Result<ManchesterReport> {
    let bits = random_bits(config.num_bits, rng);
    manchester_link(bits, config)
}

/// The noise-free link for a given payload.
pub fn manchester_link(bits: Vec<Bit>, config: &ManchesterConfig) -> Result<ManchesterReport> {
    let encoded: Vec<Bit> = tx_manchester_signal(bits.iter().cloned()).collect();
    let modulated: Vec<f64> = tx_ook_signal(encoded.iter().cloned()).collect();

    let decoder = ManchesterDecoder::new(config.threshold, config.policy);
    let invalid_codewords = decoder.count_invalid_codewords(&modulated)?;
    let decoded = decoder.decode(&modulated)?;

    let ber = ber(&bits, &decoded)?;
    let energy_ratio = energy_ratio(&encoded);
    info!(
        "Manchester link: {} bits, BER {:.6}, energy ratio {:.4}",
        bits.len(),
        ber,
        energy_ratio
    );

    Ok(ManchesterReport {
        bits,
        encoded,
        modulated,
        decoded,
        ber,
        energy_ratio,
        invalid_codewords,
    })
}

impl Publish for ManchesterReport {
    fn publish(&self, reporter: &mut dyn Reporter) {
        let chips: Vec<f64> = (0..self.modulated.len()).map(|i| i as f64).collect();
        reporter.series(&Series::new(
            "Manchester OOK signal",
            chips,
            self.modulated.clone(),
        ));
        reporter.scalar("manchester_ber", self.ber);
        reporter.scalar("energy_ratio", self.energy_ratio);
        reporter.scalar("invalid_codewords", self.invalid_codewords as f64);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BerSweepReport {
    pub snrs_db: Vec<f64>,
    /// Bit errors counted at each SNR point.
    pub errors: Vec<usize>,
    pub empirical: Vec<f64>,
    pub theoretical: Vec<f64>,
}

/// OOK over AWGN. One payload is drawn and reused at every SNR point; the
/// noise is drawn fresh per point.
pub fn run_awgn_sweep<R: Rng + ?Sized>(config: &AwgnConfig, rng: &mut R) -> Result<BerSweepReport> {
    let bits = random_bits(config.num_bits, rng);
    awgn_sweep(&bits, &config.snrs_db(), config.threshold, rng)
}

pub fn awgn_sweep<R: Rng + ?Sized>(
    bits: &[Bit],
    snrs_db: &[f64],
    threshold: f64,
    rng: &mut R,
) -> Result<BerSweepReport> {
    let tx: Vec<f64> = tx_ook_signal(bits.iter().cloned()).collect();

    let counters = snrs_db
        .iter()
        .map(|&snr_db| -> Result<BitErrorCounter> {
            let noisy = add_noise(&tx, snr_db, &mut *rng)?;
            let rx: Vec<Bit> = rx_ook_signal(noisy.into_iter(), threshold).collect();
            let mut counter = BitErrorCounter::new();
            counter.update(bits, &rx)?;
            debug!(
                "SNR {:>6.2} dB: {} errors in {} bits, BER {:.6}",
                snr_db,
                counter.errors(),
                counter.bits(),
                counter.ber()
            );
            Ok(counter)
        })
        .collect::<Result<Vec<BitErrorCounter>>>()?;
    let errors = counters.iter().map(BitErrorCounter::errors).collect();
    let empirical = counters.iter().map(BitErrorCounter::ber).collect();
    let theoretical = theoretical_bers(snrs_db);
    info!(
        "AWGN sweep: {} bits over {} SNR points",
        bits.len(),
        snrs_db.len()
    );

    Ok(BerSweepReport {
        snrs_db: snrs_db.to_vec(),
        errors,
        empirical,
        theoretical,
    })
}

impl Publish for BerSweepReport {
    fn publish(&self, reporter: &mut dyn Reporter) {
        reporter.series(&Series::new(
            "Simulated BER",
            self.snrs_db.clone(),
            self.empirical.clone(),
        ));
        reporter.series(&Series::new(
            "Theoretical BER",
            self.snrs_db.clone(),
            self.theoretical.clone(),
        ));
    }
}
