use numpy::{IntoPyArray, PyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    Bit, LinkError,
    awgn::add_noise,
    ber::{ber, theoretical_bers},
    manchester::{CodeWordPolicy, ManchesterDecoder, tx_manchester_signal},
    ook::{rx_ook_signal, tx_ook_signal},
    path_loss::{SPEED_OF_LIGHT, free_space_path_loss, received_power},
    random_bits,
};

impl From<LinkError> for PyErr {
    fn from(err: LinkError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[pymodule]
#[pyo3(name = "owcsim")]
fn module_with_functions(m: &Bound<'_, PyModule>) -> PyResult<()> {
    #[pyfunction]
    #[pyo3(signature = (num_bits, seed=None))]
    fn random_data(py: Python<'_>, num_bits: usize, seed: Option<u64>) -> Bound<'_, PyArray1<Bit>> {
        random_bits(num_bits, &mut rng_from(seed)).into_pyarray(py)
    }

    #[pyfunction]
    fn fspl(distances: Vec<f64>, frequency: f64) -> PyResult<Vec<f64>> {
        Ok(free_space_path_loss(&distances, frequency, SPEED_OF_LIGHT)?)
    }

    #[pyfunction]
    fn rx_power(pt_mw: f64, attenuation_db_per_km: f64, distances: Vec<f64>) -> PyResult<Vec<f64>> {
        Ok(received_power(pt_mw, attenuation_db_per_km, &distances)?)
    }

    #[pyfunction]
    fn tx_ook(message: Vec<Bit>) -> Vec<f64> {
        tx_ook_signal(message.into_iter()).collect()
    }

    #[pyfunction]
    #[pyo3(signature = (signal, threshold=0.5))]
    fn rx_ook(signal: Vec<f64>, threshold: f64) -> Vec<Bit> {
        rx_ook_signal(signal.into_iter(), threshold).collect()
    }

    #[pyfunction]
    fn tx_manchester(message: Vec<Bit>) -> Vec<Bit> {
        tx_manchester_signal(message.into_iter()).collect()
    }

    #[pyfunction]
    #[pyo3(signature = (signal, threshold=0.5, strict=false))]
    fn rx_manchester(signal: Vec<f64>, threshold: f64, strict: bool) -> PyResult<Vec<Bit>> {
        let policy = if strict {
            CodeWordPolicy::Strict
        } else {
            CodeWordPolicy::Substitute
        };
        Ok(ManchesterDecoder::new(threshold, policy).decode(&signal)?)
    }

    #[pyfunction]
    #[pyo3(name = "awgn", signature = (signal, snr_db, seed=None))]
    fn awgn_py(signal: Vec<f64>, snr_db: f64, seed: Option<u64>) -> PyResult<Vec<f64>> {
        Ok(add_noise(&signal, snr_db, &mut rng_from(seed))?)
    }

    #[pyfunction]
    #[pyo3(name = "ber")]
    fn ber_py(tx: Vec<Bit>, rx: Vec<Bit>) -> PyResult<f64> {
        Ok(ber(&tx, &rx)?)
    }

    #[pyfunction]
    fn theoretical_ber(snrs_db: Vec<f64>) -> Vec<f64> {
        theoretical_bers(&snrs_db)
    }

    m.add_function(wrap_pyfunction!(random_data, m)?)?;
    m.add_function(wrap_pyfunction!(fspl, m)?)?;
    m.add_function(wrap_pyfunction!(rx_power, m)?)?;
    m.add_function(wrap_pyfunction!(tx_ook, m)?)?;
    m.add_function(wrap_pyfunction!(rx_ook, m)?)?;
    m.add_function(wrap_pyfunction!(tx_manchester, m)?)?;
    m.add_function(wrap_pyfunction!(rx_manchester, m)?)?;
    m.add_function(wrap_pyfunction!(awgn_py, m)?)?;
    m.add_function(wrap_pyfunction!(ber_py, m)?)?;
    m.add_function(wrap_pyfunction!(theoretical_ber, m)?)?;
    Ok(())
}
