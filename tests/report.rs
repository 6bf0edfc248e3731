use std::fs::File;

use owcsim::{
    config::SimulationConfig,
    link::{run_awgn_sweep, run_manchester_link, run_path_loss},
    report::{JsonReporter, Publish, Reporter},
};
use serde_json::Value;
use tempfile::NamedTempFile;

mod util;

#[test]
fn full_run_writes_json_report() {
    let config = SimulationConfig::from_json(r#"{"seed": 9, "awgn": {"num_bits": 2000}}"#).unwrap();
    let mut rng = util::seeded(config.seed.unwrap());

    let mut reporter = JsonReporter::new();
    run_path_loss(&config.path_loss)
        .unwrap()
        .publish(&mut reporter);
    run_manchester_link(&config.manchester, &mut rng)
        .unwrap()
        .publish(&mut reporter);
    run_awgn_sweep(&config.awgn, &mut rng)
        .unwrap()
        .publish(&mut reporter);

    let temp = NamedTempFile::new().unwrap();
    reporter.write_to(File::create(temp.path()).unwrap()).unwrap();
    let parsed: Value = serde_json::from_reader(File::open(temp.path()).unwrap()).unwrap();

    let labels: Vec<&str> = parsed["series"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["label"].as_str().unwrap())
        .collect();
    assert_eq!(
        labels,
        vec![
            "Free-space path loss (dB)",
            "Clear air (0.1 dB/km)",
            "Haze (4.2 dB/km)",
            "Light fog (20 dB/km)",
            "Heavy fog (85 dB/km)",
            "Manchester OOK signal",
            "Simulated BER",
            "Theoretical BER",
        ]
    );
    assert_eq!(parsed["scalars"]["manchester_ber"], 0.0);
    assert_eq!(parsed["scalars"]["energy_ratio"], 0.5);
    assert_eq!(parsed["scalars"]["invalid_codewords"], 0.0);
}

#[test]
fn unseeded_run_records_its_seed() {
    let mut config =
        SimulationConfig::from_json(r#"{"awgn": {"num_bits": 500, "snr_points": 3}}"#).unwrap();
    let seed = config.resolve_seed(&mut util::seeded(77));

    let mut reporter = JsonReporter::new();
    reporter.integer("seed", seed);
    run_awgn_sweep(&config.awgn, &mut util::seeded(seed))
        .unwrap()
        .publish(&mut reporter);
    let value = reporter.to_value();

    let recorded = value["scalars"]["seed"].as_u64().unwrap();
    assert_eq!(recorded, seed);
    let replay = run_awgn_sweep(&config.awgn, &mut util::seeded(recorded)).unwrap();
    assert_eq!(value["series"][0]["y"], serde_json::json!(replay.empirical));
}
