//! Hand-off point between the pipelines and whatever draws or prints them.
use std::io::Write;

use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// A labeled curve: `y` plotted against `x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn new<S: Into<String>>(label: S, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            x,
            y,
        }
    }
}

/// Consumer of final numeric results.
pub trait Reporter {
    fn series(&mut self, series: &Series);
    fn scalar(&mut self, name: &str, value: f64);

    /// Exact integer results such as seeds and counts.
    fn integer(&mut self, name: &str, value: u64) {
        self.scalar(name, value as f64);
    }
}

/// Things that can push their results into a [`Reporter`].
pub trait Publish {
    fn publish(&self, reporter: &mut dyn Reporter);
}

/// Logs a one-line summary per result.
#[derive(Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn series(&mut self, series: &Series) {
        let first = series.x.first().zip(series.y.first());
        let last = series.x.last().zip(series.y.last());
        match (first, last) {
            (Some((x0, y0)), Some((xn, yn))) => info!(
                "{}: {} points, ({:.4}, {:.4}) .. ({:.4}, {:.4})",
                series.label,
                series.y.len(),
                x0,
                y0,
                xn,
                yn
            ),
            _ => info!("{}: empty", series.label),
        }
    }

    fn scalar(&mut self, name: &str, value: f64) {
        info!("{} = {:.6}", name, value);
    }

    fn integer(&mut self, name: &str, value: u64) {
        info!("{} = {}", name, value);
    }
}

/// Collects results into a JSON document.
#[derive(Debug, Default)]
pub struct JsonReporter {
    series: Vec<Series>,
    scalars: Map<String, Value>,
}

impl JsonReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_value(&self) -> Value {
        json!({
            "series": self.series,
            "scalars": self.scalars,
        })
    }

    pub fn write_to<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, &self.to_value())
    }
}

impl Reporter for JsonReporter {
    fn series(&mut self, series: &Series) {
        self.series.push(series.clone());
    }

    fn scalar(&mut self, name: &str, value: f64) {
        // Non-finite values have no JSON representation and become null.
        self.scalars.insert(String::from(name), json!(value));
    }

    fn integer(&mut self, name: &str, value: u64) {
        self.scalars.insert(String::from(name), json!(value));
    }
}
