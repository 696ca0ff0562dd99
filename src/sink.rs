//! # Result sink
//!
//! Boundary to the experiment tracking store. The solver only emits
//! named arrays and the monitoring table; where they end up is the
//! caller's business.
use crate::error::Result;
use crate::solver::MonitorRecord;
use ndarray::Array2;
use num_complex::Complex64;
use std::collections::HashMap;

/// Upload-by-name interface of the artifact store.
pub trait ResultSink {
    /// Store a real valued array under a name
    fn put_array(&mut self, name: &str, data: &Array2<f64>) -> Result<()>;
    /// Store a spectral (complex valued) array under a name
    fn put_spectral(&mut self, name: &str, data: &Array2<Complex64>) -> Result<()>;
    /// Store the monitoring table
    fn put_monitoring(&mut self, records: &[MonitorRecord]) -> Result<()>;
}

/// Sink keeping everything in memory.
///
/// Used by the tests and by embedders that postprocess in-process.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Real arrays by name
    pub arrays: HashMap<String, Array2<f64>>,
    /// Spectral arrays by name
    pub spectral: HashMap<String, Array2<Complex64>>,
    /// Monitoring table
    pub monitoring: Vec<MonitorRecord>,
}

impl MemorySink {
    /// Empty sink
    pub fn new() -> MemorySink {
        MemorySink::default()
    }
}

impl ResultSink for MemorySink {
    fn put_array(&mut self, name: &str, data: &Array2<f64>) -> Result<()> {
        self.arrays.insert(name.to_string(), data.clone());
        Ok(())
    }

    fn put_spectral(&mut self, name: &str, data: &Array2<Complex64>) -> Result<()> {
        self.spectral.insert(name.to_string(), data.clone());
        Ok(())
    }

    fn put_monitoring(&mut self, records: &[MonitorRecord]) -> Result<()> {
        self.monitoring = records.to_vec();
        Ok(())
    }
}
