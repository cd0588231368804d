//! Shared helpers for CLI commands.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;
use serde::Serialize;

use ansatz_ir::Circuit;
use ansatz_hal::{BackendConfiguration, ConfiguredBackend, PulseBackend, SimulatorBackend};

/// Serialization format for command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// A built circuit with its headline statistics.
#[derive(Debug, Serialize)]
pub struct CircuitReport<'a> {
    pub name: &'a str,
    pub num_qubits: u32,
    pub depth: usize,
    pub count_ops: BTreeMap<String, usize>,
    pub parameters: Vec<String>,
    pub circuit: &'a Circuit,
}

impl<'a> CircuitReport<'a> {
    pub fn new(circuit: &'a Circuit) -> Self {
        Self {
            name: circuit.name(),
            num_qubits: circuit.num_qubits(),
            depth: circuit.depth(),
            count_ops: circuit.count_ops(),
            parameters: circuit
                .parameters()
                .iter()
                .map(|p| p.name().to_string())
                .collect(),
            circuit,
        }
    }

    /// Print a one-line summary to stderr.
    pub fn announce(&self) {
        eprintln!(
            "{} Built {}: {} qubits, depth {}, {} parameters",
            style("✓").green().bold(),
            style(self.name).cyan(),
            self.num_qubits,
            self.depth,
            self.parameters.len()
        );
    }
}

/// Serialize `value` and write it to `output`, or stdout.
pub fn write_output<T: Serialize>(
    value: &T,
    format: OutputFormat,
    output: Option<&str>,
) -> Result<()> {
    let text = render(value, format)?;
    match output {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("Failed to write file: {path}"))?;
            eprintln!(
                "{} Wrote {}",
                style("✓").green().bold(),
                style(path).green()
            );
        }
        None => println!("{}", text.trim_end()),
    }
    Ok(())
}

/// Serialize `value` in `format`.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
        }
        OutputFormat::Yaml => {
            serde_yaml_ng::to_string(value).context("Failed to serialize output as YAML")
        }
    }
}

/// Load a backend from a configuration file, or fall back to the pulse
/// simulator sized for `num_qubits`.
pub fn load_backend(path: Option<&Path>, num_qubits: u32) -> Result<Arc<dyn PulseBackend>> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Backend file not found: {}", path.display());
            }
            let config = BackendConfiguration::from_file(path)
                .with_context(|| format!("Failed to load backend: {}", path.display()))?;
            Ok(Arc::new(ConfiguredBackend::new(config)?))
        }
        None => Ok(Arc::new(SimulatorBackend::new(num_qubits))),
    }
}

/// Parse a `CONTROL:TARGET` qubit pair.
pub fn parse_pair(s: &str) -> Result<(u32, u32), String> {
    let (c, t) = s
        .split_once(':')
        .ok_or_else(|| format!("expected CONTROL:TARGET, got '{s}'"))?;
    let c = c
        .trim()
        .parse()
        .map_err(|e| format!("invalid control qubit '{c}': {e}"))?;
    let t = t
        .trim()
        .parse()
        .map_err(|e| format!("invalid target qubit '{t}': {e}"))?;
    Ok((c, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("0:1"), Ok((0, 1)));
        assert_eq!(parse_pair(" 3 : 2 "), Ok((3, 2)));
        assert!(parse_pair("0-1").is_err());
        assert!(parse_pair("a:1").is_err());
    }

    #[test]
    fn test_render_formats() {
        let value = serde_json::json!({ "num_qubits": 2 });
        assert!(render(&value, OutputFormat::Json).unwrap().contains("\"num_qubits\": 2"));
        assert_eq!(render(&value, OutputFormat::Yaml).unwrap(), "num_qubits: 2\n");
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let path = path.to_str().unwrap();
        write_output(&vec![1, 2], OutputFormat::Json, Some(path)).unwrap();
        let back: Vec<i32> = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(back, vec![1, 2]);
    }

    #[test]
    fn test_load_backend_defaults_to_simulator() {
        let backend = load_backend(None, 3).unwrap();
        assert_eq!(backend.num_qubits(), 3);
        assert!(load_backend(Some(Path::new("/nonexistent/lab.yaml")), 3).is_err());
    }
}
