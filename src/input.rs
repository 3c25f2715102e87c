//! Common routines for handling input data.
use crate::parameters::SimulationParams;
use anyhow::{Context, Result, ensure};
use itertools::Itertools;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::fs;
use std::path::Path;

/// Read a TOML file at the specified path.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
///
/// # Returns
///
/// * The deserialised TOML data or an error if the file could not be read or parsed.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(file_path))?;
    Ok(toml_data)
}

/// Format an error message to include the file path. To be used with `anyhow::Context`.
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

/// A named set of parameters to be simulated
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Label used in output files and the comparison history
    pub label: Option<String>,
    /// The inputs to the simulation
    #[serde(default)]
    pub params: SimulationParams,
}

impl Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.label {
            Some(label) => write!(f, "'{label}'"),
            None => write!(f, "<unlabelled>"),
        }
    }
}

/// Represents the contents of a scenario file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioFile {
    #[serde(default, rename = "scenario")]
    scenarios: Vec<Scenario>,
}

/// Read scenarios from a TOML file and check that their parameters are valid.
///
/// # Arguments
///
/// * `file_path` - Path to the scenario file
///
/// # Returns
///
/// The scenarios, in the order they appear in the file, or an error if the file is invalid, is
/// empty or any scenario has invalid parameters.
pub fn load_scenarios(file_path: &Path) -> Result<Vec<Scenario>> {
    let file: ScenarioFile = read_toml(file_path)?;
    ensure!(
        !file.scenarios.is_empty(),
        "{}: No scenarios found",
        input_err_msg(file_path)
    );

    for (idx, scenario) in file.scenarios.iter().enumerate() {
        let errors = scenario.params.validation_errors();
        ensure!(
            errors.is_empty(),
            "{}: Scenario {} ({scenario}) has invalid parameters: {}",
            input_err_msg(file_path),
            idx + 1,
            errors.iter().join("; ")
        );
    }

    Ok(file.scenarios)
}

/// Format a set of parameters as a scenario file containing a single scenario
pub fn params_to_scenario_toml(label: &str, params: &SimulationParams) -> Result<String> {
    let params_toml = toml::to_string(params).context("Could not convert parameters to TOML")?;
    Ok(format!(
        "[[scenario]]\nlabel = {}\n\n[scenario.params]\n{params_toml}",
        toml::Value::from(label)
    ))
}
