//! Common functionality for AgriSim, a simulator for the yield and economics of farming scenarios.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod cli;
pub mod crop;
pub mod finance;
pub mod history;
pub mod input;
pub mod log;
pub mod output;
pub mod parameters;
pub mod settings;
pub mod simulation;
pub mod units;

#[cfg(test)]
mod fixture;

/// Get the folder in which program-wide configuration files are stored.
///
/// Falls back to the current directory if the platform has no configuration folder.
pub fn get_agrisim_config_dir() -> PathBuf {
    let Some(mut dir) = dirs::config_dir() else {
        return PathBuf::from(".");
    };
    dir.push("agrisim");

    dir
}
