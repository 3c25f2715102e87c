//! The module responsible for writing output data to disk.
use crate::crop::{CropType, Season};
use crate::history::ComparisonHistory;
use crate::simulation::SimulationResult;
use crate::simulation::costs::CostCategory;
use crate::simulation::risk::RiskLevel;
use crate::simulation::suggestions::Suggestion;
use crate::units::{Dimensionless, Hours, Litres, Money, Tonnes};
use anyhow::{Context, Result, ensure};
use serde::Serialize;
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

pub mod metadata;

/// The output file name for the results of each run
const RESULTS_FILE_NAME: &str = "results.csv";

/// The output file name for cost breakdowns
const COST_BREAKDOWN_FILE_NAME: &str = "cost_breakdown.csv";

/// The output file name for suggestions
const SUGGESTIONS_FILE_NAME: &str = "suggestions.csv";

/// The output file name for the comparison history
const HISTORY_FILE_NAME: &str = "history.csv";

/// Get the default output directory for the specified scenario file, inside `results_dir`
pub fn get_output_dir(results_dir: &Path, scenario_file: &Path) -> Result<PathBuf> {
    let name = scenario_file
        .file_stem()
        .context("Scenario file has no name")?
        .to_str()
        .context("Invalid chars in scenario file name")?;

    Ok(results_dir.join(name))
}

/// Create a new output directory, if it doesn't already exist.
///
/// # Arguments
///
/// * `output_dir` - The folder to create
/// * `allow_overwrite` - Whether an existing, non-empty folder may be reused
///
/// # Returns
///
/// Whether existing files in the folder will be overwritten, or an error if the folder already
/// contains files and `allow_overwrite` is false.
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    if output_dir.is_dir() {
        let is_empty = fs::read_dir(output_dir)?.next().is_none();
        if is_empty {
            return Ok(false);
        }

        ensure!(
            allow_overwrite,
            "Output folder already exists and is not empty. Use --overwrite to replace its contents."
        );
        return Ok(true);
    }

    // Try to create the directory, with parents
    fs::create_dir_all(output_dir)?;

    Ok(false)
}

/// Represents a row in the results CSV file
#[derive(Serialize)]
struct ResultRow<'a> {
    label: &'a str,
    crop_type: CropType,
    season: Season,
    expected_yield: Tonnes,
    total_cost: Money,
    revenue: Money,
    profit: Money,
    profit_margin: Dimensionless,
    risk_level: RiskLevel,
    water_usage: Litres,
    water_cost: Money,
    labour_hours: Hours,
    labour_cost_total: Money,
    environmental_impact: Dimensionless,
}

/// Represents a row in the cost breakdown CSV file
#[derive(Serialize)]
struct CostRow<'a> {
    label: &'a str,
    category: CostCategory,
    cost: Money,
}

/// Represents a row in the suggestions CSV file
#[derive(Serialize)]
struct SuggestionRow<'a> {
    label: &'a str,
    suggestion: Suggestion,
}

/// An object for writing simulation results to file
pub struct DataWriter {
    output_path: PathBuf,
    results_writer: csv::Writer<File>,
    costs_writer: csv::Writer<File>,
    suggestions_writer: csv::Writer<File>,
}

impl DataWriter {
    /// Open CSV files to write output data to
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where files will be saved
    pub fn create(output_path: &Path) -> Result<Self> {
        let new_writer = |file_name| {
            let file_path = output_path.join(file_name);
            csv::Writer::from_path(file_path)
        };

        Ok(Self {
            output_path: output_path.to_path_buf(),
            results_writer: new_writer(RESULTS_FILE_NAME)?,
            costs_writer: new_writer(COST_BREAKDOWN_FILE_NAME)?,
            suggestions_writer: new_writer(SUGGESTIONS_FILE_NAME)?,
        })
    }

    /// Write the result of a run to the results, cost breakdown and suggestions files
    pub fn write_result(
        &mut self,
        label: &str,
        crop_type: CropType,
        season: Season,
        result: &SimulationResult,
    ) -> Result<()> {
        self.results_writer.serialize(ResultRow {
            label,
            crop_type,
            season,
            expected_yield: result.expected_yield,
            total_cost: result.total_cost,
            revenue: result.revenue,
            profit: result.profit,
            profit_margin: result.profit_margin,
            risk_level: result.risk_level,
            water_usage: result.water_usage,
            water_cost: result.water_cost,
            labour_hours: result.labour_hours,
            labour_cost_total: result.labour_cost_total,
            environmental_impact: result.environmental_impact,
        })?;

        for (category, cost) in result.cost_breakdown.iter() {
            self.costs_writer.serialize(CostRow {
                label,
                category,
                cost,
            })?;
        }

        for suggestion in &result.suggestions {
            self.suggestions_writer.serialize(SuggestionRow {
                label,
                suggestion: *suggestion,
            })?;
        }

        Ok(())
    }

    /// Write the comparison history to a CSV file, replacing any previous contents
    pub fn write_history(&self, history: &ComparisonHistory) -> Result<()> {
        let mut writer = csv::Writer::from_path(self.output_path.join(HISTORY_FILE_NAME))?;
        for record in history {
            writer.serialize(record)?;
        }
        writer.flush()?;

        Ok(())
    }

    /// Flush the underlying streams
    pub fn flush(&mut self) -> Result<()> {
        self.results_writer.flush()?;
        self.costs_writer.flush()?;
        self.suggestions_writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{default_params, stressed_params};
    use crate::history::ComparisonRecord;
    use crate::parameters::SimulationParams;
    use crate::simulation::run_simulation;
    use itertools::Itertools;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::tempdir;

    /// Read all lines from a CSV file in `dir`
    fn read_lines(dir: &Path, file_name: &str) -> Vec<String> {
        fs::read_to_string(dir.join(file_name))
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_get_output_dir() {
        let dir = get_output_dir(
            Path::new("agrisim_results"),
            Path::new("some/where/my_farm.toml"),
        )
        .unwrap();
        assert_eq!(dir, PathBuf::from("agrisim_results/my_farm"));
    }

    #[test]
    fn test_create_output_directory_new() {
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("a").join("b");
        assert!(!create_output_directory(&output_dir, false).unwrap());
        assert!(output_dir.is_dir());
    }

    #[test]
    fn test_create_output_directory_existing() {
        let dir = tempdir().unwrap();

        // Empty folders can be reused
        assert!(!create_output_directory(dir.path(), false).unwrap());

        {
            let mut file = File::create(dir.path().join("results.csv")).unwrap();
            writeln!(file, "old").unwrap();
        }
        assert!(create_output_directory(dir.path(), false).is_err());
        assert!(create_output_directory(dir.path(), true).unwrap());
    }

    #[rstest]
    fn test_write_result(default_params: SimulationParams) {
        let result = run_simulation(&default_params).unwrap();
        let dir = tempdir().unwrap();

        {
            let mut writer = DataWriter::create(dir.path()).unwrap();
            writer
                .write_result("Baseline", CropType::Wheat, Season::Rabi, &result)
                .unwrap();
            writer.flush().unwrap();
        }

        let results = read_lines(dir.path(), RESULTS_FILE_NAME);
        assert_eq!(results.len(), 2);
        assert!(results[0].starts_with("label,crop_type,season,expected_yield,total_cost"));
        assert!(results[1].starts_with("Baseline,wheat,rabi,7.0,75000.0,175000.0,100000.0"));

        let costs = read_lines(dir.path(), COST_BREAKDOWN_FILE_NAME);
        assert_eq!(costs[0], "label,category,cost");
        assert_eq!(costs[2], "Baseline,fertiliser,2500.0");
        assert_eq!(costs[4], "Baseline,irrigation,3000.0");
        assert_eq!(costs.len(), 8);

        let suggestions = read_lines(dir.path(), SUGGESTIONS_FILE_NAME);
        assert_eq!(
            suggestions,
            [
                "label,suggestion".to_string(),
                format!("Baseline,{}", Suggestion::Balanced.message())
            ]
        );
    }

    #[rstest]
    fn test_write_history(default_params: SimulationParams, stressed_params: SimulationParams) {
        let mut history = ComparisonHistory::new();
        for (label, params) in [("a", default_params), ("b", stressed_params)] {
            let result = run_simulation(&params).unwrap();
            history.push(ComparisonRecord::new(label.into(), &result));
        }

        let dir = tempdir().unwrap();
        DataWriter::create(dir.path())
            .unwrap()
            .write_history(&history)
            .unwrap();

        let lines = read_lines(dir.path(), HISTORY_FILE_NAME);
        assert_eq!(
            lines[0],
            "label,yield,profit,cost,risk_level,water_usage,environmental_impact"
        );
        assert_eq!(
            lines[1..]
                .iter()
                .map(|line| line.split(',').next().unwrap())
                .collect_vec(),
            ["a", "b"]
        );
        assert!(lines[2].contains(",high,"));
    }
}
