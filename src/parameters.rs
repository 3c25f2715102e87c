//! Defines the `SimulationParams` struct, which holds the inputs for a single scenario.
use crate::crop::{CropType, Season};
use crate::units::{Hectares, KilogramsPerHectare, MoneyPerHectare};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::ops::RangeInclusive;

/// Valid range for the number of irrigations per week
const IRRIGATION_FREQUENCY_RANGE: RangeInclusive<u32> = 1..=7;

/// Valid range for fertiliser applied, in kg/hectare
const FERTILISER_AMOUNT_RANGE: RangeInclusive<f64> = 0.0..=100.0;

/// Valid range for pesticides applied, in kg/hectare
const PESTICIDES_RANGE: RangeInclusive<f64> = 0.0..=60.0;

/// Maximum land size in hectares (the lower bound is exclusive of zero)
const MAX_LAND_SIZE: f64 = 10.0;

macro_rules! define_param_default {
    ($name:ident, $type: ty, $value: expr) => {
        const fn $name() -> $type {
            $value
        }
    };
}

define_param_default!(default_irrigation_frequency, u32, 3);
define_param_default!(default_fertiliser_amount, KilogramsPerHectare, KilogramsPerHectare::new(50.0));
define_param_default!(default_pesticides, KilogramsPerHectare, KilogramsPerHectare::new(25.0));
define_param_default!(default_land_size, Hectares, Hectares::new(2.0));
define_param_default!(default_labour_cost, MoneyPerHectare, MoneyPerHectare::new(15000.0));
define_param_default!(default_seed_cost, MoneyPerHectare, MoneyPerHectare::new(5000.0));
define_param_default!(default_machinery, MoneyPerHectare, MoneyPerHectare::new(8000.0));
define_param_default!(default_transportation, MoneyPerHectare, MoneyPerHectare::new(3000.0));

/// The inputs for a farming scenario.
///
/// Fields omitted when deserialising take their default values, while unrecognised fields are an
/// error. Values which are present are never adjusted: call [`SimulationParams::validate`] to check
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationParams {
    /// Number of times the field is irrigated per week
    #[serde(default = "default_irrigation_frequency")]
    pub irrigation_frequency: u32,
    /// Fertiliser applied (kg/hectare)
    #[serde(default = "default_fertiliser_amount")]
    pub fertiliser_amount: KilogramsPerHectare,
    /// Pesticides applied (kg/hectare)
    #[serde(default = "default_pesticides")]
    pub pesticides: KilogramsPerHectare,
    /// The crop being grown
    #[serde(default)]
    pub crop_type: CropType,
    /// The growing season
    #[serde(default)]
    pub season: Season,
    /// Area under cultivation
    #[serde(default = "default_land_size")]
    pub land_size: Hectares,
    /// Cost of labour
    #[serde(default = "default_labour_cost")]
    pub labour_cost: MoneyPerHectare,
    /// Cost of seed
    #[serde(default = "default_seed_cost")]
    pub seed_cost: MoneyPerHectare,
    /// Cost of machinery hire and fuel
    #[serde(default = "default_machinery")]
    pub machinery: MoneyPerHectare,
    /// Cost of transporting the harvest
    #[serde(default = "default_transportation")]
    pub transportation: MoneyPerHectare,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            irrigation_frequency: default_irrigation_frequency(),
            fertiliser_amount: default_fertiliser_amount(),
            pesticides: default_pesticides(),
            crop_type: CropType::default(),
            season: Season::default(),
            land_size: default_land_size(),
            labour_cost: default_labour_cost(),
            seed_cost: default_seed_cost(),
            machinery: default_machinery(),
            transportation: default_transportation(),
        }
    }
}

/// Indicates that a simulation parameter is outside of its valid range
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// The name of the offending field
    pub field: &'static str,
    /// Why the value was rejected, including the valid range
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: String) -> Self {
        Self { field, reason }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid value for {}: {}", self.field, self.reason)
    }
}

/// This is needed so that `ValidationError` can be treated like standard errors are.
impl Error for ValidationError {}

/// Check that a value is finite and lies within `range`
fn check_in_range(
    field: &'static str,
    value: f64,
    range: &RangeInclusive<f64>,
    unit: &str,
) -> Result<(), ValidationError> {
    if value.is_finite() && range.contains(&value) {
        return Ok(());
    }

    Err(ValidationError::new(
        field,
        format!(
            "{value} is outside the valid range of {} to {} {unit}",
            range.start(),
            range.end()
        ),
    ))
}

/// Check that a per-hectare cost is a finite, non-negative number
fn check_cost(field: &'static str, value: MoneyPerHectare) -> Result<(), ValidationError> {
    if value.is_finite() && value >= MoneyPerHectare(0.0) {
        return Ok(());
    }

    Err(ValidationError::new(
        field,
        format!("{value} must be a finite number greater than or equal to zero"),
    ))
}

fn check_irrigation_frequency(value: u32) -> Result<(), ValidationError> {
    if IRRIGATION_FREQUENCY_RANGE.contains(&value) {
        return Ok(());
    }

    Err(ValidationError::new(
        "irrigation_frequency",
        format!(
            "{value} is outside the valid range of {} to {} times per week",
            IRRIGATION_FREQUENCY_RANGE.start(),
            IRRIGATION_FREQUENCY_RANGE.end()
        ),
    ))
}

fn check_land_size(value: Hectares) -> Result<(), ValidationError> {
    if value.is_finite() && value > Hectares(0.0) && value.value() <= MAX_LAND_SIZE {
        return Ok(());
    }

    Err(ValidationError::new(
        "land_size",
        format!("{value} must be greater than 0 and at most {MAX_LAND_SIZE} hectares"),
    ))
}

impl SimulationParams {
    /// Check that every parameter is within its valid range.
    ///
    /// # Returns
    ///
    /// An error describing the first invalid field, in declaration order
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.validation_errors().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Get an error for every parameter which is outside of its valid range
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        [
            check_irrigation_frequency(self.irrigation_frequency),
            check_in_range(
                "fertiliser_amount",
                self.fertiliser_amount.value(),
                &FERTILISER_AMOUNT_RANGE,
                "kg/hectare",
            ),
            check_in_range(
                "pesticides",
                self.pesticides.value(),
                &PESTICIDES_RANGE,
                "kg/hectare",
            ),
            check_land_size(self.land_size),
            check_cost("labour_cost", self.labour_cost),
            check_cost("seed_cost", self.seed_cost),
            check_cost("machinery", self.machinery),
            check_cost("transportation", self.transportation),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect()
    }

    /// A hand-tuned set of inputs which balances yield against cost and environmental impact.
    ///
    /// Irrigation, fertiliser and pesticides are set to moderate levels; the crop, land and costs
    /// are kept from `self`.
    pub fn balanced(&self) -> Self {
        Self {
            irrigation_frequency: 3,
            fertiliser_amount: KilogramsPerHectare(45.0),
            pesticides: KilogramsPerHectare(20.0),
            ..*self
        }
    }
}
