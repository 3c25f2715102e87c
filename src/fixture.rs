//! Fixtures for tests

use crate::crop::{CropType, Season};
use crate::parameters::SimulationParams;
use crate::units::{Hectares, KilogramsPerHectare};
use rstest::fixture;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

/// Parameters for a fresh scenario
#[fixture]
pub fn default_params() -> SimulationParams {
    SimulationParams::default()
}

/// A single hectare which is overwatered and has too much fertiliser and pesticide applied
#[fixture]
pub fn stressed_params() -> SimulationParams {
    SimulationParams {
        irrigation_frequency: 6,
        fertiliser_amount: KilogramsPerHectare(85.0),
        pesticides: KilogramsPerHectare(45.0),
        crop_type: CropType::Wheat,
        season: Season::Rabi,
        land_size: Hectares(1.0),
        ..SimulationParams::default()
    }
}
