//! Calculation of the expected crop yield.
use crate::crop::CropType;
use crate::units::{Dimensionless, Hectares, KilogramsPerHectare, Tonnes};

/// Irrigation frequency at which the irrigation multiplier is one
const REFERENCE_IRRIGATION_FREQUENCY: f64 = 3.0;

/// Change in yield per extra irrigation per week
const IRRIGATION_SENSITIVITY: f64 = 0.10;

/// Fertiliser amount (kg/hectare) at which the fertiliser multiplier is one
const REFERENCE_FERTILISER_AMOUNT: f64 = 50.0;

/// Change in yield per extra kg/hectare of fertiliser
const FERTILISER_SENSITIVITY: f64 = 0.005;

/// Scale yield according to how far irrigation deviates from three times per week
pub fn irrigation_multiplier(irrigation_frequency: f64) -> Dimensionless {
    Dimensionless(
        1.0 + (irrigation_frequency - REFERENCE_IRRIGATION_FREQUENCY) * IRRIGATION_SENSITIVITY,
    )
}

/// Scale yield according to how far fertiliser deviates from 50 kg/hectare
pub fn fertiliser_multiplier(fertiliser_amount: KilogramsPerHectare) -> Dimensionless {
    Dimensionless(
        1.0 + (fertiliser_amount.value() - REFERENCE_FERTILISER_AMOUNT) * FERTILISER_SENSITIVITY,
    )
}

/// Calculate the expected yield for the whole area of land.
///
/// With the reference irrigation and fertiliser inputs this is just the crop's base yield
/// multiplied by the land size. The result is never negative.
///
/// # Arguments
///
/// * `crop_type` - The crop being grown
/// * `irrigation_frequency` - Irrigations per week
/// * `fertiliser_amount` - Fertiliser applied
/// * `land_size` - Area under cultivation
pub fn expected_yield(
    crop_type: CropType,
    irrigation_frequency: f64,
    fertiliser_amount: KilogramsPerHectare,
    land_size: Hectares,
) -> Tonnes {
    let yield_per_hectare = crop_type.base_yield()
        * irrigation_multiplier(irrigation_frequency)
        * fertiliser_multiplier(fertiliser_amount);

    (yield_per_hectare * land_size).max(Tonnes(0.0))
}
