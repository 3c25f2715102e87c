//! Crops and growing seasons which can be simulated.
use crate::units::{MoneyPerTonne, TonnesPerHectare};
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};
use strum::EnumIter;

/// A crop which can be grown in a scenario.
///
/// The crop selects both the baseline yield and the market price used by the model.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    SerializeLabeledStringEnum,
    DeserializeLabeledStringEnum,
)]
#[allow(missing_docs)]
pub enum CropType {
    #[default]
    #[string = "wheat"]
    Wheat,
    #[string = "rice"]
    Rice,
    #[string = "corn"]
    Corn,
    #[string = "soybean"]
    Soybean,
    #[string = "cotton"]
    Cotton,
    #[string = "sugarcane"]
    Sugarcane,
}

impl CropType {
    /// The yield per hectare achieved with the default irrigation and fertiliser inputs
    pub fn base_yield(self) -> TonnesPerHectare {
        let value = match self {
            Self::Wheat => 3.5,
            Self::Rice => 4.2,
            Self::Corn => 5.8,
            Self::Soybean => 2.1,
            Self::Cotton => 1.8,
            Self::Sugarcane => 75.0,
        };
        TonnesPerHectare(value)
    }

    /// The price at which the harvested crop is sold
    pub fn price(self) -> MoneyPerTonne {
        let value = match self {
            Self::Wheat => 25000.0,
            Self::Rice => 28000.0,
            Self::Corn => 22000.0,
            Self::Soybean => 45000.0,
            Self::Cotton => 55000.0,
            Self::Sugarcane => 3200.0,
        };
        MoneyPerTonne(value)
    }
}

/// The cropping season.
///
/// This is recorded with each scenario but doesn't currently affect any of the calculations.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    SerializeLabeledStringEnum,
    DeserializeLabeledStringEnum,
)]
pub enum Season {
    /// Winter crop, sown around October
    #[default]
    #[string = "rabi"]
    Rabi,
    /// Monsoon crop, sown around June
    #[string = "kharif"]
    Kharif,
    /// Short summer crop between rabi and kharif
    #[string = "zaid"]
    Zaid,
}
