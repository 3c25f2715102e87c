//! Heuristic scoring of agronomic risk and environmental impact, plus resource use.
use crate::parameters::SimulationParams;
use crate::units::{
    Dimensionless, Hours, HoursPerHectare, KilogramsPerHectare, Litres, LitresPerHectare, Money,
    MoneyPerLitre,
};
use serde::Serialize;
use serde_string_enum::SerializeLabeledStringEnum;

/// Water used per hectare for a single weekly irrigation
const WATER_PER_IRRIGATION: LitresPerHectare = LitresPerHectare::new(1000.0);

/// Price of water
const WATER_PRICE: MoneyPerLitre = MoneyPerLitre::new(0.02);

/// Labour required per hectare
const LABOUR_HOURS: HoursPerHectare = HoursPerHectare::new(200.0);

/// The upper bound of the environmental impact index
const MAX_ENVIRONMENTAL_IMPACT: f64 = 100.0;

/// How risky a scenario is, based on a simple tally of warning signs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeLabeledStringEnum)]
pub enum RiskLevel {
    /// No warning signs
    #[string = "low"]
    Low,
    /// One or two points
    #[string = "medium"]
    Medium,
    /// Three or more points
    #[string = "high"]
    High,
}

impl RiskLevel {
    /// Bucket a risk score
    pub fn from_score(score: u32) -> Self {
        match score {
            0 => Self::Low,
            1 | 2 => Self::Medium,
            _ => Self::High,
        }
    }
}

/// Tally up the warning signs in a scenario.
///
/// Under-irrigating counts double, as crop failure is more likely than with any of the other
/// conditions.
pub fn risk_score(params: &SimulationParams) -> u32 {
    let mut score = 0;
    if params.irrigation_frequency < 2 {
        score += 2;
    }
    if params.irrigation_frequency > 5 {
        score += 1;
    }
    if params.fertiliser_amount > KilogramsPerHectare(80.0) {
        score += 1;
    }
    if params.pesticides > KilogramsPerHectare(40.0) {
        score += 1;
    }

    score
}

/// Classify the risk of a scenario
pub fn risk_level(params: &SimulationParams) -> RiskLevel {
    RiskLevel::from_score(risk_score(params))
}

/// An index between 0 and 100 of the harm done by the inputs to a scenario
pub fn environmental_impact(params: &SimulationParams) -> Dimensionless {
    let raw = params.fertiliser_amount.value() * 0.8
        + params.pesticides.value() * 1.2
        + f64::from(params.irrigation_frequency) * 5.0;

    Dimensionless(raw.clamp(0.0, MAX_ENVIRONMENTAL_IMPACT))
}

/// Water consumption and labour requirements of a scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResourceUse {
    /// Water used over the whole area
    pub water_usage: Litres,
    /// What the water costs
    pub water_cost: Money,
    /// Hours of labour required
    pub labour_hours: Hours,
}

impl ResourceUse {
    /// Calculate resource use from the parameters of a scenario
    pub fn from_params(params: &SimulationParams) -> Self {
        let water_usage =
            Dimensionless::from(params.irrigation_frequency) * params.land_size * WATER_PER_IRRIGATION;

        Self {
            water_usage,
            water_cost: water_usage * WATER_PRICE,
            labour_hours: params.land_size * LABOUR_HOURS,
        }
    }
}
