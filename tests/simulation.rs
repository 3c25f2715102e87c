//! End-to-end checks of the simulation engine through its public interface.
use agrisim::crop::CropType;
use agrisim::finance::{profit, profit_margin, revenue};
use agrisim::history::HISTORY_CAPACITY;
use agrisim::parameters::SimulationParams;
use agrisim::simulation::risk::RiskLevel;
use agrisim::simulation::suggestions::Suggestion;
use agrisim::simulation::yield_model::expected_yield;
use agrisim::simulation::{Simulator, run_simulation};
use agrisim::units::{Dimensionless, Hectares, KilogramsPerHectare, Money, Tonnes};

#[test]
fn test_default_scenario() {
    let result = run_simulation(&Simulator::reset_parameters()).unwrap();
    assert_eq!(result.expected_yield, Tonnes(7.0));
    assert_eq!(result.cost_breakdown.irrigation, Money(3000.0));
    assert_eq!(result.cost_breakdown.fertiliser, Money(2500.0));
    assert_eq!(result.suggestions, [Suggestion::Balanced]);
}

#[test]
fn test_overwatered_and_overfertilised_scenario() {
    let params = SimulationParams {
        irrigation_frequency: 6,
        fertiliser_amount: KilogramsPerHectare(85.0),
        pesticides: KilogramsPerHectare(45.0),
        land_size: Hectares(1.0),
        ..SimulationParams::default()
    };
    let result = run_simulation(&params).unwrap();
    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(
        result.suggestions,
        [
            Suggestion::ReduceIrrigation,
            Suggestion::ReduceFertiliser,
            Suggestion::ReducePesticides
        ]
    );
}

/// Valid parameters can't drive yield to zero, so the model functions are combined directly
#[test]
fn test_zero_yield_gives_zero_margin() {
    let crop = CropType::Soybean;
    let zero_yield = expected_yield(crop, -20.0, KilogramsPerHectare(50.0), Hectares(1.0));
    assert_eq!(zero_yield, Tonnes(0.0));

    let revenue = revenue(zero_yield, crop.price());
    assert_eq!(revenue, Money(0.0));
    let profit = profit(revenue, Money(1000.0));
    assert_eq!(profit, Money(-1000.0));
    assert_eq!(profit_margin(profit, revenue), Dimensionless(0.0));
}

#[test]
fn test_history_keeps_most_recent_runs() {
    let mut simulator = Simulator::new();
    for crop in [
        CropType::Wheat,
        CropType::Rice,
        CropType::Corn,
        CropType::Soybean,
        CropType::Cotton,
        CropType::Sugarcane,
    ] {
        let params = SimulationParams {
            crop_type: crop,
            ..SimulationParams::default()
        };
        simulator.run_labelled(crop.to_string(), params).unwrap();
    }

    let labels: Vec<_> = simulator
        .history()
        .iter()
        .map(|record| record.label.clone())
        .collect();
    assert_eq!(labels.len(), HISTORY_CAPACITY);
    assert_eq!(labels, ["rice", "corn", "soybean", "cotton", "sugarcane"]);
}
