//! Rule-based advice on how a scenario could be improved.
use crate::parameters::SimulationParams;
use crate::units::KilogramsPerHectare;
use serde::{Serialize, Serializer};
use std::fmt;

/// A piece of advice about the inputs to a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suggestion {
    /// Irrigating more than four times a week
    ReduceIrrigation,
    /// More than 70 kg/hectare of fertiliser
    ReduceFertiliser,
    /// More than 35 kg/hectare of pesticides
    ReducePesticides,
    /// None of the other rules applied
    Balanced,
}

impl Suggestion {
    /// The advice to show to the user
    pub fn message(self) -> &'static str {
        match self {
            Self::ReduceIrrigation => {
                "Consider reducing irrigation frequency to avoid overwatering and waterlogging."
            }
            Self::ReduceFertiliser => {
                "Consider reducing fertiliser to avoid damaging the soil and to cut costs."
            }
            Self::ReducePesticides => {
                "Consider reducing pesticide use or switching to organic pest control."
            }
            Self::Balanced => "The current parameters look balanced. Keep monitoring crop health.",
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Serialize for Suggestion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// A rule which may produce a suggestion for a scenario
struct Rule {
    applies: fn(&SimulationParams) -> bool,
    suggestion: Suggestion,
}

/// The rules, in the order in which their suggestions are reported
const RULES: [Rule; 3] = [
    Rule {
        applies: |params| params.irrigation_frequency > 4,
        suggestion: Suggestion::ReduceIrrigation,
    },
    Rule {
        applies: |params| params.fertiliser_amount > KilogramsPerHectare(70.0),
        suggestion: Suggestion::ReduceFertiliser,
    },
    Rule {
        applies: |params| params.pesticides > KilogramsPerHectare(35.0),
        suggestion: Suggestion::ReducePesticides,
    },
];

/// Get suggestions for improving a scenario.
///
/// Every rule which applies contributes one suggestion, in a fixed order. If no rule applies, the
/// result is a single [`Suggestion::Balanced`].
pub fn suggest(params: &SimulationParams) -> Vec<Suggestion> {
    let suggestions: Vec<_> = RULES
        .iter()
        .filter(|rule| (rule.applies)(params))
        .map(|rule| rule.suggestion)
        .collect();

    if suggestions.is_empty() {
        vec![Suggestion::Balanced]
    } else {
        suggestions
    }
}
