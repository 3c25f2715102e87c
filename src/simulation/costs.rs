//! Calculation of the costs of a scenario.
use crate::parameters::SimulationParams;
use crate::units::{Dimensionless, Money, MoneyPerHectare, MoneyPerKilogram};
use serde::Serialize;
use serde_string_enum::SerializeLabeledStringEnum;
use strum::{EnumIter, IntoEnumIterator};

/// Price of fertiliser
const FERTILISER_PRICE: MoneyPerKilogram = MoneyPerKilogram::new(25.0);

/// Price of pesticides
const PESTICIDE_PRICE: MoneyPerKilogram = MoneyPerKilogram::new(150.0);

/// Cost per hectare of a single weekly irrigation
const IRRIGATION_COST: MoneyPerHectare = MoneyPerHectare::new(500.0);

/// A category of cost in a [`CostBreakdown`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, SerializeLabeledStringEnum)]
#[allow(missing_docs)]
pub enum CostCategory {
    #[string = "seeds"]
    Seeds,
    #[string = "fertiliser"]
    Fertiliser,
    #[string = "pesticides"]
    Pesticides,
    #[string = "irrigation"]
    Irrigation,
    #[string = "labour"]
    Labour,
    #[string = "machinery"]
    Machinery,
    #[string = "transportation"]
    Transportation,
}

/// The total cost of each input over the whole area of land
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CostBreakdown {
    /// Seed
    pub seeds: Money,
    /// Fertiliser
    pub fertiliser: Money,
    /// Pesticides
    pub pesticides: Money,
    /// Irrigation
    pub irrigation: Money,
    /// Labour
    pub labour: Money,
    /// Machinery
    pub machinery: Money,
    /// Transportation of the harvest
    pub transportation: Money,
}

impl CostBreakdown {
    /// Calculate the cost of every input for the given scenario.
    ///
    /// Each per-hectare cost is scaled by the land size. Fertiliser, pesticides and irrigation are
    /// additionally scaled by the amount used.
    pub fn from_params(params: &SimulationParams) -> Self {
        let land_size = params.land_size;
        Self {
            seeds: params.seed_cost * land_size,
            fertiliser: params.fertiliser_amount * land_size * FERTILISER_PRICE,
            pesticides: params.pesticides * land_size * PESTICIDE_PRICE,
            irrigation: Dimensionless::from(params.irrigation_frequency)
                * land_size
                * IRRIGATION_COST,
            labour: params.labour_cost * land_size,
            machinery: params.machinery * land_size,
            transportation: params.transportation * land_size,
        }
    }

    /// Get the cost for the given category
    pub fn get(&self, category: CostCategory) -> Money {
        match category {
            CostCategory::Seeds => self.seeds,
            CostCategory::Fertiliser => self.fertiliser,
            CostCategory::Pesticides => self.pesticides,
            CostCategory::Irrigation => self.irrigation,
            CostCategory::Labour => self.labour,
            CostCategory::Machinery => self.machinery,
            CostCategory::Transportation => self.transportation,
        }
    }

    /// Iterate over the cost of every category, in a fixed order
    pub fn iter(&self) -> impl Iterator<Item = (CostCategory, Money)> + '_ {
        CostCategory::iter().map(|category| (category, self.get(category)))
    }

    /// The sum of all the costs
    pub fn total(&self) -> Money {
        self.iter().map(|(_, cost)| cost).sum()
    }
}
