//! General functions related to finance.
use crate::units::{Dimensionless, Money, MoneyPerTonne, Tonnes};

/// Calculates the revenue from selling the harvest.
pub fn revenue(expected_yield: Tonnes, price: MoneyPerTonne) -> Money {
    expected_yield * price
}

/// Calculates profit, which is negative for a loss-making scenario.
pub fn profit(revenue: Money, total_cost: Money) -> Money {
    revenue - total_cost
}

/// Calculates profit as a percentage of revenue.
///
/// If there is no revenue the margin is defined as zero.
pub fn profit_margin(profit: Money, revenue: Money) -> Dimensionless {
    if revenue > Money(0.0) {
        profit / revenue * Dimensionless(100.0)
    } else {
        Dimensionless(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[test]
    fn test_revenue() {
        assert_eq!(revenue(Tonnes(7.0), MoneyPerTonne(25000.0)), Money(175000.0));
    }

    #[rstest]
    #[case(175000.0, 75000.0, 100000.0)]
    #[case(1000.0, 2500.0, -1500.0)] // Losses aren't clamped
    fn test_profit(#[case] revenue: f64, #[case] cost: f64, #[case] expected: f64) {
        assert_eq!(profit(Money(revenue), Money(cost)), Money(expected));
    }

    #[rstest]
    #[case(100000.0, 175000.0, 57.142857142857146)]
    #[case(-1500.0, 1000.0, -150.0)]
    #[case(-75000.0, 0.0, 0.0)] // Zero revenue
    #[case(0.0, 0.0, 0.0)]
    fn test_profit_margin(#[case] profit: f64, #[case] revenue: f64, #[case] expected: f64) {
        assert_approx_eq!(
            Dimensionless,
            profit_margin(Money(profit), Money(revenue)),
            Dimensionless(expected),
            epsilon = 1e-9
        );
    }
}
