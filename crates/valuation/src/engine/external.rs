//! External value: revenue earned from customers over three years.
//!
//! Two projection methods are supported. The market-sizing method narrows the
//! total addressable market to a serviceable and then an obtainable share; the
//! bottom-up method multiplies per-year customer counts by the deal size. When
//! all three bottom-up years are known they replace the market-sizing figure.
//! Customer economics (LTV, LTV:CAC, payback) and go-to-market spend are
//! derived alongside.

use crate::engine::internal::MONTHS_PER_YEAR;
use crate::engine::{finite, fraction};
use crate::inputs::ValuationInput;

pub const PROJECTION_YEARS: f64 = 3.0;

/// Result of the external value stage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExternalValue {
    /// Gross three-year revenue (bottom-up when complete, else market sizing).
    pub three_year_revenue_projection: Option<f64>,
    pub year_revenues: [Option<f64>; 3],
    pub net_three_year_revenue: Option<f64>,
    pub customer_ltv: Option<f64>,
    pub ltv_cac_ratio: Option<f64>,
    pub customer_payback_months: Option<f64>,
}

impl ExternalValue {
    /// Revenue carried into the blend: net when known, else gross.
    pub fn headline(&self) -> Option<f64> {
        self.net_three_year_revenue.or(self.three_year_revenue_projection)
    }
}

/// Runs every external calculation against `input`.
pub fn external_value(input: &ValuationInput) -> ExternalValue {
    let deal = input.average_deal_size;
    let customers = [input.year_1_customers, input.year_2_customers, input.year_3_customers];
    let year_revenues = customers.map(|count| yearly_revenue(count, deal));

    let market_sized = market_sizing_revenue(
        input.total_potential_customers,
        input.serviceable_percent,
        input.achievable_market_share_percent,
        deal,
    );
    let three_year_revenue_projection = match bottom_up_revenue(year_revenues) {
        Some(total) => {
            tracing::trace!(total, "bottom-up projection replaces market sizing");
            Some(total)
        }
        None => market_sized,
    };

    let customer_ltv = customer_ltv(
        deal,
        input.gross_margin_percent,
        lifetime_months(input.expected_customer_lifetime_months, input.monthly_churn_rate_percent),
    );

    ExternalValue {
        three_year_revenue_projection,
        year_revenues,
        net_three_year_revenue: net_three_year_revenue(
            three_year_revenue_projection,
            customers,
            input.customer_acquisition_cost,
            input.annual_marketing_spend,
            input.annual_sales_team_cost,
        ),
        customer_ltv,
        ltv_cac_ratio: ltv_cac_ratio(customer_ltv, input.customer_acquisition_cost),
        customer_payback_months: payback_months(
            input.customer_acquisition_cost,
            deal,
            input.gross_margin_percent,
        ),
    }
}

// ---------------------------------------------------------------------------
// Revenue projection
// ---------------------------------------------------------------------------

/// TAM → SAM → SOM, times deal size, times three years.
pub fn market_sizing_revenue(
    total_potential_customers: Option<u64>,
    serviceable_percent: Option<f64>,
    achievable_market_share_percent: Option<f64>,
    average_deal_size: Option<f64>,
) -> Option<f64> {
    let serviceable = total_potential_customers? as f64 * fraction(serviceable_percent?);
    let obtainable = serviceable * fraction(achievable_market_share_percent?);
    finite(obtainable * average_deal_size? * PROJECTION_YEARS)
}

/// Revenue for one projection year.
pub fn yearly_revenue(customers: Option<u64>, average_deal_size: Option<f64>) -> Option<f64> {
    finite(customers? as f64 * average_deal_size?)
}

/// Sum of the three yearly revenues, only when all three are known.
pub fn bottom_up_revenue(year_revenues: [Option<f64>; 3]) -> Option<f64> {
    let [y1, y2, y3] = year_revenues;
    finite(y1? + y2? + y3?)
}

/// Gross projection less acquisition cost for every projected customer and
/// three years of marketing and sales spend. Missing cost terms count as zero.
pub fn net_three_year_revenue(
    gross: Option<f64>,
    year_customers: [Option<u64>; 3],
    customer_acquisition_cost: Option<f64>,
    annual_marketing_spend: Option<f64>,
    annual_sales_team_cost: Option<f64>,
) -> Option<f64> {
    let gross = gross?;
    let total_customers: u64 = year_customers.into_iter().flatten().sum();
    let acquisition = total_customers as f64 * customer_acquisition_cost.unwrap_or(0.0);
    let go_to_market = PROJECTION_YEARS
        * (annual_marketing_spend.unwrap_or(0.0) + annual_sales_team_cost.unwrap_or(0.0));
    finite(gross - acquisition - go_to_market)
}

// ---------------------------------------------------------------------------
// Customer economics
// ---------------------------------------------------------------------------

/// Customer lifetime in months.
///
/// A positive churn rate wins over an explicit lifetime: `floor(1 / churn)`.
/// A lifetime that resolves to zero months is treated as unknown.
pub fn lifetime_months(
    expected_customer_lifetime_months: Option<u32>,
    monthly_churn_rate_percent: Option<f64>,
) -> Option<f64> {
    let months = match monthly_churn_rate_percent {
        Some(churn) if churn > 0.0 => (1.0 / fraction(churn)).floor(),
        _ => f64::from(expected_customer_lifetime_months?),
    };
    (months > 0.0).then_some(months)
}

/// `deal size × margin% × lifetime in years`.
pub fn customer_ltv(
    average_deal_size: Option<f64>,
    gross_margin_percent: Option<f64>,
    lifetime_months: Option<f64>,
) -> Option<f64> {
    finite(average_deal_size? * fraction(gross_margin_percent?) * (lifetime_months? / MONTHS_PER_YEAR))
}

/// LTV over CAC. `None` unless CAC is positive.
pub fn ltv_cac_ratio(customer_ltv: Option<f64>, customer_acquisition_cost: Option<f64>) -> Option<f64> {
    let cac = customer_acquisition_cost.filter(|cac| *cac > 0.0)?;
    finite(customer_ltv? / cac)
}

/// Months of gross margin needed to earn back CAC. `None` unless the monthly
/// margin is positive.
pub fn payback_months(
    customer_acquisition_cost: Option<f64>,
    average_deal_size: Option<f64>,
    gross_margin_percent: Option<f64>,
) -> Option<f64> {
    let cac = customer_acquisition_cost?;
    let monthly_margin = Some(average_deal_size? * fraction(gross_margin_percent?) / MONTHS_PER_YEAR)
        .filter(|margin| *margin > 0.0)?;
    finite(cac / monthly_margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn market_sized_input() -> ValuationInput {
        ValuationInput {
            total_potential_customers: Some(10_000),
            serviceable_percent: Some(50.0),
            achievable_market_share_percent: Some(10.0),
            average_deal_size: Some(1_000.0),
            ..ValuationInput::default()
        }
    }

    #[test]
    fn market_sizing_narrows_tam_to_som() {
        // 10k × 50% × 10% = 500 customers × $1k × 3 years
        assert_eq!(
            market_sizing_revenue(Some(10_000), Some(50.0), Some(10.0), Some(1_000.0)),
            Some(1_500_000.0)
        );
    }

    #[rstest]
    #[case(None, Some(50.0), Some(10.0), Some(1_000.0))]
    #[case(Some(10_000), None, Some(10.0), Some(1_000.0))]
    #[case(Some(10_000), Some(50.0), None, Some(1_000.0))]
    #[case(Some(10_000), Some(50.0), Some(10.0), None)]
    fn market_sizing_needs_all_four_inputs(
        #[case] customers: Option<u64>,
        #[case] serviceable: Option<f64>,
        #[case] share: Option<f64>,
        #[case] deal: Option<f64>,
    ) {
        assert_eq!(market_sizing_revenue(customers, serviceable, share, deal), None);
    }

    #[test]
    fn complete_bottom_up_projection_overrides_market_sizing() {
        let input = ValuationInput {
            year_1_customers: Some(10),
            year_2_customers: Some(20),
            year_3_customers: Some(40),
            ..market_sized_input()
        };
        let value = external_value(&input);

        assert_eq!(value.year_revenues, [Some(10_000.0), Some(20_000.0), Some(40_000.0)]);
        assert_eq!(value.three_year_revenue_projection, Some(70_000.0));
    }

    #[test]
    fn partial_bottom_up_projection_keeps_market_sizing() {
        let input = ValuationInput {
            year_1_customers: Some(10),
            year_3_customers: Some(40),
            ..market_sized_input()
        };
        let value = external_value(&input);

        assert_eq!(value.year_revenues, [Some(10_000.0), None, Some(40_000.0)]);
        assert_eq!(value.three_year_revenue_projection, Some(1_500_000.0));
    }

    #[test]
    fn bottom_up_alone_is_enough_for_a_projection() {
        let input = ValuationInput {
            average_deal_size: Some(500.0),
            year_1_customers: Some(1),
            year_2_customers: Some(2),
            year_3_customers: Some(3),
            ..ValuationInput::default()
        };
        assert_eq!(external_value(&input).three_year_revenue_projection, Some(3_000.0));
    }

    #[test]
    fn churn_overrides_explicit_lifetime() {
        assert_eq!(lifetime_months(Some(24), Some(10.0)), Some(10.0));
        assert_eq!(lifetime_months(Some(24), Some(3.0)), Some(33.0));
        assert_eq!(lifetime_months(Some(24), Some(0.0)), Some(24.0));
        assert_eq!(lifetime_months(Some(24), None), Some(24.0));
    }

    #[test]
    fn zero_lifetime_is_unknown() {
        assert_eq!(lifetime_months(Some(0), None), None);
        assert_eq!(lifetime_months(None, None), None);
        // Churn above 100% floors to zero months.
        assert_eq!(lifetime_months(None, Some(150.0)), None);
    }

    #[test]
    fn ltv_uses_churn_derived_lifetime() {
        let input = ValuationInput {
            average_deal_size: Some(1_200.0),
            gross_margin_percent: Some(50.0),
            expected_customer_lifetime_months: Some(24),
            monthly_churn_rate_percent: Some(10.0),
            ..ValuationInput::default()
        };
        // 1200 × 50% × 10/12
        assert_eq!(external_value(&input).customer_ltv, Some(500.0));
    }

    #[test]
    fn ltv_cac_ratio_requires_positive_cac() {
        assert_eq!(ltv_cac_ratio(Some(500.0), Some(250.0)), Some(2.0));
        assert_eq!(ltv_cac_ratio(Some(500.0), Some(0.0)), None);
        assert_eq!(ltv_cac_ratio(Some(500.0), None), None);
        assert_eq!(ltv_cac_ratio(None, Some(250.0)), None);
    }

    #[test]
    fn payback_requires_positive_monthly_margin() {
        // 1200 × 50% / 12 = $50/month; $300 CAC pays back in 6 months
        assert_eq!(payback_months(Some(300.0), Some(1_200.0), Some(50.0)), Some(6.0));
        assert_eq!(payback_months(Some(300.0), Some(1_200.0), Some(0.0)), None);
        assert_eq!(payback_months(Some(300.0), Some(0.0), Some(50.0)), None);
        assert_eq!(payback_months(None, Some(1_200.0), Some(50.0)), None);
    }

    #[test]
    fn net_revenue_subtracts_cac_and_go_to_market() {
        let net = net_three_year_revenue(
            Some(1_000_000.0),
            [Some(10), Some(20), None],
            Some(1_000.0),
            Some(50_000.0),
            None,
        );
        // 1M − 30 × 1k − 3 × 50k
        assert_eq!(net, Some(820_000.0));
    }

    #[test]
    fn net_revenue_is_none_without_gross() {
        assert_eq!(
            net_three_year_revenue(None, [Some(10); 3], Some(1_000.0), Some(1.0), Some(1.0)),
            None
        );
    }

    #[test]
    fn headline_prefers_net_over_gross() {
        let value = ExternalValue {
            three_year_revenue_projection: Some(100.0),
            net_three_year_revenue: Some(40.0),
            ..ExternalValue::default()
        };
        assert_eq!(value.headline(), Some(40.0));

        let gross_only = ExternalValue {
            three_year_revenue_projection: Some(100.0),
            ..ExternalValue::default()
        };
        assert_eq!(gross_only.headline(), Some(100.0));
    }
}
