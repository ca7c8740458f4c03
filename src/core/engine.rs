use super::config::TaxConfig;
use super::types::{
    AllocationSummary, AnnuityOutlook, DreamExpense, Frequency, FundingPath, IncomeBreakdown,
    LineItem, PathKind, PayoutKind, ProjectionPoint, TaxBreakdown,
};

const ANNUITY_YEARS: u32 = 30;
const SAFE_WITHDRAWAL_RATE: f64 = 0.04;
const LOTTERY_TAX_MULTIPLIER: f64 = 2.5;
const PROJECTION_HORIZON_YEARS: u32 = 30;
const PROJECTION_STEP_YEARS: usize = 5;
const FULLY_ALLOCATED_TOLERANCE: f64 = 1000.0;

pub fn net_take_home(
    config: &TaxConfig,
    jackpot: f64,
    state: &str,
    payout: PayoutKind,
) -> TaxBreakdown {
    // Annuity elections are taxed on the face value; the 30-way split
    // happens in annuity_outlook.
    let lump_sum = match payout {
        PayoutKind::LumpSum => jackpot * config.cash_option_ratio,
        PayoutKind::Annuity => jackpot,
    };
    let federal_tax = lump_sum * config.federal_rate();
    let state_tax = lump_sum * config.state_rate(state) / 100.0;
    TaxBreakdown {
        jackpot,
        lump_sum,
        federal_tax,
        state_tax,
        net_take_home: lump_sum - federal_tax - state_tax,
    }
}

pub fn compound_growth(principal: f64, annual_return_percent: f64, years: u32) -> f64 {
    principal * (1.0 + annual_return_percent / 100.0).powi(years as i32)
}

pub fn depleting_growth(
    principal: f64,
    annual_return_percent: f64,
    annual_withdrawal: f64,
    years: u32,
) -> f64 {
    let growth = 1.0 + annual_return_percent / 100.0;
    let mut balance = principal;
    for _ in 0..years {
        balance = balance * growth - annual_withdrawal;
        // Once the money runs out it stays out; no negative balances.
        if balance < 0.0 {
            return 0.0;
        }
    }
    balance
}

// Annuity-due convention: each contribution lands before the year's growth.
pub fn contributing_growth(annual_contribution: f64, annual_return_percent: f64, years: u32) -> f64 {
    let growth = 1.0 + annual_return_percent / 100.0;
    let mut balance = 0.0;
    for _ in 0..years {
        balance = (balance + annual_contribution) * growth;
    }
    balance
}

pub fn growth_projections(principal: f64, annual_return_percent: f64) -> Vec<ProjectionPoint> {
    (0..=PROJECTION_HORIZON_YEARS)
        .step_by(PROJECTION_STEP_YEARS)
        .map(|year| ProjectionPoint {
            year,
            value: compound_growth(principal, annual_return_percent, year),
        })
        .collect()
}

pub fn annuity_projections(
    annual_contribution: f64,
    annual_return_percent: f64,
) -> Vec<ProjectionPoint> {
    (0..=PROJECTION_HORIZON_YEARS)
        .step_by(PROJECTION_STEP_YEARS)
        .map(|year| ProjectionPoint {
            year,
            value: contributing_growth(annual_contribution, annual_return_percent, year),
        })
        .collect()
}

// tax_rate is a fraction; callers keep it inside [0, 1). Period figures break
// the net target down, only annual_gross is grossed up.
pub fn income_needed(annual_expenses: f64, tax_rate: f64) -> IncomeBreakdown {
    let daily = annual_expenses / 365.0;
    IncomeBreakdown {
        annual_net: annual_expenses,
        annual_gross: annual_expenses / (1.0 - tax_rate),
        monthly: annual_expenses / 12.0,
        weekly: annual_expenses / 52.0,
        daily,
        hourly: daily / 24.0,
    }
}

pub fn paths_to_income(annual_gross_target: f64, current_income: f64) -> Vec<FundingPath> {
    let salary_gap = if current_income > 0.0 {
        annual_gross_target - current_income
    } else {
        annual_gross_target
    };
    let investment_principal = annual_gross_target / SAFE_WITHDRAWAL_RATE;
    vec![
        FundingPath {
            kind: PathKind::SalaryGap,
            title: "Level up your career".to_string(),
            description: "Close the gap between what you earn today and what the dream life costs."
                .to_string(),
            amount_label: format_currency(salary_gap),
            timeframe_label: "per year".to_string(),
        },
        FundingPath {
            kind: PathKind::SideHustle,
            title: "Start a side hustle".to_string(),
            description: "Spread the same gap across twelve months of extra earnings.".to_string(),
            amount_label: format_currency(salary_gap / 12.0),
            timeframe_label: "per month".to_string(),
        },
        FundingPath {
            kind: PathKind::InvestmentPrincipal,
            title: "Live off investments".to_string(),
            description: "Invest enough that a 4% withdrawal covers the whole income.".to_string(),
            amount_label: format_currency(investment_principal),
            timeframe_label: "invested once".to_string(),
        },
        FundingPath {
            kind: PathKind::Lottery,
            title: "Win the lottery".to_string(),
            description: "The jackpot that still nets out to that principal after taxes."
                .to_string(),
            amount_label: format_currency(investment_principal * LOTTERY_TAX_MULTIPLIER),
            timeframe_label: "one lucky ticket".to_string(),
        },
    ]
}

pub fn enabled_total(items: &[LineItem]) -> f64 {
    items
        .iter()
        .filter(|item| item.enabled)
        .map(|item| item.amount)
        .sum()
}

pub fn dream_expense_annual(expense: &DreamExpense) -> f64 {
    if !expense.enabled {
        return 0.0;
    }
    let per_year = match expense.frequency {
        Frequency::Weekly => 52.0,
        Frequency::Monthly => 12.0,
        Frequency::Quarterly => 4.0,
        Frequency::Yearly | Frequency::Once => 1.0,
    };
    expense.amount * per_year
}

pub fn dream_life_annual_total(expenses: &[DreamExpense]) -> f64 {
    expenses.iter().map(dream_expense_annual).sum()
}

pub fn allocation_summary(net_take_home: f64, allocated: f64) -> AllocationSummary {
    let remaining = net_take_home - allocated;
    // Guard the ratio when the net is zero or negative.
    let denominator = if net_take_home > 0.0 { net_take_home } else { 1.0 };
    AllocationSummary {
        net_take_home,
        allocated,
        remaining,
        percent_used: allocated / denominator * 100.0,
        overspent: remaining < 0.0,
        fully_allocated: remaining.abs() < FULLY_ALLOCATED_TOLERANCE,
    }
}

pub fn annuity_outlook(
    breakdown: &TaxBreakdown,
    annual_expenses: f64,
    annual_return_percent: f64,
) -> AnnuityOutlook {
    let annual_payment = breakdown.net_take_home / f64::from(ANNUITY_YEARS);
    let yearly_contribution = (annual_payment - annual_expenses).max(0.0);
    AnnuityOutlook {
        annual_payment,
        yearly_contribution,
        portfolio_after_30_years: contributing_growth(
            yearly_contribution,
            annual_return_percent,
            ANNUITY_YEARS,
        ),
        projections: annuity_projections(yearly_contribution, annual_return_percent),
    }
}

pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{any, prop_assert, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn line(id: &str, amount: f64, enabled: bool) -> LineItem {
        LineItem {
            id: id.to_string(),
            label: id.to_string(),
            amount,
            enabled,
        }
    }

    fn dream(amount: f64, frequency: Frequency, enabled: bool) -> DreamExpense {
        DreamExpense {
            id: "x".to_string(),
            label: "x".to_string(),
            amount,
            frequency,
            enabled,
        }
    }

    #[test]
    fn washington_billion_lump_sum_matches_hand_calculation() {
        let config = TaxConfig::default();
        let breakdown = net_take_home(&config, 1_000_000_000.0, "Washington", PayoutKind::LumpSum);
        // Hand calculation: 1e9 * 0.458 = 458000000 cash option,
        // federal 458000000 * 0.37 = 169460000, no state tax in Washington.
        assert_eq!(breakdown.jackpot, 1_000_000_000.0);
        assert_approx(breakdown.lump_sum, 458_000_000.0);
        assert_approx(breakdown.federal_tax, 169_460_000.0);
        assert_eq!(breakdown.state_tax, 0.0);
        assert_approx(breakdown.net_take_home, 288_540_000.0);
    }

    #[test]
    fn california_lump_sum_includes_state_tax() {
        let config = TaxConfig::default();
        let breakdown = net_take_home(&config, 100_000_000.0, "California", PayoutKind::LumpSum);
        // Hand calculation: base 45800000, federal 16946000,
        // state 45800000 * 0.133 = 6091400.
        assert_approx(breakdown.lump_sum, 45_800_000.0);
        assert_approx(breakdown.federal_tax, 16_946_000.0);
        assert_approx(breakdown.state_tax, 6_091_400.0);
        assert_approx(breakdown.net_take_home, 22_762_600.0);
    }

    #[test]
    fn annuity_base_is_the_face_value() {
        let config = TaxConfig::default();
        let breakdown = net_take_home(&config, 1_000_000_000.0, "Washington", PayoutKind::Annuity);
        assert_eq!(breakdown.lump_sum, 1_000_000_000.0);
        assert_approx(breakdown.federal_tax, 370_000_000.0);
        assert_approx(breakdown.net_take_home, 630_000_000.0);
    }

    #[test]
    fn unknown_jurisdictions_get_zero_state_tax() {
        let config = TaxConfig::default();
        // Lookup is case sensitive, so a lowercase name is just unknown.
        let lowercase = net_take_home(&config, 10_000_000.0, "california", PayoutKind::LumpSum);
        assert_eq!(lowercase.state_tax, 0.0);
        let abroad = net_take_home(&config, 10_000_000.0, "Atlantis", PayoutKind::LumpSum);
        assert_eq!(abroad.state_tax, 0.0);
        assert_approx(abroad.net_take_home, abroad.lump_sum - abroad.federal_tax);
    }

    #[test]
    fn degenerate_jackpots_degrade_linearly() {
        let config = TaxConfig::default();
        let zero = net_take_home(&config, 0.0, "California", PayoutKind::LumpSum);
        assert_eq!(zero.net_take_home, 0.0);
        let negative = net_take_home(&config, -1_000_000.0, "Washington", PayoutKind::LumpSum);
        let positive = net_take_home(&config, 1_000_000.0, "Washington", PayoutKind::LumpSum);
        assert_approx(negative.net_take_home, -positive.net_take_home);
    }

    #[test]
    fn compound_growth_zero_years_returns_principal() {
        assert_eq!(compound_growth(12_345.0, 7.0, 0), 12_345.0);
        assert_eq!(compound_growth(-500.0, 12.0, 0), -500.0);
        assert_eq!(compound_growth(777.0, 0.0, 10), 777.0);
    }

    #[test]
    fn compound_growth_matches_hand_calculation() {
        // Hand calculation: 500000 * 1.07^30 = 3806127.5, the launch screen's
        // "roughly 3.8m by leaving half a million alone".
        assert_approx_tol(compound_growth(500_000.0, 7.0, 30), 3_806_127.5, 1.0);
        // Negative rates compound down: 1000 * 0.5^2 = 250.
        assert_approx(compound_growth(1_000.0, -50.0, 2), 250.0);
    }

    #[test]
    fn depleting_growth_matches_hand_calculation() {
        // Hand calculation: no growth, 1000 - 3 * 100 = 700.
        assert_approx(depleting_growth(1_000.0, 0.0, 100.0, 3), 700.0);
        // Hand calculation: y1 1100-500=600, y2 660-500=160, y3 176-500 < 0.
        assert_eq!(depleting_growth(1_000.0, 10.0, 500.0, 3), 0.0);
        assert_eq!(depleting_growth(1_000.0, 0.0, 500.0, 2), 0.0);
    }

    #[test]
    fn depleting_growth_without_withdrawal_equals_compound_growth() {
        assert_approx(
            depleting_growth(2_000.0, 5.0, 0.0, 10),
            compound_growth(2_000.0, 5.0, 10),
        );
        assert_eq!(depleting_growth(1_234.0, 7.0, 200.0, 0), 1_234.0);
    }

    #[test]
    fn contributing_growth_matches_hand_calculation() {
        // Hand calculation: y1 (0+10)*1.1=11, y2 (11+10)*1.1=23.1,
        // y3 (23.1+10)*1.1=36.41.
        assert_approx(contributing_growth(10.0, 10.0, 3), 36.41);
        assert_eq!(contributing_growth(10.0, 10.0, 0), 0.0);
        assert_approx(contributing_growth(100.0, 0.0, 5), 500.0);
    }

    #[test]
    fn growth_projections_step_every_five_years() {
        let series = growth_projections(500_000.0, 7.0);
        let years: Vec<u32> = series.iter().map(|point| point.year).collect();
        assert_eq!(years, vec![0, 5, 10, 15, 20, 25, 30]);
        assert_eq!(series[0].value, 500_000.0);
        assert_approx_tol(series[6].value, 3_806_127.5, 1.0);
    }

    #[test]
    fn annuity_projections_start_from_zero() {
        let series = annuity_projections(21_000_000.0, 7.0);
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].value, 0.0);
        assert!(series[6].value > series[1].value);
    }

    #[test]
    fn income_needed_matches_hand_calculation() {
        let income = income_needed(100_000.0, 0.30);
        // Hand calculation: 100000 / 0.7 = 142857.14...
        assert_approx_tol(income.annual_gross, 142_857.14, 0.01);
        assert_eq!(income.annual_net, 100_000.0);
        assert_approx_tol(income.monthly, 8_333.33, 0.01);
        assert_approx_tol(income.weekly, 1_923.08, 0.01);
        assert_approx_tol(income.daily, 273.97, 0.01);
        assert_approx_tol(income.hourly, 11.42, 0.01);
    }

    #[test]
    fn income_needed_zero_expenses_is_all_zero() {
        let income = income_needed(0.0, 0.30);
        assert_eq!(income.annual_gross, 0.0);
        assert_eq!(income.monthly, 0.0);
        assert_eq!(income.hourly, 0.0);
    }

    #[test]
    fn income_periods_break_down_the_net_figure() {
        let income = income_needed(120_000.0, 0.25);
        assert_approx(income.annual_gross, 160_000.0);
        // Monthly is net/12, not gross/12.
        assert_approx(income.monthly, 10_000.0);
        assert_eq!(income_needed(50_000.0, 0.0).annual_gross, 50_000.0);
    }

    #[test]
    fn paths_come_in_fixed_order_with_formatted_amounts() {
        let paths = paths_to_income(100_000.0, 40_000.0);
        let kinds: Vec<PathKind> = paths.iter().map(|path| path.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PathKind::SalaryGap,
                PathKind::SideHustle,
                PathKind::InvestmentPrincipal,
                PathKind::Lottery,
            ]
        );
        assert_eq!(paths[0].amount_label, "$60,000");
        assert_eq!(paths[1].amount_label, "$5,000");
        // 100000 / 0.04 = 2.5m principal, 2.5x for the pre-tax jackpot.
        assert_eq!(paths[2].amount_label, "$2,500,000");
        assert_eq!(paths[3].amount_label, "$6,250,000");
    }

    #[test]
    fn zero_current_income_uses_the_full_target_as_gap() {
        let paths = paths_to_income(100_000.0, 0.0);
        assert_eq!(paths[0].amount_label, "$100,000");
        assert_eq!(paths[1].timeframe_label, "per month");
    }

    #[test]
    fn enabled_total_skips_disabled_items() {
        let items = vec![
            line("a", 100.0, true),
            line("b", 50.0, false),
            line("c", 25.0, true),
        ];
        assert_eq!(enabled_total(&items), 125.0);
        assert_eq!(enabled_total(&[]), 0.0);
    }

    #[test]
    fn disabling_zeroes_and_reenabling_restores() {
        let mut items = vec![
            line("a", 100.0, true),
            line("b", 50.0, true),
            line("c", 25.0, true),
        ];
        for entry in &mut items {
            entry.enabled = false;
        }
        assert_eq!(enabled_total(&items), 0.0);
        items[1].enabled = true;
        assert_eq!(enabled_total(&items), 50.0);
    }

    #[test]
    fn dream_expenses_annualize_by_frequency() {
        assert_eq!(
            dream_expense_annual(&dream(100.0, Frequency::Weekly, true)),
            5_200.0
        );
        assert_eq!(
            dream_expense_annual(&dream(100.0, Frequency::Monthly, true)),
            1_200.0
        );
        assert_eq!(
            dream_expense_annual(&dream(100.0, Frequency::Quarterly, true)),
            400.0
        );
        assert_eq!(
            dream_expense_annual(&dream(100.0, Frequency::Yearly, true)),
            100.0
        );
        assert_eq!(
            dream_expense_annual(&dream(100.0, Frequency::Once, true)),
            100.0
        );
        assert_eq!(
            dream_expense_annual(&dream(100.0, Frequency::Weekly, false)),
            0.0
        );
    }

    #[test]
    fn dream_life_total_sums_enabled_annualized_amounts() {
        let expenses = vec![
            dream(100.0, Frequency::Weekly, true),
            dream(50.0, Frequency::Monthly, false),
            dream(1_000.0, Frequency::Once, true),
        ];
        assert_eq!(dream_life_annual_total(&expenses), 6_200.0);
    }

    #[test]
    fn allocation_summary_flags() {
        let summary = allocation_summary(1_000_000.0, 400_000.0);
        assert_approx(summary.remaining, 600_000.0);
        assert_approx(summary.percent_used, 40.0);
        assert!(!summary.overspent);
        assert!(!summary.fully_allocated);

        let over = allocation_summary(1_000_000.0, 1_200_000.0);
        assert_approx(over.remaining, -200_000.0);
        assert!(over.overspent);
        assert!(!over.fully_allocated);
    }

    #[test]
    fn fully_allocated_band_covers_both_sides() {
        let under = allocation_summary(1_000_000.0, 999_500.0);
        assert!(under.fully_allocated);
        assert!(!under.overspent);
        // Slightly overspent still counts as fully allocated.
        let over = allocation_summary(1_000_000.0, 1_000_999.0);
        assert!(over.fully_allocated);
        assert!(over.overspent);
        let way_over = allocation_summary(1_000_000.0, 1_001_001.0);
        assert!(!way_over.fully_allocated);
    }

    #[test]
    fn allocation_percent_guards_non_positive_net() {
        let summary = allocation_summary(0.0, 500.0);
        assert_approx(summary.percent_used, 50_000.0);
        assert!(summary.overspent);
        let negative = allocation_summary(-10.0, 0.0);
        assert_eq!(negative.percent_used, 0.0);
        assert!(negative.fully_allocated);
    }

    #[test]
    fn annuity_outlook_matches_hand_calculation() {
        let config = TaxConfig::default();
        let breakdown = net_take_home(&config, 1_000_000_000.0, "Washington", PayoutKind::Annuity);
        let outlook = annuity_outlook(&breakdown, 220_000.0, 7.0);
        // Hand calculation: 630000000 / 30 = 21000000 per installment,
        // 21000000 - 220000 = 20780000 invested each year.
        assert_approx(outlook.annual_payment, 21_000_000.0);
        assert_approx(outlook.yearly_contribution, 20_780_000.0);
        assert_eq!(
            outlook.portfolio_after_30_years,
            contributing_growth(outlook.yearly_contribution, 7.0, 30)
        );
        assert_eq!(outlook.projections.len(), 7);
        assert_eq!(outlook.projections[0].value, 0.0);
        assert_eq!(
            outlook.projections[6].value,
            outlook.portfolio_after_30_years
        );
    }

    #[test]
    fn annuity_contribution_floors_at_zero() {
        let breakdown = TaxBreakdown {
            jackpot: 1_000_000.0,
            lump_sum: 1_000_000.0,
            federal_tax: 370_000.0,
            state_tax: 0.0,
            net_take_home: 630_000.0,
        };
        // 21000 per installment, annual spending of 50000 eats it all.
        let outlook = annuity_outlook(&breakdown, 50_000.0, 7.0);
        assert_eq!(outlook.yearly_contribution, 0.0);
        assert_eq!(outlook.portfolio_after_30_years, 0.0);
    }

    #[test]
    fn format_currency_rounds_and_groups() {
        assert_eq!(format_currency(1_234_567.89), "$1,234,568");
        assert_eq!(format_currency(288_540_000.0), "$288,540,000");
        assert_eq!(format_currency(42.0), "$42");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(999.5), "$1,000");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(-0.4), "$0");
        assert_eq!(format_currency(-500_000.0), "-$500,000");
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(24))]

        #[test]
        fn prop_depleting_growth_never_negative_and_monotone_in_withdrawal(
            principal in 0u32..2_000_000,
            rate_bp in -500i32..1_501,
            withdrawal in 0u32..300_000,
            bump in 1u32..50_000,
            years in 0u32..40
        ) {
            let principal = f64::from(principal);
            let rate = f64::from(rate_bp) / 100.0;
            let lighter = depleting_growth(principal, rate, f64::from(withdrawal), years);
            let heavier = depleting_growth(principal, rate, f64::from(withdrawal + bump), years);
            prop_assert!(lighter >= 0.0);
            prop_assert!(heavier >= 0.0);
            prop_assert!(heavier <= lighter + 1e-6);
        }

        #[test]
        fn prop_compound_growth_splits_across_year_spans(
            principal in 1u32..1_000_000,
            rate_bp in -500i32..1_501,
            first in 0u32..15,
            second in 0u32..15
        ) {
            let principal = f64::from(principal);
            let rate = f64::from(rate_bp) / 100.0;
            let whole = compound_growth(principal, rate, first + second);
            let split = compound_growth(compound_growth(principal, rate, first), rate, second);
            prop_assert!((whole - split).abs() <= 1e-6 * split.abs().max(1.0));
        }

        #[test]
        fn prop_enabled_total_bounded_by_full_sum(
            amounts in proptest::collection::vec(0u32..1_000_000, 0..12),
            mask in any::<u16>()
        ) {
            let items: Vec<LineItem> = amounts
                .iter()
                .enumerate()
                .map(|(index, amount)| LineItem {
                    id: format!("item-{index}"),
                    label: format!("Item {index}"),
                    amount: f64::from(*amount),
                    enabled: mask & (1u16 << index) != 0,
                })
                .collect();
            let full: f64 = items.iter().map(|item| item.amount).sum();
            let total = enabled_total(&items);
            prop_assert!(total >= 0.0);
            prop_assert!(total <= full + 1e-9);
        }
    }
}
