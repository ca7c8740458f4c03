use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PayoutKind {
    LumpSum,
    Annuity,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    Once,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathKind {
    SalaryGap,
    SideHustle,
    InvestmentPrincipal,
    Lottery,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub jackpot: f64,
    pub lump_sum: f64,
    pub federal_tax: f64,
    pub state_tax: f64,
    pub net_take_home: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub label: String,
    pub amount: f64,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DreamExpense {
    pub id: String,
    pub label: String,
    pub amount: f64,
    pub frequency: Frequency,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub year: u32,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeBreakdown {
    pub annual_net: f64,
    pub annual_gross: f64,
    pub monthly: f64,
    pub weekly: f64,
    pub daily: f64,
    pub hourly: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingPath {
    pub kind: PathKind,
    pub title: String,
    pub description: String,
    pub amount_label: String,
    pub timeframe_label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSummary {
    pub net_take_home: f64,
    pub allocated: f64,
    pub remaining: f64,
    pub percent_used: f64,
    pub overspent: bool,
    pub fully_allocated: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnuityOutlook {
    pub annual_payment: f64,
    pub yearly_contribution: f64,
    pub portfolio_after_30_years: f64,
    pub projections: Vec<ProjectionPoint>,
}
