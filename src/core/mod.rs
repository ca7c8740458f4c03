mod catalog;
mod config;
mod engine;
mod types;

pub use catalog::{
    Catalog, DreamCategory, Preset, default_annual_expenses, default_catalog, default_debts,
    default_domiciles, default_dream_expenses, default_share_wealth, default_travel_toys,
    dream_categories, find_preset, presets,
};
pub use config::{ConfigError, TaxConfig};
pub use engine::{
    allocation_summary, annuity_outlook, annuity_projections, compound_growth,
    contributing_growth, depleting_growth, dream_expense_annual, dream_life_annual_total,
    enabled_total, format_currency, growth_projections, income_needed, net_take_home,
    paths_to_income,
};
pub use types::{
    AllocationSummary, AnnuityOutlook, DreamExpense, Frequency, FundingPath, IncomeBreakdown,
    LineItem, PathKind, PayoutKind, ProjectionPoint, TaxBreakdown,
};
