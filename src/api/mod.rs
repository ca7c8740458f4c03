use axum::{
    Router,
    extract::{Json, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{
    AllocationSummary, AnnuityOutlook, Catalog, DreamExpense, Frequency, FundingPath,
    IncomeBreakdown, LineItem, PayoutKind, Preset, ProjectionPoint, TaxBreakdown, TaxConfig,
    allocation_summary, annuity_outlook, compound_growth, default_catalog, default_dream_expenses,
    dream_life_annual_total, enabled_total, find_preset, growth_projections, income_needed,
    net_take_home, paths_to_income,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliPayout {
    LumpSum,
    Annuity,
}

impl From<CliPayout> for PayoutKind {
    fn from(value: CliPayout) -> Self {
        match value {
            CliPayout::LumpSum => PayoutKind::LumpSum,
            CliPayout::Annuity => PayoutKind::Annuity,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ApiPayout {
    #[serde(alias = "lumpSum", alias = "lump_sum", alias = "cash")]
    LumpSum,
    Annuity,
}

impl From<ApiPayout> for CliPayout {
    fn from(value: ApiPayout) -> Self {
        match value {
            ApiPayout::LumpSum => CliPayout::LumpSum,
            ApiPayout::Annuity => CliPayout::Annuity,
        }
    }
}

impl From<PayoutKind> for ApiPayout {
    fn from(value: PayoutKind) -> Self {
        match value {
            PayoutKind::LumpSum => ApiPayout::LumpSum,
            PayoutKind::Annuity => ApiPayout::Annuity,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiFrequency {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    #[serde(alias = "one-time", alias = "oneTime")]
    Once,
}

impl From<ApiFrequency> for Frequency {
    fn from(value: ApiFrequency) -> Self {
        match value {
            ApiFrequency::Weekly => Frequency::Weekly,
            ApiFrequency::Monthly => Frequency::Monthly,
            ApiFrequency::Quarterly => Frequency::Quarterly,
            ApiFrequency::Yearly => Frequency::Yearly,
            ApiFrequency::Once => Frequency::Once,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemPayload {
    id: String,
    label: Option<String>,
    amount: Option<f64>,
    enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpensePayload {
    id: String,
    label: Option<String>,
    amount: Option<f64>,
    frequency: Option<ApiFrequency>,
    enabled: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct EstimatePayload {
    jackpot: Option<f64>,
    state: Option<String>,
    payout: Option<ApiPayout>,
    return_rate: Option<f64>,
    invest_percent: Option<f64>,
    preset: Option<String>,
    debts: Option<Vec<ItemPayload>>,
    domiciles: Option<Vec<ItemPayload>>,
    travel_toys: Option<Vec<ItemPayload>>,
    share_wealth: Option<Vec<ItemPayload>>,
    annual_expenses: Option<Vec<ItemPayload>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DreamLifePayload {
    current_income: Option<f64>,
    tax_rate: Option<f64>,
    expenses: Option<Vec<ExpensePayload>>,
}

#[derive(Parser, Debug)]
#[command(
    name = "windfall",
    about = "Lottery reality check: taxes, payout elections, allocations, and the price of a dream life"
)]
struct Cli {
    #[arg(
        long,
        default_value_t = 1_000_000_000.0,
        help = "Advertised jackpot in dollars"
    )]
    jackpot: f64,
    #[arg(
        long,
        default_value = "Washington",
        help = "State or jurisdiction name for state withholding"
    )]
    state: String,
    #[arg(long, value_enum, default_value_t = CliPayout::LumpSum)]
    payout: CliPayout,
    #[arg(
        long,
        default_value_t = 7.0,
        help = "Expected annual investment return in percent"
    )]
    return_rate: f64,
    #[arg(
        long,
        help = "Share of net take-home to invest in percent; presets pick their own when omitted"
    )]
    invest_percent: Option<f64>,
    #[arg(long, help = "Allocation preset: go-large or chill")]
    preset: Option<String>,
    #[arg(
        long,
        default_value_t = 30.0,
        help = "Assumed income tax rate in percent for the dream-life gross-up"
    )]
    tax_rate: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Current annual income in dollars"
    )]
    current_income: f64,
    #[arg(long, help = "Path to a TOML tax table overriding the built-in rates")]
    tax_config: Option<PathBuf>,
}

#[derive(Debug, Clone)]
struct Scenario {
    jackpot: f64,
    state: String,
    payout: PayoutKind,
    return_rate: f64,
    investment_split: f64,
    income_tax_rate: f64,
    current_income: f64,
    preset: Option<Preset>,
}

#[derive(Debug)]
struct EstimateRequest {
    scenario: Scenario,
    debts: Vec<LineItem>,
    domiciles: Vec<LineItem>,
    travel_toys: Vec<LineItem>,
    share_wealth: Vec<LineItem>,
    annual_expenses: Vec<LineItem>,
}

#[derive(Debug)]
struct DreamLifeRequest {
    current_income: f64,
    income_tax_rate: f64,
    expenses: Vec<DreamExpense>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryTotals {
    debts: f64,
    domiciles: f64,
    travel_toys: f64,
    share_wealth: f64,
    annual_expenses: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InvestmentPlan {
    principal: f64,
    return_rate: f64,
    future_value: f64,
    projections: Vec<ProjectionPoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EstimateResponse {
    payout: ApiPayout,
    state: String,
    state_rate: f64,
    preset: Option<String>,
    breakdown: TaxBreakdown,
    totals: CategoryTotals,
    summary: AllocationSummary,
    investment: InvestmentPlan,
    annuity: Option<AnnuityOutlook>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DreamLifeResponse {
    annual_cost: f64,
    tax_rate: f64,
    income: IncomeBreakdown,
    current_income: f64,
    progress_percent: f64,
    gap: f64,
    paths: Vec<FundingPath>,
    expenses: Vec<DreamExpense>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogResponse<'a> {
    cash_option_ratio: f64,
    federal_tax_rate: f64,
    state_rates: &'a BTreeMap<String, f64>,
    defaults: &'a Catalog,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_scenario(cli: &Cli) -> Result<Scenario, String> {
    if !cli.jackpot.is_finite() || cli.jackpot < 0.0 {
        return Err("--jackpot must be >= 0".to_string());
    }

    if cli.state.trim().is_empty() {
        return Err("--state must not be empty".to_string());
    }

    if !cli.return_rate.is_finite() || cli.return_rate <= -100.0 {
        return Err("--return-rate must be > -100".to_string());
    }

    if let Some(percent) = cli.invest_percent {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err("--invest-percent must be between 0 and 100".to_string());
        }
    }

    if !cli.tax_rate.is_finite() || !(0.0..100.0).contains(&cli.tax_rate) {
        return Err("--tax-rate must be >= 0 and < 100".to_string());
    }

    if !cli.current_income.is_finite() || cli.current_income < 0.0 {
        return Err("--current-income must be >= 0".to_string());
    }

    let preset = match &cli.preset {
        Some(id) => match find_preset(id) {
            Some(preset) => Some(preset),
            None => return Err("--preset must be one of: go-large, chill".to_string()),
        },
        None => None,
    };

    // Without an explicit split the preset decides; otherwise invest half.
    let invest_percent = cli.invest_percent.unwrap_or_else(|| {
        preset
            .as_ref()
            .map(|preset| preset.investment_split * 100.0)
            .unwrap_or(50.0)
    });

    Ok(Scenario {
        jackpot: cli.jackpot,
        state: cli.state.clone(),
        payout: cli.payout.into(),
        return_rate: cli.return_rate,
        investment_split: invest_percent / 100.0,
        income_tax_rate: cli.tax_rate / 100.0,
        current_income: cli.current_income,
        preset,
    })
}

fn validate_item_overrides(category: &str, overrides: &[ItemPayload]) -> Result<(), String> {
    for over in overrides {
        if over.id.trim().is_empty() {
            return Err(format!("{category} entries need a non-empty id"));
        }
        if let Some(amount) = over.amount {
            if !amount.is_finite() || amount < 0.0 {
                return Err(format!("{category} amount for '{}' must be >= 0", over.id));
            }
        }
    }
    Ok(())
}

fn validate_expense_overrides(overrides: &[ExpensePayload]) -> Result<(), String> {
    for over in overrides {
        if over.id.trim().is_empty() {
            return Err("expenses entries need a non-empty id".to_string());
        }
        if let Some(amount) = over.amount {
            if !amount.is_finite() || amount < 0.0 {
                return Err(format!("expenses amount for '{}' must be >= 0", over.id));
            }
        }
    }
    Ok(())
}

fn apply_item_overrides(mut items: Vec<LineItem>, overrides: &[ItemPayload]) -> Vec<LineItem> {
    for over in overrides {
        match items.iter_mut().find(|item| item.id == over.id) {
            Some(item) => {
                if let Some(label) = &over.label {
                    item.label = label.clone();
                }
                if let Some(amount) = over.amount {
                    item.amount = amount;
                }
                if let Some(enabled) = over.enabled {
                    item.enabled = enabled;
                }
            }
            // Unknown ids become new line items rather than an error.
            None => items.push(LineItem {
                id: over.id.clone(),
                label: over.label.clone().unwrap_or_else(|| over.id.clone()),
                amount: over.amount.unwrap_or(0.0),
                enabled: over.enabled.unwrap_or(true),
            }),
        }
    }
    items
}

fn apply_expense_overrides(
    mut expenses: Vec<DreamExpense>,
    overrides: &[ExpensePayload],
) -> Vec<DreamExpense> {
    for over in overrides {
        match expenses.iter_mut().find(|expense| expense.id == over.id) {
            Some(expense) => {
                if let Some(label) = &over.label {
                    expense.label = label.clone();
                }
                if let Some(amount) = over.amount {
                    expense.amount = amount;
                }
                if let Some(frequency) = over.frequency {
                    expense.frequency = frequency.into();
                }
                if let Some(enabled) = over.enabled {
                    expense.enabled = enabled;
                }
            }
            None => expenses.push(DreamExpense {
                id: over.id.clone(),
                label: over.label.clone().unwrap_or_else(|| over.id.clone()),
                amount: over.amount.unwrap_or(0.0),
                frequency: over.frequency.map(Into::into).unwrap_or(Frequency::Yearly),
                enabled: over.enabled.unwrap_or(true),
            }),
        }
    }
    expenses
}

#[derive(Copy, Clone, Debug, Default)]
struct CategoryOverrides<'a> {
    debts: Option<&'a [ItemPayload]>,
    domiciles: Option<&'a [ItemPayload]>,
    travel_toys: Option<&'a [ItemPayload]>,
    share_wealth: Option<&'a [ItemPayload]>,
    annual_expenses: Option<&'a [ItemPayload]>,
}

fn resolve_estimate_request(
    catalog: &Catalog,
    scenario: Scenario,
    overrides: CategoryOverrides<'_>,
) -> Result<EstimateRequest, String> {
    for (category, items) in [
        ("debts", overrides.debts),
        ("domiciles", overrides.domiciles),
        ("travelToys", overrides.travel_toys),
        ("shareWealth", overrides.share_wealth),
        ("annualExpenses", overrides.annual_expenses),
    ] {
        if let Some(items) = items {
            validate_item_overrides(category, items)?;
        }
    }

    // Presets never touch debts; what you owe is what you owe.
    let mut debts = catalog.debts.clone();
    let (mut domiciles, mut travel_toys, mut share_wealth, mut annual_expenses) =
        match &scenario.preset {
            Some(preset) => (
                preset.domiciles.clone(),
                preset.travel_toys.clone(),
                preset.share_wealth.clone(),
                preset.annual_expenses.clone(),
            ),
            None => (
                catalog.domiciles.clone(),
                catalog.travel_toys.clone(),
                catalog.share_wealth.clone(),
                catalog.annual_expenses.clone(),
            ),
        };

    if let Some(items) = overrides.debts {
        debts = apply_item_overrides(debts, items);
    }
    if let Some(items) = overrides.domiciles {
        domiciles = apply_item_overrides(domiciles, items);
    }
    if let Some(items) = overrides.travel_toys {
        travel_toys = apply_item_overrides(travel_toys, items);
    }
    if let Some(items) = overrides.share_wealth {
        share_wealth = apply_item_overrides(share_wealth, items);
    }
    if let Some(items) = overrides.annual_expenses {
        annual_expenses = apply_item_overrides(annual_expenses, items);
    }

    Ok(EstimateRequest {
        scenario,
        debts,
        domiciles,
        travel_toys,
        share_wealth,
        annual_expenses,
    })
}

struct AppState {
    tax: TaxConfig,
    catalog: Catalog,
}

pub async fn run_http_server(port: u16, tax: TaxConfig) -> std::io::Result<()> {
    let state = Arc::new(AppState {
        tax,
        catalog: default_catalog(),
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/estimate",
            get(estimate_get_handler).post(estimate_post_handler),
        )
        .route(
            "/api/dream-life",
            get(dream_life_get_handler).post(dream_life_post_handler),
        )
        .route("/api/catalog", get(catalog_handler))
        .fallback(not_found_handler)
        .with_state(state);

    let listener = TcpListener::bind(addr).await?;
    info!("windfall HTTP API listening on http://{addr}");

    axum::serve(listener, app).await
}

pub fn run_cli_estimate(raw_args: &[String]) -> Result<String, String> {
    let mut args = vec!["windfall".to_string()];
    args.extend(raw_args.iter().skip(2).cloned());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    let tax = match &cli.tax_config {
        Some(path) => TaxConfig::from_file(path).map_err(|e| e.to_string())?,
        None => TaxConfig::default(),
    };

    let catalog = default_catalog();
    let scenario = build_scenario(&cli)?;
    let request = resolve_estimate_request(&catalog, scenario, CategoryOverrides::default())?;
    let response = build_estimate_response(&tax, &request);
    serde_json::to_string_pretty(&response).map_err(|e| e.to_string())
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn estimate_get_handler(
    State(state): State<Arc<AppState>>,
    Query(payload): Query<EstimatePayload>,
) -> Response {
    estimate_handler_impl(&state, payload)
}

async fn estimate_post_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EstimatePayload>,
) -> Response {
    estimate_handler_impl(&state, payload)
}

async fn dream_life_get_handler(Query(payload): Query<DreamLifePayload>) -> Response {
    dream_life_handler_impl(payload)
}

async fn dream_life_post_handler(Json(payload): Json<DreamLifePayload>) -> Response {
    dream_life_handler_impl(payload)
}

async fn catalog_handler(State(state): State<Arc<AppState>>) -> Response {
    let response = CatalogResponse {
        cash_option_ratio: state.tax.cash_option_ratio,
        federal_tax_rate: state.tax.federal_rate(),
        state_rates: &state.tax.state_rates,
        defaults: &state.catalog,
    };
    json_response(StatusCode::OK, response)
}

fn estimate_handler_impl(state: &AppState, payload: EstimatePayload) -> Response {
    let request = match estimate_request_from_payload(&state.catalog, payload) {
        Ok(request) => request,
        Err(msg) => {
            warn!("estimate rejected: {msg}");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    let response = build_estimate_response(&state.tax, &request);
    debug!(
        state = %request.scenario.state,
        net = response.breakdown.net_take_home,
        "estimate computed"
    );
    json_response(StatusCode::OK, response)
}

fn dream_life_handler_impl(payload: DreamLifePayload) -> Response {
    let request = match dream_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => {
            warn!("dream life rejected: {msg}");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    let response = build_dream_life_response(&request);
    debug!(annual_cost = response.annual_cost, "dream life computed");
    json_response(StatusCode::OK, response)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn estimate_request_from_json(catalog: &Catalog, json: &str) -> Result<EstimateRequest, String> {
    let payload = serde_json::from_str::<EstimatePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    estimate_request_from_payload(catalog, payload)
}

fn estimate_request_from_payload(
    catalog: &Catalog,
    payload: EstimatePayload,
) -> Result<EstimateRequest, String> {
    let mut cli = default_cli();

    if let Some(v) = payload.jackpot {
        cli.jackpot = v;
    }
    if let Some(v) = payload.state {
        cli.state = v;
    }
    if let Some(v) = payload.payout {
        cli.payout = v.into();
    }
    if let Some(v) = payload.return_rate {
        cli.return_rate = v;
    }
    if let Some(v) = payload.invest_percent {
        cli.invest_percent = Some(v);
    }
    if let Some(v) = payload.preset {
        cli.preset = Some(v);
    }

    let scenario = build_scenario(&cli)?;
    resolve_estimate_request(
        catalog,
        scenario,
        CategoryOverrides {
            debts: payload.debts.as_deref(),
            domiciles: payload.domiciles.as_deref(),
            travel_toys: payload.travel_toys.as_deref(),
            share_wealth: payload.share_wealth.as_deref(),
            annual_expenses: payload.annual_expenses.as_deref(),
        },
    )
}

#[cfg(test)]
fn dream_request_from_json(json: &str) -> Result<DreamLifeRequest, String> {
    let payload = serde_json::from_str::<DreamLifePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    dream_request_from_payload(payload)
}

fn dream_request_from_payload(payload: DreamLifePayload) -> Result<DreamLifeRequest, String> {
    let mut cli = default_cli();

    if let Some(v) = payload.current_income {
        cli.current_income = v;
    }
    if let Some(v) = payload.tax_rate {
        cli.tax_rate = v;
    }

    let scenario = build_scenario(&cli)?;

    let expenses = match &payload.expenses {
        Some(overrides) => {
            validate_expense_overrides(overrides)?;
            apply_expense_overrides(default_dream_expenses(), overrides)
        }
        None => default_dream_expenses(),
    };

    Ok(DreamLifeRequest {
        current_income: scenario.current_income,
        income_tax_rate: scenario.income_tax_rate,
        expenses,
    })
}

fn default_cli() -> Cli {
    Cli::parse_from(["windfall"])
}

fn build_estimate_response(tax: &TaxConfig, request: &EstimateRequest) -> EstimateResponse {
    let scenario = &request.scenario;
    let breakdown = net_take_home(tax, scenario.jackpot, &scenario.state, scenario.payout);

    let totals = CategoryTotals {
        debts: enabled_total(&request.debts),
        domiciles: enabled_total(&request.domiciles),
        travel_toys: enabled_total(&request.travel_toys),
        share_wealth: enabled_total(&request.share_wealth),
        annual_expenses: enabled_total(&request.annual_expenses),
    };

    let principal = breakdown.net_take_home * scenario.investment_split;
    // Annual expenses are recurring spending, not a one-off purchase; they
    // stay out of the allocated total.
    let allocated =
        totals.debts + totals.domiciles + totals.travel_toys + totals.share_wealth + principal;
    let summary = allocation_summary(breakdown.net_take_home, allocated);

    let investment = InvestmentPlan {
        principal,
        return_rate: scenario.return_rate,
        future_value: compound_growth(principal, scenario.return_rate, 30),
        projections: growth_projections(principal, scenario.return_rate),
    };

    let annuity = match scenario.payout {
        PayoutKind::Annuity => Some(annuity_outlook(
            &breakdown,
            totals.annual_expenses,
            scenario.return_rate,
        )),
        PayoutKind::LumpSum => None,
    };

    EstimateResponse {
        payout: scenario.payout.into(),
        state: scenario.state.clone(),
        state_rate: tax.state_rate(&scenario.state),
        preset: scenario.preset.as_ref().map(|preset| preset.id.clone()),
        breakdown,
        totals,
        summary,
        investment,
        annuity,
    }
}

fn build_dream_life_response(request: &DreamLifeRequest) -> DreamLifeResponse {
    let annual_cost = dream_life_annual_total(&request.expenses);
    let income = income_needed(annual_cost, request.income_tax_rate);

    // A zero target counts as already funded.
    let denominator = if income.annual_gross > 0.0 {
        income.annual_gross
    } else {
        1.0
    };
    let progress_percent = (request.current_income / denominator * 100.0).min(100.0);
    let gap = (income.annual_gross - request.current_income).max(0.0);
    let paths = paths_to_income(income.annual_gross, request.current_income);

    DreamLifeResponse {
        annual_cost,
        tax_rate: request.income_tax_rate,
        income,
        current_income: request.current_income,
        progress_percent,
        gap,
        paths,
        expenses: request.expenses.clone(),
    }
}
