use serde::Serialize;

use super::types::{DreamExpense, Frequency, LineItem};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub debts: Vec<LineItem>,
    pub domiciles: Vec<LineItem>,
    pub travel_toys: Vec<LineItem>,
    pub share_wealth: Vec<LineItem>,
    pub annual_expenses: Vec<LineItem>,
    pub dream_categories: Vec<DreamCategory>,
    pub presets: Vec<Preset>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DreamCategory {
    pub id: String,
    pub title: String,
    pub expenses: Vec<DreamExpense>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: String,
    pub label: String,
    pub description: String,
    // Fraction of net take-home the preset routes into investments.
    pub investment_split: f64,
    pub domiciles: Vec<LineItem>,
    pub travel_toys: Vec<LineItem>,
    pub share_wealth: Vec<LineItem>,
    pub annual_expenses: Vec<LineItem>,
}

fn item(id: &str, label: &str, amount: f64, enabled: bool) -> LineItem {
    LineItem {
        id: id.to_string(),
        label: label.to_string(),
        amount,
        enabled,
    }
}

fn expense(id: &str, label: &str, amount: f64, frequency: Frequency, enabled: bool) -> DreamExpense {
    DreamExpense {
        id: id.to_string(),
        label: label.to_string(),
        amount,
        frequency,
        enabled,
    }
}

// Preset amounts replace defaults per id; labels always survive the merge.
fn with_overrides(defaults: Vec<LineItem>, overrides: &[(&str, f64, bool)]) -> Vec<LineItem> {
    defaults
        .into_iter()
        .map(|mut entry| {
            if let Some((_, amount, enabled)) =
                overrides.iter().find(|(id, _, _)| *id == entry.id)
            {
                entry.amount = *amount;
                entry.enabled = *enabled;
            }
            entry
        })
        .collect()
}

pub fn default_debts() -> Vec<LineItem> {
    vec![
        item("mortgage", "Mortgage", 450_000.0, true),
        item("credit-cards", "Credit Cards", 35_000.0, true),
        item("student-loans", "Student Loans", 85_000.0, true),
        item("car-loan", "Car Loan", 42_000.0, true),
        item("medical-bills", "Medical Bills", 18_500.0, true),
        item("family-support", "Parent/Family Support", 50_000.0, true),
        item("business-loan", "Business Loan", 125_000.0, true),
    ]
}

pub fn default_domiciles() -> Vec<LineItem> {
    vec![
        item("dream-home", "Dream Home", 3_500_000.0, true),
        item("vacation-home", "Vacation Property", 1_500_000.0, false),
        item("investment-property", "Investment Property", 800_000.0, false),
    ]
}

pub fn default_travel_toys() -> Vec<LineItem> {
    vec![
        item("dream-car", "Dream Car", 250_000.0, true),
        item("travel-fund", "Travel Fund", 500_000.0, true),
        item("boat-rv", "Boat / RV", 350_000.0, false),
        item("experiences", "Epic Experiences", 200_000.0, true),
    ]
}

pub fn default_share_wealth() -> Vec<LineItem> {
    vec![
        item("family-gifts", "Family Gifts", 500_000.0, true),
        item("friends-gifts", "Friends", 100_000.0, false),
        item("charity", "Charity / Causes", 500_000.0, true),
        item("education-fund", "Education Fund (kids/family)", 300_000.0, true),
    ]
}

pub fn default_annual_expenses() -> Vec<LineItem> {
    vec![
        item(
            "housing",
            "Housing (utilities, maintenance, property tax)",
            60_000.0,
            true,
        ),
        item("travel", "Travel Budget", 50_000.0, true),
        item("charity", "Annual Giving", 25_000.0, true),
        item("entertainment", "Fun & Entertainment", 30_000.0, true),
        item("transport", "Transportation", 15_000.0, true),
        item("health", "Health & Wellness", 20_000.0, true),
        item("other", "Everything Else", 20_000.0, true),
    ]
}

pub fn dream_categories() -> Vec<DreamCategory> {
    vec![
        DreamCategory {
            id: "your-home".to_string(),
            title: "Your Home Sweet Home".to_string(),
            expenses: vec![
                expense(
                    "dream-rent",
                    "Mortgage or rent on the dream place",
                    6_000.0,
                    Frequency::Monthly,
                    true,
                ),
                expense(
                    "utilities-upkeep",
                    "Utilities & upkeep",
                    800.0,
                    Frequency::Monthly,
                    true,
                ),
                expense(
                    "cleaning-service",
                    "Weekly cleaning service",
                    150.0,
                    Frequency::Weekly,
                    false,
                ),
            ],
        },
        DreamCategory {
            id: "daily-rhythm".to_string(),
            title: "Your Daily Rhythm".to_string(),
            expenses: vec![
                expense(
                    "groceries-dining",
                    "Groceries & eating well",
                    400.0,
                    Frequency::Weekly,
                    true,
                ),
                expense(
                    "coffee-treats",
                    "Coffee & little treats",
                    60.0,
                    Frequency::Weekly,
                    true,
                ),
                expense(
                    "hobbies",
                    "Hobbies & creative projects",
                    500.0,
                    Frequency::Monthly,
                    false,
                ),
            ],
        },
        DreamCategory {
            id: "support-squad".to_string(),
            title: "Your Support Squad".to_string(),
            expenses: vec![
                expense(
                    "house-manager",
                    "House manager / personal assistant",
                    4_500.0,
                    Frequency::Monthly,
                    false,
                ),
                expense(
                    "childcare",
                    "Childcare & family help",
                    2_500.0,
                    Frequency::Monthly,
                    true,
                ),
                expense(
                    "accountant",
                    "Accountant & advisors",
                    5_000.0,
                    Frequency::Yearly,
                    true,
                ),
            ],
        },
        DreamCategory {
            id: "self-care".to_string(),
            title: "Your Self-Care".to_string(),
            expenses: vec![
                expense("trainer", "Personal trainer", 150.0, Frequency::Weekly, true),
                expense(
                    "therapy",
                    "Therapy & coaching",
                    800.0,
                    Frequency::Monthly,
                    true,
                ),
                expense(
                    "spa-days",
                    "Spa & recovery days",
                    1_500.0,
                    Frequency::Quarterly,
                    false,
                ),
            ],
        },
        DreamCategory {
            id: "adventures".to_string(),
            title: "Your Adventures".to_string(),
            expenses: vec![
                expense(
                    "big-trips",
                    "Big international trips",
                    10_000.0,
                    Frequency::Quarterly,
                    true,
                ),
                expense(
                    "weekend-getaways",
                    "Weekend getaways",
                    1_500.0,
                    Frequency::Monthly,
                    true,
                ),
                expense(
                    "bucket-list",
                    "Bucket-list splurge",
                    25_000.0,
                    Frequency::Once,
                    false,
                ),
            ],
        },
        DreamCategory {
            id: "time-freedom".to_string(),
            title: "Your Time Freedom".to_string(),
            expenses: vec![
                expense(
                    "work-optional",
                    "Work-optional cushion",
                    3_000.0,
                    Frequency::Monthly,
                    true,
                ),
                expense(
                    "sabbatical-fund",
                    "Sabbatical fund",
                    20_000.0,
                    Frequency::Yearly,
                    false,
                ),
                expense("giving-back", "Giving back", 500.0, Frequency::Monthly, true),
            ],
        },
    ]
}

pub fn default_dream_expenses() -> Vec<DreamExpense> {
    dream_categories()
        .into_iter()
        .flat_map(|category| category.expenses)
        .collect()
}

pub fn presets() -> Vec<Preset> {
    vec![
        Preset {
            id: "go-large".to_string(),
            label: "Go Large".to_string(),
            description: "Live your biggest dreams".to_string(),
            investment_split: 0.4,
            domiciles: with_overrides(
                default_domiciles(),
                &[
                    ("dream-home", 5_000_000.0, true),
                    ("vacation-home", 2_000_000.0, true),
                    ("investment-property", 1_000_000.0, false),
                ],
            ),
            travel_toys: with_overrides(
                default_travel_toys(),
                &[
                    ("dream-car", 350_000.0, true),
                    ("travel-fund", 750_000.0, true),
                    ("boat-rv", 500_000.0, true),
                    ("experiences", 300_000.0, true),
                ],
            ),
            share_wealth: with_overrides(
                default_share_wealth(),
                &[
                    ("family-gifts", 2_000_000.0, true),
                    ("friends-gifts", 500_000.0, true),
                    ("charity", 5_000_000.0, true),
                    ("education-fund", 1_000_000.0, true),
                ],
            ),
            annual_expenses: with_overrides(
                default_annual_expenses(),
                &[
                    ("housing", 120_000.0, true),
                    ("travel", 100_000.0, true),
                    ("charity", 50_000.0, true),
                    ("entertainment", 75_000.0, true),
                    ("transport", 30_000.0, true),
                    ("health", 40_000.0, true),
                    ("other", 50_000.0, true),
                ],
            ),
        },
        Preset {
            id: "chill".to_string(),
            label: "Keep It Chill".to_string(),
            description: "Comfortable and secure".to_string(),
            investment_split: 0.7,
            domiciles: with_overrides(
                default_domiciles(),
                &[
                    ("dream-home", 750_000.0, true),
                    ("vacation-home", 0.0, false),
                    ("investment-property", 0.0, false),
                ],
            ),
            travel_toys: with_overrides(
                default_travel_toys(),
                &[
                    ("dream-car", 75_000.0, true),
                    ("travel-fund", 200_000.0, true),
                    ("boat-rv", 0.0, false),
                    ("experiences", 100_000.0, true),
                ],
            ),
            share_wealth: with_overrides(
                default_share_wealth(),
                &[
                    ("family-gifts", 500_000.0, true),
                    ("friends-gifts", 50_000.0, false),
                    ("charity", 1_000_000.0, true),
                    ("education-fund", 250_000.0, true),
                ],
            ),
            annual_expenses: with_overrides(
                default_annual_expenses(),
                &[
                    ("housing", 36_000.0, true),
                    ("travel", 25_000.0, true),
                    ("charity", 15_000.0, true),
                    ("entertainment", 20_000.0, true),
                    ("transport", 10_000.0, true),
                    ("health", 15_000.0, true),
                    ("other", 15_000.0, true),
                ],
            ),
        },
    ]
}

pub fn find_preset(id: &str) -> Option<Preset> {
    presets().into_iter().find(|preset| preset.id == id)
}

pub fn default_catalog() -> Catalog {
    Catalog {
        debts: default_debts(),
        domiciles: default_domiciles(),
        travel_toys: default_travel_toys(),
        share_wealth: default_share_wealth(),
        annual_expenses: default_annual_expenses(),
        dream_categories: dream_categories(),
        presets: presets(),
    }
}
