use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Kind of money movement recorded by a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received
    Income,
    /// Money spent
    Expense,
}

/// Which kind of transaction a category classifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    Expense,
}

impl CategoryType {
    /// Whether a transaction of the given type may reference this category
    pub fn accepts(&self, transaction_type: TransactionType) -> bool {
        matches!(
            (self, transaction_type),
            (CategoryType::Income, TransactionType::Income)
                | (CategoryType::Expense, TransactionType::Expense)
        )
    }
}

/// Identity of the authenticated user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// A named, iconable classification of income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Emoji or short glyph shown next to the name
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

/// A single recorded money movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// Non-negative amount; the direction comes from `transaction_type`
    #[serde(deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// ISO 8601 date or RFC 3339 timestamp
    pub date: String,
    #[serde(rename = "CategoryId", default)]
    pub category_id: Option<i64>,
    /// Category embedded by the service when listing transactions
    #[serde(rename = "Category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Transaction {
    /// Calendar month the transaction falls in, if its date can be read
    pub fn period(&self) -> Option<Period> {
        parse_date(&self.date).map(Period::from_date)
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

/// Budget health derived from spent versus budgeted amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Good,
    Warning,
    Over,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetStatus::Good => write!(f, "good"),
            BudgetStatus::Warning => write!(f, "warning"),
            BudgetStatus::Over => write!(f, "over"),
        }
    }
}

/// A spending cap for one expense category within a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i64,
    #[serde(rename = "CategoryId")]
    pub category_id: i64,
    #[serde(deserialize_with = "lenient_amount")]
    pub budget_amount: f64,
    /// Computed by the service from the owner's expense transactions
    #[serde(default, deserialize_with = "lenient_amount")]
    pub spent_amount: f64,
    /// 1-12; absent for running-total budgets
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(rename = "Category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage_used: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BudgetStatus>,
}

impl Budget {
    /// Month this budget applies to; `None` means it tracks all time
    pub fn period(&self) -> Option<Period> {
        match (self.month, self.year) {
            (Some(month), Some(year)) => Some(Period { month, year }),
            _ => None,
        }
    }
}

/// Aggregate snapshot across all budgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverview {
    #[serde(deserialize_with = "lenient_amount")]
    pub total_budget: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub total_spent: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub remaining_budget: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub budget_used_percentage: f64,
    #[serde(default)]
    pub over_budget_count: u32,
    #[serde(default)]
    pub close_to_limit_count: u32,
}

/// A calendar month, used to scope totals and budgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// 1 = January
    pub month: u32,
    pub year: i32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Self {
        Self { month, year }
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Read the local calendar date out of an ISO 8601 date or RFC 3339 timestamp.
///
/// Timestamps are moved into the local time zone first, so they land in the
/// same month as `Period::current`. Plain dates are taken as written.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    parse_date_in(value, &Local)
}

/// `parse_date` against an explicit time zone
pub fn parse_date_in<Tz: TimeZone>(value: &str, zone: &Tz) -> Option<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(zone).date_naive());
    }
    NaiveDate::parse_from_str(value.get(..10)?, "%Y-%m-%d").ok()
}

/// Parse user or wire input as an amount; anything unreadable counts as 0
pub fn parse_amount(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

/// Accepts JSON numbers, numeric strings (decimal columns) and null
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawAmount>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawAmount::Number(value)) => value,
        Some(RawAmount::Text(text)) => parse_amount(&text),
        None => 0.0,
    })
}

// ---------------------------------------------------------------------------
// Requests

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub amount: f64,
    pub description: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(rename = "CategoryId")]
    pub category_id: Option<i64>,
    /// Service uses the current date when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBudgetRequest {
    #[serde(rename = "CategoryId")]
    pub category_id: i64,
    pub budget_amount: f64,
    pub month: u32,
    pub year: i32,
}

// ---------------------------------------------------------------------------
// Responses. Every response carries `success`; failures carry `message`.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub success: bool,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub success: bool,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub success: bool,
    #[serde(default)]
    pub transaction: Option<Transaction>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetListResponse {
    pub success: bool,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetResponse {
    pub success: bool,
    #[serde(default)]
    pub budget: Option<Budget>,
    #[serde(default)]
    pub message: Option<String>,
}

/// The service also echoes the budget list here; budgets are read from
/// `GET /budgets` so the list and the overview fail independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetOverviewResponse {
    pub success: bool,
    #[serde(default)]
    pub overview: Option<BudgetOverview>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
