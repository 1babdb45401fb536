//! # View Models
//!
//! Plain data for the four dashboard tabs, built from a cache snapshot and an
//! explicit `ViewState`. The view state belongs to whoever renders; the
//! builders only read it, so the same snapshot can be shown for any month or
//! tab without touching the cache.

use shared::{Budget, BudgetOverview, Category, Period, Transaction, TransactionType};

use crate::cache::CacheSnapshot;
use crate::domain::{
    budget_status, category_breakdown, category_name, effective_overview, progress_width,
    recent_transactions, resolve_category, totals, transaction_counts, BudgetProgress,
    CategoryShare, Totals, TransactionCounts, UNCATEGORIZED,
};

/// Icon shown for budgets whose category has none
pub const DEFAULT_BUDGET_ICON: &str = "💰";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Transactions,
    Budgets,
    Analytics,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Transactions, Tab::Budgets, Tab::Analytics];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Transactions => "Transactions",
            Tab::Budgets => "Budgets",
            Tab::Analytics => "Analytics",
        }
    }
}

/// Presentation state passed into the builders
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub tab: Tab,
    /// Month the overview's "this month" figures cover
    pub period: Period,
    pub recent_limit: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            tab: Tab::Overview,
            period: Period::current(),
            recent_limit: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub category: String,
    pub icon: Option<String>,
    pub transaction_type: TransactionType,
    /// Positive for income, negative for expenses
    pub signed_amount: f64,
}

impl TransactionRow {
    fn build(transaction: &Transaction, categories: &[Category]) -> Self {
        let signed_amount = match transaction.transaction_type {
            TransactionType::Income => transaction.amount,
            TransactionType::Expense => -transaction.amount,
        };

        Self {
            id: transaction.id,
            date: transaction.date.clone(),
            description: transaction.description.clone(),
            category: category_name(transaction, categories).to_string(),
            icon: resolve_category(transaction, categories).and_then(|c| c.icon.clone()),
            transaction_type: transaction.transaction_type,
            signed_amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetCard {
    pub id: i64,
    pub category: String,
    pub icon: String,
    pub period: Option<Period>,
    pub budget_amount: f64,
    pub spent_amount: f64,
    pub progress: BudgetProgress,
    /// Progress bar fill, 0-100
    pub bar_width: f64,
}

impl BudgetCard {
    fn build(budget: &Budget, categories: &[Category]) -> Self {
        let category = budget
            .category
            .as_ref()
            .or_else(|| categories.iter().find(|c| c.id == budget.category_id));
        let progress = budget_status(budget);

        Self {
            id: budget.id,
            category: category
                .map(|c| c.name.clone())
                .unwrap_or_else(|| UNCATEGORIZED.to_string()),
            icon: category
                .and_then(|c| c.icon.clone())
                .unwrap_or_else(|| DEFAULT_BUDGET_ICON.to_string()),
            period: budget.period(),
            budget_amount: budget.budget_amount,
            spent_amount: budget.spent_amount,
            progress,
            bar_width: progress_width(progress.percentage_used),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverviewView {
    pub period: Period,
    pub month_totals: Totals,
    pub recent: Vec<TransactionRow>,
    /// Absent until there is a server overview or at least one budget
    pub budget_overview: Option<BudgetOverview>,
    pub overview_bar_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionsView {
    pub rows: Vec<TransactionRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetsView {
    pub cards: Vec<BudgetCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsView {
    pub all_time: Totals,
    pub breakdown: Vec<CategoryShare>,
    pub counts: TransactionCounts,
    pub budget_vs_actual: Vec<BudgetCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TabView {
    Overview(OverviewView),
    Transactions(TransactionsView),
    Budgets(BudgetsView),
    Analytics(AnalyticsView),
}

pub fn overview_view(snapshot: &CacheSnapshot, state: &ViewState) -> OverviewView {
    let budget_overview = if snapshot.overview.is_some() || !snapshot.budgets.is_empty() {
        Some(effective_overview(snapshot.overview.as_ref(), &snapshot.budgets))
    } else {
        None
    };
    let overview_bar_width = budget_overview
        .as_ref()
        .map(|o| progress_width(o.budget_used_percentage))
        .unwrap_or(0.0);

    OverviewView {
        period: state.period,
        month_totals: totals(&snapshot.transactions, Some(state.period)),
        recent: recent_transactions(&snapshot.transactions, state.recent_limit)
            .iter()
            .map(|t| TransactionRow::build(t, &snapshot.categories))
            .collect(),
        budget_overview,
        overview_bar_width,
    }
}

pub fn transactions_view(snapshot: &CacheSnapshot) -> TransactionsView {
    TransactionsView {
        rows: snapshot
            .transactions
            .iter()
            .map(|t| TransactionRow::build(t, &snapshot.categories))
            .collect(),
    }
}

pub fn budgets_view(snapshot: &CacheSnapshot) -> BudgetsView {
    BudgetsView {
        cards: budget_cards(snapshot),
    }
}

pub fn analytics_view(snapshot: &CacheSnapshot) -> AnalyticsView {
    AnalyticsView {
        all_time: totals(&snapshot.transactions, None),
        breakdown: category_breakdown(&snapshot.transactions, &snapshot.categories),
        counts: transaction_counts(&snapshot.transactions),
        budget_vs_actual: budget_cards(snapshot),
    }
}

/// Build whichever tab the view state selects
pub fn build_view(snapshot: &CacheSnapshot, state: &ViewState) -> TabView {
    match state.tab {
        Tab::Overview => TabView::Overview(overview_view(snapshot, state)),
        Tab::Transactions => TabView::Transactions(transactions_view(snapshot)),
        Tab::Budgets => TabView::Budgets(budgets_view(snapshot)),
        Tab::Analytics => TabView::Analytics(analytics_view(snapshot)),
    }
}

fn budget_cards(snapshot: &CacheSnapshot) -> Vec<BudgetCard> {
    snapshot
        .budgets
        .iter()
        .map(|b| BudgetCard::build(b, &snapshot.categories))
        .collect()
}

/// US dollar formatting with thousands separators, e.g. `-$1,234.50`
pub fn format_currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}
