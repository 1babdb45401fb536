//! Budget progress, status classification and overview totals.

use shared::{Budget, BudgetOverview, BudgetStatus, Transaction};

/// Share of the budget at which a budget is flagged as close to its limit
pub const WARNING_THRESHOLD: f64 = 0.8;

/// Derived figures for a single budget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetProgress {
    /// Negative once the budget is exceeded
    pub remaining: f64,
    /// Whole percent of the budget spent; 0 for a zero budget
    pub percentage_used: f64,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverviewCounts {
    pub over_budget_count: u32,
    pub close_to_limit_count: u32,
}

/// Whole percentage of `amount` taken by `spent`, 0 when nothing was budgeted
fn rounded_percentage(spent: f64, amount: f64) -> f64 {
    if amount > 0.0 {
        (spent / amount * 100.0).round()
    } else {
        0.0
    }
}

/// Classify spending against a budgeted amount.
///
/// Only spending strictly above the budget is `Over`; reaching exactly 80% or
/// exactly 100% is still `Warning`.
pub fn classify(budget_amount: f64, spent_amount: f64) -> BudgetStatus {
    if spent_amount > budget_amount {
        BudgetStatus::Over
    } else if spent_amount >= WARNING_THRESHOLD * budget_amount {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Good
    }
}

pub fn budget_status(budget: &Budget) -> BudgetProgress {
    BudgetProgress {
        remaining: budget.budget_amount - budget.spent_amount,
        percentage_used: rounded_percentage(budget.spent_amount, budget.budget_amount),
        status: classify(budget.budget_amount, budget.spent_amount),
    }
}

pub fn overview_counts(budgets: &[Budget]) -> OverviewCounts {
    budgets
        .iter()
        .fold(OverviewCounts::default(), |mut counts, budget| {
            match classify(budget.budget_amount, budget.spent_amount) {
                BudgetStatus::Over => counts.over_budget_count += 1,
                BudgetStatus::Warning => counts.close_to_limit_count += 1,
                BudgetStatus::Good => {}
            }
            counts
        })
}

/// Expenses in the budget's category, limited to the budget's month when it has one
pub fn budget_spent(budget: &Budget, transactions: &[Transaction]) -> f64 {
    let period = budget.period();

    transactions
        .iter()
        .filter(|t| t.is_expense())
        .filter(|t| t.category_id == Some(budget.category_id))
        .filter(|t| period.is_none() || t.period() == period)
        .map(|t| t.amount)
        .sum()
}

/// Recompute the overview locally from the budgets' spent amounts
pub fn budget_overview(budgets: &[Budget]) -> BudgetOverview {
    let total_budget: f64 = budgets.iter().map(|b| b.budget_amount).sum();
    let total_spent: f64 = budgets.iter().map(|b| b.spent_amount).sum();
    let counts = overview_counts(budgets);

    BudgetOverview {
        total_budget,
        total_spent,
        remaining_budget: total_budget - total_spent,
        budget_used_percentage: rounded_percentage(total_spent, total_budget),
        over_budget_count: counts.over_budget_count,
        close_to_limit_count: counts.close_to_limit_count,
    }
}

/// The service's overview when one was fetched, otherwise a local recomputation
pub fn effective_overview(server: Option<&BudgetOverview>, budgets: &[Budget]) -> BudgetOverview {
    match server {
        Some(overview) => overview.clone(),
        None => budget_overview(budgets),
    }
}

/// Progress bar fill for a percentage, capped at 100
pub fn progress_width(percentage: f64) -> f64 {
    if percentage.is_nan() {
        return 0.0;
    }
    percentage.clamp(0.0, 100.0)
}
