//! Transaction totals and category breakdowns.

use shared::{Category, Period, Transaction};

/// Label used for expenses without a resolvable category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Income, expenses and their difference over a set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

/// One row of the expense breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub name: String,
    pub icon: Option<String>,
    pub amount: f64,
    /// Share of all expenses, 0-100; 0 when there are no expenses
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionCounts {
    pub income: usize,
    pub expenses: usize,
}

/// Sum income and expenses, optionally only for transactions dated within `period`.
///
/// A transaction whose date cannot be read never matches a period, but still
/// counts towards the all-time figures.
pub fn totals(transactions: &[Transaction], period: Option<Period>) -> Totals {
    let mut totals = Totals::default();

    for transaction in transactions {
        if let Some(period) = period {
            if transaction.period() != Some(period) {
                continue;
            }
        }

        if transaction.is_income() {
            totals.income += transaction.amount;
        } else {
            totals.expenses += transaction.amount;
        }
    }

    totals.net = totals.income - totals.expenses;
    totals
}

/// The first `n` transactions in the order the service returned them.
/// No date sort is applied.
pub fn recent_transactions(transactions: &[Transaction], n: usize) -> &[Transaction] {
    &transactions[..n.min(transactions.len())]
}

/// The category a transaction belongs to: the embedded one first, then a
/// lookup of its category id.
pub fn resolve_category<'a>(
    transaction: &'a Transaction,
    categories: &'a [Category],
) -> Option<&'a Category> {
    transaction.category.as_ref().or_else(|| {
        transaction
            .category_id
            .and_then(|id| categories.iter().find(|category| category.id == id))
    })
}

/// Display name for a transaction's category, never missing
pub fn category_name<'a>(transaction: &'a Transaction, categories: &'a [Category]) -> &'a str {
    resolve_category(transaction, categories)
        .map(|category| category.name.as_str())
        .unwrap_or(UNCATEGORIZED)
}

/// Group expenses by category name and compute each group's share.
/// Rows keep the order in which each name first appears.
pub fn category_breakdown(transactions: &[Transaction], categories: &[Category]) -> Vec<CategoryShare> {
    let mut shares: Vec<CategoryShare> = Vec::new();
    let mut total_expenses = 0.0;

    for transaction in transactions.iter().filter(|t| t.is_expense()) {
        total_expenses += transaction.amount;

        let category = resolve_category(transaction, categories);
        let name = category.map(|c| c.name.as_str()).unwrap_or(UNCATEGORIZED);

        match shares.iter_mut().find(|share| share.name == name) {
            Some(share) => share.amount += transaction.amount,
            None => shares.push(CategoryShare {
                name: name.to_string(),
                icon: category.and_then(|c| c.icon.clone()),
                amount: transaction.amount,
                percentage: 0.0,
            }),
        }
    }

    if total_expenses > 0.0 {
        for share in &mut shares {
            share.percentage = share.amount / total_expenses * 100.0;
        }
    }

    shares
}

pub fn transaction_counts(transactions: &[Transaction]) -> TransactionCounts {
    let income = transactions.iter().filter(|t| t.is_income()).count();
    TransactionCounts {
        income,
        expenses: transactions.len() - income,
    }
}
