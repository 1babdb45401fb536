//! Terminal dashboard: signs in, loads the user's data and prints each tab.
//!
//! Usage: `finance-tracker [config.yaml]` with `FINANCE_EMAIL` and
//! `FINANCE_PASSWORD` set.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use finance_tracker_client::views::{
    analytics_view, budgets_view, format_currency, overview_view, transactions_view, Tab, ViewState,
};
use finance_tracker_client::{logging, ApiClient, ClientConfig, FinanceClient};
use tracing::{info, warn};

const DEFAULT_CONFIG_PATH: &str = "finance-tracker.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = ClientConfig::load(&config_path)?;

    logging::init_logging(&config.log_level);
    info!("Using finance service at {}", config.api_base_url);

    let email = std::env::var("FINANCE_EMAIL").context("FINANCE_EMAIL is not set")?;
    let password = std::env::var("FINANCE_PASSWORD").context("FINANCE_PASSWORD is not set")?;

    let service = Arc::new(ApiClient::with_base_url(config.api_base_url.clone()));
    let mut client = FinanceClient::new(service);

    let user = client
        .login(&email, &password)
        .await
        .context("Authentication failed")?;
    println!("Welcome back, {}!", user.username);

    let snapshot = client.snapshot();
    let state = ViewState {
        recent_limit: config.recent_transaction_limit,
        ..ViewState::default()
    };

    print_heading(Tab::Overview);
    let overview = overview_view(&snapshot, &state);
    println!("This month ({})", overview.period);
    println!("  Income    {}", format_currency(overview.month_totals.income));
    println!("  Expenses  {}", format_currency(overview.month_totals.expenses));
    println!("  Net       {}", format_currency(overview.month_totals.net));
    println!("Recent transactions");
    for row in &overview.recent {
        println!(
            "  {}  {:<24} {:<16} {:>12}",
            row.date.get(..10).unwrap_or(&row.date),
            row.description,
            row.category,
            format_currency(row.signed_amount)
        );
    }
    match &overview.budget_overview {
        Some(budgets) => println!(
            "Budget: {} of {} spent ({}%), {} over, {} close to limit",
            format_currency(budgets.total_spent),
            format_currency(budgets.total_budget),
            budgets.budget_used_percentage,
            budgets.over_budget_count,
            budgets.close_to_limit_count
        ),
        None => println!("No budgets set yet"),
    }

    print_heading(Tab::Transactions);
    let transactions = transactions_view(&snapshot);
    if transactions.rows.is_empty() {
        println!("No transactions yet");
    }
    for row in &transactions.rows {
        println!(
            "  #{:<6} {}  {:<24} {:<16} {:>12}",
            row.id,
            row.date.get(..10).unwrap_or(&row.date),
            row.description,
            row.category,
            format_currency(row.signed_amount)
        );
    }

    print_heading(Tab::Budgets);
    for card in &budgets_view(&snapshot).cards {
        println!(
            "  {} {:<16} {:>12} / {:<12} {:>4}% [{}] remaining {}",
            card.icon,
            card.category,
            format_currency(card.spent_amount),
            format_currency(card.budget_amount),
            card.progress.percentage_used,
            card.progress.status,
            format_currency(card.progress.remaining)
        );
    }

    print_heading(Tab::Analytics);
    let analytics = analytics_view(&snapshot);
    println!(
        "All time: income {}, expenses {}, net {} ({} income / {} expense transactions)",
        format_currency(analytics.all_time.income),
        format_currency(analytics.all_time.expenses),
        format_currency(analytics.all_time.net),
        analytics.counts.income,
        analytics.counts.expenses
    );
    for share in &analytics.breakdown {
        println!(
            "  {:<16} {:>12} {:>5.1}%",
            share.name,
            format_currency(share.amount),
            share.percentage
        );
    }

    if client.cache().is_loading() {
        warn!("A refresh is still in flight");
    }
    client.logout();
    Ok(())
}

fn print_heading(tab: Tab) {
    println!();
    println!("== {} ==", tab.label());
}
