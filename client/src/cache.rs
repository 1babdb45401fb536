//! # Local Data Cache
//!
//! In-memory mirror of the signed-in user's transactions, categories, budgets
//! and the service-computed budget overview.
//!
//! ## Refresh policy
//! - The four collections are fetched concurrently and joined before any of
//!   them is written.
//! - Each fetch is guarded on its own: a failure leaves that collection at its
//!   last known value while the others are still replaced.
//! - Failures are logged and reported in the `RefreshReport`, never returned
//!   as an error.
//! - Collections are replaced wholesale; nothing is patched in place. Overlapping
//!   refreshes are not queued, the one that finishes last wins.

use shared::{Budget, BudgetOverview, Category, Transaction};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

use crate::errors::{ClientError, ClientResult};
use crate::services::FinanceService;

/// Owned copy of everything the cache holds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheSnapshot {
    /// In service order
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
    pub budgets: Vec<Budget>,
    /// `None` until the overview has been fetched once
    pub overview: Option<BudgetOverview>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Transactions,
    Categories,
    Budgets,
    Overview,
}

/// What one `refresh` managed to update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshReport {
    pub updated: Vec<Collection>,
    pub failed: Vec<(Collection, ClientError)>,
}

impl RefreshReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_collections(&self) -> Vec<Collection> {
        self.failed.iter().map(|(collection, _)| *collection).collect()
    }
}

pub struct LocalDataCache {
    service: Arc<dyn FinanceService>,
    snapshot: RwLock<CacheSnapshot>,
    in_flight: AtomicUsize,
}

impl LocalDataCache {
    pub fn new(service: Arc<dyn FinanceService>) -> Self {
        Self {
            service,
            snapshot: RwLock::new(CacheSnapshot::default()),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Refetch all four collections with the given bearer token
    pub async fn refresh(&self, token: &str) -> RefreshReport {
        let _loading = InFlight::enter(&self.in_flight);
        debug!("Refreshing cached finance data");

        let (transactions, categories, budgets, overview) = tokio::join!(
            self.service.list_transactions(token),
            self.service.list_categories(token),
            self.service.list_budgets(token),
            self.service.budget_overview(token),
        );

        let mut report = RefreshReport::default();
        {
            let mut snapshot = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
            apply(&mut snapshot.transactions, transactions, Collection::Transactions, &mut report);
            apply(&mut snapshot.categories, categories, Collection::Categories, &mut report);
            apply(&mut snapshot.budgets, budgets, Collection::Budgets, &mut report);
            apply(&mut snapshot.overview, overview.map(Some), Collection::Overview, &mut report);

            info!(
                "Cache refreshed: {} transactions, {} categories, {} budgets ({} of 4 collections updated)",
                snapshot.transactions.len(),
                snapshot.categories.len(),
                snapshot.budgets.len(),
                report.updated.len()
            );
        }

        report
    }

    pub fn snapshot(&self) -> CacheSnapshot {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drop all cached data, e.g. when the user signs out
    pub fn clear(&self) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = CacheSnapshot::default();
        debug!("Cache cleared");
    }

    /// Whether a refresh is currently running
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}

/// Counts a running refresh until dropped, including when the refresh
/// future is cancelled mid-fetch
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

fn apply<T>(
    slot: &mut T,
    result: ClientResult<T>,
    collection: Collection,
    report: &mut RefreshReport,
) {
    match result {
        Ok(value) => {
            *slot = value;
            report.updated.push(collection);
        }
        Err(e) => {
            warn!("Failed to fetch {:?}, keeping last known value: {}", collection, e);
            report.failed.push((collection, e));
        }
    }
}
