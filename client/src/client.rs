//! # Finance Client
//!
//! The client-side state machine: a session gating access, a cache mirroring
//! the service, and the mutations the views issue.
//!
//! Every successful create or delete is followed by a full cache refresh so
//! server-computed fields (notably each budget's `spentAmount`) are never
//! patched locally.

use shared::{Budget, CategoryType, CreateBudgetRequest, CreateTransactionRequest, Transaction, User};
use std::sync::Arc;
use tracing::{info, warn};

use crate::cache::{CacheSnapshot, LocalDataCache, RefreshReport};
use crate::errors::{ClientError, ClientResult};
use crate::services::FinanceService;
use crate::session::Session;

pub struct FinanceClient {
    service: Arc<dyn FinanceService>,
    session: Session,
    cache: LocalDataCache,
}

impl FinanceClient {
    pub fn new(service: Arc<dyn FinanceService>) -> Self {
        let cache = LocalDataCache::new(service.clone());
        Self {
            service,
            session: Session::new(),
            cache,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn cache(&self) -> &LocalDataCache {
        &self.cache
    }

    pub fn snapshot(&self) -> CacheSnapshot {
        self.cache.snapshot()
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> ClientResult<String> {
        self.session
            .register(self.service.as_ref(), username, email, password)
            .await
    }

    /// Log in and load the user's data. Whatever was cached for a previous
    /// session is dropped first, so a partial refresh never shows it.
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<User> {
        let user = self
            .session
            .login(self.service.as_ref(), email, password)
            .await?
            .clone();

        self.cache.clear();
        self.refresh().await?;
        Ok(user)
    }

    /// Forget the session and everything cached for it
    pub fn logout(&mut self) {
        self.session.logout();
        self.cache.clear();
    }

    pub async fn refresh(&self) -> ClientResult<RefreshReport> {
        let token = self.session.token()?;
        Ok(self.cache.refresh(token).await)
    }

    pub async fn add_transaction(&self, request: CreateTransactionRequest) -> ClientResult<Transaction> {
        let token = self.session.token()?;
        let transaction = self.service.create_transaction(token, &request).await?;
        info!(
            "Added {:?} transaction {} of {:.2}",
            transaction.transaction_type, transaction.id, transaction.amount
        );

        self.refresh_after_mutation(token).await;
        Ok(transaction)
    }

    pub async fn delete_transaction(&self, transaction_id: i64) -> ClientResult<()> {
        let token = self.session.token()?;
        self.service.delete_transaction(token, transaction_id).await?;
        info!("Deleted transaction {}", transaction_id);

        self.refresh_after_mutation(token).await;
        Ok(())
    }

    /// Create a budget. A category the cache knows to be an income category is
    /// refused before reaching the service.
    pub async fn set_budget(&self, request: CreateBudgetRequest) -> ClientResult<Budget> {
        let token = self.session.token()?;

        let snapshot = self.cache.snapshot();
        if let Some(category) = snapshot
            .categories
            .iter()
            .find(|category| category.id == request.category_id)
        {
            if category.category_type != CategoryType::Expense {
                return Err(ClientError::InvalidBudgetCategory(request.category_id));
            }
        }

        let budget = self.service.create_budget(token, &request).await?;
        info!(
            "Set budget {} of {:.2} for category {}",
            budget.id, budget.budget_amount, budget.category_id
        );

        self.refresh_after_mutation(token).await;
        Ok(budget)
    }

    pub async fn delete_budget(&self, budget_id: i64) -> ClientResult<()> {
        let token = self.session.token()?;
        self.service.delete_budget(token, budget_id).await?;
        info!("Deleted budget {}", budget_id);

        self.refresh_after_mutation(token).await;
        Ok(())
    }

    async fn refresh_after_mutation(&self, token: &str) {
        let report = self.cache.refresh(token).await;
        if !report.is_complete() {
            warn!(
                "Refresh after mutation left stale collections: {:?}",
                report.failed_collections()
            );
        }
    }
}
