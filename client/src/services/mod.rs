//! # Finance Service Seam
//!
//! The remote finance service is reached through the `FinanceService` trait so
//! the session, cache and facade can run against the HTTP client in production
//! and against in-memory fakes in tests.
//!
//! Implementations turn a `success: false` answer into `ClientError::Rejected`
//! and transport or decoding problems into `ClientError::Connection`, so every
//! caller sees the same taxonomy regardless of backend.

pub mod http;

use async_trait::async_trait;
use shared::{
    Budget, BudgetOverview, Category, CreateBudgetRequest, CreateTransactionRequest, LoginRequest,
    RegisterRequest, Transaction, User,
};

use crate::errors::ClientResult;

pub use http::ApiClient;

/// Successful login: bearer token plus the identity it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct LoginGrant {
    pub token: String,
    pub user: User,
}

/// Operations the client consumes from the remote finance service
#[async_trait]
pub trait FinanceService: Send + Sync {
    /// Create an account; returns the service's confirmation message
    async fn register(&self, request: &RegisterRequest) -> ClientResult<String>;

    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginGrant>;

    /// Categories in service order
    async fn list_categories(&self, token: &str) -> ClientResult<Vec<Category>>;

    /// Transactions in service order, each optionally embedding its category
    async fn list_transactions(&self, token: &str) -> ClientResult<Vec<Transaction>>;

    async fn create_transaction(
        &self,
        token: &str,
        request: &CreateTransactionRequest,
    ) -> ClientResult<Transaction>;

    async fn delete_transaction(&self, token: &str, transaction_id: i64) -> ClientResult<()>;

    /// Budgets in service order with `spentAmount` filled in
    async fn list_budgets(&self, token: &str) -> ClientResult<Vec<Budget>>;

    async fn create_budget(&self, token: &str, request: &CreateBudgetRequest) -> ClientResult<Budget>;

    async fn delete_budget(&self, token: &str, budget_id: i64) -> ClientResult<()>;

    /// Precomputed totals across all budgets
    async fn budget_overview(&self, token: &str) -> ClientResult<BudgetOverview>;
}
