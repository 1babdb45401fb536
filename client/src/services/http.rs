use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use shared::{
    Budget, BudgetListResponse, BudgetOverview, BudgetOverviewResponse, BudgetResponse, Category,
    CategoryListResponse, CreateBudgetRequest, CreateTransactionRequest, DeleteResponse,
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, Transaction,
    TransactionListResponse, TransactionResponse,
};
use tracing::{debug, error, warn};

use super::{FinanceService, LoginGrant};
use crate::errors::{ClientError, ClientResult};

pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

/// API client for communicating with the finance service over HTTP
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE.to_string())
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request.bearer_auth(token)
    }

    /// Send a request and decode the JSON envelope whatever the HTTP status.
    /// The service reports business failures as `success: false` bodies, often
    /// with a 4xx status, so the status alone decides nothing.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> ClientResult<T> {
        let response = request.send().await.map_err(|e| {
            error!("Network error during {}: {}", what, e);
            ClientError::Connection(e.to_string())
        })?;

        let status = response.status();
        let body = response.text().await?;
        debug!("{} answered {} ({} bytes)", what, status, body.len());

        serde_json::from_str::<T>(&body).map_err(|e| {
            warn!("Failed to parse {} response ({}): {}", what, status, e);
            ClientError::Connection(format!("unexpected {} response ({}): {}", what, status, e))
        })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FinanceService for ApiClient {
    async fn register(&self, request: &RegisterRequest) -> ClientResult<String> {
        let response: RegisterResponse = self
            .send(self.http.post(self.url("/register")).json(request), "register")
            .await?;

        if response.success {
            Ok(response
                .message
                .unwrap_or_else(|| "Registration successful".to_string()))
        } else {
            Err(ClientError::rejected(response.message, "Registration failed"))
        }
    }

    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginGrant> {
        let response: LoginResponse = self
            .send(self.http.post(self.url("/login")).json(request), "login")
            .await?;

        if !response.success {
            return Err(ClientError::rejected(response.message, "Authentication failed"));
        }

        match (response.token, response.user) {
            (Some(token), Some(user)) => Ok(LoginGrant { token, user }),
            _ => Err(ClientError::Connection(
                "login response is missing token or user".to_string(),
            )),
        }
    }

    async fn list_categories(&self, token: &str) -> ClientResult<Vec<Category>> {
        let request = self.authorized(self.http.get(self.url("/categories")), token);
        let response: CategoryListResponse = self.send(request, "list categories").await?;

        if response.success {
            Ok(response.categories)
        } else {
            Err(ClientError::rejected(response.message, "Failed to load categories"))
        }
    }

    async fn list_transactions(&self, token: &str) -> ClientResult<Vec<Transaction>> {
        let request = self.authorized(self.http.get(self.url("/transactions")), token);
        let response: TransactionListResponse = self.send(request, "list transactions").await?;

        if response.success {
            Ok(response.transactions)
        } else {
            Err(ClientError::rejected(response.message, "Failed to load transactions"))
        }
    }

    async fn create_transaction(
        &self,
        token: &str,
        request: &CreateTransactionRequest,
    ) -> ClientResult<Transaction> {
        let http_request = self
            .authorized(self.http.post(self.url("/transactions")), token)
            .json(request);
        let response: TransactionResponse = self.send(http_request, "create transaction").await?;

        match (response.success, response.transaction) {
            (true, Some(transaction)) => Ok(transaction),
            (true, None) => Err(ClientError::Connection(
                "create transaction response is missing the transaction".to_string(),
            )),
            (false, _) => Err(ClientError::rejected(response.message, "Failed to add transaction")),
        }
    }

    async fn delete_transaction(&self, token: &str, transaction_id: i64) -> ClientResult<()> {
        let request = self.authorized(
            self.http.delete(self.url(&format!("/transactions/{}", transaction_id))),
            token,
        );
        let response: DeleteResponse = self.send(request, "delete transaction").await?;

        if response.success {
            Ok(())
        } else {
            Err(ClientError::rejected(response.message, "Failed to delete transaction"))
        }
    }

    async fn list_budgets(&self, token: &str) -> ClientResult<Vec<Budget>> {
        let request = self.authorized(self.http.get(self.url("/budgets")), token);
        let response: BudgetListResponse = self.send(request, "list budgets").await?;

        if response.success {
            Ok(response.budgets)
        } else {
            Err(ClientError::rejected(response.message, "Failed to load budgets"))
        }
    }

    async fn create_budget(&self, token: &str, request: &CreateBudgetRequest) -> ClientResult<Budget> {
        let http_request = self
            .authorized(self.http.post(self.url("/budgets")), token)
            .json(request);
        let response: BudgetResponse = self.send(http_request, "create budget").await?;

        match (response.success, response.budget) {
            (true, Some(budget)) => Ok(budget),
            (true, None) => Err(ClientError::Connection(
                "create budget response is missing the budget".to_string(),
            )),
            (false, _) => Err(ClientError::rejected(response.message, "Failed to set budget")),
        }
    }

    async fn delete_budget(&self, token: &str, budget_id: i64) -> ClientResult<()> {
        let request = self.authorized(
            self.http.delete(self.url(&format!("/budgets/{}", budget_id))),
            token,
        );
        let response: DeleteResponse = self.send(request, "delete budget").await?;

        if response.success {
            Ok(())
        } else {
            Err(ClientError::rejected(response.message, "Failed to delete budget"))
        }
    }

    async fn budget_overview(&self, token: &str) -> ClientResult<BudgetOverview> {
        let request = self.authorized(self.http.get(self.url("/budgets/overview")), token);
        let response: BudgetOverviewResponse = self.send(request, "budget overview").await?;

        match (response.success, response.overview) {
            (true, Some(overview)) => Ok(overview),
            (true, None) => Err(ClientError::Connection(
                "budget overview response is missing the overview".to_string(),
            )),
            (false, _) => Err(ClientError::rejected(response.message, "Failed to load budget overview")),
        }
    }
}
