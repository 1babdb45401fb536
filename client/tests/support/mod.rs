//! In-process stand-in for the remote finance service, speaking its JSON
//! envelope format over real HTTP.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const EMAIL: &str = "alex@example.com";
pub const PASSWORD: &str = "hunter2";
pub const TOKEN: &str = "stub-token";

#[derive(Default)]
pub struct StubState {
    pub transactions: Vec<Value>,
    pub budgets: Vec<Value>,
    pub registered: Vec<String>,
    pub overview_broken: bool,
    pub auth_headers: Vec<String>,
    pub received: Vec<Value>,
    next_id: i64,
}

pub type SharedStub = Arc<Mutex<StubState>>;

pub struct StubServer {
    pub base_url: String,
    pub state: SharedStub,
}

fn categories() -> Value {
    json!([
        { "id": 1, "name": "Salary", "icon": "💼", "type": "income" },
        { "id": 2, "name": "Food", "icon": "🍔", "type": "expense" },
        { "id": 3, "name": "Rent", "icon": "🏠", "type": "expense" }
    ])
}

fn category(id: i64) -> Value {
    categories()
        .as_array()
        .and_then(|all| all.iter().find(|c| c["id"] == id).cloned())
        .unwrap_or(Value::Null)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "message": "Access denied. No token provided." })),
    )
        .into_response()
}

fn authorized(state: &SharedStub, headers: &HeaderMap) -> bool {
    let header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let ok = header == format!("Bearer {}", TOKEN);
    state.lock().unwrap().auth_headers.push(header);
    ok
}

impl StubState {
    /// Salary, two food expenses, one uncategorized expense and a June food budget
    pub fn seed_scenario(&mut self) {
        self.push_transaction(json!({ "amount": "1000.00", "description": "Salary", "type": "income", "date": "2025-06-10T09:00:00.000Z", "CategoryId": 1 }));
        self.push_transaction(json!({ "amount": "200.00", "description": "Groceries", "type": "expense", "date": "2025-06-12T09:00:00.000Z", "CategoryId": 2 }));
        self.push_transaction(json!({ "amount": 50, "description": "Takeout", "type": "expense", "date": "2025-06-03", "CategoryId": 2 }));
        self.push_transaction(json!({ "amount": 30, "description": "Parking", "type": "expense", "date": "2025-06-04", "CategoryId": null }));
        self.next_id += 1;
        self.budgets.push(json!({
            "id": self.next_id, "CategoryId": 2, "budgetAmount": "300.00", "month": 6, "year": 2025
        }));
    }

    fn push_transaction(&mut self, mut transaction: Value) -> Value {
        self.next_id += 1;
        transaction["id"] = json!(self.next_id);
        self.transactions.push(transaction.clone());
        transaction
    }

    fn spent(&self, budget: &Value) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t["type"] == "expense" && t["CategoryId"] == budget["CategoryId"])
            .map(|t| match &t["amount"] {
                Value::String(s) => s.parse::<f64>().unwrap_or(0.0),
                other => other.as_f64().unwrap_or(0.0),
            })
            .sum()
    }

    fn listed_budgets(&self) -> Vec<Value> {
        self.budgets
            .iter()
            .map(|b| {
                let mut b = b.clone();
                b["spentAmount"] = json!(self.spent(&b));
                b["Category"] = category(b["CategoryId"].as_i64().unwrap_or_default());
                b
            })
            .collect()
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        Json(json!({
            "success": true,
            "token": TOKEN,
            "user": { "id": 1, "username": "alex", "email": EMAIL }
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid credentials" })),
        )
            .into_response()
    }
}

async fn register(State(state): State<SharedStub>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let mut state = state.lock().unwrap();
    if email == EMAIL || state.registered.contains(&email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "Email already registered" })),
        )
            .into_response();
    }
    state.registered.push(email);
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "User registered successfully" })),
    )
        .into_response()
}

async fn list_categories(State(state): State<SharedStub>, headers: HeaderMap) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    Json(json!({ "success": true, "categories": categories() })).into_response()
}

async fn list_transactions(State(state): State<SharedStub>, headers: HeaderMap) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let state = state.lock().unwrap();
    let transactions: Vec<Value> = state
        .transactions
        .iter()
        .map(|t| {
            let mut t = t.clone();
            t["Category"] = category(t["CategoryId"].as_i64().unwrap_or_default());
            t
        })
        .collect();
    Json(json!({ "success": true, "transactions": transactions })).into_response()
}

async fn create_transaction(
    State(state): State<SharedStub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    state.received.push(body.clone());

    let mut transaction = body;
    if transaction.get("date").is_none() {
        transaction["date"] = json!("2025-06-20T12:00:00.000Z");
    }
    let created = state.push_transaction(transaction);
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "transaction": created })),
    )
        .into_response()
}

async fn delete_transaction(
    State(state): State<SharedStub>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    let before = state.transactions.len();
    state.transactions.retain(|t| t["id"] != id);
    if state.transactions.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "Transaction not found" })),
        )
            .into_response();
    }
    Json(json!({ "success": true })).into_response()
}

async fn list_budgets(State(state): State<SharedStub>, headers: HeaderMap) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let state = state.lock().unwrap();
    Json(json!({ "success": true, "budgets": state.listed_budgets() })).into_response()
}

async fn create_budget(
    State(state): State<SharedStub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let mut state = state.lock().unwrap();
    state.received.push(body.clone());

    if category(body["CategoryId"].as_i64().unwrap_or_default())["type"] != "expense" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "Invalid category for budget" })),
        )
            .into_response();
    }

    state.next_id += 1;
    let mut budget = body;
    budget["id"] = json!(state.next_id);
    state.budgets.push(budget.clone());
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "budget": budget })),
    )
        .into_response()
}

async fn delete_budget(
    State(state): State<SharedStub>,
    headers: HeaderMap,
    Path(segment): Path<String>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let id: i64 = segment.parse().unwrap_or_default();
    let mut state = state.lock().unwrap();
    state.budgets.retain(|b| b["id"] != id);
    Json(json!({ "success": true })).into_response()
}

/// `GET /budgets/:id` only knows the `overview` segment
async fn budget_overview(
    State(state): State<SharedStub>,
    headers: HeaderMap,
    Path(segment): Path<String>,
) -> Response {
    if segment != "overview" {
        return StatusCode::NOT_FOUND.into_response();
    }
    if !authorized(&state, &headers) {
        return unauthorized();
    }
    let state = state.lock().unwrap();
    if state.overview_broken {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
    }

    let budgets = state.listed_budgets();
    let total_budget: f64 = budgets
        .iter()
        .map(|b| match &b["budgetAmount"] {
            Value::String(s) => s.parse::<f64>().unwrap_or(0.0),
            other => other.as_f64().unwrap_or(0.0),
        })
        .sum();
    let total_spent: f64 = budgets.iter().filter_map(|b| b["spentAmount"].as_f64()).sum();
    let used = if total_budget > 0.0 {
        (total_spent / total_budget * 100.0).round()
    } else {
        0.0
    };

    Json(json!({
        "success": true,
        "overview": {
            "totalBudget": total_budget,
            "totalSpent": total_spent,
            "remainingBudget": total_budget - total_spent,
            "budgetUsedPercentage": used,
            "overBudgetCount": 0,
            "closeToLimitCount": 0
        },
        "budgets": budgets
    }))
    .into_response()
}

/// Start the stub on an ephemeral port
pub async fn spawn(state: StubState) -> StubServer {
    let state: SharedStub = Arc::new(Mutex::new(state));

    let api = Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/categories", get(list_categories))
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route("/transactions/:id", delete(delete_transaction))
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/:id", get(budget_overview).delete(delete_budget))
        .with_state(state.clone());
    let app = Router::new().nest("/api", api);

    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubServer {
        base_url: format!("http://{}/api", addr),
        state,
    }
}
