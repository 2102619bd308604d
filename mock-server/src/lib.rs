use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{TimeDelta, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub phone_number: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub phone_number: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    pub pin: String,
    pub cvv: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub account_id: Uuid,
    pub card_number: String,
    pub card_holder: String,
    pub expiry_date: String,
    pub payment_system: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub cards: Vec<Card>,
    pub status: String,
    pub balance: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Failed,
    Completed,
    InProgress,
    Unspecified,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: OperationStatus,
    pub amount: f64,
    pub card_id: Uuid,
    pub category: String,
    pub created_at: String,
    pub account_id: Uuid,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Document {
    pub url: String,
    pub document: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub spent_amount: f64,
    pub received_amount: f64,
    pub cashback_amount: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenAccount {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCard {
    pub user_id: Uuid,
    pub account_id: Uuid,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakeOperation {
    pub status: OperationStatus,
    pub amount: f64,
    pub card_id: Uuid,
    pub account_id: Uuid,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountQuery {
    pub account_id: Uuid,
}

#[derive(Default)]
pub struct Store {
    users: HashMap<Uuid, User>,
    accounts: HashMap<Uuid, Account>,
    owners: HashMap<Uuid, Uuid>,
    operations: Vec<Operation>,
}

pub type Db = Arc<RwLock<Store>>;

/// Operation kinds that take money out of an account.
const SPENDING: &[&str] = &["FEE", "PURCHASE", "TRANSFER", "BILL_PAYMENT", "CASH_WITHDRAWAL"];

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/v1/users", post(create_user))
        .route("/api/v1/users/{user_id}", get(get_user))
        .route("/api/v1/accounts", get(get_accounts))
        .route(
            "/api/v1/accounts/open-deposit-account",
            post(|db: State<Db>, input: Json<OpenAccount>| open_account(db, input, "DEPOSIT")),
        )
        .route(
            "/api/v1/accounts/open-savings-account",
            post(|db: State<Db>, input: Json<OpenAccount>| open_account(db, input, "SAVINGS")),
        )
        .route(
            "/api/v1/accounts/open-debit-card-account",
            post(|db: State<Db>, input: Json<OpenAccount>| open_account(db, input, "DEBIT_CARD")),
        )
        .route(
            "/api/v1/accounts/open-credit-card-account",
            post(|db: State<Db>, input: Json<OpenAccount>| open_account(db, input, "CREDIT_CARD")),
        )
        .route(
            "/api/v1/cards/issue-virtual-card",
            post(|db: State<Db>, input: Json<IssueCard>| issue_card(db, input, "VIRTUAL")),
        )
        .route(
            "/api/v1/cards/issue-physical-card",
            post(|db: State<Db>, input: Json<IssueCard>| issue_card(db, input, "PHYSICAL")),
        )
        .route("/api/v1/operations", get(get_operations))
        .route("/api/v1/operations/{operation_id}", get(get_operation))
        .route(
            "/api/v1/operations/operation-receipt/{operation_id}",
            get(get_operation_receipt),
        )
        .route("/api/v1/operations/operations-summary", get(get_operations_summary))
        .route(
            "/api/v1/operations/make-fee-operation",
            post(|db: State<Db>, input: Json<MakeOperation>| make_operation(db, input, "FEE")),
        )
        .route(
            "/api/v1/operations/make-top-up-operation",
            post(|db: State<Db>, input: Json<MakeOperation>| make_operation(db, input, "TOP_UP")),
        )
        .route(
            "/api/v1/operations/make-cashback-operation",
            post(|db: State<Db>, input: Json<MakeOperation>| make_operation(db, input, "CASHBACK")),
        )
        .route(
            "/api/v1/operations/make-transfer-operation",
            post(|db: State<Db>, input: Json<MakeOperation>| make_operation(db, input, "TRANSFER")),
        )
        .route(
            "/api/v1/operations/make-purchase-operation",
            post(|db: State<Db>, input: Json<MakeOperation>| make_operation(db, input, "PURCHASE")),
        )
        .route(
            "/api/v1/operations/make-bill-payment-operation",
            post(|db: State<Db>, input: Json<MakeOperation>| make_operation(db, input, "BILL_PAYMENT")),
        )
        .route(
            "/api/v1/operations/make-cash-withdrawal-operation",
            post(|db: State<Db>, input: Json<MakeOperation>| make_operation(db, input, "CASH_WITHDRAWAL")),
        )
        .route("/api/v1/documents/tariff-document/{account_id}", get(get_tariff_document))
        .route(
            "/api/v1/documents/contract-document/{account_id}",
            get(get_contract_document),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn create_user(State(db): State<Db>, Json(input): Json<CreateUser>) -> Json<Value> {
    let user = User {
        id: Uuid::new_v4(),
        email: input.email,
        last_name: input.last_name,
        first_name: input.first_name,
        middle_name: input.middle_name,
        phone_number: input.phone_number,
    };
    db.write().await.users.insert(user.id, user.clone());
    info!(user_id = %user.id, "created user");
    Json(json!({ "user": user }))
}

async fn get_user(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Value>, StatusCode> {
    let store = db.read().await;
    let user = store.users.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(json!({ "user": user })))
}

async fn get_accounts(State(db): State<Db>, Query(query): Query<UserQuery>) -> Json<Value> {
    let store = db.read().await;
    let accounts: Vec<&Account> = store
        .owners
        .iter()
        .filter(|(_, owner)| **owner == query.user_id)
        .filter_map(|(account_id, _)| store.accounts.get(account_id))
        .collect();
    Json(json!({ "accounts": accounts }))
}

async fn open_account(
    State(db): State<Db>,
    Json(input): Json<OpenAccount>,
    kind: &'static str,
) -> Result<Json<Value>, StatusCode> {
    let mut store = db.write().await;
    let holder = {
        let user = store.users.get(&input.user_id).ok_or(StatusCode::NOT_FOUND)?;
        format!("{} {}", user.first_name, user.last_name)
    };

    let id = Uuid::new_v4();
    let cards = match kind {
        "DEBIT_CARD" | "CREDIT_CARD" => vec![new_card(id, "PHYSICAL", &holder)],
        _ => Vec::new(),
    };
    let account = Account {
        id,
        kind: kind.to_string(),
        cards,
        status: "ACTIVE".to_string(),
        balance: 0.0,
    };
    store.accounts.insert(id, account.clone());
    store.owners.insert(id, input.user_id);
    info!(account_id = %id, kind, "opened account");
    Ok(Json(json!({ "account": account })))
}

async fn issue_card(
    State(db): State<Db>,
    Json(input): Json<IssueCard>,
    kind: &'static str,
) -> Result<Json<Value>, StatusCode> {
    let mut store = db.write().await;
    if store.owners.get(&input.account_id) != Some(&input.user_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let holder = {
        let user = store.users.get(&input.user_id).ok_or(StatusCode::NOT_FOUND)?;
        format!("{} {}", user.first_name, user.last_name)
    };
    let card = new_card(input.account_id, kind, &holder);
    let account = store.accounts.get_mut(&input.account_id).ok_or(StatusCode::NOT_FOUND)?;
    account.cards.push(card.clone());
    Ok(Json(json!({ "card": card })))
}

async fn get_operation(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Value>, StatusCode> {
    let store = db.read().await;
    let operation = store.operation(id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(json!({ "operation": operation })))
}

async fn get_operation_receipt(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, StatusCode> {
    let store = db.read().await;
    let operation = store.operation(id).ok_or(StatusCode::NOT_FOUND)?;
    let receipt = Document {
        url: format!("https://gateway.local/receipts/{id}"),
        document: format!(
            "RECEIPT {id}\n{} {:.2} {:?} at {}",
            operation.kind, operation.amount, operation.status, operation.created_at
        ),
    };
    Ok(Json(json!({ "receipt": receipt })))
}

async fn get_operations(
    State(db): State<Db>,
    Query(query): Query<AccountQuery>,
) -> Result<Json<Value>, StatusCode> {
    let store = db.read().await;
    if !store.accounts.contains_key(&query.account_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let operations: Vec<&Operation> = store
        .operations
        .iter()
        .filter(|operation| operation.account_id == query.account_id)
        .collect();
    Ok(Json(json!({ "operations": operations })))
}

async fn get_operations_summary(
    State(db): State<Db>,
    Query(query): Query<AccountQuery>,
) -> Result<Json<Value>, StatusCode> {
    let store = db.read().await;
    if !store.accounts.contains_key(&query.account_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let mut summary = Summary {
        spent_amount: 0.0,
        received_amount: 0.0,
        cashback_amount: 0.0,
    };
    for operation in store
        .operations
        .iter()
        .filter(|operation| operation.account_id == query.account_id)
        .filter(|operation| operation.status != OperationStatus::Failed)
    {
        match operation.kind.as_str() {
            "TOP_UP" => summary.received_amount += operation.amount,
            "CASHBACK" => summary.cashback_amount += operation.amount,
            _ => summary.spent_amount += operation.amount,
        }
    }
    Ok(Json(json!({ "summary": summary })))
}

async fn make_operation(
    State(db): State<Db>,
    Json(input): Json<MakeOperation>,
    kind: &'static str,
) -> Result<Json<Value>, StatusCode> {
    let mut store = db.write().await;
    let account = store.accounts.get_mut(&input.account_id).ok_or(StatusCode::NOT_FOUND)?;
    if !account.cards.iter().any(|card| card.id == input.card_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    if input.status == OperationStatus::Completed {
        if SPENDING.contains(&kind) {
            account.balance -= input.amount;
        } else {
            account.balance += input.amount;
        }
    }

    let operation = Operation {
        id: Uuid::new_v4(),
        kind: kind.to_string(),
        status: input.status,
        amount: input.amount,
        card_id: input.card_id,
        category: input.category.unwrap_or_else(|| kind.to_lowercase()),
        created_at: Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
        account_id: input.account_id,
    };
    store.operations.push(operation.clone());
    info!(operation_id = %operation.id, kind, "made operation");
    Ok(Json(json!({ "operation": operation })))
}

async fn get_tariff_document(
    State(db): State<Db>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<Value>, StatusCode> {
    let document = account_document(&db, account_id, "tariff").await?;
    Ok(Json(json!({ "tariff": document })))
}

async fn get_contract_document(
    State(db): State<Db>,
    Path(account_id): Path<Uuid>,
) -> Result<Json<Value>, StatusCode> {
    let document = account_document(&db, account_id, "contract").await?;
    Ok(Json(json!({ "contract": document })))
}

async fn account_document(db: &Db, account_id: Uuid, name: &str) -> Result<Document, StatusCode> {
    let store = db.read().await;
    let account = store.accounts.get(&account_id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Document {
        url: format!("https://gateway.local/documents/{name}/{account_id}"),
        document: format!("{} {name} for account {account_id}", account.kind),
    })
}

impl Store {
    fn operation(&self, id: Uuid) -> Option<&Operation> {
        self.operations.iter().find(|operation| operation.id == id)
    }
}

fn new_card(account_id: Uuid, kind: &str, holder: &str) -> Card {
    let mut rng = rand::rng();
    let (payment_system, prefix) = if rng.random_bool(0.5) {
        ("VISA", "4")
    } else {
        ("MASTERCARD", "5")
    };
    Card {
        id: Uuid::new_v4(),
        pin: digits(4),
        cvv: digits(3),
        kind: kind.to_string(),
        status: "ACTIVE".to_string(),
        account_id,
        card_number: format!("{prefix}{}", digits(15)),
        card_holder: holder.to_string(),
        expiry_date: (Utc::now() + TimeDelta::days(4 * 365)).format("%Y-%m-%d").to_string(),
        payment_system: payment_system.to_string(),
    }
}

fn digits(count: usize) -> String {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}
