use serde::{Deserialize, Serialize};

use super::cards::{Card, CARD};
use crate::schema::{Field, FieldKind, Schema, Shape};

wire_enum! {
    AccountType {
        Deposit => "DEPOSIT",
        Savings => "SAVINGS",
        DebitCard => "DEBIT_CARD",
        CreditCard => "CREDIT_CARD",
    }
}

wire_enum! {
    AccountStatus {
        Active => "ACTIVE",
        PendingClosure => "PENDING_CLOSURE",
        Closed => "CLOSED",
    }
}

pub static ACCOUNT: Schema = Schema {
    name: "Account",
    fields: &[
        Field::required("id", "id", FieldKind::Text),
        Field::required("type", "type", FieldKind::Enum(AccountType::MEMBERS)),
        Field::required("cards", "cards", FieldKind::List(&CARD)),
        Field::required("status", "status", FieldKind::Enum(AccountStatus::MEMBERS)),
        Field::required("balance", "balance", FieldKind::Number),
    ],
};

pub(crate) static OPEN_ACCOUNT_REQUEST: Schema = Schema {
    name: "OpenAccountRequest",
    fields: &[Field::required("user_id", "userId", FieldKind::Text)],
};

pub(crate) static GET_ACCOUNTS_QUERY: Schema = Schema {
    name: "GetAccountsQuery",
    fields: &[Field::required("user_id", "userId", FieldKind::Text)],
};

/// A customer account with the cards issued against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AccountType,
    pub cards: Vec<Card>,
    pub status: AccountStatus,
    pub balance: f64,
}

impl Shape for Account {
    fn schema() -> &'static Schema {
        &ACCOUNT
    }
}

/// Payload shared by the four open-account endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAccountRequest {
    pub user_id: String,
}

impl Shape for OpenAccountRequest {
    fn schema() -> &'static Schema {
        &OPEN_ACCOUNT_REQUEST
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetAccountsQuery {
    pub user_id: String,
}

impl Shape for GetAccountsQuery {
    fn schema() -> &'static Schema {
        &GET_ACCOUNTS_QUERY
    }
}
