//! Declarative endpoint table for the gateway API.
//!
//! # Design
//! A `Route` is plain data: method, path template, where leftover fields
//! travel, and the response envelope key. `{placeholder}` segments in the path
//! are wire names consumed from the encoded request and filled in
//! percent-encoded, so a value can never reach another segment or the query;
//! whatever remains goes to the JSON body or the query string according to
//! `Carrier`. The typed
//! pairing of request and response shapes lives in the resource clients.

use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::schema::Envelope;

/// Where request fields that are not path parameters are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Carrier {
    Body,
    Query,
    /// Every field must be consumed by the path.
    PathOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub carrier: Carrier,
    pub envelope: Envelope,
}

impl Route {
    pub const fn post(name: &'static str, path: &'static str, key: &'static str) -> Self {
        Self {
            name,
            method: HttpMethod::Post,
            path,
            carrier: Carrier::Body,
            envelope: Envelope::new(key),
        }
    }

    pub const fn get(name: &'static str, path: &'static str, key: &'static str) -> Self {
        Self {
            name,
            method: HttpMethod::Get,
            path,
            carrier: Carrier::PathOnly,
            envelope: Envelope::new(key),
        }
    }

    pub const fn query(name: &'static str, path: &'static str, key: &'static str) -> Self {
        Self {
            name,
            method: HttpMethod::Get,
            path,
            carrier: Carrier::Query,
            envelope: Envelope::new(key),
        }
    }

    /// Build the HTTP request for an encoded (wire-named) payload.
    pub fn request(&self, base_url: &str, mut wire: Map<String, Value>) -> Result<HttpRequest, ApiError> {
        let mut url = String::with_capacity(base_url.len() + self.path.len());
        url.push_str(base_url);

        let mut rest = self.path;
        while let Some(open) = rest.find('{') {
            let close = rest[open..]
                .find('}')
                .map(|offset| open + offset)
                .ok_or_else(|| ApiError::Serialization(format!("unterminated placeholder in {}", self.path)))?;
            let key = &rest[open + 1..close];
            let value = wire
                .remove(key)
                .ok_or_else(|| ApiError::construction(self.name, key, "is required as a path parameter"))?;
            url.push_str(&rest[..open]);
            url.push_str(&urlencoding::encode(&scalar(self.name, key, &value)?));
            rest = &rest[close + 1..];
        }
        url.push_str(rest);

        let (query, headers, body) = match self.carrier {
            Carrier::Body => {
                let body = serde_json::to_string(&Value::Object(wire))
                    .map_err(|e| ApiError::Serialization(e.to_string()))?;
                (
                    Vec::new(),
                    vec![("content-type".to_string(), "application/json".to_string())],
                    Some(body),
                )
            }
            Carrier::Query => {
                let query = wire
                    .iter()
                    .map(|(key, value)| Ok((key.clone(), scalar(self.name, key, value)?)))
                    .collect::<Result<Vec<_>, ApiError>>()?;
                (query, Vec::new(), None)
            }
            Carrier::PathOnly => {
                if let Some(key) = wire.keys().next() {
                    return Err(ApiError::construction(self.name, key.as_str(), "has no place in the request"));
                }
                (Vec::new(), Vec::new(), None)
            }
        };

        Ok(HttpRequest {
            method: self.method,
            url,
            query,
            headers,
            body,
        })
    }
}

/// Render a path or query value.
fn scalar(route: &'static str, key: &str, value: &Value) -> Result<String, ApiError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ApiError::construction(route, key, "must be a scalar")),
    }
}

pub const CREATE_USER: Route = Route::post("create_user", "/api/v1/users", "user");
pub const GET_USER: Route = Route::get("get_user", "/api/v1/users/{userId}", "user");

pub const OPEN_DEPOSIT_ACCOUNT: Route = Route::post(
    "open_deposit_account",
    "/api/v1/accounts/open-deposit-account",
    "account",
);
pub const OPEN_SAVINGS_ACCOUNT: Route = Route::post(
    "open_savings_account",
    "/api/v1/accounts/open-savings-account",
    "account",
);
pub const OPEN_DEBIT_CARD_ACCOUNT: Route = Route::post(
    "open_debit_card_account",
    "/api/v1/accounts/open-debit-card-account",
    "account",
);
pub const OPEN_CREDIT_CARD_ACCOUNT: Route = Route::post(
    "open_credit_card_account",
    "/api/v1/accounts/open-credit-card-account",
    "account",
);
pub const GET_ACCOUNTS: Route = Route::query("get_accounts", "/api/v1/accounts", "accounts");

pub const ISSUE_VIRTUAL_CARD: Route = Route::post("issue_virtual_card", "/api/v1/cards/issue-virtual-card", "card");
pub const ISSUE_PHYSICAL_CARD: Route = Route::post("issue_physical_card", "/api/v1/cards/issue-physical-card", "card");

pub const GET_OPERATION: Route = Route::get("get_operation", "/api/v1/operations/{operationId}", "operation");
pub const GET_OPERATION_RECEIPT: Route = Route::get(
    "get_operation_receipt",
    "/api/v1/operations/operation-receipt/{operationId}",
    "receipt",
);
pub const GET_OPERATIONS: Route = Route::query("get_operations", "/api/v1/operations", "operations");
pub const GET_OPERATIONS_SUMMARY: Route = Route::query(
    "get_operations_summary",
    "/api/v1/operations/operations-summary",
    "summary",
);
pub const MAKE_FEE_OPERATION: Route = Route::post(
    "make_fee_operation",
    "/api/v1/operations/make-fee-operation",
    "operation",
);
pub const MAKE_TOP_UP_OPERATION: Route = Route::post(
    "make_top_up_operation",
    "/api/v1/operations/make-top-up-operation",
    "operation",
);
pub const MAKE_CASHBACK_OPERATION: Route = Route::post(
    "make_cashback_operation",
    "/api/v1/operations/make-cashback-operation",
    "operation",
);
pub const MAKE_TRANSFER_OPERATION: Route = Route::post(
    "make_transfer_operation",
    "/api/v1/operations/make-transfer-operation",
    "operation",
);
pub const MAKE_PURCHASE_OPERATION: Route = Route::post(
    "make_purchase_operation",
    "/api/v1/operations/make-purchase-operation",
    "operation",
);
pub const MAKE_BILL_PAYMENT_OPERATION: Route = Route::post(
    "make_bill_payment_operation",
    "/api/v1/operations/make-bill-payment-operation",
    "operation",
);
pub const MAKE_CASH_WITHDRAWAL_OPERATION: Route = Route::post(
    "make_cash_withdrawal_operation",
    "/api/v1/operations/make-cash-withdrawal-operation",
    "operation",
);

pub const GET_TARIFF_DOCUMENT: Route = Route::get(
    "get_tariff_document",
    "/api/v1/documents/tariff-document/{accountId}",
    "tariff",
);
pub const GET_CONTRACT_DOCUMENT: Route = Route::get(
    "get_contract_document",
    "/api/v1/documents/contract-document/{accountId}",
    "contract",
);

/// Every route, in table order.
pub const ALL: &[Route] = &[
    CREATE_USER,
    GET_USER,
    OPEN_DEPOSIT_ACCOUNT,
    OPEN_SAVINGS_ACCOUNT,
    OPEN_DEBIT_CARD_ACCOUNT,
    OPEN_CREDIT_CARD_ACCOUNT,
    GET_ACCOUNTS,
    ISSUE_VIRTUAL_CARD,
    ISSUE_PHYSICAL_CARD,
    GET_OPERATION,
    GET_OPERATION_RECEIPT,
    GET_OPERATIONS,
    GET_OPERATIONS_SUMMARY,
    MAKE_FEE_OPERATION,
    MAKE_TOP_UP_OPERATION,
    MAKE_CASHBACK_OPERATION,
    MAKE_TRANSFER_OPERATION,
    MAKE_PURCHASE_OPERATION,
    MAKE_BILL_PAYMENT_OPERATION,
    MAKE_CASH_WITHDRAWAL_OPERATION,
    GET_TARIFF_DOCUMENT,
    GET_CONTRACT_DOCUMENT,
];
