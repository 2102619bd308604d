use serde::{Deserialize, Serialize};

use crate::fakers;
use crate::schema::{Field, FieldKind, Schema, Shape};

wire_enum! {
    OperationType {
        Fee => "FEE",
        TopUp => "TOP_UP",
        Purchase => "PURCHASE",
        Cashback => "CASHBACK",
        Transfer => "TRANSFER",
        BillPayment => "BILL_PAYMENT",
        CashWithdrawal => "CASH_WITHDRAWAL",
    }
}

wire_enum! {
    OperationStatus {
        Failed => "FAILED",
        Completed => "COMPLETED",
        InProgress => "IN_PROGRESS",
        Unspecified => "UNSPECIFIED",
    }
}

/// Purchase categories drawn from when a caller omits one.
pub const PURCHASE_CATEGORIES: &[&str] = &[
    "gas",
    "taxi",
    "tolls",
    "water",
    "beauty",
    "mobile",
    "travel",
    "parking",
    "catering",
    "vending",
    "education",
    "government",
    "restaurants",
    "supermarkets",
];

pub static OPERATION: Schema = Schema {
    name: "Operation",
    fields: &[
        Field::required("id", "id", FieldKind::Text),
        Field::required("type", "type", FieldKind::Enum(OperationType::MEMBERS)),
        Field::required("status", "status", FieldKind::Enum(OperationStatus::MEMBERS)),
        Field::required("amount", "amount", FieldKind::Number),
        Field::required("card_id", "cardId", FieldKind::Text),
        Field::required("category", "category", FieldKind::Text),
        Field::required("created_at", "createdAt", FieldKind::Text),
        Field::required("account_id", "accountId", FieldKind::Text),
    ],
};

pub static OPERATIONS_SUMMARY: Schema = Schema {
    name: "OperationsSummary",
    fields: &[
        Field::required("spent_amount", "spentAmount", FieldKind::Number),
        Field::required("received_amount", "receivedAmount", FieldKind::Number),
        Field::required("cashback_amount", "cashbackAmount", FieldKind::Number),
    ],
};

pub(crate) static GET_OPERATION_REQUEST: Schema = Schema {
    name: "GetOperationRequest",
    fields: &[Field::required("operation_id", "operationId", FieldKind::Text)],
};

pub(crate) static OPERATIONS_QUERY: Schema = Schema {
    name: "OperationsQuery",
    fields: &[Field::required("account_id", "accountId", FieldKind::Text)],
};

pub(crate) static MAKE_OPERATION_REQUEST: Schema = Schema {
    name: "MakeOperationRequest",
    fields: &[
        Field::generated(
            "status",
            "status",
            FieldKind::Enum(OperationStatus::MEMBERS),
            fakers::operation_status,
        ),
        Field::generated("amount", "amount", FieldKind::Number, fakers::amount),
        Field::required("card_id", "cardId", FieldKind::Text),
        Field::required("account_id", "accountId", FieldKind::Text),
    ],
};

pub(crate) static MAKE_PURCHASE_OPERATION_REQUEST: Schema = Schema {
    name: "MakePurchaseOperationRequest",
    fields: &[
        Field::generated(
            "status",
            "status",
            FieldKind::Enum(OperationStatus::MEMBERS),
            fakers::operation_status,
        ),
        Field::generated("amount", "amount", FieldKind::Number, fakers::amount),
        Field::required("card_id", "cardId", FieldKind::Text),
        Field::required("account_id", "accountId", FieldKind::Text),
        Field::generated("category", "category", FieldKind::Text, fakers::category),
    ],
};

/// A money movement recorded by the gateway. Created only as a side effect
/// of a make-operation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: OperationType,
    pub status: OperationStatus,
    pub amount: f64,
    pub card_id: String,
    pub category: String,
    pub created_at: String,
    pub account_id: String,
}

impl Shape for Operation {
    fn schema() -> &'static Schema {
        &OPERATION
    }
}

/// Totals over an account's operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationsSummary {
    pub spent_amount: f64,
    pub received_amount: f64,
    pub cashback_amount: f64,
}

impl Shape for OperationsSummary {
    fn schema() -> &'static Schema {
        &OPERATIONS_SUMMARY
    }
}

/// Path parameter for operation lookups and receipts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetOperationRequest {
    pub operation_id: String,
}

impl Shape for GetOperationRequest {
    fn schema() -> &'static Schema {
        &GET_OPERATION_REQUEST
    }
}

/// Query for operation listings and summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationsQuery {
    pub account_id: String,
}

impl Shape for OperationsQuery {
    fn schema() -> &'static Schema {
        &OPERATIONS_QUERY
    }
}

/// Payload for every make-operation endpoint except purchases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakeOperationRequest {
    pub status: OperationStatus,
    pub amount: f64,
    pub card_id: String,
    pub account_id: String,
}

impl Shape for MakeOperationRequest {
    fn schema() -> &'static Schema {
        &MAKE_OPERATION_REQUEST
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakePurchaseOperationRequest {
    pub status: OperationStatus,
    pub amount: f64,
    pub card_id: String,
    pub account_id: String,
    pub category: String,
}

impl Shape for MakePurchaseOperationRequest {
    fn schema() -> &'static Schema {
        &MAKE_PURCHASE_OPERATION_REQUEST
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use serde_json::{json, Value};

    use super::*;
    use crate::error::ErrorKind;
    use crate::schema::{construct, decode, encode, Envelope, Fields};

    fn operation_json() -> Value {
        json!({
            "id": "O1",
            "type": "PURCHASE",
            "status": "COMPLETED",
            "amount": 10.5,
            "cardId": "C1",
            "category": "Taxi",
            "createdAt": "2024-01-01",
            "accountId": "A1"
        })
    }

    #[test]
    fn purchase_request_fills_status_amount_and_category() {
        let request: MakePurchaseOperationRequest =
            construct(Fields::new().with("account_id", "A1").with("card_id", "C1")).unwrap();
        assert_eq!(request.account_id, "A1");
        assert_eq!(request.card_id, "C1");
        assert!(request.amount > 0.0);
        assert!(PURCHASE_CATEGORIES.contains(&request.category.as_str()));

        let wire = encode(&request).unwrap();
        let keys: BTreeSet<&str> = wire.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            BTreeSet::from(["status", "amount", "cardId", "accountId", "category"])
        );
        assert!(wire.values().all(|value| !value.is_null()));
    }

    #[test]
    fn repeated_construction_draws_fresh_amounts() {
        let amounts: BTreeSet<String> = (0..20)
            .map(|_| {
                let request: MakeOperationRequest =
                    construct(Fields::new().with("account_id", "A1").with("card_id", "C1")).unwrap();
                request.amount.to_string()
            })
            .collect();
        assert!(amounts.len() > 1);
    }

    #[test]
    fn make_operation_request_requires_card_id() {
        let err = construct::<MakeOperationRequest>(Fields::new().with("account_id", "A1")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Construction);
        assert_eq!(err.field(), Some("card_id"));
    }

    #[test]
    fn supplied_status_is_kept() {
        let request: MakeOperationRequest = construct(
            Fields::new()
                .with("account_id", "A1")
                .with("card_id", "C1")
                .with("status", OperationStatus::Failed)
                .with("amount", 12.25),
        )
        .unwrap();
        assert_eq!(request.status, OperationStatus::Failed);
        assert_eq!(request.amount, 12.25);
    }

    #[test]
    fn request_round_trips_when_fully_supplied() {
        let request = MakePurchaseOperationRequest {
            status: OperationStatus::InProgress,
            amount: 77.99,
            card_id: "C1".to_string(),
            account_id: "A1".to_string(),
            category: "taxi".to_string(),
        };
        let wire = Value::Object(encode(&request).unwrap());
        assert_eq!(decode::<MakePurchaseOperationRequest>(&wire).unwrap(), request);
    }

    #[test]
    fn operation_envelope_decodes_purchase() {
        let body = json!({ "operation": operation_json() }).to_string();
        let operation: Operation = Envelope::new("operation").open(&body).unwrap();
        assert_eq!(operation.kind, OperationType::Purchase);
        assert_eq!(operation.status, OperationStatus::Completed);
        assert_eq!(operation.created_at, "2024-01-01");
    }

    #[test]
    fn operation_rejects_unknown_type() {
        let mut wire = operation_json();
        wire["type"] = json!("UNKNOWN_TYPE");
        let body = json!({ "operation": wire }).to_string();
        let err = Envelope::new("operation").open::<Operation>(&body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.field(), Some("operation.type"));
    }

    #[test]
    fn operation_rejects_unknown_status() {
        let mut wire = operation_json();
        wire["status"] = json!("DONE");
        assert!(decode::<Operation>(&wire).is_err());
    }

    #[test]
    fn operation_names_each_missing_key() {
        for field in OPERATION.fields {
            let mut wire = operation_json();
            wire.as_object_mut().unwrap().remove(field.wire);
            let err = decode::<Operation>(&wire).unwrap_err();
            assert_eq!(err.field(), Some(field.wire));
        }
    }

    #[test]
    fn operation_ignores_extra_keys() {
        let mut wire = operation_json();
        wire["merchant"] = json!("Cab Co");
        let operation: Operation = decode(&wire).unwrap();
        assert_eq!(operation.id, "O1");
    }

    #[test]
    fn summary_decodes_amounts() {
        let summary: OperationsSummary = Envelope::new("summary")
            .open(r#"{"summary":{"spentAmount":10,"receivedAmount":5.5,"cashbackAmount":0}}"#)
            .unwrap();
        assert_eq!(summary.spent_amount, 10.0);
        assert_eq!(summary.received_amount, 5.5);
    }
}
