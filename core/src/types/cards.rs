use serde::{Deserialize, Serialize};

use crate::schema::{Field, FieldKind, Schema, Shape};

wire_enum! {
    CardType {
        Virtual => "VIRTUAL",
        Physical => "PHYSICAL",
    }
}

wire_enum! {
    CardStatus {
        Active => "ACTIVE",
        Frozen => "FROZEN",
        Closed => "CLOSED",
        Blocked => "BLOCKED",
    }
}

wire_enum! {
    PaymentSystem {
        Visa => "VISA",
        Mastercard => "MASTERCARD",
    }
}

pub static CARD: Schema = Schema {
    name: "Card",
    fields: &[
        Field::required("id", "id", FieldKind::Text),
        Field::required("pin", "pin", FieldKind::Text),
        Field::required("cvv", "cvv", FieldKind::Text),
        Field::required("type", "type", FieldKind::Enum(CardType::MEMBERS)),
        Field::required("status", "status", FieldKind::Enum(CardStatus::MEMBERS)),
        Field::required("account_id", "accountId", FieldKind::Text),
        Field::required("card_number", "cardNumber", FieldKind::Text),
        Field::required("card_holder", "cardHolder", FieldKind::Text),
        Field::required("expiry_date", "expiryDate", FieldKind::Text),
        Field::required("payment_system", "paymentSystem", FieldKind::Enum(PaymentSystem::MEMBERS)),
    ],
};

pub(crate) static ISSUE_CARD_REQUEST: Schema = Schema {
    name: "IssueCardRequest",
    fields: &[
        Field::required("user_id", "userId", FieldKind::Text),
        Field::required("account_id", "accountId", FieldKind::Text),
    ],
};

/// A payment card attached to an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub pin: String,
    pub cvv: String,
    #[serde(rename = "type")]
    pub kind: CardType,
    pub status: CardStatus,
    pub account_id: String,
    pub card_number: String,
    pub card_holder: String,
    pub expiry_date: String,
    pub payment_system: PaymentSystem,
}

impl Shape for Card {
    fn schema() -> &'static Schema {
        &CARD
    }
}

/// Payload for both issue-card endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueCardRequest {
    pub user_id: String,
    pub account_id: String,
}

impl Shape for IssueCardRequest {
    fn schema() -> &'static Schema {
        &ISSUE_CARD_REQUEST
    }
}
