//! Entity and request shapes for the gateway API.
//!
//! # Design
//! Structs carry internal snake_case names and derive serde directly; each is
//! paired with a static `Schema` table in the same file that owns the wire
//! names. Entities are point-in-time snapshots of server-owned state. One
//! request type is shared by every endpoint that accepts the same payload, so
//! the six plain make-operation endpoints all take `MakeOperationRequest`.

use crate::schema::Schema;

/// Declare a closed set of wire strings as a Rust enum.
///
/// Generates serde renames, the `MEMBERS` table used by schema `Enum` kinds,
/// and a conversion into `serde_json::Value` for `Fields::with`.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const MEMBERS: &'static [&'static str] = &[$($wire),+];
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for serde_json::Value {
            fn from(value: $name) -> Self {
                serde_json::Value::String(value.as_str().to_string())
            }
        }
    };
}

mod accounts;
mod cards;
mod documents;
mod operations;
mod users;

pub use accounts::{Account, AccountStatus, AccountType, GetAccountsQuery, OpenAccountRequest, ACCOUNT};
pub use cards::{Card, CardStatus, CardType, IssueCardRequest, PaymentSystem, CARD};
pub use documents::{Document, GetDocumentRequest, DOCUMENT};
pub use operations::{
    GetOperationRequest, MakeOperationRequest, MakePurchaseOperationRequest, Operation, OperationStatus,
    OperationType, OperationsQuery, OperationsSummary, OPERATION, OPERATIONS_SUMMARY, PURCHASE_CATEGORIES,
};
pub use users::{CreateUserRequest, GetUserRequest, User, USER};

/// Every schema table, for invariant checks.
pub fn all_schemas() -> Vec<&'static Schema> {
    vec![
        &USER,
        &users::CREATE_USER_REQUEST,
        &users::GET_USER_REQUEST,
        &ACCOUNT,
        &accounts::OPEN_ACCOUNT_REQUEST,
        &accounts::GET_ACCOUNTS_QUERY,
        &CARD,
        &cards::ISSUE_CARD_REQUEST,
        &OPERATION,
        &OPERATIONS_SUMMARY,
        &operations::GET_OPERATION_REQUEST,
        &operations::OPERATIONS_QUERY,
        &operations::MAKE_OPERATION_REQUEST,
        &operations::MAKE_PURCHASE_OPERATION_REQUEST,
        &DOCUMENT,
        &documents::GET_DOCUMENT_REQUEST,
    ]
}
