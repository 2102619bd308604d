//! Default factories for request fields callers usually leave out.
//!
//! Each function has the `DefaultFn` signature so it can sit in a schema
//! table; every call draws fresh values from the thread-local RNG.

use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::Value;

use crate::types::{OperationStatus, PURCHASE_CATEGORIES};

const MIN_AMOUNT: f64 = 1.0;
const MAX_AMOUNT: f64 = 1000.0;

/// A monetary amount in `[1.00, 1000.00]` with two decimal places.
pub fn amount() -> Value {
    let raw: f64 = rand::rng().random_range(MIN_AMOUNT..=MAX_AMOUNT);
    Value::from((raw * 100.0).round() / 100.0)
}

pub fn category() -> Value {
    pick(PURCHASE_CATEGORIES)
}

pub fn operation_status() -> Value {
    pick(OperationStatus::MEMBERS)
}

pub fn email() -> Value {
    Value::String(SafeEmail().fake())
}

pub fn first_name() -> Value {
    Value::String(FirstName().fake())
}

pub fn middle_name() -> Value {
    Value::String(FirstName().fake())
}

pub fn last_name() -> Value {
    Value::String(LastName().fake())
}

pub fn phone_number() -> Value {
    Value::String(PhoneNumber().fake())
}

fn pick(members: &[&str]) -> Value {
    let member = members.choose(&mut rand::rng()).copied().unwrap_or_default();
    Value::String(member.to_string())
}
