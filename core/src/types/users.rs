use serde::{Deserialize, Serialize};

use crate::fakers;
use crate::schema::{Field, FieldKind, Schema, Shape};

pub static USER: Schema = Schema {
    name: "User",
    fields: &[
        Field::required("id", "id", FieldKind::Text),
        Field::required("email", "email", FieldKind::Text),
        Field::required("last_name", "lastName", FieldKind::Text),
        Field::required("first_name", "firstName", FieldKind::Text),
        Field::required("middle_name", "middleName", FieldKind::Text),
        Field::required("phone_number", "phoneNumber", FieldKind::Text),
    ],
};

pub(crate) static CREATE_USER_REQUEST: Schema = Schema {
    name: "CreateUserRequest",
    fields: &[
        Field::generated("email", "email", FieldKind::Text, fakers::email),
        Field::generated("last_name", "lastName", FieldKind::Text, fakers::last_name),
        Field::generated("first_name", "firstName", FieldKind::Text, fakers::first_name),
        Field::generated("middle_name", "middleName", FieldKind::Text, fakers::middle_name),
        Field::generated("phone_number", "phoneNumber", FieldKind::Text, fakers::phone_number),
    ],
};

pub(crate) static GET_USER_REQUEST: Schema = Schema {
    name: "GetUserRequest",
    fields: &[Field::required("user_id", "userId", FieldKind::Text)],
};

/// A registered bank customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub phone_number: String,
}

impl Shape for User {
    fn schema() -> &'static Schema {
        &USER
    }
}

/// Payload for `POST /api/v1/users`. Every field has a generated default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub phone_number: String,
}

impl Shape for CreateUserRequest {
    fn schema() -> &'static Schema {
        &CREATE_USER_REQUEST
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetUserRequest {
    pub user_id: String,
}

impl Shape for GetUserRequest {
    fn schema() -> &'static Schema {
        &GET_USER_REQUEST
    }
}
