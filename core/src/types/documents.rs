use serde::{Deserialize, Serialize};

use crate::schema::{Field, FieldKind, Schema, Shape};

pub static DOCUMENT: Schema = Schema {
    name: "Document",
    fields: &[
        Field::required("url", "url", FieldKind::Text),
        Field::required("document", "document", FieldKind::Text),
    ],
};

pub(crate) static GET_DOCUMENT_REQUEST: Schema = Schema {
    name: "GetDocumentRequest",
    fields: &[Field::required("account_id", "accountId", FieldKind::Text)],
};

/// A link to a generated document plus its content. Used for tariffs,
/// contracts and operation receipts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub url: String,
    pub document: String,
}

impl Shape for Document {
    fn schema() -> &'static Schema {
        &DOCUMENT
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetDocumentRequest {
    pub account_id: String,
}

impl Shape for GetDocumentRequest {
    fn schema() -> &'static Schema {
        &GET_DOCUMENT_REQUEST
    }
}
