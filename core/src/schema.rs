//! Declarative field tables that bridge internal names and wire names.
//!
//! # Design
//! Every request and response shape is a plain serde struct whose field names
//! are the internal (snake_case) names, paired with a static `Schema` table
//! that lists, per field, the wire (camelCase) name, the semantic kind, whether
//! it must be present, and an optional default factory. The table is the only
//! place aliasing lives: `encode` renames internal to wire after serde has
//! produced a map, and `decode` validates and renames wire to internal before
//! serde builds the struct. Default factories are plain `fn() -> Value`
//! pointers invoked at construction time, so two constructions of the same
//! request produce independent values.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Lazily invoked factory for a field the caller did not supply.
pub type DefaultFn = fn() -> Value;

/// Semantic type of a field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    /// A string restricted to a fixed member set.
    Enum(&'static [&'static str]),
    Object(&'static Schema),
    List(&'static Schema),
}

impl FieldKind {
    /// Shallow check of a single value; nested tables are walked by the caller.
    fn admits(&self, value: &Value) -> Result<(), String> {
        match (self, value) {
            (FieldKind::Text, Value::String(_))
            | (FieldKind::Number, Value::Number(_))
            | (FieldKind::Boolean, Value::Bool(_))
            | (FieldKind::Object(_), Value::Object(_))
            | (FieldKind::List(_), Value::Array(_)) => Ok(()),
            (FieldKind::Enum(members), Value::String(member)) => {
                if members.contains(&member.as_str()) {
                    Ok(())
                } else {
                    Err(format!("`{member}` is not one of [{}]", members.join(", ")))
                }
            }
            (kind, other) => Err(format!("expected {}, found {}", kind.describe(), describe(other))),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Enum(_) => "a string",
            FieldKind::Number => "a number",
            FieldKind::Boolean => "a boolean",
            FieldKind::Object(_) => "an object",
            FieldKind::List(_) => "an array",
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn join(path: &str, wire: &str) -> String {
    if path.is_empty() {
        wire.to_string()
    } else {
        format!("{path}.{wire}")
    }
}

fn root(path: &str) -> &str {
    if path.is_empty() {
        "$"
    } else {
        path
    }
}

/// One row of a schema table.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Name used by the Rust struct.
    pub name: &'static str,
    /// Name used in the JSON payload.
    pub wire: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<DefaultFn>,
}

impl Field {
    pub const fn required(name: &'static str, wire: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            wire,
            kind,
            required: true,
            default: None,
        }
    }

    pub const fn optional(name: &'static str, wire: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            wire,
            kind,
            required: false,
            default: None,
        }
    }

    /// A required field that falls back to `default()` when the caller omits it.
    pub const fn generated(
        name: &'static str,
        wire: &'static str,
        kind: FieldKind,
        default: DefaultFn,
    ) -> Self {
        Self {
            name,
            wire,
            kind,
            required: true,
            default: Some(default),
        }
    }
}

/// An ordered field table describing one payload shape.
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Verify that wire names and internal names are unique, recursively.
    pub fn check(&self) -> Result<(), String> {
        for (index, field) in self.fields.iter().enumerate() {
            for earlier in &self.fields[..index] {
                if earlier.wire == field.wire {
                    return Err(format!("{}: wire name `{}` appears twice", self.name, field.wire));
                }
                if earlier.name == field.name {
                    return Err(format!("{}: field `{}` appears twice", self.name, field.name));
                }
            }
            if let FieldKind::Object(inner) | FieldKind::List(inner) = field.kind {
                inner.check()?;
            }
        }
        Ok(())
    }

    /// Fill in omitted fields from their default factories.
    ///
    /// `supplied` is keyed by internal name. A `null` value counts as omitted.
    pub fn populate(&self, mut supplied: Map<String, Value>) -> Result<Map<String, Value>, ApiError> {
        if let Some(unknown) = supplied.keys().find(|name| self.field(name).is_none()) {
            return Err(ApiError::construction(self.name, unknown.as_str(), "is not part of the schema"));
        }

        let mut populated = Map::new();
        for field in self.fields {
            let value = match supplied.remove(field.name) {
                Some(value) if !value.is_null() => {
                    field
                        .kind
                        .admits(&value)
                        .map_err(|reason| ApiError::construction(self.name, field.name, reason))?;
                    value
                }
                _ => match field.default {
                    Some(generate) => generate(),
                    None if field.required => {
                        return Err(ApiError::construction(
                            self.name,
                            field.name,
                            "is required and has no default",
                        ))
                    }
                    None => continue,
                },
            };
            populated.insert(field.name.to_string(), value);
        }
        Ok(populated)
    }

    /// Rename an internal-name map to its wire form. Absent optional fields
    /// are left out of the output.
    pub fn to_wire(&self, internal: &Map<String, Value>) -> Result<Map<String, Value>, ApiError> {
        let mut wire = Map::new();
        for field in self.fields {
            let value = match internal.get(field.name) {
                None | Some(Value::Null) if !field.required => continue,
                None | Some(Value::Null) => {
                    return Err(ApiError::construction(self.name, field.name, "is required"))
                }
                Some(value) => value,
            };
            field
                .kind
                .admits(value)
                .map_err(|reason| ApiError::construction(self.name, field.name, reason))?;
            let value = match (field.kind, value) {
                (FieldKind::Object(inner), Value::Object(map)) => Value::Object(inner.to_wire(map)?),
                (FieldKind::List(inner), Value::Array(items)) => Value::Array(
                    items
                        .iter()
                        .map(|item| match item {
                            Value::Object(map) => inner.to_wire(map).map(Value::Object),
                            other => Err(ApiError::construction(
                                inner.name,
                                field.name,
                                format!("expected objects, found {}", describe(other)),
                            )),
                        })
                        .collect::<Result<Vec<_>, _>>()?,
                ),
                _ => value.clone(),
            };
            wire.insert(field.wire.to_string(), value);
        }
        Ok(wire)
    }

    /// Validate a wire object and rename it to internal names.
    ///
    /// `path` prefixes field names in errors (`operation.cardId`,
    /// `account.cards[0].id`). Keys not listed in the table are dropped.
    pub fn from_wire(&self, wire: &Value, path: &str) -> Result<Map<String, Value>, ApiError> {
        let Value::Object(object) = wire else {
            return Err(ApiError::validation(
                self.name,
                root(path),
                format!("expected an object, found {}", describe(wire)),
            ));
        };

        let mut internal = Map::new();
        for field in self.fields {
            let at = join(path, field.wire);
            let value = match object.get(field.wire) {
                None if field.required => return Err(ApiError::validation(self.name, at, "is missing")),
                Some(Value::Null) if field.required => {
                    return Err(ApiError::validation(self.name, at, "must not be null"))
                }
                None | Some(Value::Null) => continue,
                Some(value) => value,
            };
            let value = match field.kind {
                FieldKind::Object(inner) => Value::Object(inner.from_wire(value, &at)?),
                FieldKind::List(inner) => {
                    let Value::Array(items) = value else {
                        return Err(ApiError::validation(
                            self.name,
                            at,
                            format!("expected an array, found {}", describe(value)),
                        ));
                    };
                    Value::Array(
                        items
                            .iter()
                            .enumerate()
                            .map(|(index, item)| inner.from_wire(item, &format!("{at}[{index}]")).map(Value::Object))
                            .collect::<Result<Vec<_>, _>>()?,
                    )
                }
                kind => {
                    kind.admits(value)
                        .map_err(|reason| ApiError::validation(self.name, &at, reason))?;
                    value.clone()
                }
            };
            internal.insert(field.name.to_string(), value);
        }
        Ok(internal)
    }
}

/// A typed payload bound to its schema table.
///
/// Implementors derive serde with their internal field names; the table
/// supplies the wire names.
pub trait Shape: Serialize + DeserializeOwned {
    fn schema() -> &'static Schema;
}

/// Caller-supplied request values, keyed by internal name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Map<String, Value>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// Build a typed request from the supplied values plus default factories.
pub fn construct<T: Shape>(fields: Fields) -> Result<T, ApiError> {
    let schema = T::schema();
    let internal = schema.populate(fields.into_inner())?;
    serde_json::from_value(Value::Object(internal))
        .map_err(|e| ApiError::construction(schema.name, "$", e.to_string()))
}

/// Serialize a shape to its wire object.
pub fn encode<T: Shape>(value: &T) -> Result<Map<String, Value>, ApiError> {
    let schema = T::schema();
    match serde_json::to_value(value).map_err(|e| ApiError::Serialization(e.to_string()))? {
        Value::Object(internal) => schema.to_wire(&internal),
        other => Err(ApiError::Serialization(format!(
            "{} serialized to {}",
            schema.name,
            describe(&other)
        ))),
    }
}

/// Validate a wire object and deserialize it into a shape.
pub fn decode<T: Shape>(wire: &Value) -> Result<T, ApiError> {
    decode_at(wire, "")
}

fn decode_at<T: Shape>(wire: &Value, path: &str) -> Result<T, ApiError> {
    let schema = T::schema();
    let internal = schema.from_wire(wire, path)?;
    serde_json::from_value(Value::Object(internal))
        .map_err(|e| ApiError::validation(schema.name, root(path), e.to_string()))
}

/// Response wrapper: a JSON object with a single key naming the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    key: &'static str,
}

impl Envelope {
    pub const fn new(key: &'static str) -> Self {
        Self { key }
    }

    /// Encode an entity and place it under the envelope key.
    pub fn wrap<T: Shape>(&self, value: &T) -> Result<Value, ApiError> {
        let mut outer = Map::new();
        outer.insert(self.key.to_string(), Value::Object(encode(value)?));
        Ok(Value::Object(outer))
    }

    /// Decode a single entity held under the envelope key.
    pub fn open<T: Shape>(&self, body: &str) -> Result<T, ApiError> {
        let inner = self.take(body, T::schema())?;
        decode_at(&inner, self.key)
    }

    /// Decode a list of entities held under the envelope key.
    pub fn open_list<T: Shape>(&self, body: &str) -> Result<Vec<T>, ApiError> {
        let schema = T::schema();
        let Value::Array(items) = self.take(body, schema)? else {
            return Err(ApiError::validation(schema.name, self.key, "expected an array"));
        };
        items
            .iter()
            .enumerate()
            .map(|(index, item)| decode_at(item, &format!("{}[{index}]", self.key)))
            .collect()
    }

    fn take(&self, body: &str, schema: &'static Schema) -> Result<Value, ApiError> {
        let mut outer: Value = serde_json::from_str(body)
            .map_err(|e| ApiError::validation(schema.name, "$", format!("is not valid JSON: {e}")))?;
        match outer.get_mut(self.key) {
            Some(inner) => Ok(inner.take()),
            None => Err(ApiError::validation(schema.name, self.key, "is missing")),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    fn seven() -> Value {
        json!(7)
    }

    static LEAF: Schema = Schema {
        name: "Leaf",
        fields: &[Field::required("leaf_id", "leafId", FieldKind::Text)],
    };

    static WIDGET: Schema = Schema {
        name: "Widget",
        fields: &[
            Field::required("widget_id", "widgetId", FieldKind::Text),
            Field::generated("score", "score", FieldKind::Number, seven),
            Field::optional("mode", "mode", FieldKind::Enum(&["ON", "OFF"])),
            Field::optional("leaves", "leafList", FieldKind::List(&LEAF)),
        ],
    };

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Leaf {
        leaf_id: String,
    }

    impl Shape for Leaf {
        fn schema() -> &'static Schema {
            &LEAF
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Widget {
        widget_id: String,
        score: f64,
        mode: Option<String>,
        leaves: Option<Vec<Leaf>>,
    }

    impl Shape for Widget {
        fn schema() -> &'static Schema {
            &WIDGET
        }
    }

    #[test]
    fn construct_invokes_default_for_omitted_field() {
        let widget: Widget = construct(Fields::new().with("widget_id", "P1")).unwrap();
        assert_eq!(widget.score, 7.0);
        assert!(widget.mode.is_none());
    }

    #[test]
    fn construct_prefers_supplied_value() {
        let widget: Widget = construct(Fields::new().with("widget_id", "P1").with("score", 1.5)).unwrap();
        assert_eq!(widget.score, 1.5);
    }

    #[test]
    fn construct_without_required_field_fails() {
        let err = construct::<Widget>(Fields::new().with("score", 2.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Construction);
        assert_eq!(err.field(), Some("widget_id"));
    }

    #[test]
    fn construct_rejects_unknown_field() {
        let err = construct::<Widget>(Fields::new().with("widget_id", "P1").with("widgetId", "P2")).unwrap_err();
        assert_eq!(err.field(), Some("widgetId"));
    }

    #[test]
    fn construct_rejects_value_of_wrong_kind() {
        let err = construct::<Widget>(Fields::new().with("widget_id", "P1").with("mode", "MAYBE")).unwrap_err();
        assert!(matches!(err, ApiError::SchemaConstruction { .. }));
        assert_eq!(err.field(), Some("mode"));
    }

    #[test]
    fn encode_renames_nested_fields_and_skips_absent_optionals() {
        let widget = Widget {
            widget_id: "P1".to_string(),
            score: 3.0,
            mode: None,
            leaves: Some(vec![Leaf {
                leaf_id: "L1".to_string(),
            }]),
        };
        let wire = encode(&widget).unwrap();
        assert_eq!(
            Value::Object(wire),
            json!({"widgetId": "P1", "score": 3.0, "leafList": [{"leafId": "L1"}]})
        );
    }

    #[test]
    fn decode_reverses_encode() {
        let widget = Widget {
            widget_id: "P9".to_string(),
            score: 0.5,
            mode: Some("OFF".to_string()),
            leaves: Some(Vec::new()),
        };
        let wire = Value::Object(encode(&widget).unwrap());
        assert_eq!(decode::<Widget>(&wire).unwrap(), widget);
    }

    #[test]
    fn open_reverses_wrap() {
        let widget = Widget {
            widget_id: "P3".to_string(),
            score: 2.5,
            mode: Some("ON".to_string()),
            leaves: Some(vec![Leaf {
                leaf_id: "L7".to_string(),
            }]),
        };
        let envelope = Envelope::new("widget");
        let wrapped = envelope.wrap(&widget).unwrap();
        assert_eq!(wrapped["widget"]["widgetId"], "P3");
        assert_eq!(wrapped["widget"]["leafList"][0]["leafId"], "L7");
        assert_eq!(wrapped.as_object().unwrap().len(), 1);

        let opened: Widget = envelope.open(&wrapped.to_string()).unwrap();
        assert_eq!(opened, widget);
    }

    #[test]
    fn open_under_another_key_fails_on_the_key() {
        let widget = Widget {
            widget_id: "P3".to_string(),
            score: 1.0,
            mode: None,
            leaves: None,
        };
        let wrapped = Envelope::new("widget").wrap(&widget).unwrap();
        let err = Envelope::new("other").open::<Widget>(&wrapped.to_string()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.field(), Some("other"));
    }

    #[test]
    fn decode_ignores_unknown_keys() {
        let widget: Widget = decode(&json!({"widgetId": "P1", "score": 1, "extra": true})).unwrap();
        assert_eq!(widget.widget_id, "P1");
    }

    #[test]
    fn decode_names_missing_nested_field() {
        let err = decode::<Widget>(&json!({"widgetId": "P1", "score": 1, "leafList": [{}]})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.field(), Some("leafList[0].leafId"));
    }

    #[test]
    fn decode_rejects_non_numeric_number() {
        let err = decode::<Widget>(&json!({"widgetId": "P1", "score": "high"})).unwrap_err();
        assert_eq!(err.field(), Some("score"));
        assert!(err.to_string().contains("expected a number"));
    }

    #[test]
    fn decode_rejects_null_required_field() {
        let err = decode::<Widget>(&json!({"widgetId": null, "score": 1})).unwrap_err();
        assert_eq!(err.field(), Some("widgetId"));
    }

    #[test]
    fn envelope_reports_missing_key() {
        let err = Envelope::new("widget").open::<Widget>(r#"{"other":{}}"#).unwrap_err();
        assert_eq!(err.field(), Some("widget"));
    }

    #[test]
    fn envelope_prefixes_paths_with_key() {
        let err = Envelope::new("widget").open::<Widget>(r#"{"widget":{"score":1}}"#).unwrap_err();
        assert_eq!(err.field(), Some("widget.widgetId"));
    }

    #[test]
    fn envelope_opens_lists() {
        let leaves: Vec<Leaf> = Envelope::new("leaves")
            .open_list(r#"{"leaves":[{"leafId":"A"},{"leafId":"B"}]}"#)
            .unwrap();
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[1].leaf_id, "B");
    }

    #[test]
    fn envelope_rejects_bad_json() {
        let err = Envelope::new("widget").open::<Widget>("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.field(), Some("$"));
    }

    #[test]
    fn check_detects_duplicate_wire_names() {
        static TWICE: Schema = Schema {
            name: "Twice",
            fields: &[
                Field::required("a", "same", FieldKind::Text),
                Field::required("b", "same", FieldKind::Text),
            ],
        };
        assert!(TWICE.check().is_err());
        assert!(WIDGET.check().is_ok());
    }
}
