//! Extensible payload envelopes.
//!
//! An envelope is a strongly typed struct of canonical fields plus an
//! explicit side-map of extra fields. Validation pulls each canonical field
//! out of the raw record with a type check, and whatever remains becomes the
//! extras. Serialization starts from the extras and writes the canonical
//! fields over them, so a canonical value always wins a name collision.

use crate::error::{FieldConstraint, GatewayError, GatewayResult};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Flat JSON object as received from or sent to a client.
pub type Record = Map<String, Value>;

/// Fields carried through an envelope without interpretation.
pub type Extras = Map<String, Value>;

/// Label used for errors about the top-level value itself.
const ROOT_LABEL: &str = "$";

/// A validated container of canonical fields plus retained extras.
pub trait Envelope: Sized {
    /// Validates `value` as this envelope. `path` prefixes field names in
    /// errors so that nested envelopes report their full location.
    fn from_value_at(path: &str, value: Value) -> GatewayResult<Self>;

    /// Renders canonical and extra fields merged into one flat record.
    fn to_record(&self) -> Record;

    /// Extra fields retained from the input.
    fn extra(&self) -> &Extras;

    /// Validates a top-level raw value.
    fn validate(value: Value) -> GatewayResult<Self> {
        Self::from_value_at("", value)
    }

    /// Serializes back to a raw JSON value.
    fn to_value(&self) -> Value {
        Value::Object(self.to_record())
    }
}

/// A field whose value comes from a closed set of string tags.
pub trait FieldEnum: Sized + Copy + 'static {
    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    /// The wire tag of this variant.
    fn as_str(self) -> &'static str;

    /// Parses a wire tag, naming `field` in the error if it is not in the set.
    fn parse_field(field: &str, raw: &str) -> GatewayResult<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.as_str() == raw)
            .ok_or_else(|| {
                GatewayError::validation(
                    field,
                    FieldConstraint::OneOf {
                        allowed: Self::VARIANTS
                            .iter()
                            .map(|variant| variant.as_str().to_string())
                            .collect(),
                        found: raw.to_string(),
                    },
                )
            })
    }
}

/// Joins a parent path and a field name.
#[must_use]
pub fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

/// Path of the `index`-th element of the list at `parent`.
#[must_use]
pub fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

/// Name of the JSON type of `value`, as used in type-mismatch errors.
#[must_use]
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Builds a type-mismatch error for `field`.
#[must_use]
pub fn type_mismatch(field: impl Into<String>, expected: &str, found: &Value) -> GatewayError {
    GatewayError::validation(
        field,
        FieldConstraint::Type {
            expected: expected.to_string(),
            found: json_type_name(found).to_string(),
        },
    )
}

/// Pulls canonical fields out of a raw record.
///
/// Explicit `null` is treated the same as an absent field.
#[derive(Debug)]
pub struct FieldReader<'p> {
    path: &'p str,
    fields: Record,
}

impl<'p> FieldReader<'p> {
    /// Starts reading `value`, which must be a JSON object.
    pub fn new(path: &'p str, value: Value) -> GatewayResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self { path, fields }),
            other => {
                let label = if path.is_empty() { ROOT_LABEL } else { path };
                Err(type_mismatch(label, "object", &other))
            }
        }
    }

    /// Full path of a field of this record.
    #[must_use]
    pub fn path_of(&self, name: &str) -> String {
        child_path(self.path, name)
    }

    fn take(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name).filter(|value| !value.is_null())
    }

    fn take_required(&mut self, name: &str) -> GatewayResult<Value> {
        self.take(name)
            .ok_or_else(|| GatewayError::missing(self.path_of(name)))
    }

    fn convert<T: DeserializeOwned>(field: String, value: Value, expected: &str) -> GatewayResult<T> {
        let found = json_type_name(&value);
        serde_json::from_value(value).map_err(|_| {
            GatewayError::validation(
                field,
                FieldConstraint::Type {
                    expected: expected.to_string(),
                    found: found.to_string(),
                },
            )
        })
    }

    fn convert_list<T: DeserializeOwned>(
        field: String,
        value: Value,
        expected_item: &str,
    ) -> GatewayResult<Vec<T>> {
        let Value::Array(items) = value else {
            return Err(type_mismatch(field, "array", &value));
        };
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| Self::convert(index_path(&field, index), item, expected_item))
            .collect()
    }

    /// Reads a required scalar field.
    pub fn required<T: DeserializeOwned>(&mut self, name: &str, expected: &str) -> GatewayResult<T> {
        let value = self.take_required(name)?;
        Self::convert(self.path_of(name), value, expected)
    }

    /// Reads an optional scalar field.
    pub fn optional<T: DeserializeOwned>(
        &mut self,
        name: &str,
        expected: &str,
    ) -> GatewayResult<Option<T>> {
        self.take(name)
            .map(|value| Self::convert(self.path_of(name), value, expected))
            .transpose()
    }

    /// Reads a required list, type-checking each element.
    pub fn required_list<T: DeserializeOwned>(
        &mut self,
        name: &str,
        expected_item: &str,
    ) -> GatewayResult<Vec<T>> {
        let value = self.take_required(name)?;
        Self::convert_list(self.path_of(name), value, expected_item)
    }

    /// Reads an optional list, type-checking each element.
    pub fn optional_list<T: DeserializeOwned>(
        &mut self,
        name: &str,
        expected_item: &str,
    ) -> GatewayResult<Option<Vec<T>>> {
        self.take(name)
            .map(|value| Self::convert_list(self.path_of(name), value, expected_item))
            .transpose()
    }

    /// Reads a required enumerated field.
    pub fn required_enum<T: FieldEnum>(&mut self, name: &str) -> GatewayResult<T> {
        let value = self.take_required(name)?;
        Self::convert_enum(self.path_of(name), &value)
    }

    /// Reads an optional enumerated field.
    pub fn optional_enum<T: FieldEnum>(&mut self, name: &str) -> GatewayResult<Option<T>> {
        self.take(name)
            .map(|value| Self::convert_enum(self.path_of(name), &value))
            .transpose()
    }

    fn convert_enum<T: FieldEnum>(field: String, value: &Value) -> GatewayResult<T> {
        match value {
            Value::String(raw) => T::parse_field(&field, raw),
            other => Err(type_mismatch(field, "string", other)),
        }
    }

    /// Reads a required nested envelope.
    pub fn required_envelope<E: Envelope>(&mut self, name: &str) -> GatewayResult<E> {
        let value = self.take_required(name)?;
        E::from_value_at(&self.path_of(name), value)
    }

    /// Reads a required list of nested envelopes.
    pub fn required_envelopes<E: Envelope>(&mut self, name: &str) -> GatewayResult<Vec<E>> {
        let value = self.take_required(name)?;
        let field = self.path_of(name);
        let Value::Array(items) = value else {
            return Err(type_mismatch(field, "array", &value));
        };
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| E::from_value_at(&index_path(&field, index), item))
            .collect()
    }

    /// Hands back every field that was not read as canonical.
    #[must_use]
    pub fn finish(self) -> Extras {
        self.fields
    }
}

/// Merges extras and canonical fields into one record.
#[derive(Debug)]
pub struct RecordWriter {
    record: Record,
}

impl RecordWriter {
    /// Starts a record from an envelope's extras.
    #[must_use]
    pub fn new(extra: &Extras) -> Self {
        Self {
            record: extra.clone(),
        }
    }

    /// Writes a canonical field, replacing any same-named extra.
    #[must_use]
    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.record.insert(name.to_string(), value.into());
        self
    }

    /// Writes a canonical field when present. An absent optional field also
    /// removes any same-named extra.
    #[must_use]
    pub fn optional<T: Into<Value>>(mut self, name: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => {
                self.record.insert(name.to_string(), value.into());
            }
            None => {
                self.record.remove(name);
            }
        }
        self
    }

    /// Writes a nested envelope.
    #[must_use]
    pub fn envelope<E: Envelope>(self, name: &str, value: &E) -> Self {
        self.field(name, value.to_value())
    }

    /// Writes a list of nested envelopes.
    #[must_use]
    pub fn envelopes<E: Envelope>(self, name: &str, values: &[E]) -> Self {
        self.field(
            name,
            values.iter().map(Envelope::to_value).collect::<Vec<_>>(),
        )
    }

    /// Finishes the record.
    #[must_use]
    pub fn finish(self) -> Record {
        self.record
    }
}

/// Implements `Serialize` and `Deserialize` for envelope types in terms of
/// [`Envelope::to_record`] and [`Envelope::validate`].
macro_rules! impl_envelope_serde {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl serde::Serialize for $ty {
                fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serde::Serialize::serialize(
                        &$crate::envelope::Envelope::to_record(self),
                        serializer,
                    )
                }
            }

            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                    <Self as $crate::envelope::Envelope>::validate(value)
                        .map_err(serde::de::Error::custom)
                }
            }
        )+
    };
}

pub(crate) use impl_envelope_serde;
