//! Content-addressed identity for evaluation inputs.
//!
//! An inputs id is the SHA-256 of a canonical JSON encoding of the inputs
//! mapping: keys sorted at every level, `", "` and `": "` separators,
//! ASCII-only output, and shortest round-trip floats. The encoding matches
//! what the tracking server computes, so ids derived here join against ids
//! logged from other clients.
//!
//! An inputs id is a correlation key, never a storage primary key.

use gateway_core::{GatewayError, GatewayResult};
use serde::ser::{self, Serialize, Serializer};
use serde_json::ser::Formatter;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::io;
use tracing::trace;

/// Derives the inputs id for a mapping of input names to values.
///
/// Fails with [`GatewayError::IdentityDerivation`] if `inputs` does not
/// serialize to a JSON object with string keys, or holds a NaN or infinite
/// float.
pub fn generate_inputs_id<T: Serialize + ?Sized>(inputs: &T) -> GatewayResult<String> {
    // `to_value` turns non-finite floats into `null`, so check them first.
    inputs
        .serialize(FiniteFloats)
        .map_err(|e| GatewayError::identity(e.to_string()))?;
    let value = serde_json::to_value(inputs).map_err(|e| GatewayError::identity(e.to_string()))?;
    let Value::Object(fields) = &value else {
        return Err(GatewayError::identity(format!(
            "inputs must be a mapping of names to values, got {}",
            gateway_core::envelope::json_type_name(&value)
        )));
    };

    let canonical = canonical_json(&value)?;
    let inputs_id = hex::encode(Sha256::digest(canonical.as_bytes()));
    trace!(inputs_id = %inputs_id, fields = fields.len(), "Derived inputs id");
    Ok(inputs_id)
}

/// Renders `value` in the canonical encoding used for inputs ids.
pub fn canonical_json(value: &Value) -> GatewayResult<String> {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, CanonicalFormatter);
    SortedKeys(value)
        .serialize(&mut serializer)
        .map_err(|e| GatewayError::identity(e.to_string()))?;
    String::from_utf8(out).map_err(|e| GatewayError::identity(e.to_string()))
}

/// Serializes a JSON value with object keys in sorted order at every level,
/// whatever order the map iterates in.
struct SortedKeys<'a>(&'a Value);

impl Serialize for SortedKeys<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Array(items) => serializer.collect_seq(items.iter().map(SortedKeys)),
            Value::Object(fields) => {
                let mut entries: Vec<_> = fields.iter().collect();
                entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
                serializer.collect_map(entries.into_iter().map(|(key, item)| (key, SortedKeys(item))))
            }
            other => other.serialize(serializer),
        }
    }
}

/// `", "` / `": "` separators, ASCII-only strings, and shortest round-trip
/// floats.
struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_f32<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f32) -> io::Result<()> {
        writer.write_all(float_repr(f64::from(value)).as_bytes())
    }

    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(float_repr(value).as_bytes())
    }

    // Quotes, backslashes and control characters arrive through
    // `write_char_escape`; fragments hold everything else.
    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if matches!(c, ' '..='~') {
                let mut byte = [0u8; 4];
                writer.write_all(c.encode_utf8(&mut byte).as_bytes())?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

/// Walks a serializable value and fails on the first float that has no JSON
/// encoding.
struct FiniteFloats;

fn check_finite(value: f64) -> Result<(), serde_json::Error> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ser::Error::custom(format_args!(
            "inputs contain {value}, which has no JSON encoding"
        )))
    }
}

macro_rules! accept_scalars {
    ($($method:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method(self, _: $ty) -> Result<(), Self::Error> {
                Ok(())
            }
        )*
    };
}

macro_rules! walk_compound {
    ($($kind:ident::$method:ident),* $(,)?) => {
        $(
            impl ser::$kind for FiniteFloats {
                type Ok = ();
                type Error = serde_json::Error;

                fn $method<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
                    value.serialize(FiniteFloats)
                }

                fn end(self) -> Result<(), Self::Error> {
                    Ok(())
                }
            }
        )*
    };
}

walk_compound!(
    SerializeSeq::serialize_element,
    SerializeTuple::serialize_element,
    SerializeTupleStruct::serialize_field,
    SerializeTupleVariant::serialize_field,
);

impl ser::SerializeMap for FiniteFloats {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), Self::Error> {
        key.serialize(FiniteFloats)
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
        value.serialize(FiniteFloats)
    }

    fn end(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl ser::SerializeStruct for FiniteFloats {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        value.serialize(FiniteFloats)
    }

    fn end(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl ser::SerializeStructVariant for FiniteFloats {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        value.serialize(FiniteFloats)
    }

    fn end(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Serializer for FiniteFloats {
    type Ok = ();
    type Error = serde_json::Error;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    accept_scalars!(
        serialize_bool(bool),
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_i128(i128),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_u128(u128),
        serialize_char(char),
        serialize_str(&str),
        serialize_bytes(&[u8]),
        serialize_unit_struct(&'static str),
    );

    fn serialize_f32(self, value: f32) -> Result<(), Self::Error> {
        check_finite(f64::from(value))
    }

    fn serialize_f64(self, value: f64) -> Result<(), Self::Error> {
        check_finite(value)
    }

    fn serialize_none(self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<(), Self::Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        value.serialize(self)
    }

    fn serialize_seq(self, _: Option<usize>) -> Result<Self, Self::Error> {
        Ok(self)
    }

    fn serialize_tuple(self, _: usize) -> Result<Self, Self::Error> {
        Ok(self)
    }

    fn serialize_tuple_struct(self, _: &'static str, _: usize) -> Result<Self, Self::Error> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self, Self::Error> {
        Ok(self)
    }

    fn serialize_map(self, _: Option<usize>) -> Result<Self, Self::Error> {
        Ok(self)
    }

    fn serialize_struct(self, _: &'static str, _: usize) -> Result<Self, Self::Error> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self, Self::Error> {
        Ok(self)
    }
}

/// Shortest round-trip rendering of a float: positional notation for
/// decimal exponents in `-4..16`, otherwise `d.ddde+XX`.
fn float_repr(value: f64) -> String {
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. `-1.25e-7`.
    let sci = format!("{value:e}");
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return sci;
    };
    let (sign, mantissa) = mantissa
        .strip_prefix('-')
        .map_or(("", mantissa), |rest| ("-", rest));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if (-4..16).contains(&exponent) {
        let point = exponent + 1;
        let body = if point <= 0 {
            format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
        } else {
            let point = point.unsigned_abs() as usize;
            if point >= digits.len() {
                format!("{digits}{}.0", "0".repeat(point - digits.len()))
            } else {
                format!("{}.{}", &digits[..point], &digits[point..])
            }
        };
        format!("{sign}{body}")
    } else {
        let (lead, rest) = digits.split_at(1);
        let mantissa = if rest.is_empty() {
            lead.to_string()
        } else {
            format!("{lead}.{rest}")
        };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{sign}{mantissa}e{exp_sign}{:02}", exponent.unsigned_abs())
    }
}
