//! Scalar values exchanged with the store
//!
//! Values bind positionally into statements and come back in row sets.
//! JSON input is coerced per the insert rule: empty string and absent
//! field both become `Null`; everything else maps to the matching scalar.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use super::errors::{StoreError, StoreResult};

/// A single row, keyed by column name (or alias after projection).
pub type Row = BTreeMap<String, SqlValue>;

/// Scalar value as the store understands it.
///
/// Booleans are stored as 0/1 integers, the convention the original
/// MySQL schema relied on.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    /// Coerce a JSON field into a bindable value.
    ///
    /// `None` covers the absent-field case; `""` is the empty-string
    /// case. Arrays and objects are not bindable scalars.
    pub fn coerced(value: Option<&Value>) -> StoreResult<SqlValue> {
        match value {
            None | Some(Value::Null) => Ok(SqlValue::Null),
            Some(Value::String(s)) if s.is_empty() => Ok(SqlValue::Null),
            Some(Value::String(s)) => Ok(SqlValue::Text(s.clone())),
            Some(Value::Bool(b)) => Ok(SqlValue::Int(i64::from(*b))),
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    Ok(SqlValue::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(SqlValue::Float(f))
                } else {
                    Err(StoreError::UnsupportedValue(n.to_string()))
                }
            }
            Some(other) => Err(StoreError::UnsupportedValue(other.to_string())),
        }
    }

    /// Parse a path-style identity ("7" or an opaque key) into a value.
    pub fn identity(raw: &str) -> SqlValue {
        match raw.parse::<i64>() {
            Ok(i) => SqlValue::Int(i),
            Err(_) => SqlValue::Text(raw.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SqlValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert back to JSON for the response body.
    pub fn to_json(&self) -> Value {
        match self {
            SqlValue::Null => Value::Null,
            SqlValue::Int(i) => Value::Number(Number::from(*i)),
            SqlValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            SqlValue::Text(s) => Value::String(s.clone()),
        }
    }

    /// Total ordering used by ORDER BY: nulls first, numbers before
    /// text, numbers compared cross-type.
    pub fn compare(&self, other: &SqlValue) -> Ordering {
        fn rank(v: &SqlValue) -> u8 {
            match v {
                SqlValue::Null => 0,
                SqlValue::Int(_) | SqlValue::Float(_) => 1,
                SqlValue::Text(_) => 2,
            }
        }
        match (self, other) {
            (SqlValue::Int(a), SqlValue::Int(b)) => a.cmp(b),
            (SqlValue::Int(a), SqlValue::Float(b)) => {
                (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SqlValue::Float(a), SqlValue::Int(b)) => {
                a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal)
            }
            (SqlValue::Float(a), SqlValue::Float(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SqlValue::Text(a), SqlValue::Text(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

/// Render a row as a JSON object for the HTTP layer.
pub fn row_to_json(row: &Row) -> Value {
    let mut object = Map::new();
    for (column, value) in row {
        object.insert(column.clone(), value.to_json());
    }
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_string_coerces_to_null() {
        let v = SqlValue::coerced(Some(&json!(""))).unwrap();
        assert_eq!(v, SqlValue::Null);
    }

    #[test]
    fn test_absent_field_coerces_to_null() {
        assert_eq!(SqlValue::coerced(None).unwrap(), SqlValue::Null);
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(
            SqlValue::coerced(Some(&json!("Leo"))).unwrap(),
            SqlValue::Text("Leo".to_string())
        );
        assert_eq!(SqlValue::coerced(Some(&json!(3))).unwrap(), SqlValue::Int(3));
        assert_eq!(SqlValue::coerced(Some(&json!(true))).unwrap(), SqlValue::Int(1));
    }

    #[test]
    fn test_array_is_not_bindable() {
        assert!(SqlValue::coerced(Some(&json!([1, 2]))).is_err());
    }

    #[test]
    fn test_identity_parsing() {
        assert_eq!(SqlValue::identity("42"), SqlValue::Int(42));
        assert_eq!(SqlValue::identity("abc"), SqlValue::Text("abc".to_string()));
    }

    #[test]
    fn test_ordering_nulls_first() {
        assert_eq!(SqlValue::Null.compare(&SqlValue::Int(1)), Ordering::Less);
        assert_eq!(SqlValue::Int(2).compare(&SqlValue::Int(10)), Ordering::Less);
    }
}
