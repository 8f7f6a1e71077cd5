//! Closed set of column value kinds
//!
//! `ValueKind` names what a mapped field holds, `Value` carries one column
//! value between a record and the store. Adding a kind means extending both
//! enums; every dispatch over them is an exhaustive `match`.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// Semantic kind of a mapped column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    /// Point in time, always UTC
    Instant,
    /// 32-bit signed integer
    Integer,
    /// 64-bit float, NULL not allowed
    Double,
    /// Calendar date without time zone
    Date,
    /// 64-bit float that may be NULL
    BoxedDouble,
}

impl ValueKind {
    /// The kind used for an optional field of this kind
    pub const fn boxed(self) -> Self {
        match self {
            ValueKind::Double => ValueKind::BoxedDouble,
            other => other,
        }
    }

    /// Whether a value can be stored in a column of this kind
    ///
    /// `Null` is admitted by every kind; nullability is a property of the
    /// field, not of the column kind.
    pub fn admits(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (_, Value::Null)
                | (ValueKind::Text, Value::Text(_))
                | (ValueKind::Instant, Value::Instant(_))
                | (ValueKind::Integer, Value::Integer(_))
                | (ValueKind::Double | ValueKind::BoxedDouble, Value::Double(_))
                | (ValueKind::Date, Value::Date(_))
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Instant => "instant",
            ValueKind::Integer => "integer",
            ValueKind::Double => "double",
            ValueKind::Date => "date",
            ValueKind::BoxedDouble => "boxed double",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Instant(DateTime<Utc>),
    Integer(i32),
    Double(f64),
    Date(NaiveDate),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Kind carried by this value, `None` for `Null`
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::Null => None,
            Value::Text(_) => Some(ValueKind::Text),
            Value::Instant(_) => Some(ValueKind::Instant),
            Value::Integer(_) => Some(ValueKind::Integer),
            Value::Double(_) => Some(ValueKind::Double),
            Value::Date(_) => Some(ValueKind::Date),
        }
    }

    /// Short name used in error messages
    pub fn kind_name(&self) -> &'static str {
        self.kind().map_or("null", ValueKind::as_str)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Text(s) => f.write_str(s),
            Value::Instant(ts) => write!(f, "{}", ts.to_rfc3339()),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Double(d) => write!(f, "{}", d),
            Value::Date(d) => write!(f, "{}", d),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Instant(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// A Rust field type that can be mapped to one column
///
/// `from_value` hands the value back when it cannot be stored in `Self`,
/// so the caller can report the column it came from.
pub trait ColumnValue: Sized {
    const KIND: ValueKind;
    const NULLABLE: bool = false;

    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> Result<Self, Value>;
}

macro_rules! column_value {
    ($ty:ty, $kind:expr, $variant:ident) => {
        impl ColumnValue for $ty {
            const KIND: ValueKind = $kind;

            fn to_value(&self) -> Value {
                Value::$variant(self.clone())
            }

            fn from_value(value: Value) -> Result<Self, Value> {
                match value {
                    Value::$variant(inner) => Ok(inner),
                    other => Err(other),
                }
            }
        }
    };
}

column_value!(String, ValueKind::Text, Text);
column_value!(DateTime<Utc>, ValueKind::Instant, Instant);
column_value!(i32, ValueKind::Integer, Integer);
column_value!(f64, ValueKind::Double, Double);
column_value!(NaiveDate, ValueKind::Date, Date);

impl<T: ColumnValue> ColumnValue for Option<T> {
    const KIND: ValueKind = T::KIND.boxed();
    const NULLABLE: bool = true;

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ColumnValue::to_value)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_optional_double_is_boxed() {
        assert_eq!(<f64 as ColumnValue>::KIND, ValueKind::Double);
        assert_eq!(<Option<f64> as ColumnValue>::KIND, ValueKind::BoxedDouble);
        assert_eq!(<Option<String> as ColumnValue>::KIND, ValueKind::Text);
        assert!(<Option<i32> as ColumnValue>::NULLABLE);
        assert!(!<i32 as ColumnValue>::NULLABLE);
    }

    #[test]
    fn test_admits() {
        assert!(ValueKind::BoxedDouble.admits(&Value::Double(1.5)));
        assert!(ValueKind::Double.admits(&Value::Null));
        assert!(!ValueKind::Text.admits(&Value::Integer(3)));
        assert!(!ValueKind::Instant.admits(&Value::Date(
            NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()
        )));
    }

    #[test]
    fn test_from_value_rejects_other_kind() {
        let rejected = i32::from_value(Value::Text("7".to_string())).unwrap_err();
        assert_eq!(rejected, Value::Text("7".to_string()));
        assert!(String::from_value(Value::Null).is_err());
        assert_eq!(Option::<String>::from_value(Value::Null), Ok(None));
    }

    #[test]
    fn test_option_into_value() {
        let ts = Utc.with_ymd_and_hms(2019, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(Value::from(Some(ts)), Value::Instant(ts));
        assert_eq!(Value::from(None::<f64>), Value::Null);
        assert_eq!(Value::from("abc").kind_name(), "text");
        assert_eq!(Value::Null.kind_name(), "null");
    }
}
