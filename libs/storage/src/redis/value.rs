use std::fmt;

/// A scalar that can be written to the key-value store
///
/// Every variant is stored as its string form, so reads always come back as
/// `String` regardless of what was written.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for StoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreValue::Text(s) => f.write_str(s),
            StoreValue::Integer(n) => write!(f, "{n}"),
            StoreValue::Float(n) => write!(f, "{n}"),
            StoreValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for StoreValue {
    fn from(value: &str) -> Self {
        StoreValue::Text(value.to_string())
    }
}

impl From<String> for StoreValue {
    fn from(value: String) -> Self {
        StoreValue::Text(value)
    }
}

impl From<&String> for StoreValue {
    fn from(value: &String) -> Self {
        StoreValue::Text(value.clone())
    }
}

impl From<i64> for StoreValue {
    fn from(value: i64) -> Self {
        StoreValue::Integer(value)
    }
}

impl From<i32> for StoreValue {
    fn from(value: i32) -> Self {
        StoreValue::Integer(value.into())
    }
}

impl From<u32> for StoreValue {
    fn from(value: u32) -> Self {
        StoreValue::Integer(value.into())
    }
}

impl From<f64> for StoreValue {
    fn from(value: f64) -> Self {
        StoreValue::Float(value)
    }
}

impl From<bool> for StoreValue {
    fn from(value: bool) -> Self {
        StoreValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_forms() {
        assert_eq!(StoreValue::from("bar").to_string(), "bar");
        assert_eq!(StoreValue::from(42i64).to_string(), "42");
        assert_eq!(StoreValue::from(-7i32).to_string(), "-7");
        assert_eq!(StoreValue::from(1.5f64).to_string(), "1.5");
        assert_eq!(StoreValue::from(true).to_string(), "true");
        assert_eq!(StoreValue::from(false).to_string(), "false");
    }
}
