use std::{any::type_name, error, fmt, num::ParseIntError, rc::Rc};

use derive_more::{Display, From};
use indexmap::IndexMap;

/// A type alias for a string coming out of the dump.
/// Reference counted so that it exists once in memory no matter how many
/// records end up holding it.
pub type TableString = Rc<str>;

/// An error that can occur when converting a value from the dump.
#[derive(Debug, From, Display)]
pub enum ConversionError {
    /// The value is not of the expected type.
    #[display("failed converting {:?} to {}", _0, _1)]
    InvalidType(TableValue, &'static str),
    ParseIntError(ParseIntError),
}

impl error::Error for ConversionError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::ParseIntError(err) => Some(err),
            _ => None,
        }
    }
}

/// A value that comes from a table literal in the dump.
/// Quoted scalars are always strings; unquoted scalars that look like
/// integers are integers, everything else (identifier paths like
/// `Perks.EZPZ` included) stays a string.
#[derive(PartialEq, Clone, Debug)]
pub enum TableValue {
    /// A simple string value.
    String(TableString),
    /// An integer, e.g. a vote count or an ordering index.
    Integer(i64),
    /// A nested table.
    Object(TableObject),
}

impl From<&str> for TableValue {
    fn from(value: &str) -> Self {
        if let Ok(int) = value.parse() {
            TableValue::Integer(int)
        } else {
            TableValue::String(Rc::from(value))
        }
    }
}

impl TableValue {
    /// Build a value from a scalar token. Quoting wins over any type sniffing
    /// so that `"9999"` stays a string.
    pub fn from_scalar(text: &str, quoted: bool) -> Self {
        if quoted {
            TableValue::String(Rc::from(text))
        } else {
            text.into()
        }
    }

    /// Get the value as a string
    pub fn as_string(&self) -> Result<TableString, ConversionError> {
        match self {
            TableValue::String(s) => Ok(s.clone()),
            _ => Err(ConversionError::InvalidType(
                self.clone(),
                type_name::<TableString>(),
            )),
        }
    }

    /// Get the value as an integer
    pub fn as_integer(&self) -> Result<i64, ConversionError> {
        match self {
            TableValue::Integer(i) => Ok(*i),
            TableValue::String(s) => Ok(s.parse()?),
            _ => Err(ConversionError::InvalidType(
                self.clone(),
                type_name::<i64>(),
            )),
        }
    }

    /// Get the value as a nested table
    pub fn as_object(&self) -> Result<&TableObject, ConversionError> {
        match self {
            TableValue::Object(o) => Ok(o),
            _ => Err(ConversionError::InvalidType(
                self.clone(),
                type_name::<TableObject>(),
            )),
        }
    }
}

/// A table that stores values under keys, in order of appearance in the dump.
pub type TableMap = IndexMap<String, TableValue>;
/// A table that stores bare values, e.g. a perk list.
pub type TableArray = Vec<TableValue>;

/// An object that comes from a table literal in the dump.
#[derive(PartialEq, Clone, Debug)]
pub enum TableObject {
    /// A table with keyed entries.
    Map(TableMap),
    /// A table with bare entries. An empty table parses as this.
    Array(TableArray),
}

impl TableObject {
    /// Get the object as a keyed table
    pub fn as_map(&self) -> Result<&TableMap, ConversionError> {
        match self {
            TableObject::Map(m) => Ok(m),
            _ => Err(ConversionError::InvalidType(
                TableValue::Object(self.clone()),
                type_name::<TableMap>(),
            )),
        }
    }

    /// Get the object as a bare-entry table
    pub fn as_array(&self) -> Result<&TableArray, ConversionError> {
        match self {
            TableObject::Array(a) => Ok(a),
            _ => Err(ConversionError::InvalidType(
                TableValue::Object(self.clone()),
                type_name::<TableArray>(),
            )),
        }
    }

    /// Check if the object has no entries of either kind
    pub fn is_empty(&self) -> bool {
        match self {
            TableObject::Map(m) => m.is_empty(),
            TableObject::Array(a) => a.is_empty(),
        }
    }
}

#[derive(Debug)]
pub enum KeyError {
    MissingKey(String, TableMap),
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey(key, obj) => write!(f, "key {} missing from table {:?}", key, obj),
        }
    }
}

impl error::Error for KeyError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

#[derive(Debug, From, Display)]
pub enum TableObjectError {
    ConversionError(ConversionError),
    KeyError(KeyError),
}

impl error::Error for TableObjectError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::ConversionError(e) => Some(e),
            Self::KeyError(e) => Some(e),
        }
    }
}

pub trait TableMapping {
    /// Get the value of a key, or return an error if the key is missing.
    /// A different flavor of [IndexMap::get] for the cases where absence is
    /// worth reporting. The error is lazily initialized, so the happy path
    /// pays nothing.
    fn get_err(&self, key: &str) -> Result<&TableValue, KeyError>;
    /// Get the value of a key as a string.
    fn get_string(&self, key: &str) -> Result<TableString, TableObjectError>;
    /// Get the value of a key as an integer.
    fn get_integer(&self, key: &str) -> Result<i64, TableObjectError>;
    /// Get the value of a key as a nested table.
    fn get_object(&self, key: &str) -> Result<&TableObject, TableObjectError>;
}

impl TableMapping for TableMap {
    fn get_err(&self, key: &str) -> Result<&TableValue, KeyError> {
        self.get(key)
            .ok_or_else(|| KeyError::MissingKey(key.to_owned(), self.clone()))
    }

    fn get_string(&self, key: &str) -> Result<TableString, TableObjectError> {
        Ok(self.get_err(key)?.as_string()?)
    }

    fn get_integer(&self, key: &str) -> Result<i64, TableObjectError> {
        Ok(self.get_err(key)?.as_integer()?)
    }

    fn get_object(&self, key: &str) -> Result<&TableObject, TableObjectError> {
        Ok(self.get_err(key)?.as_object()?)
    }
}
