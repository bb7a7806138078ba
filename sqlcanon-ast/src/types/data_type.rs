#[cfg(not(feature = "std"))]
use alloc::boxed::Box;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// SQL data types appearing in column definitions and `CAST`/`:: ` expressions.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataType {
    /// `BOOLEAN`
    Boolean,

    // Integer types
    /// `TINYINT` or `TINYINT(n)`
    TinyInt(Option<u64>),
    /// `SMALLINT` or `SMALLINT(n)`
    SmallInt(Option<u64>),
    /// `INT` or `INT(n)`
    Int(Option<u64>),
    /// `BIGINT` or `BIGINT(n)`
    BigInt(Option<u64>),

    // Arbitrary precision numbers
    /// `NUMERIC`, `NUMERIC(p)` or `NUMERIC(p, s)`
    Numeric {
        /// Total count of significant digits.
        precision: Option<u64>,
        /// Count of digits in the fractional part.
        scale: Option<u64>,
    },
    /// `DECIMAL`, `DECIMAL(p)` or `DECIMAL(p, s)`
    Decimal {
        /// Total count of significant digits.
        precision: Option<u64>,
        /// Count of digits in the fractional part.
        scale: Option<u64>,
    },

    // Floating-point types
    /// `FLOAT` or `FLOAT(p)`
    Float(Option<u64>),
    /// `REAL`
    Real,
    /// `DOUBLE PRECISION`
    Double,

    // Character types
    /// `CHAR` or `CHAR(n)`
    Char(Option<u64>),
    /// `VARCHAR` or `VARCHAR(n)`
    Varchar(Option<u64>),
    /// `CLOB(n)`
    Clob(u64),
    /// `TEXT`, variable unlimited-length characters.
    Text,

    // Binary types
    /// `BINARY(n)`
    Binary(u64),
    /// `VARBINARY(n)`
    Varbinary(u64),
    /// `BLOB(n)`
    Blob(u64),
    /// `BYTEA`, variable-length binary string (PostgreSQL).
    Bytea,

    // Date/time types
    /// `DATE`
    Date,
    /// `TIME`
    Time,
    /// `TIMESTAMP`
    Timestamp,
    /// `INTERVAL`
    Interval,

    /// `<type>[]`, an array of the element type.
    Array(Box<DataType>),
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataType::Boolean => write!(f, "BOOLEAN"),

            DataType::TinyInt(len) => format_type_with_optional_length(f, "TINYINT", len),
            DataType::SmallInt(len) => format_type_with_optional_length(f, "SMALLINT", len),
            DataType::Int(len) => format_type_with_optional_length(f, "INT", len),
            DataType::BigInt(len) => format_type_with_optional_length(f, "BIGINT", len),

            DataType::Numeric { precision, scale } => {
                if let Some(scale) = scale {
                    write!(f, "NUMERIC({},{})", precision.unwrap(), scale)
                } else {
                    format_type_with_optional_length(f, "NUMERIC", precision)
                }
            }
            DataType::Decimal { precision, scale } => {
                if let Some(scale) = scale {
                    write!(f, "DECIMAL({},{})", precision.unwrap(), scale)
                } else {
                    format_type_with_optional_length(f, "DECIMAL", precision)
                }
            }

            DataType::Float(size) => format_type_with_optional_length(f, "FLOAT", size),
            DataType::Real => write!(f, "REAL"),
            DataType::Double => write!(f, "DOUBLE PRECISION"),

            DataType::Char(size) => format_type_with_optional_length(f, "CHAR", size),
            DataType::Varchar(size) => format_type_with_optional_length(f, "VARCHAR", size),
            DataType::Clob(size) => write!(f, "CLOB({})", size),
            DataType::Text => write!(f, "TEXT"),

            DataType::Binary(size) => write!(f, "BINARY({})", size),
            DataType::Varbinary(size) => write!(f, "VARBINARY({})", size),
            DataType::Blob(size) => write!(f, "BLOB({})", size),
            DataType::Bytea => write!(f, "BYTEA"),

            DataType::Date => write!(f, "DATE"),
            DataType::Time => write!(f, "TIME"),
            DataType::Timestamp => write!(f, "TIMESTAMP"),
            DataType::Interval => write!(f, "INTERVAL"),

            DataType::Array(ty) => write!(f, "{}[]", ty),
        }
    }
}

fn format_type_with_optional_length(
    f: &mut fmt::Formatter,
    sql_type: &'static str,
    len: &Option<u64>,
) -> fmt::Result {
    write!(f, "{}", sql_type)?;
    if let Some(len) = len {
        write!(f, "({})", len)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_display() {
        assert_eq!(DataType::Int(None).to_string(), "INT");
        assert_eq!(DataType::Int(Some(11)).to_string(), "INT(11)");
        assert_eq!(
            DataType::Decimal {
                precision: Some(10),
                scale: Some(2)
            }
            .to_string(),
            "DECIMAL(10,2)"
        );
        assert_eq!(
            DataType::Numeric {
                precision: Some(10),
                scale: None
            }
            .to_string(),
            "NUMERIC(10)"
        );
    }

    #[test]
    fn array_display() {
        assert_eq!(
            DataType::Array(Box::new(DataType::Int(None))).to_string(),
            "INT[]"
        );
    }
}
