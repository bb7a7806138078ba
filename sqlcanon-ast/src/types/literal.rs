#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utils::escape_single_quote_string;

/// SQL literal values such as null, boolean, number, string, datetime and interval.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// `NULL` value
    Null,

    /// Boolean literal, TRUE or FALSE
    Boolean(bool),

    /// Numeric literal, kept as the original textual form.
    Number(String),

    /// String literal (single quoted), e.g. 'string'
    String(String),
    /// Adjacent string literals separated only by whitespace, e.g.
    /// `'a' 'b'`. Kept as an ordered sequence rather than concatenated,
    /// since the canonical tree preserves each literal distinctly.
    StringSequence(Vec<String>),
    /// National string literal, e.g. N'string'
    NationalString(String),
    /// Bit string literal, e.g. B'010101'
    BitString(String),
    /// Hex string literal, e.g. X'0123456789abcdef' or 0x0123456789abcdef
    HexString(String),

    /// DATE literal
    Date(Date),
    /// TIME literal
    Time(Time),
    /// TIMESTAMP literal
    Timestamp(Timestamp),

    /// INTERVAL literal
    Interval(Interval),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Boolean(v) => {
                if *v {
                    f.write_str("TRUE")
                } else {
                    f.write_str("FALSE")
                }
            }
            Self::Number(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "'{}'", escape_single_quote_string(v)),
            Self::StringSequence(parts) => {
                let mut first = true;
                for part in parts {
                    if !first {
                        write!(f, " ")?;
                    }
                    first = false;
                    write!(f, "'{}'", escape_single_quote_string(part))?;
                }
                Ok(())
            }
            Self::NationalString(v) => write!(f, "N'{}'", v),
            Self::BitString(v) => write!(f, "B'{}'", v),
            Self::HexString(v) => write!(f, "X'{}'", v),
            Self::Date(v) => write!(f, "DATE '{}'", v),
            Self::Time(v) => write!(f, "TIME '{}'", v),
            Self::Timestamp(v) => write!(f, "TIMESTAMP '{}'", v),
            Self::Interval(interval) => write!(f, "{}", interval),
        }
    }
}

/// Date literal, format: `DATE '<years>-<months>-<days>'`, e.g. `DATE '2021-11-09'`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Date {
    /// Full year. `u16` is wide enough for any year worth representing.
    pub years: u16,
    /// Month, 1-12.
    pub months: u8,
    /// Day of month, 1-31.
    pub days: u8,
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.years, self.months, self.days)
    }
}

/// Time literal, roughly in the following format:
/// `TIME '<hours>:<minutes>:<seconds> [ .<seconds fraction> ] [ <time zone interval> ]'`,
/// e.g. `TIME '11:40:12.1234+08:00'`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Time {
    /// Hours, 0-23.
    pub hours: u8,
    /// Minutes, 0-59.
    pub minutes: u8,
    /// Seconds, 0-60 (leap second tolerant).
    pub seconds: u8,
    /// Fractional seconds, as an unscaled integer of the digits that followed the `.`.
    pub seconds_fraction: Option<u32>,
    /// Optional time zone offset.
    pub time_zone: Option<TimeZone>,
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )?;
        if let Some(seconds_fraction) = self.seconds_fraction {
            write!(f, ".{}", seconds_fraction)?;
        }
        if let Some(time_zone) = self.time_zone {
            write!(f, "{}", time_zone)?;
        }
        Ok(())
    }
}

/// The time zone field of a time literal, format: `<sign><hours>:<minutes>`,
/// e.g. `+08:00` in `TIME '11:40:12.1234+08:00'`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeZone {
    /// `true` for a plus sign, `false` for a minus sign.
    pub plus_sign: bool,
    /// Hours of offset.
    pub hours: u8,
    /// Minutes of offset.
    pub minutes: u8,
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.plus_sign {
            write!(f, "+{:02}:{:02}", self.hours, self.minutes)
        } else {
            write!(f, "-{:02}:{:02}", self.hours, self.minutes)
        }
    }
}

/// Timestamp literal, roughly in the following format:
/// `TIMESTAMP '<years>-<months>-<days> <hours>:<minutes>:<seconds> [ .<seconds fraction> ] [ <time zone interval> ]'`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timestamp {
    /// The date part.
    pub date: Date,
    /// The optional time-of-day part.
    pub time: Option<Time>,
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(time) = self.time {
            write!(f, "{} {}", self.date, time)?;
        } else {
            write!(f, "{}", self.date)?;
        }
        Ok(())
    }
}

/// INTERVAL literal, roughly in the following format:
///
/// ```ignore
/// INTERVAL '<value>' <leading_field> [ (<leading_precision>) ]
///     [ TO <tailing_field> [ (<fractional_seconds_precision>) ] ]
/// ```
///
/// For example: `INTERVAL '123:45.67' MINUTE (3) TO SECOND (2)`.
///
/// The parser does not validate `<value>`, nor does it check that the
/// `<leading_field>` unit is coarser than `<tailing_field>`, as the SQL
/// standard requires. Downstream consumers reject malformed values and
/// unit combinations.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    /// The raw `<value>` that appeared inside `INTERVAL '<value>'`.
    pub value: String,
    /// The unit of the leading field, e.g. `MINUTE` in `INTERVAL 'T' MINUTE`.
    pub leading_field: Option<DateTimeField>,
    /// How many digits the leading field may occupy.
    pub leading_precision: Option<u64>,
    /// The unit of the tailing field, if the interval specifies a range
    /// (`... TO <tailing_field>`).
    pub tailing_field: Option<DateTimeField>,
    /// Fractional-seconds precision, valid only when the tailing (or sole)
    /// field is `SECOND`.
    pub fractional_seconds_precision: Option<u64>,
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (
            self.leading_field,
            self.leading_precision,
            self.fractional_seconds_precision,
        ) {
            (
                Some(DateTimeField::Second),
                Some(leading_precision),
                Some(fractional_seconds_precision),
            ) => {
                // When the leading field is SECOND, the parser guarantees no tailing field.
                assert!(self.tailing_field.is_none());
                write!(
                    f,
                    "INTERVAL '{}' SECOND({}, {})",
                    escape_single_quote_string(&self.value),
                    leading_precision,
                    fractional_seconds_precision
                )?;
            }
            _ => {
                write!(f, "INTERVAL '{}'", escape_single_quote_string(&self.value))?;
                if let Some(leading_field) = &self.leading_field {
                    write!(f, " {}", leading_field)?;
                }
                if let Some(leading_precision) = &self.leading_precision {
                    write!(f, "({})", leading_precision)?;
                }
                if let Some(tailing_field) = &self.tailing_field {
                    write!(f, " TO {}", tailing_field)?;
                }
                if let Some(fractional_seconds_precision) = &self.fractional_seconds_precision {
                    write!(f, "({})", fractional_seconds_precision)?;
                }
            }
        }
        Ok(())
    }
}

/// The leading/tailing field of an interval.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DateTimeField {
    /// `YEAR`
    Year,
    /// `MONTH`
    Month,
    /// `DAY`
    Day,
    /// `HOUR`
    Hour,
    /// `MINUTE`
    Minute,
    /// `SECOND`
    Second,
}

impl fmt::Display for DateTimeField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Day => "DAY",
            Self::Hour => "HOUR",
            Self::Minute => "MINUTE",
            Self::Second => "SECOND",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_literal_display() {
        let string = Literal::String("hello".into());
        assert_eq!(string.to_string(), "'hello'");

        let national = Literal::NationalString("你好".into());
        assert_eq!(national.to_string(), "N'你好'");

        let bit = Literal::BitString("010101".into());
        assert_eq!(bit.to_string(), "B'010101'");

        let hex = Literal::HexString("1234567890abcdf".into());
        assert_eq!(hex.to_string(), "X'1234567890abcdf'");

        let sequence = Literal::StringSequence(vec!["a".into(), "b".into()]);
        assert_eq!(sequence.to_string(), "'a' 'b'");
    }

    #[test]
    fn datetime_literal_display() {
        let date = Date {
            years: 2021,
            months: 11,
            days: 9,
        };
        assert_eq!(Literal::Date(date).to_string(), "DATE '2021-11-09'");

        let mut time = Time {
            hours: 15,
            minutes: 37,
            seconds: 12,
            seconds_fraction: None,
            time_zone: None,
        };
        assert_eq!(Literal::Time(time).to_string(), "TIME '15:37:12'");
        time.seconds_fraction = Some(123456);
        assert_eq!(Literal::Time(time).to_string(), "TIME '15:37:12.123456'");
        time.time_zone = Some(TimeZone {
            plus_sign: true,
            hours: 8,
            minutes: 0,
        });
        assert_eq!(
            Literal::Time(time).to_string(),
            "TIME '15:37:12.123456+08:00'"
        );

        let timestamp = Timestamp {
            date,
            time: Some(time),
        };
        assert_eq!(
            Literal::Timestamp(timestamp).to_string(),
            "TIMESTAMP '2021-11-09 15:37:12.123456+08:00'"
        );
    }

    #[test]
    fn interval_literal_display() {
        let interval = Interval {
            value: "2021".to_string(),
            leading_field: Some(DateTimeField::Year),
            leading_precision: Some(4),
            tailing_field: None,
            fractional_seconds_precision: None,
        };
        assert_eq!(
            Literal::Interval(interval).to_string(),
            "INTERVAL '2021' YEAR(4)"
        );

        let interval = Interval {
            value: "1:1:1".to_string(),
            leading_field: Some(DateTimeField::Second),
            leading_precision: Some(4),
            tailing_field: None,
            fractional_seconds_precision: Some(2),
        };
        assert_eq!(
            Literal::Interval(interval).to_string(),
            "INTERVAL '1:1:1' SECOND(4, 2)"
        );

        let interval = Interval {
            value: "1:1:1".to_string(),
            leading_field: Some(DateTimeField::Hour),
            leading_precision: None,
            tailing_field: Some(DateTimeField::Second),
            fractional_seconds_precision: Some(2),
        };
        assert_eq!(
            Literal::Interval(interval).to_string(),
            "INTERVAL '1:1:1' HOUR TO SECOND(2)"
        );
    }
}
