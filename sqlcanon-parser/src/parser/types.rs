#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, format, string::String, vec, vec::Vec};

use sqlcanon_ast::types::*;
use sqlcanon_core::Dialect;
use sqlcanon_lexer::Token;

use crate::{
    error::{parse_error, parse_error_value, ParserError},
    parser::Parser,
};

impl<'a, D: Dialect> Parser<'a, D> {
    /// Parses a single identifier, quoted or bare.
    pub fn parse_identifier(&mut self) -> Result<Ident, ParserError> {
        match self.next_token() {
            Some(Token::Ident(ident)) => Ok(Ident {
                value: ident.value,
                quote: ident.quote,
            }),
            Some(Token::Keyword(_, s)) => Ok(Ident::new(s)),
            other => self.expected("identifier", other),
        }
    }

    /// Parses a dotted sequence of identifiers: `a`, `a.b`, or `a.b.c`.
    pub fn parse_object_name(&mut self) -> Result<ObjectName, ParserError> {
        let mut idents = vec![self.parse_identifier()?];
        while self.next_token_if_is(&Token::Period) {
            idents.push(self.parse_identifier()?);
        }
        Ok(ObjectName(idents))
    }

    /// Parses a literal value: `NULL`, a boolean, a number, a string, or a
    /// date/time/interval literal.
    pub fn parse_literal(&mut self) -> Result<Literal, ParserError> {
        if self.parse_keyword("NULL") {
            return Ok(Literal::Null);
        }
        if self.parse_keyword("TRUE") {
            return Ok(Literal::Boolean(true));
        }
        if self.parse_keyword("FALSE") {
            return Ok(Literal::Boolean(false));
        }
        // `DATE`/`TIME`/`INTERVAL` are not reserved by every dialect's
        // keyword table (only `TIMESTAMP` always is), so they are matched
        // as soft keywords here.
        if self.parse_word("DATE") {
            return Ok(Literal::Date(self.parse_literal_date()?));
        }
        if self.parse_word("TIME") {
            return Ok(Literal::Time(self.parse_literal_time()?));
        }
        if self.parse_word("TIMESTAMP") {
            return Ok(Literal::Timestamp(self.parse_literal_timestamp()?));
        }
        if self.parse_word("INTERVAL") {
            return Ok(Literal::Interval(self.parse_literal_interval()?));
        }
        match self.peek_token() {
            Some(Token::Number(_)) => match self.next_token() {
                Some(Token::Number(n)) => Ok(Literal::Number(n)),
                _ => unreachable!(),
            },
            Some(Token::String(_)) => match self.next_token() {
                Some(Token::String(s)) => Ok(Literal::String(s)),
                _ => unreachable!(),
            },
            Some(Token::NationalString(_)) => match self.next_token() {
                Some(Token::NationalString(s)) => Ok(Literal::NationalString(s)),
                _ => unreachable!(),
            },
            Some(Token::BitString(_)) => match self.next_token() {
                Some(Token::BitString(s)) => Ok(Literal::BitString(s)),
                _ => unreachable!(),
            },
            Some(Token::HexString(_)) => match self.next_token() {
                Some(Token::HexString(s)) => Ok(Literal::HexString(s)),
                _ => unreachable!(),
            },
            other => {
                let other = other.cloned();
                self.expected("literal", other)
            }
        }
    }

    /// Parses an unsigned integer literal.
    pub fn parse_literal_uint(&mut self) -> Result<u64, ParserError> {
        let location = self.current_location();
        match self.next_token() {
            Some(Token::Number(n)) => match n.parse::<u64>() {
                Ok(n) => Ok(n),
                Err(_) => self.parse_error_at(format_uint_error(&n), location),
            },
            other => self.expected("unsigned integer", other),
        }
    }

    /// Parses one or more adjacent single-quoted string literals. Two or
    /// more collapse to `Literal::StringSequence` rather than being
    /// concatenated, per the canonical tree's `{"literal": [...]}` shape
    /// for `'a' 'b'`.
    pub fn parse_string_literal_sequence(&mut self) -> Result<Literal, ParserError> {
        let mut parts = vec![self.parse_literal_string()?];
        while matches!(self.peek_token(), Some(Token::String(_))) {
            parts.push(self.parse_literal_string()?);
        }
        if parts.len() == 1 {
            Ok(Literal::String(parts.into_iter().next().unwrap()))
        } else {
            Ok(Literal::StringSequence(parts))
        }
    }

    /// Parses a single-quoted string literal, not wrapped in a `Literal`.
    pub fn parse_literal_string(&mut self) -> Result<String, ParserError> {
        match self.next_token() {
            Some(Token::String(s)) => Ok(s),
            other => self.expected("string literal", other),
        }
    }

    /// Parses the body of a `DATE '...'` literal.
    pub fn parse_literal_date(&mut self) -> Result<Date, ParserError> {
        let location = self.current_location();
        let value = self.parse_literal_string()?;
        parse_date(&value).or_else(|err| self.parse_error_at(err.message().to_string(), location))
    }

    /// Parses the body of a `TIME '...'` literal.
    pub fn parse_literal_time(&mut self) -> Result<Time, ParserError> {
        let location = self.current_location();
        let value = self.parse_literal_string()?;
        parse_time(&value).or_else(|err| self.parse_error_at(err.message().to_string(), location))
    }

    /// Parses the body of a `TIMESTAMP '...'` literal.
    pub fn parse_literal_timestamp(&mut self) -> Result<Timestamp, ParserError> {
        let location = self.current_location();
        let value = self.parse_literal_string()?;
        let (date_part, time_part) = match value.split_once(' ') {
            Some((d, t)) => (d, Some(t)),
            None => (value.as_str(), None),
        };
        let date = parse_date(date_part)
            .or_else(|err| self.parse_error_at(err.message().to_string(), location))?;
        let time = time_part
            .map(|t| {
                parse_time(t).or_else(|err| self.parse_error_at(err.message().to_string(), location))
            })
            .transpose()?;
        Ok(Timestamp { date, time })
    }

    /// Parses the body and trailing unit clause of an `INTERVAL '...' ...`
    /// literal.
    pub fn parse_literal_interval(&mut self) -> Result<Interval, ParserError> {
        let value = self.parse_literal_string()?;
        let leading_field = self.maybe_parse_date_time_field();
        let (leading_precision, fractional_seconds_precision) = if leading_field.is_some() {
            self.parse_optional_precision_scale()?
        } else {
            (None, None)
        };
        if leading_field == Some(DateTimeField::Second) {
            return Ok(Interval {
                value,
                leading_field,
                leading_precision,
                tailing_field: None,
                fractional_seconds_precision,
            });
        }
        let tailing_field = if self.parse_word("TO") {
            Some(self.parse_date_time_field()?)
        } else {
            None
        };
        let fractional_seconds_precision = if tailing_field == Some(DateTimeField::Second) {
            self.parse_optional_precision()?
        } else {
            fractional_seconds_precision
        };
        Ok(Interval {
            value,
            leading_field,
            leading_precision,
            tailing_field,
            fractional_seconds_precision,
        })
    }

    /// Parses a date/time field keyword: `YEAR`, `MONTH`, `DAY`, `HOUR`,
    /// `MINUTE`, or `SECOND`.
    pub(crate) fn parse_date_time_field(&mut self) -> Result<DateTimeField, ParserError> {
        match self.maybe_parse_date_time_field() {
            Some(field) => Ok(field),
            None => {
                let found = self.peek_token().cloned();
                self.expected("date/time field", found)
            }
        }
    }

    fn maybe_parse_date_time_field(&mut self) -> Option<DateTimeField> {
        if self.parse_keyword("YEAR") {
            Some(DateTimeField::Year)
        } else if self.parse_keyword("MONTH") {
            Some(DateTimeField::Month)
        } else if self.parse_keyword("DAY") {
            Some(DateTimeField::Day)
        } else if self.parse_keyword("HOUR") {
            Some(DateTimeField::Hour)
        } else if self.parse_keyword("MINUTE") {
            Some(DateTimeField::Minute)
        } else if self.parse_keyword("SECOND") {
            Some(DateTimeField::Second)
        } else {
            None
        }
    }

    /// Parses a data type name, with its optional length/precision.
    pub fn parse_data_type(&mut self) -> Result<DataType, ParserError> {
        let location = self.current_location();
        let name = self.parse_identifier()?;
        let upper = name.value.to_uppercase();
        let data_type = match upper.as_str() {
            "BOOLEAN" | "BOOL" => DataType::Boolean,
            "TINYINT" => DataType::TinyInt(self.parse_optional_precision()?),
            "SMALLINT" => DataType::SmallInt(self.parse_optional_precision()?),
            "INT" | "INTEGER" => DataType::Int(self.parse_optional_precision()?),
            "BIGINT" => DataType::BigInt(self.parse_optional_precision()?),
            "NUMERIC" => {
                let (precision, scale) = self.parse_optional_precision_scale()?;
                DataType::Numeric { precision, scale }
            }
            "DECIMAL" | "DEC" => {
                let (precision, scale) = self.parse_optional_precision_scale()?;
                DataType::Decimal { precision, scale }
            }
            "FLOAT" => DataType::Float(self.parse_optional_precision()?),
            "REAL" => DataType::Real,
            "DOUBLE" => {
                self.parse_word("PRECISION");
                DataType::Double
            }
            "CHAR" | "CHARACTER" => DataType::Char(self.parse_optional_precision()?),
            "VARCHAR" => DataType::Varchar(self.parse_optional_precision()?),
            "CLOB" => DataType::Clob(self.parse_required_precision()?),
            "TEXT" => DataType::Text,
            "BINARY" => DataType::Binary(self.parse_required_precision()?),
            "VARBINARY" => DataType::Varbinary(self.parse_required_precision()?),
            "BLOB" => DataType::Blob(self.parse_required_precision()?),
            "BYTEA" => DataType::Bytea,
            "DATE" => DataType::Date,
            "TIME" => DataType::Time,
            "TIMESTAMP" => DataType::Timestamp,
            "INTERVAL" => DataType::Interval,
            _ => return self.parse_error_at(format_unknown_type_error(&name.value), location),
        };
        if self.parse_word("ARRAY") || self.next_token_if_is(&Token::LeftBracket) {
            if matches!(self.peek_token(), Some(Token::RightBracket)) {
                self.next_token();
            }
            return Ok(DataType::Array(Box::new(data_type)));
        }
        Ok(data_type)
    }

    fn parse_optional_precision(&mut self) -> Result<Option<u64>, ParserError> {
        if self.next_token_if_is(&Token::LeftParen) {
            let n = self.parse_literal_uint()?;
            self.expect_token(&Token::RightParen)?;
            Ok(Some(n))
        } else {
            Ok(None)
        }
    }

    fn parse_required_precision(&mut self) -> Result<u64, ParserError> {
        self.expect_token(&Token::LeftParen)?;
        let n = self.parse_literal_uint()?;
        self.expect_token(&Token::RightParen)?;
        Ok(n)
    }

    fn parse_optional_precision_scale(
        &mut self,
    ) -> Result<(Option<u64>, Option<u64>), ParserError> {
        if self.next_token_if_is(&Token::LeftParen) {
            let precision = self.parse_literal_uint()?;
            let scale = if self.next_token_if_is(&Token::Comma) {
                Some(self.parse_literal_uint()?)
            } else {
                None
            };
            self.expect_token(&Token::RightParen)?;
            Ok((Some(precision), scale))
        } else {
            Ok((None, None))
        }
    }
}

fn parse_date(value: &str) -> Result<Date, ParserError> {
    let parts: Vec<&str> = value.splitn(3, '-').collect();
    if parts.len() != 3 {
        return parse_error(format_date_error(value));
    }
    let years = parts[0]
        .parse::<u16>()
        .map_err(|_| parse_error_value(format_date_error(value)))?;
    let months = parts[1]
        .parse::<u8>()
        .map_err(|_| parse_error_value(format_date_error(value)))?;
    let days = parts[2]
        .parse::<u8>()
        .map_err(|_| parse_error_value(format_date_error(value)))?;
    Ok(Date {
        years,
        months,
        days,
    })
}

fn parse_time(value: &str) -> Result<Time, ParserError> {
    let (clock, time_zone) = split_time_zone(value);
    let (clock, seconds_fraction) = match clock.split_once('.') {
        Some((clock, frac)) => (
            clock,
            Some(
                frac.parse::<u32>()
                    .map_err(|_| parse_error_value(format_time_error(value)))?,
            ),
        ),
        None => (clock, None),
    };
    let parts: Vec<&str> = clock.splitn(3, ':').collect();
    if parts.len() != 3 {
        return parse_error(format_time_error(value));
    }
    let hours = parts[0]
        .parse::<u8>()
        .map_err(|_| parse_error_value(format_time_error(value)))?;
    let minutes = parts[1]
        .parse::<u8>()
        .map_err(|_| parse_error_value(format_time_error(value)))?;
    let seconds = parts[2]
        .parse::<u8>()
        .map_err(|_| parse_error_value(format_time_error(value)))?;
    Ok(Time {
        hours,
        minutes,
        seconds,
        seconds_fraction,
        time_zone,
    })
}

fn split_time_zone(value: &str) -> (&str, Option<TimeZone>) {
    // Skip the leading char: negative clock components don't occur, so the
    // first `+`/`-` encountered after it is the time zone sign.
    if let Some(pos) = value[1..].find(['+', '-']) {
        let pos = pos + 1;
        let (clock, zone) = value.split_at(pos);
        let plus_sign = zone.starts_with('+');
        let zone = &zone[1..];
        if let Some((h, m)) = zone.split_once(':') {
            if let (Ok(hours), Ok(minutes)) = (h.parse::<u8>(), m.parse::<u8>()) {
                return (
                    clock,
                    Some(TimeZone {
                        plus_sign,
                        hours,
                        minutes,
                    }),
                );
            }
        }
    }
    (value, None)
}

fn format_uint_error(n: &str) -> String {
    format!("invalid unsigned integer literal: {}", n)
}

fn format_unknown_type_error(name: &str) -> String {
    format!("unknown data type: {}", name)
}

fn format_date_error(value: &str) -> String {
    format!("invalid DATE literal: {}", value)
}

fn format_time_error(value: &str) -> String {
    format!("invalid TIME literal: {}", value)
}
