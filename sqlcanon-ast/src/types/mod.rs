//! Primitive AST types: identifiers, object names, literals and data types.

mod data_type;
mod ident;
mod literal;
mod object;

pub use self::{
    data_type::DataType,
    ident::Ident,
    literal::{Date, DateTimeField, Interval, Literal, Time, TimeZone, Timestamp},
    object::ObjectName,
};
