//! Rule-based recognizers for blood panel fields.

pub mod aliases;
pub mod numeric;
pub mod patterns;

pub use aliases::{AliasResolver, FIELD_ALIASES};
pub use numeric::{extract_value, parse_leading_float};
pub use patterns::*;
