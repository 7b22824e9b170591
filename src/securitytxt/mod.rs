//! security.txt content handling
//!
//! Turning a response body into fields and deciding whether those fields
//! make a usable disclosure-policy file. Both steps are pure.

pub mod parser;
pub mod validator;

// Re-export commonly used items
pub use parser::{FieldMap, parse};
pub use validator::{validate, validate_required};
