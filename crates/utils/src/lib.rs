//! Common utility for extended `std` types and form input
//!
//! These are left public for convenience.
//!
//! For example, capitalising an element name, formatting a mass in scientific
//! notation, or coercing text typed into a form field into a number are useful
//! everywhere.

// Alias for the format! macro
pub use std::format as f;

// Modules
mod error;
mod input;
mod option_ext;
mod string_ext;
mod value_ext;

// Flatten
pub use error::{Error, Result};
pub use input::{clean_text, slug, Coerced, Input};
pub use option_ext::OptionExt;
pub use string_ext::StringExt;
pub use value_ext::ValueExt;
