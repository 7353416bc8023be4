use crate::error::{Error, Result};
use std::str::FromStr;

/// Outcome of coercing a text field into a value
///
/// Form fields are frequently left blank, and a blank field is not an error in
/// itself. The three cases are therefore kept explicit rather than folding
/// "missing" into a failure.
///
/// ```rust
/// # use decaychain_utils::{Coerced, Input};
/// assert_eq!("1 000".coerce::<u32>(), Coerced::Value(1000));
/// assert_eq!("   ".coerce::<u32>(), Coerced::Missing);
/// assert_eq!("abc".coerce::<u32>(), Coerced::Invalid { text: "abc".to_string() });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced<T> {
    /// Successfully converted value
    Value(T),
    /// Empty or whitespace-only input
    Missing,
    /// Input present but not convertible
    Invalid {
        /// The original text, for reporting
        text: String,
    },
}

impl<T> Coerced<T> {
    /// Fall back to `default` when the field was left empty
    ///
    /// Invalid input is still an error, only the missing case is defaulted.
    ///
    /// ```rust
    /// # use decaychain_utils::Input;
    /// assert_eq!("".coerce::<f64>().or(1.0), Ok(1.0));
    /// assert_eq!("2.5".coerce::<f64>().or(1.0), Ok(2.5));
    /// assert!("x".coerce::<f64>().or(1.0).is_err());
    /// ```
    pub fn or(self, default: T) -> Result<T> {
        match self {
            Coerced::Value(v) => Ok(v),
            Coerced::Missing => Ok(default),
            Coerced::Invalid { text } => Err(Error::InvalidInput { text }),
        }
    }

    /// Treat an empty field as absent rather than an error
    pub fn optional(self) -> Result<Option<T>> {
        match self {
            Coerced::Value(v) => Ok(Some(v)),
            Coerced::Missing => Ok(None),
            Coerced::Invalid { text } => Err(Error::InvalidInput { text }),
        }
    }

    /// Require a value, where both missing and invalid input are errors
    pub fn into_result(self) -> Result<T> {
        match self {
            Coerced::Value(v) => Ok(v),
            Coerced::Missing => Err(Error::MissingInput),
            Coerced::Invalid { text } => Err(Error::InvalidInput { text }),
        }
    }

    /// True for the [Coerced::Value] variant
    pub fn is_value(&self) -> bool {
        matches!(self, Coerced::Value(_))
    }
}

/// Extends string types with numeric coercion for form input
///
/// Users type large numbers in all sorts of ways, so spaces and underscores
/// used as digit separators are removed before parsing.
pub trait Input {
    /// Coerce text into any type implementing `FromStr`
    ///
    /// ```rust
    /// # use decaychain_utils::{Coerced, Input};
    /// assert_eq!("100_000".coerce::<i64>(), Coerced::Value(100_000));
    /// assert_eq!(" 1 000 000 ".coerce::<f64>(), Coerced::Value(1.0e6));
    /// assert_eq!("1.5e3".coerce::<f64>(), Coerced::Value(1500.0));
    /// ```
    fn coerce<T: FromStr>(&self) -> Coerced<T>;
}

impl<S: AsRef<str>> Input for S {
    fn coerce<T: FromStr>(&self) -> Coerced<T> {
        let text = self.as_ref();
        let compact: String = text
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect();

        if compact.is_empty() {
            return Coerced::Missing;
        }

        match compact.parse::<T>() {
            Ok(value) => Coerced::Value(value),
            Err(_) => Coerced::Invalid {
                text: text.trim().to_string(),
            },
        }
    }
}

/// Trim surrounding whitespace and truncate to at most `chars` characters
///
/// ```rust
/// # use decaychain_utils::clean_text;
/// assert_eq!(clean_text("  Radium  ", 30), "Radium");
/// assert_eq!(clean_text("Protactinium", 5), "Prota");
/// ```
pub fn clean_text(text: &str, chars: usize) -> String {
    text.trim().chars().take(chars).collect()
}

/// Lowercase identifier with spaces replaced by underscores
///
/// ```rust
/// # use decaychain_utils::slug;
/// assert_eq!(slug(" Beta Minus ", 30), "beta_minus");
/// ```
pub fn slug(text: &str, chars: usize) -> String {
    text.trim()
        .replace(' ', "_")
        .to_lowercase()
        .chars()
        .take(chars)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", Coerced::Missing)]
    #[case("   ", Coerced::Missing)]
    #[case("100_000", Coerced::Value(100_000))]
    #[case("1 000 000", Coerced::Value(1_000_000))]
    #[case("200", Coerced::Value(200))]
    #[case("-4", Coerced::Value(-4))]
    fn coerce_integers(#[case] text: &str, #[case] expected: Coerced<i64>) {
        assert_eq!(text.coerce::<i64>(), expected);
    }

    #[test]
    fn integers_reject_garbage() {
        assert_eq!(
            "hahahaha".coerce::<i64>(),
            Coerced::Invalid {
                text: "hahahaha".to_string()
            }
        );
        // a float is not silently truncated
        assert!(!"200.5".coerce::<i64>().is_value());
    }

    #[test]
    fn floats_accept_integer_text() {
        assert_eq!("200".coerce::<f64>(), Coerced::Value(200.0));
        assert_eq!("200.0".coerce::<f64>(), Coerced::Value(200.0));
        assert_eq!("1_287_360".coerce::<f64>(), Coerced::Value(1_287_360.0));
    }

    #[test]
    fn defaults_only_cover_missing() {
        assert_eq!("".coerce::<i64>().or(0), Ok(0));
        assert_eq!("7".coerce::<i64>().or(0), Ok(7));
        assert_eq!(
            "foo".coerce::<i64>().or(0),
            Err(Error::InvalidInput {
                text: "foo".to_string()
            })
        );
    }

    #[test]
    fn optional_and_required() {
        assert_eq!("".coerce::<u32>().optional(), Ok(None));
        assert_eq!("88".coerce::<u32>().optional(), Ok(Some(88)));
        assert_eq!("".coerce::<u32>().into_result(), Err(Error::MissingInput));
    }

    #[test]
    fn text_helpers() {
        assert_eq!(clean_text("  Uranium ", 30), "Uranium");
        assert_eq!(clean_text("", 30), "");
        assert_eq!(slug("Alpha Decay", 5), "alpha");
    }
}
