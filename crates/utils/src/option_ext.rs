use crate::f;

/// Extends Option for easy display formatting
pub trait OptionExt {
    /// Display an optional record field
    ///
    /// Isotope records carry several optional values (proton number,
    /// reference, released energy). This gives either the value contained
    /// within `Some()` or "none" for the `None` variant, so that summaries
    /// line up without matching on every field.
    ///
    /// ```rust
    /// # use decaychain_utils::OptionExt;
    /// let proton_number: Option<u32> = Some(88);
    /// assert_eq!(proton_number.display(), "88");
    ///
    /// let reference: Option<String> = None;
    /// assert_eq!(reference.display(), "none");
    /// ```
    fn display(&self) -> String;
}

impl<T: std::fmt::Display> OptionExt for Option<T> {
    fn display(&self) -> String {
        match self {
            Some(value) => f!("{value}"),
            None => "none".to_string(),
        }
    }
}
