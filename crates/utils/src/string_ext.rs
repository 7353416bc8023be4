/// Extends string types with name and symbol casing
pub trait StringExt {
    /// Capitalises the first letter in a string, leaving the rest untouched
    ///
    /// ```rust
    /// # use decaychain_utils::StringExt;
    /// assert_eq!("radium".capitalise(), "Radium".to_string());
    /// assert_eq!("beta minus".capitalise(), "Beta minus".to_string());
    /// ```
    fn capitalise(&self) -> String;

    /// Chemical symbol casing, first letter upper and the rest lower
    ///
    /// ```rust
    /// # use decaychain_utils::StringExt;
    /// assert_eq!("RA".symbol_case(), "Ra".to_string());
    /// assert_eq!(" u ".symbol_case(), "U".to_string());
    /// ```
    fn symbol_case(&self) -> String;
}

impl<T: AsRef<str>> StringExt for T {
    fn capitalise(&self) -> String {
        let mut c = self.as_ref().chars();
        match c.next() {
            Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
            None => String::new(),
        }
    }

    fn symbol_case(&self) -> String {
        self.as_ref().trim().to_lowercase().capitalise()
    }
}
