use crate::f;

/// Extends primitives with more specific formatting options
pub trait ValueExt {
    /// Consistent scientific number formatting
    ///
    /// Masses and half-lives span dozens of orders of magnitude, so they are
    /// always reported in scientific notation with a signed, padded exponent.
    ///
    /// ```rust
    /// # use decaychain_utils::ValueExt;
    /// let half_life = 1_287_360.0;
    /// assert_eq!(half_life.sci(5, 2), "1.28736e+06".to_string());
    /// assert_eq!((2.5e-9).sci(2, 3), "2.50e-009".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: std::fmt::LowerExp> ValueExt for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let mut num = f!("{:.precision$e}", &self, precision = precision);
        // `LowerExp` output always contains 'e'
        let Some(split) = num.find('e') else {
            return num;
        };
        let exp = num.split_off(split);
        let (sign, exp) = match exp.strip_prefix("e-") {
            Some(exp) => ('-', exp),
            None => ('+', &exp[1..]),
        };
        num.push_str(&f!("e{}{:0>pad$}", sign, exp, pad = exp_pad));
        num
    }
}
