//! Compact `Symbol-MassNumber` identifiers

// internal modules
use crate::error::{Error, Result};

// decaychain modules
use decaychain_utils::{f, StringExt};

// nom parser combinators
use nom::character::complete::{alpha1, one_of, u32 as mass_number};
use nom::combinator::{eof, opt};
use nom::error::{Error as NomError, ErrorKind};
use nom::{Err, IResult};

/// Identifier for an isotope, formatted as `Symbol-MassNumber`
///
/// The canonical form is always the capitalised element symbol, a hyphen,
/// and the mass number, e.g. `U-238`. This is the key used by the
/// [Registry](crate::Registry) and the store.
///
/// The `FromStr` implementation is forgiving about what people type, so
/// `"ra225"`, `"Ra_225"`, and `"RA-225"` all parse to the same id.
///
/// ```rust
/// # use decaychain_nuclide::ShortId;
/// # use std::str::FromStr;
/// let id = ShortId::from_str("ra225").unwrap();
/// assert_eq!(id.to_string(), "Ra-225");
/// assert_eq!(id.mass_number, 225);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShortId {
    /// Element symbol, e.g. 'Ra', 'U'
    pub symbol: String,
    /// Mass number (A)
    pub mass_number: u32,
}

impl ShortId {
    /// Build an id from its parts, checking the symbol is sensible
    ///
    /// ```rust
    /// # use decaychain_nuclide::ShortId;
    /// assert_eq!(ShortId::new("ac", 225).unwrap().to_string(), "Ac-225");
    /// assert!(ShortId::new("Ac2", 225).is_err());
    /// assert!(ShortId::new("", 225).is_err());
    /// ```
    pub fn new(symbol: &str, mass_number: u32) -> Result<Self> {
        let symbol = symbol.trim();
        if symbol.is_empty() || symbol.len() > 3 || !symbol.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(Error::ParseError(f!("invalid element symbol \"{symbol}\"")));
        }

        Ok(Self {
            symbol: symbol.symbol_case(),
            mass_number,
        })
    }

    /// Check that `s` is already in canonical form
    ///
    /// Decay products are looked up by exact key, so anything stored in a
    /// record must be canonical rather than merely parseable.
    ///
    /// ```rust
    /// # use decaychain_nuclide::ShortId;
    /// assert!(ShortId::is_canonical("Ac-225"));
    /// assert!(!ShortId::is_canonical("ac225"));
    /// ```
    pub fn is_canonical(s: &str) -> bool {
        s.parse::<ShortId>()
            .is_ok_and(|id| id.to_string() == s)
    }
}

impl std::str::FromStr for ShortId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, (symbol, mass)) = short_id(s.trim())
            .map_err(|_| Error::ParseError(f!("could not extract a short id from \"{s}\"")))?;

        ShortId::new(symbol, mass)
    }
}

impl std::fmt::Display for ShortId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}-{}", self.symbol, self.mass_number)
    }
}

/// Full `<symbol><separator?><mass number>` with nothing trailing
fn short_id(i: &str) -> IResult<&str, (&str, u32)> {
    let (i, symbol) = element(i)?;
    let (i, _) = opt(separator)(i)?;
    let (i, mass) = mass_number(i)?;
    let (i, _) = eof(i)?;
    Ok((i, (symbol, mass)))
}

/// Element symbols are at most three letters
fn element(i: &str) -> IResult<&str, &str> {
    let (rest, symbol) = alpha1(i)?;

    if symbol.len() > 3 {
        Err(Err::Error(NomError::new(i, ErrorKind::Fail)))
    } else {
        Ok((rest, symbol))
    }
}

/// List of possible separators people may use
fn separator(i: &str) -> IResult<&str, char> {
    one_of("-_ ")(i)
}
