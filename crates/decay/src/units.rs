// standard library
use std::fmt;
use std::str::FromStr;

// internal modules
use crate::error::Error;

// decaychain modules
use decaychain_utils::f;

// external crates
use serde::{Deserialize, Serialize};

/// Display units for the time axis
///
/// The simulator itself always works in seconds. Units only matter when a
/// [TimeSeries](crate::TimeSeries) is turned into plot data, so conversion is
/// a single division by [TimeUnit::seconds()].
///
/// ```rust
/// # use decaychain_decay::TimeUnit;
/// let unit: TimeUnit = "d".parse().unwrap();
/// assert_eq!(unit.from_seconds(172_800.0), 2.0);
/// assert_eq!(unit.axis_label(), "Time [d]");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Seconds (s)
    #[default]
    #[serde(rename = "s")]
    Second,
    /// Minutes (min)
    #[serde(rename = "min")]
    Minute,
    /// Hours (h)
    #[serde(rename = "h")]
    Hour,
    /// Days (d)
    #[serde(rename = "d")]
    Day,
    /// Tropical years (a), 365.242 days
    #[serde(rename = "a")]
    Year,
}

impl TimeUnit {
    /// Every unit, shortest first
    pub const ALL: [TimeUnit; 5] = [
        TimeUnit::Second,
        TimeUnit::Minute,
        TimeUnit::Hour,
        TimeUnit::Day,
        TimeUnit::Year,
    ];

    /// Length of one unit in seconds
    pub fn seconds(&self) -> f64 {
        match self {
            TimeUnit::Second => 1.0,
            TimeUnit::Minute => 60.0,
            TimeUnit::Hour => 3_600.0,
            TimeUnit::Day => 86_400.0,
            TimeUnit::Year => 31_556_926.0,
        }
    }

    /// Convert a time in seconds to this unit
    pub fn from_seconds(&self, seconds: f64) -> f64 {
        seconds / self.seconds()
    }

    /// Convert a time in this unit to seconds
    pub fn to_seconds(&self, value: f64) -> f64 {
        value * self.seconds()
    }

    /// Unit symbol, e.g. `min`
    pub fn symbol(&self) -> &'static str {
        match self {
            TimeUnit::Second => "s",
            TimeUnit::Minute => "min",
            TimeUnit::Hour => "h",
            TimeUnit::Day => "d",
            TimeUnit::Year => "a",
        }
    }

    /// Label for a plot axis, e.g. `Time [d]`
    pub fn axis_label(&self) -> String {
        f!("Time [{}]", self.symbol())
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s" | "sec" | "second" | "seconds" => Ok(TimeUnit::Second),
            "min" | "minute" | "minutes" => Ok(TimeUnit::Minute),
            "h" | "hr" | "hour" | "hours" => Ok(TimeUnit::Hour),
            "d" | "day" | "days" => Ok(TimeUnit::Day),
            "a" | "y" | "yr" | "year" | "years" => Ok(TimeUnit::Year),
            _ => Err(Error::UnknownTimeUnit(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("s", TimeUnit::Second, 1.0)]
    #[case("min", TimeUnit::Minute, 60.0)]
    #[case("h", TimeUnit::Hour, 3_600.0)]
    #[case("d", TimeUnit::Day, 86_400.0)]
    #[case("a", TimeUnit::Year, 31_556_926.0)]
    fn symbols(#[case] text: &str, #[case] unit: TimeUnit, #[case] seconds: f64) {
        assert_eq!(text.parse::<TimeUnit>().unwrap(), unit);
        assert_eq!(unit.seconds(), seconds);
        assert_eq!(unit.to_string(), text);
    }

    #[test]
    fn every_unit_round_trips() {
        for unit in TimeUnit::ALL {
            assert_eq!(unit.symbol().parse::<TimeUnit>().unwrap(), unit);
            assert_eq!(unit.from_seconds(unit.to_seconds(3.0)), 3.0);

            let json = serde_json::to_string(&unit).unwrap();
            assert_eq!(json, f!("\"{unit}\""));
        }

        // shortest first
        assert!(TimeUnit::ALL.windows(2).all(|w| w[0].seconds() < w[1].seconds()));
    }

    #[test]
    fn conversions() {
        assert_eq!(TimeUnit::Minute.from_seconds(90.0), 1.5);
        assert_eq!(TimeUnit::Hour.to_seconds(2.0), 7_200.0);
        assert_eq!(TimeUnit::Year.from_seconds(31_556_926.0), 1.0);
        assert_eq!(TimeUnit::Second.axis_label(), "Time [s]");
    }

    #[test]
    fn unknown_symbol() {
        assert!(matches!(
            "fortnight".parse::<TimeUnit>(),
            Err(Error::UnknownTimeUnit(s)) if s == "fortnight"
        ));
    }

    #[test]
    fn serde_uses_symbols() {
        assert_eq!(serde_json::to_string(&TimeUnit::Day).unwrap(), "\"d\"");
        let unit: TimeUnit = serde_json::from_str("\"min\"").unwrap();
        assert_eq!(unit, TimeUnit::Minute);
    }
}
