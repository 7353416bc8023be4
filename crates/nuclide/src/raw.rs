//! Persisted shape of isotope records
//!
//! These mirror the JSON store exactly, with every field optional, so that
//! decoding never fails on a merely incomplete entry. Validation happens in the
//! conversion to [IsotopeRecord], which is where malformed shapes are rejected.

// standard library
use std::collections::BTreeMap;

// internal modules
use crate::error::{Error, Malformed, Result};
use crate::record::{check_branch, Decay, DecayBranch, IsotopeRecord, LABEL_LENGTH};

// decaychain modules
use decaychain_utils::{f, slug, Coerced, Input};

// external crates
use log::warn;
use serde::{de::Error as DeError, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Raw isotope entry as stored, keyed by short id in the store
///
/// Older edit forms wrote every field as text, so numeric fields accept a
/// JSON number, a numeric string, or a blank string/null for "absent".
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct RawIsotope {
    /// Element or isotope name
    pub name: Option<String>,
    /// Chemical symbol
    pub symbol: Option<String>,
    /// Mass number (A)
    #[serde(deserialize_with = "lenient_u32")]
    pub mass_number: Option<u32>,
    /// Proton number (Z)
    #[serde(deserialize_with = "lenient_u32")]
    pub proton_number: Option<u32>,
    /// Neutron number (N)
    #[serde(deserialize_with = "lenient_u32")]
    pub neutron_number: Option<u32>,
    /// Stored `Symbol-MassNumber` key
    pub short_id: Option<String>,
    /// Free-text data reference
    #[serde(deserialize_with = "blank_as_none")]
    pub reference: Option<String>,
    /// Half-life (s), null for stable isotopes
    #[serde(deserialize_with = "lenient_f64")]
    pub half_life: Option<f64>,
    /// Decay-type label to branch
    pub decays: Option<BTreeMap<String, RawBranch>>,
}

/// Raw decay branch as stored
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct RawBranch {
    /// Short id of the product
    pub product: Option<String>,
    /// Branching ratio
    #[serde(deserialize_with = "lenient_f64")]
    pub probability: Option<f64>,
    /// Energy released (MeV)
    #[serde(deserialize_with = "lenient_f64")]
    pub released_energy: Option<f64>,
}

impl TryFrom<RawIsotope> for IsotopeRecord {
    type Error = Error;

    fn try_from(raw: RawIsotope) -> Result<Self> {
        // best guess at an id for error context before anything is validated
        let hint = raw.short_id.clone().unwrap_or_else(|| {
            f!(
                "{}-{}",
                raw.symbol.as_deref().unwrap_or("?"),
                raw.mass_number.map(|a| a.to_string()).unwrap_or_default()
            )
        });
        let malformed = |reason: Malformed| Error::MalformedRecord {
            id: hint.clone(),
            reason,
        };

        let name = raw.name.ok_or_else(|| malformed(Malformed::MissingField("name")))?;
        let symbol = raw
            .symbol
            .ok_or_else(|| malformed(Malformed::MissingField("symbol")))?;
        let mass_number = raw
            .mass_number
            .ok_or_else(|| malformed(Malformed::MissingField("mass_number")))?;

        let decay = match raw.half_life {
            None => {
                if raw.decays.as_ref().is_some_and(|d| !d.is_empty()) {
                    warn!("Ignoring decays listed for stable isotope \"{hint}\"");
                }
                Decay::Stable
            }
            Some(half_life) => {
                let raw_branches = raw.decays.ok_or_else(|| malformed(Malformed::MissingDecays))?;
                let mut branches = BTreeMap::new();
                for (label, branch) in raw_branches {
                    let product = branch
                        .product
                        .ok_or_else(|| malformed(Malformed::MissingField("product")))?;
                    let probability = branch
                        .probability
                        .ok_or_else(|| malformed(Malformed::MissingField("probability")))?;
                    check_branch(&label, &product, probability).map_err(malformed)?;
                    let branch = DecayBranch::new(&product, probability, branch.released_energy)?;
                    if branches.insert(slug(&label, LABEL_LENGTH), branch).is_some() {
                        return Err(malformed(Malformed::DuplicateLabel(label)));
                    }
                }
                Decay::Unstable {
                    half_life,
                    branches,
                }
            }
        };

        let record = IsotopeRecord::build(&name, &symbol, mass_number, decay)?
            .with_numbers(raw.proton_number, raw.neutron_number)
            .with_reference(raw.reference.as_deref());

        if let Some(stored) = raw.short_id {
            if stored != record.short_id() {
                return Err(Error::MalformedRecord {
                    id: record.short_id().to_string(),
                    reason: Malformed::ShortIdMismatch { found: stored },
                });
            }
        }

        Ok(record)
    }
}

impl From<&IsotopeRecord> for RawIsotope {
    fn from(record: &IsotopeRecord) -> Self {
        let decays = record.decays().map(|branches| {
            branches
                .iter()
                .map(|(label, b)| {
                    let raw = RawBranch {
                        product: Some(b.product().to_string()),
                        probability: Some(b.probability()),
                        released_energy: b.released_energy(),
                    };
                    (label.clone(), raw)
                })
                .collect()
        });

        Self {
            name: Some(record.name().to_string()),
            symbol: Some(record.symbol().to_string()),
            mass_number: Some(record.mass_number()),
            proton_number: record.proton_number(),
            neutron_number: record.neutron_number(),
            short_id: Some(record.short_id().to_string()),
            reference: record.reference().map(str::to_string),
            half_life: record.half_life(),
            decays,
        }
    }
}

/// Custom deserialiser for optional floats that may arrive as text
fn lenient_f64<'de, D>(deserializer: D) -> core::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => s
            .coerce::<f64>()
            .optional()
            .map_err(|_| D::Error::custom(f!("expected a number, found \"{s}\""))),
        Some(other) => Err(D::Error::custom(f!("expected a number, found {other}"))),
    }
}

/// Custom deserialiser for optional unsigned integers that may arrive as text
fn lenient_u32<'de, D>(deserializer: D) -> core::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|x| x.fract() == 0.0 && *x >= 0.0).map(|x| x as u64)),
        Some(Value::String(s)) => match s.coerce::<u64>() {
            Coerced::Value(v) => Some(v),
            Coerced::Missing => return Ok(None),
            Coerced::Invalid { text } => {
                return Err(D::Error::custom(f!("expected an integer, found \"{text}\"")))
            }
        },
        Some(other) => return Err(D::Error::custom(f!("expected an integer, found {other}"))),
    };

    value
        .and_then(|v| u32::try_from(v).ok())
        .map(Some)
        .ok_or_else(|| D::Error::custom("expected a non-negative 32-bit integer"))
}

/// Custom deserialiser treating blank strings as absent
fn blank_as_none<'de, D>(deserializer: D) -> core::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> Result<IsotopeRecord> {
        let raw: RawIsotope = serde_json::from_value(value)?;
        IsotopeRecord::try_from(raw)
    }

    #[test]
    fn text_fields_from_old_forms() {
        let record = decode(json!({
            "name": "Radium",
            "symbol": "Ra",
            "mass_number": "225",
            "proton_number": "",
            "neutron_number": "137",
            "short_id": "Ra-225",
            "reference": "",
            "half_life": "1 287 360",
            "decays": {
                "beta_minus": {"product": "Ac-225", "probability": "1.0", "released_energy": ""}
            }
        }))
        .unwrap();

        assert_eq!(record.mass_number(), 225);
        assert_eq!(record.proton_number(), None);
        assert_eq!(record.neutron_number(), Some(137));
        assert_eq!(record.reference(), None);
        assert_eq!(record.half_life(), Some(1_287_360.0));
        let branch = &record.decays().unwrap()["beta_minus"];
        assert_eq!(branch.released_energy(), None);
    }

    #[test]
    fn stable_ignores_decays() {
        let record = decode(json!({
            "name": "Actinium", "symbol": "Ac", "mass_number": 225,
            "half_life": null,
            "decays": {"alpha": {"product": "Fr-221", "probability": 1.0}}
        }))
        .unwrap();
        assert!(record.is_stable());
        assert!(record.decays().is_none());
    }

    #[test]
    fn unstable_without_decays() {
        let err = decode(json!({
            "name": "Radium", "symbol": "Ra", "mass_number": 225,
            "half_life": 1287360.0, "decays": null
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedRecord {
                reason: Malformed::MissingDecays,
                ..
            }
        ));
    }

    #[test]
    fn branch_missing_probability() {
        let err = decode(json!({
            "name": "Radium", "symbol": "Ra", "mass_number": 225,
            "half_life": 1287360.0,
            "decays": {"beta_minus": {"product": "Ac-225"}}
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedRecord {
                reason: Malformed::MissingField("probability"),
                ..
            }
        ));
    }

    #[test]
    fn colliding_labels_rejected() {
        let err = decode(json!({
            "name": "Parent", "symbol": "Xx", "mass_number": 100,
            "half_life": 60.0,
            "decays": {
                "Beta Minus": {"product": "Aa-100", "probability": 0.5},
                "beta_minus": {"product": "Bb-100", "probability": 0.5}
            }
        }))
        .unwrap_err();

        match err {
            Error::MalformedRecord { id, reason } => {
                assert_eq!(id, "Xx-100");
                assert_eq!(reason, Malformed::DuplicateLabel("beta_minus".to_string()));
            }
            e => panic!("unexpected error {e:?}"),
        }
    }

    #[test]
    fn mismatched_short_id() {
        let err = decode(json!({
            "name": "Radium", "symbol": "Ra", "mass_number": 225, "short_id": "Ra-226"
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedRecord {
                reason: Malformed::ShortIdMismatch { .. },
                ..
            }
        ));
    }

    #[test]
    fn garbage_numbers_fail_to_decode() {
        let result: serde_json::Result<RawIsotope> =
            serde_json::from_value(json!({"mass_number": "two hundred"}));
        assert!(result.is_err());
        let result: serde_json::Result<RawIsotope> =
            serde_json::from_value(json!({"mass_number": -4}));
        assert!(result.is_err());
    }

    #[test]
    fn raw_round_trip() {
        let record = decode(json!({
            "name": "Bismuth", "symbol": "Bi", "mass_number": 213,
            "proton_number": 83, "neutron_number": 130,
            "reference": "NNDC",
            "half_life": 2735.4,
            "decays": {
                "alpha": {"product": "Tl-209", "probability": 0.0214, "released_energy": 5.98},
                "beta_minus": {"product": "Po-213", "probability": 0.9786, "released_energy": 1.42}
            }
        }))
        .unwrap();

        let raw = RawIsotope::from(&record);
        assert_eq!(raw.short_id.as_deref(), Some("Bi-213"));
        assert_eq!(IsotopeRecord::try_from(raw).unwrap(), record);
    }
}
