// standard library
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

// internal modules
use crate::error::{Error, Malformed, Result};
use crate::raw::RawIsotope;
use crate::record::IsotopeRecord;

// decaychain modules
use decaychain_utils::f;

// external crates
use itertools::Itertools;
use log::{debug, warn};
use serde_json::Value;

/// Tolerance on the branching ratio sum before a warning is raised
const PROBABILITY_SUM_TOLERANCE: f64 = 1.0e-6;

/// Read-only table of isotope definitions keyed by short id
///
/// A registry is the reference data for a simulation run. It has no mutation
/// operations, so a run holding a reference can never observe a partially
/// edited table. Use an [IsotopeStore](crate::IsotopeStore) for editing and
/// take a snapshot when a run starts.
///
/// ```rust
/// # use decaychain_nuclide::{DecayBranch, IsotopeRecord, Registry};
/// let registry = Registry::from_records([
///     IsotopeRecord::unstable(
///         "Radium", "Ra", 225, 1_287_360.0,
///         [("beta_minus", DecayBranch::new("Ac-225", 1.0, None).unwrap())],
///     ).unwrap(),
///     IsotopeRecord::stable("Actinium", "Ac", 225).unwrap(),
/// ]).unwrap();
///
/// assert_eq!(registry.get("Ra-225").unwrap().half_life(), Some(1_287_360.0));
/// assert!(registry.get("U-238").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    records: BTreeMap<String, IsotopeRecord>,
}

impl Registry {
    /// Build from already validated records, rejecting duplicate short ids
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = IsotopeRecord>,
    {
        let mut map = BTreeMap::new();
        for record in records {
            let id = record.short_id().to_string();
            if map.insert(id.clone(), record).is_some() {
                return Err(Error::MalformedRecord {
                    id,
                    reason: Malformed::Duplicate,
                });
            }
        }

        let registry = Self { records: map };
        registry.report_conventions();
        Ok(registry)
    }

    /// Decode the persisted store shape from a JSON string
    ///
    /// The document is a mapping of short id to record. Every entry must be
    /// valid and the first malformed record fails the whole load, since partial
    /// reference data would only make later lookups fail in confusing ways.
    ///
    /// ```rust
    /// # use decaychain_nuclide::Registry;
    /// let json = r#"{
    ///     "Ra-225": {
    ///         "name": "Radium", "symbol": "Ra", "mass_number": 225,
    ///         "half_life": 1287360,
    ///         "decays": {"beta_minus": {"product": "Ac-225", "probability": 1.0}}
    ///     },
    ///     "Ac-225": {"name": "Actinium", "symbol": "Ac", "mass_number": 225, "half_life": null}
    /// }"#;
    ///
    /// let registry = Registry::from_json_str(json).unwrap();
    /// assert_eq!(registry.len(), 2);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: BTreeMap<String, Value> = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Decode the persisted store shape from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document: BTreeMap<String, Value> = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    /// Validate every entry of a decoded document
    fn from_document(document: BTreeMap<String, Value>) -> Result<Self> {
        let mut records = BTreeMap::new();

        for (key, value) in document {
            let raw: RawIsotope =
                serde_json::from_value(value).map_err(|e| Error::MalformedRecord {
                    id: key.clone(),
                    reason: Malformed::Shape(e.to_string()),
                })?;

            let record = IsotopeRecord::try_from(raw)?;
            if record.short_id() != key {
                return Err(Error::MalformedRecord {
                    id: record.short_id().to_string(),
                    reason: Malformed::KeyMismatch { key },
                });
            }

            debug!("Loaded {}", record.short_id());
            records.insert(key, record);
        }

        let registry = Self { records };
        registry.report_conventions();
        Ok(registry)
    }

    /// Warn about soft modelling conventions that are not enforced
    fn report_conventions(&self) {
        for record in self.records.values() {
            if !record.is_stable() {
                let sum = record.probability_sum();
                if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
                    warn!(
                        "Branching ratios for {} sum to {sum}, expected 1.0",
                        record.short_id()
                    );
                }
            }

            if let (Some(z), Some(n)) = (record.proton_number(), record.neutron_number()) {
                if z.checked_add(n) != Some(record.mass_number()) {
                    warn!(
                        "{}: Z + N does not match the mass number {}",
                        record.short_id(),
                        record.mass_number()
                    );
                }
            }
        }

        let dangling = self.dangling_products();
        if !dangling.is_empty() {
            warn!(
                "Decay products missing from the registry: {}",
                dangling
                    .iter()
                    .map(|(parent, product)| f!("{parent} -> {product}"))
                    .join(", ")
            );
        }
    }

    /// Look up a record by short id
    pub fn get(&self, short_id: &str) -> Result<&IsotopeRecord> {
        self.records
            .get(short_id)
            .ok_or_else(|| Error::UnknownIsotope {
                id: short_id.to_string(),
            })
    }

    /// Check whether a short id is known
    pub fn contains(&self, short_id: &str) -> bool {
        self.records.contains_key(short_id)
    }

    /// Every known short id
    pub fn all_ids(&self) -> BTreeSet<String> {
        self.records.keys().cloned().collect()
    }

    /// Number of isotopes defined
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no isotopes are defined
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in short id order
    pub fn iter(&self) -> impl Iterator<Item = &IsotopeRecord> {
        self.records.values()
    }

    /// Short ids of the direct decay products of an isotope
    pub fn products_of(&self, short_id: &str) -> Result<Vec<&str>> {
        Ok(self
            .get(short_id)?
            .branches()
            .map(|b| b.product())
            .unique()
            .collect())
    }

    /// Every `(parent, product)` pair where the product is not defined
    ///
    /// Loading still succeeds with dangling products, but any simulation that
    /// reaches one will fail.
    pub fn dangling_products(&self) -> Vec<(&str, &str)> {
        self.records
            .values()
            .flat_map(|r| r.branches().map(move |b| (r.short_id(), b.product())))
            .filter(|(_, product)| !self.contains(product))
            .collect()
    }

    /// The persisted shape of every record, keyed by short id
    pub fn to_raw(&self) -> BTreeMap<String, RawIsotope> {
        self.records
            .iter()
            .map(|(id, record)| (id.clone(), RawIsotope::from(record)))
            .collect()
    }

    /// Pretty JSON string of the persisted shape
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_raw())?)
    }

    pub(crate) fn into_records(self) -> BTreeMap<String, IsotopeRecord> {
        self.records
    }

    pub(crate) fn from_map(records: BTreeMap<String, IsotopeRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a IsotopeRecord;
    type IntoIter = std::collections::btree_map::Values<'a, String, IsotopeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.values()
    }
}

/// Read a registry from a JSON store file
///
/// The `path` takes anything that can be turned into a `Path` reference, such
/// as a [&str], [String], [Path], etc...
///
/// ```rust, no_run
/// # use decaychain_nuclide::read_registry;
/// let registry = read_registry("database/isotope_database.json").unwrap();
/// println!("{} isotopes", registry.len());
/// ```
pub fn read_registry<P: AsRef<Path>>(path: P) -> Result<Registry> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    Registry::from_reader(reader)
}

/// Write a registry to a JSON store file
///
/// Output is pretty printed with non-ASCII text kept as-is, in the same shape
/// that [read_registry()] accepts.
pub fn write_registry<P: AsRef<Path>>(registry: &Registry, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(&mut writer, &registry.to_raw())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
