// standard library
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// internal modules
use crate::error::Result;
use crate::record::IsotopeRecord;
use crate::registry::{read_registry, write_registry, Registry};

// external crates
use log::{debug, info};

/// Editable isotope table bound to a JSON file
///
/// This is the persistence side of the toolkit. Records are inserted, replaced,
/// and removed here, and written back with [IsotopeStore::save()]. Simulations
/// never read the store directly; they run against a [Registry] taken with
/// [IsotopeStore::snapshot()], so edits made afterwards cannot leak into a run.
///
/// ```rust, no_run
/// # use decaychain_nuclide::{IsotopeRecord, IsotopeStore};
/// let mut store = IsotopeStore::open("database/isotope_database.json").unwrap();
/// store.insert(IsotopeRecord::stable("Lead", "Pb", 209).unwrap());
/// store.save().unwrap();
///
/// let registry = store.snapshot();
/// assert!(registry.contains("Pb-209"));
/// ```
#[derive(Debug)]
pub struct IsotopeStore {
    path: PathBuf,
    records: BTreeMap<String, IsotopeRecord>,
}

impl IsotopeStore {
    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let records = if path.exists() {
            read_registry(&path)?.into_records()
        } else {
            info!("No store found at {}, starting empty", path.display());
            BTreeMap::new()
        };

        Ok(Self { path, records })
    }

    /// Discard in-memory edits and read the file again
    pub fn reload(&mut self) -> Result<()> {
        self.records = read_registry(&self.path)?.into_records();
        Ok(())
    }

    /// Write every record back to the file
    pub fn save(&self) -> Result<()> {
        write_registry(&Registry::from_map(self.records.clone()), &self.path)?;
        info!("Store {} successfully updated", self.path.display());
        Ok(())
    }

    /// Insert or overwrite a record, returning any record it replaced
    pub fn insert(&mut self, record: IsotopeRecord) -> Option<IsotopeRecord> {
        debug!("Storing {}", record.short_id());
        self.records.insert(record.short_id().to_string(), record)
    }

    /// Merge every record of a registry, overwriting matching short ids
    pub fn update(&mut self, registry: Registry) {
        self.records.extend(registry.into_records());
    }

    /// Remove a record by short id
    pub fn remove(&mut self, short_id: &str) -> Option<IsotopeRecord> {
        self.records.remove(short_id)
    }

    /// Look up a record by short id
    pub fn get(&self, short_id: &str) -> Option<&IsotopeRecord> {
        self.records.get(short_id)
    }

    /// Every stored short id, in order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// File backing this store
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Immutable copy of the current records for a simulation run
    pub fn snapshot(&self) -> Registry {
        Registry::from_map(self.records.clone())
    }
}
