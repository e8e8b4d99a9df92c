//! Slot catalog: every distinct value observed per profile slot.
//!
//! Built once from the seed corpus and persisted as pretty JSON
//! (`slot key -> [values]`); the profile sampler draws personas from it.

use crate::models::profile::{
    canonical_slot_key, clean_age_range, split_slot_value, AGE_RANGE, SLOT_KEYS,
};
use anyhow::{Context, Result};
use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotCatalog {
    slots: IndexMap<String, Vec<String>>,
}

/// Only the profile is needed to build a catalog; other seed fields are ignored.
#[derive(Deserialize)]
struct ProfileLine {
    user_profile: IndexMap<String, String>,
}

type PartialCatalog = IndexMap<String, IndexSet<String>>;

impl SlotCatalog {
    pub fn from_slots<I, K, V>(slots: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            slots: slots
                .into_iter()
                .map(|(key, values)| (key.into(), values.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }

    /// Collects slot values from seed dialogue files.
    ///
    /// Files are parsed in parallel but merged in the given order, so the value
    /// order of the catalog is the first-seen order across the whole corpus.
    pub fn extract<P: AsRef<Path> + Sync>(seed_files: &[P]) -> Result<Self> {
        let partials = seed_files
            .par_iter()
            .map(|path| collect_file(path.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut merged: PartialCatalog = SLOT_KEYS
            .iter()
            .map(|key| (key.to_string(), IndexSet::new()))
            .collect();
        for partial in partials {
            for (key, values) in partial {
                merged.entry(key).or_default().extend(values);
            }
        }

        let catalog = Self {
            slots: merged
                .into_iter()
                .map(|(key, values)| (key, values.into_iter().collect()))
                .collect(),
        };
        for (key, values) in catalog.iter() {
            info!(slot = key, values = values.len(), "collected slot values");
        }
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Unable to read slot catalog {:?}", path))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse slot catalog {:?}", path))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data).with_context(|| format!("Unable to write slot catalog {:?}", path))?;
        Ok(())
    }

    pub fn values(&self, key: &str) -> Option<&[String]> {
        self.slots.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.slots
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// A copy of this catalog with one slot removed.
    pub fn without_slot(&self, key: &str) -> Self {
        let mut slots = self.slots.clone();
        slots.shift_remove(key);
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

fn collect_file(path: &Path) -> Result<PartialCatalog> {
    let data =
        fs::read_to_string(path).with_context(|| format!("Unable to read seed file {:?}", path))?;
    let mut partial = PartialCatalog::new();
    for (idx, line) in data.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parsed: ProfileLine = match serde_json::from_str(line) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(
                    file = %path.display(),
                    line = idx + 1,
                    %err,
                    "skipping unparsable profile line"
                );
                continue;
            }
        };
        for (slot, value) in parsed.user_profile {
            let canonical = canonical_slot_key(&slot);
            if !SLOT_KEYS.contains(&canonical) {
                warn!(slot = %slot, "slot outside the catalog vocabulary");
                continue;
            }
            let fragments = split_slot_value(&value).into_iter().map(|fragment| {
                if slot == AGE_RANGE {
                    clean_age_range(&fragment)
                } else {
                    fragment
                }
            });
            partial
                .entry(canonical.to_string())
                .or_default()
                .extend(fragments);
        }
    }
    Ok(partial)
}

/// Default catalog location under a cache directory.
pub fn default_catalog_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join("db_slot").join("slot_profiles.json")
}
