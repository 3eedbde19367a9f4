//! # Reference Store & Cache
//!
//! [`ReferenceStore`] is the immutable, in-memory catalog built from a
//! validated [`SeedFile`]. This core never writes to it; the only way
//! reference data changes is an explicit administrative reload through
//! [`ReferenceCache`].
//!
//! Lookups come in two flavors: `country()`/`nature()`/`mechanism()`
//! return `Option` for callers probing, and `require_*` variants return
//! [`RopaError::NotFound`] for callers validating input ids.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use ropa_core::{CountryId, DataNatureId, MechanismId, RecordKind, RopaError, RopaResult};

use crate::country::Country;
use crate::error::ReferenceResult;
use crate::mechanism::TransferMechanism;
use crate::nature::DataNature;
use crate::seed::SeedFile;

/// The immutable reference catalog: countries, data natures, and
/// transfer mechanisms, with typed-id and name/ISO indexes.
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    countries: HashMap<CountryId, Country>,
    countries_by_iso2: HashMap<String, CountryId>,
    natures: HashMap<DataNatureId, DataNature>,
    natures_by_name: HashMap<String, DataNatureId>,
    mechanisms: HashMap<MechanismId, TransferMechanism>,
    mechanisms_by_name: HashMap<String, MechanismId>,
}

impl ReferenceStore {
    /// Build a store from a seed document, assigning fresh identifiers.
    ///
    /// The seed is re-validated so stores constructed from hand-built
    /// seeds get the same guarantees as file loads.
    pub fn from_seed(seed: SeedFile) -> ReferenceResult<Self> {
        seed.validate()?;

        let mut store = Self {
            countries: HashMap::new(),
            countries_by_iso2: HashMap::new(),
            natures: HashMap::new(),
            natures_by_name: HashMap::new(),
            mechanisms: HashMap::new(),
            mechanisms_by_name: HashMap::new(),
        };

        for entry in seed.countries {
            let id = CountryId::new();
            store
                .countries_by_iso2
                .insert(entry.iso_code2.clone(), id.clone());
            store.countries.insert(
                id.clone(),
                Country {
                    id,
                    name: entry.name,
                    iso_code2: entry.iso_code2,
                    iso_code3: entry.iso_code3,
                    jurisdiction_tags: entry.jurisdiction_tags,
                },
            );
        }

        for entry in seed.data_natures {
            let id = DataNatureId::new();
            store.natures_by_name.insert(entry.name.clone(), id.clone());
            store.natures.insert(
                id.clone(),
                DataNature {
                    id,
                    name: entry.name,
                    classification: entry.classification,
                    gdpr_article_ref: entry.gdpr_article_ref,
                },
            );
        }

        for entry in seed.transfer_mechanisms {
            let id = MechanismId::new();
            store
                .mechanisms_by_name
                .insert(entry.name.clone(), id.clone());
            store.mechanisms.insert(
                id.clone(),
                TransferMechanism {
                    id,
                    name: entry.name,
                    category: entry.category,
                    requires_documentation: entry.requires_documentation,
                    description: entry.description,
                },
            );
        }

        tracing::debug!(
            countries = store.countries.len(),
            natures = store.natures.len(),
            mechanisms = store.mechanisms.len(),
            "reference store built"
        );
        Ok(store)
    }

    /// The built-in catalog.
    pub fn builtin() -> Self {
        Self::from_seed(SeedFile::builtin()).expect("builtin seed is validated by tests")
    }

    /// Look up a country by id.
    pub fn country(&self, id: &CountryId) -> Option<&Country> {
        self.countries.get(id)
    }

    /// Look up a country by id, failing with `NotFound`.
    pub fn require_country(&self, id: &CountryId) -> RopaResult<&Country> {
        self.country(id)
            .ok_or_else(|| RopaError::not_found(RecordKind::Country, id))
    }

    /// Look up a country by ISO-2 code.
    pub fn country_by_iso2(&self, iso2: &str) -> Option<&Country> {
        self.countries_by_iso2
            .get(iso2)
            .and_then(|id| self.countries.get(id))
    }

    /// Look up a data nature by id.
    pub fn nature(&self, id: &DataNatureId) -> Option<&DataNature> {
        self.natures.get(id)
    }

    /// Look up a data nature by id, failing with `NotFound`.
    pub fn require_nature(&self, id: &DataNatureId) -> RopaResult<&DataNature> {
        self.nature(id)
            .ok_or_else(|| RopaError::not_found(RecordKind::DataNature, id))
    }

    /// Look up a data nature by name.
    pub fn nature_by_name(&self, name: &str) -> Option<&DataNature> {
        self.natures_by_name
            .get(name)
            .and_then(|id| self.natures.get(id))
    }

    /// Look up a transfer mechanism by id.
    pub fn mechanism(&self, id: &MechanismId) -> Option<&TransferMechanism> {
        self.mechanisms.get(id)
    }

    /// Look up a transfer mechanism by id, failing with `NotFound`.
    pub fn require_mechanism(&self, id: &MechanismId) -> RopaResult<&TransferMechanism> {
        self.mechanism(id)
            .ok_or_else(|| RopaError::not_found(RecordKind::TransferMechanism, id))
    }

    /// Look up a transfer mechanism by name.
    pub fn mechanism_by_name(&self, name: &str) -> Option<&TransferMechanism> {
        self.mechanisms_by_name
            .get(name)
            .and_then(|id| self.mechanisms.get(id))
    }

    /// Number of countries in the catalog.
    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    /// Number of data natures in the catalog.
    pub fn nature_count(&self) -> usize {
        self.natures.len()
    }

    /// Number of transfer mechanisms in the catalog.
    pub fn mechanism_count(&self) -> usize {
        self.mechanisms.len()
    }
}

/// Process-wide cached reference catalog.
///
/// Readers take a cheap [`Arc`] snapshot and keep a consistent view for
/// the duration of a call even if an administrator reloads concurrently.
/// Reload is the only write path, scoped to explicit admin action.
#[derive(Debug)]
pub struct ReferenceCache {
    inner: RwLock<Arc<ReferenceStore>>,
}

impl ReferenceCache {
    /// Create a cache over an initial catalog.
    pub fn new(store: ReferenceStore) -> Self {
        Self {
            inner: RwLock::new(Arc::new(store)),
        }
    }

    /// Take a consistent snapshot of the current catalog.
    pub fn snapshot(&self) -> Arc<ReferenceStore> {
        Arc::clone(&self.inner.read())
    }

    /// Replace the catalog. Admin action only; in-flight readers keep
    /// their previous snapshot.
    pub fn reload(&self, store: ReferenceStore) {
        tracing::info!(
            countries = store.country_count(),
            natures = store.nature_count(),
            mechanisms = store.mechanism_count(),
            "reference catalog reloaded"
        );
        *self.inner.write() = Arc::new(store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ropa_core::JurisdictionTag;

    #[test]
    fn builtin_store_has_indexes() {
        let store = ReferenceStore::builtin();
        let de = store.country_by_iso2("DE").unwrap();
        assert_eq!(de.name, "Germany");
        assert!(de.has_tag(JurisdictionTag::Eu));

        let health = store.nature_by_name("Health Data").unwrap();
        assert!(health.is_special());

        let scc = store
            .mechanism_by_name("Standard Contractual Clauses")
            .unwrap();
        assert!(scc.provides_safeguard());
    }

    #[test]
    fn id_lookup_roundtrip() {
        let store = ReferenceStore::builtin();
        let us = store.country_by_iso2("US").unwrap().clone();
        assert_eq!(store.country(&us.id).unwrap().iso_code2, "US");
        assert!(store.require_country(&us.id).is_ok());
    }

    #[test]
    fn require_country_not_found() {
        let store = ReferenceStore::builtin();
        let err = store.require_country(&CountryId::new()).unwrap_err();
        assert!(matches!(err, RopaError::NotFound { .. }));
    }

    #[test]
    fn require_nature_not_found() {
        let store = ReferenceStore::builtin();
        assert!(store.require_nature(&DataNatureId::new()).is_err());
    }

    #[test]
    fn require_mechanism_not_found() {
        let store = ReferenceStore::builtin();
        assert!(store.require_mechanism(&MechanismId::new()).is_err());
    }

    #[test]
    fn cache_snapshot_survives_reload() {
        let cache = ReferenceCache::new(ReferenceStore::builtin());
        let before = cache.snapshot();
        let country_count = before.country_count();

        cache.reload(
            ReferenceStore::from_seed(SeedFile {
                countries: vec![],
                data_natures: vec![],
                transfer_mechanisms: vec![],
            })
            .unwrap(),
        );

        // The held snapshot keeps its view; a fresh snapshot sees the reload.
        assert_eq!(before.country_count(), country_count);
        assert_eq!(cache.snapshot().country_count(), 0);
    }
}
