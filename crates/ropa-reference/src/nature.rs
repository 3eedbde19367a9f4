//! Data-nature reference atoms.
//!
//! A data nature is one Article-9-relevant (or not) data concept, tagged
//! [`NatureClassification::Special`] or
//! [`NatureClassification::NonSpecial`]. Data categories derive their
//! special-category flag from the natures linked to them.

use serde::{Deserialize, Serialize};

use ropa_core::{DataNatureId, NatureClassification};

/// A global classification atom, e.g. "Health Data" or "Contact Information".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataNature {
    /// Unique nature identifier, assigned at seed time.
    pub id: DataNatureId,
    /// Human-readable name, unique within the catalog.
    pub name: String,
    /// Article 9/10 classification.
    pub classification: NatureClassification,
    /// The GDPR article this nature derives from, e.g. "Art. 9(1)".
    pub gdpr_article_ref: String,
}

impl DataNature {
    /// Whether this nature marks special category data.
    pub fn is_special(&self) -> bool {
        self.classification.is_special()
    }
}
