//! # Reference Seed Files
//!
//! Reference data arrives as a seed document (YAML or JSON) maintained by
//! platform administrators, not tenants. Seeds carry no ids; identifiers
//! are assigned when the catalog is built, so a seed file is portable
//! across environments.
//!
//! Validation happens at parse time: duplicate ISO codes, duplicate
//! names, malformed codes, and contradictory mechanism entries are
//! rejected before any catalog is constructed.
//!
//! A compact [`SeedFile::builtin`] catalog ships with the crate so tests
//! and demo environments run without external files.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use ropa_core::{JurisdictionTag, MechanismCategory, NatureClassification};

use crate::error::{ReferenceError, ReferenceResult};

/// A country entry in a seed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountrySeed {
    /// Full country name.
    pub name: String,
    /// ISO 3166-1 alpha-2 code.
    pub iso_code2: String,
    /// ISO 3166-1 alpha-3 code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_code3: Option<String>,
    /// Legal-framework memberships.
    #[serde(default)]
    pub jurisdiction_tags: BTreeSet<JurisdictionTag>,
}

/// A data-nature entry in a seed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NatureSeed {
    /// Nature name, unique within the seed.
    pub name: String,
    /// Article 9/10 classification.
    pub classification: NatureClassification,
    /// The GDPR article this nature derives from.
    pub gdpr_article_ref: String,
}

/// A transfer-mechanism entry in a seed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MechanismSeed {
    /// Mechanism name, unique within the seed.
    pub name: String,
    /// Legal category.
    pub category: MechanismCategory,
    /// Whether supporting documentation must be retained.
    #[serde(default)]
    pub requires_documentation: bool,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A complete reference seed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedFile {
    /// Country catalog.
    #[serde(default)]
    pub countries: Vec<CountrySeed>,
    /// Data-nature catalog.
    #[serde(default)]
    pub data_natures: Vec<NatureSeed>,
    /// Transfer-mechanism catalog.
    #[serde(default)]
    pub transfer_mechanisms: Vec<MechanismSeed>,
}

impl SeedFile {
    /// Load and validate a YAML seed file.
    pub fn load_yaml(path: &Path) -> ReferenceResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ReferenceError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ReferenceError::Io(e)
            }
        })?;
        let seed: SeedFile =
            serde_yaml::from_str(&content).map_err(|e| ReferenceError::YamlParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        seed.validate()?;
        Ok(seed)
    }

    /// Parse and validate a YAML seed from a string.
    pub fn from_yaml_str(content: &str) -> ReferenceResult<Self> {
        let seed: SeedFile = serde_yaml::from_str(content)?;
        seed.validate()?;
        Ok(seed)
    }

    /// Parse and validate a JSON seed from a string.
    pub fn from_json_str(content: &str) -> ReferenceResult<Self> {
        let seed: SeedFile = serde_json::from_str(content)?;
        seed.validate()?;
        Ok(seed)
    }

    /// Structural validation applied by every load path.
    pub fn validate(&self) -> ReferenceResult<()> {
        let mut iso2_seen = BTreeSet::new();
        for country in &self.countries {
            if country.name.trim().is_empty() {
                return Err(ReferenceError::EmptyName { entry: "country" });
            }
            validate_iso_code(&country.iso_code2, 2)?;
            if let Some(iso3) = &country.iso_code3 {
                validate_iso_code(iso3, 3)?;
            }
            if !iso2_seen.insert(country.iso_code2.clone()) {
                return Err(ReferenceError::DuplicateIsoCode {
                    iso2: country.iso_code2.clone(),
                });
            }
        }

        let mut nature_names = BTreeSet::new();
        for nature in &self.data_natures {
            if nature.name.trim().is_empty() {
                return Err(ReferenceError::EmptyName {
                    entry: "data nature",
                });
            }
            if !nature_names.insert(nature.name.clone()) {
                return Err(ReferenceError::DuplicateNature {
                    name: nature.name.clone(),
                });
            }
        }

        let mut mechanism_names = BTreeSet::new();
        for mechanism in &self.transfer_mechanisms {
            if mechanism.name.trim().is_empty() {
                return Err(ReferenceError::EmptyName { entry: "mechanism" });
            }
            if !mechanism_names.insert(mechanism.name.clone()) {
                return Err(ReferenceError::DuplicateMechanism {
                    name: mechanism.name.clone(),
                });
            }
            if mechanism.category == MechanismCategory::None && mechanism.requires_documentation {
                return Err(ReferenceError::ContradictoryMechanism {
                    name: mechanism.name.clone(),
                });
            }
        }

        Ok(())
    }

    /// The built-in catalog: a compact, curated set of countries,
    /// Article 9 natures, and standard mechanisms.
    pub fn builtin() -> Self {
        fn country(name: &str, iso2: &str, iso3: &str, tags: &[JurisdictionTag]) -> CountrySeed {
            CountrySeed {
                name: name.to_string(),
                iso_code2: iso2.to_string(),
                iso_code3: Some(iso3.to_string()),
                jurisdiction_tags: tags.iter().copied().collect(),
            }
        }
        fn nature(name: &str, classification: NatureClassification, article: &str) -> NatureSeed {
            NatureSeed {
                name: name.to_string(),
                classification,
                gdpr_article_ref: article.to_string(),
            }
        }
        fn mechanism(
            name: &str,
            category: MechanismCategory,
            requires_documentation: bool,
        ) -> MechanismSeed {
            MechanismSeed {
                name: name.to_string(),
                category,
                requires_documentation,
                description: None,
            }
        }

        use JurisdictionTag::{Adequate, Eea, Efta, Eu, ThirdCountry};
        use NatureClassification::{NonSpecial, Special};

        Self {
            countries: vec![
                country("Germany", "DE", "DEU", &[Eu, Eea]),
                country("France", "FR", "FRA", &[Eu, Eea]),
                country("Ireland", "IE", "IRL", &[Eu, Eea]),
                country("Netherlands", "NL", "NLD", &[Eu, Eea]),
                country("Poland", "PL", "POL", &[Eu, Eea]),
                country("Norway", "NO", "NOR", &[Eea, Efta]),
                country("Iceland", "IS", "ISL", &[Eea, Efta]),
                country("Switzerland", "CH", "CHE", &[Efta, ThirdCountry, Adequate]),
                country("United Kingdom", "GB", "GBR", &[ThirdCountry, Adequate]),
                country("Japan", "JP", "JPN", &[ThirdCountry, Adequate]),
                country("Canada", "CA", "CAN", &[ThirdCountry, Adequate]),
                country("United States", "US", "USA", &[ThirdCountry]),
                country("India", "IN", "IND", &[ThirdCountry]),
                country("China", "CN", "CHN", &[ThirdCountry]),
                country("Brazil", "BR", "BRA", &[ThirdCountry]),
            ],
            data_natures: vec![
                nature("Racial or Ethnic Origin", Special, "Art. 9(1)"),
                nature("Political Opinions", Special, "Art. 9(1)"),
                nature("Religious or Philosophical Beliefs", Special, "Art. 9(1)"),
                nature("Trade Union Membership", Special, "Art. 9(1)"),
                nature("Genetic Data", Special, "Art. 9(1)"),
                nature("Biometric Data", Special, "Art. 9(1)"),
                nature("Health Data", Special, "Art. 9(1)"),
                nature("Sex Life or Sexual Orientation", Special, "Art. 9(1)"),
                nature("Criminal Convictions", Special, "Art. 10"),
                nature("Name", NonSpecial, "Art. 4(1)"),
                nature("Contact Information", NonSpecial, "Art. 4(1)"),
                nature("Financial Information", NonSpecial, "Art. 4(1)"),
                nature("Location Data", NonSpecial, "Art. 4(1)"),
                nature("Online Identifiers", NonSpecial, "Art. 4(1)"),
            ],
            transfer_mechanisms: vec![
                mechanism(
                    "Standard Contractual Clauses",
                    MechanismCategory::Safeguard,
                    true,
                ),
                mechanism(
                    "Binding Corporate Rules",
                    MechanismCategory::Safeguard,
                    true,
                ),
                mechanism("Adequacy Decision", MechanismCategory::Adequacy, false),
                mechanism(
                    "Explicit Consent Derogation",
                    MechanismCategory::Derogation,
                    true,
                ),
                mechanism(
                    "Contract Performance Derogation",
                    MechanismCategory::Derogation,
                    false,
                ),
                mechanism("No Mechanism Identified", MechanismCategory::None, false),
            ],
        }
    }
}

fn validate_iso_code(code: &str, expected: usize) -> ReferenceResult<()> {
    if code.len() != expected || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ReferenceError::InvalidIsoCode {
            code: code.to_string(),
            expected,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_seed_is_valid() {
        let seed = SeedFile::builtin();
        assert!(seed.validate().is_ok());
        assert!(seed.countries.len() >= 10);
        assert!(seed.data_natures.iter().any(|n| n.name == "Health Data"));
        assert!(seed
            .transfer_mechanisms
            .iter()
            .any(|m| m.name == "Standard Contractual Clauses"));
    }

    #[test]
    fn yaml_roundtrip() {
        let yaml = r#"
countries:
  - name: Germany
    iso_code2: DE
    jurisdiction_tags: [eu, eea]
  - name: United States
    iso_code2: US
    jurisdiction_tags: [third_country]
data_natures:
  - name: Health Data
    classification: special
    gdpr_article_ref: "Art. 9(1)"
transfer_mechanisms:
  - name: Standard Contractual Clauses
    category: safeguard
    requires_documentation: true
"#;
        let seed = SeedFile::from_yaml_str(yaml).unwrap();
        assert_eq!(seed.countries.len(), 2);
        assert_eq!(seed.data_natures.len(), 1);
        assert_eq!(
            seed.data_natures[0].classification,
            NatureClassification::Special
        );
        assert!(seed.transfer_mechanisms[0].requires_documentation);
    }

    #[test]
    fn json_seed_parses() {
        let json = r#"{
            "countries": [
                {"name": "France", "iso_code2": "FR", "jurisdiction_tags": ["eu", "eea"]}
            ]
        }"#;
        let seed = SeedFile::from_json_str(json).unwrap();
        assert_eq!(seed.countries[0].iso_code2, "FR");
    }

    #[test]
    fn duplicate_iso_code_rejected() {
        let yaml = r#"
countries:
  - name: Germany
    iso_code2: DE
  - name: Deutschland
    iso_code2: DE
"#;
        let err = SeedFile::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ReferenceError::DuplicateIsoCode { .. }));
    }

    #[test]
    fn lowercase_iso_code_rejected() {
        let yaml = r#"
countries:
  - name: Germany
    iso_code2: de
"#;
        let err = SeedFile::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ReferenceError::InvalidIsoCode { .. }));
    }

    #[test]
    fn empty_nature_name_rejected() {
        let yaml = r#"
data_natures:
  - name: "  "
    classification: special
    gdpr_article_ref: "Art. 9(1)"
"#;
        let err = SeedFile::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ReferenceError::EmptyName { .. }));
    }

    #[test]
    fn duplicate_nature_rejected() {
        let yaml = r#"
data_natures:
  - name: Health Data
    classification: special
    gdpr_article_ref: "Art. 9(1)"
  - name: Health Data
    classification: special
    gdpr_article_ref: "Art. 9(1)"
"#;
        let err = SeedFile::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ReferenceError::DuplicateNature { .. }));
    }

    #[test]
    fn none_mechanism_requiring_documentation_rejected() {
        let yaml = r#"
transfer_mechanisms:
  - name: Nothing
    category: none
    requires_documentation: true
"#;
        let err = SeedFile::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ReferenceError::ContradictoryMechanism { .. }));
    }

    #[test]
    fn load_yaml_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "countries:\n  - name: Norway\n    iso_code2: \"NO\"\n    jurisdiction_tags: [eea, efta]\n"
        )
        .unwrap();
        let seed = SeedFile::load_yaml(file.path()).unwrap();
        assert_eq!(seed.countries[0].name, "Norway");
    }

    #[test]
    fn load_yaml_missing_file() {
        let err = SeedFile::load_yaml(Path::new("/nonexistent/seed.yaml")).unwrap_err();
        assert!(matches!(err, ReferenceError::FileNotFound { .. }));
    }
}
