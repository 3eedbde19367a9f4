//! End-to-end compliance scenarios across all crates: an organization is
//! set up, its recipients and locations declared, and the derivation
//! engines queried: the flows a compliance officer actually runs.

use ropa_core::{
    Cancellation, ConfigurationError, LocationRole, RecipientKind, RopaError, SensitivityLevel,
};
use ropa_reference::ReferenceStore;
use ropa_registry::{
    CategorySpec, LocationOwner, LocationSpec, LocationUpdate, OverrideRequest,
    ProcessingRegister, RecipientSpec,
};
use ropa_transfer::{TransferDetector, TransferRisk};

/// Route engine tracing (e.g. the override-downgrade audit warning)
/// through the test writer. `RUST_LOG=ropa_registry=warn` shows it.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn location_spec(reference: &ReferenceStore, iso2: &str, mechanism: Option<&str>) -> LocationSpec {
    LocationSpec {
        service: format!("{iso2} processing site"),
        country_id: reference.country_by_iso2(iso2).unwrap().id.clone(),
        role: LocationRole::Both,
        purpose_id: None,
        purpose_text: Some("service delivery".to_string()),
        transfer_mechanism_id: mechanism
            .map(|name| reference.mechanism_by_name(name).unwrap().id.clone()),
        metadata: None,
    }
}

fn processor(name: &str) -> RecipientSpec {
    RecipientSpec {
        name: name.to_string(),
        kind: RecipientKind::Processor,
        parent_recipient_id: None,
    }
}

/// Germany-headquartered organization, one US recipient location with no
/// mechanism: exactly one CRITICAL finding.
#[test]
fn critical_risk_scenario() {
    init_tracing();
    let reference = ReferenceStore::builtin();
    let mut register = ProcessingRegister::new();
    let de = reference.country_by_iso2("DE").unwrap().id.clone();
    let org = register
        .create_organization("Acme GmbH", Some(de), &reference)
        .unwrap();

    let (vendor, _locations) = register
        .create_recipient_with_locations(
            &org.id,
            processor("CloudVendor"),
            vec![location_spec(&reference, "US", None)],
            &reference,
        )
        .unwrap();

    let transfers = TransferDetector::new(&register, &reference)
        .detect_cross_border_transfers(&org.id, &Cancellation::unbounded())
        .unwrap();

    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].risk, TransferRisk::Critical);
    assert_eq!(transfers[0].recipient_id(), Some(&vendor.id));
    assert_eq!(transfers[0].destination_iso2, "US");
}

/// Same setup, but the location carries SCCs: risk downgrades to MEDIUM.
#[test]
fn mitigated_risk_scenario() {
    let reference = ReferenceStore::builtin();
    let mut register = ProcessingRegister::new();
    let de = reference.country_by_iso2("DE").unwrap().id.clone();
    let org = register
        .create_organization("Acme GmbH", Some(de), &reference)
        .unwrap();
    register
        .create_recipient_with_locations(
            &org.id,
            processor("CloudVendor"),
            vec![location_spec(
                &reference,
                "US",
                Some("Standard Contractual Clauses"),
            )],
            &reference,
        )
        .unwrap();

    let transfers = TransferDetector::new(&register, &reference)
        .detect_cross_border_transfers(&org.id, &Cancellation::unbounded())
        .unwrap();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].risk, TransferRisk::Medium);
}

/// No headquarters country: the report must fail, not come back empty.
#[test]
fn missing_headquarters_scenario() {
    let reference = ReferenceStore::builtin();
    let mut register = ProcessingRegister::new();
    let org = register
        .create_organization("NoHq Ltd", None, &reference)
        .unwrap();

    let err = TransferDetector::new(&register, &reference)
        .detect_cross_border_transfers(&org.id, &Cancellation::unbounded())
        .unwrap_err();
    assert!(matches!(
        err,
        RopaError::Configuration(ConfigurationError::MissingHeadquartersCountry { .. })
    ));

    // Setting the headquarters unblocks analysis.
    let de = reference.country_by_iso2("DE").unwrap().id.clone();
    register
        .set_headquarters(&org.id, Some(de), &reference)
        .unwrap();
    let transfers = TransferDetector::new(&register, &reference)
        .detect_cross_border_transfers(&org.id, &Cancellation::unbounded())
        .unwrap();
    assert!(transfers.is_empty());
}

/// Contact Information (non-special) + Health Data (special) must derive
/// a special category. Conservative by default.
#[test]
fn conservative_classification_scenario() {
    let reference = ReferenceStore::builtin();
    let mut register = ProcessingRegister::new();
    let org = register
        .create_organization("Acme GmbH", None, &reference)
        .unwrap();

    let category = register
        .create_category(
            &org.id,
            CategorySpec {
                name: "Employee HR Data".to_string(),
                description: Some("HR master data incl. sick notes".to_string()),
                sensitivity: SensitivityLevel::Restricted,
                example_fields: vec!["name".to_string(), "sick leave".to_string()],
                nature_ids: vec![
                    reference
                        .nature_by_name("Contact Information")
                        .unwrap()
                        .id
                        .clone(),
                    reference.nature_by_name("Health Data").unwrap().id.clone(),
                ],
                override_request: None,
            },
            &reference,
        )
        .unwrap();

    assert!(category.is_special_category());
    assert!(!category.special_category.is_overridden());
}

/// Override precedence: the asserted value wins over the derivation,
/// and an override without justification is rejected outright.
#[test]
fn override_precedence_scenario() {
    init_tracing();
    let reference = ReferenceStore::builtin();
    let mut register = ProcessingRegister::new();
    let org = register
        .create_organization("Acme GmbH", None, &reference)
        .unwrap();
    let health = reference.nature_by_name("Health Data").unwrap().id.clone();
    let category = register
        .create_category(
            &org.id,
            CategorySpec {
                name: "Wellness Survey".to_string(),
                description: None,
                sensitivity: SensitivityLevel::Confidential,
                example_fields: vec![],
                nature_ids: vec![health],
                override_request: None,
            },
            &reference,
        )
        .unwrap();
    assert!(category.is_special_category());

    let err = register
        .set_special_category_override(
            &org.id,
            &category.id,
            OverrideRequest {
                value: false,
                justification: String::new(),
                actor: "dpo@acme.example".to_string(),
            },
            &reference,
        )
        .unwrap_err();
    assert!(matches!(err, RopaError::Validation(_)));
    // Rejected override leaves the derivation in place.
    assert!(register
        .category(&org.id, &category.id)
        .unwrap()
        .is_special_category());

    let overridden = register
        .set_special_category_override(
            &org.id,
            &category.id,
            OverrideRequest {
                value: false,
                justification: "aggregated, no individual health facts".to_string(),
                actor: "dpo@acme.example".to_string(),
            },
            &reference,
        )
        .unwrap();
    assert!(!overridden.is_special_category());
}

/// Move atomicity: one inactive original, one new active record; a
/// failing move changes nothing.
#[test]
fn move_atomicity_scenario() {
    let reference = ReferenceStore::builtin();
    let mut register = ProcessingRegister::new();
    let de = reference.country_by_iso2("DE").unwrap().id.clone();
    let org = register
        .create_organization("Acme GmbH", Some(de), &reference)
        .unwrap();
    let (vendor, locations) = register
        .create_recipient_with_locations(
            &org.id,
            processor("CloudVendor"),
            vec![location_spec(&reference, "IE", None)],
            &reference,
        )
        .unwrap();
    let original = &locations[0];
    let owner = LocationOwner::Recipient(vendor.id.clone());

    // Failing move: unknown country id.
    let err = register
        .move_location(
            &org.id,
            &original.id,
            LocationUpdate {
                country_id: Some(ropa_core::CountryId::new()),
                ..Default::default()
            },
            &reference,
        )
        .unwrap_err();
    assert!(matches!(err, RopaError::NotFound { .. }));
    let untouched = register.location(&org.id, &original.id).unwrap();
    assert!(untouched.is_active);

    // Successful move to the US.
    let us = reference.country_by_iso2("US").unwrap().id.clone();
    let moved = register
        .move_location(
            &org.id,
            &original.id,
            LocationUpdate {
                country_id: Some(us.clone()),
                ..Default::default()
            },
            &reference,
        )
        .unwrap();

    let all = register.locations_for_owner(&org.id, &owner).unwrap();
    assert_eq!(all.len(), 2);
    let inactive: Vec<_> = all.iter().filter(|l| !l.is_active).collect();
    let active: Vec<_> = all.iter().filter(|l| l.is_active).collect();
    assert_eq!(inactive.len(), 1);
    assert_eq!(active.len(), 1);
    assert_eq!(inactive[0].id, original.id);
    assert_eq!(inactive[0].country_id, original.country_id);
    assert_eq!(active[0].id, moved.id);
    assert_eq!(active[0].country_id, us);

    // The move is visible to transfer detection: IE was same-framework,
    // the US location is a critical transfer.
    let transfers = TransferDetector::new(&register, &reference)
        .detect_cross_border_transfers(&org.id, &Cancellation::unbounded())
        .unwrap();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].risk, TransferRisk::Critical);
}

/// Cycle rejection: A → B → C, then parent(A) := C must fail and leave
/// A untouched.
#[test]
fn cycle_rejection_scenario() {
    let reference = ReferenceStore::builtin();
    let mut register = ProcessingRegister::new();
    let org = register
        .create_organization("Acme GmbH", None, &reference)
        .unwrap();

    let a = register.create_recipient(&org.id, processor("A")).unwrap();
    let b = register
        .create_recipient(
            &org.id,
            RecipientSpec {
                name: "B".to_string(),
                kind: RecipientKind::SubProcessor,
                parent_recipient_id: Some(a.id.clone()),
            },
        )
        .unwrap();
    let c = register
        .create_recipient(
            &org.id,
            RecipientSpec {
                name: "C".to_string(),
                kind: RecipientKind::SubProcessor,
                parent_recipient_id: Some(b.id.clone()),
            },
        )
        .unwrap();

    let err = register
        .set_parent(&org.id, &a.id, Some(c.id.clone()))
        .unwrap_err();
    assert!(matches!(err, RopaError::Cycle { .. }));
    assert_eq!(
        register
            .recipient(&org.id, &a.id)
            .unwrap()
            .parent_recipient_id,
        None
    );

    // The hierarchy still traverses as a tree.
    let tree = register
        .descendant_tree(&org.id, &a.id, &Cancellation::unbounded())
        .unwrap();
    assert_eq!(tree.len(), 3);
}

/// The full report composes: hierarchy depth, per-country aggregation,
/// and the risk distribution.
#[test]
fn organization_report_scenario() {
    let reference = ReferenceStore::builtin();
    let mut register = ProcessingRegister::new();
    let de = reference.country_by_iso2("DE").unwrap().id.clone();
    let org = register
        .create_organization("Acme GmbH", Some(de), &reference)
        .unwrap();

    let (parent, _) = register
        .create_recipient_with_locations(
            &org.id,
            processor("PrimaryProcessor"),
            vec![
                location_spec(&reference, "DE", None),
                location_spec(&reference, "GB", None),
            ],
            &reference,
        )
        .unwrap();
    register
        .create_recipient_with_locations(
            &org.id,
            RecipientSpec {
                name: "UsSubProcessor".to_string(),
                kind: RecipientKind::SubProcessor,
                parent_recipient_id: Some(parent.id.clone()),
            },
            vec![location_spec(&reference, "US", None)],
            &reference,
        )
        .unwrap();

    let report = TransferDetector::new(&register, &reference)
        .organization_transfer_report(&org.id, &Cancellation::unbounded())
        .unwrap();

    // DE location is home, GB is low, US (depth 1, no mechanism anywhere)
    // is critical.
    assert_eq!(report.summary.total_transfers, 2);
    assert_eq!(report.summary.risk_distribution.low, 1);
    assert_eq!(report.summary.risk_distribution.critical, 1);
    assert_eq!(report.summary.countries_involved.len(), 2);

    let us_transfer = report
        .transfers
        .iter()
        .find(|t| t.destination_iso2 == "US")
        .unwrap();
    assert_eq!(us_transfer.depth, 1);
}
