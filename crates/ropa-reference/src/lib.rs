//! # ropa-reference: Global Reference Data
//!
//! The catalog every compliance derivation reads from: countries with
//! jurisdiction tags, Article 9 data natures, and legal transfer
//! mechanisms. Reference data is shared across tenants, read-only from
//! the rest of the platform, and changes only through an explicit
//! administrative reload.
//!
//! ## Architecture
//!
//! ```text
//! SeedFile (YAML/JSON)  -->  ReferenceStore (immutable catalog)
//!        validation              ReferenceCache (Arc snapshots, admin reload)
//! ```

pub mod country;
pub mod error;
pub mod mechanism;
pub mod nature;
pub mod seed;
pub mod store;

pub use country::Country;
pub use error::{ReferenceError, ReferenceResult};
pub use mechanism::TransferMechanism;
pub use nature::DataNature;
pub use seed::{CountrySeed, MechanismSeed, NatureSeed, SeedFile};
pub use store::{ReferenceCache, ReferenceStore};
