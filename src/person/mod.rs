//! Client profiles, claiming scenarios, and roster loading

mod profile;
pub mod loader;

pub use loader::{
    load_client_records, load_client_records_from_reader, load_client_records_json,
    load_default_client_records, ClientRecord, LoadError, RawClientRow, DEFAULT_CLIENT_FILE,
};
pub use profile::{
    add_months, months_between, ClaimingScenario, ClientType, PersonBenefitProfile,
};
