//! Client-record loading from CSV and JSON files
//!
//! CSV rows come in as raw strings and are validated into typed
//! [`ClientRecord`]s; which columns are required depends on the client type.
//! JSON files deserialize the typed records directly.

use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::profile::ClientType;

/// Default location of the client roster
pub const DEFAULT_CLIENT_FILE: &str = "data/clients.csv";

/// A record that failed validation while converting to a [`ClientRecord`]
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("record {id}: invalid date in {field}: {value}")]
    InvalidDate {
        id: String,
        field: &'static str,
        value: String,
    },
    #[error("record {id}: unknown client type: {value}")]
    UnknownClientType { id: String, value: String },
    #[error("record {id}: {client_type} record missing required field {field}")]
    MissingField {
        id: String,
        client_type: &'static str,
        field: &'static str,
    },
    #[error("record {id}: invalid boolean flag in {field}: {value}")]
    InvalidFlag {
        id: String,
        field: &'static str,
        value: String,
    },
}

/// One fully-validated client case, ready to drive a calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRecord {
    /// Caller-assigned identifier
    pub id: String,
    /// Marital situation selecting the calculator
    pub client_type: ClientType,
    /// Date of birth
    pub birth_date: NaiveDate,
    /// Own Primary Insurance Amount at FRA
    pub pia: f64,
    /// Spouse date of birth (married records)
    #[serde(default)]
    pub spouse_birth_date: Option<NaiveDate>,
    /// Spouse PIA at FRA (married records)
    #[serde(default)]
    pub spouse_pia: Option<f64>,
    /// Ex-spouse PIA at FRA (divorced records)
    #[serde(default)]
    pub ex_spouse_pia: Option<f64>,
    /// Length of the ended marriage in whole years (divorced records)
    #[serde(default)]
    pub marriage_duration_years: Option<u32>,
    /// Date the divorce was finalized (divorced records)
    #[serde(default)]
    pub divorce_date: Option<NaiveDate>,
    /// Whether the client has remarried
    #[serde(default)]
    pub is_remarried: bool,
    /// Date of remarriage, when known
    #[serde(default)]
    pub remarriage_date: Option<NaiveDate>,
    /// Birth date of a child in the client's care
    #[serde(default)]
    pub child_birth_date: Option<NaiveDate>,
    /// Deceased spouse's PIA at FRA (widowed records)
    #[serde(default)]
    pub deceased_spouse_pia: Option<f64>,
    /// Date the deceased spouse died (widowed records)
    #[serde(default)]
    pub deceased_death_date: Option<NaiveDate>,
    /// Per-record longevity override
    #[serde(default)]
    pub longevity_age: Option<u32>,
    /// Per-record COLA override
    #[serde(default)]
    pub inflation_rate: Option<f64>,
}

/// A raw CSV row before validation. Every relationship column is optional
/// at this stage; `to_record` enforces the per-type requirements.
#[derive(Debug, Deserialize)]
pub struct RawClientRow {
    pub id: String,
    pub client_type: String,
    pub birth_date: String,
    pub pia: f64,
    #[serde(default)]
    pub spouse_birth_date: Option<String>,
    #[serde(default)]
    pub spouse_pia: Option<f64>,
    #[serde(default)]
    pub ex_spouse_pia: Option<f64>,
    #[serde(default)]
    pub marriage_duration_years: Option<u32>,
    #[serde(default)]
    pub divorce_date: Option<String>,
    #[serde(default)]
    pub is_remarried: Option<String>,
    #[serde(default)]
    pub remarriage_date: Option<String>,
    #[serde(default)]
    pub child_birth_date: Option<String>,
    #[serde(default)]
    pub deceased_spouse_pia: Option<f64>,
    #[serde(default)]
    pub deceased_death_date: Option<String>,
    #[serde(default)]
    pub longevity_age: Option<u32>,
    #[serde(default)]
    pub inflation_rate: Option<f64>,
}

impl RawClientRow {
    /// Validate the raw row into a typed record.
    pub fn to_record(self) -> Result<ClientRecord, LoadError> {
        let id = self.id.clone();

        let client_type = match self.client_type.to_lowercase().as_str() {
            "single" => ClientType::Single,
            "married" => ClientType::Married,
            "divorced" => ClientType::Divorced,
            "widowed" => ClientType::Widowed,
            other => {
                return Err(LoadError::UnknownClientType {
                    id,
                    value: other.to_string(),
                })
            }
        };

        let birth_date = parse_date(&id, "birth_date", &self.birth_date)?;
        let spouse_birth_date = parse_optional_date(&id, "spouse_birth_date", &self.spouse_birth_date)?;
        let divorce_date = parse_optional_date(&id, "divorce_date", &self.divorce_date)?;
        let remarriage_date = parse_optional_date(&id, "remarriage_date", &self.remarriage_date)?;
        let child_birth_date = parse_optional_date(&id, "child_birth_date", &self.child_birth_date)?;
        let deceased_death_date =
            parse_optional_date(&id, "deceased_death_date", &self.deceased_death_date)?;
        let is_remarried = parse_flag(&id, "is_remarried", &self.is_remarried)?;

        let record = ClientRecord {
            id,
            client_type,
            birth_date,
            pia: self.pia,
            spouse_birth_date,
            spouse_pia: self.spouse_pia,
            ex_spouse_pia: self.ex_spouse_pia,
            marriage_duration_years: self.marriage_duration_years,
            divorce_date,
            is_remarried,
            remarriage_date,
            child_birth_date,
            deceased_spouse_pia: self.deceased_spouse_pia,
            deceased_death_date,
            longevity_age: self.longevity_age,
            inflation_rate: self.inflation_rate,
        };
        record.require_type_fields()?;
        Ok(record)
    }
}

impl ClientRecord {
    /// Enforce the columns each client type cannot do without.
    fn require_type_fields(&self) -> Result<(), LoadError> {
        let missing = |field: &'static str| LoadError::MissingField {
            id: self.id.clone(),
            client_type: self.client_type.as_str(),
            field,
        };
        match self.client_type {
            ClientType::Single => {}
            ClientType::Married => {
                if self.spouse_birth_date.is_none() {
                    return Err(missing("spouse_birth_date"));
                }
                if self.spouse_pia.is_none() {
                    return Err(missing("spouse_pia"));
                }
            }
            ClientType::Divorced => {
                if self.ex_spouse_pia.is_none() {
                    return Err(missing("ex_spouse_pia"));
                }
                if self.marriage_duration_years.is_none() {
                    return Err(missing("marriage_duration_years"));
                }
                if self.divorce_date.is_none() {
                    return Err(missing("divorce_date"));
                }
            }
            ClientType::Widowed => {
                if self.deceased_spouse_pia.is_none() {
                    return Err(missing("deceased_spouse_pia"));
                }
                if self.deceased_death_date.is_none() {
                    return Err(missing("deceased_death_date"));
                }
            }
        }
        Ok(())
    }
}

fn parse_date(id: &str, field: &'static str, value: &str) -> Result<NaiveDate, LoadError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| LoadError::InvalidDate {
        id: id.to_string(),
        field,
        value: value.to_string(),
    })
}

fn parse_optional_date(
    id: &str,
    field: &'static str,
    value: &Option<String>,
) -> Result<Option<NaiveDate>, LoadError> {
    match value.as_deref().filter(|v| !v.is_empty()) {
        Some(v) => parse_date(id, field, v).map(Some),
        None => Ok(None),
    }
}

fn parse_flag(id: &str, field: &'static str, value: &Option<String>) -> Result<bool, LoadError> {
    match value.as_deref().map(|v| v.trim().to_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "" | "false" | "no" | "0" => Ok(false),
            "true" | "yes" | "1" => Ok(true),
            other => Err(LoadError::InvalidFlag {
                id: id.to_string(),
                field,
                value: other.to_string(),
            }),
        },
    }
}

/// Load client records from a CSV file.
pub fn load_client_records<P: AsRef<Path>>(path: P) -> Result<Vec<ClientRecord>, Box<dyn Error>> {
    let file = File::open(path)?;
    load_client_records_from_reader(file)
}

/// Load client records from any CSV reader.
pub fn load_client_records_from_reader<R: Read>(
    reader: R,
) -> Result<Vec<ClientRecord>, Box<dyn Error>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        let raw: RawClientRow = row?;
        records.push(raw.to_record()?);
    }
    Ok(records)
}

/// Load the default client roster.
pub fn load_default_client_records() -> Result<Vec<ClientRecord>, Box<dyn Error>> {
    load_client_records(DEFAULT_CLIENT_FILE)
}

/// Load client records from a JSON array file.
pub fn load_client_records_json<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<ClientRecord>, Box<dyn Error>> {
    let file = File::open(path)?;
    let records: Vec<ClientRecord> = serde_json::from_reader(file)?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER_CSV: &str = "\
id,client_type,birth_date,pia,spouse_birth_date,spouse_pia,ex_spouse_pia,marriage_duration_years,divorce_date,is_remarried,remarriage_date,child_birth_date,deceased_spouse_pia,deceased_death_date,longevity_age,inflation_rate
C001,single,1960-04-15,2400,,,,,,,,,,,90,0.025
C002,divorced,1963-06-01,1500,,,3000,12,2010-08-20,false,,,,,,
C003,widowed,1965-01-01,1800,,,,,,true,2027-01-01,,2600,2020-01-01,95,0.03
C004,married,1962-09-30,2200,1964-02-14,1100,,,,,,,,,,
";

    #[test]
    fn test_load_from_reader() {
        let records = load_client_records_from_reader(ROSTER_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 4);

        let single = &records[0];
        assert_eq!(single.client_type, ClientType::Single);
        assert_eq!(single.birth_date, NaiveDate::from_ymd_opt(1960, 4, 15).unwrap());
        assert_eq!(single.pia, 2400.0);
        assert_eq!(single.longevity_age, Some(90));
        assert!(!single.is_remarried);

        let divorced = &records[1];
        assert_eq!(divorced.client_type, ClientType::Divorced);
        assert_eq!(divorced.ex_spouse_pia, Some(3000.0));
        assert_eq!(divorced.marriage_duration_years, Some(12));
        assert_eq!(
            divorced.divorce_date,
            Some(NaiveDate::from_ymd_opt(2010, 8, 20).unwrap())
        );
        assert_eq!(divorced.longevity_age, None);

        let widowed = &records[2];
        assert!(widowed.is_remarried);
        assert_eq!(widowed.deceased_spouse_pia, Some(2600.0));
        assert_eq!(widowed.inflation_rate, Some(0.03));

        let married = &records[3];
        assert_eq!(married.spouse_pia, Some(1100.0));
    }

    #[test]
    fn test_unknown_client_type_rejected() {
        let csv = "id,client_type,birth_date,pia\nC009,engaged,1960-01-01,2000\n";
        let err = load_client_records_from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("unknown client type"), "{}", err);
    }

    #[test]
    fn test_divorced_requires_ex_spouse_fields() {
        let csv = "id,client_type,birth_date,pia,ex_spouse_pia\nC010,divorced,1960-01-01,2000,\n";
        let err = load_client_records_from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("ex_spouse_pia"), "{}", err);
    }

    #[test]
    fn test_widowed_requires_death_date() {
        let csv =
            "id,client_type,birth_date,pia,deceased_spouse_pia\nC011,widowed,1960-01-01,2000,2500\n";
        let err = load_client_records_from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("deceased_death_date"), "{}", err);
    }

    #[test]
    fn test_invalid_date_rejected() {
        let csv = "id,client_type,birth_date,pia\nC012,single,04/15/1960,2000\n";
        let err = load_client_records_from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("invalid date"), "{}", err);
    }

    #[test]
    fn test_json_round_trip() {
        let records = load_client_records_from_reader(ROSTER_CSV.as_bytes()).unwrap();
        let json = serde_json::to_string(&records).unwrap();
        let parsed: Vec<ClientRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), records.len());
        assert_eq!(parsed[1].ex_spouse_pia, Some(3000.0));
    }
}
