//! Redeemable promotional code records.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::fields::Fields;

/// A redeemable promotional code.
///
/// Every key of the record is required.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Code {
    pub code: String,
    pub namespace: String,
    pub creator: String,
    pub created_at: DateTime<Utc>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub allowed_users: Vec<Value>,
    pub allowed_countries: Vec<Value>,
    pub allowed_clients: Vec<Value>,
    pub distribution_metadata: Map<String, Value>,
    pub allowed_distribution_clients: Vec<Value>,
    pub code_type: String,
    pub max_uses: i64,
    pub allow_repeated_uses_by_same_user: bool,
    pub use_count: i64,
    pub completed_count: i64,
    pub consumption_metadata: ConsumptionMetadata,
    pub code_status: String,
    pub batch_id: String,
    pub batch_number: i64,
    pub labels: Vec<String>,
    pub blocked_countries: Vec<Value>,
}

/// Offer a code is consumed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsumptionMetadata {
    pub namespace: String,
    pub offer_id: String,
}

impl Code {
    pub fn from_value(raw: &Value) -> Result<Self> {
        let f = Fields::new(raw, "Code")?;
        let list = |key: &str| -> Result<Vec<Value>> { Ok(f.req::<&[Value]>(key)?.to_vec()) };

        Ok(Self {
            code: f.req("code")?,
            namespace: f.req("namespace")?,
            creator: f.req("creator")?,
            created_at: f.timestamp("dateCreated")?,
            starts_at: f.timestamp("startDate")?,
            ends_at: f.timestamp("endDate")?,
            allowed_users: list("allowedUsers")?,
            allowed_countries: list("allowedCountries")?,
            allowed_clients: list("allowedClients")?,
            distribution_metadata: f.req("distributionMetadata")?,
            allowed_distribution_clients: list("allowedDistributionClients")?,
            code_type: f.req("codeType")?,
            max_uses: f.req("maxNumberOfUses")?,
            allow_repeated_uses_by_same_user: f.req("allowRepeatedUsesBySameUser")?,
            use_count: f.req("useCount")?,
            completed_count: f.req("completedCount")?,
            consumption_metadata: ConsumptionMetadata::from_fields(
                f.object("consumptionMetadata", "ConsumptionMetadata")?,
            )?,
            code_status: f.req("codeStatus")?,
            batch_id: f.req("batchId")?,
            batch_number: f.req("batchNumber")?,
            labels: f.req("labels")?,
            blocked_countries: list("blockedCountries")?,
        })
    }

    /// Whether `now` falls inside the code's validity window.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now && now < self.ends_at
    }

    /// Uses left before `max_uses` is reached; `None` when uses are unlimited (-1).
    pub fn remaining_uses(&self) -> Option<i64> {
        (self.max_uses >= 0).then(|| (self.max_uses - self.use_count).max(0))
    }
}

impl ConsumptionMetadata {
    pub fn from_value(raw: &Value) -> Result<Self> {
        Self::from_fields(Fields::new(raw, "ConsumptionMetadata")?)
    }

    fn from_fields(f: Fields<'_>) -> Result<Self> {
        Ok(Self {
            namespace: f.req("namespace")?,
            offer_id: f.req("offerId")?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::TimeZone;
    use serde_json::json;

    fn code_json() -> Value {
        json!({
            "code": "ABCD-EFGH-IJKL",
            "namespace": "fn",
            "creator": "system",
            "dateCreated": "2021-01-01T00:00:00.000Z",
            "startDate": "2021-01-02T00:00:00.000Z",
            "endDate": "2021-02-01T00:00:00.000Z",
            "allowedUsers": [],
            "allowedCountries": ["US", "DE"],
            "allowedClients": [],
            "distributionMetadata": {"channel": "twitch"},
            "allowedDistributionClients": [],
            "codeType": "CodeToken:FounderPack",
            "maxNumberOfUses": 1,
            "allowRepeatedUsesBySameUser": false,
            "useCount": 0,
            "completedCount": 0,
            "consumptionMetadata": {"namespace": "fn", "offerId": "abc123"},
            "codeStatus": "ACTIVE",
            "batchId": "batch-1",
            "batchNumber": 4,
            "labels": ["promo"],
            "blockedCountries": []
        })
    }

    #[test]
    fn parses_full_record() {
        let code = Code::from_value(&code_json()).unwrap();
        assert_eq!(code.code, "ABCD-EFGH-IJKL");
        assert_eq!(code.starts_at, Utc.with_ymd_and_hms(2021, 1, 2, 0, 0, 0).unwrap());
        assert_eq!(code.consumption_metadata.offer_id, "abc123");
        assert_eq!(code.allowed_countries.len(), 2);
        assert_eq!(code.labels, vec!["promo".to_string()]);
        assert_eq!(code.batch_number, 4);
    }

    #[test]
    fn parsing_is_idempotent() {
        let raw = code_json();
        assert_eq!(Code::from_value(&raw).unwrap(), Code::from_value(&raw).unwrap());
    }

    #[test]
    fn missing_code_is_missing_field() {
        let mut raw = code_json();
        raw.as_object_mut().unwrap().remove("code");
        let err = Code::from_value(&raw).unwrap_err();
        assert!(matches!(err, Error::MissingField { context: "Code", field } if field == "code"));
    }

    #[test]
    fn missing_offer_id_in_consumption_metadata_fails() {
        let mut raw = code_json();
        raw["consumptionMetadata"] = json!({"namespace": "fn"});
        assert!(matches!(
            Code::from_value(&raw),
            Err(Error::MissingField { context: "ConsumptionMetadata", .. })
        ));
    }

    #[test]
    fn validity_window_and_remaining_uses() {
        let code = Code::from_value(&code_json()).unwrap();
        assert!(code.is_active_at(Utc.with_ymd_and_hms(2021, 1, 15, 0, 0, 0).unwrap()));
        assert!(!code.is_active_at(Utc.with_ymd_and_hms(2021, 2, 1, 0, 0, 0).unwrap()));
        assert_eq!(code.remaining_uses(), Some(1));

        let mut raw = code_json();
        raw["maxNumberOfUses"] = json!(-1);
        assert_eq!(Code::from_value(&raw).unwrap().remaining_uses(), None);
    }
}
