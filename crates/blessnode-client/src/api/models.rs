//! ============================================
//! File: crates/blessnode-client/src/api/models.rs
//! ============================================
//! Purpose: Gateway API data models
//!
//! Main Data Structures:
//!   - RegisterNodeRequest: body of `POST /nodes/{id}`
//!   - RegistrationResponse / SessionResponse: opaque payloads, logged as-is
//!   - PingRecord / PingEntry: `POST /nodes/{id}/ping` response
//!   - IpLookupResponse: IP service response
//!
//! ⚠️ Important Note for Next Developer:
//!   - The gateway does not document its payloads; only the fields we
//!     read are typed, everything else is kept in `extra`
//!   - `pings` may be absent or null; both decode as an empty history
//!
//! Last Modified: v0.1.0 - Initial models
//! ============================================

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Body of the registration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterNodeRequest {
    /// Public IP resolved immediately before registering.
    pub ip_address: String,
    /// Hardware fingerprint from the identity file.
    pub hardware_id: String,
}

/// Registration payload returned by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationResponse(pub Value);

/// Start/stop session payload returned by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionResponse(pub Value);

impl fmt::Display for RegistrationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SessionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Response of the public IP lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IpLookupResponse {
    /// Caller's public IP, as seen by the service.
    #[serde(default)]
    pub ip: Option<String>,
}

/// One confirmed round trip in the ping history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingEntry {
    /// Server-side timestamp of the ping.
    pub timestamp: String,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Ping response: the node record with its recent ping history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingRecord {
    /// Gateway record ID.
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    /// Node ID echoed by the gateway.
    #[serde(rename = "nodeId", default)]
    pub node_id: Option<String>,
    /// Ping history, oldest first.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pings: Vec<PingEntry>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PingRecord {
    /// Most recent ping, if the history is not empty.
    #[must_use]
    pub fn last_ping(&self) -> Option<&PingEntry> {
        self.pings.last()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<PingEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<PingEntry>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_request_field_names() {
        let body = serde_json::to_value(RegisterNodeRequest {
            ip_address: "1.2.3.4".into(),
            hardware_id: "h1".into(),
        })
        .unwrap();
        assert_eq!(body, json!({ "ipAddress": "1.2.3.4", "hardwareId": "h1" }));
    }

    #[test]
    fn test_last_ping() {
        let record: PingRecord = serde_json::from_value(json!({
            "_id": "abc",
            "nodeId": "n1",
            "pings": [{ "timestamp": "t1" }, { "timestamp": "t2", "isB7SConnected": true }],
            "isConnected": true
        }))
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("abc"));
        assert_eq!(record.last_ping().unwrap().timestamp, "t2");
        assert_eq!(record.extra.get("isConnected"), Some(&json!(true)));
    }

    #[test]
    fn test_empty_absent_and_null_pings() {
        for value in [
            json!({ "pings": [] }),
            json!({ "nodeId": "n1" }),
            json!({ "nodeId": "n1", "pings": null }),
        ] {
            let record: PingRecord = serde_json::from_value(value).unwrap();
            assert!(record.last_ping().is_none());
        }
    }

    #[test]
    fn test_ip_lookup_missing_field() {
        let res: IpLookupResponse = serde_json::from_str(r#"{"country":"NL"}"#).unwrap();
        assert!(res.ip.is_none());
    }
}
