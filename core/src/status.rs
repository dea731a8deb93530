//! Replica-set status responses and the prompt state decoded from them.
//!
//! The raw response is whatever the status collaborator handed back. It is
//! decoded exactly once into a [`ReplicaState`], and everything downstream
//! matches on that instead of poking at optional fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ShellResult;

/// An `info` string shorter than this many characters is a status code
/// (e.g. "no master"); anything longer is a verbose error message.
pub const SHORT_DIAGNOSTIC_MAX_LEN: usize = 20;

/// Raw `replSetGetStatus` reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaStatusResponse {
    /// Success flag. Servers send `1`/`0` as often as `true`/`false`.
    #[serde(default)]
    pub ok: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errmsg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_state: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<MemberRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl ReplicaStatusResponse {
    /// Whether the reply reports success: `ok` truthy and no `errmsg`.
    pub fn succeeded(&self) -> bool {
        self.errmsg.is_none() && is_truthy(&self.ok)
    }

    /// `stateStr` of the first member flagged as `self`.
    pub fn self_state(&self) -> Option<&str> {
        self.members
            .as_deref()?
            .iter()
            .find(|member| member.is_self)
            .and_then(|member| member.state_str.as_deref())
    }

    /// `info`, if it is short enough to be a status code.
    pub fn short_diagnostic(&self) -> Option<&str> {
        // Counts chars, not UTF-16 units; differs from the shell only for non-BMP text.
        self.info
            .as_deref()
            .filter(|info| info.chars().count() < SHORT_DIAGNOSTIC_MAX_LEN)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "self", default)]
    pub is_self: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_str: Option<String>,
}

/// The subset of `serverStatus` the prompt needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    #[serde(default)]
    pub process: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
}

/// What the prompt should show, decoded from one status reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplicaState {
    /// Not a replica-set member, or the status call failed.
    Standalone,
    /// Replica-set member. Missing pieces render as `undefined`.
    Replica {
        set: Option<String>,
        state: Option<String>,
    },
    /// Short diagnostic reported in place of set/state.
    Diagnostic { text: String },
}

impl ReplicaState {
    /// Decode the outcome of a status call. A failed call is a standalone node.
    pub fn decode(outcome: ShellResult<ReplicaStatusResponse>) -> Self {
        match outcome {
            Ok(response) => Self::from_response(&response),
            Err(err) => {
                tracing::debug!("replica status unavailable, assuming standalone: {}", err);
                ReplicaState::Standalone
            }
        }
    }

    pub fn from_response(response: &ReplicaStatusResponse) -> Self {
        if !response.succeeded() {
            return ReplicaState::Standalone;
        }

        if let Some(text) = response.short_diagnostic() {
            return ReplicaState::Diagnostic {
                text: text.to_string(),
            };
        }

        let state = response
            .self_state()
            .map(str::to_string)
            .or_else(|| response.my_state.map(|code| code.to_string()));

        ReplicaState::Replica {
            set: response.set.clone(),
            state,
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;
    use serde_json::json;

    fn parse(value: Value) -> ReplicaStatusResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_failed_call_is_standalone() {
        let state = ReplicaState::decode(Err(ShellError::Connection("refused".into())));
        assert_eq!(state, ReplicaState::Standalone);
    }

    #[test]
    fn test_errmsg_is_standalone() {
        let response = parse(json!({
            "ok": 0,
            "errmsg": "not running with --replSet",
            "code": 76
        }));
        assert!(!response.succeeded());
        assert_eq!(ReplicaState::from_response(&response), ReplicaState::Standalone);
    }

    #[test]
    fn test_errmsg_wins_over_ok() {
        let response = parse(json!({ "ok": 1, "errmsg": "odd" }));
        assert_eq!(ReplicaState::from_response(&response), ReplicaState::Standalone);
    }

    #[test]
    fn test_ok_truthiness() {
        assert!(parse(json!({ "ok": 1 })).succeeded());
        assert!(parse(json!({ "ok": 1.0 })).succeeded());
        assert!(parse(json!({ "ok": true })).succeeded());
        assert!(!parse(json!({ "ok": false })).succeeded());
        assert!(!parse(json!({ "ok": 0 })).succeeded());
        assert!(!parse(json!({})).succeeded());
    }

    #[test]
    fn test_first_self_member_wins() {
        let response = parse(json!({
            "ok": 1,
            "set": "rs0",
            "myState": 2,
            "members": [
                { "name": "a:27017", "self": false, "stateStr": "PRIMARY" },
                { "name": "b:27017", "self": true, "stateStr": "SECONDARY" },
                { "name": "c:27017", "self": true, "stateStr": "ARBITER" }
            ]
        }));
        assert_eq!(
            ReplicaState::from_response(&response),
            ReplicaState::Replica {
                set: Some("rs0".into()),
                state: Some("SECONDARY".into()),
            }
        );
    }

    #[test]
    fn test_numeric_state_fallback() {
        let response = parse(json!({
            "ok": 1,
            "set": "rs0",
            "myState": 1,
            "members": [{ "name": "a:27017", "stateStr": "PRIMARY" }]
        }));
        assert_eq!(
            ReplicaState::from_response(&response),
            ReplicaState::Replica {
                set: Some("rs0".into()),
                state: Some("1".into()),
            }
        );
    }

    #[test]
    fn test_short_info_is_diagnostic() {
        let response = parse(json!({ "ok": 1, "info": "no master" }));
        assert_eq!(
            ReplicaState::from_response(&response),
            ReplicaState::Diagnostic {
                text: "no master".into()
            }
        );
    }

    #[test]
    fn test_info_threshold_is_exclusive() {
        let nineteen = "a".repeat(SHORT_DIAGNOSTIC_MAX_LEN - 1);
        let twenty = "a".repeat(SHORT_DIAGNOSTIC_MAX_LEN);

        let short = parse(json!({ "ok": 1, "set": "rs0", "info": nineteen }));
        assert!(matches!(
            ReplicaState::from_response(&short),
            ReplicaState::Diagnostic { .. }
        ));

        let long = parse(json!({ "ok": 1, "set": "rs0", "myState": 1, "info": twenty }));
        assert_eq!(
            ReplicaState::from_response(&long),
            ReplicaState::Replica {
                set: Some("rs0".into()),
                state: Some("1".into()),
            }
        );
    }

    #[test]
    fn test_malformed_response_degrades() {
        let response = parse(json!({ "ok": 1 }));
        assert_eq!(
            ReplicaState::from_response(&response),
            ReplicaState::Replica {
                set: None,
                state: None
            }
        );
    }
}
