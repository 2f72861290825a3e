//! Webhook payload decoding and intent dispatch.
//!
//! The platform posts `{"queryResult": {"intent": {"displayName": ..},
//! "parameters": {..}}}`. Everything below `queryResult` is optional:
//! a missing intent decodes to an empty name and takes the unknown-intent
//! path, missing parameters decode to `None`.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{LookupKind, WebhookError};
use crate::fulfillment::FulfillmentResponse;
use crate::store::RecordStore;

pub const CHECK_CGPA: &str = "Check CGPA";
pub const GET_SYLLABUS: &str = "Get Syllabus";

pub const PARAM_ROLL_NO: &str = "roll_no";
pub const PARAM_BRANCH: &str = "branch";
pub const PARAM_SEMESTER: &str = "semester";

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookRequest {
    #[serde(rename = "queryResult")]
    pub query_result: QueryResult,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub intent: Option<IntentInfo>,
    #[serde(default)]
    pub parameters: Option<serde_json::Map<String, Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntentInfo {
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

impl WebhookRequest {
    /// Intent display name, empty when absent.
    pub fn intent_name(&self) -> &str {
        self.query_result
            .intent
            .as_ref()
            .and_then(|i| i.display_name.as_deref())
            .unwrap_or("")
    }

    /// Scalar parameters rendered as text. Non-scalar values are dropped.
    pub fn parameters(&self) -> BTreeMap<String, String> {
        self.query_result
            .parameters
            .iter()
            .flatten()
            .filter_map(|(k, v)| scalar_text(v).map(|text| (k.clone(), text)))
            .collect()
    }

    pub fn into_intent(self) -> Intent {
        let params = self.parameters();
        Intent::from_parts(self.intent_name(), &params)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// A decoded intent with its required parameters.
///
/// A parameter that is absent or blank is `None`; no lookup is issued for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    CheckCgpa {
        roll_no: Option<String>,
    },
    GetSyllabus {
        branch: Option<String>,
        semester: Option<String>,
    },
    Unknown(String),
}

impl Intent {
    pub fn from_parts(name: &str, params: &BTreeMap<String, String>) -> Self {
        let required = |key: &str| {
            params
                .get(key)
                .filter(|v| !v.trim().is_empty())
                .cloned()
        };

        match name {
            CHECK_CGPA => Self::CheckCgpa {
                roll_no: required(PARAM_ROLL_NO),
            },
            GET_SYLLABUS => Self::GetSyllabus {
                branch: required(PARAM_BRANCH),
                semester: required(PARAM_SEMESTER),
            },
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Run the lookup for `intent` and render the fulfillment.
pub async fn dispatch(
    store: &dyn RecordStore,
    intent: Intent,
) -> Result<FulfillmentResponse, WebhookError> {
    match intent {
        Intent::CheckCgpa {
            roll_no: Some(roll_no),
        } => {
            debug!(%roll_no, "Dispatching {CHECK_CGPA}");
            match store.find_cgpa(&roll_no).await? {
                Some(cgpa) => Ok(FulfillmentResponse::cgpa(&cgpa)),
                None => {
                    info!(%roll_no, "CGPA not found");
                    Err(WebhookError::NotFound(LookupKind::Cgpa))
                }
            }
        }
        Intent::CheckCgpa { roll_no: None } => {
            warn!("{CHECK_CGPA} without a {PARAM_ROLL_NO} parameter");
            Err(WebhookError::NotFound(LookupKind::Cgpa))
        }
        Intent::GetSyllabus {
            branch: Some(branch),
            semester: Some(semester),
        } => {
            debug!(%branch, %semester, "Dispatching {GET_SYLLABUS}");
            match store.find_syllabus(&branch, &semester).await? {
                Some(file) => Ok(FulfillmentResponse::syllabus(&branch, &semester, &file)),
                None => {
                    info!(%branch, %semester, "Syllabus not found");
                    Err(WebhookError::NotFound(LookupKind::Syllabus))
                }
            }
        }
        Intent::GetSyllabus { branch, semester } => {
            warn!(
                has_branch = branch.is_some(),
                has_semester = semester.is_some(),
                "{GET_SYLLABUS} with missing parameters"
            );
            Err(WebhookError::NotFound(LookupKind::Syllabus))
        }
        Intent::Unknown(name) => {
            debug!(intent = %name, "Unknown intent");
            Err(WebhookError::UnknownIntent)
        }
    }
}
