//! Fulfillment text rendering.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Success body returned to the conversational platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentResponse {
    #[serde(rename = "fulfillmentText")]
    pub fulfillment_text: String,
}

impl FulfillmentResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            fulfillment_text: text.into(),
        }
    }

    /// The decimal keeps its stored scale: `9.0` stays `9.0`.
    pub fn cgpa(cgpa: &Decimal) -> Self {
        Self::new(format!("Your CGPA is: {cgpa}"))
    }

    pub fn syllabus(branch: &str, semester: &str, syllabus_file: &str) -> Self {
        Self::new(format!(
            "Here is the syllabus for {branch}, {semester}: {syllabus_file}"
        ))
    }
}
