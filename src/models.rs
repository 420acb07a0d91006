use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusDocument {
    pub general_text: String,
    pub recovery_percentage: f64,
    pub parameters: IndexMap<String, String>,
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub date: String,
    pub time: String,
    pub difficulty: i64,
    pub notes: String,
}

/// Report form fields exactly as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportForm {
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub difficulty: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub last_relapse: String,
}

/// JSON report body. Difficulty may arrive as a number or a numeric string;
/// anything else is left for the recorder to reject.
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub difficulty: Option<Value>,
}

impl From<ReportRequest> for ReportForm {
    fn from(request: ReportRequest) -> Self {
        let difficulty = match request.difficulty {
            Some(Value::Number(number)) => number.to_string(),
            Some(Value::String(text)) => text,
            _ => String::new(),
        };
        Self {
            notes: request.notes,
            difficulty,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayResponse {
    pub state: String,
    pub day: Option<i64>,
    pub text: String,
    pub detail: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub settings: Option<String>,
    pub notice: Option<String>,
}
