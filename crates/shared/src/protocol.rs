use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Backend routes consumed by the client, relative to the configured origin.
pub mod endpoints {
    pub const HEALTH: &str = "/";
    pub const HYBRID_RAG: &str = "/hybrid_rag";
    pub const INSIGHTS: &str = "/insights";
    pub const UPLOAD: &str = "/upload";
    pub const TABLE_QA: &str = "/table_qa";

    /// Multipart field carrying the uploaded document.
    pub const UPLOAD_FIELD: &str = "file";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

impl QuestionRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResponse {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightsResponse {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub insights: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableQaRequest {
    pub file_path: String,
    pub question: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableQaResponse {
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub answer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
}

/// Accepts a string, `null`, or any other JSON value (rendered as compact JSON).
///
/// The answer pipelines occasionally hand back structured values instead of
/// prose; those are still worth showing rather than failing the whole request.
/// `false` and numeric zero count as missing so the fallback text is shown.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::Number(number)) if number.as_f64() == Some(0.0) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// Returns the text when it is present and non-empty.
pub fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_field_is_optional() {
        let parsed: AnswerResponse =
            serde_json::from_str(r#"{"question":"q"}"#).expect("parse");
        assert_eq!(parsed.answer, None);
        assert_eq!(parsed.question.as_deref(), Some("q"));
    }

    #[test]
    fn structured_answers_are_rendered_as_json_text() {
        let parsed: AnswerResponse =
            serde_json::from_str(r#"{"answer":{"value":42}}"#).expect("parse");
        assert_eq!(parsed.answer.as_deref(), Some(r#"{"value":42}"#));
    }

    #[test]
    fn falsy_scalars_count_as_missing() {
        for body in [r#"{"answer":0}"#, r#"{"answer":0.0}"#, r#"{"answer":false}"#] {
            let parsed: AnswerResponse = serde_json::from_str(body).expect("parse");
            assert_eq!(parsed.answer, None, "{body}");
        }
        let parsed: InsightsResponse =
            serde_json::from_str(r#"{"insights":true}"#).expect("parse");
        assert_eq!(parsed.insights.as_deref(), Some("true"));
        let parsed: AnswerResponse = serde_json::from_str(r#"{"answer":42}"#).expect("parse");
        assert_eq!(parsed.answer.as_deref(), Some("42"));
    }

    #[test]
    fn null_message_is_treated_as_absent() {
        let parsed: UploadResponse =
            serde_json::from_str(r#"{"message":null,"file_path":"./uploads/a.pdf"}"#)
                .expect("parse");
        assert_eq!(parsed.message, None);
        assert_eq!(parsed.file_path.as_deref(), Some("./uploads/a.pdf"));
    }

    #[test]
    fn non_empty_only_rejects_missing_or_empty_text() {
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some(" ")), Some(" "));
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("grew 5%")), Some("grew 5%"));
    }
}
