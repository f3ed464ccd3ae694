use crate::activity::ActivityEntry;
use crate::listing::FieldMap;
use serde::{Deserialize, Serialize};

/// Messages exchanged with the in-page injector, kept to the
/// `{"action": ..., "data": ...}` JSON layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "snake_case")]
pub enum Message {
    CompileForm(CompileRequest),
    LogActivity(ActivityEntry),
}

/// One fill pass: the target marketplace plus the values to inject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompileRequest {
    pub marketplace: String,
    pub fields: FieldMap,
}

/// Reply to a compile request. `error` is only present on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjectionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InjectionResult {
    pub fn ok() -> Self {
        InjectionResult {
            success: true,
            error: None,
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        InjectionResult {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_form_wire_layout() {
        let mut fields = FieldMap::new();
        fields.insert("titolo".to_string(), "iPhone 13".to_string());
        let message = Message::CompileForm(CompileRequest {
            marketplace: "subito".to_string(),
            fields,
        });

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["action"], "compile_form");
        assert_eq!(json["data"]["marketplace"], "subito");
        assert_eq!(json["data"]["fields"]["titolo"], "iPhone 13");

        let back: Message = serde_json::from_value(json).unwrap();
        assert_eq!(back, message);
    }

    #[test]
    fn test_success_result_omits_error_field() {
        let json = serde_json::to_string(&InjectionResult::ok()).unwrap();
        assert_eq!(json, r#"{"success":true}"#);
    }

    #[test]
    fn test_failure_result_carries_error() {
        let json = serde_json::to_value(InjectionResult::fail("boom")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
    }
}
