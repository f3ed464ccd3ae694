//! Typed replies from page scripts and the per-field report a compile pass
//! hands back to its caller.

use crate::{Error, Result};
use gazza_core::protocol::InjectionResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What kind of control a selector chain resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Input,
    Textarea,
    Editable,
    Select,
    Widget,
}

#[derive(Debug, Deserialize)]
struct ClassifyReply {
    found: bool,
    #[serde(default)]
    kind: Option<ControlKind>,
}

/// Parse a classification reply; `None` means nothing matched the chain.
pub fn parse_classification(value: &Value) -> Result<Option<ControlKind>> {
    let reply: ClassifyReply = serde_json::from_value(value.clone())
        .map_err(|e| Error::Protocol(format!("bad classification reply {value}: {e}")))?;
    if !reply.found {
        return Ok(None);
    }
    match reply.kind {
        Some(kind) => Ok(Some(kind)),
        None => Err(Error::Protocol(format!("classification without kind: {value}"))),
    }
}

/// In-band reply from a page script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScriptOutcome {
    NotFound,
    Filled,
    Selected {
        label: String,
    },
    Already {
        label: String,
    },
    NoOption {
        #[serde(default)]
        scanned: u64,
    },
    Clicked,
    Picked {
        label: String,
    },
    Shown,
    Error {
        message: String,
    },
}

pub fn parse_outcome(value: &Value) -> Result<ScriptOutcome> {
    serde_json::from_value(value.clone())
        .map_err(|e| Error::Protocol(format!("bad script reply {value}: {e}")))
}

/// Per-field result of one compile pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FieldOutcome {
    /// Value written; `verified` is true when a read-back confirmed it.
    Filled { verified: bool },
    /// Native select or widget landed on this option label.
    Selected { label: String },
    /// The select already showed a matching option; nothing was dispatched.
    AlreadySet { label: String },
    /// The request carried no value for this field.
    NotProvided,
    /// No element matched the selector chain.
    ElementNotFound,
    /// A native select had no option containing the desired text.
    NoMatchingOption,
    /// The widget opened but no option matched; it stays open for the
    /// seller to pick by hand.
    WidgetLeftOpen,
}

impl FieldOutcome {
    /// Fields the pass actually landed a value on.
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            FieldOutcome::Filled { .. }
                | FieldOutcome::Selected { .. }
                | FieldOutcome::AlreadySet { .. }
        )
    }

    /// Fields attempted but left for the seller to handle.
    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            FieldOutcome::ElementNotFound
                | FieldOutcome::NoMatchingOption
                | FieldOutcome::WidgetLeftOpen
        )
    }
}

/// One field's line in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    pub field: &'static str,
    #[serde(flatten)]
    pub outcome: FieldOutcome,
}

/// Everything one compile pass produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompileReport {
    pub marketplace: String,
    #[serde(flatten)]
    pub result: InjectionResult,
    pub fields: Vec<FieldReport>,
}

impl CompileReport {
    pub fn applied_count(&self) -> usize {
        self.fields.iter().filter(|f| f.outcome.is_applied()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.fields.iter().filter(|f| f.outcome.is_skipped()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_script_outcomes() {
        assert_eq!(parse_outcome(&json!({"outcome": "filled"})).unwrap(), ScriptOutcome::Filled);
        assert_eq!(
            parse_outcome(&json!({"outcome": "selected", "label": "Blu"})).unwrap(),
            ScriptOutcome::Selected { label: "Blu".to_string() }
        );
        assert_eq!(
            parse_outcome(&json!({"outcome": "no_option"})).unwrap(),
            ScriptOutcome::NoOption { scanned: 0 }
        );
    }

    #[test]
    fn test_unknown_outcome_is_a_protocol_error() {
        let err = parse_outcome(&json!({"outcome": "???"})).unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
    }

    #[test]
    fn test_classification_reports_absence_as_none() {
        assert_eq!(parse_classification(&json!({"found": false})).unwrap(), None);
        assert_eq!(
            parse_classification(&json!({"found": true, "kind": "select"})).unwrap(),
            Some(ControlKind::Select)
        );
        assert!(parse_classification(&json!({"found": true})).is_err());
        assert!(parse_classification(&json!("nonsense")).is_err());
    }

    #[test]
    fn test_field_report_flattens_outcome() {
        let report = FieldReport {
            field: "titolo",
            outcome: FieldOutcome::Filled { verified: false },
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["field"], "titolo");
        assert_eq!(json["outcome"], "filled");
        assert_eq!(json["verified"], false);
    }

    #[test]
    fn test_report_counts_split_applied_from_skipped() {
        let report = CompileReport {
            marketplace: "subito".to_string(),
            result: InjectionResult::ok(),
            fields: vec![
                FieldReport { field: "titolo", outcome: FieldOutcome::Filled { verified: true } },
                FieldReport {
                    field: "categoria",
                    outcome: FieldOutcome::AlreadySet { label: "Elettronica".to_string() },
                },
                FieldReport { field: "marca", outcome: FieldOutcome::ElementNotFound },
                FieldReport { field: "colore", outcome: FieldOutcome::NotProvided },
            ],
        };
        assert_eq!(report.applied_count(), 2);
        assert_eq!(report.skipped_count(), 1);
    }
}
