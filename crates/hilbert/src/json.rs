//! JSON serialization types for proof reports

use crate::error::Result;
use crate::report::{CheckReport, CheckedLine, ElaborationReport};
use crate::verifier::Justification;
use serde::{Deserialize, Serialize};

/// JSON representation of a checked proof line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineJson {
    pub number: usize,
    pub formula: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<Justification>,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&CheckedLine> for LineJson {
    fn from(line: &CheckedLine) -> Self {
        LineJson {
            number: line.number,
            formula: line.text.clone(),
            justification: line.outcome.as_ref().ok().copied(),
            label: line.label(),
            error: line.outcome.as_ref().err().map(|e| e.to_string()),
        }
    }
}

/// JSON representation of a check-mode run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReportJson {
    pub header: String,
    pub goal: String,
    pub lines: Vec<LineJson>,
    pub failures: usize,
    pub goal_reached: bool,
}

impl From<&CheckReport> for CheckReportJson {
    fn from(report: &CheckReport) -> Self {
        CheckReportJson {
            header: report.header.clone(),
            goal: report.goal.to_string(),
            lines: report.lines.iter().map(LineJson::from).collect(),
            failures: report.failure_count(),
            goal_reached: report.goal_reached(),
        }
    }
}

impl CheckReportJson {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// JSON representation of an elaborate-mode run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result")]
pub enum ElaborationJson {
    Complete {
        header: String,
        lines: Vec<String>,
        goal_reached: bool,
    },
    Incorrect {
        line: usize,
        reason: String,
    },
}

impl From<&ElaborationReport> for ElaborationJson {
    fn from(report: &ElaborationReport) -> Self {
        match report {
            ElaborationReport::Complete(elaboration) => ElaborationJson::Complete {
                header: elaboration.header(),
                lines: elaboration.lines.iter().map(|l| l.to_string()).collect(),
                goal_reached: elaboration.concludes_goal(),
            },
            ElaborationReport::Incorrect { line, failure } => ElaborationJson::Incorrect {
                line: *line,
                reason: failure.to_string(),
            },
        }
    }
}

impl ElaborationJson {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axioms::AxiomSet;
    use crate::parser::parse_proof;
    use crate::report::check_proof;

    #[test]
    fn test_check_report_json() {
        let axioms = AxiomSet::standard().unwrap();
        let proof = parse_proof("P|-P\nP\nQ\n").unwrap();
        let report = check_proof(&proof, &axioms).unwrap();
        let json = CheckReportJson::from(&report);
        assert_eq!(json.failures, 1);
        assert!(json.goal_reached);
        let value: serde_json::Value = serde_json::from_str(&json.to_json().unwrap()).unwrap();
        assert_eq!(value["lines"][0]["justification"]["rule"], "hypothesis");
        assert_eq!(value["lines"][1]["label"], "Not proved");
        assert_eq!(value["lines"][1]["error"], "not proved");
        assert!(value["lines"][0].get("error").is_none());
    }

    #[test]
    fn test_elaboration_json_roundtrip() {
        let json = ElaborationJson::Incorrect {
            line: 3,
            reason: "not proved".to_string(),
        };
        let text = json.to_json().unwrap();
        assert!(text.contains(r#""result": "Incorrect""#));
        let back: ElaborationJson = serde_json::from_str(&text).unwrap();
        assert!(matches!(back, ElaborationJson::Incorrect { line: 3, .. }));
    }
}
