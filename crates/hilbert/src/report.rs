//! Running a proof file and rendering the outcome

use crate::axioms::AxiomSet;
use crate::config::{Mode, OutputFormat, RunConfig};
use crate::deduction::{Elaboration, Elaborator, Templates};
use crate::error::{HilbertError, Result};
use crate::fol::Node;
use crate::json::{CheckReportJson, ElaborationJson};
use crate::parser::{parse_formula, ProofFile};
use crate::verifier::{Justification, ProofSession, VerificationFailure};

/// Label printed for lines no rule justifies
pub const NOT_PROVED: &str = "Not proved";

/// One proof line after checking
#[derive(Debug, Clone)]
pub struct CheckedLine {
    /// 1-based
    pub number: usize,
    pub text: String,
    pub outcome: std::result::Result<Justification, VerificationFailure>,
}

impl CheckedLine {
    pub fn label(&self) -> String {
        match &self.outcome {
            Ok(justification) => justification.to_string(),
            Err(_) => NOT_PROVED.to_string(),
        }
    }

    /// `(n) formula (justification)`
    pub fn render(&self) -> String {
        format!("({}) {} ({})", self.number, self.text, self.label())
    }
}

/// Result of checking every line of a proof
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub header: String,
    pub goal: Node,
    pub lines: Vec<CheckedLine>,
    goal_reached: bool,
}

impl CheckReport {
    pub fn failures(&self) -> impl Iterator<Item = &CheckedLine> {
        self.lines.iter().filter(|line| line.outcome.is_err())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// True if the last verified line is the goal
    pub fn goal_reached(&self) -> bool {
        self.goal_reached
    }

    pub fn is_correct(&self) -> bool {
        self.goal_reached && self.failure_count() == 0
    }

    /// Messages for stderr: one per failed line, the failure total, and a
    /// goal mismatch
    pub fn diagnostics(&self) -> Vec<String> {
        let mut messages: Vec<String> = self
            .failures()
            .filter_map(|line| match &line.outcome {
                Err(failure) => Some(incorrect_message(line.number, failure)),
                Ok(_) => None,
            })
            .collect();
        let failed = messages.len();
        if failed > 0 {
            messages.push(format!("{} of {} lines not proved", failed, self.lines.len()));
        }
        if !self.goal_reached {
            messages.push(format!("The proof does not prove {}", self.goal));
        }
        messages
    }

    /// Header, then one line per proof line
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.header);
        out.push('\n');
        for line in &self.lines {
            out.push_str(&line.render());
            out.push('\n');
        }
        out
    }
}

/// Check every line of `proof`, continuing past failures
pub fn check_proof(proof: &ProofFile, axioms: &AxiomSet) -> Result<CheckReport> {
    let hypotheses = proof
        .hypotheses
        .iter()
        .map(|text| parse_formula(text))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let goal = parse_formula(&proof.goal)?;

    let mut session = ProofSession::new(axioms, hypotheses);
    let lines: Vec<CheckedLine> = proof
        .lines
        .iter()
        .enumerate()
        .map(|(i, text)| CheckedLine {
            number: i + 1,
            text: text.clone(),
            outcome: session.check_line(text),
        })
        .collect();

    let goal_reached = session
        .last_verified()
        .map_or(false, |last| last.formula == goal);
    log::info!(
        "Checked {} lines: {} verified, {} failed",
        lines.len(),
        session.log().len(),
        lines.len() - session.log().len()
    );

    Ok(CheckReport {
        header: proof.header(),
        goal,
        lines,
        goal_reached,
    })
}

/// Outcome of discharging the last hypothesis
#[derive(Debug, Clone)]
pub enum ElaborationReport {
    Complete(Elaboration),
    /// The first line that failed to verify
    Incorrect {
        line: usize,
        failure: VerificationFailure,
    },
}

impl ElaborationReport {
    /// The output document; a failure replaces the whole proof
    pub fn render(&self) -> String {
        match self {
            ElaborationReport::Complete(elaboration) => {
                let mut out = elaboration.header();
                out.push('\n');
                for line in &elaboration.lines {
                    out.push_str(line.canonical());
                    out.push('\n');
                }
                out
            }
            ElaborationReport::Incorrect { line, failure } => {
                format!("{}\n", incorrect_message(*line, failure))
            }
        }
    }

    pub fn diagnostics(&self) -> Vec<String> {
        match self {
            ElaborationReport::Complete(elaboration) if !elaboration.concludes_goal() => {
                vec![format!("The proof does not prove {}", elaboration.goal)]
            }
            _ => Vec::new(),
        }
    }
}

/// Discharge the last hypothesis of `proof`; an incorrect proof is a report,
/// not an error
pub fn elaborate_proof(
    proof: &ProofFile,
    axioms: &AxiomSet,
    templates: &Templates,
) -> Result<ElaborationReport> {
    match Elaborator::new(axioms, templates).elaborate(proof) {
        Ok(elaboration) => {
            log::info!(
                "Elaborated {} lines into {}",
                proof.lines.len(),
                elaboration.lines.len()
            );
            Ok(ElaborationReport::Complete(elaboration))
        }
        Err(HilbertError::IncorrectProof { line, failure }) => {
            log::info!("Elaboration stopped at line {}", line);
            Ok(ElaborationReport::Incorrect { line, failure })
        }
        Err(e) => Err(e),
    }
}

/// What a run writes: the output document and messages for stderr
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub document: String,
    pub diagnostics: Vec<String>,
}

/// Process one proof file as configured
pub fn run(proof: &ProofFile, config: &RunConfig) -> Result<RunOutput> {
    let axioms = AxiomSet::standard()?;
    match config.mode {
        Mode::Check => {
            let report = check_proof(proof, &axioms)?;
            let document = match config.format {
                OutputFormat::Text => report.render(),
                OutputFormat::Json => CheckReportJson::from(&report).to_json()?,
            };
            Ok(RunOutput {
                document,
                diagnostics: report.diagnostics(),
            })
        }
        Mode::Elaborate => {
            let templates = config.load_templates()?;
            let report = elaborate_proof(proof, &axioms, &templates)?;
            let document = match config.format {
                OutputFormat::Text => report.render(),
                OutputFormat::Json => ElaborationJson::from(&report).to_json()?,
            };
            Ok(RunOutput {
                document,
                diagnostics: report.diagnostics(),
            })
        }
    }
}

/// `Proof is incorrect starting from formula N: reason`
pub fn incorrect_message(line: usize, failure: &VerificationFailure) -> String {
    HilbertError::IncorrectProof {
        line,
        failure: failure.clone(),
    }
    .to_string()
}
