//! Non-fatal findings collected while building a graph.

use std::fmt;

/// Which list cell a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFieldKind {
    Relations,
    Services,
}

impl fmt::Display for ListFieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListFieldKind::Relations => f.write_str("relations"),
            ListFieldKind::Services => f.write_str("services"),
        }
    }
}

/// Why a single relation was not turned into an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    EmptyTarget,
    NonFiniteWeight,
    NegativeWeight,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::EmptyTarget => f.write_str("empty target id"),
            DropReason::NonFiniteWeight => f.write_str("weight is not a finite number"),
            DropReason::NegativeWeight => f.write_str("weight is negative"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    /// Row skipped because it has no id.
    MissingId,
    /// List cell text could not be parsed; treated as empty.
    MalformedList { field: ListFieldKind, text: String },
    /// List cell parsed to something other than an array; treated as empty.
    NotAList { field: ListFieldKind },
    DroppedRelation { target: String, reason: DropReason },
    /// Coordinate present but unusable; treated as absent.
    InvalidCoordinate { field: &'static str, raw: String },
}

/// A finding tied to the 1-based position of the row in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub row: usize,
    pub facility: Option<String>,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// True when the whole row was discarded.
    pub fn skipped_row(&self) -> bool {
        matches!(self.kind, DiagnosticKind::MissingId)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}", self.row)?;
        if let Some(code) = &self.facility {
            write!(f, " ({})", code)?;
        }
        match &self.kind {
            DiagnosticKind::MissingId => write!(f, ": missing id, row skipped"),
            DiagnosticKind::MalformedList { field, text } => {
                write!(f, ": could not parse {} -> {}", field, text)
            }
            DiagnosticKind::NotAList { field } => write!(f, ": {} is not a list", field),
            DiagnosticKind::DroppedRelation { target, reason } => {
                write!(f, ": relation to '{}' dropped ({})", target, reason)
            }
            DiagnosticKind::InvalidCoordinate { field, raw } => {
                write!(f, ": {} '{}' ignored", field, raw)
            }
        }
    }
}
