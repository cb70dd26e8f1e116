use std::fmt;

use autoface_protocol::SourceLocation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
        }
    }
}

/// Advisory message reported to the host alongside generated artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub id: DiagnosticId,
    pub severity: Severity,
    pub message: String,
    pub location: Option<SourceLocation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticId {
    /// `Implements` marker without a type argument
    #[serde(rename = "AIF001")]
    MissingBaseInterface,
    /// Constraint combination C# cannot express
    #[serde(rename = "AIF002")]
    InexpressibleConstraint,
    /// Trigger marker on a non-class type
    #[serde(rename = "AIF003")]
    UnsupportedTarget,
    /// Marker option value that cannot be used
    #[serde(rename = "AIF004")]
    InvalidMarkerOption,
    /// Generation failed for one type
    #[serde(rename = "AIF005")]
    GenerationFailed,
    /// Two artifacts claimed the same file name
    #[serde(rename = "AIF006")]
    DuplicateFileName,
}

impl DiagnosticId {
    pub const fn code(self) -> &'static str {
        match self {
            Self::MissingBaseInterface => "AIF001",
            Self::InexpressibleConstraint => "AIF002",
            Self::UnsupportedTarget => "AIF003",
            Self::InvalidMarkerOption => "AIF004",
            Self::GenerationFailed => "AIF005",
            Self::DuplicateFileName => "AIF006",
        }
    }

    /// Only advisory warnings are raised; none of these may fail the host build.
    pub const fn severity(self) -> Severity {
        Severity::Warning
    }
}

impl Diagnostic {
    pub fn new(
        id: DiagnosticId,
        message: impl Into<String>,
        location: Option<SourceLocation>,
    ) -> Self {
        Self {
            id,
            severity: id.severity(),
            message: message.into(),
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{}({}): ", location.path, location.line)?;
        }
        write!(
            f,
            "{} {}: {}",
            self.severity.as_str(),
            self.id.code(),
            self.message
        )
    }
}
