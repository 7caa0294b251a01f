//! # Compliance Records
//!
//! The governance self-assessment: one record per IG-SEST question, tagged
//! with the governance dimension it belongs to, its conformity status and
//! the remediation priority.
//!
//! Serde names are the labels used by the assessment spreadsheet
//! (`"Conselhos e Diretoria"`, `"Não Conforme"`, `"Média"`, ...). Each enum
//! also carries an ASCII slug used by the command line, and [`FromStr`]
//! accepts either form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PanelError;

/// Question code from the IG-SEST questionnaire (`Q2`, `Q51`, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

impl QuestionId {
    /// Wrap a question code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The question code as written in the questionnaire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Governance dimension grouping related questions.
///
/// Declaration order is the canonical reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Boards, executive committee and standing commissions.
    #[serde(rename = "Conselhos e Diretoria")]
    BoardsAndDirectors,
    /// Disclosure, strategic plan and satisfaction surveys.
    #[serde(rename = "Transparência")]
    Transparency,
    /// Risk management, internal controls and audit.
    #[serde(rename = "Riscos e Controles")]
    RisksAndControls,
    /// Diversity, inclusion and community programmes.
    #[serde(rename = "Responsabilidade Social")]
    SocialResponsibility,
    /// Environmental management.
    #[serde(rename = "Sustentabilidade")]
    Sustainability,
}

/// Number of governance dimensions.
pub const DIMENSION_COUNT: usize = 5;

impl Dimension {
    /// All dimensions in canonical order.
    pub fn all() -> &'static [Dimension] {
        &[
            Self::BoardsAndDirectors,
            Self::Transparency,
            Self::RisksAndControls,
            Self::SocialResponsibility,
            Self::Sustainability,
        ]
    }

    /// Label as it appears in the assessment.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BoardsAndDirectors => "Conselhos e Diretoria",
            Self::Transparency => "Transparência",
            Self::RisksAndControls => "Riscos e Controles",
            Self::SocialResponsibility => "Responsabilidade Social",
            Self::Sustainability => "Sustentabilidade",
        }
    }

    /// ASCII identifier for command-line use.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::BoardsAndDirectors => "boards",
            Self::Transparency => "transparency",
            Self::RisksAndControls => "risks",
            Self::SocialResponsibility => "social",
            Self::Sustainability => "sustainability",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Dimension {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|d| d.label() == s || d.slug() == s)
            .ok_or_else(|| PanelError::UnknownLabel {
                kind: "dimension",
                value: s.to_string(),
            })
    }
}

/// Conformity status of a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    /// The requirement is met.
    #[serde(rename = "Conforme")]
    Conforming,
    /// The requirement is not met.
    #[serde(rename = "Não Conforme")]
    NonConforming,
}

impl ComplianceStatus {
    /// Both statuses, conforming first.
    pub fn all() -> &'static [ComplianceStatus] {
        &[Self::Conforming, Self::NonConforming]
    }

    /// Label as it appears in the assessment.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Conforming => "Conforme",
            Self::NonConforming => "Não Conforme",
        }
    }

    /// ASCII identifier for command-line use.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Conforming => "conforming",
            Self::NonConforming => "non-conforming",
        }
    }

    /// Whether the requirement is met.
    pub fn is_conforming(&self) -> bool {
        matches!(self, Self::Conforming)
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComplianceStatus {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|st| st.label() == s || st.slug() == s)
            .ok_or_else(|| PanelError::UnknownLabel {
                kind: "status",
                value: s.to_string(),
            })
    }
}

/// Remediation priority. Ordered from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Alta.
    #[serde(rename = "Alta")]
    High,
    /// Média.
    #[serde(rename = "Média")]
    Medium,
    /// Baixa.
    #[serde(rename = "Baixa")]
    Low,
}

impl Priority {
    /// All priorities, most urgent first.
    pub fn all() -> &'static [Priority] {
        &[Self::High, Self::Medium, Self::Low]
    }

    /// Label as it appears in the assessment.
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "Alta",
            Self::Medium => "Média",
            Self::Low => "Baixa",
        }
    }

    /// ASCII identifier for command-line use.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.label() == s || p.slug() == s)
            .ok_or_else(|| PanelError::UnknownLabel {
                kind: "priority",
                value: s.to_string(),
            })
    }
}

/// One answered question of the governance assessment.
///
/// Field names on the wire are the assessment's column keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComplianceRecord {
    /// Question code.
    #[serde(rename = "questão")]
    pub id: QuestionId,
    /// What the question checks.
    #[serde(rename = "descrição")]
    pub description: String,
    /// Governance dimension.
    #[serde(rename = "dimensão")]
    pub dimension: Dimension,
    /// Normative source the requirement is cited from.
    #[serde(rename = "fonte")]
    pub source: String,
    /// Conformity status.
    pub status: ComplianceStatus,
    /// Remediation priority.
    #[serde(rename = "prioridade")]
    pub priority: Priority,
}

impl ComplianceRecord {
    /// Whether this record counts towards the conformity rate numerator.
    pub fn is_conforming(&self) -> bool {
        self.status.is_conforming()
    }
}
