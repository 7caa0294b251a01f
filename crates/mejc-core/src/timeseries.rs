//! # Study Time Series
//!
//! The ten-year (2014–2023) operating table from the MEJC ESG study, and
//! the correlation coefficients the study reports.
//!
//! The correlations are citations, not derived quantities: they are
//! carried verbatim with their significance level and are never
//! recomputed from the series.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PanelError;

/// One year of the study table.
///
/// The first eight metrics are present in every version of the study. The
/// internal-control block was added for the extended report and is
/// optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeSeriesRow {
    /// Calendar year.
    pub year: u16,
    /// Headcount.
    pub employees: f64,
    /// Personnel cost, BRL millions.
    pub personnel_cost_millions: f64,
    /// Water consumption, m³.
    pub water_consumption_m3: f64,
    /// Energy consumption index, kWh.
    pub energy_consumption_kwh: f64,
    /// Absenteeism rate, percent.
    pub absenteeism_pct: f64,
    /// Sick notes with a mental-health diagnosis.
    pub mental_health_certificates: f64,
    /// Patient-days.
    pub patient_days: f64,
    /// Net equity, BRL millions.
    pub net_equity: f64,
    /// Internal audits performed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audits: Option<f64>,
    /// Conformity rate, percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conformity_pct: Option<f64>,
    /// Risks identified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risks_identified: Option<f64>,
    /// Controls implemented.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls_implemented: Option<f64>,
    /// Compliance incidents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_incidents: Option<f64>,
    /// Hours spent per audit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_hours: Option<f64>,
}

/// Column selector over [`TimeSeriesRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSeriesMetric {
    Employees,
    PersonnelCostMillions,
    WaterConsumptionM3,
    EnergyConsumptionKwh,
    AbsenteeismPct,
    MentalHealthCertificates,
    PatientDays,
    NetEquity,
    Audits,
    ConformityPct,
    RisksIdentified,
    ControlsImplemented,
    ComplianceIncidents,
    AuditHours,
}

impl TimeSeriesMetric {
    /// Every metric, core block first.
    pub fn all() -> &'static [TimeSeriesMetric] {
        &[
            Self::Employees,
            Self::PersonnelCostMillions,
            Self::WaterConsumptionM3,
            Self::EnergyConsumptionKwh,
            Self::AbsenteeismPct,
            Self::MentalHealthCertificates,
            Self::PatientDays,
            Self::NetEquity,
            Self::Audits,
            Self::ConformityPct,
            Self::RisksIdentified,
            Self::ControlsImplemented,
            Self::ComplianceIncidents,
            Self::AuditHours,
        ]
    }

    /// Column key in the study resource.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employees => "employees",
            Self::PersonnelCostMillions => "personnel_cost_millions",
            Self::WaterConsumptionM3 => "water_consumption_m3",
            Self::EnergyConsumptionKwh => "energy_consumption_kwh",
            Self::AbsenteeismPct => "absenteeism_pct",
            Self::MentalHealthCertificates => "mental_health_certificates",
            Self::PatientDays => "patient_days",
            Self::NetEquity => "net_equity",
            Self::Audits => "audits",
            Self::ConformityPct => "conformity_pct",
            Self::RisksIdentified => "risks_identified",
            Self::ControlsImplemented => "controls_implemented",
            Self::ComplianceIncidents => "compliance_incidents",
            Self::AuditHours => "audit_hours",
        }
    }

    /// Portuguese display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Employees => "Funcionários",
            Self::PersonnelCostMillions => "Custo de Pessoal (R$ mi)",
            Self::WaterConsumptionM3 => "Consumo de Água (m³)",
            Self::EnergyConsumptionKwh => "Consumo de Energia (kWh)",
            Self::AbsenteeismPct => "Absenteísmo (%)",
            Self::MentalHealthCertificates => "Atestados Saúde Mental",
            Self::PatientDays => "Pacientes-Dia",
            Self::NetEquity => "Patrimônio Líquido",
            Self::Audits => "Auditorias Realizadas",
            Self::ConformityPct => "Conformidade (%)",
            Self::RisksIdentified => "Riscos Identificados",
            Self::ControlsImplemented => "Controles Implementados",
            Self::ComplianceIncidents => "Incidentes de Conformidade",
            Self::AuditHours => "Tempo de Auditoria (h)",
        }
    }
}

impl fmt::Display for TimeSeriesMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeSeriesMetric {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| PanelError::UnknownLabel {
                kind: "time series metric",
                value: s.to_string(),
            })
    }
}

impl TimeSeriesRow {
    /// Value of `metric` for this year, `None` when the optional column is absent.
    pub fn value(&self, metric: TimeSeriesMetric) -> Option<f64> {
        match metric {
            TimeSeriesMetric::Employees => Some(self.employees),
            TimeSeriesMetric::PersonnelCostMillions => Some(self.personnel_cost_millions),
            TimeSeriesMetric::WaterConsumptionM3 => Some(self.water_consumption_m3),
            TimeSeriesMetric::EnergyConsumptionKwh => Some(self.energy_consumption_kwh),
            TimeSeriesMetric::AbsenteeismPct => Some(self.absenteeism_pct),
            TimeSeriesMetric::MentalHealthCertificates => Some(self.mental_health_certificates),
            TimeSeriesMetric::PatientDays => Some(self.patient_days),
            TimeSeriesMetric::NetEquity => Some(self.net_equity),
            TimeSeriesMetric::Audits => self.audits,
            TimeSeriesMetric::ConformityPct => self.conformity_pct,
            TimeSeriesMetric::RisksIdentified => self.risks_identified,
            TimeSeriesMetric::ControlsImplemented => self.controls_implemented,
            TimeSeriesMetric::ComplianceIncidents => self.compliance_incidents,
            TimeSeriesMetric::AuditHours => self.audit_hours,
        }
    }
}

/// A correlation coefficient as cited by the study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CitedCorrelation {
    /// The variable pair, e.g. `"Patrimônio Líquido × Absenteísmo"`.
    pub variables: String,
    /// Pearson coefficient as published.
    pub coefficient: f64,
    /// Significance level as published (`"p < 0.001"`).
    pub significance: String,
    /// The study's reading of the coefficient.
    pub interpretation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core_row() -> TimeSeriesRow {
        serde_json::from_str(
            r#"{
                "year": 2014,
                "employees": 307,
                "personnel_cost_millions": 40.5,
                "water_consumption_m3": 90000,
                "energy_consumption_kwh": 280,
                "absenteeism_pct": 3.8,
                "mental_health_certificates": 85,
                "patient_days": 46729,
                "net_equity": 80
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn optional_block_defaults_to_none() {
        let row = core_row();
        assert_eq!(row.value(TimeSeriesMetric::Employees), Some(307.0));
        assert_eq!(row.value(TimeSeriesMetric::Audits), None);
        assert_eq!(row.value(TimeSeriesMetric::AuditHours), None);
    }

    #[test]
    fn optional_block_skipped_when_serializing() {
        let json = serde_json::to_string(&core_row()).unwrap();
        assert!(!json.contains("audits"));
    }

    #[test]
    fn metric_keys_roundtrip() {
        for m in TimeSeriesMetric::all() {
            assert_eq!(m.as_str().parse::<TimeSeriesMetric>().unwrap(), *m);
            let json = serde_json::to_string(m).unwrap();
            assert_eq!(json, format!("\"{}\"", m.as_str()));
        }
    }

    #[test]
    fn unknown_metric_rejected() {
        assert!("headcount".parse::<TimeSeriesMetric>().is_err());
    }
}
