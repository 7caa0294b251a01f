//! Indicator CSV export.
//!
//! Columns: `Pilar, Indicador, Valor_Atual, Meta_<period>, Unidade,
//! Performance`. The target column is named after the dataset's reference
//! period. File names carry date and minute:
//! `indicadores_esg_YYYYMMDD_HHMM.csv`.

use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::EsgExportError;
use crate::performance::ScoredIndicator;

/// `indicadores_esg_YYYYMMDD_HHMM.csv`
pub fn csv_file_name(at: NaiveDateTime) -> String {
    format!("indicadores_esg_{}.csv", at.format("%Y%m%d_%H%M"))
}

/// Header row for a given reference period.
pub fn header(reference_period: &str) -> [String; 6] {
    [
        "Pilar".to_string(),
        "Indicador".to_string(),
        "Valor_Atual".to_string(),
        format!("Meta_{reference_period}"),
        "Unidade".to_string(),
        "Performance".to_string(),
    ]
}

/// Write `indicators` as CSV.
pub fn write_csv<W: io::Write>(
    writer: W,
    reference_period: &str,
    indicators: &[ScoredIndicator],
) -> Result<(), EsgExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(header(reference_period))?;
    for s in indicators {
        let ind = &s.indicator;
        wtr.write_record([
            ind.pillar.as_str().to_string(),
            ind.name.clone(),
            ind.current.to_string(),
            ind.target.to_string(),
            ind.unit.clone(),
            s.performance.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the export into `dir` and return its path.
pub fn write_csv_file(
    dir: &Path,
    at: NaiveDateTime,
    reference_period: &str,
    indicators: &[ScoredIndicator],
) -> Result<PathBuf, EsgExportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(csv_file_name(at));
    let mut buf = Vec::new();
    write_csv(&mut buf, reference_period, indicators)?;
    std::fs::write(&path, &buf)?;
    tracing::info!(path = %path.display(), rows = indicators.len(), "wrote esg indicator csv");
    Ok(path)
}
