//! # Compliance Export
//!
//! Two file formats:
//!
//! - **CSV**: UTF-8, comma-delimited, one header row. Headers are the
//!   display labels from [`DISPLAY_COLUMNS`]; the records themselves keep
//!   their raw keys. [`read_csv`] parses such a file back into a
//!   validated [`ComplianceDataset`].
//! - **XLSX**: a workbook with three sheets. `Conformidades` holds the
//!   records under their raw column keys, `Resumo_Dimensoes` the
//!   per-dimension counts and rate, `Nao_Conformidades` the
//!   non-conformities per priority.
//!
//! File names carry the export date, see [`csv_file_name`] and
//! [`xlsx_file_name`].

use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};

use mejc_core::{ComplianceDataset, ComplianceRecord, ComplianceStatus, Dimension, Priority, QuestionId};

use crate::error::ExportError;
use crate::metrics::{by_dimension, non_conformities_by_priority};

/// Raw column key to display label, in column order.
pub const DISPLAY_COLUMNS: [(&str, &str); 6] = [
    ("questão", "Questão"),
    ("descrição", "Descrição"),
    ("dimensão", "Dimensão"),
    ("fonte", "Fonte"),
    ("status", "Status"),
    ("prioridade", "Prioridade"),
];

/// Worksheet names, in workbook order.
pub const SHEET_NAMES: [&str; 3] = ["Conformidades", "Resumo_Dimensoes", "Nao_Conformidades"];

/// Record with display-label field names. Field order is column order.
#[derive(Debug, Serialize, Deserialize)]
struct DisplayRow {
    #[serde(rename = "Questão")]
    id: QuestionId,
    #[serde(rename = "Descrição")]
    description: String,
    #[serde(rename = "Dimensão")]
    dimension: Dimension,
    #[serde(rename = "Fonte")]
    source: String,
    #[serde(rename = "Status")]
    status: ComplianceStatus,
    #[serde(rename = "Prioridade")]
    priority: Priority,
}

impl From<&ComplianceRecord> for DisplayRow {
    fn from(r: &ComplianceRecord) -> Self {
        Self {
            id: r.id.clone(),
            description: r.description.clone(),
            dimension: r.dimension,
            source: r.source.clone(),
            status: r.status,
            priority: r.priority,
        }
    }
}

impl From<DisplayRow> for ComplianceRecord {
    fn from(row: DisplayRow) -> Self {
        Self {
            id: row.id,
            description: row.description,
            dimension: row.dimension,
            source: row.source,
            status: row.status,
            priority: row.priority,
        }
    }
}

/// `conformidades_mejc_YYYYMMDD.csv`
pub fn csv_file_name(date: NaiveDate) -> String {
    format!("conformidades_mejc_{}.csv", date.format("%Y%m%d"))
}

/// `IGSEST_MEJC_UFRN_YYYYMMDD.xlsx`
pub fn xlsx_file_name(date: NaiveDate) -> String {
    format!("IGSEST_MEJC_UFRN_{}.xlsx", date.format("%Y%m%d"))
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Write `records` as display-labelled CSV.
pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<(), ExportError>
where
    W: io::Write,
    I: IntoIterator<Item = &'a ComplianceRecord>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    let mut rows = 0usize;
    for record in records {
        wtr.serialize(DisplayRow::from(record))?;
        rows += 1;
    }
    if rows == 0 {
        // serialize() emits the header lazily; an empty export still gets one.
        wtr.write_record(DISPLAY_COLUMNS.iter().map(|(_, label)| *label))?;
    }
    wtr.flush()?;
    Ok(())
}

/// [`write_csv`] into a byte buffer.
pub fn to_csv_bytes<'a, I>(records: I) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = &'a ComplianceRecord>,
{
    let mut buf = Vec::new();
    write_csv(&mut buf, records)?;
    Ok(buf)
}

/// Parse a display-labelled CSV back into a validated dataset.
pub fn read_csv<R: io::Read>(reader: R) -> Result<ComplianceDataset, ExportError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in rdr.deserialize::<DisplayRow>() {
        records.push(ComplianceRecord::from(row?));
    }
    Ok(ComplianceDataset::from_records(records)?)
}

/// Write the CSV export into `dir` and return its path.
pub fn write_csv_file<'a, I>(dir: &Path, date: NaiveDate, records: I) -> Result<PathBuf, ExportError>
where
    I: IntoIterator<Item = &'a ComplianceRecord>,
{
    std::fs::create_dir_all(dir)?;
    let path = dir.join(csv_file_name(date));
    let bytes = to_csv_bytes(records)?;
    std::fs::write(&path, &bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote compliance csv");
    Ok(path)
}

// ---------------------------------------------------------------------------
// XLSX
// ---------------------------------------------------------------------------

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Build the three-sheet workbook for `records`.
pub fn build_workbook(records: &[&ComplianceRecord]) -> Result<Workbook, ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAMES[0])?;
    for (col, (key, _)) in DISPLAY_COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *key, &header)?;
    }
    for (i, r) in records.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, r.id.as_str())?;
        sheet.write_string(row, 1, r.description.as_str())?;
        sheet.write_string(row, 2, r.dimension.label())?;
        sheet.write_string(row, 3, r.source.as_str())?;
        sheet.write_string(row, 4, r.status.label())?;
        sheet.write_string(row, 5, r.priority.label())?;
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAMES[1])?;
    let columns = ["dimensão", "Conforme", "Não Conforme", "Total", "Taxa_Conformidade"];
    for (col, title) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &header)?;
    }
    for (i, d) in by_dimension(records).iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, d.dimension.label())?;
        sheet.write_number(row, 1, d.metrics.conforming as f64)?;
        sheet.write_number(row, 2, d.metrics.non_conforming as f64)?;
        sheet.write_number(row, 3, d.metrics.total as f64)?;
        sheet.write_number(row, 4, round2(d.metrics.rate))?;
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAMES[2])?;
    sheet.write_string_with_format(0, 0, "prioridade", &header)?;
    sheet.write_string_with_format(0, 1, "Quantidade", &header)?;
    let present = non_conformities_by_priority(records)
        .into_iter()
        .filter(|c| c.count > 0);
    for (i, c) in present.enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, c.priority.label())?;
        sheet.write_number(row, 1, c.count as f64)?;
    }

    Ok(workbook)
}

/// Workbook as XLSX bytes.
pub fn to_xlsx_bytes(records: &[&ComplianceRecord]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = build_workbook(records)?;
    Ok(workbook.save_to_buffer()?)
}

/// Write the workbook into `dir` and return its path.
pub fn write_xlsx_file(
    dir: &Path,
    date: NaiveDate,
    records: &[&ComplianceRecord],
) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(xlsx_file_name(date));
    let bytes = to_xlsx_bytes(records)?;
    std::fs::write(&path, &bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote compliance workbook");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterState;
    use std::collections::BTreeSet;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
    }

    #[test]
    fn file_names_carry_date() {
        assert_eq!(csv_file_name(date()), "conformidades_mejc_20250307.csv");
        assert_eq!(xlsx_file_name(date()), "IGSEST_MEJC_UFRN_20250307.xlsx");
    }

    #[test]
    fn csv_header_uses_display_labels() {
        let ds = ComplianceDataset::embedded().unwrap();
        let bytes = to_csv_bytes(ds.records()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, "Questão,Descrição,Dimensão,Fonte,Status,Prioridade");
        assert_eq!(text.lines().count(), 64);
    }

    #[test]
    fn csv_reparse_preserves_identity() {
        let ds = ComplianceDataset::embedded().unwrap();
        let bytes = to_csv_bytes(ds.records()).unwrap();
        let back = read_csv(bytes.as_slice()).unwrap();

        let key = |r: &ComplianceRecord| (r.id.clone(), r.status, r.priority);
        let before: BTreeSet<_> = ds.records().iter().map(key).collect();
        let after: BTreeSet<_> = back.records().iter().map(key).collect();
        assert_eq!(before, after);
        assert_eq!(back.records(), ds.records());
    }

    #[test]
    fn export_leaves_raw_keys_untouched() {
        let ds = ComplianceDataset::embedded().unwrap();
        to_csv_bytes(ds.records()).unwrap();
        let json = serde_json::to_value(&ds.records()[0]).unwrap();
        assert!(json.get("questão").is_some());
        assert!(json.get("Questão").is_none());
    }

    #[test]
    fn empty_export_still_has_header() {
        let bytes = to_csv_bytes(std::iter::empty()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.trim_end(), "Questão,Descrição,Dimensão,Fonte,Status,Prioridade");
        assert!(read_csv(text.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn raw_keyed_csv_is_rejected() {
        let raw = "questão,descrição,dimensão,fonte,status,prioridade\nQ1,a,Transparência,x,Conforme,Alta\n";
        assert!(matches!(read_csv(raw.as_bytes()), Err(ExportError::Csv(_))));
    }

    #[test]
    fn duplicate_ids_fail_validation_on_reparse() {
        let csv = "Questão,Descrição,Dimensão,Fonte,Status,Prioridade\n\
                   Q1,a,Transparência,x,Conforme,Alta\n\
                   Q1,b,Transparência,x,Conforme,Alta\n";
        assert!(matches!(read_csv(csv.as_bytes()), Err(ExportError::Dataset(_))));
    }

    #[test]
    fn workbook_is_zip_with_three_sheets() {
        let ds = ComplianceDataset::embedded().unwrap();
        let rows = FilterState::all().apply(ds.records());
        let bytes = to_xlsx_bytes(&rows).unwrap();
        assert_eq!(&bytes[..2], b"PK");
        let contains = |needle: &[u8]| bytes.windows(needle.len()).any(|w| w == needle);
        assert!(contains(b"xl/worksheets/sheet1.xml"));
        assert!(contains(b"xl/worksheets/sheet2.xml"));
        assert!(contains(b"xl/worksheets/sheet3.xml"));
        assert!(!contains(b"xl/worksheets/sheet4.xml"));
    }

    #[test]
    fn files_land_in_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let ds = ComplianceDataset::embedded().unwrap();
        let rows = FilterState::all().apply(ds.records());

        let csv_path = write_csv_file(dir.path(), date(), rows.iter().copied()).unwrap();
        assert!(csv_path.ends_with("conformidades_mejc_20250307.csv"));
        let reread = read_csv(std::fs::File::open(&csv_path).unwrap()).unwrap();
        assert_eq!(reread.len(), 63);

        let xlsx_path = write_xlsx_file(&dir.path().join("nested"), date(), &rows).unwrap();
        assert!(xlsx_path.exists());
    }

    #[test]
    fn rate_rounding() {
        assert_eq!(round2(100.0 * 8.0 / 19.0), 42.11);
        assert_eq!(round2(0.0), 0.0);
    }
}
