use std::io::Write;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::info;

use crate::attributes::ATTRIBUTES;
use crate::error::Result;
use crate::player::{CANONICAL_COLUMNS, CanonicalTable, Player};
use crate::shortlist::Shortlist;
use crate::value::EXPIRES_FORMAT;

pub const SHORTLIST_COLUMNS: [&str; 12] = [
    "name",
    "score",
    "age",
    "nation",
    "height",
    "weight",
    "style",
    "club",
    "division",
    "transfer_value",
    "wages",
    "expires",
];

pub fn shortlist_rows(shortlist: &Shortlist) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(shortlist.rows.len() + 1);
    rows.push(SHORTLIST_COLUMNS.iter().map(|c| c.to_string()).collect());
    for row in &shortlist.rows {
        let p = &row.player;
        rows.push(vec![
            p.name.clone(),
            format_score(row.score),
            opt_to_string(p.age),
            opt_to_string(p.nation.as_deref()),
            opt_to_string(p.height),
            opt_to_string(p.weight),
            opt_to_string(p.style.as_deref()),
            opt_to_string(p.club.as_deref()),
            opt_to_string(p.division.as_deref()),
            opt_to_string(p.transfer_value.as_deref()),
            p.wages.map(format_number).unwrap_or_default(),
            expires_text(p),
        ]);
    }
    rows
}

pub fn write_shortlist_xlsx(path: &Path, shortlist: &Shortlist) -> Result<()> {
    let rows = shortlist_rows(shortlist);
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name(&shortlist.position))?;
        write_rows(sheet, &rows)?;
        sheet.set_freeze_panes(1, 0)?;
    }
    workbook.save(path)?;
    info!(path = %path.display(), rows = rows.len() - 1, "wrote shortlist workbook");
    Ok(())
}

pub fn write_shortlist_csv<W: Write>(out: W, shortlist: &Shortlist) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in shortlist_rows(shortlist) {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn canonical_header() -> Vec<&'static str> {
    CANONICAL_COLUMNS
        .iter()
        .chain(ATTRIBUTES.iter())
        .copied()
        .collect()
}

pub fn write_canonical_csv<W: Write>(out: W, table: &CanonicalTable) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(canonical_header())?;
    for p in table {
        let mut record = vec![
            p.name.clone(),
            p.position.clone(),
            opt_to_string(p.best_pos.as_deref()),
            opt_to_string(p.age),
            opt_to_string(p.nation.as_deref()),
            opt_to_string(p.height),
            opt_to_string(p.weight),
            opt_to_string(p.club.as_deref()),
            opt_to_string(p.transfer_value.as_deref()),
            finite_to_string(p.min_value),
            finite_to_string(p.max_value),
            p.wages.map(format_number).unwrap_or_default(),
            expires_text(p),
            opt_to_string(p.division.as_deref()),
            opt_to_string(p.style.as_deref()),
            opt_to_string(p.feet),
        ];
        record.extend(
            p.attributes
                .iter()
                .map(|(_, v)| v.map(format_number).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    let bold = Format::new().set_bold();
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            if row_idx == 0 {
                worksheet.write_string_with_format(0, col_idx as u16, value, &bold)?;
            } else {
                worksheet.write_string(row_idx as u32, col_idx as u16, value)?;
            }
        }
    }
    Ok(())
}

fn sheet_name(position: &str) -> String {
    let cleaned: String = position
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    if cleaned.trim().is_empty() {
        "Shortlist".to_string()
    } else {
        cleaned
    }
}

fn format_score(score: f64) -> String {
    if score.is_finite() {
        format!("{score:.2}")
    } else {
        String::new()
    }
}

fn format_number(value: f64) -> String {
    value.to_string()
}

fn finite_to_string(value: f64) -> String {
    if value.is_finite() {
        format_number(value)
    } else {
        String::new()
    }
}

fn expires_text(p: &Player) -> String {
    p.expires
        .map(|d| d.format(EXPIRES_FORMAT).to_string())
        .unwrap_or_default()
}

fn opt_to_string<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
