use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{MoneyballError, Result};
use crate::table::{RawTable, text_cell};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableFormat {
    Csv,
    Html,
}

impl TableFormat {
    pub fn detect(path: &Path, text: &str) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") | Some("tsv") | Some("txt") if !looks_like_html(text) => TableFormat::Csv,
            Some("html") | Some("htm") => TableFormat::Html,
            _ if looks_like_html(text) => TableFormat::Html,
            _ => TableFormat::Csv,
        }
    }
}

pub fn load_table(path: &Path) -> Result<RawTable> {
    let bytes = fs::read(path)?;
    let text = decode(&bytes);
    let format = TableFormat::detect(path, &text);
    debug!(path = %path.display(), ?format, bytes = bytes.len(), "loading table");
    parse_table(&text, format)
}

pub fn parse_table(text: &str, format: TableFormat) -> Result<RawTable> {
    let table = match format {
        TableFormat::Csv => parse_csv(text)?,
        TableFormat::Html => parse_html_table(text)?,
    };
    if table.headers().is_empty() {
        return Err(MoneyballError::UnsupportedTable("no header row found".to_string()));
    }
    Ok(table)
}

pub fn decode(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&*text).to_string()
}

pub fn parse_csv(text: &str) -> Result<RawTable> {
    let delimiter = sniff_delimiter(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(text_cell).collect());
    }
    Ok(RawTable::new(name_blank_headers(headers), rows))
}

fn sniff_delimiter(text: &str) -> u8 {
    let first = text.lines().next().unwrap_or_default();
    // Reversed so ties resolve to the earliest candidate.
    [b',', b';', b'\t', b'|']
        .into_iter()
        .rev()
        .max_by_key(|d| first.bytes().filter(|b| b == d).count())
        .unwrap_or(b',')
}

/// Pipe-separated text exports start and end each line with `|`, which leaves a
/// blank header at either edge. Those columns get a placeholder name.
fn name_blank_headers(headers: Vec<String>) -> Vec<String> {
    headers
        .into_iter()
        .enumerate()
        .map(|(i, h)| if h.is_empty() { format!("unnamed.{i}") } else { h })
        .collect()
}

fn looks_like_html(text: &str) -> bool {
    text.to_ascii_lowercase().contains("<table")
}

pub fn parse_html_table(text: &str) -> Result<RawTable> {
    // ASCII lower-casing keeps byte offsets identical between `lc` and `text`.
    let lc = text.to_ascii_lowercase();
    let start = find_tag(&lc, "table", 0)
        .ok_or_else(|| MoneyballError::UnsupportedTable("no <table> element".to_string()))?;
    let end = lc[start..]
        .find("</table")
        .map(|i| i + start)
        .unwrap_or(lc.len());

    let mut header: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    let mut pos = start;
    while let Some(row_start) = find_tag(&lc, "tr", pos).filter(|i| *i < end) {
        let open_end = match lc[row_start..end].find('>') {
            Some(i) => row_start + i + 1,
            None => break,
        };
        let row_end = [
            lc[open_end..end].find("</tr").map(|i| i + open_end),
            find_tag(&lc, "tr", open_end).filter(|i| *i < end),
        ]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(end);

        let (cells, is_header) = row_cells(text, &lc, open_end, row_end);
        pos = row_end;
        if cells.is_empty() {
            continue;
        }
        if header.is_none() && (is_header || rows.is_empty()) {
            header = Some(cells);
            continue;
        }
        rows.push(cells.iter().map(|c| text_cell(c)).collect());
    }

    let header = header
        .ok_or_else(|| MoneyballError::UnsupportedTable("table has no rows".to_string()))?;
    Ok(RawTable::new(header, rows))
}

fn row_cells(text: &str, lc: &str, from: usize, to: usize) -> (Vec<String>, bool) {
    let mut cells = Vec::new();
    let mut any_th = false;
    let mut pos = from;
    while let Some((cell_start, is_th)) = next_cell(lc, pos, to) {
        let Some(open_end) = lc[cell_start..to].find('>').map(|i| cell_start + i + 1) else {
            break;
        };
        let cell_end = [
            lc[open_end..to].find("</td").map(|i| i + open_end),
            lc[open_end..to].find("</th").map(|i| i + open_end),
            next_cell(lc, open_end, to).map(|(i, _)| i),
        ]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(to);

        cells.push(cell_text(&text[open_end..cell_end]));
        any_th |= is_th;
        pos = cell_end;
    }
    (cells, any_th)
}

fn next_cell(lc: &str, from: usize, to: usize) -> Option<(usize, bool)> {
    let td = find_tag(lc, "td", from).filter(|i| *i < to);
    let th = find_tag(lc, "th", from).filter(|i| *i < to);
    match (td, th) {
        (Some(d), Some(h)) if h < d => Some((h, true)),
        (Some(d), _) => Some((d, false)),
        (None, Some(h)) => Some((h, true)),
        (None, None) => None,
    }
}

fn find_tag(lc: &str, name: &str, from: usize) -> Option<usize> {
    let needle = format!("<{name}");
    let mut pos = from;
    while let Some(rel) = lc.get(pos..)?.find(&needle) {
        let at = pos + rel;
        let after = lc[at + needle.len()..].chars().next();
        if matches!(after, Some(c) if c == '>' || c == '/' || c.is_whitespace()) {
            return Some(at);
        }
        pos = at + needle.len();
    }
    None
}

fn cell_text(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut in_tag = false;
    for ch in inner.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&decode_entities(&out))
}

fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|end| *end <= 10)
            .and_then(|end| entity(&tail[1..end]).map(|ch| (ch, end)));
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code);
    }
    match name {
        "nbsp" => Some(' '),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "amp" => Some('&'),
        "pound" => Some('£'),
        "euro" => Some('€'),
        _ => None,
    }
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
