use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::cleaner::clean;
use crate::error::Result;
use crate::loader::{TableFormat, decode, parse_table};
use crate::player::CanonicalTable;

pub type ContentKey = [u8; 32];

#[derive(Debug, Default)]
pub struct CleanCache {
    entries: HashMap<ContentKey, Arc<CanonicalTable>>,
    hits: u64,
    misses: u64,
}

impl CleanCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, path: &Path) -> Result<Arc<CanonicalTable>> {
        let bytes = fs::read(path)?;
        let text = decode(&bytes);
        let format = TableFormat::detect(path, &text);
        self.get_or_clean(&text, format)
    }

    pub fn get_or_clean(&mut self, text: &str, format: TableFormat) -> Result<Arc<CanonicalTable>> {
        let key = content_key(text.as_bytes(), format);
        if let Some(table) = self.entries.get(&key) {
            self.hits += 1;
            debug!(key = %short_hex(&key), "clean cache hit");
            return Ok(Arc::clone(table));
        }

        self.misses += 1;
        let raw = parse_table(text, format)?;
        let table = Arc::new(clean(&raw)?);
        debug!(key = %short_hex(&key), players = table.len(), "clean cache miss");
        self.entries.insert(key, Arc::clone(&table));
        Ok(table)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

pub fn content_key(bytes: &[u8], format: TableFormat) -> ContentKey {
    let mut hasher = Sha256::new();
    hasher.update(match format {
        TableFormat::Csv => b"csv:".as_slice(),
        TableFormat::Html => b"html:".as_slice(),
    });
    hasher.update(bytes);
    hasher.finalize().into()
}

fn short_hex(key: &ContentKey) -> String {
    key.iter().take(6).map(|b| format!("{b:02x}")).collect()
}
