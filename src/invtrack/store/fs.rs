use super::StorageBackend;
use crate::codec::{self, INVENTORY_HEADER};
use crate::error::{InvError, Result};
use crate::model::InventoryRecord;
use std::fs;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

pub struct CsvFileBackend {
    path: PathBuf,
}

impl CsvFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persistence(&self, source: std::io::Error) -> InvError {
        InvError::Persistence {
            path: self.path.clone(),
            source,
        }
    }

    fn write_tmp(&self, tmp_path: &Path, rows: &[InventoryRecord]) -> std::io::Result<()> {
        let mut file = fs::File::create(tmp_path)?;
        writeln!(file, "{}", INVENTORY_HEADER)?;
        for row in rows {
            writeln!(file, "{}", codec::encode_record(row))?;
        }
        file.sync_all()
    }
}

impl StorageBackend for CsvFileBackend {
    fn load_rows(&self) -> Result<Vec<InventoryRecord>> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "inventory file does not exist yet, starting empty");
            return Ok(Vec::new());
        }

        let file = fs::File::open(&self.path).map_err(InvError::Io)?;
        let mut rows = Vec::new();
        let mut skipped = 0usize;

        // First line is the header.
        for (line_no, line) in codec::lossy_lines(BufReader::new(file)).enumerate().skip(1) {
            let line = line.map_err(InvError::Io)?;
            if line.trim().is_empty() {
                continue;
            }
            match codec::decode_record(&line) {
                Ok(record) => rows.push(record),
                Err(e) => {
                    skipped += 1;
                    debug!(line = line_no + 1, error = %e, "skipping malformed inventory row");
                }
            }
        }

        info!(
            path = %self.path.display(),
            loaded = rows.len(),
            skipped,
            "loaded inventory rows"
        );
        Ok(rows)
    }

    fn save_rows(&self, rows: &[InventoryRecord]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| self.persistence(e))?;
        }

        // Atomic write: a crash mid-write leaves the previous file intact.
        let tmp_path = dir.join(format!(".inventory-{}.tmp", Uuid::new_v4()));
        if let Err(e) = self.write_tmp(&tmp_path, rows) {
            let _ = fs::remove_file(&tmp_path);
            return Err(self.persistence(e));
        }
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(self.persistence(e));
        }

        debug!(path = %self.path.display(), rows = rows.len(), "rewrote inventory file");
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
