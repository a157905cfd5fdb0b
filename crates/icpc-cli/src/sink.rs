//! JSON-lines record output.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use icpc_map::RecordSink;
use icpc_model::{SubjectId, SubjectRecord};
use tracing::debug;

/// Sink that writes one JSON object per subject, ordered by subject id.
///
/// Records are held until [`RecordSink::finish`], so a subject that appears
/// twice in a sheet is written once with its last row.
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    records: BTreeMap<SubjectId, SubjectRecord>,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for JsonLinesSink {
    type Error = io::Error;

    fn accept(&mut self, record: SubjectRecord) -> io::Result<()> {
        self.records.insert(record.subject_id.clone(), record);
        Ok(())
    }

    fn finish(&mut self) -> io::Result<usize> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(&self.path)?);
        write_json_lines(&mut writer, self.records.values())?;
        writer.flush()?;
        debug!(path = %self.path.display(), records = self.records.len(), "records written");
        Ok(self.records.len())
    }
}

/// Write each record as a single JSON line.
pub fn write_json_lines<'a, W: Write>(
    writer: &mut W,
    records: impl IntoIterator<Item = &'a SubjectRecord>,
) -> io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
