use fq_core::{read_jsonl, ArticleRecord, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes `records` to `path` as JSON lines, truncating any previous file.
/// Returns the absolute path of the written file.
pub fn write_records(path: &Path, records: &[ArticleRecord]) -> Result<PathBuf> {
    let mut writer = BufWriter::new(File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    Ok(std::fs::canonicalize(path)?)
}

/// Reads a JSON lines file back. Blank lines are ignored.
pub fn read_records(path: &Path) -> Result<Vec<ArticleRecord>> {
    read_jsonl(BufReader::new(File::open(path)?))
}
