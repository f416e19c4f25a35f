use crate::record::StockItem;
use crate::xml;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const WRITER_BUFFER_SIZE: usize = 4 * 1024;

/// Writes one document per file into a single output directory.
pub struct ItemWriter {
    output_dir: PathBuf,
    files_written: u64,
    bytes_written: u64,
}

impl ItemWriter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            files_written: 0,
            bytes_written: 0,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory and any missing parents. Existing
    /// directories and their contents are left alone.
    pub fn ensure_output_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.output_dir)
    }

    pub fn path_for(&self, item: &StockItem) -> PathBuf {
        self.output_dir.join(item.file_name())
    }

    /// Serialize `item` and write it to `<uniquename>.xml`, replacing any
    /// file already there.
    pub fn write_item(&mut self, item: &StockItem) -> std::io::Result<PathBuf> {
        let path = self.path_for(item);
        let document = xml::render(item);
        write_document(&path, document.as_bytes())?;

        self.files_written += 1;
        self.bytes_written += document.len() as u64;
        Ok(path)
    }

    pub fn files_written(&self) -> u64 {
        self.files_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

fn write_document(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::with_capacity(WRITER_BUFFER_SIZE, file);
    writer.write_all(bytes)?;
    writer.flush()
}
