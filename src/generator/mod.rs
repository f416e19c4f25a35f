//! Top-level driver: one StockItem per index, one file per StockItem.

use crate::record::{StockItem, MAX_INDEX};
use crate::writer::ItemWriter;
use crate::xml;
use anyhow::Context;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

pub const DEFAULT_COUNT: u32 = 400_000;
pub const DEFAULT_OUTPUT_DIR: &str = "xml_files";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub files_written: u64,
    pub bytes_written: u64,
    /// Seed the run used; pass it back through `with_seed` to replay.
    pub seed: u64,
    pub first: Option<String>,
    pub last: Option<String>,
}

pub struct GeneratorConfig {
    pub count: u32,
    pub seed: Option<u64>,
    pub dry_run: bool,
    pub progress_fn: Option<Box<dyn Fn(u64)>>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            seed: None,
            dry_run: false,
            progress_fn: None,
        }
    }
}

pub struct Generator {
    output_dir: PathBuf,
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.config.count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    pub fn with_progress<F: Fn(u64) + 'static>(mut self, f: F) -> Self {
        self.config.progress_fn = Some(Box::new(f));
        self
    }

    /// Generate indexes `1..=count` in order. The first failure aborts the
    /// run; files written before it stay on disk.
    pub fn generate(self) -> anyhow::Result<Stats> {
        let count = self.config.count;
        if count > MAX_INDEX {
            anyhow::bail!(
                "count {} exceeds the largest six-digit index ({})",
                count,
                MAX_INDEX
            );
        }

        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut writer = ItemWriter::new(self.output_dir);

        if !self.config.dry_run {
            writer.ensure_output_dir().with_context(|| {
                format!(
                    "failed to create output directory {}",
                    writer.output_dir().display()
                )
            })?;
        }

        let mut stats = Stats {
            files_written: 0,
            bytes_written: 0,
            seed,
            first: None,
            last: None,
        };

        for index in 1..=count {
            let item = if self.config.dry_run {
                let item = StockItem::random(index, &mut rng);
                stats.bytes_written += xml::render(&item).len() as u64;
                item
            } else {
                generate_and_write(index, &mut rng, &mut writer)?
            };

            stats.files_written += 1;
            if stats.first.is_none() {
                stats.first = Some(item.uniquename.clone());
            }
            stats.last = Some(item.uniquename);

            if let Some(ref progress) = self.config.progress_fn {
                progress(u64::from(index));
            }
        }

        if !self.config.dry_run {
            stats.bytes_written = writer.bytes_written();
        }

        Ok(stats)
    }
}

/// Build the record for `index` and write it as `<uniquename>.xml`.
pub fn generate_and_write<R: Rng>(
    index: u32,
    rng: &mut R,
    writer: &mut ItemWriter,
) -> anyhow::Result<StockItem> {
    let item = StockItem::random(index, rng);
    writer
        .write_item(&item)
        .with_context(|| format!("failed to write {}", writer.path_for(&item).display()))?;
    Ok(item)
}
