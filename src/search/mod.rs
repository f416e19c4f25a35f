//! Scan generated documents for records whose fields equal given values and
//! copy the matching files elsewhere.

pub mod files;

use crate::record::{is_field_name, FIELD_NAMES};
use crate::xml::reader::{read_items, ItemFields};
use anyhow::Context;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

pub const DEFAULT_COPY_DIR: &str = "XMLs_out";

/// One `field=value` equality test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub field: String,
    pub value: String,
}

impl FromStr for Criterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", s))?;
        let field = field.trim();
        if field.is_empty() {
            return Err(format!("missing field name in '{}'", s));
        }
        Ok(Self {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

impl Criterion {
    pub fn matches(&self, fields: &ItemFields) -> bool {
        fields
            .iter()
            .any(|(tag, text)| *tag == self.field && *text == self.value)
    }
}

#[derive(Debug, Default)]
pub struct SearchStats {
    pub files_scanned: u64,
    pub matches: Vec<PathBuf>,
    pub files_copied: u64,
    /// Files that could not be read or parsed, with the reason.
    pub failures: Vec<(PathBuf, String)>,
}

pub struct SearchConfig {
    pub criteria: Vec<Criterion>,
    pub copy_to: Option<PathBuf>,
    pub threads: usize,
    pub dry_run: bool,
    pub progress_fn: Option<Box<dyn Fn(u64) + Send + Sync>>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            criteria: Vec::new(),
            copy_to: None,
            threads: 1,
            dry_run: false,
            progress_fn: None,
        }
    }
}

enum Outcome {
    Matched(PathBuf),
    NoMatch,
    Failed(PathBuf, String),
}

pub struct Searcher {
    files: Vec<PathBuf>,
    config: SearchConfig,
}

impl Searcher {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            config: SearchConfig::default(),
        }
    }

    pub fn with_criteria(mut self, criteria: Vec<Criterion>) -> Self {
        self.config.criteria = criteria;
        self
    }

    pub fn with_copy_to(mut self, dir: PathBuf) -> Self {
        self.config.copy_to = Some(dir);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.config.threads = threads.max(1);
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    pub fn with_progress<F: Fn(u64) + Send + Sync + 'static>(mut self, f: F) -> Self {
        self.config.progress_fn = Some(Box::new(f));
        self
    }

    pub fn search(self) -> anyhow::Result<SearchStats> {
        self.validate_criteria()?;

        let outcomes = if self.config.threads > 1 && self.files.len() > 1 {
            self.scan_parallel()?
        } else {
            let scanned = AtomicU64::new(0);
            self.scan_chunk(&self.files, &scanned)
        };

        let mut stats = SearchStats {
            files_scanned: self.files.len() as u64,
            ..SearchStats::default()
        };
        for outcome in outcomes {
            match outcome {
                Outcome::Matched(path) => stats.matches.push(path),
                Outcome::NoMatch => {}
                Outcome::Failed(path, reason) => stats.failures.push((path, reason)),
            }
        }
        stats.matches.sort();
        stats.failures.sort();

        if let Some(ref dest) = self.config.copy_to {
            if !self.config.dry_run {
                stats.files_copied = copy_matches(&stats.matches, dest)?;
            }
        }

        Ok(stats)
    }

    fn validate_criteria(&self) -> anyhow::Result<()> {
        if self.config.criteria.is_empty() {
            anyhow::bail!("at least one search criterion is required");
        }
        for criterion in &self.config.criteria {
            if !is_field_name(&criterion.field) {
                anyhow::bail!(
                    "unknown field '{}' (expected one of: {})",
                    criterion.field,
                    FIELD_NAMES.join(", ")
                );
            }
        }
        Ok(())
    }

    fn scan_parallel(&self) -> anyhow::Result<Vec<Outcome>> {
        let chunk_size = self.files.len().div_ceil(self.config.threads);
        let scanned = AtomicU64::new(0);

        std::thread::scope(|scope| {
            let handles: Vec<_> = self
                .files
                .chunks(chunk_size)
                .map(|chunk| {
                    let scanned = &scanned;
                    scope.spawn(move || self.scan_chunk(chunk, scanned))
                })
                .collect();

            let mut outcomes = Vec::with_capacity(self.files.len());
            for handle in handles {
                match handle.join() {
                    Ok(chunk_outcomes) => outcomes.extend(chunk_outcomes),
                    Err(_) => return Err(anyhow::anyhow!("search worker thread panicked")),
                }
            }
            Ok(outcomes)
        })
    }

    fn scan_chunk(&self, chunk: &[PathBuf], scanned: &AtomicU64) -> Vec<Outcome> {
        chunk
            .iter()
            .map(|path| {
                let outcome = match file_matches(path, &self.config.criteria) {
                    Ok(true) => Outcome::Matched(path.clone()),
                    Ok(false) => Outcome::NoMatch,
                    Err(e) => Outcome::Failed(path.clone(), format!("{:#}", e)),
                };
                let done = scanned.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(ref progress) = self.config.progress_fn {
                    progress(done);
                }
                outcome
            })
            .collect()
    }
}

/// True when any `<item>` in the file satisfies every criterion.
pub fn file_matches(path: &Path, criteria: &[Criterion]) -> anyhow::Result<bool> {
    let content = fs::read_to_string(path)?;
    let items = read_items(&content)?;
    Ok(items
        .iter()
        .any(|fields| criteria.iter().all(|c| c.matches(fields))))
}

/// Copy matches into `dest`. Every target is checked before anything is
/// written: a match may not be copied onto itself and two matches may not
/// share a file name.
fn copy_matches(matches: &[PathBuf], dest: &Path) -> anyhow::Result<u64> {
    fs::create_dir_all(dest)
        .with_context(|| format!("failed to create directory {}", dest.display()))?;
    let dest_dir = fs::canonicalize(dest)
        .with_context(|| format!("failed to resolve directory {}", dest.display()))?;

    let mut seen: HashMap<&OsStr, &Path> = HashMap::new();
    let mut targets = Vec::with_capacity(matches.len());
    for path in matches {
        let name = path
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("no file name in {}", path.display()))?;
        if let Some(first) = seen.insert(name, path) {
            anyhow::bail!(
                "{} and {} would both be copied to {}",
                first.display(),
                path.display(),
                dest.join(name).display()
            );
        }
        let source = fs::canonicalize(path)
            .with_context(|| format!("failed to resolve {}", path.display()))?;
        if source == dest_dir.join(name) {
            anyhow::bail!(
                "cannot copy {} onto itself; choose a copy directory other than the scanned one",
                path.display()
            );
        }
        targets.push((path, dest.join(name)));
    }

    let mut copied = 0;
    for (path, target) in targets {
        fs::copy(path, &target).with_context(|| {
            format!("failed to copy {} to {}", path.display(), target.display())
        })?;
        copied += 1;
    }
    Ok(copied)
}
