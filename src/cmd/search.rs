use crate::progress::file_progress_bar;
use crate::search::files::collect_xml_files;
use crate::search::{Criterion, Searcher};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// JSON output for the search command
#[derive(Serialize)]
pub(crate) struct SearchJsonOutput {
    input: String,
    criteria: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    copied_to: Option<String>,
    dry_run: bool,
    statistics: SearchStatistics,
    matches: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failures: Vec<SearchFailure>,
}

#[derive(Serialize)]
pub(crate) struct SearchStatistics {
    files_scanned: u64,
    files_matched: usize,
    files_copied: u64,
    files_failed: usize,
    threads: usize,
    elapsed_secs: f64,
}

#[derive(Serialize)]
pub(crate) struct SearchFailure {
    file: String,
    error: String,
}

pub fn run(
    input: PathBuf,
    criteria: Vec<Criterion>,
    output: PathBuf,
    threads: usize,
    progress: bool,
    dry_run: bool,
    json: bool,
) -> anyhow::Result<()> {
    let files = collect_xml_files(&input)?;
    let total = files.len() as u64;
    let threads = threads.max(1);
    let criteria_desc: Vec<String> = criteria
        .iter()
        .map(|c| format!("{}={}", c.field, c.value))
        .collect();

    if !json {
        println!("Scanning {} files in {}", total, input.display());
        println!("Matching: {}", criteria_desc.join(", "));
        if threads > 1 {
            println!("Threads: {}", threads);
        }
        println!();
    }

    let mut searcher = Searcher::new(files)
        .with_criteria(criteria)
        .with_threads(threads)
        .with_dry_run(dry_run)
        .with_copy_to(output.clone());

    let start_time = Instant::now();

    let stats = if progress && !json {
        let pb = file_progress_bar(total);
        let pb_clone = pb.clone();
        searcher = searcher.with_progress(move |done| pb_clone.set_position(done));

        let stats = searcher.search()?;
        pb.finish_with_message("done");
        stats
    } else {
        searcher.search()?
    };

    let elapsed = start_time.elapsed();

    if json {
        let output_json = SearchJsonOutput {
            input: input.display().to_string(),
            criteria: criteria_desc,
            copied_to: if dry_run {
                None
            } else {
                Some(output.display().to_string())
            },
            dry_run,
            statistics: SearchStatistics {
                files_scanned: stats.files_scanned,
                files_matched: stats.matches.len(),
                files_copied: stats.files_copied,
                files_failed: stats.failures.len(),
                threads,
                elapsed_secs: elapsed.as_secs_f64(),
            },
            matches: stats
                .matches
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            failures: stats
                .failures
                .iter()
                .map(|(path, error)| SearchFailure {
                    file: path.display().to_string(),
                    error: error.clone(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output_json)?);
        return Ok(());
    }

    for (path, error) in &stats.failures {
        eprintln!("Warning: failed to read {}: {}", path.display(), error);
    }

    if dry_run {
        println!("\n✓ Dry run completed!");
        println!(
            "\nWould copy {} matching files to {}:",
            stats.matches.len(),
            output.display()
        );
        for path in &stats.matches {
            println!("  - {}", path.display());
        }
    } else {
        println!("\n✓ Search completed successfully!");
    }

    println!("\nStatistics:");
    println!("  Files scanned: {}", stats.files_scanned);
    println!("  Files matched: {}", stats.matches.len());
    if !stats.failures.is_empty() {
        println!("  Files failed: {}", stats.failures.len());
    }
    println!("  Elapsed time: {:.3?}", elapsed);
    if !dry_run {
        println!(
            "\nCopied {} matching files to {}",
            stats.files_copied,
            output.display()
        );
    }

    Ok(())
}
