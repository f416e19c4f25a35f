use super::GenerateArgs;
use crate::generator::Generator;
use crate::progress::file_progress_bar;
use serde::Serialize;
use std::time::Instant;

/// JSON output for the generate command
#[derive(Serialize)]
pub(crate) struct GenerateJsonOutput {
    output_dir: String,
    seed: u64,
    dry_run: bool,
    statistics: GenerateStatistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last: Option<String>,
}

#[derive(Serialize)]
pub(crate) struct GenerateStatistics {
    files_written: u64,
    bytes_written: u64,
    elapsed_secs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    files_per_sec: Option<f64>,
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let GenerateArgs {
        output,
        count,
        seed,
        progress,
        dry_run,
        verbose,
        json,
    } = args;

    let mut generator = Generator::new(output.clone())
        .with_count(count)
        .with_dry_run(dry_run);
    if let Some(seed) = seed {
        generator = generator.with_seed(seed);
    }

    let start_time = Instant::now();

    let stats = if progress && !json {
        let pb = file_progress_bar(u64::from(count));
        let pb_clone = pb.clone();
        generator = generator.with_progress(move |done| pb_clone.set_position(done));

        let stats = generator.generate()?;
        pb.finish_with_message("done");
        stats
    } else {
        generator.generate()?
    };

    let elapsed = start_time.elapsed();
    let files_per_sec = if elapsed.as_secs_f64() > 0.0 {
        Some(stats.files_written as f64 / elapsed.as_secs_f64())
    } else {
        None
    };

    if json {
        let output_json = GenerateJsonOutput {
            output_dir: output.display().to_string(),
            seed: stats.seed,
            dry_run,
            statistics: GenerateStatistics {
                files_written: stats.files_written,
                bytes_written: stats.bytes_written,
                elapsed_secs: elapsed.as_secs_f64(),
                files_per_sec,
            },
            first: stats.first,
            last: stats.last,
        };
        println!("{}", serde_json::to_string_pretty(&output_json)?);
        return Ok(());
    }

    if dry_run {
        println!("✓ Dry run completed!");
        println!(
            "Would generate {} XML files in the '{}' directory.",
            with_thousands(stats.files_written),
            output.display()
        );
    } else {
        println!(
            "{} XML files have been generated in the '{}' directory.",
            with_thousands(stats.files_written),
            output.display()
        );
    }

    if verbose {
        println!("\nStatistics:");
        println!("  Files: {}", stats.files_written);
        if let (Some(first), Some(last)) = (&stats.first, &stats.last) {
            println!("  Range: {} .. {}", first, last);
        }
        println!(
            "  Bytes {}: {:.2} MB",
            if dry_run { "rendered" } else { "written" },
            stats.bytes_written as f64 / (1024.0 * 1024.0)
        );
        println!("  Seed: {}", stats.seed);
        println!("  Elapsed time: {:.3?}", elapsed);
        if let Some(rate) = files_per_sec {
            println!("  Throughput: {:.0} files/s", rate);
        }
    }

    Ok(())
}

/// Format a count with comma thousands separators (400000 -> "400,000").
fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
