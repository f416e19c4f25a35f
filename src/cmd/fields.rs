use crate::xml::reader::{field_names, read_items};
use anyhow::Context;
use std::fs;
use std::path::PathBuf;

pub fn run(file: PathBuf) -> anyhow::Result<()> {
    let content =
        fs::read_to_string(&file).with_context(|| format!("failed to read {}", file.display()))?;
    let items =
        read_items(&content).with_context(|| format!("failed to parse {}", file.display()))?;

    let names = field_names(&items);
    if names.is_empty() {
        anyhow::bail!("no <item> fields found in {}", file.display());
    }

    println!("Searchable fields in {}:", file.display());
    for (i, name) in names.iter().enumerate() {
        println!("  {}. {}", i + 1, name);
    }

    Ok(())
}
