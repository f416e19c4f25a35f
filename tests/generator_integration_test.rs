//! Integration tests for the generator: file layout and per-record contents.

use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use stock_xml_gen::generator::Generator;
use stock_xml_gen::record::{StockItem, FIELD_NAMES};
use stock_xml_gen::vocab;
use stock_xml_gen::xml::reader::read_items;
use tempfile::TempDir;

fn read_record(path: &Path) -> StockItem {
    let content = fs::read_to_string(path).unwrap();
    let items = read_items(&content).unwrap();
    assert_eq!(items.len(), 1, "{} should hold one item", path.display());
    StockItem::from_fields(&items[0]).unwrap()
}

fn file_names(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect()
}

#[test]
fn test_single_record_run() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("xml_files");

    Generator::new(out.clone()).with_count(1).generate().unwrap();

    assert_eq!(
        file_names(&out),
        BTreeSet::from(["item000001.xml".to_string()])
    );

    let content = fs::read_to_string(out.join("item000001.xml")).unwrap();
    assert!(content.starts_with("<?xml version='1.0' encoding='utf-8'?>"));

    let items = read_items(&content).unwrap();
    let tags: Vec<&str> = items[0].iter().map(|(tag, _)| tag.as_str()).collect();
    assert_eq!(tags, FIELD_NAMES);
    assert!(items[0].iter().all(|(_, text)| !text.is_empty()));

    let record = StockItem::from_fields(&items[0]).unwrap();
    assert_eq!(record.uniquename, "item000001");
}

#[test]
fn test_every_index_has_a_file_without_gaps() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().to_path_buf();

    Generator::new(out.clone())
        .with_count(250)
        .with_seed(11)
        .generate()
        .unwrap();

    let expected: BTreeSet<String> = (1..=250).map(|i| format!("item{:06}.xml", i)).collect();
    assert_eq!(file_names(&out), expected);
}

#[test]
fn test_record_fields_hold_their_invariants() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().to_path_buf();
    Generator::new(out.clone())
        .with_count(200)
        .with_seed(2024)
        .generate()
        .unwrap();

    let code_re = Regex::new(r"^[0-9]{9}$").unwrap();
    let price_re = Regex::new(r"^[0-9]+\.[0-9]{2}$").unwrap();

    for entry in fs::read_dir(&out).unwrap() {
        let path = entry.unwrap().path();
        let record = read_record(&path);

        let stem = path.file_stem().unwrap().to_string_lossy();
        assert_eq!(record.uniquename, stem);

        assert!(code_re.is_match(&record.commodity_code));
        assert!(price_re.is_match(&record.price), "price {}", record.price);
        assert!(price_re.is_match(&record.new_price), "new_price {}", record.new_price);

        let price: f64 = record.price.parse().unwrap();
        let new_price: f64 = record.new_price.parse().unwrap();
        assert!((10.0..=100.0).contains(&price), "price {}", price);
        assert!((5.0..=95.0).contains(&new_price), "new_price {}", new_price);

        assert!(vocab::LABELS.contains(&record.label.as_str()));
        assert!(vocab::STOCKROOMS.contains(&record.stockroom.as_str()));
        assert!(vocab::TYPES.contains(&record.item_type.as_str()));
        assert!(vocab::SUPPLIERS.contains(&record.supplier.as_str()));
    }
}

#[test]
fn test_seeded_runs_are_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a");
    let b = temp_dir.path().join("b");

    Generator::new(a.clone()).with_count(3).with_seed(99).generate().unwrap();
    Generator::new(b.clone()).with_count(3).with_seed(99).generate().unwrap();

    for i in 1..=3 {
        let name = format!("item{:06}.xml", i);
        assert_eq!(
            fs::read(a.join(&name)).unwrap(),
            fs::read(b.join(&name)).unwrap()
        );
    }
}

#[test]
fn test_different_seeds_differ() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a");
    let b = temp_dir.path().join("b");

    Generator::new(a.clone()).with_count(20).with_seed(1).generate().unwrap();
    Generator::new(b.clone()).with_count(20).with_seed(2).generate().unwrap();

    let differs = (1..=20).any(|i| {
        let name = format!("item{:06}.xml", i);
        fs::read(a.join(&name)).unwrap() != fs::read(b.join(&name)).unwrap()
    });
    assert!(differs);
}

#[test]
fn test_rerun_overwrites_same_file_set() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().to_path_buf();

    Generator::new(out.clone()).with_count(10).with_seed(5).generate().unwrap();
    let first = file_names(&out);
    Generator::new(out.clone()).with_count(10).with_seed(6).generate().unwrap();
    let second = file_names(&out);

    assert_eq!(first, second);
    assert_eq!(second.len(), 10);
}

#[test]
fn test_output_dir_is_not_cleared() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().to_path_buf();
    fs::write(out.join("item999999.xml"), "left over").unwrap();

    Generator::new(out.clone()).with_count(2).generate().unwrap();

    assert_eq!(fs::read_to_string(out.join("item999999.xml")).unwrap(), "left over");
    assert_eq!(file_names(&out).len(), 3);
}

#[test]
fn test_progress_reports_each_index() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let temp_dir = TempDir::new().unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_clone = Rc::clone(&seen);

    Generator::new(temp_dir.path().to_path_buf())
        .with_count(4)
        .with_progress(move |done| seen_clone.borrow_mut().push(done))
        .generate()
        .unwrap();

    assert_eq!(*seen.borrow(), vec![1, 2, 3, 4]);
}

#[test]
fn test_output_dir_creation_failure_aborts() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "a file, not a directory").unwrap();

    let err = Generator::new(blocker.join("xml_files"))
        .with_count(3)
        .generate()
        .unwrap_err();
    assert!(err.to_string().contains("failed to create output directory"));
    assert!(err.root_cause().downcast_ref::<std::io::Error>().is_some());
}

#[test]
fn test_write_failure_aborts_without_later_files() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().to_path_buf();
    // A directory squatting on the second file name makes that write fail.
    fs::create_dir(out.join("item000002.xml")).unwrap();

    let err = Generator::new(out.clone()).with_count(5).generate().unwrap_err();
    assert!(err.to_string().contains("item000002.xml"));
    assert!(out.join("item000001.xml").is_file());
    assert!(!out.join("item000003.xml").exists());
}

#[test]
fn test_boundary_index_filename() {
    let record = StockItem::random(400_000, &mut rand::rng());
    assert_eq!(record.file_name(), "item400000.xml");
}
