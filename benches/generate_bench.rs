use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stock_xml_gen::generator::Generator;
use stock_xml_gen::record::StockItem;
use stock_xml_gen::xml;
use tempfile::TempDir;

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("record");
    group.throughput(Throughput::Elements(1));

    group.bench_function("random", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut index = 0u32;
        b.iter(|| {
            index = index % 999_999 + 1;
            StockItem::random(index, &mut rng)
        })
    });

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let item = StockItem::random(1, &mut rng);
    group.bench_function("render", |b| b.iter(|| xml::render(&item)));

    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.sample_size(10);

    for count in [100u32, 1_000] {
        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_with_input(BenchmarkId::new("files", count), &count, |b, &count| {
            b.iter_with_setup(
                || TempDir::new().unwrap(),
                |temp_dir| {
                    Generator::new(temp_dir.path().join("xml_files"))
                        .with_count(count)
                        .with_seed(7)
                        .generate()
                        .unwrap()
                },
            )
        });

        group.bench_with_input(BenchmarkId::new("dry_run", count), &count, |b, &count| {
            b.iter(|| {
                Generator::new("unused".into())
                    .with_count(count)
                    .with_seed(7)
                    .with_dry_run(true)
                    .generate()
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_generate);
criterion_main!(benches);
