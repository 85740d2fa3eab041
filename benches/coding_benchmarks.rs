use criterion::{black_box, criterion_group, criterion_main, Criterion};
use huffman_text::{frequency, tree::build_tree, CodeTable};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn skewed_text(len: usize) -> String {
    let alphabet: Vec<char> = "etaoinshrdlucmfwypvbgkjqxz ".chars().collect();
    let weights: Vec<u32> = (1..=alphabet.len() as u32).rev().collect();
    let dist = WeightedIndex::new(&weights).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    (0..len).map(|_| alphabet[dist.sample(&mut rng)]).collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_text");
    let text = skewed_text(10_000);

    group.bench_function("count", |b| b.iter(|| frequency::count(black_box(&text))));

    let freq = frequency::count(&text);
    group.bench_function("build_tree", |b| b.iter(|| build_tree(black_box(&freq)).unwrap()));

    let table = CodeTable::derive_from(&build_tree(&freq).unwrap());
    group.bench_function("encode", |b| b.iter(|| table.encode(black_box(&text)).unwrap()));

    let bits = table.encode(&text).unwrap();
    group.bench_function("decode", |b| b.iter(|| table.decode(black_box(&bits))));

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
