use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use polar64::ecc::crc::crc16;
use polar64::ecc::polar::polar_transform;
use polar64::{DecoderConfig, PolarCode, SearchStrategy};

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("polar64_primitives");
    group.bench_function("crc16", |b| b.iter(|| crc16(black_box(0xABCDEF))));
    group.bench_function("transform", |b| {
        b.iter(|| polar_transform(black_box(0x37CD_4C2F_94A2_238C)))
    });

    let code = PolarCode::new().unwrap();
    group.bench_function("encode", |b| b.iter(|| code.encode(black_box(0xABCDEF))));
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("polar64_decode");
    let base = PolarCode::new().unwrap();
    let codeword = base.encode(0x555555);

    let cases = [
        ("clean", codeword),
        ("three_flips", codeword ^ (1 << 3) ^ (1 << 29) ^ (1 << 50)),
        ("four_flips", codeword ^ 0b1111),
    ];

    for strategy in [SearchStrategy::Sequential, SearchStrategy::Parallel] {
        let code = base
            .clone()
            .with_config(DecoderConfig::new().with_strategy(strategy));
        for (name, word) in cases {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", strategy), name),
                &word,
                |b, &word| b.iter(|| code.decode(black_box(word))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_primitives, bench_decode);
criterion_main!(benches);
