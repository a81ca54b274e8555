//! Pipeline benchmark: raw records → validated flow → 12 features.

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flowsense::config::FeaturesConfig;
use flowsense::features::FeatureExtractor;
use flowsense::packets::{self, RawPacket};

fn make_flow(n: usize) -> Vec<RawPacket> {
    let base = NaiveDate::from_ymd_opt(2025, 3, 19)
        .and_then(|d| d.and_hms_opt(15, 43, 22))
        .unwrap();
    (0..n)
        .map(|i| {
            let ts = base + Duration::microseconds((i as i64) * 1_500 + (i as i64 % 7) * 400_000);
            let ts = ts.format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
            if i % 3 == 0 {
                RawPacket::new(ts, "10.0.0.2", 80, "10.0.0.1", 54321)
            } else {
                RawPacket::new(ts, "10.0.0.1", 54321, "10.0.0.2", 80)
            }
        })
        .collect()
}

fn bench_validate(c: &mut Criterion) {
    let records = make_flow(100);
    c.bench_function("validate_100_packets", |b| {
        b.iter(|| black_box(packets::validate(black_box(&records))).unwrap())
    });
}

fn bench_extract_by_len(c: &mut Criterion) {
    let extractor = FeatureExtractor::new(FeaturesConfig::default());
    let mut g = c.benchmark_group("extract_by_len");
    for n in [2, 16, 128, 1024] {
        let flow = packets::validate(&make_flow(n)).unwrap();
        g.bench_with_input(BenchmarkId::from_parameter(n), &flow, |b, flow| {
            b.iter(|| black_box(extractor.extract(flow)))
        });
    }
    g.finish();
}

criterion_group!(benches, bench_validate, bench_extract_by_len);
criterion_main!(benches);
