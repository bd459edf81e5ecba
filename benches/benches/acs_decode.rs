//! Benchmark suite for the ACS bit-stream decompressor.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use msagent_benches::{generate_compressed_payload, sizes, stride_for_width};
use msagent_types::acs::bitstream::decompress;
use std::hint::black_box;

fn bench_decompress_sizes(c: &mut Criterion) {
	let mut group = c.benchmark_group("acs_decompress");

	let cases = [("tiny", sizes::TINY), ("clippy_cell", sizes::CLIPPY_CELL), ("large", sizes::LARGE)];

	for (name, (width, height)) in cases {
		let target_size = (stride_for_width(width) * height) as usize;
		let payload = generate_compressed_payload(target_size);

		group.throughput(Throughput::Bytes(target_size as u64));
		group.bench_with_input(BenchmarkId::new("decompress", name), &payload, |b, payload| {
			b.iter(|| {
				let result = decompress(black_box(payload), target_size);
				black_box(result)
			});
		});
	}

	group.finish();
}

fn bench_decompress_throughput_scaling(c: &mut Criterion) {
	let mut group = c.benchmark_group("acs_decompress_scaling");

	for &target_size in &[1_024usize, 16_384, 262_144] {
		let payload = generate_compressed_payload(target_size);
		group.throughput(Throughput::Bytes(target_size as u64));
		group.bench_with_input(BenchmarkId::new("bytes", target_size), &payload, |b, payload| {
			b.iter(|| black_box(decompress(black_box(payload), target_size)));
		});
	}

	group.finish();
}

criterion_group!(benches, bench_decompress_sizes, bench_decompress_throughput_scaling);
criterion_main!(benches);
