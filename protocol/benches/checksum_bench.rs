// Checksum and codec benchmarks for the Thumber protocol.
//
// Covers canonicalization, HMAC signing, full request sealing, decoding, and
// verification of requests carrying inline payloads of various sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use thumber_protocol::checksum::{canonicalize, compute_checksum};
use thumber_protocol::{RequestBuilder, ThumbRequest, Transaction};

const SECRET: &str = "s3cr3t";

fn sample_request() -> ThumbRequest {
    RequestBuilder::new()
        .uid("u1")
        .callback("https://example.com/thumbs/callback")
        .url("https://example.com/uploads/report-2026.pdf")
        .mime_type("application/pdf")
        .geometry("300x300>")
        .page(3)
        .nonce("a3f1c9e07b2d4e55a3f1c9e07b2d4e55")
        .timestamp(1_790_000_000)
        .build()
}

fn bench_canonicalize(c: &mut Criterion) {
    let fields = sample_request().to_field_map();

    c.bench_function("checksum/canonicalize", |b| {
        b.iter(|| canonicalize(&fields));
    });
}

fn bench_compute_checksum(c: &mut Criterion) {
    let fields = sample_request().to_field_map();

    c.bench_function("checksum/compute", |b| {
        b.iter(|| compute_checksum(&fields, SECRET));
    });
}

fn bench_sign_request(c: &mut Criterion) {
    c.bench_function("checksum/sign_request", |b| {
        b.iter(|| {
            let mut req = sample_request();
            req.sign(SECRET).map(|_| ())
        });
    });
}

fn bench_decode_and_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("checksum/decode_verify");

    for size in [0usize, 4 * 1024, 64 * 1024, 1024 * 1024] {
        let mut req = sample_request();
        if size > 0 {
            req.set_file(vec![0xa5; size]);
        }
        req.sign(SECRET).unwrap();
        let json = req.to_json().unwrap();

        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &json, |b, json| {
            b.iter(|| {
                ThumbRequest::from_json(json)
                    .map(|decoded| decoded.is_valid_with_secret(SECRET))
                    .unwrap_or(false)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_canonicalize,
    bench_compute_checksum,
    bench_sign_request,
    bench_decode_and_verify,
);
criterion_main!(benches);
