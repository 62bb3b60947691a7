#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// Codec benchmarks: nested parameters, the parameter store and the raw
/// encoders
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use hashq::encoding::{decode_component_safe, encode_component, form_decode, form_encode};
use hashq::{ParameterStore, nested};

const FLAT_QUERY: &str = "type=detail&id=5106&page=2&sort=name&q=rust+url+parser";
const NESTED_QUERY: &str =
    "filter[status]=open&filter[owner][name]=Ann%20Lee&filter[owner][team]=core&sort[field]=created&sort[dir]=desc&page=3";
const HASH: &str = "#/section1?tab=items&view=grid&selected=42";

/// Query strings with `count` distinct keys, `depth` bracket levels each
fn generated_query(count: usize, depth: usize) -> String {
    (0..count)
        .map(|i| {
            let brackets: String = (0..depth).map(|d| format!("[k{d}]")).collect();
            format!("key{i}{brackets}=value{i}")
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn bench_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested");
    let tree = nested::parse(NESTED_QUERY);
    let wide = generated_query(200, 1);
    let deep = generated_query(20, 8);

    group.bench_function("parse", |b| {
        b.iter(|| nested::parse(black_box(NESTED_QUERY)));
    });
    group.bench_function("stringify", |b| {
        b.iter(|| nested::stringify(black_box(&tree)));
    });
    group.bench_function("parse_wide", |b| {
        b.iter(|| nested::parse(black_box(&wide)));
    });
    group.bench_function("parse_deep", |b| {
        b.iter(|| nested::parse(black_box(&deep)));
    });

    group.finish();
}

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");
    let store = ParameterStore::new(FLAT_QUERY, HASH);

    group.bench_function("new", |b| {
        b.iter(|| ParameterStore::new(black_box(FLAT_QUERY), black_box(HASH)));
    });
    group.bench_function("to_href", |b| {
        b.iter(|| black_box(&store).to_href("/orders"));
    });
    group.bench_function("add_then_serialize", |b| {
        b.iter(|| {
            let mut store = store.clone();
            store.add([("extra", "value"), ("page", "3")]);
            store.to_string_search()
        });
    });
    group.bench_function("from_href", |b| {
        let href = store.to_href("/orders");
        b.iter(|| ParameterStore::from_href(black_box(&href)));
    });

    group.finish();
}

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");
    let text = "rust & wasm: 50% faster? café ✓";
    let encoded = encode_component(text);
    let form = form_encode(text);

    group.bench_function("encode_component", |b| {
        b.iter(|| encode_component(black_box(text)));
    });
    group.bench_function("decode_component_safe", |b| {
        b.iter(|| decode_component_safe(black_box(&encoded)));
    });
    group.bench_function("form_encode", |b| {
        b.iter(|| form_encode(black_box(text)));
    });
    group.bench_function("form_decode", |b| {
        b.iter(|| form_decode(black_box(&form)));
    });

    group.finish();
}

criterion_group!(benches, bench_nested, bench_store, bench_encoding);
criterion_main!(benches);
