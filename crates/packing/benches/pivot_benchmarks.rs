use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};

use tradedocs_packing::{
    build_relational, parse_tokens, ModuleA, ModuleAKind, ModuleB, ModuleBKind, PackingListDraft,
};

/// `boxes` A1 rows, one box each.
fn module_a_rows(boxes: usize) -> Value {
    Value::Array(
        (1..=boxes)
            .map(|n| {
                json!({
                    "boxNumbers": n.to_string(),
                    "description": format!("Material {}", n % 7),
                    "qty": n % 5 + 1,
                    "l": 40, "w": 30, "h": 20,
                    "netWt": "12.5",
                    "grossWt": "14"
                })
            })
            .collect(),
    )
}

/// Every item spread over a window of three boxes, so neighbours share boxes.
fn module_b_rows(items: usize, boxes: usize) -> Value {
    Value::Array(
        (1..=items)
            .map(|n| {
                let start = (n % boxes).max(1);
                let end = (start + 2).min(boxes);
                json!({"itemNumber": n.to_string(), "boxNumbers": format!("{start}-{end}")})
            })
            .collect(),
    )
}

fn bench_token_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_parsing");
    for span in [10usize, 1_000, 9_999] {
        let raw = format!("A,B,1-{span},C-1");
        group.throughput(Throughput::Elements(span as u64));
        group.bench_with_input(BenchmarkId::new("expand_range", span), &raw, |b, raw| {
            b.iter(|| parse_tokens(black_box(raw)).map(|t| t.len()))
        });
    }
    group.finish();
}

fn bench_relational_pivot(c: &mut Criterion) {
    let mut group = c.benchmark_group("relational_pivot");
    for size in [10usize, 100, 1_000] {
        let module_a = ModuleA::from_payload(Some(ModuleAKind::A1), &module_a_rows(size));
        let module_b = ModuleB::from_payload(Some(ModuleBKind::B2), &module_b_rows(size, size));

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("build_relational", size), &size, |b, _| {
            b.iter(|| build_relational(black_box(&module_a), black_box(&module_b), "USD"))
        });
    }
    group.finish();
}

fn bench_create_and_print(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_and_print");
    let body = json!({
        "packingListNo": "BENCH-1",
        "moduleAType": "A1",
        "moduleA": module_a_rows(200),
        "moduleBType": "B2",
        "moduleB": module_b_rows(200, 200)
    });

    group.bench_function("draft_to_print_view", |b| {
        b.iter(|| {
            let draft: PackingListDraft = serde_json::from_value(black_box(body.clone()))
                .expect("bench body deserializes");
            let list = draft.into_document().expect("bench body is valid");
            list.print_view().items.len()
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_token_parsing,
    bench_relational_pivot,
    bench_create_and_print
);
criterion_main!(benches);
