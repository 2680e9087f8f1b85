use criterion::{Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

use fm_moneyball::attributes::ATTRIBUTES;
use fm_moneyball::loader::{TableFormat, parse_table};
use fm_moneyball::{ShortlistRequest, WeightSpec, build_shortlist, clean, parse_value_range};

const BEST_POSITIONS: [&str; 5] = ["ST (C)", "D (C)", "M (C)", "GK", "AM (C)"];
const VALUES: [&str; 6] = [
    "£10M - £20M",
    "£850K",
    "Not for Sale",
    "Unknown",
    "£67M - £54M",
    "€1.5M - €3M",
];

fn synthetic_export(rows: usize) -> String {
    let mut rng = StdRng::seed_from_u64(7);
    let mut out = String::from(
        "Name,Position,Best Pos,Age,Nation,Height,Weight,Transfer Value,Wages,Left Foot,Right Foot",
    );
    for code in ATTRIBUTES {
        out.push(',');
        out.push_str(code);
    }
    out.push('\n');

    for i in 0..rows {
        let pos = BEST_POSITIONS[rng.gen_range(0..BEST_POSITIONS.len())];
        let value = VALUES[rng.gen_range(0..VALUES.len())];
        out.push_str(&format!(
            "Player {i},{pos},{pos},{},ENG,{} cm,{} kg,{value},\"£{},000 p/w\",Strong,Weak",
            rng.gen_range(16..38),
            rng.gen_range(165..200),
            rng.gen_range(60..95),
            rng.gen_range(1..200),
        ));
        for _ in ATTRIBUTES {
            match rng.gen_range(0..10) {
                0 => out.push_str(",-"),
                1 => {
                    let low = rng.gen_range(1..18);
                    out.push_str(&format!(",{low}-{}", low + 2));
                }
                _ => out.push_str(&format!(",{}", rng.gen_range(1..=20))),
            }
        }
        out.push('\n');
    }
    out
}

fn weights() -> WeightSpec {
    WeightSpec::from_json_str(include_str!("../data/weights.json")).unwrap()
}

fn bench_value_range_parse(c: &mut Criterion) {
    c.bench_function("value_range_parse", |b| {
        b.iter(|| {
            for raw in VALUES {
                black_box(parse_value_range(black_box(Some(raw))));
            }
        })
    });
}

fn bench_clean(c: &mut Criterion) {
    let text = synthetic_export(2_000);
    let raw = parse_table(&text, TableFormat::Csv).unwrap();
    c.bench_function("parse_csv_2000", |b| {
        b.iter(|| black_box(parse_table(black_box(&text), TableFormat::Csv).unwrap().len()))
    });
    c.bench_function("clean_2000", |b| {
        b.iter(|| black_box(clean(black_box(&raw)).unwrap().len()))
    });
}

fn bench_shortlist(c: &mut Criterion) {
    let table = clean(&parse_table(&synthetic_export(2_000), TableFormat::Csv).unwrap()).unwrap();
    let spec = weights();
    let request = ShortlistRequest::new("ST (C)").budget(50.0);
    c.bench_function("shortlist_2000", |b| {
        b.iter(|| {
            let shortlist = build_shortlist(black_box(&table), &spec, &request).unwrap();
            black_box(shortlist.rows.len());
        })
    });
}

criterion_group!(benches, bench_value_range_parse, bench_clean, bench_shortlist);
criterion_main!(benches);
