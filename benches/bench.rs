use criterion::{black_box, criterion_group, criterion_main, Criterion};

use linepat::{Expr, Match, Pattern, PatternBuilder};

fn key_value_lines(records: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for i in 0..records {
        lines.push(format!("Package: tool-{}", i));
        lines.push(format!("Version: 1.{}", i));
        lines.push("Description: a tool".to_string());
        lines.push(" with a continuation line".to_string());
        lines.push(String::new());
    }
    lines
}

fn key_value_pattern() -> Pattern {
    let expr = Expr::concat(vec![
        Expr::group(0, Expr::regex(r"^[A-Za-z0-9-]+: ").unwrap()),
        Expr::group(1, Expr::star(Expr::regex("^ ").unwrap())),
    ]);
    Pattern::new(&expr).unwrap()
}

fn bench_find_iter(c: &mut Criterion) {
    let pattern = key_value_pattern();
    let lines = key_value_lines(200);
    c.bench_function("find_iter_key_value", |b| {
        b.iter(|| {
            let count = pattern.find_iter(black_box(&lines)).count();
            black_box(count);
        });
    });
}

fn bench_gsub(c: &mut Criterion) {
    let pattern = Pattern::new(&Expr::regex(r"^\s*$").unwrap()).unwrap();
    let lines = key_value_lines(200);
    c.bench_function("gsub_drop_blank_lines", |b| {
        b.iter(|| {
            let out = pattern
                .gsub(black_box(&lines), |_: &Match<String>| Vec::new())
                .unwrap();
            black_box(out);
        });
    });
}

fn bench_split(c: &mut Criterion) {
    let pattern = Pattern::new(&Expr::regex(r"^$").unwrap()).unwrap();
    let lines = key_value_lines(200);
    c.bench_function("split_records_on_blank", |b| {
        b.iter(|| {
            let segments = pattern
                .split(black_box(&lines))
                .collect::<Result<Vec<_>, _>>()
                .unwrap();
            black_box(segments);
        });
    });
}

fn bench_bounded_backtracking(c: &mut Criterion) {
    let expr = Expr::star(Expr::star(Expr::any())).then(Expr::text("!"));
    let pattern = PatternBuilder::new().step_limit(10_000).build(&expr).unwrap();
    let lines = vec!["x"; 32];
    c.bench_function("bounded_catastrophic_backtracking", |b| {
        b.iter(|| {
            let result = pattern.find(black_box(&lines));
            black_box(result.is_err());
        });
    });
}

criterion_group!(
    benches,
    bench_find_iter,
    bench_gsub,
    bench_split,
    bench_bounded_backtracking
);
criterion_main!(benches);
