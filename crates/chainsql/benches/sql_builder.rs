use chainsql::{Dialect, SqlBuilder, Value, on, on_and, var};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// SELECT col0, col1, ... FROM t WHERE col0 = 0 AND col1 = 1 ...
fn build_select(n: usize) -> SqlBuilder {
    let cols: Vec<String> = (0..n).map(|i| format!("col{i}")).collect();
    let mut sb = SqlBuilder::new(Dialect::MySql);
    sb.select(&cols).from(["t"]);
    for (i, col) in cols.iter().enumerate() {
        sb.and_where(col, "=", i as i64);
    }
    sb
}

fn bench_build_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/build_select");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut sb = build_select(n);
                sb.build_select();
                black_box(sb.sql().len());
            });
        });
    }

    group.finish();
}

fn bench_bulk_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/bulk_insert");

    for n in [5, 20, 100, 500] {
        let rows: Vec<Vec<Value>> = (0..n)
            .map(|i| vec![Value::from(i as i64), Value::from(format!("user's #{i}")), var("now()").into()])
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(n), &rows, |b, rows| {
            b.iter(|| {
                let mut sb = SqlBuilder::new(Dialect::MySql);
                sb.fields(["id", "name", "created_at"])
                    .values_rows(rows.iter().cloned())
                    .insert_into("users")
                    .build_bulk_insert();
                black_box(sb.sql().len());
            });
        });
    }

    group.finish();
}

fn bench_escape(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/escape");

    for n in [16, 256, 4096] {
        let text: String = "it's a \"quote\"\n".chars().cycle().take(n).collect();
        for dialect in [Dialect::MySql, Dialect::PostgreSql] {
            group.bench_with_input(BenchmarkId::new(dialect.as_str(), n), &text, |b, text| {
                b.iter(|| black_box(chainsql::escape_str(text, dialect)));
            });
        }
    }

    group.finish();
}

fn bench_join_ons(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/join_ons");

    for n in [1, 5, 10, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut sb = SqlBuilder::new(Dialect::MySql);
                sb.select(["*"]).from(["a"]);
                for i in 0..n {
                    sb.left_join_ons(
                        &format!("t{i}"),
                        [on(format!("t{i}.a_id"), "=", var("a.id")), on_and(format!("t{i}.live"), "=", true)],
                    );
                }
                sb.build_select();
                black_box(sb.sql().len());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build_select,
    bench_bulk_insert,
    bench_escape,
    bench_join_ons
);
criterion_main!(benches);
