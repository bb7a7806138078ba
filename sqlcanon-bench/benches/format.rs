use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sqlcanon::{FormatOptions, ParseOptions};

fn format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");

    let query = "SELECT a, b + c * d FROM t1 JOIN t2 ON t1.id = t2.id WHERE a IN (1, 2, 3)";
    let tree = sqlcanon::parse(query, &ParseOptions::default()).unwrap();

    group.bench_function("sqlcanon-fmt query1", |b| {
        b.iter(|| {
            let _sql = black_box(sqlcanon::format(&tree, &FormatOptions::default()).unwrap());
        });
    });

    let query = "
        WITH derived AS (
            SELECT id1, id2
            FROM table1
            WHERE id1 > 100 AND id2 < 200
        )
        SELECT * FROM table1
        LEFT JOIN derived USING (id)
        ORDER BY id DESC
        ";
    let tree = sqlcanon::parse(query, &ParseOptions::default()).unwrap();

    group.bench_function("sqlcanon-fmt query2", |b| {
        b.iter(|| {
            let _sql = black_box(sqlcanon::format(&tree, &FormatOptions::default()).unwrap());
        });
    });
}

criterion_group!(benches, format);
criterion_main!(benches);
