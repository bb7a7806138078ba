use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sqlcanon_core::common::CommonDialect;
use sqlcanon_parser::Parser;

fn parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let dialect = CommonDialect::default();

    let query = "SELECT * FROM table1 WHERE id = 1";
    group.bench_function("sqlcanon-parser query1", |b| {
        b.iter(|| {
            let _stmt = black_box(
                Parser::new_with_sql(&dialect, query)
                    .unwrap()
                    .parse_statement()
                    .unwrap(),
            );
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
        OFFSET 20 ROWS
        FETCH FIRST 100 ROWS ONLY
        ";
    group.bench_function("sqlcanon-parser query2", |b| {
        b.iter(|| {
            let _stmt = black_box(
                Parser::new_with_sql(&dialect, query)
                    .unwrap()
                    .parse_statement()
                    .unwrap(),
            );
        });
    });
}

criterion_group!(benches, parse);
criterion_main!(benches);
