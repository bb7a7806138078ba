use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sqlcanon_core::common::CommonDialect;
use sqlcanon_lexer::Lexer;

fn tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    let input1 = "SELECT * FROM table WHERE 1 = 1";
    let input2 = "
        WITH derived AS (
            SELECT MAX(a) AS max_a,
               COUNT(b) AS b_num,
               user_id
            FROM TABLE
            GROUP BY user_id
        )
        SELECT * FROM table
        LEFT JOIN derived USING (user_id)
        ";

    let dialect = CommonDialect::default();

    group.bench_function("sqlcanon-lexer 1", |b| {
        b.iter(|| {
            let mut lexer = Lexer::new(&dialect, input1);
            let _tokens = black_box(lexer.tokenize().unwrap());
        });
    });

    group.bench_function("sqlcanon-lexer 2", |b| {
        b.iter(|| {
            let mut lexer = Lexer::new(&dialect, input2);
            let _tokens = black_box(lexer.tokenize().unwrap());
        });
    });
}

criterion_group!(benches, tokenize);
criterion_main!(benches);
