use casc_lexer::tokenize;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SOURCE: &str = r#"
函數 問候(名字: 字串) {
    print(名字)
}

讓 總和 賦 零
從 i 賦 一 到 一百 {
    總和 賦 總和 加 i 乘 二
}

var total 賦 0
for i 賦 1 to 100 {
    total 賦 total + i * 2
}

如果 總和 是 total 且 真 {
    問候("一萬二千三百四十五")
} 否則 {
    終值 x 賦 三千二百一十 減 10
}
"#;

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_mixed_script", |b| {
        b.iter(|| tokenize(black_box(SOURCE)))
    });
}

fn bench_numerals(c: &mut Criterion) {
    let numerals = "一億二千三百四十五萬六千七百八十九 ".repeat(64);
    c.bench_function("tokenize_numerals", |b| {
        b.iter(|| tokenize(black_box(&numerals)))
    });
}

criterion_group!(benches, bench_tokenize, bench_numerals);
criterion_main!(benches);
