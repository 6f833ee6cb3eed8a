use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tinygrep::compile;

fn pad_input_to_length_with(suffix: &str, pad_str: &str, len: usize) -> String {
    let suffix_len = suffix.chars().count();
    if suffix_len > len {
        return String::new();
    }

    pad_str
        .chars()
        .cycle()
        .take(len - suffix_len)
        .chain(suffix.chars())
        .collect()
}

pub fn linear_input_size_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("input length comparison");
    let pattern = compile(r"(cat|dog) and \1").unwrap();

    (1..10)
        .map(|exponent| 2usize.pow(exponent) * 16)
        .map(|input_len| (pad_input_to_length_with("dog and dog", "xy", input_len), input_len))
        .for_each(|(input, sample_size)| {
            group.throughput(Throughput::Elements(sample_size as u64));
            group.bench_with_input(
                BenchmarkId::new("input length of size", sample_size),
                &input,
                |b, input| b.iter(|| assert!(pattern.matches(input))),
            );
        });
    group.finish();
}

pub fn giveback_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy giveback");
    let pattern = compile(r"^\w+x$").unwrap();

    (1..8)
        .map(|exponent| 2usize.pow(exponent) * 8)
        .for_each(|len| {
            let input = pad_input_to_length_with("x", "ab", len);
            group.bench_with_input(BenchmarkId::new("run length", len), &input, |b, input| {
                b.iter(|| assert!(pattern.matches(input)))
            });
        });
    group.finish();
}

pub fn compile_pattern(c: &mut Criterion) {
    c.bench_function("compile", |b| {
        b.iter(|| compile(r"^I see \d+ (cat|dog)s? and [^xyz]+ \1$").unwrap())
    });
}

criterion_group!(
    benches,
    linear_input_size_comparison,
    giveback_comparison,
    compile_pattern
);
criterion_main!(benches);
