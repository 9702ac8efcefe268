use criterion::{criterion_group, criterion_main, Criterion};
use lalrgen::grammar::{examples, Grammar, GrammarDef, GrammarDefError};

criterion_main!(benches);
criterion_group!(benches, bench_arithmetic, bench_nullable, bench_stages);

fn bench_arithmetic(c: &mut Criterion) {
    bench_generate(c, "arithmetic", examples::arithmetic);
    bench_generate(c, "arithmetic_prec", examples::arithmetic_prec);
}

fn bench_nullable(c: &mut Criterion) {
    bench_generate(c, "with_nullable", examples::with_nullable);
}

fn bench_generate<F>(c: &mut Criterion, name: &str, def: F)
where
    F: Fn(&mut GrammarDef) -> Result<(), GrammarDefError>,
{
    let grammar = Grammar::define(def).unwrap();
    c.bench_function(name, |b| {
        b.iter(|| lalrgen::generate(&grammar).unwrap());
    });
}

fn bench_stages(c: &mut Criterion) {
    let grammar = Grammar::define(examples::arithmetic_prec).unwrap();
    let automaton = lalrgen::lr0::automaton(&grammar);
    let lookaheads = lalrgen::lalr::lookaheads(&grammar, &automaton);

    let mut group = c.benchmark_group("stages");
    group.bench_function("lr0", |b| {
        b.iter(|| lalrgen::lr0::automaton(&grammar));
    });
    group.bench_function("lalr", |b| {
        b.iter(|| lalrgen::lalr::lookaheads(&grammar, &automaton));
    });
    group.bench_function("table", |b| {
        b.iter(|| lalrgen::table::build(&grammar, &automaton, &lookaheads));
    });
    group.finish();
}
