use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sporogen::chromosome::{standard, RandomChromosome};
use sporogen::lifecycle::LifeCycle;
use sporogen::script::ScriptBuilder;

fn bench_random_chromosome(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_chromosome");
    for genome_length in [20_000usize, 100_000, 1_000_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(genome_length),
            &genome_length,
            |b, &genome_length| {
                b.iter(|| {
                    RandomChromosome::new(black_box(genome_length))
                        .seed(42)
                        .build()
                        .unwrap()
                });
            },
        );
    }
    group.finish();
}

fn bench_script_generation(c: &mut Criterion) {
    c.bench_function("bryophyte_script", |b| {
        b.iter(|| {
            ScriptBuilder::new()
                .chromosome(standard())
                .life_cycle("bryophyte-monoicous".parse::<LifeCycle>().unwrap())
                .sim_time(black_box(1000))
                .build()
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_random_chromosome, bench_script_generation);
criterion_main!(benches);
