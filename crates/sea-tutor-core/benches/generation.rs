use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use sea_tutor_core::generators::Catalog;
use sea_tutor_core::model::GenerationContext;
use sea_tutor_core::paper::compose_paper;
use sea_tutor_core::shape::PaperShape;

fn bench_skills(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let catalog = Catalog::standard();
    let ctx = GenerationContext::new("II", 2, 3);

    for skill in ["core_add_sub", "std5_add_sub_unlike_denoms", "std5_triangle_third_angle", "std4_bar_chart_read"] {
        let mut rng = StdRng::seed_from_u64(7);
        group.bench_function(skill, |b| {
            b.iter(|| catalog.generate(black_box(skill), &ctx, &mut rng))
        });
    }

    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let catalog = Catalog::standard();
    let shape = PaperShape::standard();
    let mut rng = StdRng::seed_from_u64(11);

    c.bench_function("compose_standard_paper", |b| {
        b.iter(|| compose_paper(black_box(&shape), &catalog, &mut rng))
    });
}

criterion_group!(benches, bench_skills, bench_compose);
criterion_main!(benches);
