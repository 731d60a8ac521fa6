use criterion::{black_box, criterion_group, criterion_main, Criterion};
use moviedb_search_engine::{ranking, Movie};

fn create_test_candidates(count: usize) -> Vec<Movie> {
    (0..count)
        .map(|i| {
            let mut movie = Movie::new(i as u64, format!("Test Movie {}", i));
            movie.release_date = format!("{}-01-01", 2000 + (i % 25));
            movie.vote_average = Some((i % 10) as f64);
            movie
        })
        .collect()
}

fn bench_fuzzy_ranking(c: &mut Criterion) {
    let candidates_10 = create_test_candidates(10);
    let candidates_20 = create_test_candidates(20);

    c.bench_function("rank_page_10", |b| {
        b.iter(|| black_box(ranking::rank("test movie 5", &candidates_10)));
    });

    c.bench_function("rank_page_20", |b| {
        b.iter(|| black_box(ranking::rank("test movie 15", &candidates_20)));
    });

    c.bench_function("fuzzy_score_composite", |b| {
        b.iter(|| black_box(ranking::fuzzy_score("tset movei", "Test Movie 5")));
    });
}

criterion_group!(benches, bench_fuzzy_ranking);
criterion_main!(benches);
