//! Benchmarks for the composite metric
//!
//! Run with: cargo bench --package similarity

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{Book, Catalog};
use similarity::{CompositeMetric, GenreTaxonomy, Weights};
use std::sync::Arc;

const GENRES: [&str; 8] = [
    "fantasy", "dystopia", "classics", "romance", "detective", "biography", "fairy_tale", "poetry",
];

fn synthetic_catalog(size: u32) -> Catalog {
    let books = (1..=size)
        .map(|id| Book {
            id,
            title: format!("Book {}", id),
            author: format!("Author {}", id % 17),
            publisher: format!("Publisher {}", id % 5),
            language: if id % 3 == 0 { "english" } else { "russian" }.to_string(),
            genre: GENRES[id as usize % GENRES.len()].to_string(),
            year: 1850 + (id as i32 * 7) % 170,
            pages: 80 + (id * 37) % 900,
            age_restriction: [0, 6, 12, 16, 18][id as usize % 5],
            has_illustrations: id % 4 == 0,
        })
        .collect();
    Catalog::new(books).expect("Failed to build synthetic catalog")
}

fn bench_pairwise(c: &mut Criterion) {
    let catalog = synthetic_catalog(300);
    let metric = CompositeMetric::fit(&catalog, Arc::new(GenreTaxonomy::standard()));
    let weights = Weights::default();

    c.bench_function("pairwise_300", |b| {
        b.iter(|| {
            let matrix = metric.pairwise(black_box(&catalog), black_box(&weights));
            black_box(matrix)
        })
    });
}

fn bench_similar_books(c: &mut Criterion) {
    let catalog = synthetic_catalog(300);
    let metric = CompositeMetric::fit(&catalog, Arc::new(GenreTaxonomy::standard()));
    let weights = Weights::default();

    c.bench_function("similar_books_top5", |b| {
        b.iter(|| {
            let similar = metric.similar_books(&catalog, black_box(0), black_box(5), &weights);
            black_box(similar)
        })
    });
}

criterion_group!(benches, bench_pairwise, bench_similar_books);
criterion_main!(benches);
