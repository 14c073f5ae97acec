// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use image_search_view::config::Config;
use image_search_view::gallery::{FilterMode, GalleryState, SortMode};
use image_search_view::i18n::fluent::I18n;
use image_search_view::search::SearchResult;
use image_search_view::ui::gallery_view::{self, ViewContext};
use std::hint::black_box;

fn results(count: usize) -> Vec<SearchResult> {
    (0..count)
        .map(|i| {
            let mut result = SearchResult::new(format!("/c/output/batch/img_{i:05}.png"));
            result.similarity = Some((i * 7919 % 1000) as f64 / 1000.0);
            result.brightness = Some((i * 104_729 % 1000) as f64 / 1000.0);
            result.is_dark = Some(i % 3 == 0);
            result.width = Some(512 + (i % 5) as u32 * 128);
            result.height = Some(512 + (i % 7) as u32 * 64);
            result.file_size = Some(200_000 + i as u64 * 13);
            result.has_workflow = i % 2 == 0;
            result
        })
        .collect()
}

fn gallery_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery");
    let mut gallery = GalleryState::new(results(1000));

    for mode in [SortMode::Similarity, SortMode::Filename, SortMode::SizeLarge] {
        gallery.set_sort(mode);
        group.bench_function(format!("visible_1000_{mode:?}"), |b| {
            b.iter(|| black_box(gallery.visible().len()));
        });
    }

    gallery.set_sort(SortMode::Similarity);
    gallery.set_filter(FilterMode::Dark);
    let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
    group.bench_function("render_view_1000", |b| {
        b.iter(|| {
            let view = gallery_view::view(ViewContext {
                i18n: &i18n,
                gallery: &gallery,
                query_images: &[],
                base_url: "http://127.0.0.1:8188",
                total_indexed: Some(1000),
            });
            black_box(view.cards.len())
        });
    });

    group.finish();
}

criterion_group!(benches, gallery_benchmark);
criterion_main!(benches);
