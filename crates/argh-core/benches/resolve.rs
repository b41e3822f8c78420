use criterion::{black_box, criterion_group, criterion_main, Criterion};

use argh_core::SiteRegistry;

const URLS: &[&str] = &[
    "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
    "https://www.reddit.com/r/rust/comments/abc/some_title/",
    "https://disqus.com/embed/comments/?base=default&f=example",
    "https://twitter.com/someone/status/1",
    "https://unknown.example.com/path",
    "not a url",
];

fn bench_page_info(c: &mut Criterion) {
    let registry = SiteRegistry::builtin();

    c.bench_function("page_info", |b| {
        b.iter(|| {
            for url in URLS {
                black_box(registry.page_info(black_box(url)));
            }
        })
    });

    c.bench_function("check_paths", |b| {
        b.iter(|| {
            for url in URLS {
                black_box(registry.check_paths(black_box(url)));
            }
        })
    });
}

criterion_group!(benches, bench_page_info);
criterion_main!(benches);
