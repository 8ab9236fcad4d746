//! Extraction and workbook building benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use websheet::{ContentExtractor, SelectionSet, WorkbookBuilder};

/// Synthetic article page with `n` paragraphs, links and images and a few tables
fn sample_page(n: usize) -> String {
    let mut html = String::from("<html><head><title>Benchmark Page</title></head><body>");
    for i in 0..n {
        html.push_str(&format!(
            "<p>Paragraph {i} with some <b>inline</b> markup.</p>\
             <a href=\"/articles/{i}\">Article {i}</a>\
             <img src=\"images/{i}.png\">"
        ));
    }
    for t in 0..4 {
        html.push_str(&format!("<table><tr><th>Key {t}</th><th>Value</th></tr>"));
        for r in 0..n / 4 {
            html.push_str(&format!("<tr><td>row {r}</td><td>{}</td></tr>", r * t));
        }
        html.push_str("</table>");
    }
    html.push_str("</body></html>");
    html
}

fn bench_extract(c: &mut Criterion) {
    let page = sample_page(200);

    c.bench_function("extract_html_200", |b| {
        b.iter(|| {
            let extraction =
                ContentExtractor::extract_html(black_box(&page), "https://bench.example.com/");
            black_box(extraction.document.links().len())
        })
    });
}

fn bench_workbook(c: &mut Criterion) {
    let document = ContentExtractor::extract_html(&sample_page(200), "https://bench.example.com/")
        .document;
    let selection = SelectionSet::all();

    c.bench_function("workbook_layout_200", |b| {
        b.iter(|| black_box(WorkbookBuilder::layout(black_box(&document), &selection)))
    });

    c.bench_function("workbook_build_200", |b| {
        b.iter(|| {
            let bytes = WorkbookBuilder::build(black_box(&document), &selection).unwrap();
            black_box(bytes.len())
        })
    });
}

criterion_group!(benches, bench_extract, bench_workbook);
criterion_main!(benches);
