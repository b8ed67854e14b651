use criterion::Criterion;
use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use styledown_core::render::TerminalRenderOptions;
use styledown_core::theme::StyleConfig;
use styledown_markdown::document::MarkdownDocument;
use styledown_markdown::document::MarkdownRenderOptions;
use styledown_markdown::parse::MarkdownParseOptions;
use styledown_markdown::view::MarkdownView;

fn sample_markdown(sections: usize) -> String {
    let mut s = String::new();
    s.push_str("# Performance\n\n");
    for i in 0..sections {
        s.push_str(&format!("## Section {i}\n\n"));
        s.push_str("A paragraph with *emphasis*, **strong** text, `inline code` and a ");
        s.push_str("[link](https://example.com/page). ");
        for _ in 0..6 {
            s.push_str("The quick brown fox jumps over the lazy dog. ");
        }
        s.push_str("\n\n");

        s.push_str("- [x] task list item\n");
        s.push_str("- nested\n");
        s.push_str("  1. one\n");
        s.push_str("  2. two\n\n");

        s.push_str("> quoted **text**\n\n");

        s.push_str("```rs\n");
        s.push_str("fn main() {\n");
        s.push_str(&format!("    let x = {i} + 1;\n"));
        s.push_str("}\n");
        s.push_str("```\n\n");
    }
    s
}

fn bench_parse_and_render(c: &mut Criterion) {
    let config = StyleConfig::default();
    let md = sample_markdown(100);
    c.bench_function("markdown/parse+render", |b| {
        b.iter(|| {
            let doc = MarkdownDocument::parse(black_box(md.as_str()), &MarkdownParseOptions::default());
            let rendered = doc.render(&config, &MarkdownRenderOptions::default());
            black_box(rendered.buffer().runs().len());
        })
    });
}

fn bench_render_only(c: &mut Criterion) {
    let config = StyleConfig::default();
    let doc = MarkdownDocument::parse(sample_markdown(100), &MarkdownParseOptions::default());
    c.bench_function("markdown/render", |b| {
        b.iter(|| {
            let rendered = doc.render(black_box(&config), &MarkdownRenderOptions::default());
            black_box(rendered.buffer().len());
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let config = StyleConfig::default();
    let rendered = MarkdownDocument::parse(sample_markdown(100), &MarkdownParseOptions::default())
        .render(&config, &MarkdownRenderOptions::default());
    c.bench_function("markdown/search/ascii", |b| {
        b.iter(|| black_box(rendered.search(black_box("FOX")).len()))
    });
    c.bench_function("markdown/search/unicode", |b| {
        b.iter(|| black_box(rendered.search(black_box("Ünïcode")).len()))
    });
}

fn bench_view_terminal(c: &mut Criterion) {
    let md = sample_markdown(100);
    let options = TerminalRenderOptions::default();
    c.bench_function("markdown_view/set_markdown+search+as_text", |b| {
        b.iter(|| {
            let mut view = MarkdownView::new();
            view.set_markdown(black_box(&md));
            view.set_search_query("fox");
            let text = view.as_text(&options);
            black_box(text.lines.len());
        })
    });
}

criterion_group!(
    benches,
    bench_parse_and_render,
    bench_render_only,
    bench_search,
    bench_view_terminal
);
criterion_main!(benches);
