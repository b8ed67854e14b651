use std::sync::Arc;
use std::thread;

use styledown_core::buffer::StyledBuffer;
use styledown_core::range::TextRange;
use styledown_core::theme::FontFamily;
use styledown_core::theme::HeadingLevel;
use styledown_core::theme::StyleConfig;
use styledown_markdown::document::MarkdownDocument;
use styledown_markdown::document::MarkdownRenderOptions;
use styledown_markdown::document::RenderedMarkdown;
use styledown_markdown::parse::MarkdownParseOptions;

const SAMPLE: &str = "# Styledown\n\n\
A *small* **sample** with `code` and a [link](https://example.com).\n\n\
- first\n- second\n\n\
3. three\n4. four\n\n\
> quoted text\n\n\
```rust\nfn main() {}\n```\n";

fn render_with(md: &str, config: &StyleConfig) -> RenderedMarkdown {
    MarkdownDocument::parse(md, &MarkdownParseOptions::default())
        .render(config, &MarkdownRenderOptions::default())
}

fn render(md: &str) -> RenderedMarkdown {
    render_with(md, &StyleConfig::default())
}

fn assert_runs_tile(buffer: &StyledBuffer) {
    let mut expected = 0usize;
    for run in buffer.runs() {
        assert_eq!(run.range.location(), expected, "gap or overlap before {run:?}");
        assert!(!run.range.is_empty(), "empty run {run:?}");
        expected = run.range.end();
    }
    assert_eq!(expected, buffer.len());
    let total: usize = buffer.runs().iter().map(|r| r.range.length()).sum();
    assert_eq!(total, buffer.text().len());
}

#[test]
fn runs_tile_the_buffer() {
    for md in [
        SAMPLE,
        "",
        "plain",
        "> - quoted *list*\n>   continued `code`\n",
        "| a | b |\n|---|---|\n| 1 | 2 |\n",
        "1. one\n\n   para\n\n2. two\n",
    ] {
        assert_runs_tile(render(md).buffer());
    }
}

#[test]
fn sample_text_and_attributes() {
    let rendered = render(SAMPLE);
    let buffer = rendered.buffer();
    assert_eq!(
        buffer.text(),
        "Styledown\n\
A small sample with code and a link.\n\
• first\n• second\n\
3. three\n4. four\n\
quoted text\n\
fn main() {}\n"
    );

    let config = StyleConfig::default();
    let link = buffer.attributes_at(41).expect("link run");
    assert_eq!(buffer.slice(TextRange::new(41, 4)), Some("link"));
    assert_eq!(
        link.link.as_ref().map(|u| u.as_str()),
        Some("https://example.com/")
    );
    assert_eq!(link.foreground, config.link.foreground);

    let code = buffer.attributes_at(30).expect("code run");
    assert_eq!(buffer.slice(TextRange::new(30, 4)), Some("code"));
    assert_eq!(code.font.family, FontFamily::Monospace);
    assert_eq!(code.background, config.inline_code.background);

    let after = buffer.attributes_at(45).expect("trailing text");
    assert_eq!(*after, config.base_attributes());
}

#[test]
fn rendering_is_deterministic() {
    let config = StyleConfig::default();
    let doc = MarkdownDocument::parse(SAMPLE, &MarkdownParseOptions::default());
    let a = doc.render(&config, &MarkdownRenderOptions::default());
    let b = doc.render(&config, &MarkdownRenderOptions::default());
    assert_eq!(a.buffer(), b.buffer());
    assert_eq!(a.spans(), b.spans());
}

#[test]
fn nested_ordered_lists_count_independently() {
    let rendered = render("3. a\n   1. x\n   2. y\n4. b\n");
    assert_eq!(rendered.buffer().text(), "3. a\n1. x\n2. y\n4. b\n");
}

#[test]
fn strong_inside_heading_keeps_the_heading_font() {
    let config = StyleConfig::default();
    let rendered = render_with("# Title **bold**\n", &config);
    let buffer = rendered.buffer();
    let pos = buffer.text().find("bold").expect("bold rendered");
    let attrs = buffer.attributes_at(pos).expect("attributes");
    let heading = config.heading(HeadingLevel::H1);
    assert!(attrs.font.bold);
    assert_eq!(attrs.font.size, heading.font.size);
    assert_eq!(attrs.foreground, heading.foreground);
}

#[test]
fn code_inside_strong_uses_the_code_font() {
    let config = StyleConfig::default();
    let rendered = render_with("**see `x`**\n", &config);
    let buffer = rendered.buffer();
    let attrs = buffer.attributes_at(4).expect("code run");
    assert_eq!(buffer.slice(TextRange::new(4, 1)), Some("x"));
    assert_eq!(attrs.font, config.inline_code.font);
}

#[test]
fn search_over_rendered_text() {
    let rendered = render("the cat sat on the mat\n");
    assert_eq!(
        rendered.search("the"),
        vec![TextRange::new(0, 3), TextRange::new(15, 3)]
    );
    assert!(rendered.search("").is_empty());
    // Markup is not searchable, only the rendered text.
    assert!(render("**bold**\n").search("*").is_empty());
}

#[test]
fn renders_share_one_config_across_threads() {
    let config = Arc::new(StyleConfig::default());
    let inputs = ["# one\n\ntext\n", SAMPLE, "- a\n- b\n"];
    let expected = inputs
        .iter()
        .map(|md| render_with(md, &config).into_buffer())
        .collect::<Vec<_>>();

    let got = thread::scope(|scope| {
        let handles = inputs
            .iter()
            .map(|md| {
                let config = Arc::clone(&config);
                scope.spawn(move || render_with(md, &config).into_buffer())
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|h| h.join().expect("render thread"))
            .collect::<Vec<_>>()
    });
    assert_eq!(got, expected);
}
