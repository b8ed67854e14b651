use ratatui::text::Line;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;
use styledown_core::render::TerminalRenderOptions;
use styledown_core::theme::StyleConfig;
use styledown_markdown::document::MarkdownRenderOptions;
use styledown_markdown::parse::MarkdownParseOptions;
use styledown_markdown::view::MarkdownView;
use styledown_markdown::view::MarkdownViewOptions;
use tracing_subscriber::EnvFilter;
use url::Url;

fn main() -> io::Result<()> {
    init_tracing();

    let args = env::args().skip(1).collect::<Vec<_>>();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_help();
        return Ok(());
    }

    let mut base_url: Option<String> = None;
    let mut preserve_new_lines = false;
    let mut query: Option<String> = None;
    let mut show_runs = false;
    let mut show_outline = false;
    let mut no_gaps = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--base-url" => {
                base_url = Some(parse_string(&args, &mut i, "--base-url")?);
            }
            "--preserve-new-lines" => {
                preserve_new_lines = true;
                i += 1;
            }
            "--search" => {
                query = Some(parse_string(&args, &mut i, "--search")?);
            }
            "--runs" => {
                show_runs = true;
                i += 1;
            }
            "--outline" => {
                show_outline = true;
                i += 1;
            }
            "--no-gaps" => {
                no_gaps = true;
                i += 1;
            }
            _ => break,
        }
    }

    let input = if i < args.len() {
        let path = &args[i];
        let input = fs::read_to_string(path)?;
        if base_url.is_none() {
            if let Some(parent) = Path::new(path).parent() {
                let dir = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
                base_url = fs::canonicalize(dir)
                    .ok()
                    .and_then(|abs| Url::from_directory_path(abs).ok())
                    .map(String::from);
            }
        }
        input
    } else {
        let mut s = String::new();
        io::stdin().read_to_string(&mut s)?;
        s
    };

    let mut view = MarkdownView::with_options(
        Arc::new(StyleConfig::default()),
        MarkdownViewOptions {
            parse: MarkdownParseOptions {
                preserve_new_lines,
                ..MarkdownParseOptions::default()
            },
            render: MarkdownRenderOptions { base_url },
        },
    );
    view.set_markdown(&input);

    if show_runs {
        let buffer = view.rendered().buffer();
        for run in buffer.runs() {
            let text = buffer.slice(run.range).unwrap_or_default();
            let attrs = &run.attributes;
            println!(
                "{} {:?} size={} bold={} italic={} fg={:?} bg={:?} indent={} link={} {:?}",
                run.range,
                attrs.font.family,
                attrs.font.size,
                attrs.font.bold,
                attrs.font.italic,
                attrs.foreground,
                attrs.background,
                attrs.paragraph.head_indent,
                attrs.link.as_ref().map_or("-", |u| u.as_str()),
                text,
            );
        }
        return Ok(());
    }

    if show_outline {
        for heading in view.outline() {
            println!(
                "{}{} {}",
                "  ".repeat(heading.level.number() as usize - 1),
                heading.range,
                heading.title
            );
        }
        return Ok(());
    }

    if let Some(query) = query {
        let count = view.set_search_query(&query);
        eprintln!("{count} match(es) for {query:?}");
    }

    let options = TerminalRenderOptions {
        paragraph_gaps: !no_gaps,
        ..TerminalRenderOptions::default()
    };
    for line in view.as_text(&options).lines.iter() {
        println!("{}", line_to_plain(line));
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("styledown_markdown=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn print_help() {
    eprintln!(
        "Usage: dump [options] [path]\n\
\n\
Options:\n\
  --base-url <url>            Resolve relative links against this base\n\
  --preserve-new-lines        Keep soft line breaks as newlines\n\
  --search <query>            Highlight case-insensitive matches\n\
  --runs                      Print styled runs instead of text\n\
  --outline                   Print the heading outline\n\
  --no-gaps                   Do not insert blank lines between paragraphs\n\
  -h, --help                  Show this help\n\
\n\
If [path] is omitted, reads Markdown from stdin.\n\
Set RUST_LOG (e.g. RUST_LOG=styledown_markdown=debug) for render diagnostics."
    );
}

fn parse_string(args: &[String], i: &mut usize, flag: &str) -> io::Result<String> {
    let Some(v) = args.get(*i + 1) else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{flag} expects a value"),
        ));
    };
    *i += 2;
    Ok(v.to_string())
}

fn line_to_plain(line: &Line<'_>) -> String {
    line.spans
        .iter()
        .map(|s| s.content.as_ref())
        .collect::<Vec<_>>()
        .join("")
}
