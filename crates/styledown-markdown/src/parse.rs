//! `pulldown-cmark` front end: folds the parser's event stream into a [`Node`] tree.
use pulldown_cmark::CodeBlockKind;
use pulldown_cmark::CowStr;
use pulldown_cmark::Event;
use pulldown_cmark::HeadingLevel as CmarkHeadingLevel;
use pulldown_cmark::LinkType;
use pulldown_cmark::Options;
use pulldown_cmark::Parser;
use pulldown_cmark::Tag;
use styledown_core::theme::HeadingLevel;

use crate::node::Node;

/// Parser switches. GitHub-flavored extensions are on by default.
#[derive(Clone, Debug)]
pub struct MarkdownParseOptions {
    /// Keep soft line breaks as `\n` instead of folding them into a space.
    pub preserve_new_lines: bool,
    pub tables: bool,
    pub task_lists: bool,
    pub strikethrough: bool,
    pub footnotes: bool,
}

impl Default for MarkdownParseOptions {
    fn default() -> Self {
        Self {
            preserve_new_lines: false,
            tables: true,
            task_lists: true,
            strikethrough: true,
            footnotes: true,
        }
    }
}

impl MarkdownParseOptions {
    fn cmark_options(&self) -> Options {
        let mut options = Options::empty();
        if self.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.task_lists {
            options.insert(Options::ENABLE_TASKLISTS);
        }
        if self.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.footnotes {
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        options
    }
}

#[derive(Clone, Debug)]
enum Frame {
    Paragraph,
    Heading(HeadingLevel),
    Strong,
    Emphasis,
    BlockQuote,
    CodeBlock(Option<String>),
    Link(Option<String>),
    List(Option<u64>),
    Item,
    TableRow,
    Unhandled(&'static str),
}

#[derive(Debug)]
struct Open {
    frame: Frame,
    children: Vec<Node>,
    code: String,
}

impl Open {
    fn new(frame: Frame) -> Self {
        Self {
            frame,
            children: Vec::new(),
            code: String::new(),
        }
    }

    fn push_text(&mut self, text: &str) {
        if matches!(self.frame, Frame::CodeBlock(_)) {
            self.code.push_str(text);
            return;
        }
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(text);
            return;
        }
        if !text.is_empty() {
            self.children.push(Node::Text(text.to_string()));
        }
    }

    fn close(self) -> Node {
        let children = self.children;
        match self.frame {
            Frame::Paragraph => Node::Paragraph(children),
            Frame::Heading(level) => Node::Heading { level, children },
            Frame::Strong => Node::Strong(children),
            Frame::Emphasis => Node::Emphasis(children),
            Frame::BlockQuote => Node::BlockQuote(children),
            Frame::CodeBlock(language) => {
                let mut code = self.code;
                if code.ends_with('\n') {
                    code.pop();
                }
                Node::CodeBlock { language, code }
            }
            Frame::Link(destination) => Node::Link {
                destination,
                children,
            },
            Frame::List(Some(start)) => Node::OrderedList { start, children },
            Frame::List(None) => Node::UnorderedList(children),
            Frame::Item => Node::ListItem(children),
            Frame::TableRow => Node::Paragraph(tab_separated(children)),
            Frame::Unhandled(tag) => Node::Unhandled { tag, children },
        }
    }
}

/// Parses `input` into a [`Node::Document`].
///
/// Mapping notes:
/// - soft breaks become `" "` (or `"\n"` with `preserve_new_lines`), hard breaks `"\n"`
/// - task list markers become `"[✓] "` / `"[ ] "` text
/// - table header and body rows become paragraphs with tab-separated cells
/// - images keep their alt text, raw HTML is dropped
pub fn parse_markdown(input: &str, options: &MarkdownParseOptions) -> Node {
    let parser = Parser::new_ext(input, options.cmark_options());
    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<Open> = Vec::new();

    fn push_node(stack: &mut [Open], root: &mut Vec<Node>, node: Node) {
        match stack.last_mut() {
            Some(open) => open.children.push(node),
            None => root.push(node),
        }
    }

    fn push_text(stack: &mut [Open], root: &mut Vec<Node>, text: &str) {
        match stack.last_mut() {
            Some(open) => open.push_text(text),
            None => {
                if let Some(Node::Text(last)) = root.last_mut() {
                    last.push_str(text);
                } else if !text.is_empty() {
                    root.push(Node::Text(text.to_string()));
                }
            }
        }
    }

    for event in parser {
        match event {
            Event::Start(tag) => {
                let footnote_label = match &tag {
                    Tag::FootnoteDefinition(label) => Some(format!("[^{label}]: ")),
                    _ => None,
                };
                let mut open = Open::new(frame_for(tag));
                if let Some(label) = footnote_label {
                    open.push_text(&label);
                }
                stack.push(open);
            }
            Event::End(_) => {
                if let Some(open) = stack.pop() {
                    let node = open.close();
                    push_node(&mut stack, &mut root, node);
                }
            }
            Event::Text(text) => push_text(&mut stack, &mut root, &text),
            Event::Code(code) => push_node(&mut stack, &mut root, Node::InlineCode(code.to_string())),
            Event::InlineMath(math) | Event::DisplayMath(math) => {
                push_text(&mut stack, &mut root, &math)
            }
            Event::SoftBreak => {
                let brk = if options.preserve_new_lines { "\n" } else { " " };
                push_text(&mut stack, &mut root, brk);
            }
            Event::HardBreak => push_text(&mut stack, &mut root, "\n"),
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[✓] " } else { "[ ] " };
                push_text(&mut stack, &mut root, marker);
            }
            Event::FootnoteReference(label) => {
                push_text(&mut stack, &mut root, &format!("[^{label}]"));
            }
            Event::Rule => push_node(
                &mut stack,
                &mut root,
                Node::Unhandled {
                    tag: "rule",
                    children: Vec::new(),
                },
            ),
            Event::Html(_) | Event::InlineHtml(_) => {}
        }
    }

    // Unbalanced input: fold whatever is still open into its parent.
    while let Some(open) = stack.pop() {
        let node = open.close();
        push_node(&mut stack, &mut root, node);
    }

    Node::Document(root)
}

fn frame_for(tag: Tag<'_>) -> Frame {
    match tag {
        Tag::Paragraph => Frame::Paragraph,
        Tag::Heading { level, .. } => Frame::Heading(heading_level(level)),
        Tag::Strong => Frame::Strong,
        Tag::Emphasis => Frame::Emphasis,
        Tag::BlockQuote(_) => Frame::BlockQuote,
        Tag::CodeBlock(CodeBlockKind::Fenced(lang)) => Frame::CodeBlock(normalize_fenced_lang(&lang)),
        Tag::CodeBlock(CodeBlockKind::Indented) => Frame::CodeBlock(None),
        Tag::Link {
            link_type,
            dest_url,
            ..
        } => Frame::Link(link_destination(link_type, &dest_url)),
        Tag::List(start) => Frame::List(start),
        Tag::Item => Frame::Item,
        Tag::TableHead | Tag::TableRow => Frame::TableRow,
        Tag::TableCell => Frame::Unhandled("table_cell"),
        Tag::Table(_) => Frame::Unhandled("table"),
        Tag::Image { .. } => Frame::Unhandled("image"),
        Tag::Strikethrough => Frame::Unhandled("strikethrough"),
        Tag::FootnoteDefinition(_) => Frame::Unhandled("footnote_definition"),
        Tag::HtmlBlock => Frame::Unhandled("html"),
        _ => Frame::Unhandled("other"),
    }
}

fn heading_level(level: CmarkHeadingLevel) -> HeadingLevel {
    match level {
        CmarkHeadingLevel::H1 => HeadingLevel::H1,
        CmarkHeadingLevel::H2 => HeadingLevel::H2,
        CmarkHeadingLevel::H3 => HeadingLevel::H3,
        CmarkHeadingLevel::H4 => HeadingLevel::H4,
        CmarkHeadingLevel::H5 => HeadingLevel::H5,
        CmarkHeadingLevel::H6 => HeadingLevel::H6,
    }
}

fn link_destination(link_type: LinkType, dest: &CowStr<'_>) -> Option<String> {
    let dest = dest.trim();
    if dest.is_empty() {
        return None;
    }
    if link_type == LinkType::Email && !dest.starts_with("mailto:") {
        return Some(format!("mailto:{dest}"));
    }
    Some(dest.to_string())
}

fn normalize_fenced_lang(lang: &CowStr<'_>) -> Option<String> {
    let first = lang.split_whitespace().next().unwrap_or("");
    let first = first.split(',').next().unwrap_or("").trim();
    let first = first.strip_prefix("language-").unwrap_or(first);
    let first = first.trim_start_matches('{').trim_end_matches('}').trim();
    if first.is_empty() {
        None
    } else {
        Some(first.to_string())
    }
}

fn tab_separated(cells: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(cells.len() * 2);
    for (i, cell) in cells.into_iter().enumerate() {
        if i > 0 {
            out.push(Node::text("\t"));
        }
        out.push(cell);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(md: &str) -> Node {
        parse_markdown(md, &MarkdownParseOptions::default())
    }

    #[test]
    fn builds_block_and_inline_nodes() {
        let doc = parse("# Title\n\nSome **bold** and *it*.\n");
        assert_eq!(
            doc,
            Node::Document(vec![
                Node::Heading {
                    level: HeadingLevel::H1,
                    children: vec![Node::text("Title")],
                },
                Node::Paragraph(vec![
                    Node::text("Some "),
                    Node::Strong(vec![Node::text("bold")]),
                    Node::text(" and "),
                    Node::Emphasis(vec![Node::text("it")]),
                    Node::text("."),
                ]),
            ])
        );
    }

    #[test]
    fn code_block_drops_the_closing_newline() {
        let doc = parse("```rs\nfn main() {}\n```\n");
        assert_eq!(
            doc.get(&[0]),
            Some(&Node::CodeBlock {
                language: Some("rs".to_string()),
                code: "fn main() {}".to_string(),
            })
        );
    }

    #[test]
    fn ordered_lists_keep_their_start_index() {
        let doc = parse("3. a\n4. b\n");
        let Some(Node::OrderedList { start, children }) = doc.get(&[0]) else {
            panic!("expected ordered list, got {doc:?}");
        };
        assert_eq!(*start, 3);
        assert_eq!(children.len(), 2);
        assert_eq!(children[0], Node::ListItem(vec![Node::text("a")]));
    }

    #[test]
    fn links_keep_destinations() {
        let doc = parse("[docs](https://example.com/docs) <me@example.com>\n");
        let para = doc.get(&[0]).expect("paragraph");
        let links = para
            .children()
            .iter()
            .filter_map(|n| match n {
                Node::Link { destination, .. } => destination.clone(),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(
            links,
            vec![
                "https://example.com/docs".to_string(),
                "mailto:me@example.com".to_string()
            ]
        );
    }

    #[test]
    fn soft_breaks_fold_unless_preserved() {
        let folded = parse("one\ntwo\n");
        assert_eq!(folded.plain_text(), "one two");
        let kept = parse_markdown(
            "one\ntwo\n",
            &MarkdownParseOptions {
                preserve_new_lines: true,
                ..MarkdownParseOptions::default()
            },
        );
        assert_eq!(kept.plain_text(), "one\ntwo");
    }

    #[test]
    fn tables_become_tab_separated_rows() {
        let doc = parse("| a | b |\n|---|---|\n| 1 | 2 |\n");
        let Some(Node::Unhandled { tag, children }) = doc.get(&[0]) else {
            panic!("expected table, got {doc:?}");
        };
        assert_eq!(*tag, "table");
        let rows = children.iter().map(Node::plain_text).collect::<Vec<_>>();
        assert_eq!(rows, vec!["a\tb".to_string(), "1\t2".to_string()]);
    }

    #[test]
    fn task_markers_and_html() {
        let doc = parse("- [x] done\n- [ ] todo <b>now</b>\n");
        assert_eq!(doc.plain_text(), "[✓] done[ ] todo now");
    }

    #[test]
    fn normalizes_fence_info() {
        assert_eq!(
            normalize_fenced_lang(&CowStr::from("rust,ignore")),
            Some("rust".to_string())
        );
        assert_eq!(
            normalize_fenced_lang(&CowStr::from("{language-py} extra")),
            Some("py".to_string())
        );
        assert_eq!(normalize_fenced_lang(&CowStr::from("   ")), None);
    }
}
