use ratatui::layout::Alignment;
use ratatui::style::Color;
use url::Url;

/// Heading depth, `H1` (largest) through `H6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub const ALL: [HeadingLevel; 6] = [
        HeadingLevel::H1,
        HeadingLevel::H2,
        HeadingLevel::H3,
        HeadingLevel::H4,
        HeadingLevel::H5,
        HeadingLevel::H6,
    ];

    /// Returns the level for `1..=6`.
    pub fn from_number(level: u8) -> Option<Self> {
        match level {
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            3 => Some(HeadingLevel::H3),
            4 => Some(HeadingLevel::H4),
            5 => Some(HeadingLevel::H5),
            6 => Some(HeadingLevel::H6),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    fn index(self) -> usize {
        match self {
            HeadingLevel::H1 => 0,
            HeadingLevel::H2 => 1,
            HeadingLevel::H3 => 2,
            HeadingLevel::H4 => 3,
            HeadingLevel::H5 => 4,
            HeadingLevel::H6 => 5,
        }
    }
}

/// Semantic style categories. The set is closed, so every lookup in [`StyleConfig`] succeeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Body,
    Heading(HeadingLevel),
    InlineCode,
    CodeBlock,
    BlockQuote,
    Link,
    SelectionHighlight,
    SearchHighlight,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontFamily {
    #[default]
    Proportional,
    Monospace,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpec {
    pub family: FontFamily,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

impl FontSpec {
    pub const fn new(family: FontFamily, size: f32) -> Self {
        Self {
            family,
            size,
            bold: false,
            italic: false,
        }
    }

    /// The same font with the bold trait set.
    pub fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    /// The same font with the italic trait set.
    pub fn italic(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(FontFamily::Proportional, 16.0)
    }
}

/// Block-level layout attributes, in abstract layout units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParagraphStyle {
    pub alignment: Alignment,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    pub spacing_before: f32,
    pub spacing_after: f32,
    /// Leading indent applied to every line of the paragraph.
    pub head_indent: f32,
}

impl ParagraphStyle {
    pub fn with_head_indent(self, head_indent: f32) -> Self {
        Self {
            head_indent,
            ..self
        }
    }
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            alignment: Alignment::Left,
            line_height: 1.2,
            spacing_before: 0.0,
            spacing_after: 8.0,
            head_indent: 0.0,
        }
    }
}

/// Attributes a role resolves to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoleStyle {
    pub font: FontSpec,
    pub foreground: Color,
    pub background: Option<Color>,
    pub paragraph: ParagraphStyle,
}

impl Default for RoleStyle {
    fn default() -> Self {
        Self {
            font: FontSpec::default(),
            foreground: Color::Reset,
            background: None,
            paragraph: ParagraphStyle::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListStyle {
    /// Glyph placed before every unordered list item (followed by a space).
    pub bullet: String,
    /// Head indent of list items. The same amount is used at every nesting depth.
    pub indent: f32,
}

impl Default for ListStyle {
    fn default() -> Self {
        Self {
            bullet: "•".to_string(),
            indent: 20.0,
        }
    }
}

/// Immutable mapping from [`Role`] to [`RoleStyle`].
///
/// A configuration is resolved once and only read during a render, so one instance (usually
/// behind an `Arc`) can be shared by renders running on different threads.
///
/// Override individual roles with struct update syntax:
///
/// ```
/// use ratatui::style::Color;
/// use styledown_core::theme::{RoleStyle, StyleConfig};
///
/// let config = StyleConfig {
///     link: RoleStyle {
///         foreground: Color::Magenta,
///         ..StyleConfig::default().link
///     },
///     ..StyleConfig::default()
/// };
/// # let _ = config;
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StyleConfig {
    pub body: RoleStyle,
    pub headings: [RoleStyle; 6],
    pub inline_code: RoleStyle,
    pub code_block: RoleStyle,
    pub blockquote: RoleStyle,
    pub link: RoleStyle,
    pub selection_highlight: RoleStyle,
    pub search_highlight: RoleStyle,
    pub list: ListStyle,
}

impl StyleConfig {
    pub fn role(&self, role: Role) -> &RoleStyle {
        match role {
            Role::Body => &self.body,
            Role::Heading(level) => &self.headings[level.index()],
            Role::InlineCode => &self.inline_code,
            Role::CodeBlock => &self.code_block,
            Role::BlockQuote => &self.blockquote,
            Role::Link => &self.link,
            Role::SelectionHighlight => &self.selection_highlight,
            Role::SearchHighlight => &self.search_highlight,
        }
    }

    pub fn heading(&self, level: HeadingLevel) -> &RoleStyle {
        self.role(Role::Heading(level))
    }

    /// Attributes in effect at the root of a document.
    pub fn base_attributes(&self) -> TextAttributes {
        TextAttributes::from_role(&self.body)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        let body = RoleStyle::default();
        let heading = |size: f32, foreground: Color| RoleStyle {
            font: FontSpec::new(FontFamily::Proportional, size).bold(),
            foreground,
            background: None,
            paragraph: ParagraphStyle {
                spacing_before: 12.0,
                spacing_after: 10.0,
                ..ParagraphStyle::default()
            },
        };
        let mono = FontSpec::new(FontFamily::Monospace, 14.0);

        Self {
            body,
            headings: [
                heading(32.0, Color::Cyan),
                heading(26.0, Color::Cyan),
                heading(21.0, Color::Cyan),
                heading(18.0, Color::LightCyan),
                heading(16.0, Color::LightCyan),
                heading(14.0, Color::LightCyan),
            ],
            inline_code: RoleStyle {
                font: mono,
                foreground: Color::Cyan,
                background: Some(Color::Rgb(40, 40, 40)),
                paragraph: body.paragraph,
            },
            code_block: RoleStyle {
                font: mono,
                foreground: Color::Gray,
                background: Some(Color::Rgb(30, 30, 30)),
                paragraph: ParagraphStyle {
                    line_height: 1.1,
                    spacing_before: 6.0,
                    spacing_after: 12.0,
                    ..ParagraphStyle::default()
                },
            },
            blockquote: RoleStyle {
                font: body.font.italic(),
                foreground: Color::DarkGray,
                background: Some(Color::Rgb(24, 24, 24)),
                paragraph: body.paragraph,
            },
            link: RoleStyle {
                foreground: Color::Blue,
                ..body
            },
            selection_highlight: RoleStyle {
                foreground: Color::White,
                background: Some(Color::Rgb(50, 80, 140)),
                ..body
            },
            search_highlight: RoleStyle {
                foreground: Color::Black,
                background: Some(Color::Yellow),
                ..body
            },
            list: ListStyle::default(),
        }
    }
}

/// A resolved attribute set: the style context in effect for one run of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextAttributes {
    pub font: FontSpec,
    pub foreground: Color,
    pub background: Option<Color>,
    pub paragraph: ParagraphStyle,
    pub link: Option<Url>,
}

impl TextAttributes {
    pub fn from_role(role: &RoleStyle) -> Self {
        Self {
            font: role.font,
            foreground: role.foreground,
            background: role.background,
            paragraph: role.paragraph,
            link: None,
        }
    }
}

impl Default for TextAttributes {
    fn default() -> Self {
        Self::from_role(&RoleStyle::default())
    }
}
