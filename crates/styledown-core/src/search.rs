//! Case-insensitive search over rendered text.
//!
//! Matches are advisory overlay data: they never modify a [`crate::buffer::StyledBuffer`].
//! Presentation code composites the search highlight on top of the run attributes (see
//! [`crate::render`]).
use crate::range::TextRange;

/// Finds non-overlapping, case-insensitive occurrences of `query` in `text`.
///
/// Scanning is left to right and resumes at the end of each match, so `"aa"` in `"aaaa"` yields
/// two matches, not three. An empty query matches nothing.
///
/// Ranges are byte offsets into `text`.
///
/// ```
/// use styledown_core::range::TextRange;
/// use styledown_core::search::find_matches;
///
/// let hits = find_matches("the cat sat on the mat", "THE");
/// assert_eq!(hits, vec![TextRange::new(0, 3), TextRange::new(15, 3)]);
/// assert!(find_matches("the cat", "").is_empty());
/// ```
pub fn find_matches(text: &str, query: &str) -> Vec<TextRange> {
    if query.is_empty() {
        return Vec::new();
    }
    if text.is_ascii() && query.is_ascii() {
        return find_ascii(text.as_bytes(), query.as_bytes());
    }
    find_unicode(text, query)
}

fn find_ascii(haystack: &[u8], needle: &[u8]) -> Vec<TextRange> {
    let mut out = Vec::new();
    let n = needle.len();
    if n > haystack.len() {
        return out;
    }
    let mut i = 0;
    while i + n <= haystack.len() {
        if haystack[i..i + n].eq_ignore_ascii_case(needle) {
            out.push(TextRange::new(i, n));
            i += n;
        } else {
            i += 1;
        }
    }
    out
}

fn find_unicode(text: &str, query: &str) -> Vec<TextRange> {
    let needle = query.chars().collect::<Vec<_>>();
    let mut out = Vec::new();
    let mut cursor = 0;
    while cursor < text.len() {
        match match_len_at(&text[cursor..], &needle) {
            Some(len) => {
                out.push(TextRange::new(cursor, len));
                cursor += len;
            }
            None => {
                let step = text[cursor..].chars().next().map_or(1, char::len_utf8);
                cursor += step;
            }
        }
    }
    out
}

/// Byte length of the match of `needle` at the start of `haystack`, compared char by char.
fn match_len_at(haystack: &str, needle: &[char]) -> Option<usize> {
    let mut chars = haystack.char_indices();
    for expected in needle {
        let (_, ch) = chars.next()?;
        if !chars_eq_ignore_case(ch, *expected) {
            return None;
        }
    }
    Some(chars.next().map_or(haystack.len(), |(idx, _)| idx))
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Matches for one query plus the match the user is currently looking at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    query: String,
    matches: Vec<TextRange>,
    active: Option<usize>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `query` against `text`, replacing any previous results. The first match (if any)
    /// becomes active.
    pub fn search(&mut self, text: &str, query: &str) -> usize {
        self.query = query.to_string();
        self.matches = find_matches(text, query);
        self.active = if self.matches.is_empty() {
            None
        } else {
            Some(0)
        };
        self.matches.len()
    }

    /// Re-runs the current query, e.g. after the document was re-rendered.
    pub fn refresh(&mut self, text: &str) -> usize {
        let previous = self.active;
        let query = std::mem::take(&mut self.query);
        let count = self.search(text, &query);
        if let Some(idx) = previous {
            if idx < count {
                self.active = Some(idx);
            }
        }
        count
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[TextRange] {
        &self.matches
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<TextRange> {
        self.active.and_then(|idx| self.matches.get(idx).copied())
    }

    /// Advances to the next match, wrapping to the first.
    pub fn next(&mut self) -> Option<TextRange> {
        if self.matches.is_empty() {
            return None;
        }
        let idx = match self.active {
            Some(idx) => (idx + 1) % self.matches.len(),
            None => 0,
        };
        self.active = Some(idx);
        self.active()
    }

    /// Steps back to the previous match, wrapping to the last.
    pub fn previous(&mut self) -> Option<TextRange> {
        if self.matches.is_empty() {
            return None;
        }
        let len = self.matches.len();
        let idx = match self.active {
            Some(0) | None => len - 1,
            Some(idx) => idx - 1,
        };
        self.active = Some(idx);
        self.active()
    }
}
