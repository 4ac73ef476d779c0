//! Lazy URL tokenizer for a single line of markdown-ish text

/// Scheme prefix every extracted URL starts with
pub const SCHEME_PREFIX: &str = "https://";

/// Characters left behind by markdown link syntax; each becomes a space
const MARKDOWN_ARTIFACTS: [char; 3] = [']', ')', ','];

/// Iterator over the `https://` URL tokens of one line
///
/// A token runs from the scheme prefix to the next whitespace character or
/// the end of the line. The iterator owns a cleaned copy of the line, so a
/// fresh tokenizer must be created to scan the line again.
#[derive(Debug, Clone)]
pub struct UrlTokens {
    text: String,
    pos: usize,
}

impl UrlTokens {
    /// Creates a tokenizer over `line`
    pub fn new(line: &str) -> Self {
        let text = line.replace(MARKDOWN_ARTIFACTS, " ");
        Self { text, pos: 0 }
    }
}

impl Iterator for UrlTokens {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.text.get(self.pos..)?;
        let start = self.pos + rest.find(SCHEME_PREFIX)?;

        let tail = &self.text[start..];
        let len = tail.find(char::is_whitespace).unwrap_or(tail.len());
        self.pos = start + len;

        Some(tail[..len].trim().to_string())
    }
}

/// Returns the URL tokens of `line` in order of appearance
pub fn tokenize(line: &str) -> UrlTokens {
    UrlTokens::new(line)
}
