//! Definitions of the line token of the `.osu` format.

use crate::mixin::SourceRangeMixin;

const FORMAT_VERSION_PREFIX: &str = "osu file format v";

/// A classified line of the `.osu` format.
///
/// The lexer does not know which section it is in, so the same text may be meaningful in one
/// section and unmatched in another. That is decided by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub enum Token<'a> {
    /// `osu file format vN`, the first line of a beatmap.
    FormatVersion(u32),
    /// `[Name]`. Starts the section `Name`.
    Section(&'a str),
    /// `Key: value`, where `Key` is a word. Both sides are trimmed.
    KeyValue {
        /// The text before the first colon.
        key: &'a str,
        /// The text after the first colon. May be empty.
        value: &'a str,
    },
    /// A comma-delimited line such as a timing point or a hit object.
    Fields(&'a str),
    /// `// comment`, without the slashes.
    Comment(&'a str),
    /// A line with nothing but whitespace.
    Blank,
    /// Any other non-blank line.
    Text(&'a str),
}

/// A token with the byte range of its line.
pub type TokenWithRange<'a> = SourceRangeMixin<Token<'a>>;

fn is_word(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(char::is_alphabetic)
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

impl<'a> Token<'a> {
    /// Classifies one line, which must not contain a line break.
    #[must_use]
    pub fn classify(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Blank;
        }
        if let Some(comment) = line.strip_prefix("//") {
            return Self::Comment(comment.trim());
        }
        if let Some(version) = line.strip_prefix(FORMAT_VERSION_PREFIX) {
            if let Ok(version) = version.trim().parse() {
                return Self::FormatVersion(version);
            }
        }
        if let Some(name) = line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            return Self::Section(name.trim());
        }
        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim();
            if is_word(key) {
                return Self::KeyValue {
                    key,
                    value: value.trim(),
                };
            }
        }
        if line.contains(',') {
            return Self::Fields(line);
        }
        Self::Text(line)
    }

    /// Whether the line carries nothing to parse.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Comment(_) | Self::Blank)
    }
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FormatVersion(version) => write!(f, "{FORMAT_VERSION_PREFIX}{version}"),
            Self::Section(name) => write!(f, "[{name}]"),
            Self::KeyValue { key, value } => write!(f, "{key}: {value}"),
            Self::Fields(text) | Self::Text(text) => f.write_str(text),
            Self::Comment(comment) => write!(f, "//{comment}"),
            Self::Blank => Ok(()),
        }
    }
}

/// Tokens of a whole source in line order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TokenStream<'a> {
    /// The tokens, one per line.
    pub tokens: Vec<TokenWithRange<'a>>,
}

impl<'a> TokenStream<'a> {
    /// Iterates the tokens.
    pub fn iter(&self) -> std::slice::Iter<'_, TokenWithRange<'a>> {
        self.tokens.iter()
    }

    /// The number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the source had no line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<'a, 'b> IntoIterator for &'b TokenStream<'a> {
    type Item = &'b TokenWithRange<'a>;
    type IntoIter = std::slice::Iter<'b, TokenWithRange<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
