//! Lexical analyzer of the `.osu` format.
//!
//! The format is line oriented, so every line becomes exactly one [`Token`] carrying the byte
//! range of the line. Lexing never fails.

mod cursor;
pub mod token;

use self::{
    cursor::Cursor,
    token::{Token, TokenStream},
};
use crate::mixin::SourceRangeMixinExt;

/// Analyzes and converts the `.osu` format text into [`TokenStream`].
#[must_use]
pub fn parse(source: &str) -> TokenStream<'_> {
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();
    while let Some((range, line)) = cursor.next_line() {
        tokens.push(Token::classify(line).into_wrapper_range(range));
    }
    log::trace!("lexed {} lines", cursor.line() - 1);
    TokenStream { tokens }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tokens_keep_line_ranges() {
        const SRC: &str = "osu file format v14\r\n\r\n[General]\r\nMode: 0\r\n";
        let stream = parse(SRC);
        let tokens = stream
            .iter()
            .map(|token| (*token.content(), token.range().clone()))
            .collect::<Vec<_>>();
        assert_eq!(
            tokens,
            [
                (Token::FormatVersion(14), 0..19),
                (Token::Blank, 21..21),
                (Token::Section("General"), 23..32),
                (
                    Token::KeyValue {
                        key: "Mode",
                        value: "0",
                    },
                    34..41
                ),
            ]
        );
        assert_eq!(&SRC[34..41], "Mode: 0");
    }

    #[test]
    fn empty_source() {
        assert!(parse("").is_empty());
        assert!(parse("\u{feff}").is_empty());
    }
}
