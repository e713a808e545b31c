use crate::stream::{Stream, Unit};
use arbor_dom::Value;

/// A structural token, as seen outside quoted attribute values.
#[derive(Debug)]
pub(crate) enum Token {
    /// `<`
    Lt,
    /// `</`
    LtSlash,
    /// `>`
    Gt,
    /// `/`
    Slash,
    /// `=`
    Equals,
    /// `"` or `'`
    Quote(char),
    /// A run of insignificant whitespace (space, tab, newline).
    Ws,
    /// A run of ordinary characters: tag names, attribute names, text.
    Chars(String),
    /// A placeholder, atomic.
    Value(Value),
    /// `<!---`
    CommentOpen,
}

/// One verbatim piece of a quoted attribute value.
#[derive(Debug)]
pub(crate) enum QuotedPiece {
    Ch(char),
    Value(Value),
    /// The matching quote, or end of input.
    End,
}

pub(crate) struct Scanner {
    stream: Stream,
}

impl Scanner {
    pub fn new(stream: Stream) -> Self {
        Scanner { stream }
    }

    fn is_structural(c: char) -> bool {
        matches!(c, '<' | '>' | '/' | '=' | '"' | '\'')
    }

    /// The next structural token, or `None` at end of input.
    pub fn next(&mut self) -> Option<Token> {
        let unit = self.stream.next()?;
        Some(match unit {
            Unit::Value(value) => Token::Value(value),
            Unit::Ch('<') => {
                if self.stream.starts_with("!---") {
                    self.stream.advance(4);
                    Token::CommentOpen
                } else if self.stream.starts_with("/") {
                    self.stream.advance(1);
                    Token::LtSlash
                } else {
                    Token::Lt
                }
            }
            Unit::Ch('>') => Token::Gt,
            Unit::Ch('/') => Token::Slash,
            Unit::Ch('=') => Token::Equals,
            Unit::Ch(q @ ('"' | '\'')) => Token::Quote(q),
            Unit::Ch(c) if c.is_whitespace() => {
                while let Some(&Unit::Ch(next)) = self.stream.peek() {
                    if !next.is_whitespace() {
                        break;
                    }
                    self.stream.advance(1);
                }
                Token::Ws
            }
            Unit::Ch(c) => {
                let mut run = String::new();
                run.push(c);
                while let Some(&Unit::Ch(next)) = self.stream.peek() {
                    if Self::is_structural(next) || next.is_whitespace() {
                        break;
                    }
                    run.push(next);
                    self.stream.advance(1);
                }
                Token::Chars(run)
            }
        })
    }

    /// Scans inside a quoted attribute value: every character, whitespace
    /// and placeholders included, reported verbatim until the matching
    /// quote. An unterminated quote ends at end of input.
    pub fn next_quoted(&mut self, quote: char) -> QuotedPiece {
        match self.stream.next() {
            None => QuotedPiece::End,
            Some(Unit::Value(value)) => QuotedPiece::Value(value),
            Some(Unit::Ch(c)) if c == quote => QuotedPiece::End,
            Some(Unit::Ch(c)) => QuotedPiece::Ch(c),
        }
    }

    /// Discards everything up to and including the comment closer `-->`.
    /// An unterminated comment swallows the rest of the input.
    pub fn skip_comment(&mut self) {
        loop {
            if self.stream.starts_with("-->") {
                self.stream.advance(3);
                return;
            }
            if self.stream.next().is_none() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(source: &str) -> Vec<Token> {
        let mut scanner = Scanner::new(Stream::new(&[source], vec![]));
        let mut tokens = Vec::new();
        while let Some(t) = scanner.next() {
            tokens.push(t);
        }
        tokens
    }

    #[test]
    fn tokenizes_a_simple_tag() {
        let tokens = scan_all("<input type=\"a\"/>");
        assert!(matches!(tokens[0], Token::Lt));
        assert!(matches!(&tokens[1], Token::Chars(s) if s == "input"));
        assert!(matches!(tokens[2], Token::Ws));
        assert!(matches!(&tokens[3], Token::Chars(s) if s == "type"));
        assert!(matches!(tokens[4], Token::Equals));
        assert!(matches!(tokens[5], Token::Quote('"')));
    }

    #[test]
    fn closing_tag_and_comment_markers_are_units() {
        let tokens = scan_all("</div><!--- hidden -->");
        assert!(matches!(tokens[0], Token::LtSlash));
        assert!(matches!(&tokens[1], Token::Chars(s) if s == "div"));
        assert!(matches!(tokens[2], Token::Gt));
        assert!(matches!(tokens[3], Token::CommentOpen));
    }

    #[test]
    fn whitespace_runs_collapse_to_one_token() {
        let tokens = scan_all("a \t\n b");
        assert!(matches!(&tokens[0], Token::Chars(s) if s == "a"));
        assert!(matches!(tokens[1], Token::Ws));
        assert!(matches!(&tokens[2], Token::Chars(s) if s == "b"));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn quoted_mode_reports_verbatim_until_quote() {
        let mut scanner = Scanner::new(Stream::new(&["a b\"c"], vec![]));
        let mut got = String::new();
        loop {
            match scanner.next_quoted('"') {
                QuotedPiece::Ch(c) => got.push(c),
                QuotedPiece::Value(_) => panic!("no placeholders here"),
                QuotedPiece::End => break,
            }
        }
        assert_eq!(got, "a b");
        assert!(matches!(scanner.next(), Some(Token::Chars(s)) if s == "c"));
    }
}
