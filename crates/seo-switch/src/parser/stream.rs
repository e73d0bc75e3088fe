//! Lazy single-pass scanner over a template string.

use std::iter::FusedIterator;

use super::DELIMITER;
use super::grammar::parse_placeholder;
use super::token::Token;

/// Scan `template` into a lazy token stream.
///
/// ```
/// use seo_switch::parser::{Placeholder, Token, tokenize};
///
/// let tokens: Vec<Token<'_>> = tokenize("Prix: #MinPrice#").collect();
/// assert_eq!(tokens[0], Token::Literal("Prix: "));
/// assert_eq!(
///     tokens[1],
///     Token::Placeholder { placeholder: Placeholder::MinPrice, source: "#MinPrice#" }
/// );
/// ```
pub fn tokenize(template: &str) -> TokenStream<'_> {
    TokenStream::new(template)
}

/// Iterator of [`Token`]s over a borrowed template.
///
/// The stream is `Clone`, so a caller can restart a scan from any point
/// without re-reading the template. Adjacent literal text is always yielded
/// as one `Literal`; a `#...#` span that is not a placeholder stays part of
/// the surrounding literal.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    template: &'a str,
    /// Byte offset of the first character not yet yielded.
    position: usize,
    /// A placeholder found while scanning a literal, yielded on the next call.
    pending: Option<(Token<'a>, usize)>,
}

impl<'a> TokenStream<'a> {
    pub fn new(template: &'a str) -> Self {
        Self {
            template,
            position: 0,
            pending: None,
        }
    }

    /// Find the next placeholder at or after `from`, returning its token and
    /// byte range start/end.
    fn next_placeholder(&self, from: usize) -> Option<(usize, usize, Token<'a>)> {
        let mut search = from;
        while let Some(open_rel) = self.template[search..].find(DELIMITER) {
            let open = search + open_rel;
            let inner_start = open + DELIMITER.len_utf8();
            let close_rel = self.template[inner_start..].find(DELIMITER)?;
            let close = inner_start + close_rel;
            let end = close + DELIMITER.len_utf8();
            if let Some(placeholder) = parse_placeholder(&self.template[inner_start..close]) {
                let source = &self.template[open..end];
                return Some((open, end, Token::Placeholder { placeholder, source }));
            }
            // The closing delimiter may open the next placeholder.
            search = close;
        }
        None
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some((token, end)) = self.pending.take() {
            self.position = end;
            return Some(token);
        }
        if self.position >= self.template.len() {
            return None;
        }

        match self.next_placeholder(self.position) {
            Some((start, end, token)) if start == self.position => {
                self.position = end;
                Some(token)
            }
            Some((start, end, token)) => {
                let literal = &self.template[self.position..start];
                self.position = start;
                self.pending = Some((token, end));
                Some(Token::Literal(literal))
            }
            None => {
                let literal = &self.template[self.position..];
                self.position = self.template.len();
                Some(Token::Literal(literal))
            }
        }
    }
}

impl FusedIterator for TokenStream<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Placeholder;

    #[test]
    fn unmatched_delimiter_is_literal() {
        let tokens: Vec<_> = tokenize("50% #off").collect();
        assert_eq!(tokens, vec![Token::Literal("50% #off")]);
    }

    #[test]
    fn closing_delimiter_can_open_next_placeholder() {
        let tokens: Vec<_> = tokenize("n°#12 #MinPrice#").collect();
        assert_eq!(
            tokens,
            vec![
                Token::Literal("n°#12 "),
                Token::Placeholder {
                    placeholder: Placeholder::MinPrice,
                    source: "#MinPrice#",
                },
            ]
        );
    }

    #[test]
    fn clone_restarts_from_same_point() {
        let mut stream = tokenize("a#VCarosserie#b");
        stream.next();
        let restarted: Vec<_> = stream.clone().collect();
        let continued: Vec<_> = stream.collect();
        assert_eq!(restarted, continued);
        assert_eq!(restarted.len(), 2);
    }
}
