//! Tokenizer for query text

use crate::errors::{Position, QueryError, QueryResult};

/// Token kinds
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    /// Quoted string with escapes resolved
    String(String),
    /// Identifier or keyword, as written
    Ident(String),
    /// `@name`, including the `@`
    Parameter(String),
    /// Operator or punctuation
    Symbol(&'static str),
    Eof,
}

/// A token and the byte offset where it starts
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

impl Token {
    /// Case-insensitive keyword match
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident(s) if s.eq_ignore_ascii_case(keyword))
    }

    pub fn is_symbol(&self, symbol: &str) -> bool {
        matches!(self.kind, TokenKind::Symbol(s) if s == symbol)
    }
}

/// Reserved words that never name a property or alias
pub const KEYWORDS: &[&str] = &[
    "SELECT", "TOP", "VALUE", "FROM", "AS", "WHERE", "ORDER", "BY", "ASC", "DESC", "AND", "OR",
    "NOT", "IN", "BETWEEN", "TRUE", "FALSE", "NULL", "UNDEFINED",
];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(word))
}

/// Longest symbols first so that `>>>` wins over `>>` and `>`
const SYMBOLS: &[&str] = &[
    ">>>", "<<", ">>", "<=", ">=", "!=", "<>", "||", "??", "(", ")", "[", "]", "{", "}", ",",
    ".", ":", "?", "*", "/", "%", "+", "-", "=", "<", ">", "&", "^", "|", "~",
];

/// Splits `text` into tokens, ending with [`TokenKind::Eof`]
pub fn tokenize(text: &str) -> QueryResult<Vec<Token>> {
    let mut lexer = Lexer { text, pos: 0 };
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

struct Lexer<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn error(&self, offset: usize, reason: impl Into<String>) -> QueryError {
        QueryError::syntax(Position::locate(self.text, offset), reason)
    }

    fn skip_trivia(&mut self) {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();
            if self.rest().starts_with("--") {
                match self.rest().find('\n') {
                    Some(nl) => self.pos += nl + 1,
                    None => self.pos = self.text.len(),
                }
            } else {
                return;
            }
        }
    }

    fn next_token(&mut self) -> QueryResult<Token> {
        self.skip_trivia();
        let offset = self.pos;
        let c = match self.peek() {
            Some(c) => c,
            None => {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    offset,
                })
            }
        };

        let kind = if c.is_ascii_digit()
            || (c == '.' && self.rest()[1..].starts_with(|d: char| d.is_ascii_digit()))
        {
            self.number()?
        } else if c == '\'' || c == '"' {
            TokenKind::String(self.string(c)?)
        } else if c == '@' {
            self.pos += 1;
            let name = self.word();
            if name.is_empty() {
                return Err(self.error(offset, "Expected parameter name after '@'"));
            }
            TokenKind::Parameter(format!("@{}", name))
        } else if c.is_alphabetic() || c == '_' || c == '$' {
            TokenKind::Ident(self.word().to_string())
        } else {
            match SYMBOLS.iter().find(|s| self.rest().starts_with(**s)) {
                Some(symbol) => {
                    self.pos += symbol.len();
                    TokenKind::Symbol(*symbol)
                }
                None => return Err(self.error(offset, format!("Unexpected character '{}'", c))),
            }
        };
        Ok(Token { kind, offset })
    }

    fn word(&mut self) -> &'a str {
        let rest = self.rest();
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
            .unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    fn number(&mut self) -> QueryResult<TokenKind> {
        let start = self.pos;
        let bytes = self.text.as_bytes();
        let digits = |pos: &mut usize| {
            while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
                *pos += 1;
            }
        };

        let mut pos = self.pos;
        if self.rest().starts_with("0x") || self.rest().starts_with("0X") {
            pos += 2;
            while pos < bytes.len() && bytes[pos].is_ascii_hexdigit() {
                pos += 1;
            }
            let hex = &self.text[start + 2..pos];
            self.pos = pos;
            return u64::from_str_radix(hex, 16)
                .map(|n| TokenKind::Number(n as f64))
                .map_err(|_| self.error(start, "Invalid hexadecimal literal"));
        }

        digits(&mut pos);
        if pos < bytes.len() && bytes[pos] == b'.' {
            pos += 1;
            digits(&mut pos);
        }
        if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
            let mut exp = pos + 1;
            if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
                exp += 1;
            }
            if exp < bytes.len() && bytes[exp].is_ascii_digit() {
                pos = exp;
                digits(&mut pos);
            }
        }
        self.pos = pos;
        self.text[start..pos]
            .parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| self.error(start, "Invalid number literal"))
    }

    fn string(&mut self, quote: char) -> QueryResult<String> {
        let start = self.pos;
        self.pos += 1;
        let mut out = String::new();
        loop {
            let c = match self.peek() {
                Some(c) => c,
                None => return Err(self.error(start, "Unterminated string literal")),
            };
            self.pos += c.len_utf8();
            if c == quote {
                return Ok(out);
            }
            if c != '\\' {
                out.push(c);
                continue;
            }
            let escape_at = self.pos - 1;
            let e = match self.peek() {
                Some(e) => e,
                None => return Err(self.error(start, "Unterminated string literal")),
            };
            self.pos += e.len_utf8();
            match e {
                'b' => out.push('\u{8}'),
                'f' => out.push('\u{c}'),
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                'u' => out.push(self.unicode_escape(escape_at)?),
                other => out.push(other),
            }
        }
    }

    fn unicode_escape(&mut self, escape_at: usize) -> QueryResult<char> {
        let first = self.hex4(escape_at)?;
        if (0xD800..0xDC00).contains(&first) && self.rest().starts_with("\\u") {
            self.pos += 2;
            let second = self.hex4(escape_at)?;
            let combined = 0x10000 + ((first - 0xD800) << 10) + (second.wrapping_sub(0xDC00) & 0x3FF);
            return Ok(char::from_u32(combined).unwrap_or('\u{FFFD}'));
        }
        Ok(char::from_u32(first).unwrap_or('\u{FFFD}'))
    }

    fn hex4(&mut self, escape_at: usize) -> QueryResult<u32> {
        let digits = self.rest().get(..4).unwrap_or("");
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(self.error(escape_at, "Invalid unicode escape"));
        }
        self.pos += 4;
        u32::from_str_radix(digits, 16).map_err(|_| self.error(escape_at, "Invalid unicode escape"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_select() {
        assert_eq!(
            kinds("SELECT * FROM c"),
            vec![
                TokenKind::Ident("SELECT".into()),
                TokenKind::Symbol("*"),
                TokenKind::Ident("FROM".into()),
                TokenKind::Ident("c".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_longest_symbol_wins() {
        assert_eq!(
            kinds("a >>> 1 >= 2"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Symbol(">>>"),
                TokenKind::Number(1.0),
                TokenKind::Symbol(">="),
                TokenKind::Number(2.0),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("1.5e2")[0], TokenKind::Number(150.0));
        assert_eq!(kinds(".5")[0], TokenKind::Number(0.5));
        assert_eq!(kinds("0x1F")[0], TokenKind::Number(31.0));
    }

    #[test]
    fn test_strings_and_escapes() {
        assert_eq!(kinds(r#"'it\'s'"#)[0], TokenKind::String("it's".into()));
        assert_eq!(kinds(r#""a\nb""#)[0], TokenKind::String("a\nb".into()));
        assert_eq!(kinds(r#""é""#)[0], TokenKind::String("é".into()));
    }

    #[test]
    fn test_parameter() {
        assert_eq!(kinds("@limit")[0], TokenKind::Parameter("@limit".into()));
    }

    #[test]
    fn test_line_comment_skipped() {
        assert_eq!(
            kinds("-- note\n1"),
            vec![TokenKind::Number(1.0), TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("SELECT 'abc").unwrap_err();
        assert_eq!(err.code(), crate::errors::QueryErrorCode::SyntaxError);
        assert_eq!(err.position().unwrap().column, 8);
    }

    #[test]
    fn test_unexpected_character() {
        assert!(tokenize("SELECT #").is_err());
    }

    #[test]
    fn test_keyword_lookup() {
        assert!(is_keyword("select"));
        assert!(is_keyword("Between"));
        assert!(!is_keyword("udf"));
    }
}
