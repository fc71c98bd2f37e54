use std::io::Write;
use std::iter::Peekable;
use std::str::Chars;

use log::debug;

use crate::token::{Token, TokenKind};

/// Receives the lexer's side-channel output.
///
/// Unexpected characters are reported while scanning; tokens are reported in
/// order once the whole sequence (End included) has been produced.
pub trait TokenObserver {
    fn on_unexpected_char(&mut self, _ch: char) {}

    fn on_token(&mut self, _token: &Token) {}
}

/// Ignores everything.
pub struct NoopObserver;

impl TokenObserver for NoopObserver {}

/// Renders lexer diagnostics to a writer (usually stderr).
///
/// Unexpected characters are always written, the token dump only when `trace` is set.
pub struct WriteObserver<W> {
    writer: W,
    trace: bool,
}

impl<W> WriteObserver<W> {
    pub fn new(writer: W, trace: bool) -> WriteObserver<W> {
        WriteObserver { writer, trace }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> TokenObserver for WriteObserver<W>
where
    W: Write,
{
    fn on_unexpected_char(&mut self, ch: char) {
        // If the write fails, we don't care
        _ = writeln!(self.writer, "Unexpected character: {}", ch);
    }

    fn on_token(&mut self, token: &Token) {
        if self.trace {
            _ = writeln!(self.writer, "Token: {} ({})", token.text, token.kind.code());
        }
    }
}

pub struct Lexer<'a> {
    input_iter: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Lexer<'a> {
        Lexer {
            input_iter: input.chars().peekable(),
        }
    }

    /// Consume the next character from the list.
    fn read_char(&mut self) -> Option<char> {
        self.input_iter.next()
    }

    /// Get the next character from the list without consuming it.
    fn peek_char(&mut self) -> Option<&char> {
        self.input_iter.peek()
    }

    /// Consume whitespace until a non-whitespace character is found.
    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.peek_char() {
            if c.is_whitespace() {
                self.read_char();
            } else {
                break;
            }
        }
    }

    /// Read everything up to the closing quote verbatim.
    /// A string that is never closed runs to the end of the input.
    fn read_string(&mut self) -> Token {
        let mut str = String::new();

        while let Some(ch) = self.read_char() {
            if ch == '"' {
                break;
            }
            str.push(ch);
        }

        Token::new(TokenKind::String, str)
    }

    /// Read the current and following digits as a number token.
    fn read_number(&mut self, first: char) -> Token {
        let mut s = String::new();
        s.push(first);

        while let Some(&ch) = self.peek_char() {
            if is_digit(ch) {
                s.push(ch);
                self.read_char();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Number, s)
    }

    /// Read the current and following characters as an identifier or a keyword.
    fn read_identifier_or_keyword(&mut self, first: char) -> Token {
        let mut identifier = String::new();
        identifier.push(first);

        while let Some(&ch) = self.peek_char() {
            // `console.log` splits into the keyword and its member; other dotted words stay whole
            if ch == '.' && identifier == "console" {
                self.read_char();
                break;
            }

            if is_identifier_char(ch) {
                identifier.push(ch);
                self.read_char();
            } else {
                break;
            }
        }

        Token::word(identifier)
    }

    /// Read a new token from the characters list.
    /// Once the input is exhausted this keeps returning the End token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let c = match self.read_char() {
            Some(c) => c,
            None => return Token::end(),
        };

        match c {
            '+' => Token::new(TokenKind::Plus, "+"),
            '-' => Token::new(TokenKind::Minus, "-"),
            '*' => Token::new(TokenKind::Star, "*"),
            '/' => Token::new(TokenKind::Slash, "/"),

            '=' => match self.peek_char() {
                // Double equal
                Some('=') => {
                    self.read_char();
                    Token::new(TokenKind::Equal, "==")
                }
                _ => Token::new(TokenKind::Assign, "="),
            },

            '(' => Token::new(TokenKind::LParen, "("),
            ')' => Token::new(TokenKind::RParen, ")"),
            '{' => Token::new(TokenKind::LBrace, "{"),
            '}' => Token::new(TokenKind::RBrace, "}"),
            ';' => Token::new(TokenKind::Semicolon, ";"),

            '"' => self.read_string(),

            c if is_digit(c) => self.read_number(c),
            c if is_identifier_start(c) => self.read_identifier_or_keyword(c),

            c => Token::new(TokenKind::Unknown, c.to_string()),
        }
    }

    /// Scan the whole input without reporting anything.
    pub fn tokenize(self) -> Vec<Token> {
        self.tokenize_with(&mut NoopObserver)
    }

    /// Scan the whole input, reporting diagnostics and the final tokens to `observer`.
    pub fn tokenize_with<O>(mut self, observer: &mut O) -> Vec<Token>
    where
        O: TokenObserver + ?Sized,
    {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();

            match token.kind {
                TokenKind::End => {
                    tokens.push(token);
                    break;
                }
                TokenKind::Unknown => {
                    if let Some(ch) = token.text.chars().next() {
                        observer.on_unexpected_char(ch);
                    }
                }
                _ => {}
            }

            tokens.push(token);
        }

        debug!("tokenized {} tokens", tokens.len());

        for token in &tokens {
            observer.on_token(token);
        }

        tokens
    }
}

/// Convert source text to a token sequence ending with exactly one End token.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

/// Whether or not the given character is a digit
fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Whether or not the given character may begin an identifier
fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Whether or not the given character is valid inside an identifier
fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

#[cfg(test)]
mod tests {
    use crate::lexer::{tokenize, Lexer, TokenObserver, WriteObserver};
    use crate::token::{Token, TokenKind};

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_operators() {
        let input = "+-*/= == ===";

        assert_eq!(
            kinds(input),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Assign,
                TokenKind::Equal,
                TokenKind::Equal,
                TokenKind::Assign,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_delimiters() {
        let input = "(){};";

        assert_eq!(
            kinds(input),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Semicolon,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_identifier() {
        let input = "hello _world _hello_world_ x1";
        let mut lex = Lexer::new(input);
        assert_eq!(lex.next_token(), Token::new(TokenKind::Identifier, "hello"));
        assert_eq!(lex.next_token(), Token::new(TokenKind::Identifier, "_world"));
        assert_eq!(
            lex.next_token(),
            Token::new(TokenKind::Identifier, "_hello_world_")
        );
        assert_eq!(lex.next_token(), Token::new(TokenKind::Identifier, "x1"));
    }

    #[test]
    fn test_dotted_identifier() {
        assert_eq!(
            tokenize("a.b.c"),
            vec![Token::new(TokenKind::Identifier, "a.b.c"), Token::end()]
        );
        assert_eq!(
            tokenize("a."),
            vec![Token::new(TokenKind::Identifier, "a."), Token::end()]
        );
    }

    #[test]
    fn test_keyword_member_access() {
        let expected = vec![
            Token::new(TokenKind::Keyword, "console"),
            Token::new(TokenKind::Identifier, "log"),
            Token::new(TokenKind::LParen, "("),
            Token::new(TokenKind::RParen, ")"),
            Token::end(),
        ];
        assert_eq!(tokenize("console.log()"), expected);
        assert_eq!(tokenize("console log()"), expected);

        assert_eq!(
            tokenize("console.log.x"),
            vec![
                Token::new(TokenKind::Keyword, "console"),
                Token::new(TokenKind::Identifier, "log.x"),
                Token::end(),
            ]
        );
        // Only `console` is split, not words that merely start with it
        assert_eq!(
            tokenize("consoles.log"),
            vec![Token::new(TokenKind::Identifier, "consoles.log"), Token::end()]
        );
        // Other reserved words have no members
        assert_eq!(
            tokenize("let.x function.y"),
            vec![
                Token::new(TokenKind::Identifier, "let.x"),
                Token::new(TokenKind::Identifier, "function.y"),
                Token::end(),
            ]
        );
    }

    #[test]
    fn test_number() {
        let input = "012312 7x 99999999999999999999999";
        let mut lex = Lexer::new(input);
        assert_eq!(lex.next_token(), Token::new(TokenKind::Number, "012312"));
        assert_eq!(lex.next_token(), Token::new(TokenKind::Number, "7"));
        assert_eq!(lex.next_token(), Token::new(TokenKind::Identifier, "x"));
        // No range check while lexing
        assert_eq!(
            lex.next_token(),
            Token::new(TokenKind::Number, "99999999999999999999999")
        );
    }

    #[test]
    fn test_string() {
        let input = "\"foobar\" \"foo \\n bar\" \"\" \"not closed";
        let mut lex = Lexer::new(input);
        assert_eq!(lex.next_token(), Token::new(TokenKind::String, "foobar"));
        // No escape processing
        assert_eq!(
            lex.next_token(),
            Token::new(TokenKind::String, "foo \\n bar")
        );
        assert_eq!(lex.next_token(), Token::new(TokenKind::String, ""));
        assert_eq!(lex.next_token(), Token::new(TokenKind::String, "not closed"));
        assert_eq!(lex.next_token(), Token::end());
    }

    #[test]
    fn test_keywords() {
        let input = "let const function console";

        for token in tokenize(input).iter().take(4) {
            assert_eq!(token.kind, TokenKind::Keyword, "{} is reserved", token.text);
        }
    }

    #[test]
    fn test_unknown_characters() {
        assert_eq!(
            tokenize("@#!"),
            vec![
                Token::new(TokenKind::Unknown, "@"),
                Token::new(TokenKind::Unknown, "#"),
                Token::new(TokenKind::Unknown, "!"),
                Token::end(),
            ]
        );
        // Letters are ASCII only
        assert_eq!(
            tokenize("é,"),
            vec![
                Token::new(TokenKind::Unknown, "é"),
                Token::new(TokenKind::Unknown, ","),
                Token::end(),
            ]
        );
        assert_eq!(
            tokenize("xé"),
            vec![
                Token::new(TokenKind::Identifier, "x"),
                Token::new(TokenKind::Unknown, "é"),
                Token::end(),
            ]
        );
    }

    #[test]
    fn test_eof() {
        assert_eq!(tokenize(""), vec![Token::end()]);
        assert_eq!(tokenize(" \t\n "), vec![Token::end()]);

        let mut lex = Lexer::new("1");
        lex.next_token();
        assert_eq!(lex.next_token(), Token::end());
        assert_eq!(lex.next_token(), Token::end());
    }

    #[test]
    fn test_single_end_marker() {
        let inputs = vec!["", "let x = 5;", "\"open", "@@@", "console.log(x)", "=="];

        for input in inputs {
            let tokens = tokenize(input);
            let ends = tokens.iter().filter(|t| t.is(TokenKind::End)).count();
            assert_eq!(ends, 1, "expected one End token for {:?}", input);
            assert_eq!(tokens.last(), Some(&Token::end()));
        }
    }

    #[test]
    fn test_tokenize_is_repeatable() {
        let input = "let s = \"abc\"; console.log(s); ? 12 == 3";
        assert_eq!(tokenize(input), tokenize(input));
    }

    #[test]
    fn test_observer_order() {
        #[derive(Default)]
        struct Recorder {
            events: Vec<String>,
        }

        impl TokenObserver for Recorder {
            fn on_unexpected_char(&mut self, ch: char) {
                self.events.push(format!("unexpected {}", ch));
            }

            fn on_token(&mut self, token: &Token) {
                self.events.push(format!("token {:?}", token.kind));
            }
        }

        let mut recorder = Recorder::default();
        let tokens = Lexer::new("x @ ?").tokenize_with(&mut recorder);

        assert_eq!(tokens.len(), 4);
        assert_eq!(
            recorder.events,
            vec![
                "unexpected @",
                "unexpected ?",
                "token Identifier",
                "token Unknown",
                "token Unknown",
                "token End",
            ]
        );
    }

    #[test]
    fn test_write_observer() {
        let mut observer = WriteObserver::new(Vec::new(), true);
        Lexer::new("let x = $;").tokenize_with(&mut observer);
        let output = String::from_utf8(observer.into_inner()).unwrap();

        assert_eq!(
            output,
            "Unexpected character: $\n\
             Token: let (3)\n\
             Token: x (2)\n\
             Token: = (8)\n\
             Token: $ (16)\n\
             Token: ; (14)\n\
             Token:  (15)\n"
        );

        let mut quiet = WriteObserver::new(Vec::new(), false);
        Lexer::new("let x = $;").tokenize_with(&mut quiet);
        assert_eq!(quiet.into_inner(), b"Unexpected character: $\n".to_vec());
    }
}
