/// The kind of a lexed token.
///
/// The declaration order is significant: [`TokenKind::code`] is the
/// zero-based position of the variant and is what the token trace prints.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    // Literals
    Number,
    String,
    Identifier,
    Keyword,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Assign,
    Equal,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,

    // Special
    End,
    Unknown,
}

impl TokenKind {
    /// Numeric code of the kind, as shown in `Token: <text> (<code>)` traces.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// The closed set of reserved words.
pub const KEYWORDS: [&str; 4] = ["let", "const", "function", "console"];

/// Whether or not the given word is reserved.
pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

/// A single lexeme together with its kind.
///
/// Numbers keep their digit text; conversion happens when they are evaluated.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Token {
        Token {
            kind,
            text: text.into(),
        }
    }

    /// The end marker that terminates every token sequence.
    pub fn end() -> Token {
        Token::new(TokenKind::End, "")
    }

    /// Get the Token for the given word: a keyword if reserved, an identifier otherwise.
    pub fn word(s: String) -> Token {
        if is_keyword(&s) {
            Token::new(TokenKind::Keyword, s)
        } else {
            Token::new(TokenKind::Identifier, s)
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Whether this token is the given reserved word.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }

    /// Whether this token is an identifier with exactly the given name.
    pub fn is_identifier(&self, name: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == name
    }
}
