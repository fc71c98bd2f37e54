use stine_lexer::{Token, TokenKind};

/// Forward-only position in a token sequence, shared by statement and expression parsing.
#[derive(Debug, Clone)]
pub struct Cursor<'t> {
    tokens: &'t [Token],
    position: usize,
}

impl<'t> Cursor<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self::at(tokens, 0)
    }

    /// Start at the given offset, e.g. to exercise a single production.
    pub fn at(tokens: &'t [Token], offset: usize) -> Self {
        Cursor {
            tokens,
            position: offset,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// The current token, if the sequence is not exhausted.
    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    /// Whether the current token has the given kind.
    pub fn check(&self, kind: TokenKind) -> bool {
        matches!(self.peek(), Some(token) if token.is(kind))
    }

    /// Consume the current token.
    pub fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.position);
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Consume the current token only if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> Option<&'t Token> {
        if self.check(kind) {
            self.advance()
        } else {
            None
        }
    }

    /// Exhausted, or sitting on the End marker.
    pub fn is_at_end(&self) -> bool {
        match self.peek() {
            Some(token) => token.is(TokenKind::End),
            None => true,
        }
    }
}
