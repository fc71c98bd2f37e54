pub mod lexer;
pub mod token;

pub use lexer::{tokenize, Lexer, NoopObserver, TokenObserver, WriteObserver};
pub use token::{Token, TokenKind};
