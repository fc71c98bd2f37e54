pub mod cursor;
mod environment;
pub mod error;
mod evaluator;

pub use cursor::Cursor;
pub use environment::Environment;
pub use error::{EvalError, ParseError, RuntimeError, RuntimeResult};
pub use evaluator::Evaluator;
