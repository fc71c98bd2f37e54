use std::io::{self, Write};

use log::debug;
use rustyline::error::ReadlineError;
use rustyline::Editor;

use stine_interpreter::Evaluator;
use stine_lexer::{Lexer, WriteObserver};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What the editor loop should do after a line was handled.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Step {
    /// The line was run (successfully or not) and belongs in history
    Ran,
    /// Blank line, nothing happened
    Skipped,
    Exit,
}

/// One interactive session: a single evaluator, so bindings outlive the line that made them.
pub struct Session<W, E> {
    evaluator: Evaluator<W>,
    errors: E,
}

impl<W, E> Session<W, E>
where
    W: Write,
    E: Write,
{
    pub fn new(out: W, errors: E) -> Self {
        Session {
            evaluator: Evaluator::with_output(out),
            errors,
        }
    }

    /// Run one line of input. Lexer diagnostics and run errors go to the error writer.
    pub fn eval_line(&mut self, line: &str) -> Step {
        let line = line.trim();

        match line {
            "exit" | "quit" => return Step::Exit,
            "" => return Step::Skipped,
            _ => {}
        }

        let tokens = Lexer::new(line).tokenize_with(&mut WriteObserver::new(&mut self.errors, false));

        if let Err(err) = self.evaluator.run(&tokens) {
            _ = writeln!(self.errors, "Error: {}", err);
        }
        debug!("{} binding(s) in scope", self.evaluator.env().len());

        Step::Ran
    }
}

pub fn repl() {
    println!("stine v{}", VERSION);

    let mut session = Session::new(io::stdout(), io::stderr());

    // `()` can be used when no completer is required
    let mut rl = Editor::<()>::new();
    loop {
        match rl.readline(">> ") {
            Ok(line) => match session.eval_line(&line) {
                Step::Exit => break,
                Step::Skipped => {}
                Step::Ran => {
                    rl.add_history_entry(line.as_str());
                }
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }
}
