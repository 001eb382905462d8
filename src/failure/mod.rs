// src/failure/mod.rs
//
// Uniform view over anything that made a run blow up: a message plus its
// ordered causes. Flattening works on this shape only, so it stays
// independent of how the error was raised.

use crate::error::AggregateError;
use std::any::Any;
use std::error::Error as StdError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Each cause wraps the next one.
    Chain,
    /// Causes are siblings raised together.
    Aggregate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
    pub kind: FailureKind,
    pub causes: Vec<Failure>,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: FailureKind::Chain,
            causes: Vec::new(),
        }
    }

    pub fn caused_by(mut self, cause: Failure) -> Self {
        self.causes.push(cause);
        self
    }

    pub fn aggregate(message: impl Into<String>, causes: Vec<Failure>) -> Self {
        Self {
            message: message.into(),
            kind: FailureKind::Aggregate,
            causes,
        }
    }

    /// Build a failure tree from an error and its `source()` chain.
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        if let Some(aggregate) = err.downcast_ref::<AggregateError>() {
            let causes = aggregate
                .errors()
                .iter()
                .map(|e| {
                    let inner: &(dyn StdError + 'static) = e.as_ref();
                    Failure::from_error(inner)
                })
                .collect();
            return Failure::aggregate(aggregate.to_string(), causes);
        }

        let failure = Failure::new(err.to_string());
        match err.source() {
            Some(source) => failure.caused_by(Failure::from_error(source)),
            None => failure,
        }
    }

    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let inner: &(dyn StdError + 'static) = err.as_ref();
        Failure::from_error(inner)
    }

    /// Panic payloads are usually `&str` or `String`.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let detail = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Failure::new(format!("panicked: {}", detail))
    }

    /// Render the tree as text, one message per line.
    ///
    /// A chain indents each cause by one tab per depth. An aggregate at the
    /// root lists only its direct causes, each prefixed with a single tab.
    pub fn flatten(&self) -> String {
        let mut out = String::new();
        match self.kind {
            FailureKind::Chain => self.write_chain(&mut out, 0),
            FailureKind::Aggregate => {
                for cause in &self.causes {
                    push_line(&mut out, 1, &cause.message);
                }
            }
        }
        out
    }

    fn write_chain(&self, out: &mut String, depth: usize) {
        push_line(out, depth, &self.message);
        match self.kind {
            FailureKind::Chain => {
                for cause in &self.causes {
                    cause.write_chain(out, depth + 1);
                }
            }
            FailureKind::Aggregate => {
                for cause in &self.causes {
                    push_line(out, depth + 1, &cause.message);
                }
            }
        }
    }
}

fn push_line(out: &mut String, depth: usize, message: &str) {
    for _ in 0..depth {
        out.push('\t');
    }
    out.push_str(message);
    out.push('\n');
}
