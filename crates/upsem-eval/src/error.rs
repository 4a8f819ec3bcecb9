//! Evaluation errors
//!
//! Every failure is a value; the evaluator never panics on an undefined
//! denotation. Each recursive evaluation frame wraps any error leaving it in
//! one [`EvalError::Context`] layer carrying that frame's printed formula,
//! so the rendered message is a trace from the outermost formula down to the
//! innermost failing subformula.

use thiserror::Error;
use upsem_core::{BinaryOp, ModelError};

pub type EvalResult<T> = Result<T, EvalError>;

/// An evaluation failure, possibly wrapped in formula context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A variable with no binding quantifier and no anaphoric antecedent.
    #[error("Variable {variable} has no binding quantifier or anaphoric antecedent")]
    UnboundVariable { variable: String },

    /// A binary connective outside the evaluated fragment.
    #[error("Invalid operator {operator} for binary formula")]
    InvalidOperator { operator: BinaryOp },

    /// An uninterpreted term or predicate, reported by the model.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// An inner failure, annotated with the formula being evaluated.
    #[error("In evaluating formula {formula}:\n{source}")]
    Context {
        formula: String,
        source: Box<EvalError>,
    },
}

impl EvalError {
    pub(crate) fn context(formula: String, source: EvalError) -> Self {
        EvalError::Context {
            formula,
            source: Box::new(source),
        }
    }

    /// The innermost error, with all formula context stripped.
    pub fn root_cause(&self) -> &EvalError {
        match self {
            EvalError::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
