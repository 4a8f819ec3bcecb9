//! upsem-core - shared surfaces of the upsem update-semantics engine
//!
//! This crate provides:
//! - **Expression AST**: the six-connective Quantified Modal Logic fragment
//!   (negation, epistemic modals, conjunction, disjunction, conditional,
//!   the two quantifiers, identity, and predication)
//! - **Formula rendering**: `Display` implementations producing conventional
//!   logical glyphs, used verbatim in evaluation error traces
//! - **Model interface**: the [`Model`] trait every evaluator consumes, plus
//!   [`FiniteModel`], a table-backed implementation for finite models
//!
//! The evaluator itself lives in `upsem-eval`; this crate holds everything a
//! client needs to build formulas and models without pulling in the engine.

pub mod ast;
pub mod format;
pub mod model;

pub use ast::{negate, BinaryOp, Expression, Quantifier, Term, UnaryOp};
pub use model::{
    Extension, FiniteModel, FiniteModelBuilder, Individual, Model, ModelError, Tuple, World,
};
