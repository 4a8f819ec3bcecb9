//! upsem-eval - update semantics for Quantified Modal Logic
//!
//! This crate provides:
//! - **Semantic entities**: referent systems, possibilities, and information
//!   states, as immutable structurally-compared values
//! - **Update evaluator**: the compositional function from a formula and an
//!   input information state to the output information state
//! - **Semantic relations**: consistency, coherence, support, the
//!   entailment family, and equivalence, computed by quantifying over the
//!   information states definable from a finite model
//!
//! # Quick start
//!
//! ```
//! use upsem_core::{Expression, FiniteModel, Term};
//! use upsem_eval::{evaluate, InformationState};
//!
//! // Two worlds, two individuals; P is true of e0 everywhere and of e1 at w1.
//! let model = FiniteModel::builder(2, 2)
//!     .predicate("P", [vec![vec![0]], vec![vec![0], vec![1]]])
//!     .build();
//!
//! // "There is a P", processed against total ignorance.
//! let formula = Expression::exists("x", Expression::predication("P", [Term::variable("x")]));
//! let state = InformationState::ignorant(&model);
//! let output = evaluate(&formula, &state, &model).unwrap();
//!
//! // One survivor per witness per world: ⟨w0, x↦e0⟩, ⟨w1, x↦e0⟩, ⟨w1, x↦e1⟩.
//! assert_eq!(output.len(), 3);
//! ```

pub mod error;
pub mod eval;
pub mod possibility;
pub mod referent;
pub mod relations;
pub mod state;

pub use error::{EvalError, EvalResult};
pub use eval::evaluate;
pub use possibility::{Peg, Possibility};
pub use referent::ReferentSystem;
pub use relations::{
    allows, coherent, consistent, consistent_with, entails, entails_0, entails_c, entails_g,
    equivalent, is_supported_by, similar_possibilities, similar_states, sub_states, supports,
};
pub use state::InformationState;
