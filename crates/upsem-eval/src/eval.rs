//! The compositional update function
//!
//! [`evaluate`] maps a formula, an input information state, and a model to
//! the output information state that results from processing the formula.
//! Connectives fall into two families:
//!
//! - **Sequential updates** (conjunction, the existential) thread or fan out
//!   the state through their subformulas and may introduce new discourse
//!   referents.
//! - **Tests** (negation, the epistemic modals, disjunction, the
//!   conditional, the universal) compute hypothetical updates of their
//!   subformulas and then filter the *input* state by subsistence in those
//!   updates; they never introduce referents into the output.
//!
//! The input state is never observably changed: every arm constructs its
//! result from fresh sets, and hypothetical sub-evaluations work on the
//! persistent structures by value.

use std::sync::Arc;

use tracing::{trace, trace_span};

use upsem_core::{BinaryOp, Expression, Individual, Model, Quantifier, Term, Tuple, UnaryOp};

use crate::error::{EvalError, EvalResult};
use crate::possibility::Possibility;
use crate::state::InformationState;

/// Updates `state` with `expr` relative to `model`.
///
/// Errors carry the printed form of every enclosing subformula, outermost
/// first, down to the failing one.
pub fn evaluate(
    expr: &Expression,
    state: &InformationState,
    model: &dyn Model,
) -> EvalResult<InformationState> {
    let span = trace_span!("evaluate", formula = %expr);
    let _enter = span.enter();
    trace!(input = %state, "starting update");

    let result = eval_expr(expr, state, model)
        .map_err(|source| EvalError::context(expr.to_string(), source));

    match &result {
        Ok(output) => trace!(output = %output, "finished update"),
        Err(error) => trace!(%error, "update failed"),
    }
    result
}

fn eval_expr(
    expr: &Expression,
    state: &InformationState,
    model: &dyn Model,
) -> EvalResult<InformationState> {
    match expr {
        Expression::Unary { op, scope } => eval_unary(*op, scope, state, model),
        Expression::Binary { op, lhs, rhs } => eval_binary(*op, lhs, rhs, state, model),
        Expression::Quantification {
            quantifier,
            variable,
            scope,
        } => eval_quantification(*quantifier, variable, scope, state, model),
        Expression::Identity { lhs, rhs } => eval_identity(lhs, rhs, state, model),
        Expression::Predication {
            predicate,
            arguments,
        } => eval_predication(predicate, arguments, state, model),
    }
}

fn eval_unary(
    op: UnaryOp,
    scope: &Expression,
    state: &InformationState,
    model: &dyn Model,
) -> EvalResult<InformationState> {
    let prejacent = evaluate(scope, state, model)?;

    let output = match op {
        // Keep the possibilities that do not survive the prejacent update.
        UnaryOp::Negation => state
            .iter()
            .filter(|p| !p.subsists_in(&prejacent))
            .cloned()
            .collect(),

        // A test: pass the state through whole, or fail it whole.
        UnaryOp::EpistemicPossibility => {
            if prejacent.is_empty() {
                trace!("compatibility test failed");
                InformationState::new()
            } else {
                state.clone()
            }
        }

        UnaryOp::EpistemicNecessity => {
            if state.subsists_in(&prejacent) {
                state.clone()
            } else {
                trace!("support test failed");
                InformationState::new()
            }
        }
    };
    Ok(output)
}

fn eval_binary(
    op: BinaryOp,
    lhs: &Expression,
    rhs: &Expression,
    state: &InformationState,
    model: &dyn Model,
) -> EvalResult<InformationState> {
    let lhs_update = evaluate(lhs, state, model)?;

    match op {
        // Sequential update: referents introduced by the left conjunct stay
        // visible in the right one.
        BinaryOp::Conjunction => evaluate(rhs, &lhs_update, model),

        BinaryOp::Disjunction => {
            // The right disjunct is processed under the assumption that the
            // left one failed: ⟦¬φ⟧(σ) is σ filtered by non-subsistence in
            // the already-computed ⟦φ⟧(σ).
            let negated_lhs: InformationState = state
                .iter()
                .filter(|p| !p.subsists_in(&lhs_update))
                .cloned()
                .collect();
            let rhs_update = evaluate(rhs, &negated_lhs, model)?;

            Ok(state
                .iter()
                .filter(|p| lhs_update.contains(p) || rhs_update.contains(p))
                .cloned()
                .collect())
        }

        BinaryOp::Conditional => {
            let consequent = evaluate(rhs, &lhs_update, model)?;

            // Keep p when it fails the antecedent outright, or when every
            // descendant of p in the antecedent update survives the
            // consequent update.
            Ok(state
                .iter()
                .filter(|p| {
                    !p.subsists_in(&lhs_update)
                        || lhs_update
                            .iter()
                            .filter(|descendant| descendant.extends(p))
                            .all(|descendant| descendant.subsists_in(&consequent))
                })
                .cloned()
                .collect())
        }

        BinaryOp::Biconditional => Err(EvalError::InvalidOperator { operator: op }),
    }
}

fn eval_quantification(
    quantifier: Quantifier,
    variable: &Arc<str>,
    scope: &Expression,
    state: &InformationState,
    model: &dyn Model,
) -> EvalResult<InformationState> {
    match quantifier {
        // One branch per individual, each with its own fresh peg for the
        // variable; the output is the union of all branch updates.
        Quantifier::Existential => {
            let mut output = InformationState::new();
            for individual in 0..model.domain_cardinality() {
                trace!(variable = %variable, individual, "evaluating existential branch");
                let variant = state.update(variable, individual);
                output.extend(evaluate(scope, &variant, model)?);
            }
            Ok(output)
        }

        // A test: keep the possibilities that survive the scope under every
        // assignment of the variable.
        Quantifier::Universal => {
            let mut branch_updates = Vec::with_capacity(model.domain_cardinality());
            for individual in 0..model.domain_cardinality() {
                trace!(variable = %variable, individual, "evaluating universal branch");
                let variant = state.update(variable, individual);
                branch_updates.push(evaluate(scope, &variant, model)?);
            }

            Ok(state
                .iter()
                .filter(|p| branch_updates.iter().all(|update| p.subsists_in(update)))
                .cloned()
                .collect())
        }
    }
}

fn eval_identity(
    lhs: &Term,
    rhs: &Term,
    state: &InformationState,
    model: &dyn Model,
) -> EvalResult<InformationState> {
    let mut output = InformationState::new();
    for p in state {
        let lhs_denotation = term_denotation(lhs, p, model)?;
        let rhs_denotation = term_denotation(rhs, p, model)?;
        if lhs_denotation == rhs_denotation {
            output.insert(p.clone());
        }
    }
    Ok(output)
}

fn eval_predication(
    predicate: &str,
    arguments: &[Term],
    state: &InformationState,
    model: &dyn Model,
) -> EvalResult<InformationState> {
    let mut output = InformationState::new();
    for p in state {
        let mut tuple = Tuple::new();
        for argument in arguments {
            tuple.push(term_denotation(argument, p, model)?);
        }
        if model
            .predicate_interpretation(predicate, p.world())?
            .contains(&tuple)
        {
            output.insert(p.clone());
        }
    }
    Ok(output)
}

/// Resolves a term at one possibility: variables through the referent system
/// and assignment, constants through the model at the possibility's world.
fn term_denotation(
    term: &Term,
    possibility: &Possibility,
    model: &dyn Model,
) -> EvalResult<Individual> {
    match term {
        Term::Variable(name) => {
            possibility
                .variable_denotation(name)
                .ok_or_else(|| EvalError::UnboundVariable {
                    variable: name.to_string(),
                })
        }
        Term::Constant(name) => Ok(model.term_interpretation(name, possibility.world())?),
    }
}
