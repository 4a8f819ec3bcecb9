//! Semantic relations over the update function
//!
//! Two layers:
//! - **State-relative relations** (`consistent_with`, `allows`, `supports`,
//!   `is_supported_by`) evaluate one formula against one given state.
//! - **Model-level relations** (`consistent`, `coherent`, the entailment
//!   family, `equivalent`) quantify over the information states definable
//!   from the model: for every cardinality `k` below the world count, every
//!   `k`-element set of ignorant possibilities is enumerated by
//!   [`sub_states`] and handed to the evaluator.
//!
//! Evaluation errors propagate as `Err` throughout; an undefined update is
//! never silently read as the relation failing.

use std::sync::Arc;

use tracing::debug;

use upsem_core::{Expression, Model};

use crate::error::EvalResult;
use crate::eval::evaluate;
use crate::possibility::Possibility;
use crate::referent::ReferentSystem;
use crate::state::InformationState;

/// Whether updating `state` with `expr` leaves something: the formula is
/// consistent with the state when its update is nonempty.
pub fn consistent_with(
    expr: &Expression,
    state: &InformationState,
    model: &dyn Model,
) -> EvalResult<bool> {
    Ok(!evaluate(expr, state, model)?.is_empty())
}

/// Alias for [`consistent_with`] with the state first.
pub fn allows(
    state: &InformationState,
    expr: &Expression,
    model: &dyn Model,
) -> EvalResult<bool> {
    consistent_with(expr, state, model)
}

/// Whether `state` supports `expr`: every possibility of the state survives
/// the update, i.e. the state subsists in its own update.
pub fn supports(
    state: &InformationState,
    expr: &Expression,
    model: &dyn Model,
) -> EvalResult<bool> {
    Ok(state.subsists_in(&evaluate(expr, state, model)?))
}

/// Alias for [`supports`] with the formula first.
pub fn is_supported_by(
    expr: &Expression,
    state: &InformationState,
    model: &dyn Model,
) -> EvalResult<bool> {
    supports(state, expr, model)
}

/// Every `k`-element information state of ignorant possibilities over worlds
/// `0..world_count`, in lexicographic world order.
///
/// `k == 0` yields the single empty state; `k > world_count` yields nothing.
/// Within each generated state all possibilities share one empty referent
/// system, exactly as in [`InformationState::ignorant`].
pub fn sub_states(world_count: usize, k: usize) -> Vec<InformationState> {
    if k == 0 {
        return vec![InformationState::new()];
    }
    if k > world_count {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(binomial(world_count, k));
    let mut combination = Vec::with_capacity(k);
    pick_worlds(0, world_count, k, &mut combination, &mut result);
    result
}

fn pick_worlds(
    start: usize,
    world_count: usize,
    k: usize,
    combination: &mut Vec<usize>,
    result: &mut Vec<InformationState>,
) {
    if combination.len() == k {
        let referent_system = Arc::new(ReferentSystem::new());
        result.push(
            combination
                .iter()
                .map(|&world| Possibility::new(referent_system.clone(), world))
                .collect(),
        );
        return;
    }

    for world in start..world_count {
        combination.push(world);
        pick_worlds(world + 1, world_count, k, combination, result);
        combination.pop();
    }
}

fn binomial(n: usize, k: usize) -> usize {
    let mut estimate = 1usize;
    for i in 1..=k {
        estimate = estimate * (n + 1 - i) / i;
    }
    estimate
}

/// Whether `expr` is consistent relative to `model`: for every cardinality
/// below the world count, some sub-state of that cardinality is consistent
/// with it.
pub fn consistent(expr: &Expression, model: &dyn Model) -> EvalResult<bool> {
    let world_count = model.world_cardinality();
    for k in 0..world_count {
        let mut found = false;
        for state in sub_states(world_count, k) {
            if consistent_with(expr, &state, model)? {
                found = true;
                break;
            }
        }
        if !found {
            debug!(formula = %expr, cardinality = k, "no consistent sub-state");
            return Ok(false);
        }
    }
    Ok(true)
}

/// Whether `expr` is coherent relative to `model`: for every cardinality
/// below the world count, some nonempty sub-state of that cardinality
/// supports it.
pub fn coherent(expr: &Expression, model: &dyn Model) -> EvalResult<bool> {
    let world_count = model.world_cardinality();
    for k in 0..world_count {
        let mut found = false;
        for state in sub_states(world_count, k) {
            if !state.is_empty() && supports(&state, expr, model)? {
                found = true;
                break;
            }
        }
        if !found {
            debug!(formula = %expr, cardinality = k, "no supporting sub-state");
            return Ok(false);
        }
    }
    Ok(true)
}

fn sequentially_update(
    state: InformationState,
    premises: &[Expression],
    model: &dyn Model,
) -> EvalResult<InformationState> {
    let mut state = state;
    for premise in premises {
        state = evaluate(premise, &state, model)?;
    }
    Ok(state)
}

/// Entailment at the ignorant state: updating the ignorant state with the
/// premises in order yields a state that supports the conclusion.
pub fn entails_0(
    premises: &[Expression],
    conclusion: &Expression,
    model: &dyn Model,
) -> EvalResult<bool> {
    let state = sequentially_update(InformationState::ignorant(model), premises, model)?;
    supports(&state, conclusion, model)
}

/// Entailment at every state: for every sub-state of every cardinality,
/// updating with the premises in order yields a state that supports the
/// conclusion. The first counterexample decides.
pub fn entails_g(
    premises: &[Expression],
    conclusion: &Expression,
    model: &dyn Model,
) -> EvalResult<bool> {
    let world_count = model.world_cardinality();
    for k in 0..world_count {
        for state in sub_states(world_count, k) {
            let updated = sequentially_update(state, premises, model)?;
            if !supports(&updated, conclusion, model)? {
                debug!(state = %updated, "counterexample to entailment");
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Entailment as support: every sub-state that supports all the premises
/// also supports the conclusion. The premises have no dynamic effect on the
/// context the conclusion is evaluated in.
pub fn entails_c(
    premises: &[Expression],
    conclusion: &Expression,
    model: &dyn Model,
) -> EvalResult<bool> {
    let world_count = model.world_cardinality();
    for k in 0..world_count {
        'states: for state in sub_states(world_count, k) {
            for premise in premises {
                if !supports(&state, premise, model)? {
                    continue 'states;
                }
            }
            if !supports(&state, conclusion, model)? {
                debug!(state = %state, "counterexample to entailment as support");
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// The default entailment relation: [`entails_g`].
pub fn entails(
    premises: &[Expression],
    conclusion: &Expression,
    model: &dyn Model,
) -> EvalResult<bool> {
    entails_g(premises, conclusion, model)
}

/// Whether two possibilities agree on all observable content: same world,
/// same set of bound variables, and the same denotation for each of them.
/// Peg numbering is invisible to similarity.
pub fn similar_possibilities(p1: &Possibility, p2: &Possibility) -> bool {
    p1.world() == p2.world()
        && p1.referent_system().domain().eq(p2.referent_system().domain())
        && p1.referent_system().domain().all(|variable| {
            match (
                p1.variable_denotation(variable),
                p2.variable_denotation(variable),
            ) {
                (Some(d1), Some(d2)) => d1 == d2,
                _ => false,
            }
        })
}

/// Whether every possibility of each state has a similar counterpart in the
/// other.
pub fn similar_states(s1: &InformationState, s2: &InformationState) -> bool {
    s1.iter()
        .all(|p| s2.iter().any(|q| similar_possibilities(p, q)))
        && s2
            .iter()
            .all(|p| s1.iter().any(|q| similar_possibilities(p, q)))
}

/// Whether two formulas are equivalent relative to `model`: their updates of
/// every sub-state are similar.
pub fn equivalent(
    expr1: &Expression,
    expr2: &Expression,
    model: &dyn Model,
) -> EvalResult<bool> {
    let world_count = model.world_cardinality();
    for k in 0..world_count {
        for state in sub_states(world_count, k) {
            let update1 = evaluate(expr1, &state, model)?;
            let update2 = evaluate(expr2, &state, model)?;
            if !similar_states(&update1, &update2) {
                debug!(state = %state, "counterexample to equivalence");
                return Ok(false);
            }
        }
    }
    Ok(true)
}
