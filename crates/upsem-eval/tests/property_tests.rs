//! Property-based tests for the update semantics
//!
//! Small models (up to three worlds and three individuals) are generated
//! with random extensions for the unary predicates P and Q and random
//! denotations for the constants a and b, and the semantic laws are checked
//! across them. Formula generators are per-fragment: quantifier-free
//! boolean tests, modal tests, and unary scopes for the quantifier laws.

use proptest::prelude::*;
use std::sync::Arc;

use upsem_core::{Expression, FiniteModel, Model, Term};
use upsem_eval::{
    evaluate, similar_possibilities, similar_states, sub_states, supports, InformationState,
};

// ============================================================================
// Generators
// ============================================================================

/// A model with worlds in 1..=3, individuals in 1..=3, random unary
/// extensions for P and Q, and random denotations for a and b.
fn arb_model() -> impl Strategy<Value = FiniteModel> {
    (1usize..=3, 1usize..=3).prop_flat_map(|(worlds, individuals)| {
        let extension = prop::collection::vec(
            prop::collection::vec(any::<bool>(), individuals),
            worlds,
        );
        let denotation = prop::collection::vec(0..individuals, worlds);
        (
            Just(worlds),
            Just(individuals),
            extension.clone(),
            extension,
            denotation.clone(),
            denotation,
        )
            .prop_map(|(worlds, individuals, p_rows, q_rows, a_rows, b_rows)| {
                let to_extension = |rows: Vec<Vec<bool>>| {
                    rows.into_iter()
                        .map(|row| {
                            row.into_iter()
                                .enumerate()
                                .filter_map(|(individual, member)| {
                                    member.then_some(vec![individual])
                                })
                                .collect::<Vec<_>>()
                        })
                        .collect::<Vec<_>>()
                };
                FiniteModel::builder(worlds, individuals)
                    .predicate("P", to_extension(p_rows))
                    .predicate("Q", to_extension(q_rows))
                    .term("a", a_rows)
                    .term("b", b_rows)
                    .build()
            })
    })
}

fn arb_atom() -> impl Strategy<Value = Expression> {
    prop_oneof![
        Just(Expression::predication("P", [Term::constant("a")])),
        Just(Expression::predication("P", [Term::constant("b")])),
        Just(Expression::predication("Q", [Term::constant("a")])),
        Just(Expression::identity(Term::constant("a"), Term::constant("b"))),
        Just(Expression::identity(Term::constant("a"), Term::constant("a"))),
    ]
}

/// Closed, quantifier-free, modal-free formulas: pointwise boolean tests.
fn arb_boolean_test() -> impl Strategy<Value = Expression> {
    arb_atom().prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Expression::negation),
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| Expression::conjunction(l, r)),
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| Expression::disjunction(l, r)),
            (inner.clone(), inner).prop_map(|(l, r)| Expression::conditional(l, r)),
        ]
    })
}

/// Closed, quantifier-free formulas including the epistemic modals: still
/// tests, but no longer pointwise.
fn arb_modal_test() -> impl Strategy<Value = Expression> {
    arb_atom().prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Expression::negation),
            inner.clone().prop_map(Expression::possibly),
            inner.clone().prop_map(Expression::necessarily),
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| Expression::conjunction(l, r)),
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| Expression::disjunction(l, r)),
            (inner.clone(), inner).prop_map(|(l, r)| Expression::conditional(l, r)),
        ]
    })
}

/// Quantifier-free scopes with the variable x free, for the quantifier laws.
fn arb_scope_in_x() -> impl Strategy<Value = Expression> {
    let atom = prop_oneof![
        Just(Expression::predication("P", [Term::variable("x")])),
        Just(Expression::predication("Q", [Term::variable("x")])),
        Just(Expression::identity(Term::variable("x"), Term::constant("a"))),
    ];
    atom.prop_recursive(2, 8, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Expression::negation),
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| Expression::conjunction(l, r)),
            (inner.clone(), inner).prop_map(|(l, r)| Expression::disjunction(l, r)),
        ]
    })
}

/// A state reachable from ignorance by a short run of referent
/// introductions. The raw individual indices are reduced modulo the domain
/// size inside the test body.
fn arb_update_run() -> impl Strategy<Value = Vec<(bool, usize)>> {
    prop::collection::vec((any::<bool>(), 0usize..3), 0..3)
}

fn run_updates(model: &dyn Model, run: &[(bool, usize)]) -> InformationState {
    let x: Arc<str> = Arc::from("x");
    let y: Arc<str> = Arc::from("y");
    let mut state = InformationState::ignorant(model);
    for &(use_x, raw) in run {
        let variable = if use_x { &x } else { &y };
        state = state.update(variable, raw % model.domain_cardinality());
    }
    state
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Quantifier- and modal-free closed formulas are idempotent tests:
    /// re-processing the output changes nothing.
    #[test]
    fn boolean_tests_are_idempotent(model in arb_model(), formula in arb_boolean_test()) {
        let state = InformationState::ignorant(&model);
        let once = evaluate(&formula, &state, &model).unwrap();
        let twice = evaluate(&formula, &once, &model).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// A supported test is a no-op up to similarity.
    #[test]
    fn support_means_fixed_point(model in arb_model(), formula in arb_modal_test()) {
        let world_count = model.world_cardinality();
        for k in 0..=world_count {
            for state in sub_states(world_count, k) {
                if supports(&state, &formula, &model).unwrap() {
                    let update = evaluate(&formula, &state, &model).unwrap();
                    prop_assert!(
                        similar_states(&update, &state),
                        "supported {} but update differs from the state",
                        formula
                    );
                }
            }
        }
    }

    /// The ignorant state has one possibility per world, all referent-free.
    #[test]
    fn ignorance_is_one_bare_possibility_per_world(model in arb_model()) {
        let state = InformationState::ignorant(&model);
        prop_assert_eq!(state.len(), model.world_cardinality());
        for p in &state {
            prop_assert_eq!(p.referent_system().peg_count(), 0);
            prop_assert!(p.assignment().is_empty());
        }
    }

    /// Extension is reflexive for possibilities and states.
    #[test]
    fn extends_is_reflexive(model in arb_model(), run in arb_update_run()) {
        let state = run_updates(&model, &run);
        prop_assert!(state.extends(&state));
        for p in &state {
            prop_assert!(p.extends(p));
        }
    }

    /// Subsistence runs down chains of updates.
    #[test]
    fn subsistence_is_transitive_along_updates(
        model in arb_model(),
        run in arb_update_run(),
        d1 in 0usize..3,
        d2 in 0usize..3,
    ) {
        let domain = model.domain_cardinality();
        let s1 = run_updates(&model, &run);
        let s2 = s1.update(&Arc::from("u"), d1 % domain);
        let s3 = s2.update(&Arc::from("v"), d2 % domain);

        prop_assert!(s1.subsists_in(&s2));
        prop_assert!(s2.subsists_in(&s3));
        prop_assert!(s1.subsists_in(&s3));
    }

    /// ¬∃x.¬φ and ∀x.φ are the same update, up to similarity.
    #[test]
    fn quantifier_duality(model in arb_model(), scope in arb_scope_in_x()) {
        let state = InformationState::ignorant(&model);
        let dual = Expression::negation(Expression::exists(
            "x",
            Expression::negation(scope.clone()),
        ));
        let universal = Expression::forall("x", scope);

        let dual_update = evaluate(&dual, &state, &model).unwrap();
        let universal_update = evaluate(&universal, &state, &model).unwrap();
        prop_assert!(similar_states(&dual_update, &universal_update));
    }

    /// ¬(φ ∨ ψ) and ¬φ ∧ ¬ψ are the same update for tests, up to
    /// similarity.
    #[test]
    fn de_morgan_for_tests(
        model in arb_model(),
        phi in arb_modal_test(),
        psi in arb_modal_test(),
    ) {
        let world_count = model.world_cardinality();
        for k in 0..=world_count {
            for state in sub_states(world_count, k) {
                let negated_disjunction = Expression::negation(Expression::disjunction(
                    phi.clone(),
                    psi.clone(),
                ));
                let conjoined_negations = Expression::conjunction(
                    Expression::negation(phi.clone()),
                    Expression::negation(psi.clone()),
                );
                let lhs = evaluate(&negated_disjunction, &state, &model).unwrap();
                let rhs = evaluate(&conjoined_negations, &state, &model).unwrap();
                prop_assert!(similar_states(&lhs, &rhs));
            }
        }
    }

    /// Similarity of possibilities is reflexive and symmetric.
    #[test]
    fn similarity_is_reflexive_and_symmetric(
        model in arb_model(),
        run1 in arb_update_run(),
        run2 in arb_update_run(),
    ) {
        let s1 = run_updates(&model, &run1);
        let s2 = run_updates(&model, &run2);

        for p in &s1 {
            prop_assert!(similar_possibilities(p, p));
        }
        for p in &s1 {
            for q in &s2 {
                prop_assert_eq!(
                    similar_possibilities(p, q),
                    similar_possibilities(q, p)
                );
            }
        }
        prop_assert!(similar_states(&s1, &s1));
        prop_assert_eq!(similar_states(&s1, &s2), similar_states(&s2, &s1));
    }

    /// Updated states extend their inputs and inputs subsist in them.
    #[test]
    fn updates_extend_their_inputs(
        model in arb_model(),
        run in arb_update_run(),
        raw in 0usize..3,
    ) {
        let state = run_updates(&model, &run);
        let updated = state.update(&Arc::from("z"), raw % model.domain_cardinality());

        prop_assert!(updated.extends(&state));
        prop_assert!(state.subsists_in(&updated));
    }

    /// The output of any successful update of the ignorant state extends it.
    #[test]
    fn evaluation_outputs_extend_ignorance(
        model in arb_model(),
        scope in arb_scope_in_x(),
    ) {
        let state = InformationState::ignorant(&model);
        let formula = Expression::exists("x", scope);
        let output = evaluate(&formula, &state, &model).unwrap();
        prop_assert!(output.extends(&state));
        prop_assert!(output.len() <= model.world_cardinality() * model.domain_cardinality());
    }
}
