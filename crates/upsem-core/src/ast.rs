//! Abstract syntax for the Quantified Modal Logic fragment
//!
//! The AST is designed to be:
//! - Owned and immutable: expressions are plain values, cheap to clone and share
//! - Closed: the operator enumerations carry exactly the accepted node kinds,
//!   so malformed formulas are unrepresentable rather than checked at runtime
//!
//! The one deliberate exception is [`BinaryOp::Biconditional`]: the syntax is
//! representable because clients other than the update evaluator use it, but
//! the evaluator rejects it as an invalid operator.

use std::sync::Arc;

/// A singular term: either a discourse variable or an individual constant.
///
/// The literal is reference-counted so that terms, referent systems, and
/// interpretation tables can share one allocation per name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    Variable(Arc<str>),
    Constant(Arc<str>),
}

impl Term {
    pub fn variable(name: impl Into<Arc<str>>) -> Self {
        Term::Variable(name.into())
    }

    pub fn constant(name: impl Into<Arc<str>>) -> Self {
        Term::Constant(name.into())
    }

    /// The bare name of the term, without its variable/constant tag.
    pub fn literal(&self) -> &str {
        match self {
            Term::Variable(name) | Term::Constant(name) => name,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }
}

/// Unary connectives: negation and the two epistemic modals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Negation,
    EpistemicPossibility,
    EpistemicNecessity,
}

/// Binary connectives.
///
/// `Biconditional` is outside the GSV fragment; the evaluator reports it as
/// an invalid operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Conjunction,
    Disjunction,
    Conditional,
    Biconditional,
}

/// The two quantifiers of the fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    Existential,
    Universal,
}

/// A formula of the Quantified Modal Logic fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Unary {
        op: UnaryOp,
        scope: Box<Expression>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Quantification {
        quantifier: Quantifier,
        variable: Arc<str>,
        scope: Box<Expression>,
    },
    Identity {
        lhs: Term,
        rhs: Term,
    },
    Predication {
        predicate: Arc<str>,
        arguments: Vec<Term>,
    },
}

impl Expression {
    pub fn negation(scope: Expression) -> Self {
        Expression::Unary {
            op: UnaryOp::Negation,
            scope: Box::new(scope),
        }
    }

    /// `◇φ`: "it might be the case that φ".
    pub fn possibly(scope: Expression) -> Self {
        Expression::Unary {
            op: UnaryOp::EpistemicPossibility,
            scope: Box::new(scope),
        }
    }

    /// `□φ`: "it must be the case that φ".
    pub fn necessarily(scope: Expression) -> Self {
        Expression::Unary {
            op: UnaryOp::EpistemicNecessity,
            scope: Box::new(scope),
        }
    }

    pub fn conjunction(lhs: Expression, rhs: Expression) -> Self {
        Expression::binary(BinaryOp::Conjunction, lhs, rhs)
    }

    pub fn disjunction(lhs: Expression, rhs: Expression) -> Self {
        Expression::binary(BinaryOp::Disjunction, lhs, rhs)
    }

    pub fn conditional(lhs: Expression, rhs: Expression) -> Self {
        Expression::binary(BinaryOp::Conditional, lhs, rhs)
    }

    pub fn biconditional(lhs: Expression, rhs: Expression) -> Self {
        Expression::binary(BinaryOp::Biconditional, lhs, rhs)
    }

    pub fn binary(op: BinaryOp, lhs: Expression, rhs: Expression) -> Self {
        Expression::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn exists(variable: impl Into<Arc<str>>, scope: Expression) -> Self {
        Expression::Quantification {
            quantifier: Quantifier::Existential,
            variable: variable.into(),
            scope: Box::new(scope),
        }
    }

    pub fn forall(variable: impl Into<Arc<str>>, scope: Expression) -> Self {
        Expression::Quantification {
            quantifier: Quantifier::Universal,
            variable: variable.into(),
            scope: Box::new(scope),
        }
    }

    pub fn identity(lhs: Term, rhs: Term) -> Self {
        Expression::Identity { lhs, rhs }
    }

    pub fn predication(
        predicate: impl Into<Arc<str>>,
        arguments: impl IntoIterator<Item = Term>,
    ) -> Self {
        Expression::Predication {
            predicate: predicate.into(),
            arguments: arguments.into_iter().collect(),
        }
    }
}

/// Wraps an expression in a negation, cloning the operand.
///
/// Convenience for clients assembling hypothetical formulas from borrowed
/// subexpressions.
pub fn negate(expr: &Expression) -> Expression {
    Expression::negation(expr.clone())
}
