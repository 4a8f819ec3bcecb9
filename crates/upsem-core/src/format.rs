//! Rendering of formulas with conventional logical glyphs
//!
//! The evaluator embeds these renderings in its error traces, so the output
//! format is pinned by snapshot tests on the error side. Binary formulas are
//! parenthesized; unary operators and quantifiers bind tightly and take no
//! parentheses of their own.

use std::fmt;

use crate::ast::{BinaryOp, Expression, Quantifier, Term, UnaryOp};

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = match self {
            UnaryOp::Negation => "¬",
            UnaryOp::EpistemicPossibility => "◇",
            UnaryOp::EpistemicNecessity => "□",
        };
        f.write_str(glyph)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = match self {
            BinaryOp::Conjunction => "∧",
            BinaryOp::Disjunction => "∨",
            BinaryOp::Conditional => "→",
            BinaryOp::Biconditional => "↔",
        };
        f.write_str(glyph)
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = match self {
            Quantifier::Existential => "∃",
            Quantifier::Universal => "∀",
        };
        f.write_str(glyph)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Unary { op, scope } => write!(f, "{}{}", op, scope),
            Expression::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op, rhs),
            Expression::Quantification {
                quantifier,
                variable,
                scope,
            } => write!(f, "{}{}.{}", quantifier, variable, scope),
            Expression::Identity { lhs, rhs } => write!(f, "{} = {}", lhs, rhs),
            Expression::Predication {
                predicate,
                arguments,
            } => {
                write!(f, "{}(", predicate)?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expression, Term};

    fn p_of(term: Term) -> Expression {
        Expression::predication("P", [term])
    }

    #[test]
    fn renders_predication_and_identity() {
        let formula = Expression::predication("R", [Term::variable("x"), Term::constant("a")]);
        assert_eq!(formula.to_string(), "R(x, a)");

        let identity = Expression::identity(Term::variable("x"), Term::constant("b"));
        assert_eq!(identity.to_string(), "x = b");
    }

    #[test]
    fn renders_connectives_with_parentheses() {
        let formula = Expression::conditional(
            Expression::conjunction(p_of(Term::constant("a")), p_of(Term::constant("b"))),
            Expression::disjunction(p_of(Term::constant("a")), p_of(Term::constant("c"))),
        );
        assert_eq!(
            formula.to_string(),
            "((P(a) ∧ P(b)) → (P(a) ∨ P(c)))"
        );
    }

    #[test]
    fn renders_quantifiers_and_modals() {
        let formula = Expression::possibly(Expression::exists(
            "x",
            Expression::negation(p_of(Term::variable("x"))),
        ));
        assert_eq!(formula.to_string(), "◇∃x.¬P(x)");

        let necessity = Expression::necessarily(Expression::forall("y", p_of(Term::variable("y"))));
        assert_eq!(necessity.to_string(), "□∀y.P(y)");
    }
}
