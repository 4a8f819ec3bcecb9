//! Referent systems: the discourse-side bookkeeping of an information state
//!
//! A referent system maps variable names to *pegs*, the nameless slots that
//! discourse referents occupy. Pegs are dense: the pegs of a system are
//! exactly the integers in `[0, peg_count)`. Introducing a variable always
//! allocates a fresh peg, so rebinding a variable shadows its old peg: the
//! old peg stays in `[0, peg_count)` but becomes unreachable through that
//! variable.

use im::OrdMap;
use std::fmt;
use std::sync::Arc;

use crate::possibility::Peg;

/// A mapping from variable names to pegs, with a running peg count.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReferentSystem {
    peg_count: usize,
    bindings: OrdMap<Arc<str>, Peg>,
}

impl ReferentSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pegs introduced so far. Every peg in use lies below it.
    pub fn peg_count(&self) -> usize {
        self.peg_count
    }

    /// The peg a variable is bound to, or `None` when the variable has no
    /// binding quantifier or anaphoric antecedent.
    pub fn value(&self, variable: &str) -> Option<Peg> {
        self.bindings.get(variable).copied()
    }

    /// The bound variables, in lexicographic order.
    pub fn domain(&self) -> impl Iterator<Item = &Arc<str>> {
        self.bindings.keys()
    }

    /// The variable-to-peg bindings, in lexicographic order of variable.
    pub fn bindings(&self) -> impl Iterator<Item = (&Arc<str>, Peg)> {
        self.bindings.iter().map(|(variable, &peg)| (variable, peg))
    }

    /// Binds `variable` to a fresh peg and returns it.
    ///
    /// The fresh peg is the old `peg_count`, keeping pegs dense. An already
    /// bound variable is rebound: the old peg is left behind, unreachable
    /// through this variable.
    pub fn introduce(&mut self, variable: Arc<str>) -> Peg {
        let peg = self.peg_count;
        self.bindings.insert(variable, peg);
        self.peg_count += 1;
        peg
    }

    /// Whether `self` extends `base`:
    /// - `base` has introduced no more pegs than `self`,
    /// - every variable bound in `base` is bound in `self`, either to the
    ///   same peg or to a peg that is new relative to `base`,
    /// - every variable new in `self` is bound to a peg new relative to
    ///   `base`.
    pub fn extends(&self, base: &ReferentSystem) -> bool {
        if base.peg_count > self.peg_count {
            return false;
        }

        for (variable, &old_peg) in &base.bindings {
            match self.value(variable) {
                Some(peg) if peg == old_peg || peg >= base.peg_count => {}
                _ => return false,
            }
        }

        self.bindings
            .iter()
            .all(|(variable, &peg)| base.bindings.contains_key(variable) || peg >= base.peg_count)
    }
}

impl fmt::Display for ReferentSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of pegs: {}", self.peg_count)?;
        writeln!(f, "Variable to peg association:")?;

        if self.bindings.is_empty() {
            return writeln!(f, "  [ empty ]");
        }
        for (variable, peg) in &self.bindings {
            writeln!(f, "  - {} -> peg_{}", variable, peg)?;
        }
        Ok(())
    }
}
