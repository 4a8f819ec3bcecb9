//! Possibilities: one concrete way the described situation could be
//!
//! A possibility pairs a possible world with a peg assignment, under a
//! referent system shared by every possibility of the same information
//! state. Possibilities are values: equality and ordering are fully
//! structural, with the world as the leading key so that states iterate in
//! world-major order.

use im::OrdMap;
use std::fmt;
use std::sync::Arc;

use upsem_core::{Individual, World};

use crate::referent::ReferentSystem;

/// A discourse-referent slot, dense in `[0, peg_count)` of the governing
/// referent system.
pub type Peg = usize;

/// A world together with a peg-to-individual assignment.
///
/// Invariant: for every variable bound in the referent system, the peg it is
/// bound to is mapped by `assignment`. Orphaned pegs (shadowed by
/// rebinding) may or may not be mapped.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Possibility {
    world: World,
    assignment: OrdMap<Peg, Individual>,
    referent_system: Arc<ReferentSystem>,
}

impl Possibility {
    /// A possibility at `world` with an empty assignment.
    pub fn new(referent_system: Arc<ReferentSystem>, world: World) -> Self {
        Possibility {
            world,
            assignment: OrdMap::new(),
            referent_system,
        }
    }

    pub(crate) fn with_assignment(
        referent_system: Arc<ReferentSystem>,
        world: World,
        assignment: OrdMap<Peg, Individual>,
    ) -> Self {
        Possibility {
            world,
            assignment,
            referent_system,
        }
    }

    pub fn world(&self) -> World {
        self.world
    }

    pub fn referent_system(&self) -> &ReferentSystem {
        &self.referent_system
    }

    pub(crate) fn shared_referent_system(&self) -> &Arc<ReferentSystem> {
        &self.referent_system
    }

    /// The peg assignment, keyed by peg.
    pub fn assignment(&self) -> &OrdMap<Peg, Individual> {
        &self.assignment
    }

    /// The individual a variable denotes here: the assignment at the peg the
    /// variable is bound to. `None` when the variable is unbound.
    pub fn variable_denotation(&self, variable: &str) -> Option<Individual> {
        let peg = self.referent_system.value(variable)?;
        self.assignment.get(&peg).copied()
    }

    /// Whether `self` extends `base`: same world, and every peg mapped in
    /// `base` keeps its individual in `self`. Pegs present only in `self`
    /// are new discourse referents and are unrestricted.
    pub fn extends(&self, base: &Possibility) -> bool {
        self.world == base.world
            && base
                .assignment
                .iter()
                .all(|(peg, individual)| self.assignment.get(peg) == Some(individual))
    }
}

impl fmt::Display for Possibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ ] Referent system:\n{}", self.referent_system)?;
        writeln!(f, "[ ] Assignment function:")?;
        if self.assignment.is_empty() {
            writeln!(f, "  [ empty ]")?;
        } else {
            for (peg, individual) in &self.assignment {
                writeln!(f, "  - peg_{} -> e_{}", peg, individual)?;
            }
        }
        writeln!(f, "[ ] Possible world: w_{}", self.world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn possibility(world: World, pairs: &[(&str, Individual)]) -> Possibility {
        let mut r = ReferentSystem::new();
        let mut assignment = OrdMap::new();
        for &(variable, individual) in pairs {
            let peg = r.introduce(variable.into());
            assignment.insert(peg, individual);
        }
        Possibility::with_assignment(Arc::new(r), world, assignment)
    }

    #[test]
    fn variable_denotation_follows_the_peg() {
        let p = possibility(0, &[("x", 1), ("y", 0)]);
        assert_eq!(p.variable_denotation("x"), Some(1));
        assert_eq!(p.variable_denotation("y"), Some(0));
        assert_eq!(p.variable_denotation("z"), None);
    }

    #[test]
    fn extends_requires_the_same_world() {
        let p0 = possibility(0, &[]);
        let p1 = possibility(1, &[]);
        assert!(!p1.extends(&p0));
        assert!(p0.extends(&p0));
    }

    #[test]
    fn extends_preserves_mapped_pegs() {
        let base = possibility(0, &[("x", 1)]);
        let grown = possibility(0, &[("x", 1), ("y", 0)]);
        let clashing = possibility(0, &[("x", 0), ("y", 0)]);

        assert!(grown.extends(&base));
        assert!(!clashing.extends(&base));
        // New pegs in the extension are unrestricted, so the base does not
        // extend its own extension.
        assert!(!base.extends(&grown));
    }

    #[test]
    fn equality_is_structural_not_world_only() {
        let a = possibility(0, &[("x", 0)]);
        let b = possibility(0, &[("x", 1)]);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
