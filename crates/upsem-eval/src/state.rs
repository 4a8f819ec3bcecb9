//! Information states: sets of possibilities
//!
//! An information state represents what a discourse participant has not yet
//! ruled out. States are:
//! - Immutable: updates construct new states rather than mutating published
//!   ones
//! - Structural: membership and equality compare possibilities by content
//!   (world, assignment, referent system), never by identity
//!
//! # Shared referent systems
//!
//! All possibilities of one state share a single referent system. The
//! ignorant state starts every possibility on one empty system, and
//! [`InformationState::update`] clones the common system, introduces the new
//! variable on the clone, and republishes it as a fresh `Arc` shared by all
//! output possibilities. Input and output states therefore never share a
//! referent system, and no referent system is mutated after its state is
//! published.

use im::OrdSet;
use std::fmt;
use std::sync::Arc;

use upsem_core::{Individual, Model};

use crate::possibility::Possibility;
use crate::referent::ReferentSystem;

/// A set of possibilities, ordered world-major by structural comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InformationState {
    possibilities: OrdSet<Possibility>,
}

impl InformationState {
    /// The empty state: everything has been ruled out.
    pub fn new() -> Self {
        Self::default()
    }

    /// The ignorant state over `model`: one possibility per world, no
    /// discourse referents introduced, one referent system shared by all
    /// possibilities.
    pub fn ignorant(model: &dyn Model) -> Self {
        let referent_system = Arc::new(ReferentSystem::new());
        (0..model.world_cardinality())
            .map(|world| Possibility::new(referent_system.clone(), world))
            .collect()
    }

    /// Introduces `variable` as a new discourse referent denoting
    /// `individual`, in every possibility at once.
    ///
    /// A fresh referent system extending the state's common one is allocated
    /// and shared by all output possibilities; each output possibility keeps
    /// its input's world and assignment and additionally maps the fresh peg
    /// to `individual`. Updating the empty state yields the empty state.
    pub fn update(&self, variable: &Arc<str>, individual: Individual) -> InformationState {
        let Some(common) = self
            .possibilities
            .iter()
            .next()
            .map(|p| p.shared_referent_system())
        else {
            return InformationState::new();
        };

        let mut extended = ReferentSystem::clone(common);
        let peg = extended.introduce(variable.clone());
        let extended = Arc::new(extended);

        self.possibilities
            .iter()
            .map(|p| {
                Possibility::with_assignment(
                    extended.clone(),
                    p.world(),
                    p.assignment().update(peg, individual),
                )
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.possibilities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.possibilities.len()
    }

    /// Structural membership.
    pub fn contains(&self, possibility: &Possibility) -> bool {
        self.possibilities.contains(possibility)
    }

    pub fn iter(&self) -> im::ordset::Iter<'_, Possibility> {
        self.possibilities.iter()
    }

    pub(crate) fn insert(&mut self, possibility: Possibility) {
        self.possibilities.insert(possibility);
    }

    /// Whether every possibility of `self` extends some possibility of
    /// `base`.
    pub fn extends(&self, base: &InformationState) -> bool {
        self.possibilities
            .iter()
            .all(|p2| base.possibilities.iter().any(|p1| p2.extends(p1)))
    }

    /// Whether every possibility of `self` subsists in `other`.
    pub fn subsists_in(&self, other: &InformationState) -> bool {
        self.possibilities.iter().all(|p| p.subsists_in(other))
    }
}

impl Possibility {
    /// Whether `self` belongs to `state` and extends `ancestor`.
    pub fn is_descendant_of(&self, ancestor: &Possibility, state: &InformationState) -> bool {
        state.contains(self) && self.extends(ancestor)
    }

    /// Whether some possibility of `state` is a descendant of `self`, the
    /// dynamic analogue of "survives the update".
    pub fn subsists_in(&self, state: &InformationState) -> bool {
        state.iter().any(|p| p.is_descendant_of(self, state))
    }
}

impl FromIterator<Possibility> for InformationState {
    fn from_iter<T: IntoIterator<Item = Possibility>>(iter: T) -> Self {
        InformationState {
            possibilities: iter.into_iter().collect(),
        }
    }
}

impl Extend<Possibility> for InformationState {
    fn extend<T: IntoIterator<Item = Possibility>>(&mut self, iter: T) {
        for possibility in iter {
            self.possibilities.insert(possibility);
        }
    }
}

impl<'a> IntoIterator for &'a InformationState {
    type Item = &'a Possibility;
    type IntoIter = im::ordset::Iter<'a, Possibility>;

    fn into_iter(self) -> Self::IntoIter {
        self.possibilities.iter()
    }
}

impl IntoIterator for InformationState {
    type Item = Possibility;
    type IntoIter = im::ordset::ConsumingIter<Possibility>;

    fn into_iter(self) -> Self::IntoIter {
        self.possibilities.into_iter()
    }
}

impl fmt::Display for InformationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--------------------")?;
        for possibility in &self.possibilities {
            write!(f, "{}", possibility)?;
            writeln!(f, "--------------------")?;
        }
        Ok(())
    }
}
