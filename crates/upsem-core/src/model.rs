//! The model interface consumed by the update evaluator
//!
//! A model fixes a finite set of worlds, a finite domain of individuals, and
//! per-world interpretations for singular terms and predicates. Worlds and
//! individuals are dense indices; interpretations are partial, and an
//! uninterpreted name is an explicit [`ModelError`] rather than a panic.
//!
//! [`FiniteModel`] is the table-backed implementation used by tests and
//! benchmarks; the evaluator itself only ever sees `&dyn Model`.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::sync::Arc;
use thiserror::Error;

/// Index of a possible world, in `[0, world_cardinality)`.
pub type World = usize;

/// Index of an individual in the domain, in `[0, domain_cardinality)`.
pub type Individual = usize;

/// An argument tuple in a predicate extension. Most predicates in practice
/// are unary or binary, so tuples stay inline.
pub type Tuple = SmallVec<[Individual; 2]>;

/// The extension of a predicate at one world: the set of tuples it is true of.
pub type Extension = FxHashSet<Tuple>;

/// Failure to interpret a name in the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Term {term} has no interpretation in the model")]
    UninterpretedTerm { term: String },

    #[error("Predicate {predicate} has no interpretation in the model")]
    UninterpretedPredicate { predicate: String },
}

/// A model of Quantified Modal Logic, as consumed by the evaluator.
///
/// Implementations must be total over worlds in `[0, world_cardinality)`:
/// asking for an interpretation at a world outside that range is a contract
/// violation and may be answered with an error at the implementation's
/// discretion.
pub trait Model {
    /// Number of possible worlds.
    fn world_cardinality(&self) -> usize;

    /// Number of individuals in the domain.
    fn domain_cardinality(&self) -> usize;

    /// The individual denoted by `term` at `world`, or an error when the
    /// term is not interpreted there.
    fn term_interpretation(&self, term: &str, world: World) -> Result<Individual, ModelError>;

    /// The extension of `predicate` at `world`, or an error when the
    /// predicate is not interpreted there.
    fn predicate_interpretation(
        &self,
        predicate: &str,
        world: World,
    ) -> Result<&Extension, ModelError>;
}

/// A finite model backed by interpretation tables.
///
/// Term denotations and predicate extensions are stored per world: a name is
/// interpreted at a world exactly when its table row has an entry for that
/// world index.
#[derive(Debug, Clone, Default)]
pub struct FiniteModel {
    worlds: usize,
    individuals: usize,
    terms: FxHashMap<Arc<str>, Vec<Individual>>,
    predicates: FxHashMap<Arc<str>, Vec<Extension>>,
}

impl FiniteModel {
    pub fn builder(worlds: usize, individuals: usize) -> FiniteModelBuilder {
        FiniteModelBuilder {
            model: FiniteModel {
                worlds,
                individuals,
                terms: FxHashMap::default(),
                predicates: FxHashMap::default(),
            },
        }
    }
}

impl Model for FiniteModel {
    fn world_cardinality(&self) -> usize {
        self.worlds
    }

    fn domain_cardinality(&self) -> usize {
        self.individuals
    }

    fn term_interpretation(&self, term: &str, world: World) -> Result<Individual, ModelError> {
        self.terms
            .get(term)
            .and_then(|denotations| denotations.get(world))
            .copied()
            .ok_or_else(|| ModelError::UninterpretedTerm {
                term: term.to_string(),
            })
    }

    fn predicate_interpretation(
        &self,
        predicate: &str,
        world: World,
    ) -> Result<&Extension, ModelError> {
        self.predicates
            .get(predicate)
            .and_then(|extensions| extensions.get(world))
            .ok_or_else(|| ModelError::UninterpretedPredicate {
                predicate: predicate.to_string(),
            })
    }
}

/// Builder for [`FiniteModel`].
///
/// ```
/// use upsem_core::FiniteModel;
///
/// // Two worlds, two individuals; P true of e0 everywhere and of e1 at w1.
/// let model = FiniteModel::builder(2, 2)
///     .term("a", [0, 0])
///     .predicate("P", [vec![vec![0]], vec![vec![0], vec![1]]])
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct FiniteModelBuilder {
    model: FiniteModel,
}

impl FiniteModelBuilder {
    /// Interpret `term` with one denotation per world, in world order.
    pub fn term(
        mut self,
        term: impl Into<Arc<str>>,
        denotations: impl IntoIterator<Item = Individual>,
    ) -> Self {
        self.model
            .terms
            .insert(term.into(), denotations.into_iter().collect());
        self
    }

    /// Interpret `predicate` with one extension per world, in world order.
    /// Each extension is the collection of argument tuples the predicate is
    /// true of at that world.
    pub fn predicate<E, T>(
        mut self,
        predicate: impl Into<Arc<str>>,
        extensions: impl IntoIterator<Item = E>,
    ) -> Self
    where
        E: IntoIterator<Item = T>,
        T: IntoIterator<Item = Individual>,
    {
        let table = extensions
            .into_iter()
            .map(|extension| {
                extension
                    .into_iter()
                    .map(|tuple| tuple.into_iter().collect::<Tuple>())
                    .collect::<Extension>()
            })
            .collect();
        self.model.predicates.insert(predicate.into(), table);
        self
    }

    pub fn build(self) -> FiniteModel {
        self.model
    }
}
