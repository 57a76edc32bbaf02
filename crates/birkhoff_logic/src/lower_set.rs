use birkhoff_core::{ElemId, Lattice, Polarity, Powerset};
use std::collections::BTreeSet;

use crate::error::{BirkhoffError, Result};
use crate::irreducible::{IrredId, IrreducibleSet};

/// A downward-closed set of irreducibles.
///
/// "Downward" is read through the polarity: for `Inf` this is an up-set in
/// the lattice order. The inner set is private and every constructor
/// validates or derives closure, so membership is always closed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct LowerSet(BTreeSet<IrredId>);

impl LowerSet {
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// Accepts `members` only if they already form a lower set.
    pub fn new<T: Lattice, P: Polarity>(
        irreducibles: &IrreducibleSet<'_, T, P>,
        members: impl IntoIterator<Item = IrredId>,
    ) -> Result<Self> {
        let set: BTreeSet<IrredId> = members.into_iter().collect();
        for &i in &set {
            if !irreducibles.contains_id(i) {
                return Err(BirkhoffError::UnknownIrreducible { irreducible: i });
            }
            if let Some(missing) = irreducibles
                .ids()
                .find(|&j| irreducibles.le(j, i) && !set.contains(&j))
            {
                return Err(BirkhoffError::NotDownwardClosed {
                    irreducible: i,
                    missing,
                });
            }
        }
        Ok(Self(set))
    }

    /// Smallest lower set containing `generators`.
    pub fn closure<T: Lattice, P: Polarity>(
        irreducibles: &IrreducibleSet<'_, T, P>,
        generators: impl IntoIterator<Item = IrredId>,
    ) -> Result<Self> {
        let mut set = BTreeSet::new();
        for g in generators {
            if !irreducibles.contains_id(g) {
                return Err(BirkhoffError::UnknownIrreducible { irreducible: g });
            }
            set.extend(irreducibles.ids().filter(|&j| irreducibles.le(j, g)));
        }
        Ok(Self(set))
    }

    /// The irreducibles at or before `element`: `{ i | i ≤ element }`.
    ///
    /// Transitivity of the order makes the result downward closed.
    pub fn below<T: Lattice, P: Polarity>(
        irreducibles: &IrreducibleSet<'_, T, P>,
        element: ElemId,
    ) -> Self {
        let lattice = irreducibles.lattice();
        Self(
            irreducibles
                .iter()
                .filter(|i| P::precedes(lattice, i.origin, element))
                .map(|i| i.id)
                .collect(),
        )
    }

    pub fn contains(&self, id: IrredId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = IrredId> + '_ {
        self.0.iter().copied()
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn union(&self, other: &Self) -> Self {
        Self(self.0.union(&other.0).copied().collect())
    }

    pub fn intersection(&self, other: &Self) -> Self {
        Self(self.0.intersection(&other.0).copied().collect())
    }

    /// Forgets downward closure, keeping only membership.
    pub fn to_powerset(&self) -> Powerset<IrredId> {
        Powerset(self.0.clone())
    }
}

impl<'a, T: Lattice, P: Polarity> IrreducibleSet<'a, T, P> {
    /// Every lower set of the irreducible poset, each exactly once.
    ///
    /// For a distributive lattice there are as many as there are elements.
    pub fn lower_sets(&self) -> Vec<LowerSet> {
        // An irreducible strictly above another has strictly more
        // predecessors, so sorting by that count gives a linear extension.
        let mut order: Vec<IrredId> = self.ids().collect();
        order.sort_by_key(|&i| self.ids().filter(|&j| self.le(j, i)).count());

        let mut out = Vec::new();
        let mut current = BTreeSet::new();
        self.extend_lower_sets(&order, 0, &mut current, &mut out);
        out
    }

    fn extend_lower_sets(
        &self,
        order: &[IrredId],
        k: usize,
        current: &mut BTreeSet<IrredId>,
        out: &mut Vec<LowerSet>,
    ) {
        let Some(&i) = order.get(k) else {
            out.push(LowerSet(current.clone()));
            return;
        };

        self.extend_lower_sets(order, k + 1, current, out);

        let closed = self
            .ids()
            .all(|j| j == i || !self.le(j, i) || current.contains(&j));
        if closed {
            current.insert(i);
            self.extend_lower_sets(order, k + 1, current, out);
            current.remove(&i);
        }
    }
}
