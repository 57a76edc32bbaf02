use birkhoff_core::{ElemId, FiniteLattice, Lattice, LatticeError, Polarity};
use tracing::debug;

use crate::error::{BirkhoffError, Result};
use crate::irreducible::IrreducibleSet;
use crate::lower_set::LowerSet;

/// The order-isomorphism between lattice elements and lower sets of
/// irreducibles.
///
/// The forward direction is tabulated at construction; the backward
/// direction folds `combine` over the set. Both are read-only afterwards.
#[derive(Debug, Clone)]
pub struct Isomorphism<'a, T: Lattice, P: Polarity> {
    irreducibles: IrreducibleSet<'a, T, P>,
    forward: Vec<LowerSet>,
}

/// Builds the isomorphism for the lattice the irreducibles were taken from.
///
/// The lattice must be distributive. This is not checked here; call
/// [`Isomorphism::verify`] or `FiniteLattice::check_distributive` to detect
/// a violation.
pub fn build_isomorphism<T: Lattice, P: Polarity>(
    irreducibles: IrreducibleSet<'_, T, P>,
) -> Isomorphism<'_, T, P> {
    let lattice = irreducibles.lattice();
    let forward = lattice
        .ids()
        .map(|a| LowerSet::below(&irreducibles, a))
        .collect();
    debug!(
        polarity = P::NAME,
        elements = lattice.len(),
        irreducibles = irreducibles.len(),
        "built lower-set isomorphism"
    );
    Isomorphism {
        irreducibles,
        forward,
    }
}

impl<'a, T: Lattice, P: Polarity> Isomorphism<'a, T, P> {
    pub fn lattice(&self) -> &'a FiniteLattice<T> {
        self.irreducibles.lattice()
    }

    pub fn irreducibles(&self) -> &IrreducibleSet<'a, T, P> {
        &self.irreducibles
    }

    /// # Panics
    ///
    /// Panics if `a` was not issued by the underlying lattice.
    pub fn to_lower_set(&self, a: ElemId) -> &LowerSet {
        &self.forward[a.index()]
    }

    /// Combines every irreducible of `set`, starting from the unit.
    pub fn from_lower_set(&self, set: &LowerSet) -> Result<ElemId> {
        let lattice = self.lattice();
        let unit = P::unit(lattice).ok_or(if lattice.is_empty() {
            LatticeError::EmptyCarrier
        } else {
            LatticeError::MissingUnit(P::UNIT)
        })?;

        let mut acc = lattice.get(unit).clone();
        for i in set.iter() {
            if !self.irreducibles.contains_id(i) {
                return Err(BirkhoffError::UnknownIrreducible { irreducible: i });
            }
            acc = P::combine(&acc, self.irreducibles.element(i));
        }

        lattice.position(&acc).ok_or_else(|| {
            LatticeError::FoldNotClosed {
                combined: P::COMBINE,
                size: set.len(),
            }
            .into()
        })
    }

    /// Checks both round trips and that each direction reflects the order.
    pub fn verify(&self) -> Result<()> {
        let lattice = self.lattice();
        if lattice.is_empty() {
            return Ok(());
        }

        for a in lattice.ids() {
            let recovered = self.from_lower_set(self.to_lower_set(a))?;
            if recovered != a {
                return Err(BirkhoffError::ElementRoundTrip {
                    element: a,
                    recovered,
                });
            }
        }

        let lower_sets = self.irreducibles.lower_sets();
        for set in &lower_sets {
            let element = self.from_lower_set(set)?;
            if self.to_lower_set(element) != set {
                return Err(BirkhoffError::LowerSetRoundTrip {
                    size: set.len(),
                    element,
                });
            }
        }

        for a in lattice.ids() {
            for b in lattice.ids() {
                let ordered = P::precedes(lattice, a, b);
                let included = self.to_lower_set(a).is_subset(self.to_lower_set(b));
                if ordered != included {
                    return Err(BirkhoffError::NotMonotone { left: a, right: b });
                }
            }
        }

        debug!(
            polarity = P::NAME,
            lower_sets = lower_sets.len(),
            "isomorphism verified"
        );
        Ok(())
    }
}
