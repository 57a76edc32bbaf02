use birkhoff_core::{ElemId, FiniteLattice, Lattice, Polarity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, trace};

/// Position of an irreducible inside its [`IrreducibleSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IrredId(pub usize);

impl fmt::Display for IrredId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "j{}", self.0)
    }
}

/// One irreducible together with the element it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Irreducible {
    pub id: IrredId,
    pub origin: ElemId,
}

/// The irreducible elements of a lattice for polarity `P`, in carrier order.
///
/// The member list is borrowed from the lattice's memoisation cell, so the
/// set is a cheap `Copy` view.
#[derive(Debug)]
pub struct IrreducibleSet<'a, T: Lattice, P: Polarity> {
    lattice: &'a FiniteLattice<T>,
    members: &'a [ElemId],
    _polarity: PhantomData<P>,
}

impl<'a, T: Lattice, P: Polarity> Clone for IrreducibleSet<'a, T, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T: Lattice, P: Polarity> Copy for IrreducibleSet<'a, T, P> {}

impl<'a, T: Lattice, P: Polarity> IrreducibleSet<'a, T, P> {
    pub fn lattice(&self) -> &'a FiniteLattice<T> {
        self.lattice
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = IrredId> {
        (0..self.members.len()).map(IrredId)
    }

    pub fn iter(&self) -> impl Iterator<Item = Irreducible> + 'a {
        let members: &'a [ElemId] = self.members;
        members
            .iter()
            .enumerate()
            .map(|(i, &origin)| Irreducible { id: IrredId(i), origin })
    }

    pub fn contains_id(&self, id: IrredId) -> bool {
        id.0 < self.members.len()
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this set.
    pub fn origin(&self, id: IrredId) -> ElemId {
        self.members[id.0]
    }

    pub fn element(&self, id: IrredId) -> &'a T {
        self.lattice.get(self.origin(id))
    }

    /// The irreducible standing for `element`, if it is one.
    pub fn find(&self, element: ElemId) -> Option<IrredId> {
        self.members.iter().position(|&e| e == element).map(IrredId)
    }

    /// Order inherited from the lattice, read through the polarity.
    pub fn le(&self, i: IrredId, j: IrredId) -> bool {
        P::precedes(self.lattice, self.origin(i), self.origin(j))
    }
}

/// Returns whether `a` cannot be written as `combine(b, c)` with `b`, `c`
/// strictly before `a`. The polarity unit is never irreducible.
pub fn is_irreducible<T: Lattice, P: Polarity>(lattice: &FiniteLattice<T>, a: ElemId) -> bool {
    if P::unit(lattice) == Some(a) {
        return false;
    }

    let below: Vec<ElemId> = lattice
        .ids()
        .filter(|&b| P::strictly_precedes(lattice, b, a))
        .collect();
    let target = lattice.get(a);

    for (i, &b) in below.iter().enumerate() {
        for &c in &below[i..] {
            if P::combine(lattice.get(b), lattice.get(c)) == *target {
                trace!(%a, %b, %c, polarity = P::NAME, "reducible");
                return false;
            }
        }
    }
    true
}

/// Enumerates the irreducible elements of `lattice` for polarity `P`.
///
/// The result is computed once per lattice and polarity; later calls reuse it.
pub fn extract_irreducibles<T: Lattice, P: Polarity>(
    lattice: &FiniteLattice<T>,
) -> IrreducibleSet<'_, T, P> {
    let members = lattice.cached_irreducibles::<P>(|| {
        let found: Vec<ElemId> = lattice
            .ids()
            .filter(|&a| is_irreducible::<T, P>(lattice, a))
            .collect();
        debug!(
            polarity = P::NAME,
            elements = lattice.len(),
            irreducibles = found.len(),
            "extracted irreducibles"
        );
        found
    });

    IrreducibleSet {
        lattice,
        members,
        _polarity: PhantomData,
    }
}
