use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::contracts::Polarity;
use crate::error::{LatticeError, Result};
use crate::lattice::{Lattice, OrderBot};

// Section 0: Identifiers

/// Opaque handle on an element of one [`FiniteLattice`].
///
/// Ids are only meaningful for the lattice that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElemId(pub usize);

impl ElemId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// Section 1: Finite carrier

/// A finite lattice given by explicit enumeration of its elements.
///
/// The carrier is deduplicated on construction and the order relation is
/// tabulated once, so `le` is a lookup. Closure under `join`/`meet` is a
/// caller precondition; [`FiniteLattice::check_closed`] and
/// [`FiniteLattice::check_distributive`] are diagnostics for it.
///
/// The join and meet tables are built on first use and irreducible elements
/// are memoised per polarity, both on the instance.
#[derive(Debug, Clone)]
pub struct FiniteLattice<T: Lattice> {
    carrier: Vec<T>,
    order: Vec<Vec<bool>>,
    operations: OnceLock<OperationTable>,
    irreducibles: [OnceLock<Vec<ElemId>>; 2],
}

/// Row-major `n × n` tables of pairwise results; `None` where the result
/// falls outside the carrier.
#[derive(Debug, Clone)]
struct OperationTable {
    join: Vec<Option<ElemId>>,
    meet: Vec<Option<ElemId>>,
}

impl<T: Lattice> FiniteLattice<T> {
    pub fn new(elements: impl IntoIterator<Item = T>) -> Self {
        let mut carrier: Vec<T> = Vec::new();
        for e in elements {
            if !carrier.contains(&e) {
                carrier.push(e);
            }
        }

        let order = carrier
            .iter()
            .map(|a| carrier.iter().map(|b| a <= b).collect())
            .collect();

        Self {
            carrier,
            order,
            operations: OnceLock::new(),
            irreducibles: [OnceLock::new(), OnceLock::new()],
        }
    }

    pub fn len(&self) -> usize {
        self.carrier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carrier.is_empty()
    }

    pub fn elements(&self) -> &[T] {
        &self.carrier
    }

    pub fn ids(&self) -> impl Iterator<Item = ElemId> + '_ {
        (0..self.carrier.len()).map(ElemId)
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this lattice.
    pub fn get(&self, id: ElemId) -> &T {
        &self.carrier[id.0]
    }

    pub fn position(&self, value: &T) -> Option<ElemId> {
        self.carrier.iter().position(|e| e == value).map(ElemId)
    }

    pub fn le(&self, a: ElemId, b: ElemId) -> bool {
        self.order[a.0][b.0]
    }

    fn operations(&self) -> &OperationTable {
        self.operations.get_or_init(|| {
            let n = self.carrier.len();
            let mut join = vec![None; n * n];
            let mut meet = vec![None; n * n];
            for a in 0..n {
                for b in a..n {
                    let (x, y) = (&self.carrier[a], &self.carrier[b]);
                    let (j, m) = (self.position(&x.join(y)), self.position(&x.meet(y)));
                    join[a * n + b] = j;
                    join[b * n + a] = j;
                    meet[a * n + b] = m;
                    meet[b * n + a] = m;
                }
            }
            OperationTable { join, meet }
        })
    }

    /// # Panics
    ///
    /// Panics if `a` or `b` was not issued by this lattice.
    pub fn join_id(&self, a: ElemId, b: ElemId) -> Result<ElemId> {
        self.operations().join[a.0 * self.len() + b.0]
            .ok_or(LatticeError::NotClosed { op: "join", left: a, right: b })
    }

    /// # Panics
    ///
    /// Panics if `a` or `b` was not issued by this lattice.
    pub fn meet_id(&self, a: ElemId, b: ElemId) -> Result<ElemId> {
        self.operations().meet[a.0 * self.len() + b.0]
            .ok_or(LatticeError::NotClosed { op: "meet", left: a, right: b })
    }

    /// The least element, if the carrier has one.
    pub fn bottom(&self) -> Option<ElemId> {
        self.ids().find(|&a| self.ids().all(|b| self.le(a, b)))
    }

    /// The greatest element, if the carrier has one.
    pub fn top(&self) -> Option<ElemId> {
        self.ids().find(|&a| self.ids().all(|b| self.le(b, a)))
    }

    /// Checks that every pairwise join and meet lands back in the carrier.
    pub fn check_closed(&self) -> Result<()> {
        for a in self.ids() {
            for b in self.ids() {
                self.join_id(a, b)?;
                self.meet_id(a, b)?;
            }
        }
        Ok(())
    }

    /// Checks `a ⊓ (b ⊔ c) = (a ⊓ b) ⊔ (a ⊓ c)` over every triple.
    ///
    /// In a lattice this law implies its dual, so one pass suffices. Every
    /// step is a table lookup; an open carrier reports `NotClosed`.
    pub fn check_distributive(&self) -> Result<()> {
        for a in self.ids() {
            for b in self.ids() {
                let ab = self.meet_id(a, b)?;
                for c in self.ids() {
                    let lhs = self.meet_id(a, self.join_id(b, c)?)?;
                    let rhs = self.join_id(ab, self.meet_id(a, c)?)?;
                    if lhs != rhs {
                        return Err(LatticeError::NotDistributive { a, b, c });
                    }
                }
            }
        }
        Ok(())
    }

    /// Returns the memoised irreducibles for polarity `P`, running `init`
    /// on first use.
    pub fn cached_irreducibles<P: Polarity>(
        &self,
        init: impl FnOnce() -> Vec<ElemId>,
    ) -> &[ElemId] {
        self.irreducibles[P::SLOT].get_or_init(init)
    }
}

impl<T: OrderBot> FiniteLattice<T> {
    /// Builds a lattice whose carrier is guaranteed to contain `⊥`.
    pub fn with_bottom(elements: impl IntoIterator<Item = T>) -> Self {
        Self::new(std::iter::once(T::bot()).chain(elements))
    }
}

impl<T: Lattice> Default for FiniteLattice<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::Sup;
    use crate::lattice::{Powerset, Product};

    fn square() -> FiniteLattice<Product<bool, bool>> {
        FiniteLattice::new([
            Product(false, false),
            Product(true, false),
            Product(false, true),
            Product(true, true),
            Product(true, false),
        ])
    }

    #[test]
    fn carrier_is_deduplicated() {
        let lattice = square();
        assert_eq!(lattice.len(), 4);
        assert_eq!(lattice.position(&Product(true, true)), Some(ElemId(3)));
    }

    #[test]
    fn order_and_bounds() {
        let lattice = square();
        assert!(lattice.le(ElemId(0), ElemId(3)));
        assert!(!lattice.le(ElemId(1), ElemId(2)));
        assert_eq!(lattice.bottom(), Some(ElemId(0)));
        assert_eq!(lattice.top(), Some(ElemId(3)));
        assert_eq!(lattice.join_id(ElemId(1), ElemId(2)), Ok(ElemId(3)));
        assert_eq!(lattice.meet_id(ElemId(1), ElemId(2)), Ok(ElemId(0)));
    }

    #[test]
    fn closure_diagnostic_names_the_pair() {
        let lattice = FiniteLattice::new([Powerset::singleton(1u8), Powerset::singleton(2u8)]);
        assert_eq!(lattice.bottom(), None);
        assert!(matches!(
            lattice.check_closed(),
            Err(LatticeError::NotClosed { op: "join", .. })
        ));
        assert!(square().check_closed().is_ok());
        assert!(square().check_distributive().is_ok());
    }

    #[test]
    fn operation_tables_match_the_element_operations() {
        let lattice = FiniteLattice::new([0u64, 3, 1, 2]);
        for a in lattice.ids() {
            for b in lattice.ids() {
                let join = lattice.join_id(a, b).unwrap();
                let meet = lattice.meet_id(a, b).unwrap();
                assert_eq!(lattice.get(join), &lattice.get(a).join(lattice.get(b)));
                assert_eq!(lattice.get(meet), &lattice.get(a).meet(lattice.get(b)));
            }
        }
    }

    #[test]
    fn distributivity_on_an_open_carrier_names_the_gap() {
        let lattice = FiniteLattice::new([Powerset::singleton(1u8), Powerset::singleton(2u8)]);
        assert!(matches!(
            lattice.check_distributive(),
            Err(LatticeError::NotClosed { .. })
        ));
    }

    #[test]
    fn with_bottom_inserts_bot_once() {
        let lattice = FiniteLattice::with_bottom([Powerset::<u8>::bot(), Powerset::singleton(1)]);
        assert_eq!(lattice.len(), 2);
        assert_eq!(lattice.bottom(), Some(ElemId(0)));
    }

    #[test]
    fn empty_carrier_has_no_bounds() {
        let lattice: FiniteLattice<u64> = FiniteLattice::default();
        assert!(lattice.is_empty());
        assert_eq!(lattice.bottom(), None);
        assert_eq!(lattice.top(), None);
        assert!(lattice.check_closed().is_ok());
    }

    #[test]
    fn irreducible_cache_runs_init_once() {
        let lattice = square();
        let first = lattice.cached_irreducibles::<Sup>(|| vec![ElemId(1), ElemId(2)]).to_vec();
        let second = lattice.cached_irreducibles::<Sup>(|| unreachable!()).to_vec();
        assert_eq!(first, second);
    }
}
