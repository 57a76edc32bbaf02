use std::fmt;

use crate::domain::{ElemId, FiniteLattice};
use crate::error::Result;
use crate::lattice::Lattice;

/// Selects which half of the lattice structure a construction reads.
///
/// `Sup` works with `⊔`, `⊥` and `≤`; `Inf` is its order dual and works with
/// `⊓`, `⊤` and `≥`. Every stage of the decomposition is written once against
/// this trait.
pub trait Polarity: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// Short name used in reports ("sup" / "inf").
    const NAME: &'static str;
    /// Name of the combining operation ("join" / "meet").
    const COMBINE: &'static str;
    /// Name of the dual operation.
    const CO_COMBINE: &'static str;
    /// Name of the identity of `combine` ("bottom" / "top").
    const UNIT: &'static str;
    /// Index of the memoisation cell on [`FiniteLattice`].
    const SLOT: usize;

    fn combine<T: Lattice>(a: &T, b: &T) -> T;

    fn co_combine<T: Lattice>(a: &T, b: &T) -> T;

    /// `a` precedes `b` in the order this polarity reads.
    fn precedes<T: Lattice>(lattice: &FiniteLattice<T>, a: ElemId, b: ElemId) -> bool;

    /// Identity of `combine` inside the carrier.
    fn unit<T: Lattice>(lattice: &FiniteLattice<T>) -> Option<ElemId>;

    fn strictly_precedes<T: Lattice>(lattice: &FiniteLattice<T>, a: ElemId, b: ElemId) -> bool {
        a != b && Self::precedes(lattice, a, b)
    }

    /// `combine` of two carrier elements, read from the lattice's table.
    fn combine_id<T: Lattice>(lattice: &FiniteLattice<T>, a: ElemId, b: ElemId) -> Result<ElemId>;

    fn co_combine_id<T: Lattice>(
        lattice: &FiniteLattice<T>,
        a: ElemId,
        b: ElemId,
    ) -> Result<ElemId>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sup;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inf;

impl Polarity for Sup {
    const NAME: &'static str = "sup";
    const COMBINE: &'static str = "join";
    const CO_COMBINE: &'static str = "meet";
    const UNIT: &'static str = "bottom";
    const SLOT: usize = 0;

    fn combine<T: Lattice>(a: &T, b: &T) -> T {
        a.join(b)
    }

    fn co_combine<T: Lattice>(a: &T, b: &T) -> T {
        a.meet(b)
    }

    fn combine_id<T: Lattice>(lattice: &FiniteLattice<T>, a: ElemId, b: ElemId) -> Result<ElemId> {
        lattice.join_id(a, b)
    }

    fn co_combine_id<T: Lattice>(
        lattice: &FiniteLattice<T>,
        a: ElemId,
        b: ElemId,
    ) -> Result<ElemId> {
        lattice.meet_id(a, b)
    }

    fn precedes<T: Lattice>(lattice: &FiniteLattice<T>, a: ElemId, b: ElemId) -> bool {
        lattice.le(a, b)
    }

    fn unit<T: Lattice>(lattice: &FiniteLattice<T>) -> Option<ElemId> {
        lattice.bottom()
    }
}

impl Polarity for Inf {
    const NAME: &'static str = "inf";
    const COMBINE: &'static str = "meet";
    const CO_COMBINE: &'static str = "join";
    const UNIT: &'static str = "top";
    const SLOT: usize = 1;

    fn combine<T: Lattice>(a: &T, b: &T) -> T {
        a.meet(b)
    }

    fn co_combine<T: Lattice>(a: &T, b: &T) -> T {
        a.join(b)
    }

    fn combine_id<T: Lattice>(lattice: &FiniteLattice<T>, a: ElemId, b: ElemId) -> Result<ElemId> {
        lattice.meet_id(a, b)
    }

    fn co_combine_id<T: Lattice>(
        lattice: &FiniteLattice<T>,
        a: ElemId,
        b: ElemId,
    ) -> Result<ElemId> {
        lattice.join_id(a, b)
    }

    fn precedes<T: Lattice>(lattice: &FiniteLattice<T>, a: ElemId, b: ElemId) -> bool {
        lattice.le(b, a)
    }

    fn unit<T: Lattice>(lattice: &FiniteLattice<T>) -> Option<ElemId> {
        lattice.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> FiniteLattice<u64> {
        FiniteLattice::new([0u64, 1, 2])
    }

    #[test]
    fn sup_reads_the_order_upwards() {
        let lattice = chain();
        assert!(Sup::precedes(&lattice, ElemId(0), ElemId(2)));
        assert_eq!(Sup::unit(&lattice), Some(ElemId(0)));
        assert_eq!(Sup::combine_id(&lattice, ElemId(0), ElemId(1)), Ok(ElemId(1)));
    }

    #[test]
    fn inf_is_the_order_dual() {
        let lattice = chain();
        assert!(Inf::precedes(&lattice, ElemId(2), ElemId(0)));
        assert!(!Inf::strictly_precedes(&lattice, ElemId(1), ElemId(1)));
        assert_eq!(Inf::unit(&lattice), Some(ElemId(2)));
        assert_eq!(Inf::combine_id(&lattice, ElemId(0), ElemId(1)), Ok(ElemId(0)));
        assert_eq!(Inf::co_combine_id(&lattice, ElemId(0), ElemId(1)), Ok(ElemId(1)));
    }
}
