use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

// Defines the algebraic structure every element type must carry (Lattice)
pub trait Lattice: Clone + PartialEq + PartialOrd {
    /// Computes the Least Upper Bound (LUB) of two elements.
    /// Written `a ⊔ b`.
    fn join(&self, other: &Self) -> Self;

    /// Computes the Greatest Lower Bound (GLB) of two elements.
    /// Written `a ⊓ b`.
    fn meet(&self, other: &Self) -> Self;
}

pub trait OrderBot: Lattice {
    /// The bottom element of the lattice.
    /// Written `⊥`.
    fn bot() -> Self;
}

impl Lattice for u64 {
    fn join(&self, other: &Self) -> Self {
        std::cmp::max(*self, *other)
    }
    fn meet(&self, other: &Self) -> Self {
        std::cmp::min(*self, *other)
    }
}

impl OrderBot for u64 {
    fn bot() -> Self {
        0
    }
}

impl Lattice for bool {
    fn join(&self, other: &Self) -> Self {
        *self || *other
    }
    fn meet(&self, other: &Self) -> Self {
        *self && *other
    }
}

impl OrderBot for bool {
    fn bot() -> Self {
        false
    }
}

/// Finite subsets of `T` ordered by inclusion.
///
/// This is the codomain of the Birkhoff embedding: join is union, meet is
/// intersection and `⊥` is the empty set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Powerset<T: Ord>(pub BTreeSet<T>);

impl<T: Ord + Clone> Powerset<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self(items.into_iter().collect())
    }

    pub fn singleton(item: T) -> Self {
        let mut set = BTreeSet::new();
        set.insert(item);
        Self(set)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.0.contains(item)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.0.is_subset(&other.0)
    }
}

impl<T: Ord> Default for Powerset<T> {
    fn default() -> Self {
        Self(BTreeSet::new())
    }
}

impl<T: Ord + Clone> FromIterator<T> for Powerset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T: Ord> PartialOrd for Powerset<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.0 == other.0 {
            Some(Ordering::Equal)
        } else if self.0.is_subset(&other.0) {
            Some(Ordering::Less)
        } else if self.0.is_superset(&other.0) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl<T: Ord + Clone> Lattice for Powerset<T> {
    fn join(&self, other: &Self) -> Self {
        let mut new_set = self.0.clone();
        for item in &other.0 {
            new_set.insert(item.clone());
        }
        Self(new_set)
    }

    fn meet(&self, other: &Self) -> Self {
        let new_set = self.0.intersection(&other.0).cloned().collect();
        Self(new_set)
    }
}

impl<T: Ord + Clone> OrderBot for Powerset<T> {
    fn bot() -> Self {
        Self(BTreeSet::new())
    }
}

impl<T: Ord + fmt::Display> fmt::Display for Powerset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "}}")
    }
}

/// Pointwise product of two lattices.
///
/// Tuples already carry a lexicographic `PartialOrd`, which is not the
/// product order, hence the dedicated wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Product<A, B>(pub A, pub B);

impl<A: PartialOrd, B: PartialOrd> PartialOrd for Product<A, B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        // Pointwise comparison
        let le = self.0 <= other.0 && self.1 <= other.1;
        let ge = self.0 >= other.0 && self.1 >= other.1;
        match (le, ge) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => None,
        }
    }
}

impl<A: Lattice, B: Lattice> Lattice for Product<A, B> {
    fn join(&self, other: &Self) -> Self {
        Product(self.0.join(&other.0), self.1.join(&other.1))
    }

    fn meet(&self, other: &Self) -> Self {
        Product(self.0.meet(&other.0), self.1.meet(&other.1))
    }
}

impl<A: OrderBot, B: OrderBot> OrderBot for Product<A, B> {
    fn bot() -> Self {
        Product(A::bot(), B::bot())
    }
}

impl<A: fmt::Display, B: fmt::Display> fmt::Display for Product<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn powerset_order_is_inclusion() {
        let a = Powerset::new([1u8, 2]);
        let b = Powerset::new([1u8, 2, 3]);
        let c = Powerset::new([4u8]);
        assert!(a < b);
        assert!(b > a);
        assert_eq!(a.partial_cmp(&c), None);
        assert!(Powerset::<u8>::bot() <= c);
    }

    #[test]
    fn powerset_join_and_meet() {
        let a = Powerset::new([1u8, 2]);
        let b = Powerset::new([2u8, 3]);
        assert_eq!(a.join(&b), Powerset::new([1, 2, 3]));
        assert_eq!(a.meet(&b), Powerset::singleton(2));
        assert_eq!(a.to_string(), "{1, 2}");
    }

    #[test]
    fn product_is_pointwise() {
        let a = Product(1u64, 3u64);
        let b = Product(2u64, 0u64);
        assert_eq!(a.partial_cmp(&b), None);
        assert_eq!(a.join(&b), Product(2, 3));
        assert_eq!(a.meet(&b), Product(1, 0));
        assert!(Product(0u64, 0u64) < a);
        assert_eq!(Product::<u64, bool>::bot(), Product(0, false));
    }
}
