use birkhoff_core::{FiniteLattice, Lattice, OrderBot, Powerset, Product};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

pub const DEFAULT_DIVISORS_OF: u64 = 12;
pub const POWERSET_LABELS: &str = "xyzwuvab";

// Section 1: Divisibility

/// A natural number ordered by divisibility: meet is gcd, join is lcm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Divisor(pub u64);

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

impl PartialOrd for Divisor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let divides = |a: u64, b: u64| if a == 0 { b == 0 } else { b % a == 0 };
        if self.0 == other.0 {
            Some(Ordering::Equal)
        } else if divides(self.0, other.0) {
            Some(Ordering::Less)
        } else if divides(other.0, self.0) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl Lattice for Divisor {
    fn join(&self, other: &Self) -> Self {
        let g = gcd(self.0, other.0);
        if g == 0 {
            Divisor(0)
        } else {
            Divisor(self.0 / g * other.0)
        }
    }

    fn meet(&self, other: &Self) -> Self {
        Divisor(gcd(self.0, other.0))
    }
}

impl OrderBot for Divisor {
    fn bot() -> Self {
        Divisor(1)
    }
}

impl fmt::Display for Divisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Divisors of `n` in increasing order. `n = 0` yields the empty lattice.
pub fn divisors(n: u64) -> FiniteLattice<Divisor> {
    FiniteLattice::new((1..=n).filter(|d| n % d == 0).map(Divisor))
}

// Section 2: Sets, chains and grids

/// All subsets of `atoms`, smallest first.
pub fn powerset<T: Ord + Clone>(atoms: &[T]) -> FiniteLattice<Powerset<T>> {
    let mut subsets: Vec<Powerset<T>> = (0u64..1 << atoms.len())
        .map(|mask| {
            atoms
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, a)| a.clone())
                .collect()
        })
        .collect();
    subsets.sort_by_key(|s| s.len());
    FiniteLattice::new(subsets)
}

/// Powerset over the first `size` characters of [`POWERSET_LABELS`].
pub fn labelled_powerset(size: usize) -> FiniteLattice<Powerset<char>> {
    let atoms: Vec<char> = POWERSET_LABELS.chars().take(size).collect();
    powerset(&atoms)
}

/// The chain `0 < 1 < ... < len - 1`.
pub fn chain(len: u64) -> FiniteLattice<u64> {
    FiniteLattice::new(0..len)
}

/// Product of a `rows`-chain and a `cols`-chain.
pub fn grid(rows: u64, cols: u64) -> FiniteLattice<Product<u64, u64>> {
    FiniteLattice::new((0..rows).flat_map(|r| (0..cols).map(move |c| Product(r, c))))
}

/// A family of sets as read from a JSON file: `{"sets": [["a", "b"], ["c"]]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilySpec {
    pub sets: Vec<Vec<String>>,
}

impl FamilySpec {
    pub fn to_lattice(&self) -> FiniteLattice<Powerset<String>> {
        family(self.sets.iter().map(|s| s.iter().cloned().collect::<Powerset<String>>()))
    }
}

/// Closes `generators` and `∅` under union and intersection.
///
/// The result is a sublattice of a powerset, hence distributive.
pub fn family<T: Ord + Clone>(
    generators: impl IntoIterator<Item = Powerset<T>>,
) -> FiniteLattice<Powerset<T>> {
    let mut sets: Vec<Powerset<T>> = vec![Powerset::bot()];
    for g in generators {
        if !sets.contains(&g) {
            sets.push(g);
        }
    }

    let mut changed = true;
    while changed {
        changed = false;
        let mut fresh = Vec::new();
        for (i, a) in sets.iter().enumerate() {
            for b in &sets[i + 1..] {
                for c in [a.join(b), a.meet(b)] {
                    if !sets.contains(&c) && !fresh.contains(&c) {
                        fresh.push(c);
                    }
                }
            }
        }
        if !fresh.is_empty() {
            sets.extend(fresh);
            changed = true;
        }
    }

    sets.sort_by_key(|s| s.len());
    FiniteLattice::with_bottom(sets)
}

// Section 3: Non-distributive lattices

/// The pentagon `N5`: `⊥ < a < b < ⊤` and `⊥ < c < ⊤`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pentagon {
    Bot,
    A,
    B,
    C,
    Top,
}

/// The diamond `M3`: three incomparable atoms between `⊥` and `⊤`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diamond {
    Bot,
    X,
    Y,
    Z,
    Top,
}

impl Pentagon {
    fn below(self, other: Self) -> bool {
        use Pentagon::*;
        matches!(
            (self, other),
            (Bot, _) | (_, Top) | (A, A) | (A, B) | (B, B) | (C, C)
        )
    }
}

impl Diamond {
    fn below(self, other: Self) -> bool {
        use Diamond::*;
        self == other || matches!((self, other), (Bot, _) | (_, Top))
    }
}

macro_rules! finite_table_lattice {
    ($ty:ident) => {
        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                match (self.below(*other), other.below(*self)) {
                    (true, true) => Some(Ordering::Equal),
                    (true, false) => Some(Ordering::Less),
                    (false, true) => Some(Ordering::Greater),
                    (false, false) => None,
                }
            }
        }

        impl Lattice for $ty {
            fn join(&self, other: &Self) -> Self {
                if self.below(*other) {
                    *other
                } else if other.below(*self) {
                    *self
                } else {
                    $ty::Top
                }
            }

            fn meet(&self, other: &Self) -> Self {
                if self.below(*other) {
                    *self
                } else if other.below(*self) {
                    *other
                } else {
                    $ty::Bot
                }
            }
        }

        impl OrderBot for $ty {
            fn bot() -> Self {
                $ty::Bot
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $ty::Bot => write!(f, "⊥"),
                    $ty::Top => write!(f, "⊤"),
                    other => write!(f, "{}", format!("{:?}", other).to_lowercase()),
                }
            }
        }
    };
}

finite_table_lattice!(Pentagon);
finite_table_lattice!(Diamond);

pub fn pentagon() -> FiniteLattice<Pentagon> {
    use Pentagon::*;
    FiniteLattice::new([Bot, A, B, C, Top])
}

pub fn diamond() -> FiniteLattice<Diamond> {
    use Diamond::*;
    FiniteLattice::new([Bot, X, Y, Z, Top])
}

#[cfg(test)]
mod tests {
    use super::*;
    use birkhoff_core::{ElemId, LatticeError};

    #[test]
    fn divisors_of_twelve() {
        let lattice = divisors(12);
        let values: Vec<u64> = lattice.elements().iter().map(|d| d.0).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 6, 12]);
        assert!(Divisor(2) < Divisor(4));
        assert_eq!(Divisor(4).partial_cmp(&Divisor(6)), None);
        assert_eq!(Divisor(4).join(&Divisor(6)), Divisor(12));
        assert_eq!(Divisor(4).meet(&Divisor(6)), Divisor(2));
        assert!(lattice.check_closed().is_ok());
        assert!(lattice.check_distributive().is_ok());
        assert!(divisors(0).is_empty());
    }

    #[test]
    fn powerset_has_two_to_the_k_elements() {
        let lattice = labelled_powerset(3);
        assert_eq!(lattice.len(), 8);
        assert_eq!(lattice.get(ElemId(0)), &Powerset::bot());
        assert!(lattice.check_closed().is_ok());
    }

    #[test]
    fn grid_is_pointwise() {
        let lattice = grid(2, 3);
        assert_eq!(lattice.len(), 6);
        assert_eq!(lattice.bottom(), lattice.position(&Product(0, 0)));
        assert_eq!(lattice.top(), lattice.position(&Product(1, 2)));
        assert!(lattice.check_distributive().is_ok());
    }

    #[test]
    fn family_is_closed_under_union_and_intersection() {
        let spec = FamilySpec {
            sets: vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["b".to_string(), "c".to_string()],
            ],
        };
        let lattice = spec.to_lattice();
        // ∅, {b}, {a,b}, {b,c}, {a,b,c}
        assert_eq!(lattice.len(), 5);
        assert!(lattice.check_closed().is_ok());
        assert_eq!(lattice.bottom(), Some(ElemId(0)));
    }

    #[test]
    fn family_spec_reads_json() {
        let spec: FamilySpec = serde_json::from_str(r#"{"sets": [["p"], ["q"]]}"#).unwrap();
        assert_eq!(spec.to_lattice().len(), 4);
    }

    #[test]
    fn pentagon_and_diamond_are_not_distributive() {
        assert!(pentagon().check_closed().is_ok());
        assert!(diamond().check_closed().is_ok());
        assert!(matches!(
            pentagon().check_distributive(),
            Err(LatticeError::NotDistributive { .. })
        ));
        assert!(matches!(
            diamond().check_distributive(),
            Err(LatticeError::NotDistributive { .. })
        ));
        assert_eq!(Pentagon::A.join(&Pentagon::C), Pentagon::Top);
        assert_eq!(Pentagon::B.meet(&Pentagon::C), Pentagon::Bot);
        assert_eq!(Diamond::X.to_string(), "x");
    }
}
