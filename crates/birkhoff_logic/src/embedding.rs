use birkhoff_core::{ElemId, FiniteLattice, Lattice, Polarity, Powerset};
use tracing::debug;

use crate::error::{BirkhoffError, Result};
use crate::irreducible::{extract_irreducibles, IrredId, IrreducibleSet};
use crate::isomorphism::{build_isomorphism, Isomorphism};

/// Injective map from lattice elements into sets of irreducibles.
///
/// `combine` becomes union and `co_combine` becomes intersection, so for
/// `Sup` joins go to unions and meets to intersections.
#[derive(Debug, Clone)]
pub struct Embedding<'a, T: Lattice, P: Polarity> {
    irreducibles: IrreducibleSet<'a, T, P>,
    images: Vec<Powerset<IrredId>>,
}

/// Composes the forward map of `iso` with the inclusion of lower sets into
/// plain sets.
pub fn derive_embedding<'a, T: Lattice, P: Polarity>(
    iso: &Isomorphism<'a, T, P>,
) -> Embedding<'a, T, P> {
    let irreducibles = *iso.irreducibles();
    let lattice = iso.lattice();

    // No elements, no bottom to anchor on: the unique map out of nothing.
    if lattice.is_empty() {
        debug!(polarity = P::NAME, "empty carrier, vacuous embedding");
        return Embedding {
            irreducibles,
            images: Vec::new(),
        };
    }

    let images = lattice
        .ids()
        .map(|a| iso.to_lower_set(a).to_powerset())
        .collect();
    Embedding {
        irreducibles,
        images,
    }
}

impl<'a, T: Lattice, P: Polarity> Embedding<'a, T, P> {
    /// Runs extraction, isomorphism and derivation in one go.
    pub fn of_lattice(lattice: &'a FiniteLattice<T>) -> Self {
        let iso = build_isomorphism(extract_irreducibles::<T, P>(lattice));
        derive_embedding(&iso)
    }

    pub fn lattice(&self) -> &'a FiniteLattice<T> {
        self.irreducibles.lattice()
    }

    pub fn irreducibles(&self) -> &IrreducibleSet<'a, T, P> {
        &self.irreducibles
    }

    pub fn is_vacuous(&self) -> bool {
        self.images.is_empty()
    }

    /// # Panics
    ///
    /// Panics if `a` was not issued by the underlying lattice.
    pub fn embed(&self, a: ElemId) -> &Powerset<IrredId> {
        &self.images[a.index()]
    }

    pub fn embed_value(&self, value: &T) -> Option<&Powerset<IrredId>> {
        self.lattice().position(value).map(|a| self.embed(a))
    }

    /// The element whose image is exactly `image`, if any.
    pub fn preimage(&self, image: &Powerset<IrredId>) -> Option<ElemId> {
        self.images.iter().position(|i| i == image).map(ElemId)
    }

    /// Maps each irreducible in `image` back to its lattice element.
    pub fn labels(&self, image: &Powerset<IrredId>) -> Vec<&'a T> {
        image
            .iter()
            .filter(|&&i| self.irreducibles.contains_id(i))
            .map(|&i| self.irreducibles.element(i))
            .collect()
    }

    /// Checks that the map is an injective lattice homomorphism sending the
    /// unit to the empty set.
    pub fn check_homomorphism(&self) -> Result<()> {
        let lattice = self.lattice();

        if let Some(unit) = P::unit(lattice) {
            if !self.embed(unit).is_empty() {
                return Err(BirkhoffError::UnitNotEmpty {
                    unit: P::UNIT,
                    element: unit,
                });
            }
        }

        for a in lattice.ids() {
            for b in lattice.ids() {
                let (ea, eb) = (self.embed(a), self.embed(b));

                let c = P::combine_id(lattice, a, b)?;
                if *self.embed(c) != ea.join(eb) {
                    return Err(BirkhoffError::NotPreserved {
                        op: P::COMBINE,
                        set_op: "union",
                        left: a,
                        right: b,
                    });
                }

                let d = P::co_combine_id(lattice, a, b)?;
                if *self.embed(d) != ea.meet(eb) {
                    return Err(BirkhoffError::NotPreserved {
                        op: P::CO_COMBINE,
                        set_op: "intersection",
                        left: a,
                        right: b,
                    });
                }

                if a < b && ea == eb {
                    return Err(BirkhoffError::NotInjective { left: a, right: b });
                }

                if P::precedes(lattice, a, b) != ea.is_subset(eb) {
                    return Err(BirkhoffError::NotMonotone { left: a, right: b });
                }
            }
        }

        debug!(polarity = P::NAME, elements = lattice.len(), "embedding is a homomorphism");
        Ok(())
    }
}
