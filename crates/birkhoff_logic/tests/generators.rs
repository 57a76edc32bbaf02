//! Proptest generators for finite distributive lattices
//!
//! Every generated lattice is a family of subsets of a small universe closed
//! under union and intersection, so it is distributive by construction.

#![allow(dead_code)]

use birkhoff_core::{FiniteLattice, Powerset};
use birkhoff_samples::{family, grid};
use proptest::collection::vec;
use proptest::prelude::*;

/// Parameters for family generation
#[derive(Debug, Clone)]
pub struct FamilyParams {
    pub universe: u8,
    pub max_generators: usize,
}

impl Default for FamilyParams {
    fn default() -> Self {
        Self {
            universe: 5,
            max_generators: 4,
        }
    }
}

/// Generate the generating sets of a family
pub fn arb_generators(params: FamilyParams) -> impl Strategy<Value = Vec<Powerset<u8>>> {
    let universe = params.universe.max(1) as usize;
    let subset = vec(any::<bool>(), universe).prop_map(|mask| {
        mask.iter()
            .enumerate()
            .filter(|(_, keep)| **keep)
            .map(|(i, _)| i as u8)
            .collect::<Powerset<u8>>()
    });
    vec(subset, 0..=params.max_generators)
}

/// Generate a distributive lattice as the union/intersection closure of a family
pub fn arb_family_lattice(params: FamilyParams) -> impl Strategy<Value = FiniteLattice<Powerset<u8>>> {
    arb_generators(params).prop_map(|gens| family(gens))
}

/// Generate a grid lattice together with its dimensions
pub fn arb_grid() -> impl Strategy<Value = (u64, u64, FiniteLattice<birkhoff_core::Product<u64, u64>>)> {
    (1u64..5, 1u64..5).prop_map(|(rows, cols)| (rows, cols, grid(rows, cols)))
}
