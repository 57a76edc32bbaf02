//! Core vocabulary for the Birkhoff construction: element-level lattice
//! traits, finite carriers and the sup/inf polarity strategy.

pub mod contracts;
pub mod domain;
pub mod error;
pub mod lattice;

pub use contracts::{Inf, Polarity, Sup};
pub use domain::{ElemId, FiniteLattice};
pub use error::LatticeError;
pub use lattice::{Lattice, OrderBot, Powerset, Product};
