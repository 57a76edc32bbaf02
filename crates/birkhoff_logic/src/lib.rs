//! Birkhoff representation of finite distributive lattices.
//!
//! The construction runs in three stages over one [`FiniteLattice`]:
//!
//! 1. [`extract_irreducibles`] finds the sup- (or inf-) irreducible elements;
//! 2. [`build_isomorphism`] pairs every element with the lower set of
//!    irreducibles below it;
//! 3. [`derive_embedding`] turns that into an injective lattice homomorphism
//!    into [`Powerset`]s of irreducibles.
//!
//! Each stage is generic over a [`Polarity`], so the order-dual reading
//! (inf-irreducibles, meets, top) uses the same code with [`Inf`].
//!
//! [`FiniteLattice`]: birkhoff_core::FiniteLattice
//! [`Powerset`]: birkhoff_core::Powerset
//! [`Polarity`]: birkhoff_core::Polarity
//! [`Inf`]: birkhoff_core::Inf

pub mod embedding;
pub mod error;
pub mod irreducible;
pub mod isomorphism;
pub mod lower_set;
pub mod report;

pub use embedding::{derive_embedding, Embedding};
pub use error::BirkhoffError;
pub use irreducible::{extract_irreducibles, is_irreducible, IrredId, Irreducible, IrreducibleSet};
pub use isomorphism::{build_isomorphism, Isomorphism};
pub use lower_set::LowerSet;
pub use report::{run_diagnostics, BirkhoffReport, Diagnostic, EmbeddingRow};
