use birkhoff_core::{Lattice, Polarity};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::embedding::Embedding;
use crate::isomorphism::Isomorphism;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingRow {
    pub element: String,
    pub image: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub check: String,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Diagnostic {
    fn from_result<E: fmt::Display>(check: &str, result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self {
                check: check.to_string(),
                passed: true,
                detail: None,
            },
            Err(e) => Self {
                check: check.to_string(),
                passed: false,
                detail: Some(e.to_string()),
            },
        }
    }
}

/// Serialisable summary of one decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirkhoffReport {
    pub polarity: String,
    pub elements: Vec<String>,
    pub irreducibles: Vec<String>,
    pub lower_set_count: usize,
    pub embedding: Vec<EmbeddingRow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl BirkhoffReport {
    pub fn from_embedding<T, P>(embedding: &Embedding<'_, T, P>) -> Self
    where
        T: Lattice + fmt::Display,
        P: Polarity,
    {
        let lattice = embedding.lattice();
        let irreducibles = embedding.irreducibles();

        let embedding_rows = lattice
            .ids()
            .map(|a| EmbeddingRow {
                element: lattice.get(a).to_string(),
                image: embedding
                    .labels(embedding.embed(a))
                    .into_iter()
                    .map(|e| e.to_string())
                    .collect(),
            })
            .collect();

        Self {
            polarity: P::NAME.to_string(),
            elements: lattice.elements().iter().map(|e| e.to_string()).collect(),
            irreducibles: irreducibles
                .iter()
                .map(|i| lattice.get(i.origin).to_string())
                .collect(),
            lower_set_count: irreducibles.lower_sets().len(),
            embedding: embedding_rows,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// True when every recorded diagnostic passed.
    pub fn passed(&self) -> bool {
        self.diagnostics.iter().all(|d| d.passed)
    }
}

/// Runs every diagnostic pass: closure, distributivity, isomorphism and
/// homomorphism.
pub fn run_diagnostics<T: Lattice, P: Polarity>(
    iso: &Isomorphism<'_, T, P>,
    embedding: &Embedding<'_, T, P>,
) -> Vec<Diagnostic> {
    let lattice = iso.lattice();
    vec![
        Diagnostic::from_result("closed", lattice.check_closed()),
        Diagnostic::from_result("distributive", lattice.check_distributive()),
        Diagnostic::from_result("isomorphism", iso.verify()),
        Diagnostic::from_result("homomorphism", embedding.check_homomorphism()),
    ]
}
