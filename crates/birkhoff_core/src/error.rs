use thiserror::Error;

use crate::domain::ElemId;

/// Precondition violations detected on a [`FiniteLattice`](crate::domain::FiniteLattice).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LatticeError {
    #[error("{op} of {left} and {right} is not in the carrier")]
    NotClosed {
        op: &'static str,
        left: ElemId,
        right: ElemId,
    },

    #[error("{combined} of {size} elements is not in the carrier")]
    FoldNotClosed { combined: &'static str, size: usize },

    #[error("distributivity fails at a = {a}, b = {b}, c = {c}")]
    NotDistributive { a: ElemId, b: ElemId, c: ElemId },

    #[error("the carrier is empty")]
    EmptyCarrier,

    #[error("the carrier has no {0} element")]
    MissingUnit(&'static str),
}

pub type Result<T> = std::result::Result<T, LatticeError>;
