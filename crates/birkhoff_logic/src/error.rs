use birkhoff_core::{ElemId, LatticeError};
use thiserror::Error;

use crate::irreducible::IrredId;

/// Failures reported by the verification passes.
///
/// On a finite distributive lattice none of these can occur; each variant
/// names a witness of the violated law.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BirkhoffError {
    #[error(transparent)]
    Lattice(#[from] LatticeError),

    #[error("{element} is not recovered from the irreducibles below it (got {recovered})")]
    ElementRoundTrip { element: ElemId, recovered: ElemId },

    #[error("lower set of size {size} does not survive the round trip through {element}")]
    LowerSetRoundTrip { size: usize, element: ElemId },

    #[error("order is not reflected between {left} and {right}")]
    NotMonotone { left: ElemId, right: ElemId },

    #[error("{irreducible} is in the set but {missing} below it is not")]
    NotDownwardClosed { irreducible: IrredId, missing: IrredId },

    #[error("{irreducible} is not an irreducible of this lattice")]
    UnknownIrreducible { irreducible: IrredId },

    #[error("{op} of {left} and {right} is not mapped to the {set_op} of their images")]
    NotPreserved {
        op: &'static str,
        set_op: &'static str,
        left: ElemId,
        right: ElemId,
    },

    #[error("{left} and {right} have the same image")]
    NotInjective { left: ElemId, right: ElemId },

    #[error("the {unit} element {element} has a non-empty image")]
    UnitNotEmpty { unit: &'static str, element: ElemId },
}

pub type Result<T> = std::result::Result<T, BirkhoffError>;
