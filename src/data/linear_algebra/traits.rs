//! # Traits for elements in matrices
//!
//! All matrix types and kernels are generic over the element type. They only need floating point
//! arithmetic, comparison and absolute values, which `num_traits::Float` provides, and they need
//! to be movable between threads for the parallel kernels.
use std::fmt::{Debug, Display};

use num_traits::{Float, NumAssign};

/// Element of a matrix.
///
/// Implemented for all types that have the required properties, most notably `f32` and `f64`.
pub trait Field: Float + NumAssign + Default + Debug + Display + Send + Sync + 'static {}

impl<T> Field for T
where
    T: Float + NumAssign + Default + Debug + Display + Send + Sync + 'static,
{
}
