//! # tenrex-kernels
//!
//! Tensor kernel operations for TenRex.
//!
//! ## Overview
//!
//! This crate provides the fundamental multilinear-algebra operations used by
//! the tensor regression engine: mode-n unfolding and folding, Khatri-Rao and
//! Kronecker products, n-mode products, partial vectorization, and dense
//! reconstruction of CP and Tucker weight tensors.
//!
//! **Key Features:**
//! - **Mode-n unfold/fold** - Matricization along any mode (row-major convention)
//! - **Khatri-Rao product** - Column-wise Kronecker product, pairwise and list forms
//! - **Kronecker product** - Tensor product of matrices, pairwise and list forms
//! - **N-mode product** - Tensor-matrix multiplication along any mode
//! - **Partial vectorization** - Sample-batched flattening for design matrices
//! - **CP/Tucker reconstruction** - Dense tensor from factor matrices and core
//!
//! ## Ordering Convention
//!
//! All kernels share one flattening convention: tensors are laid out row-major
//! (last index fastest), `unfold` permutes the chosen mode to the front and
//! keeps the remaining modes in ascending order, and the list forms of
//! Khatri-Rao and Kronecker fold left so the first operand's row index varies
//! slowest. Under this convention `unfold(cp_to_tensor([F_0, ..]), 0)` equals
//! `F_0 * khatri_rao_list([F_1, ..]).t()` exactly.
//!
//! ## Quick Start
//!
//! ```rust
//! use scirs2_core::ndarray_ext::Array2;
//! use tenrex_kernels::{cp_to_tensor, khatri_rao, unfold};
//!
//! // Khatri-Rao product
//! let a = Array2::<f64>::ones((10, 5));
//! let b = Array2::<f64>::ones((8, 5));
//! let kr = khatri_rao(&a.view(), &b.view()).unwrap();
//! assert_eq!(kr.shape(), &[80, 5]);
//!
//! // Rank-2 CP reconstruction
//! let factors = vec![
//!     Array2::<f64>::ones((3, 2)),
//!     Array2::<f64>::ones((4, 2)),
//! ];
//! let views: Vec<_> = factors.iter().map(|f| f.view()).collect();
//! let tensor = cp_to_tensor(&views).unwrap();
//! assert_eq!(tensor.shape(), &[3, 4]);
//!
//! // Mode-1 unfolding
//! let unfolded = unfold(&tensor.view(), 1).unwrap();
//! assert_eq!(unfolded.shape(), &[4, 3]);
//! ```
//!
//! ## SciRS2 Integration
//!
//! This crate uses `scirs2-core` for all array operations and numerical
//! computations. Direct use of `ndarray`, `rand`, or `num-traits` is not
//! permitted.

#![deny(warnings)]

pub mod error;
pub mod khatri_rao;
pub mod nmode;
pub mod reconstruct;
pub mod unfold;
pub mod vectorize;


// Re-exports
pub use error::{KernelError, KernelResult};
pub use khatri_rao::*;
pub use nmode::*;
pub use reconstruct::*;
pub use unfold::*;
pub use vectorize::*;
