//! # Matrix Power Library
//!
//! This library raises dense square matrices to non-negative integer powers with two
//! interchangeable algorithms, and provides the tooling to check that they agree. The
//! primary goal is to make the cost gap between repeated multiplication and repeated
//! squaring measurable, while keeping results comparable under floating-point rounding.
//!
//! ## Key Features
//! - **Generic Matrices**: `Matrix<T>` is a runtime-checked, row-major dense matrix over
//!   any `Scalar` element, so the same algorithms run exactly over integers and big
//!   integers and approximately over `f64`.
//! - **Two Strategies**: naive multiplication in O(p) products and repeated squaring in
//!   O(log p) products, each with a traced variant reporting the products performed.
//! - **Diagonal Summary**: the maximum diagonal entry, used as a cheap fingerprint to
//!   compare results.
//! - **Concurrency**: large products are split across rows with Rayon, and the
//!   comparison runner executes strategies on separate threads connected by a `kanal`
//!   channel.
//!
//! ## Overview of Modules
//!
//! ### Errors
//! - `MatrixError`: Enum of the failures that can occur, such as a negative exponent, a
//!   non-square or empty matrix, or a product of incompatible shapes.
//!
//! ### `math`
//! The `Matrix` type and its multiplication primitive. Each product entry is accumulated
//! in the same order on the parallel and sequential paths.
//!
//! ### `power`
//! `power` (repeated squaring), `power_naive` (repeated multiplication), their traced
//! variants, and the `Strategy` selector used by the binary.
//!
//! ### `summary`
//! `max_diagonal` and the relative tolerance helpers used to compare strategy outputs.
//!
//! ### `init`
//! Seeded standard-normal initialization of square matrices.
//!
//! ### `reference`
//! `power_ndarray`, an exponentiation built on `ndarray`'s matrix product, used as a
//! library reference.
//!
//! ### `compare`
//! `compare_strategies` runs several strategies concurrently on copies of one matrix and
//! reports each diagonal summary with its elapsed time.
//!
//! ## Usage Example
//! ```rust
//! use matrix_power::{math::Matrix, power, summary::max_diagonal};
//! let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
//! let smart = power::power(a.clone(), 2).unwrap();
//! let naive = power::power_naive(a, 2).unwrap();
//! assert_eq!(max_diagonal(&smart).unwrap(), 22.0);
//! assert_eq!(smart, naive);
//! ```

pub mod compare;
pub mod error;
pub mod init;
pub mod math;
pub mod power;
pub mod reference;
pub mod summary;

pub use error::MatrixError;
pub use math::{Matrix, Scalar};
