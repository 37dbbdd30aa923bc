#![deny(unsafe_code)]
//! Core types shared by the cellblob crates.
//!
//! Provides the [`NoiseField`] trait and its OpenSimplex implementation, the
//! [`Interpolator`] used to glide displayed geometry toward new targets, the
//! [`Timeline`] of cancellable deferred tasks, the `Xorshift64` PRNG behind
//! [`RandomSource`], parameter helpers, and the reproducible run [`Seed`].

pub mod error;
pub mod interpolate;
pub mod noise_field;
pub mod params;
pub mod prng;
pub mod seed;
pub mod timeline;

pub use error::SceneError;
pub use interpolate::{Ease, Interpolator};
pub use noise_field::{map_range, NoiseField, SimplexNoise};
pub use prng::{RandomSource, Xorshift64};
pub use seed::Seed;
pub use timeline::{TaskHandle, Timeline};
