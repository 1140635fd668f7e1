//! Defines the in-memory font model produced by `fontcvt-tool` and the binary blob format it
//! is flashed as.
//!
//! Includes both the read-only, `no_std` interface used by embedded loaders and the writable
//! interface used on the host.
#![cfg_attr(not(any(feature = "std", test)), no_std)]

pub mod blob;
pub mod glyph;
pub mod mode;
#[cfg(any(feature = "std", test))]
pub mod model;
