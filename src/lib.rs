//! pixim: command-line front end for the raster-ops transforms.
//!
//! The library side of the binary holds the pieces the CLI composes:
//! the PNG codec boundary ([`io`]), output filename derivation
//! ([`naming`]) and ASCII-art rendering ([`ascii`]). All pixel
//! processing lives in the `raster-ops` crate.

pub mod ascii;
pub mod error;
pub mod io;
pub mod naming;

pub use error::IoError;
