//! Image decoding for pnmedit.
//!
//! This module provides functionality for:
//! - Recognising the Netpbm family (P1-P6) from its magic word
//! - Decoding plain (ASCII) and binary rasters through the `image` crate's
//!   PNM codec
//! - Loading an image straight from a file
//!
//! # Examples
//!
//! ```ignore
//! use pnmedit_core::decode::load_netpbm;
//!
//! let image = load_netpbm("photo.pgm")?;
//! println!("Loaded {}x{} {} image", image.columns(), image.rows(), image.kind());
//! ```

mod netpbm;
mod types;

pub use netpbm::{decode_netpbm, load_netpbm, sniff_netpbm};
pub use types::{DecodeError, Encoding};
