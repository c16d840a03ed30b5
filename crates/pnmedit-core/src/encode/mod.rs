//! Image encoding for pnmedit.
//!
//! Writes an [`Image`](crate::Image) back out as a Netpbm file in either the
//! binary (P4-P6) or plain (P1-P3) variant of its kind.
//!
//! # Examples
//!
//! ```ignore
//! use pnmedit_core::decode::Encoding;
//! use pnmedit_core::encode::save_netpbm;
//!
//! save_netpbm(&image, "out.pgm", Encoding::Plain)?;
//! ```

mod netpbm;

pub use netpbm::{encode_netpbm, save_netpbm, EncodeError};
