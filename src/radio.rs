//! Radio Control Logic
//!
//! Pure tuning arithmetic and status decoding. The driver in
//! [`crate::drivers`] is the imperative shell around it.

pub mod tuning;
