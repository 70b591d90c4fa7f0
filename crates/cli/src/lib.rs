//! Terminal output helpers for Rojo Footprint
//!
//! Provides shared CLI functionality:
//! - Status messages and coded error reports
//! - Plain-text tables
//! - Lookup spinners and the carbon progress gauge

#![warn(missing_docs)]

pub mod output;
pub mod progress;
