//! Tariff - U.S. HTS duty and tariff calculator
//!
//! This library looks up Harmonized Tariff Schedule codes in a reference
//! table, sums the applicable duty components (base duty, Section 301
//! trade-action duty, origin-based reciprocal tariff), and computes the
//! regulated processing fees (MPF, HMF) on shipment value.

pub mod cli;
pub mod config;
pub mod duty;
pub mod error;
pub mod importers;
pub mod utils;
