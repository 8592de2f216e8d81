//! Core domain types and logic.

pub mod error;
pub mod indicator;
pub mod price_bar;
pub mod quote;
pub mod settings;
pub mod symbol_catalog;
