//! Storage implementations.

pub mod csv;

pub use csv::CsvStore;
