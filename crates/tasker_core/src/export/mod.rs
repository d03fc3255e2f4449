//! File export surfaces.
//!
//! # Responsibility
//! - Turn repository query results into external file formats.
//!
//! # Invariants
//! - Exporters read through the repository contract only; they never issue
//!   their own SQL.

pub mod csv_export;
