//! # Derived Table Schema
//!
//! This module defines the Apache Arrow schema of the derived table written by
//! the Parquet sink: one row per raw reading, with a fixed superset of named
//! numeric columns.
//!
//! ## Schema Columns
//!
//! | Group | Columns | Type |
//! |-------|---------|------|
//! | stage | `stage` | Int64 |
//! | raw | `time_test` … `axial_force` (10) | Float64 |
//! | shared | cumulative columns, height, axial strain, σ'r, excess pore pressure (7) | Float64 |
//! | side A | `area_a` … `average_effective_stress_a` (14) | Float64 |
//! | side B | `area_b` … `average_effective_stress_b` (14) | Float64 |
//!
//! Each field carries a `unit` metadata entry where the quantity has one.

mod builders;
/// Column name constants.
pub mod columns;
mod constants;
mod validation;


pub use builders::{create_derived_schema, create_derived_schema_arc};
pub use columns::*;
pub use constants::*;
pub use validation::{validate_schema, SchemaValidationError};
