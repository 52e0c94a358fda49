//! Schema-agnostic table normalization for Horizon Lattice.
//!
//! Turns whatever JSON a GraphQL server returns into rows and columns that a
//! generic grid can display, without knowing the response schema up front.
//!
//! ```
//! use horizon_lattice_table::to_table;
//! use serde_json::json;
//!
//! let table = to_table(&json!([{"a": 1, "b": 2}, {"a": 3}]));
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.cell(0, "b"), "2");
//! assert_eq!(table.cell(1, "b"), "");
//! ```

mod normalize;
mod render;
mod table;

pub use normalize::{SCALAR_COLUMN, to_table};
pub use render::render_value;
pub use table::{RowRecord, TabularResult};

/// Target names for log filtering.
pub mod targets {
    /// Normalizer target.
    pub const TABLE: &str = "horizon_lattice_table";
}
