//! # Trace Graph
//!
//! Structural relations between code units, counted from resolved declarations.
//!
//! ## Relations
//!
//! - **Calls** - unit A invokes a method declared by unit B
//! - **References** - unit A accesses a field whose type is unit B
//! - **TypeUsage** - unit A declares a field or local of type B (kept as a data
//!   product, not used for scoring)
//!
//! ## Architecture
//!
//! ```text
//! UnitDeclaration[]
//!     │
//!     ├──> Graph Builder (parallel per-unit walk)
//!     │      ├─ Resolve callee declaring types
//!     │      ├─ Unwrap array / type-argument references
//!     │      └─ Skip unresolved expressions (diagnostics)
//!     │
//!     └──> StructuralGraph
//!            ├─ Calls       N×N
//!            ├─ References  N×N
//!            └─ TypeUsage   N×N   (diagonal always zero)
//! ```

mod builder;
mod error;
mod types;

pub use builder::GraphBuilder;
pub use error::{GraphError, Result};
pub use types::{RelationKind, RelationMatrix, ResolutionDiagnostic, StructuralGraph};
