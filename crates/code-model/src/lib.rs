//! # Trace Code Model
//!
//! The resolved declaration model that the utility-trace analysis consumes.
//!
//! Parsing and symbol resolution happen elsewhere; this crate only describes
//! their output in a shape the analysis can walk without touching source text.
//!
//! ## Architecture
//!
//! ```text
//! snapshot.json
//!     │
//!     ├──> SourceModel (units sorted by fully-qualified name)
//!     │      └─ UnitDeclaration[]
//!     │           ├─ comments / identifiers      (document text)
//!     │           ├─ calls                       (Resolution<CallTarget>)
//!     │           └─ fields / locals / accesses  (Resolution<ResolvedType>)
//!     │
//!     └──> CodeUnitIndex (name ⇄ dense ordinal)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use trace_code_model::{CallTarget, SourceModel, UnitDeclaration};
//!
//! let caller = UnitDeclaration::new("app.Caller").with_call(Ok(CallTarget::new("app", "Helper")));
//! let helper = UnitDeclaration::new("app.Helper");
//!
//! let model = SourceModel::from_units(vec![caller, helper]);
//! assert_eq!(model.index().ordinal("app.Helper"), Some(1));
//! ```

mod error;
mod index;
mod model;
mod types;

pub use error::{CodeModelError, Result};
pub use index::CodeUnitIndex;
pub use model::SourceModel;
pub use types::{CallTarget, Resolution, ResolutionError, ResolvedType, UnitDeclaration};
