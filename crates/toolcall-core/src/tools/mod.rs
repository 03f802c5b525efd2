//! Tool management module
//!
//! This module owns the fixed catalog of mock tools and the per-session
//! configuration of each one. It produces the tool list that accompanies
//! every completion request.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  CATALOG (static)                           │
//! │    name, description, params, fields        │
//! └─────────────────────────────────────────────┘
//!           │ ToolDefinition::new
//!           ▼
//! ┌─────────────────────────────────────────────┐
//! │  ToolRegistry (per session)                 │
//! │    enabled / selected fields / unit         │
//! │    update(), update_by_name()               │
//! └─────────────────────────────────────────────┘
//!           │ list_active()
//!           ▼
//!     Vec<ToolSpec>  →  completion request
//! ```

mod catalog;
mod error;
mod registry;

pub use catalog::{CatalogEntry, ParamDecl, ParamKind, TemperatureUnit, ToolName, CATALOG};
pub use error::{RegistryError, RegistryResult};
pub use registry::{ToolDefinition, ToolOptions, ToolPatch, ToolRegistry, ToolSettings};
