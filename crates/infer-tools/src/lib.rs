//! Callable tools advertised to the model
//!
//! The registry is assembled once at startup from configuration and is
//! read-only afterwards. Each entry pairs a declarative definition (name,
//! description, JSON parameter schema) with a handler variant resolved at
//! build time, so dispatch is a lookup followed by a `match`.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
pub mod registry;
pub mod weather;

pub use error::ToolError;
pub use registry::{RegisteredTool, ToolDefinition, ToolHandler, ToolRegistry};
pub use weather::{UnitSystem, WEATHER_TOOL_NAME, WeatherTool};
