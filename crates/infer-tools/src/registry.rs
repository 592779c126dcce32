use std::collections::BTreeSet;

use indexmap::IndexMap;
use infer_config::Config;
use serde_json::{Map, Value};

use crate::error::ToolError;
use crate::weather::WeatherTool;

/// Declarative description of a callable tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    /// Unique name the model uses to call the tool
    pub name: String,
    /// Human-readable description shown to the model
    pub description: String,
    /// JSON Schema `properties` object describing each parameter
    pub parameter_schema: Value,
    /// Parameters the model must supply
    pub required_parameters: BTreeSet<String>,
}

impl ToolDefinition {
    /// Full JSON Schema for the tool's arguments object
    pub fn json_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": self.parameter_schema,
            "required": self.required_parameters.iter().collect::<Vec<_>>(),
        })
    }
}

/// Native implementation behind a registered tool
#[derive(Debug)]
pub enum ToolHandler {
    /// Current-weather lookup
    Weather(WeatherTool),
}

impl ToolHandler {
    /// Run the tool, always producing a JSON string for the model
    pub async fn invoke(&self, arguments: &Map<String, Value>) -> String {
        match self {
            Self::Weather(tool) => tool.call(arguments).await,
        }
    }
}

/// A definition paired with its handler
#[derive(Debug)]
pub struct RegisteredTool {
    definition: ToolDefinition,
    handler: ToolHandler,
}

impl RegisteredTool {
    pub const fn new(definition: ToolDefinition, handler: ToolHandler) -> Self {
        Self { definition, handler }
    }

    pub const fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Invoke the tool's native implementation
    pub async fn invoke(&self, arguments: &Map<String, Value>) -> String {
        tracing::debug!(tool = %self.definition.name, "invoking tool");
        self.handler.invoke(arguments).await
    }
}

/// Immutable catalog of tools, in registration order
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, RegisteredTool>,
}

impl ToolRegistry {
    /// Build a registry from a fixed set of tools
    ///
    /// # Errors
    ///
    /// Returns `ToolError::Duplicate` if two tools share a name.
    pub fn new(tools: impl IntoIterator<Item = RegisteredTool>) -> Result<Self, ToolError> {
        let mut map = IndexMap::new();

        for tool in tools {
            let name = tool.name().to_owned();
            if map.contains_key(&name) {
                return Err(ToolError::Duplicate { name });
            }
            tracing::debug!(tool = %name, "registered tool");
            map.insert(name, tool);
        }

        Ok(Self { tools: map })
    }

    /// Build the service's built-in tools from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a tool's HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self, ToolError> {
        let weather = WeatherTool::new(&config.weather)?;
        Self::new([RegisteredTool::new(WeatherTool::definition(), ToolHandler::Weather(weather))])
    }

    /// Resolve a tool by name
    ///
    /// # Errors
    ///
    /// Returns `ToolError::NotFound` if no tool has that name.
    pub fn lookup(&self, name: &str) -> Result<&RegisteredTool, ToolError> {
        self.tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound { name: name.to_owned() })
    }

    /// All definitions, in registration order
    pub fn describe_all(&self) -> Vec<&ToolDefinition> {
        self.tools.values().map(RegisteredTool::definition).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use infer_config::WeatherConfig;

    use super::*;
    use crate::weather::WEATHER_TOOL_NAME;

    fn weather_tool() -> RegisteredTool {
        let tool = WeatherTool::new(&WeatherConfig::default()).unwrap();
        RegisteredTool::new(WeatherTool::definition(), ToolHandler::Weather(tool))
    }

    #[test]
    fn built_in_registry_advertises_weather() {
        let registry = ToolRegistry::from_config(&Config::default()).unwrap();

        assert_eq!(registry.len(), 1);
        let names: Vec<_> = registry.describe_all().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, [WEATHER_TOOL_NAME]);
    }

    #[test]
    fn lookup_finds_registered_tool() {
        let registry = ToolRegistry::new([weather_tool()]).unwrap();
        let tool = registry.lookup(WEATHER_TOOL_NAME).unwrap();
        assert_eq!(tool.name(), WEATHER_TOOL_NAME);
    }

    #[test]
    fn lookup_unknown_is_not_found() {
        let registry = ToolRegistry::new([weather_tool()]).unwrap();
        let err = registry.lookup("get_stock_price").unwrap_err();
        assert!(matches!(err, ToolError::NotFound { ref name } if name == "get_stock_price"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = ToolRegistry::new([weather_tool(), weather_tool()]).unwrap_err();
        assert!(matches!(err, ToolError::Duplicate { .. }));
    }

    #[test]
    fn json_schema_lists_required_parameters() {
        let schema = WeatherTool::definition().json_schema();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], serde_json::json!(["location"]));
        assert_eq!(schema["properties"]["location"]["type"], "string");
        assert_eq!(schema["properties"]["unit_sys"]["enum"], serde_json::json!(["metric", "imperial"]));
    }
}
