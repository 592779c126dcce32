/// Function-calling metadata advertised to the model
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema of the arguments object
    pub parameters: serde_json::Value,
}

impl From<&infer_tools::ToolDefinition> for ToolDefinition {
    fn from(definition: &infer_tools::ToolDefinition) -> Self {
        Self {
            function: FunctionDefinition {
                name: definition.name.clone(),
                description: definition.description.clone(),
                parameters: definition.json_schema(),
            },
        }
    }
}

/// How the model may select tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolChoice {
    /// At least one tool call is mandatory
    Required,
}

impl ToolChoice {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
        }
    }
}
