use serde::{Deserialize, Serialize};

/// Parameter types an operation schema can declare.
///
/// Mirrors the JSON Schema primitive names so the rendered schema can be fed
/// straight into an OpenAI-style function definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl ParamType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
            ParamType::Object => "object",
        }
    }
}

/// One declared parameter of an operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub description: String,
    pub required: bool,
}

impl ParamSpec {
    pub fn required(name: &str, param_type: ParamType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            description: description.to_string(),
            required: true,
        }
    }

    pub fn optional(name: &str, param_type: ParamType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            description: description.to_string(),
            required: false,
        }
    }
}

/// Ordered argument schema for one operation.
///
/// Owned by the registry and immutable after registration. An empty schema is
/// valid: schema-less operations still go through extraction, the reasoning
/// service is simply told there is nothing to fill in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArgumentSchema {
    pub params: Vec<ParamSpec>,
}

impl ArgumentSchema {
    pub fn new(params: Vec<ParamSpec>) -> Self {
        Self { params }
    }

    pub fn empty() -> Self {
        Self { params: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// True when at least one parameter is marked required.
    pub fn has_required(&self) -> bool {
        self.params.iter().any(|p| p.required)
    }

    /// Render the schema as a JSON Schema object literal suitable for an
    /// OpenAI-compatible function definition.
    pub fn to_json_schema(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();
        for param in &self.params {
            properties.insert(
                param.name.clone(),
                serde_json::json!({
                    "type": param.param_type.as_str(),
                    "description": param.description,
                }),
            );
            if param.required {
                required.push(serde_json::Value::String(param.name.clone()));
            }
        }
        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Descriptor for one registered operation: identifier, human description,
/// and the argument schema used both to prompt extraction and to validate
/// its output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationDescriptor {
    pub name: String,
    pub description: String,
    pub schema: ArgumentSchema,
}
