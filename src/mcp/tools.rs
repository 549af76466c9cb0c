//! Tool descriptors advertised through `tools/list`.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::dispatch::Operation;

/// A tool as described to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool (operation) name.
    pub name: String,
    /// What the tool computes.
    pub description: String,
    /// JSON Schema of the arguments object.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Parameters of a `tools/call` request.
#[derive(Debug, Clone, Deserialize)]
pub struct CallToolParams {
    /// Name of the tool to run.
    pub name: String,
    /// Tool arguments.
    #[serde(default)]
    pub arguments: Value,
}

/// One content block of a tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolContent {
    /// Block type; always `"text"` here.
    #[serde(rename = "type")]
    pub kind: String,
    /// The block text.
    pub text: String,
}

/// Result of a `tools/call` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallToolResult {
    /// Content blocks.
    pub content: Vec<ToolContent>,
}

impl CallToolResult {
    /// A result made of a single text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent {
                kind: "text".to_string(),
                text: text.into(),
            }],
        }
    }
}

fn incapacity_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "ingresoBase": { "type": "number", "minimum": 1 },
            "porcentajeIncapacidad": { "type": "number", "minimum": 0, "maximum": 100 },
            "edad": { "type": "number", "minimum": 1 },
            "tipoContingencia": {
                "type": "string",
                "enum": ["accidente_trabajo", "enfermedad_profesional", "accidente_in_itinere", "otro"]
            },
            "fechaPMI": { "type": "string", "format": "date" }
        },
        "required": ["ingresoBase", "porcentajeIncapacidad", "edad", "tipoContingencia"]
    })
}

fn severance_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "salario": { "type": "number", "minimum": 1 },
            "fechaIngreso": { "type": "string", "format": "date" },
            "fechaEgreso": { "type": "string", "format": "date" },
            "preaviso": { "type": "boolean" },
            "agravantes": { "type": ["object", "null"], "additionalProperties": true }
        },
        "required": ["salario", "fechaIngreso", "fechaEgreso", "preaviso"]
    })
}

/// Returns the descriptor for `operation`.
pub fn tool_definition(operation: Operation) -> ToolDefinition {
    let (description, input_schema) = match operation {
        Operation::Incapacity => (
            "Calcula prestación por incapacidad (Ley 26.773, Decreto 669/19). Devuelve total y componentes.",
            incapacity_schema(),
        ),
        Operation::Severance => (
            "Calcula indemnización por despido (LCT). Devuelve total y componentes.",
            severance_schema(),
        ),
    };
    ToolDefinition {
        name: operation.name().to_string(),
        description: description.to_string(),
        input_schema,
    }
}

/// Returns every tool descriptor.
pub fn list_tools() -> Vec<ToolDefinition> {
    Operation::ALL.into_iter().map(tool_definition).collect()
}
