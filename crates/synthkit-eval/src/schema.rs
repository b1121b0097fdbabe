use jsonschema::JSONSchema;
use schemars::schema_for;
use serde_json::Value;

use synthkit_core::Dataset;

use crate::errors::EvalError;
use crate::integrity::Violation;

/// JSON Schema of the serialized [`Dataset`] contract.
pub fn dataset_json_schema() -> Result<Value, EvalError> {
    Ok(serde_json::to_value(schema_for!(Dataset))?)
}

/// Validate a dataset JSON document against [`dataset_json_schema`].
pub fn validate_dataset_json(dataset_json: &Value) -> Result<Vec<Violation>, EvalError> {
    let schema = dataset_json_schema()?;
    let compiled =
        JSONSchema::compile(&schema).map_err(|err| EvalError::Schema(err.to_string()))?;

    let mut violations = Vec::new();
    if let Err(errors) = compiled.validate(dataset_json) {
        for error in errors {
            let path = error.instance_path.to_string();
            violations.push(Violation {
                code: "schema_violation".to_string(),
                path: if path.is_empty() { "/".to_string() } else { path },
                message: error.to_string(),
                row_index: None,
            });
        }
    }
    Ok(violations)
}
