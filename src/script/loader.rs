use serde_yaml::Value;

use super::ast::ScriptDocument;
use super::error::{LoadError, LoadResult};

/// Parse raw script text into a [`ScriptDocument`].
///
/// Loading is all-or-nothing: no partial document is ever returned. The
/// input must be a YAML mapping carrying a top-level `script` key with at
/// least one step.
pub fn load(raw: &str) -> LoadResult<ScriptDocument> {
    let value: Value = serde_yaml::from_str(raw)?;

    let mapping = match value {
        Value::Mapping(mapping) => mapping,
        _ => return Err(LoadError::NotAMapping),
    };
    if !mapping.contains_key(&Value::from("script")) {
        return Err(LoadError::MissingScriptKey);
    }

    let document: ScriptDocument = serde_yaml::from_value(Value::Mapping(mapping))?;
    if document.script.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(document)
}
