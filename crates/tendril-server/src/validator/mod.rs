//! Per-method argument validation.
//!
//! Rules are declarative and loaded once: a required/optional flag, a
//! primitive type and length bounds per field, keyed by method name.
//! Unknown fields are stripped silently; methods without a registered rule
//! set pass their arguments through unchanged. A validation failure never
//! reaches the circuit breaker or the network.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::{Map, Value};

use tendril_core::{TendrilError, TendrilResult};

/// Primitive type a field must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Bool,
}

/// Constraint for one field of one method
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
    pub field_type: FieldType,
    /// Minimum length in characters (strings only)
    pub min_len: usize,
    /// Maximum length in characters (strings only)
    pub max_len: usize,
}

impl FieldRule {
    const fn string(name: &'static str, required: bool, min_len: usize, max_len: usize) -> Self {
        Self {
            name,
            required,
            field_type: FieldType::String,
            min_len,
            max_len,
        }
    }

    const fn boolean(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            field_type: FieldType::Bool,
            min_len: 0,
            max_len: 0,
        }
    }
}

/// Static rule tables, keyed by method name
static RULES: Lazy<HashMap<&'static str, Vec<FieldRule>>> = Lazy::new(|| {
    let component_name = || FieldRule::string("componentName", true, 1, 100);
    let mut rules = HashMap::new();
    rules.insert("get_component", vec![component_name()]);
    rules.insert("get_component_demo", vec![component_name()]);
    rules.insert("get_component_metadata", vec![component_name()]);
    rules.insert(
        "get_block",
        vec![
            FieldRule::string("blockName", true, 1, 200),
            FieldRule::boolean("includeComponents"),
        ],
    );
    rules.insert(
        "list_blocks",
        vec![FieldRule::string("category", false, 1, 100)],
    );
    rules.insert(
        "get_directory_structure",
        vec![
            FieldRule::string("owner", false, 1, 200),
            FieldRule::string("repo", false, 1, 200),
            FieldRule::string("path", false, 1, 500),
            FieldRule::string("branch", false, 1, 200),
        ],
    );
    rules.insert("configure", vec![FieldRule::string("token", false, 1, 500)]);
    rules
});

/// Check raw arguments against the method's rules, returning the validated
/// argument map with unknown fields removed.
pub fn validate(method: &str, args: Value) -> TendrilResult<Map<String, Value>> {
    let args = match args {
        Value::Null => Map::new(),
        Value::Object(map) => map,
        _ => {
            return Err(TendrilError::ValidationFailed {
                method: method.to_string(),
                violations: vec!["arguments: must be an object".to_string()],
            })
        }
    };

    let Some(rules) = RULES.get(method) else {
        return Ok(args);
    };

    let mut validated = Map::new();
    let mut violations = Vec::new();
    for rule in rules {
        match args.get(rule.name) {
            None | Some(Value::Null) => {
                if rule.required {
                    violations.push(format!("{}: required field is missing", rule.name));
                }
            }
            Some(value) => match check(rule, value) {
                Ok(()) => {
                    validated.insert(rule.name.to_string(), value.clone());
                }
                Err(violation) => violations.push(violation),
            },
        }
    }

    if violations.is_empty() {
        Ok(validated)
    } else {
        Err(TendrilError::ValidationFailed {
            method: method.to_string(),
            violations,
        })
    }
}

/// Check one field value against its rule
fn check(rule: &FieldRule, value: &Value) -> Result<(), String> {
    match rule.field_type {
        FieldType::String => {
            let Some(text) = value.as_str() else {
                return Err(format!("{}: must be a string", rule.name));
            };
            let length = text.chars().count();
            if length < rule.min_len {
                Err(format!(
                    "{}: must be at least {} character(s)",
                    rule.name, rule.min_len
                ))
            } else if length > rule.max_len {
                Err(format!(
                    "{}: must be at most {} characters",
                    rule.name, rule.max_len
                ))
            } else {
                Ok(())
            }
        }
        FieldType::Bool => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err(format!("{}: must be a boolean", rule.name))
            }
        }
    }
}

#[cfg(test)]
mod tests;
