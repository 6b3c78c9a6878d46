//! Fragment evaluation
//!
//! The boundary between the tree builder and whatever produces a fragment's
//! value. Hosts register an evaluator (any closure with the right shape
//! works); the crate ships [`FormatEvaluator`] for declarative TOML and JSON
//! fragments with property interpolation.

use crate::props::PropertySnapshot;
use crate::tree::EntityNode;
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::Path;

/// Produces a fragment's value.
///
/// Given a fragment's location and the build's property snapshot, returns
/// either a mapping or an opaque leaf. Evaluation may do arbitrary work
/// (I/O, computation) and is treated as a black box; a failure is fatal to
/// the enclosing build.
pub trait FragmentEvaluator {
    fn evaluate(&self, location: &Path, properties: &PropertySnapshot) -> Result<EntityNode>;
}

impl<F> FragmentEvaluator for F
where
    F: Fn(&Path, &PropertySnapshot) -> Result<EntityNode>,
{
    fn evaluate(&self, location: &Path, properties: &PropertySnapshot) -> Result<EntityNode> {
        self(location, properties)
    }
}

/// Default evaluator: routes on file extension (`toml`, `json`) and
/// substitutes `${key}` placeholders from the property snapshot into string
/// values.
#[derive(Debug, Clone, Default)]
pub struct FormatEvaluator;

impl FragmentEvaluator for FormatEvaluator {
    fn evaluate(&self, location: &Path, properties: &PropertySnapshot) -> Result<EntityNode> {
        let text = std::fs::read_to_string(location)
            .with_context(|| format!("failed to read fragment {}", location.display()))?;

        let extension = location.extension().and_then(|e| e.to_str()).unwrap_or("");
        let parsed: Value = match extension {
            "toml" => {
                let value: toml::Value = toml::from_str(&text)
                    .with_context(|| format!("invalid TOML in {}", location.display()))?;
                serde_json::to_value(value)
                    .with_context(|| format!("unrepresentable TOML in {}", location.display()))?
            }
            "json" => serde_json::from_str(&text)
                .with_context(|| format!("invalid JSON in {}", location.display()))?,
            other => bail!("no evaluator registered for extension '{}'", other),
        };

        Ok(EntityNode::from_json(interpolate(parsed, properties)))
    }
}

/// Substitute `${key}` placeholders throughout a parsed value.
///
/// A string that is exactly one placeholder takes the property's typed
/// value; otherwise matches are spliced in textually. Unknown keys are left
/// untouched so host-specific markers survive evaluation.
fn interpolate(value: Value, properties: &PropertySnapshot) -> Value {
    match value {
        Value::String(s) => interpolate_string(s, properties),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| interpolate(v, properties))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, interpolate(v, properties)))
                .collect(),
        ),
        other => other,
    }
}

fn interpolate_string(s: String, properties: &PropertySnapshot) -> Value {
    // A whole-string placeholder keeps the property's type.
    if let Some(key) = s.strip_prefix("${").and_then(|rest| rest.strip_suffix('}')) {
        if !key.contains("${") && !key.contains('}') {
            if let Some(value) = properties.get(key) {
                return value.clone();
            }
        }
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s.as_str();
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let key = &after[..end];
                match properties.get(key) {
                    Some(Value::String(text)) => out.push_str(text),
                    Some(other) => out.push_str(&other.to_string()),
                    None => {
                        out.push_str("${");
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str("${");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Value::String(out)
}
