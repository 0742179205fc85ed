use std::collections::HashMap;

use serde_json::Value;

use super::error::TerraformError;
use super::exec::run_checked;
use super::options::TerraformOptions;

/// Reads one named output as raw JSON via `terraform output -json <name>`.
pub async fn output_json(
    opts: &TerraformOptions,
    name: &str,
) -> Result<Value, TerraformError> {
    let args = vec!["output".to_string(), "-json".to_string(), name.to_string()];
    match run_checked(opts, &args).await {
        Ok(out) => Ok(serde_json::from_str(out.stdout.trim())?),
        // terraform reports a missing output name on stderr and exits 1
        Err(TerraformError::CommandFailed { stderr, .. })
            if stderr.contains("not found") || stderr.contains("no outputs") =>
        {
            Err(TerraformError::OutputNotFound {
                name: name.to_string(),
            })
        }
        Err(e) => Err(e),
    }
}

/// Reads a scalar output as a string. Null (an absent optional resource)
/// comes back as the empty string, matching how tests assert "feature
/// disabled means output empty".
pub async fn output(opts: &TerraformOptions, name: &str) -> Result<String, TerraformError> {
    let value = output_json(opts, name).await?;
    scalar(&value).ok_or(TerraformError::UnexpectedOutputType {
        name: name.to_string(),
        expected: "scalar",
    })
}

/// Reads a list output as strings.
pub async fn output_list(
    opts: &TerraformOptions,
    name: &str,
) -> Result<Vec<String>, TerraformError> {
    let value = output_json(opts, name).await?;
    let Value::Array(items) = value else {
        return Err(TerraformError::UnexpectedOutputType {
            name: name.to_string(),
            expected: "list",
        });
    };
    items
        .iter()
        .map(|v| {
            scalar(v).ok_or(TerraformError::UnexpectedOutputType {
                name: name.to_string(),
                expected: "list of scalars",
            })
        })
        .collect()
}

/// Reads a map output as string pairs.
pub async fn output_map(
    opts: &TerraformOptions,
    name: &str,
) -> Result<HashMap<String, String>, TerraformError> {
    let value = output_json(opts, name).await?;
    let Value::Object(entries) = value else {
        return Err(TerraformError::UnexpectedOutputType {
            name: name.to_string(),
            expected: "map",
        });
    };
    entries
        .iter()
        .map(|(k, v)| {
            scalar(v)
                .map(|s| (k.clone(), s))
                .ok_or(TerraformError::UnexpectedOutputType {
                    name: name.to_string(),
                    expected: "map of scalars",
                })
        })
        .collect()
}

/// Reads every output at once. `terraform output -json` wraps each value
/// in `{ "value": ..., "type": ..., "sensitive": ... }`; this unwraps to
/// `name -> value`.
pub async fn output_all(
    opts: &TerraformOptions,
) -> Result<serde_json::Map<String, Value>, TerraformError> {
    let args = vec!["output".to_string(), "-json".to_string()];
    let out = run_checked(opts, &args).await?;
    let decoded: Value = serde_json::from_str(out.stdout.trim())?;
    let Value::Object(entries) = decoded else {
        return Err(TerraformError::UnexpectedOutputType {
            name: "*".to_string(),
            expected: "map",
        });
    };
    let mut unwrapped = serde_json::Map::new();
    for (name, entry) in entries {
        let value = entry.get("value").cloned().unwrap_or(Value::Null);
        unwrapped.insert(name, value);
    }
    Ok(unwrapped)
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
