//! Human-facing rendering for the CLI: outputs as a table, planned
//! changes as a per-module resource tree.

use serde_json::Value;
use tabled::{Table, Tabled};
use termtree::Tree;

#[derive(Tabled)]
struct OutputRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "VALUE")]
    value: String,
}

pub fn outputs_table(outputs: &serde_json::Map<String, Value>) -> String {
    let rows: Vec<OutputRow> = outputs
        .iter()
        .map(|(name, value)| OutputRow {
            name: name.clone(),
            value: render_value(value),
        })
        .collect();
    Table::new(rows).to_string()
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Turns `terraform show -json` plan output into a tree of pending
/// resource changes grouped by module. No-op entries are dropped.
pub fn plan_tree(plan: &Value) -> Tree<String> {
    let mut root = Tree::new("plan".to_string());
    let Some(changes) = plan.get("resource_changes").and_then(|c| c.as_array()) else {
        return root;
    };

    let mut modules: Vec<(String, Vec<String>)> = Vec::new();
    for change in changes {
        let address = change
            .get("address")
            .and_then(|a| a.as_str())
            .unwrap_or("<unknown>");
        let actions = change
            .get("change")
            .and_then(|c| c.get("actions"))
            .and_then(|a| a.as_array())
            .map(|a| {
                a.iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .unwrap_or_default();
        if actions.is_empty() || actions == "no-op" {
            continue;
        }

        let (module, leaf) = split_module(address);
        let label = format!("{} ({})", leaf, actions);
        match modules.iter_mut().find(|(name, _)| *name == module) {
            Some((_, leaves)) => leaves.push(label),
            None => modules.push((module, vec![label])),
        }
    }

    for (module, leaves) in modules {
        let mut node = Tree::new(module);
        for leaf in leaves {
            node.push(Tree::new(leaf));
        }
        root.push(node);
    }
    root
}

fn split_module(address: &str) -> (String, String) {
    if let Some(rest) = address.strip_prefix("module.") {
        if let Some((name, leaf)) = rest.split_once('.') {
            return (format!("module.{}", name), leaf.to_string());
        }
    }
    ("root".to_string(), address.to_string())
}
