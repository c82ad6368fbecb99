use comfy_table::{presets, Table};
use serde_json::{Map, Value};

pub fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(headers);
    table
}

/// One row per `env` entry, in document order
pub fn env_table(env: &Map<String, Value>) -> Table {
    let mut table = create_table(vec!["Variable", "Value"]);
    for (key, value) in env {
        let value = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        table.add_row(vec![key.clone(), value]);
    }
    table
}
