use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Generation settings, loadable from `jsg.yaml` and overridable by the CLI.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Input JSON Schema files.
    pub inputs: Vec<String>,
    /// Output file; stdout when unset.
    pub output: Option<String>,
    /// Package the generated declarations are placed in.
    pub package: String,
    /// Root path prefix for `/`-prefixed reference resolution.
    pub root_path: String,
    /// Emit bson tags and the reserved ObjectId field on root records.
    pub object_id: bool,
    /// Suppress omitempty tags entirely. By default every non-required
    /// field gets one.
    pub omitempty: bool,
    /// Accept input documents without a `$schema` key.
    pub schema_key_optional: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: None,
            package: "main".to_string(),
            root_path: String::new(),
            object_id: false,
            omitempty: false,
            schema_key_optional: false,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "jsg.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<GenerateConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: GenerateConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# jsg configuration — https://github.com/jsg-rs/jsg
inputs: []            # JSON Schema files to generate from
# output: types.go    # output file (stdout when unset)
package: main         # package for the generated declarations
root_path: ""         # prefix for /-rooted $ref resolution
object_id: false      # bson tags + reserved ObjectId field on root records
omitempty: false      # suppress omitempty tags on non-required fields
schema_key_optional: false  # accept documents without a $schema key
"#
}
