use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

/// One downloadable file entry in the manifest's asset list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    #[serde(rename = "Url")]
    pub url: String,
    /// Forward-slash-normalized path relative to the working directory
    #[serde(rename = "FileName")]
    pub file_name: String,
    /// Uppercase hex SHA-1 of the file contents
    #[serde(rename = "Hash")]
    pub hash: String,
}

/// The manifest JSON document, held as a loose object so every top-level
/// field other than `Assets` passes through a rewrite untouched.
#[derive(Debug, Clone)]
pub struct ManifestDocument {
    root: Map<String, Value>,
}

impl ManifestDocument {
    /// Load the authoritative manifest. It must be a JSON object carrying a
    /// `Version` field; the field's value is opaque.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse manifest {}", path.display()))?;

        let root = match value {
            Value::Object(map) => map,
            _ => anyhow::bail!("Manifest {} is not a JSON object", path.display()),
        };
        if !root.contains_key("Version") {
            anyhow::bail!("Manifest {} has no Version field", path.display());
        }

        Ok(ManifestDocument { root })
    }

    /// Replace the asset list wholesale. Never merges with the previous
    /// list.
    pub fn replace_assets(&mut self, assets: Vec<AssetRecord>) -> Result<()> {
        let assets = serde_json::to_value(assets).context("Failed to serialize asset records")?;
        self.root.insert("Assets".to_string(), assets);
        Ok(())
    }

    /// The pass-through `Version` field, rendered for the run summary: a
    /// JSON string prints bare, any other value in its JSON form.
    pub fn version(&self) -> String {
        match self.root.get("Version") {
            Some(Value::String(version)) => version.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// Write the manifest variant: 4-space indentation, non-ASCII characters
    /// left literal, trailing newline.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.root
            .serialize(&mut serializer)
            .context("Failed to serialize manifest")?;
        buf.push(b'\n');

        fs::write(path, buf)
            .with_context(|| format!("Failed to write manifest {}", path.display()))?;
        Ok(())
    }
}
