use std::path::PathBuf;

/// Original fixed layout the generator was run against; these stay the CLI
/// defaults so an argument-less invocation behaves the same.
pub const DEFAULT_MANIFEST: &str = "asset.json";
pub const DEFAULT_OUTPUT: &str = "assetCN.json";
pub const DEFAULT_RESOURCE_ROOT: &str = "UIRes";
pub const DEFAULT_GIT_DIR: &str = ".git";

/// Paths one generator run operates on
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Manifest read for the pass-through fields (Version and the rest)
    pub manifest_path: PathBuf,
    /// Manifest variant written with the rebuilt asset list
    pub output_path: PathBuf,
    /// Directory tree enumerated for asset files
    pub resource_root: PathBuf,
    /// Git directory the remote and branch are read from
    pub git_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            manifest_path: PathBuf::from(DEFAULT_MANIFEST),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            resource_root: PathBuf::from(DEFAULT_RESOURCE_ROOT),
            git_dir: PathBuf::from(DEFAULT_GIT_DIR),
        }
    }
}
