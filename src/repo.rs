use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

const RAW_CONTENT_HOST: &str = "https://raw.githubusercontent.com";

/// Branch used when HEAD holds a bare commit hash instead of a symbolic ref
const FALLBACK_BRANCH: &str = "main";

/// Which hosted repository and revision assets are served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoDescriptor {
    pub owner: String,
    pub name: String,
    pub branch: String,
}

impl RepoDescriptor {
    /// Resolve the descriptor from a local git directory by scanning
    /// `config` for the first github.com remote and `HEAD` for the current
    /// branch.
    pub fn from_git_dir(git_dir: &Path) -> Result<Self> {
        let config_path = git_dir.join("config");
        let git_config = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let (owner, name) = parse_remote(&git_config)
            .with_context(|| format!("Failed to resolve remote from {}", config_path.display()))?;

        let head_path = git_dir.join("HEAD");
        let head = fs::read_to_string(&head_path)
            .with_context(|| format!("Failed to read {}", head_path.display()))?;
        let branch = parse_branch(&head);

        Ok(RepoDescriptor {
            owner,
            name,
            branch,
        })
    }

    /// Base URL serving raw file content for this repository and branch
    pub fn raw_base_url(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            RAW_CONTENT_HOST, self.owner, self.name, self.branch
        )
    }
}

/// Scan git config text for a remote URL naming github.com and split it into
/// owner and repository name. First matching line wins.
fn parse_remote(git_config: &str) -> Result<(String, String)> {
    for line in git_config.lines() {
        if !(line.contains("url = ") && line.contains("github.com")) {
            continue;
        }

        // The remote is either https://github.com/owner/repo.git or
        // git@github.com:owner/repo.git; only the split marker differs.
        let marker = if line.contains("https://") {
            "github.com/"
        } else {
            "github.com:"
        };
        let rest = match line.split(marker).nth(1) {
            Some(rest) => rest.trim(),
            None => continue,
        };
        let rest = rest.strip_suffix(".git").unwrap_or(rest);

        let segments: Vec<&str> = rest.split('/').collect();
        match segments.as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => {
                return Ok((owner.to_string(), name.to_string()));
            }
            _ => anyhow::bail!("Malformed github.com remote URL: {}", line.trim()),
        }
    }

    anyhow::bail!("No recognized github.com remote found in git config")
}

/// Branch name from HEAD contents. A symbolic ref such as
/// `ref: refs/heads/main` yields its final segment; anything without a
/// separator (a bare commit hash) falls back to the default branch.
fn parse_branch(head: &str) -> String {
    match head.trim().rsplit_once('/') {
        Some((_, segment)) => segment.to_string(),
        None => FALLBACK_BRANCH.to_string(),
    }
}
