use std::path::Path;

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::digest;
use crate::manifest::AssetRecord;
use crate::repo::RepoDescriptor;

/// This font is served from a fixed mirror, never from the repository. The
/// match is on filename suffix only, wherever the file sits in the tree.
const FONT_OVERRIDE_SUFFIX: &str = "NotoSansCJKsc-Medium.otf";
const FONT_MIRROR_URL: &str =
    "https://mirrors.ustc.edu.cn/CTAN/fonts/notocjksc/NotoSansCJKsc-Medium.otf";

/// Walk the resource tree and build one asset record per regular file.
///
/// Records come back sorted by normalized relative path so the emitted
/// manifest is stable across platforms and filesystems.
pub fn collect_assets(resource_root: &Path, repo: &RepoDescriptor) -> Result<Vec<AssetRecord>> {
    let base_url = repo.raw_base_url();
    let mut records = Vec::new();

    for entry in WalkDir::new(resource_root).follow_links(true) {
        let entry = entry.with_context(|| {
            format!("Failed to walk resource tree {}", resource_root.display())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let hash = digest::file_sha1(entry.path())?;
        let file_name = normalized_name(resource_root, entry.path());
        let url = resolve_url(&base_url, &file_name);

        records.push(AssetRecord {
            url,
            file_name,
            hash,
        });
    }

    records.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    tracing::debug!(
        "collected {} asset(s) under {}",
        records.len(),
        resource_root.display()
    );

    Ok(records)
}

/// Relative path of `path` as it appears in the manifest: rooted at the
/// resource root's own name and joined with forward slashes regardless of
/// platform separator.
fn normalized_name(resource_root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(resource_root).unwrap_or(path);

    let mut segments = Vec::new();
    if let Some(root_label) = resource_root.file_name() {
        segments.push(root_label.to_string_lossy().into_owned());
    }
    segments.extend(
        relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned()),
    );
    segments.join("/")
}

/// Download URL for one asset: the repository base URL plus the relative
/// path, except for the mirrored font.
fn resolve_url(base_url: &str, file_name: &str) -> String {
    if file_name.ends_with(FONT_OVERRIDE_SUFFIX) {
        FONT_MIRROR_URL.to_string()
    } else {
        format!("{}/{}", base_url, file_name)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    fn test_repo() -> RepoDescriptor {
        RepoDescriptor {
            owner: "acme".to_string(),
            name: "game".to_string(),
            branch: "main".to_string(),
        }
    }

    #[test]
    fn test_collects_nested_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("UIRes");
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("z.txt"), "z").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("sub").join("b.txt"), "b").unwrap();

        let records = collect_assets(&root, &test_repo()).unwrap();

        let names: Vec<&str> = records.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, vec!["UIRes/a.txt", "UIRes/sub/b.txt", "UIRes/z.txt"]);
    }

    #[test]
    fn test_record_fields_for_known_content() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("UIRes");
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("sub").join("a.txt"), "hi").unwrap();

        let records = collect_assets(&root, &test_repo()).unwrap();

        assert_eq!(
            records,
            vec![AssetRecord {
                url: "https://raw.githubusercontent.com/acme/game/main/UIRes/sub/a.txt"
                    .to_string(),
                file_name: "UIRes/sub/a.txt".to_string(),
                hash: "C22B5F9178342609428D6F51B2C5AF4C0BDE6A42".to_string(),
            }]
        );
    }

    #[test]
    fn test_font_override_applies_anywhere_in_tree() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("UIRes");
        fs::create_dir_all(root.join("fonts").join("cjk")).unwrap();
        fs::write(
            root.join("fonts").join("cjk").join("NotoSansCJKsc-Medium.otf"),
            "font bytes",
        )
        .unwrap();

        let records = collect_assets(&root, &test_repo()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].url,
            "https://mirrors.ustc.edu.cn/CTAN/fonts/notocjksc/NotoSansCJKsc-Medium.otf"
        );
        assert_eq!(
            records[0].file_name,
            "UIRes/fonts/cjk/NotoSansCJKsc-Medium.otf"
        );
    }

    #[test]
    fn test_directories_are_not_records() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("UIRes");
        fs::create_dir_all(root.join("only").join("dirs")).unwrap();

        let records = collect_assets(&root, &test_repo()).unwrap();

        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_root_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("UIRes");
        fs::create_dir(&root).unwrap();

        let records = collect_assets(&root, &test_repo()).unwrap();

        assert!(records.is_empty());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = collect_assets(&dir.path().join("UIRes"), &test_repo());

        assert!(result.is_err());
    }

    #[test]
    fn test_normalized_name_keeps_root_prefix_for_absolute_roots() {
        let root = PathBuf::from("/data/UIRes");
        let path = root.join("sub").join("a.txt");

        assert_eq!(normalized_name(&root, &path), "UIRes/sub/a.txt");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_included() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("UIRes");
        fs::create_dir(&root).unwrap();
        fs::write(dir.path().join("outside.txt"), "hi").unwrap();
        std::os::unix::fs::symlink(dir.path().join("outside.txt"), root.join("link.txt"))
            .unwrap();

        let records = collect_assets(&root, &test_repo()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file_name, "UIRes/link.txt");
        assert_eq!(records[0].hash, "C22B5F9178342609428D6F51B2C5AF4C0BDE6A42");
    }

    #[test]
    fn test_two_runs_produce_identical_records() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("UIRes");
        fs::create_dir(&root).unwrap();
        for name in ["c.bin", "a.bin", "b.bin"] {
            fs::write(root.join(name), name).unwrap();
        }

        let first = collect_assets(&root, &test_repo()).unwrap();
        let second = collect_assets(&root, &test_repo()).unwrap();

        assert_eq!(first, second);
    }
}
