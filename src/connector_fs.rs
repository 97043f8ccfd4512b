//! Filesystem connector.
//!
//! Walks `[connectors.filesystem].root`, keeps files matching the include
//! globs and not matching the exclude globs, and turns each into a
//! [`SourceItem`] keyed by its path relative to the root.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use walkdir::WalkDir;

use crate::config::{Config, FilesystemConnectorConfig};
use crate::models::SourceItem;

pub fn scan_filesystem(config: &Config) -> Result<Vec<SourceItem>> {
    let fs_config = config
        .connectors
        .filesystem
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Filesystem connector not configured"))?;

    scan_root(fs_config)
}

fn scan_root(fs_config: &FilesystemConnectorConfig) -> Result<Vec<SourceItem>> {
    let root = &fs_config.root;
    if !root.exists() {
        bail!(
            "Filesystem connector root does not exist: {}",
            root.display()
        );
    }

    let include_set = build_globset(&fs_config.include_globs)?;

    let mut excludes = vec!["**/.git/**".to_string(), "**/node_modules/**".to_string()];
    excludes.extend(fs_config.exclude_globs.iter().cloned());
    let exclude_set = build_globset(&excludes)?;

    let mut items = Vec::new();

    for entry in WalkDir::new(root).follow_links(fs_config.follow_symlinks) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().replace('\\', "/");

        if exclude_set.is_match(&rel_str) || !include_set.is_match(&rel_str) {
            continue;
        }

        match file_to_source_item(path, &rel_str) {
            Ok(item) => items.push(item),
            Err(e) => tracing::warn!(path = %rel_str, error = %e, "skipping unreadable file"),
        }
    }

    items.sort_by(|a, b| a.file_path.cmp(&b.file_path));
    Ok(items)
}

fn file_to_source_item(path: &Path, relative_path: &str) -> Result<SourceItem> {
    let metadata = std::fs::metadata(path)?;
    let updated_at: DateTime<Utc> = metadata
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let title = markdown_title(&content).unwrap_or(file_name);

    Ok(SourceItem {
        title: Some(title),
        content,
        summary: None,
        file_path: relative_path.to_string(),
        updated_at,
    })
}

/// First level-one Markdown heading, if any.
fn markdown_title(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fs_config(root: &Path) -> FilesystemConnectorConfig {
        FilesystemConnectorConfig {
            root: root.to_path_buf(),
            include_globs: vec!["**/*.md".to_string(), "**/*.txt".to_string()],
            exclude_globs: vec!["drafts/**".to_string()],
            follow_symlinks: false,
        }
    }

    #[test]
    fn test_markdown_title() {
        assert_eq!(
            markdown_title("intro\n# Maize Guide \nbody").as_deref(),
            Some("Maize Guide")
        );
        assert_eq!(markdown_title("## Sub only"), None);
        assert_eq!(markdown_title(""), None);
    }

    #[test]
    fn test_scan_applies_globs_and_sorts() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("guides")).unwrap();
        fs::create_dir_all(root.join("drafts")).unwrap();
        fs::write(root.join("guides/maize.md"), "# Maize Guide\nkupanda mahindi").unwrap();
        fs::write(root.join("notes.txt"), "coffee notes").unwrap();
        fs::write(root.join("image.png"), [0u8, 1, 2]).unwrap();
        fs::write(root.join("drafts/wip.md"), "draft").unwrap();

        let items = scan_root(&fs_config(root)).unwrap();
        let paths: Vec<&str> = items.iter().map(|i| i.file_path.as_str()).collect();
        assert_eq!(paths, vec!["guides/maize.md", "notes.txt"]);
        assert_eq!(items[0].title.as_deref(), Some("Maize Guide"));
        assert_eq!(items[1].title.as_deref(), Some("notes.txt"));
    }

    #[test]
    fn test_missing_root_fails() {
        let tmp = TempDir::new().unwrap();
        let err = scan_root(&fs_config(&tmp.path().join("absent"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_unconfigured_connector_fails() {
        let config = crate::config::parse_config("[db]\npath = \"x.sqlite\"\n").unwrap();
        let err = scan_filesystem(&config).unwrap_err();
        assert!(err.to_string().contains("not configured"));
    }
}
