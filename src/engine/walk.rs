use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};

use crate::config::Config;

pub(crate) fn build_glob_set(patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    patterns
        .iter()
        .filter_map(|p| GlobBuilder::new(p).build().ok())
        .for_each(|glob| {
            builder.add(glob);
        });
    builder.build().unwrap_or_default()
}

/// Matches on the file name or on the path relative to `root`.
pub(crate) fn matches_glob(path: &Path, root: &Path, set: &GlobSet) -> bool {
    path.file_name().is_some_and(|name| set.is_match(name))
        || path.strip_prefix(root).is_ok_and(|rel| set.is_match(rel))
}

/// Matches on the file name or on the path as given, without a leading `./`.
pub(crate) fn matches_path(path: &Path, set: &GlobSet) -> bool {
    let path = path.strip_prefix(".").unwrap_or(path);
    path.file_name().is_some_and(|name| set.is_match(name)) || set.is_match(path)
}

/// Files to lint under `paths`. Directories are walked for files matching
/// `yaml_files`; files named explicitly are taken as they are. `ignore`
/// applies to both.
pub fn discover(paths: &[PathBuf], config: &Config) -> Vec<PathBuf> {
    let ignore = build_glob_set(&config.ignore);
    let yaml = build_glob_set(&config.yaml_files);
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk_dir(path, path, &ignore, &yaml, &mut files);
        } else if !matches_path(path, &ignore) {
            files.push(path.clone());
        }
    }
    files.sort();
    files.dedup();
    files
}

fn walk_dir(dir: &Path, root: &Path, ignore: &GlobSet, yaml: &GlobSet, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        tracing::warn!("cannot read directory {}", dir.display());
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if matches_glob(&path, root, ignore) {
            continue;
        }

        if path.is_dir() {
            walk_dir(&path, root, ignore, yaml, files);
        } else if matches_glob(&path, root, yaml) {
            files.push(path);
        }
    }
}
