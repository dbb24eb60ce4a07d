//! Locating PFB files below a base directory.

use std::path::{Path, PathBuf};

use glob::{Pattern, glob};
use log::warn;

/// Find every `<pattern>*.pfb` below `base_dir`, recursively.
///
/// `pattern` keeps its glob meaning, `base_dir` is matched literally. An
/// unusable pattern or a missing directory gives an empty list.
pub fn find_pfb_files(base_dir: &Path, pattern: &str) -> Vec<PathBuf> {
    let escaped_dir = Pattern::escape(&base_dir.to_string_lossy());
    let full = format!("{}/**/{pattern}*.pfb", escaped_dir.trim_end_matches('/'));

    match glob(&full) {
        Ok(paths) => paths.filter_map(Result::ok).filter(|p| p.is_file()).collect(),
        Err(e) => {
            warn!("Ignoring pattern '{pattern}': {e}");
            Vec::new()
        }
    }
}

/// Files for all patterns, in pattern order.
pub fn discover<S: AsRef<str>>(base_dir: &Path, patterns: &[S]) -> Vec<PathBuf> {
    patterns
        .iter()
        .flat_map(|p| find_pfb_files(base_dir, p.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir_all, write};

    use super::*;

    fn touch(path: &Path) {
        create_dir_all(path.parent().unwrap()).unwrap();
        write(path, b"").unwrap();
    }

    #[test]
    fn test_finds_nested_files_by_prefix() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("AvantGarde/agw_____.pfb"));
        touch(&dir.path().join("AvantGarde/agw_____.afm"));
        touch(&dir.path().join("AvantGarde/agd_____.pfb"));
        touch(&dir.path().join("Times/tir_____.pfb"));
        touch(&dir.path().join("ag_top.pfb"));

        let mut found = find_pfb_files(dir.path(), "ag");
        found.sort();
        assert_eq!(
            found,
            vec![
                dir.path().join("AvantGarde/agd_____.pfb"),
                dir.path().join("AvantGarde/agw_____.pfb"),
                dir.path().join("ag_top.pfb"),
            ]
        );
    }

    #[test]
    fn test_missing_directory_is_empty() {
        assert!(find_pfb_files(Path::new("/nonexistent/fonts"), "ag").is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("ag.pfb"));
        assert!(find_pfb_files(dir.path(), "[").is_empty());
    }

    #[test]
    fn test_base_dir_matched_literally() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("fonts [adobe]");
        touch(&base.join("tir_____.pfb"));
        assert_eq!(find_pfb_files(&base, "ti"), vec![base.join("tir_____.pfb")]);
    }

    #[test]
    fn test_discover_keeps_pattern_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a/tir_____.pfb"));
        touch(&dir.path().join("b/agw_____.pfb"));
        let found = discover(dir.path(), &["ti", "ag"]);
        assert_eq!(
            found,
            vec![dir.path().join("a/tir_____.pfb"), dir.path().join("b/agw_____.pfb")]
        );
    }
}
