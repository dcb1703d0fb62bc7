//! Input discovery: recursive directory walks for headers and features.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// All files under `root` with the given extension, sorted so repeated
/// runs see the same order and emission stays deterministic.
pub fn walk(root: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut results = Vec::new();
    collect(root, extension, &mut results)?;
    results.sort();
    Ok(results)
}

fn collect(dir: &Path, extension: &str, results: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect(&path, extension, results)?;
        } else if path.extension().is_some_and(|ext| ext == extension) {
            results.push(path);
        }
    }
    Ok(())
}

/// Path of `file` relative to `root`, slash-separated: the shape an
/// `#include` directive wants.
pub fn relative_label(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
