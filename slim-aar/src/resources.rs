//! Resource folders injected into the AAR under `res/`.
//!
//! Each folder holds resource type directories (`values`, `values-de`,
//! `drawable`, ...). Files in `values*` directories are renamed with the
//! 1-based position of their folder so that several folders can each ship a
//! `strings.xml` without colliding in the archive.

use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A file on disk and the entry name it gets in the output archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    pub source: PathBuf,
    pub entry_name: String,
}

/// Name of `file_name` once stored under `res/<type_dir>/`.
///
/// Only `values*` directories are renamed: `strings.xml` becomes
/// `strings<index>.xml` and any other name gets `index` appended.
pub fn indexed_file_name(type_dir: &str, file_name: &str, index: usize) -> String {
    if !type_dir.starts_with("values") {
        return file_name.to_string();
    }
    match file_name.strip_suffix(".xml") {
        Some(stem) => format!("{stem}{index}.xml"),
        None => format!("{file_name}{index}"),
    }
}

/// Lists the files of one resource folder with their archive names.
///
/// Plain files directly inside `folder` are ignored. Directories below a
/// resource type directory fail with [`Error::NestedResourceDir`]. Entries are
/// sorted by name so the archive layout does not depend on the filesystem.
pub fn collect_resource_files(folder: &Path, index: usize) -> Result<Vec<ResourceFile>> {
    let mut files = Vec::new();

    for type_dir in sorted_entries(folder)? {
        if !type_dir.is_dir() {
            tracing::debug!("Ignoring {}: not a resource type directory", type_dir.display());
            continue;
        }
        let type_name = utf8_file_name(&type_dir)?.to_string();

        for source in sorted_entries(&type_dir)? {
            if source.is_dir() {
                return Err(Error::NestedResourceDir(source));
            }
            let file_name = indexed_file_name(&type_name, utf8_file_name(&source)?, index);
            files.push(ResourceFile {
                entry_name: format!("res/{type_name}/{file_name}"),
                source,
            });
        }
    }

    Ok(files)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();
    Ok(paths)
}

fn utf8_file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::InvalidFileName(path.to_path_buf()))
}
