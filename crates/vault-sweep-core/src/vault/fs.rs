use glob::Pattern;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, warn};
use walkdir::{DirEntry, WalkDir};

use super::{Vault, VaultFile, SOFT_TRASH_DIR};
use crate::error::Error;

/// Filesystem-backed vault rooted at a directory.
///
/// Hidden entries (leading dot) are never part of the corpus, which also
/// keeps the `.trash` area out of every listing.
pub struct FsVault {
    root: PathBuf,
    ignore_patterns: Vec<Pattern>,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore_patterns: Vec::new(),
        }
    }

    pub fn with_ignore_patterns(mut self, globs: &[String]) -> Self {
        self.ignore_patterns = globs
            .iter()
            .filter_map(|glob| match Pattern::new(glob) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    error!("Invalid glob pattern '{}': {}", glob, e);
                    None
                }
            })
            .collect();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn absolute(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    fn relative(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let mut parts: Vec<String> = Vec::new();
        for component in relative.components() {
            parts.push(component.as_os_str().to_string_lossy().into_owned());
        }
        parts.join("/")
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

impl Vault for FsVault {
    fn list_all_files(&self) -> Result<Vec<VaultFile>, Error> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let denied = err
                        .io_error()
                        .map(|io_err| io_err.kind() == io::ErrorKind::PermissionDenied)
                        .unwrap_or(false);
                    if denied {
                        warn!("Access denied during vault enumeration: {}", err);
                        continue;
                    }
                    return Err(Error::ScanAborted(err.to_string()));
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = self.relative(entry.path());
            if self
                .ignore_patterns
                .iter()
                .any(|pattern| pattern.matches(&relative))
            {
                continue;
            }

            files.push(VaultFile::from_relative_path(&relative));
        }

        Ok(files)
    }

    fn read_text_content(&self, file: &VaultFile) -> Result<String, Error> {
        fs::read_to_string(self.absolute(&file.path)).map_err(|source| Error::Read {
            path: file.path.clone(),
            source,
        })
    }

    fn move_to_soft_trash(&self, file: &VaultFile) -> Result<(), Error> {
        let trash_dir = self.root.join(SOFT_TRASH_DIR);
        fs::create_dir_all(&trash_dir).map_err(|e| Error::Delete {
            path: file.path.clone(),
            reason: e.to_string(),
        })?;
        fs::rename(self.absolute(&file.path), trash_dir.join(&file.name)).map_err(|e| {
            Error::Delete {
                path: file.path.clone(),
                reason: e.to_string(),
            }
        })
    }

    fn move_to_system_trash(&self, file: &VaultFile) -> Result<(), Error> {
        trash::delete(self.absolute(&file.path)).map_err(|e| Error::Delete {
            path: file.path.clone(),
            reason: e.to_string(),
        })
    }

    fn permanently_delete(&self, file: &VaultFile) -> Result<(), Error> {
        fs::remove_file(self.absolute(&file.path)).map_err(|e| Error::Delete {
            path: file.path.clone(),
            reason: e.to_string(),
        })
    }

    fn exists_at_path(&self, path: &str) -> bool {
        self.absolute(path).exists()
    }

    fn move_file(&self, from: &str, to: &str) -> Result<(), Error> {
        let destination = self.absolute(to);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::Move {
                from: from.to_string(),
                to: to.to_string(),
                reason: e.to_string(),
            })?;
        }
        fs::rename(self.absolute(from), destination).map_err(|e| Error::Move {
            from: from.to_string(),
            to: to.to_string(),
            reason: e.to_string(),
        })
    }
}
