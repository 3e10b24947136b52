mod fs;

pub use fs::FsVault;

use crate::error::Error;

/// Directory under the vault root used as the reversible deletion area.
pub const SOFT_TRASH_DIR: &str = ".trash";

/// Extension marking a file as a scannable text document.
pub const MARKUP_EXTENSION: &str = "md";

/// One item in the corpus. Paths are vault-relative with forward slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultFile {
    /// Stable identifier, immutable while the file is not moved.
    pub path: String,
    /// Basename, the matching key for reference lookups.
    pub name: String,
    /// Lower-cased suffix, used for filter decisions.
    pub extension: String,
    /// Containing folder path, cached at listing time ("/" at the root).
    /// Deletion may invalidate live folder lookups later.
    pub parent_path: String,
    /// Whether this file is itself a text document subject to scanning.
    pub is_markup: bool,
}

impl VaultFile {
    pub fn from_relative_path(path: &str) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        let parent_path = path
            .rsplit_once('/')
            .map(|(parent, _)| parent.to_string())
            .unwrap_or_else(|| "/".to_string());
        let is_markup = extension == MARKUP_EXTENSION;
        Self {
            path: path.to_string(),
            name,
            extension,
            parent_path,
            is_markup,
        }
    }
}

/// Storage collaborator surface the sweep core is built against.
///
/// The core never touches the filesystem directly; everything goes through
/// this seam so tests can run against an in-memory vault.
pub trait Vault {
    fn list_all_files(&self) -> Result<Vec<VaultFile>, Error>;

    fn read_text_content(&self, file: &VaultFile) -> Result<String, Error>;

    /// Reversible deletion into the vault-level trash area.
    fn move_to_soft_trash(&self, file: &VaultFile) -> Result<(), Error>;

    /// Hand the file to the operating system's trash. Recoverability is
    /// not guaranteed by this layer.
    fn move_to_system_trash(&self, file: &VaultFile) -> Result<(), Error>;

    fn permanently_delete(&self, file: &VaultFile) -> Result<(), Error>;

    fn exists_at_path(&self, path: &str) -> bool;

    fn move_file(&self, from: &str, to: &str) -> Result<(), Error>;

    /// Expected soft-trash location for a file, keyed by basename.
    fn soft_trash_path(&self, name: &str) -> String {
        format!("{}/{}", SOFT_TRASH_DIR, name)
    }
}

impl<V: Vault + ?Sized> Vault for &V {
    fn list_all_files(&self) -> Result<Vec<VaultFile>, Error> {
        (**self).list_all_files()
    }

    fn read_text_content(&self, file: &VaultFile) -> Result<String, Error> {
        (**self).read_text_content(file)
    }

    fn move_to_soft_trash(&self, file: &VaultFile) -> Result<(), Error> {
        (**self).move_to_soft_trash(file)
    }

    fn move_to_system_trash(&self, file: &VaultFile) -> Result<(), Error> {
        (**self).move_to_system_trash(file)
    }

    fn permanently_delete(&self, file: &VaultFile) -> Result<(), Error> {
        (**self).permanently_delete(file)
    }

    fn exists_at_path(&self, path: &str) -> bool {
        (**self).exists_at_path(path)
    }

    fn move_file(&self, from: &str, to: &str) -> Result<(), Error> {
        (**self).move_file(from, to)
    }

    fn soft_trash_path(&self, name: &str) -> String {
        (**self).soft_trash_path(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_file_fields() {
        let file = VaultFile::from_relative_path("Media/Photos/Trip.PNG");
        assert_eq!(file.name, "Trip.PNG");
        assert_eq!(file.extension, "png");
        assert_eq!(file.parent_path, "Media/Photos");
        assert!(!file.is_markup);
    }

    #[test]
    fn test_vault_file_at_root() {
        let file = VaultFile::from_relative_path("notes.md");
        assert_eq!(file.parent_path, "/");
        assert!(file.is_markup);
    }

    #[test]
    fn test_vault_file_without_extension() {
        let file = VaultFile::from_relative_path("Media/LICENSE");
        assert_eq!(file.extension, "");
        assert!(!file.is_markup);
    }
}
