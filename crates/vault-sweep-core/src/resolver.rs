use std::collections::HashSet;

use crate::config::{ExtensionMode, SweepConfig};
use crate::extractor::ReferenceSet;
use crate::vault::VaultFile;

/// Compute the orphan candidate list: non-markup, extension-matching,
/// non-excluded files whose lower-cased basename is absent from the
/// reference set. Output order is listing order.
pub fn resolve_orphans(
    files: &[VaultFile],
    references: &ReferenceSet,
    config: &SweepConfig,
) -> Vec<VaultFile> {
    let extensions = config.extension_set();
    let excluded_folders = config.excluded_folder_list();

    files
        .iter()
        .filter(|file| is_orphan(file, references, config, &extensions, &excluded_folders))
        .cloned()
        .collect()
}

fn is_orphan(
    file: &VaultFile,
    references: &ReferenceSet,
    config: &SweepConfig,
    extensions: &HashSet<String>,
    excluded_folders: &[String],
) -> bool {
    // Markup documents are scan sources, never orphan candidates.
    if file.is_markup {
        return false;
    }

    match config.extension_mode {
        ExtensionMode::All => {}
        ExtensionMode::Include => {
            if !extensions.contains(&file.extension) {
                return false;
            }
        }
        ExtensionMode::Exclude => {
            if extensions.contains(&file.extension) {
                return false;
            }
        }
    }

    let excluded = excluded_folders.iter().any(|folder| {
        if config.exclude_subfolders {
            file.path.starts_with(folder.as_str())
        } else {
            file.parent_path == *folder
        }
    });
    if excluded {
        return false;
    }

    !references.contains(&file.name.to_lowercase())
}
