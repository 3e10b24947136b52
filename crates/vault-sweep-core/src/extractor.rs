use lazy_static::lazy_static;
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

use crate::progress::ProgressReporter;
use crate::vault::{Vault, VaultFile};

/// Normalized (lower-cased, basename-only) filenames referenced somewhere
/// in the corpus. Rebuilt fresh on every scan.
pub type ReferenceSet = HashSet<String>;

lazy_static! {
    // [[path]] or ![[path]] — target runs up to '|', '#' or the closing bracket
    static ref WIKI_LINK: Regex = Regex::new(r"!?\[\[([^\]\|#]+)").unwrap();
    // [label](path) or ![label](path) — target runs up to '#', whitespace or ')'
    static ref INLINE_LINK: Regex = Regex::new(r"!?\[[^\]]*\]\(([^)#\s]+)").unwrap();
}

/// Scan every markup document in the listing and collect the referenced
/// basenames. A document that cannot be read contributes nothing and the
/// scan continues; matching is best-effort by policy.
pub fn extract_references(
    vault: &dyn Vault,
    files: &[VaultFile],
    reporter: &dyn ProgressReporter,
) -> ReferenceSet {
    let mut references = ReferenceSet::new();
    let mut documents_scanned = 0usize;

    for file in files.iter().filter(|f| f.is_markup) {
        let content = match vault.read_text_content(file) {
            Ok(content) => content,
            Err(err) => {
                debug!("Skipping unreadable document '{}': {}", file.path, err);
                continue;
            }
        };
        collect_from_document(&content, &mut references);
        documents_scanned += 1;
        reporter.on_document_scanned(documents_scanned, &file.path);
    }

    references
}

/// Apply both link patterns over one document's text.
pub fn collect_from_document(content: &str, references: &mut ReferenceSet) {
    for capture in WIKI_LINK.captures_iter(content) {
        if let Some(name) = normalize_wiki_target(&capture[1]) {
            references.insert(name);
        }
    }
    for capture in INLINE_LINK.captures_iter(content) {
        if let Some(name) = normalize_inline_target(&capture[1]) {
            references.insert(name);
        }
    }
}

fn normalize_wiki_target(raw: &str) -> Option<String> {
    let mut target = raw.trim();
    // An escaped pipe in the source ("\|") leaves a trailing backslash on
    // the capture; strip it.
    if let Some(stripped) = target.strip_suffix('\\') {
        target = stripped;
    }
    basename_key(target)
}

fn normalize_inline_target(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let decoded = match percent_decode_str(trimmed).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        // Undecodable targets fall back to the raw trimmed string.
        Err(_) => trimmed.to_string(),
    };
    basename_key(&decoded)
}

fn basename_key(target: &str) -> Option<String> {
    let name = target.rsplit(['/', '\\']).next().unwrap_or(target);
    if name.is_empty() {
        None
    } else {
        Some(name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn references_in(content: &str) -> ReferenceSet {
        let mut references = ReferenceSet::new();
        collect_from_document(content, &mut references);
        references
    }

    #[test]
    fn test_wiki_link_forms() {
        let refs = references_in("see [[Photo.png]] and ![[Clip.mp4]]");
        assert!(refs.contains("photo.png"));
        assert!(refs.contains("clip.mp4"));
    }

    #[test]
    fn test_inline_link_forms() {
        let refs = references_in("[a](Doc.pdf) and ![b](media/Img.JPG)");
        assert!(refs.contains("doc.pdf"));
        assert!(refs.contains("img.jpg"));
    }

    #[test]
    fn test_wiki_target_stops_at_pipe_and_hash() {
        let refs = references_in("[[Photo.png|alias]] [[Sheet.pdf#page=2]]");
        assert!(refs.contains("photo.png"));
        assert!(refs.contains("sheet.pdf"));
        assert_eq!(refs.len(), 2);
    }

    #[test]
    fn test_escaped_pipe_strips_trailing_backslash() {
        let refs = references_in(r"[[My File.png\|alias]]");
        assert!(refs.contains("my file.png"));
    }

    #[test]
    fn test_inline_target_stops_at_hash_and_whitespace() {
        let refs = references_in("[x](Notes.pdf#heading) [y](Spaced.png \"title\")");
        assert!(refs.contains("notes.pdf"));
        assert!(refs.contains("spaced.png"));
    }

    #[test]
    fn test_percent_decoding_with_fallback() {
        let refs = references_in("[x](My%20File.png) [y](Bad%FF%FE.png)");
        assert!(refs.contains("my file.png"));
        // Invalid UTF-8 after decoding falls back to the raw string
        assert!(refs.contains("bad%ff%fe.png"));
    }

    #[test]
    fn test_basename_extraction_both_separators() {
        let refs = references_in(r"[[folder/sub/Img.png]] [x](dir\other\Pic.gif)");
        assert!(refs.contains("img.png"));
        assert!(refs.contains("pic.gif"));
    }

    #[test]
    fn test_empty_targets_skipped() {
        let refs = references_in("[x](a/) [[  ]]");
        assert!(refs.is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let refs = references_in("[[a.png]] [[A.PNG]] ![[a.png]]");
        assert_eq!(refs.len(), 1);
    }
}
