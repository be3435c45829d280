//! Path addressing for tree nodes.
//!
//! A [`Path`] is the sequence of zero-based sibling indices leading from the
//! forest root to a node. Paths are positional, not identities: any edit to
//! an ancestor or an earlier sibling shifts them, so they must be recomputed
//! after every transform.
//!
//! Path keys flatten a path into a string (`"2.0.5"`) that is used as a
//! drag-and-drop identifier and as the key of the expand/collapse map.

use crate::error::{ProtocolError, Result};

/// Ordered sibling indices from the forest root to a node.
pub type Path = Vec<usize>;

/// Separator between segments of a path key.
pub const PATH_DELIMITER: char = '.';

/// Encodes a path as a path key.
///
/// The empty path (the forest root) encodes to the empty string.
///
/// # Examples
///
/// ```
/// use trellis_protocol::path::path_to_key;
///
/// assert_eq!(path_to_key(&[]), "");
/// assert_eq!(path_to_key(&[2, 0, 5]), "2.0.5");
/// ```
#[must_use]
pub fn path_to_key(path: &[usize]) -> String {
    let mut key = String::new();
    for (i, idx) in path.iter().enumerate() {
        if i > 0 {
            key.push(PATH_DELIMITER);
        }
        key.push_str(&idx.to_string());
    }
    key
}

/// Decodes a path key back into a path.
///
/// # Errors
///
/// Returns [`ProtocolError::InvalidPathKey`] if any segment is not a
/// non-negative integer.
///
/// # Examples
///
/// ```
/// use trellis_protocol::path::key_to_path;
///
/// assert_eq!(key_to_path("").unwrap(), Vec::<usize>::new());
/// assert_eq!(key_to_path("2.0.5").unwrap(), vec![2, 0, 5]);
/// assert!(key_to_path("1.a").is_err());
/// ```
pub fn key_to_path(key: &str) -> Result<Path> {
    if key.is_empty() {
        return Ok(Path::new());
    }
    key.split(PATH_DELIMITER)
        .map(|segment| {
            segment
                .parse::<usize>()
                .map_err(|_| ProtocolError::InvalidPathKey {
                    key: key.to_string(),
                    segment: segment.to_string(),
                })
        })
        .collect()
}

/// Returns `true` if `candidate` lies strictly inside the subtree rooted at
/// `ancestor`.
///
/// # Examples
///
/// ```
/// use trellis_protocol::path::is_descendant_path;
///
/// assert!(is_descendant_path(&[0], &[0, 1]));
/// assert!(!is_descendant_path(&[0, 1], &[0]));
/// assert!(!is_descendant_path(&[0], &[1]));
/// assert!(!is_descendant_path(&[0], &[0]));
/// ```
#[must_use]
pub fn is_descendant_path(ancestor: &[usize], candidate: &[usize]) -> bool {
    candidate.len() > ancestor.len() && candidate.starts_with(ancestor)
}

/// Returns the path of the parent of `path`.
///
/// Root-level nodes (and the empty path) have the empty path as parent.
#[must_use]
pub fn parent_path(path: &[usize]) -> &[usize] {
    match path.split_last() {
        Some((_, parent)) => parent,
        None => &[],
    }
}

/// Translates a path taken before the node at `removed` was spliced out into
/// the equivalent path after the removal.
///
/// Only paths that run through a later sibling of the removed node change:
/// the index at the removed node's depth shifts down by one. Paths inside the
/// removed subtree have no counterpart and are returned as-is; callers must
/// rule them out with [`is_descendant_path`] first.
///
/// # Examples
///
/// ```
/// use trellis_protocol::path::adjust_for_removal;
///
/// // Removing root 0 shifts everything under root 1 to root 0.
/// assert_eq!(adjust_for_removal(&[0], &[1, 2]), vec![0, 2]);
/// // Earlier siblings are untouched.
/// assert_eq!(adjust_for_removal(&[1, 3], &[1, 0, 4]), vec![1, 0, 4]);
/// ```
#[must_use]
pub fn adjust_for_removal(removed: &[usize], path: &[usize]) -> Path {
    let mut adjusted = path.to_vec();
    let Some((&removed_idx, removed_parent)) = removed.split_last() else {
        return adjusted;
    };
    let depth = removed_parent.len();
    if path.len() > depth && path.starts_with(removed_parent) && path[depth] > removed_idx {
        adjusted[depth] -= 1;
    }
    adjusted
}

/// Translates a path taken before a node was inserted at `inserted` into the
/// equivalent path after the insertion.
///
/// The inverse of [`adjust_for_removal`]: paths running through the inserted
/// position or a later sibling shift up by one at that depth.
///
/// # Examples
///
/// ```
/// use trellis_protocol::path::adjust_for_insertion;
///
/// assert_eq!(adjust_for_insertion(&[0], &[0, 2]), vec![1, 2]);
/// assert_eq!(adjust_for_insertion(&[1, 1], &[1, 0]), vec![1, 0]);
/// ```
#[must_use]
pub fn adjust_for_insertion(inserted: &[usize], path: &[usize]) -> Path {
    let mut adjusted = path.to_vec();
    let Some((&inserted_idx, inserted_parent)) = inserted.split_last() else {
        return adjusted;
    };
    let depth = inserted_parent.len();
    if path.len() > depth && path.starts_with(inserted_parent) && path[depth] >= inserted_idx {
        adjusted[depth] += 1;
    }
    adjusted
}
