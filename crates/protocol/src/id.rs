//! Identifier minting.
//!
//! Nodes and cards are identified by opaque strings of the form
//! `<prefix>_<uuid>`. The prefix only helps humans reading logs; nothing
//! parses it back.

use uuid::Uuid;

/// Prefix used for tree node identifiers.
pub const NODE_PREFIX: &str = "node";

/// Prefix used for kanban card identifiers.
pub const CARD_PREFIX: &str = "card";

/// Mints a fresh identifier with the given prefix.
///
/// # Examples
///
/// ```
/// use trellis_protocol::id::uid;
///
/// let id = uid("node");
/// assert!(id.starts_with("node_"));
/// assert_ne!(id, uid("node"));
/// ```
#[must_use]
pub fn uid(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uid_has_prefix_and_hex_body() {
        let id = uid(CARD_PREFIX);
        let body = id.strip_prefix("card_").expect("prefix");
        assert_eq!(body.len(), 32);
        assert!(body.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn uids_are_unique() {
        let ids: std::collections::HashSet<_> = (0..100).map(|_| uid(NODE_PREFIX)).collect();
        assert_eq!(ids.len(), 100);
    }
}
