//! Static icon registry.
//!
//! The stored `icon_name` is a string key into a closed set of icons the
//! frontend knows how to render. Lookup is total: unknown keys resolve to
//! [`DEFAULT_ICON_KEY`], never to a missing icon. The fallback happens at
//! normalization time so rendered projects always carry a known key.

/// Key substituted for any unknown or absent `icon_name`.
pub const DEFAULT_ICON_KEY: &str = "FaProjectDiagram";

/// A renderable icon: the stored key plus the glyph slug the UI maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon {
    pub key: &'static str,
    pub glyph: &'static str,
}

/// The closed set of icons the showcase can render.
///
/// Keys keep the upstream icon-library naming so existing stored records
/// resolve without a data migration.
pub const REGISTRY: &[Icon] = &[
    Icon { key: "FaProjectDiagram", glyph: "project-diagram" },
    Icon { key: "FaGithub", glyph: "github" },
    Icon { key: "FaGlobe", glyph: "globe" },
    Icon { key: "FaNpm", glyph: "npm" },
    Icon { key: "FaReact", glyph: "react" },
    Icon { key: "FaNodeJs", glyph: "node-js" },
    Icon { key: "FaDatabase", glyph: "database" },
    Icon { key: "FaMobileAlt", glyph: "mobile-alt" },
    Icon { key: "FaTerminal", glyph: "terminal" },
    Icon { key: "FaFileAlt", glyph: "file-alt" },
];

/// Look up an icon by its stored key, falling back to the default entry.
pub fn resolve(key: &str) -> &'static Icon {
    REGISTRY
        .iter()
        .find(|icon| icon.key == key)
        .unwrap_or_else(default_icon)
}

/// `true` if `key` is a member of the closed set.
pub fn is_known(key: &str) -> bool {
    REGISTRY.iter().any(|icon| icon.key == key)
}

/// The guaranteed default entry.
pub fn default_icon() -> &'static Icon {
    // The default key is the first registry entry.
    &REGISTRY[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_key_resolves_to_itself() {
        assert_eq!(resolve("FaGithub").key, "FaGithub");
        assert_eq!(resolve("FaGithub").glyph, "github");
    }

    #[test]
    fn unknown_key_falls_back_to_default() {
        let icon = resolve("FaDoesNotExist");
        assert_eq!(icon.key, DEFAULT_ICON_KEY);
    }

    #[test]
    fn empty_key_falls_back_to_default() {
        assert_eq!(resolve("").key, DEFAULT_ICON_KEY);
    }

    #[test]
    fn default_entry_is_in_the_registry() {
        assert!(is_known(DEFAULT_ICON_KEY));
        assert_eq!(default_icon().key, DEFAULT_ICON_KEY);
    }
}
