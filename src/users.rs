use std::collections::BTreeMap;

use crate::error::{Result, VtError};

/// Shortcut used for hypervisor-level commands (`ls`, `go`, `view`).
pub const DEFAULT_SHORTCUT: &str = "r";

const BUILTIN: [(&str, &str); 3] = [("r", "root"), ("u", "ubuntu"), ("m", "mulisu")];

/// One-letter shortcuts for remote login names.
#[derive(Debug, Clone)]
pub struct UserTable {
    users: BTreeMap<String, String>,
}

impl Default for UserTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl UserTable {
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN)
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        UserTable {
            users: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn resolve(&self, shortcut: &str) -> Result<&str> {
        self.users
            .get(shortcut)
            .map(String::as_str)
            .ok_or_else(|| VtError::UnknownUserShortcut(shortcut.to_string()))
    }

    /// The login used against hypervisors. Assumed present, so a table
    /// without `r` surfaces as an unknown shortcut at dispatch time.
    pub fn default_user(&self) -> Result<&str> {
        self.resolve(DEFAULT_SHORTCUT)
    }

    /// Shortcuts sorted by letter.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.users.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_shortcuts() {
        let users = UserTable::builtin();
        assert_eq!(users.resolve("r").unwrap(), "root");
        assert_eq!(users.resolve("u").unwrap(), "ubuntu");
        assert_eq!(users.resolve("m").unwrap(), "mulisu");
    }

    #[test]
    fn test_default_user_is_root() {
        assert_eq!(UserTable::default().default_user().unwrap(), "root");
    }

    #[test]
    fn test_unknown_shortcut() {
        let err = UserTable::builtin().resolve("x").unwrap_err();
        assert!(matches!(err, VtError::UnknownUserShortcut(ref s) if s == "x"));
    }

    #[test]
    fn test_default_user_missing() {
        let users = UserTable::from_pairs([("u", "ubuntu")]);
        assert!(users.default_user().is_err());
    }

    #[test]
    fn test_iter_sorted() {
        let users = UserTable::builtin();
        let letters: Vec<&str> = users.iter().map(|(k, _)| k).collect();
        assert_eq!(letters, vec!["m", "r", "u"]);
    }
}
