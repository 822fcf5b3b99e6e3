use crate::{
    CoreError, CoreResult,
    keys::{Key, Modifier},
};

use std::{
    collections::{BTreeSet, HashSet},
    fmt,
    panic::Location,
};

use error_location::ErrorLocation;

/// An immutable hotkey combination: a set of modifiers plus one primary key.
///
/// Reconfiguration replaces the whole value; a spec is never edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeySpec {
    modifiers: BTreeSet<Modifier>,
    key: Key,
    keys: HashSet<Key>,
}

impl HotkeySpec {
    /// Build a spec from modifiers and a primary key.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidHotkey`] if the primary key is itself a
    /// modifier.
    #[track_caller]
    pub fn new(modifiers: impl IntoIterator<Item = Modifier>, key: Key) -> CoreResult<Self> {
        if key.is_modifier() {
            return Err(CoreError::InvalidHotkey {
                reason: format!("primary key '{key}' must not be a modifier"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let modifiers: BTreeSet<Modifier> = modifiers.into_iter().collect();
        let mut keys: HashSet<Key> = modifiers.iter().copied().map(Key::Modifier).collect();
        keys.insert(key);

        Ok(Self {
            modifiers,
            key,
            keys,
        })
    }

    /// Parse `{modifiers: [...], key}` as stored in configuration.
    #[track_caller]
    pub fn parse<S: AsRef<str>>(modifiers: &[S], key: &str) -> CoreResult<Self> {
        let mut parsed = Vec::with_capacity(modifiers.len());
        for name in modifiers {
            let name = name.as_ref();
            let modifier = Modifier::from_name(name).ok_or_else(|| CoreError::InvalidHotkey {
                reason: format!("unknown modifier '{name}'"),
                location: ErrorLocation::from(Location::caller()),
            })?;
            parsed.push(modifier);
        }

        let primary = Key::from_name(key).ok_or_else(|| CoreError::InvalidHotkey {
            reason: format!("unknown key '{key}'"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Self::new(parsed, primary)
    }

    /// Parse a flat key list such as `["cmd", "shift", "k"]`.
    ///
    /// Exactly one entry must name a non-modifier key.
    #[track_caller]
    pub fn from_key_list<S: AsRef<str>>(names: &[S]) -> CoreResult<Self> {
        let mut modifiers = Vec::new();
        let mut primary = None;

        for name in names {
            let name = name.as_ref();
            match Key::from_name(name) {
                Some(Key::Modifier(modifier)) => modifiers.push(modifier),
                Some(key) if primary.is_none() => primary = Some(key),
                Some(_) => {
                    return Err(CoreError::InvalidHotkey {
                        reason: format!("more than one primary key (extra '{name}')"),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
                None => {
                    return Err(CoreError::InvalidHotkey {
                        reason: format!("unknown key '{name}'"),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
            }
        }

        let key = primary.ok_or_else(|| CoreError::InvalidHotkey {
            reason: "no primary key in combination".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Self::new(modifiers, key)
    }

    /// Modifiers in canonical order.
    pub fn modifiers(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.modifiers.iter().copied()
    }

    /// The primary (non-modifier) key.
    pub fn key(&self) -> Key {
        self.key
    }

    /// Every key that must be held for the combination to match.
    pub fn keys(&self) -> &HashSet<Key> {
        &self.keys
    }

    /// Whether `key` is part of this combination.
    pub fn contains(&self, key: &Key) -> bool {
        self.keys.contains(key)
    }

    /// Flat key-name list, modifiers first.
    pub fn to_key_list(&self) -> Vec<String> {
        self.modifiers
            .iter()
            .map(|m| m.name().to_string())
            .chain(std::iter::once(self.key.to_string()))
            .collect()
    }
}

impl Default for HotkeySpec {
    /// `cmd+shift+k`.
    fn default() -> Self {
        let modifiers: BTreeSet<Modifier> = [Modifier::Cmd, Modifier::Shift].into_iter().collect();
        let key = Key::Char('k');
        let mut keys: HashSet<Key> = modifiers.iter().copied().map(Key::Modifier).collect();
        keys.insert(key);
        Self {
            modifiers,
            key,
            keys,
        }
    }
}

impl fmt::Display for HotkeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_key_list().join("+"))
    }
}
