//! Type-safe key bindings with help metadata.
//!
//! A [`Binding`] pairs one or more key codes with the help text shown in the
//! page footer. The [`KeyMap`] trait lets components expose their bindings
//! for compact or full help rendering.

use bubbletea_rs::KeyMsg;
use crossterm::event::KeyCode;

/// A single action binding: the keys that trigger it and its help text.
///
/// # Examples
///
/// ```rust
/// use service_browser::key::Binding;
/// use crossterm::event::KeyCode;
///
/// let next = Binding::new(vec![KeyCode::Right, KeyCode::Char('l')])
///     .with_help("→/l", "next page");
/// assert_eq!(next.help().0, "→/l");
/// ```
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyCode>,
    help_key: String,
    help_desc: String,
}

impl Binding {
    /// Creates a binding for the given key codes with empty help text.
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys,
            help_key: String::new(),
            help_desc: String::new(),
        }
    }

    /// Sets the help column text: the key label and a short description.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help_key = key.into();
        self.help_desc = desc.into();
        self
    }

    /// Returns true if the key message matches any of this binding's keys.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.keys.contains(&msg.key)
    }

    /// Returns the help label and description for this binding.
    pub fn help(&self) -> (&str, &str) {
        (&self.help_key, &self.help_desc)
    }

    /// Returns the key codes this binding responds to.
    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }
}

/// Implemented by components that expose key bindings for help display.
pub trait KeyMap {
    /// Bindings for the compact, single-line help view.
    fn short_help(&self) -> Vec<&Binding>;

    /// All bindings, organized into columns for the expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_matches_any_bound_key() {
        let b = Binding::new(vec![KeyCode::Right, KeyCode::Char('l')]);
        assert!(b.matches(&key(KeyCode::Right)));
        assert!(b.matches(&key(KeyCode::Char('l'))));
        assert!(!b.matches(&key(KeyCode::Left)));
    }

    #[test]
    fn test_help_round_trip() {
        let b = Binding::new(vec![KeyCode::Enter]).with_help("enter", "select");
        assert_eq!(b.help(), ("enter", "select"));
    }
}
