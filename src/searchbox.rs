//! A minimal single-line query input for the page header.
//!
//! This is a deliberately small cousin of a full text input: a prompt, a
//! placeholder, a value, and focus state. The page forwards key messages
//! here only while the box is focused, and re-derives its working set on
//! every edit. Editing is grapheme-aware so backspace removes a full user-
//! perceived character.

use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use unicode_segmentation::UnicodeSegmentation;

/// The search box model.
///
/// # Examples
///
/// ```rust
/// use service_browser::searchbox::Model;
/// use service_browser::Component;
///
/// let mut search = Model::new();
/// assert_eq!(search.value(), "");
/// search.set_value("db");
/// assert_eq!(search.value(), "db");
/// search.focus();
/// assert!(search.focused());
/// ```
pub struct Model {
    /// Text rendered before the input, e.g. `Filter: `.
    pub prompt: String,
    /// Hint text rendered while the value is empty.
    pub placeholder: String,
    /// Style for the prompt prefix.
    pub prompt_style: Style,
    /// Style for the typed value.
    pub text_style: Style,
    /// Style for the placeholder text.
    pub placeholder_style: Style,
    value: String,
    focus: bool,
}

impl Model {
    /// Creates a search box with the page's default prompt and placeholder.
    pub fn new() -> Self {
        Self {
            prompt: "Filter: ".to_string(),
            placeholder: "Filter services".to_string(),
            prompt_style: Style::new().foreground(AdaptiveColor {
                Light: "#3C3C3C",
                Dark: "#DDDDDD",
            }),
            text_style: Style::new(),
            placeholder_style: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            value: String::new(),
            focus: false,
        }
    }

    /// Returns the current query text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the query text.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Clears the query text.
    pub fn reset(&mut self) {
        self.value.clear();
    }

    /// Handles one key message, returning true if the value changed.
    ///
    /// Only plain character input and backspace edit the value; everything
    /// else (navigation, accept, cancel) is the page's business and is
    /// ignored here.
    pub fn update(&mut self, msg: &KeyMsg) -> bool {
        if !self.focus {
            return false;
        }
        match msg.key {
            KeyCode::Char(c)
                if !msg
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.value.push(c);
                true
            }
            KeyCode::Backspace => {
                if let Some((idx, _)) = self.value.grapheme_indices(true).next_back() {
                    self.value.truncate(idx);
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Renders the prompt and the value (or placeholder), with a cursor mark
    /// while focused.
    pub fn view(&self) -> String {
        let mut out = self.prompt_style.clone().render(&self.prompt);
        if self.value.is_empty() {
            if self.focus {
                out.push('▌');
            }
            out.push_str(&self.placeholder_style.clone().render(&self.placeholder));
        } else {
            out.push_str(&self.text_style.clone().render(&self.value));
            if self.focus {
                out.push('▌');
            }
        }
        out
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_ignores_input_while_blurred() {
        let mut search = Model::new();
        assert!(!search.update(&key(KeyCode::Char('a'))));
        assert_eq!(search.value(), "");
    }

    #[test]
    fn test_typing_appends_characters() {
        let mut search = Model::new();
        search.focus();
        assert!(search.update(&key(KeyCode::Char('d'))));
        assert!(search.update(&key(KeyCode::Char('b'))));
        assert_eq!(search.value(), "db");
    }

    #[test]
    fn test_backspace_removes_whole_grapheme() {
        let mut search = Model::new();
        search.focus();
        search.set_value("aé");
        assert!(search.update(&key(KeyCode::Backspace)));
        assert_eq!(search.value(), "a");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut search = Model::new();
        search.focus();
        assert!(!search.update(&key(KeyCode::Backspace)));
    }

    #[test]
    fn test_control_chords_do_not_edit() {
        let mut search = Model::new();
        search.focus();
        let chord = KeyMsg {
            key: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        };
        assert!(!search.update(&chord));
        assert_eq!(search.value(), "");
    }

    #[test]
    fn test_view_shows_placeholder_when_empty() {
        let search = Model::new();
        assert!(search.view().contains("Filter services"));
    }
}
