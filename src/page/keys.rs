//! Key bindings for the services page.
//!
//! Browse-mode bindings follow common terminal conventions (vim-style
//! movement plus arrows). While the search box is focused only the
//! accept/cancel bindings apply, and while the confirm dialog is open only
//! confirm/cancel apply. The update loop enforces those modes.

use crate::key;
use crossterm::event::KeyCode;

/// Key bindings for page navigation, filtering, and actions.
#[derive(Debug, Clone)]
pub struct PageKeyMap {
    /// Move the cursor up one row.
    pub cursor_up: key::Binding,
    /// Move the cursor down one row.
    pub cursor_down: key::Binding,
    /// Go to the next page of services.
    pub next_page: key::Binding,
    /// Go to the previous page of services.
    pub prev_page: key::Binding,
    /// Focus the search box.
    pub filter: key::Binding,
    /// Accept the query and return focus to the list.
    pub accept_filter: key::Binding,
    /// Abandon the query and return focus to the list.
    pub cancel_filter: key::Binding,
    /// Select the service under the cursor (opens its detail route).
    pub select: key::Binding,
    /// Clear the query, or close the detail view when no query is set.
    pub back: key::Binding,
    /// Begin adding a new service.
    pub add: key::Binding,
    /// Edit the selected service.
    pub edit: key::Binding,
    /// Toggle the conformity flag of the service under the cursor.
    pub toggle_conformity: key::Binding,
    /// Request deactivation of the service under the cursor.
    pub deactivate: key::Binding,
    /// Confirm the pending deactivation (dialog only).
    pub confirm: key::Binding,
    /// Cancel the pending deactivation (dialog only).
    pub cancel: key::Binding,
    /// Quit.
    pub quit: key::Binding,
}

impl Default for PageKeyMap {
    fn default() -> Self {
        Self {
            cursor_up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')])
                .with_help("↑/k", "up"),
            cursor_down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            next_page: key::Binding::new(vec![
                KeyCode::Right,
                KeyCode::Char('l'),
                KeyCode::PageDown,
            ])
            .with_help("→/l/pgdn", "next page"),
            prev_page: key::Binding::new(vec![
                KeyCode::Left,
                KeyCode::Char('h'),
                KeyCode::PageUp,
            ])
            .with_help("←/h/pgup", "prev page"),
            filter: key::Binding::new(vec![KeyCode::Char('/')]).with_help("/", "filter"),
            accept_filter: key::Binding::new(vec![KeyCode::Enter, KeyCode::Tab])
                .with_help("enter", "apply filter"),
            cancel_filter: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "cancel"),
            select: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "open"),
            back: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "back"),
            add: key::Binding::new(vec![KeyCode::Char('a')]).with_help("a", "add service"),
            edit: key::Binding::new(vec![KeyCode::Char('e')]).with_help("e", "edit"),
            toggle_conformity: key::Binding::new(vec![KeyCode::Char('t')])
                .with_help("t", "toggle conformity"),
            deactivate: key::Binding::new(vec![KeyCode::Char('x')]).with_help("x", "deactivate"),
            confirm: key::Binding::new(vec![KeyCode::Char('y'), KeyCode::Enter])
                .with_help("y", "confirm"),
            cancel: key::Binding::new(vec![KeyCode::Char('n'), KeyCode::Esc])
                .with_help("n", "cancel"),
            quit: key::Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit"),
        }
    }
}

impl key::KeyMap for PageKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![
            &self.cursor_up,
            &self.cursor_down,
            &self.filter,
            &self.add,
            &self.quit,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            // Column 1: movement
            vec![
                &self.cursor_up,
                &self.cursor_down,
                &self.next_page,
                &self.prev_page,
            ],
            // Column 2: filtering and selection
            vec![
                &self.filter,
                &self.accept_filter,
                &self.cancel_filter,
                &self.select,
                &self.back,
            ],
            // Column 3: actions
            vec![
                &self.add,
                &self.edit,
                &self.toggle_conformity,
                &self.deactivate,
                &self.quit,
            ],
        ]
    }
}
