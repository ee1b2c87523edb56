//! View rendering for the services page.
//!
//! `view()` is a pure function of page state: header, the visible page of
//! rows, the pagination line, the confirm dialog when open, and a short help
//! footer.

use super::style::ELLIPSIS;
use super::Model;
use crate::key::KeyMap as KeyMapTrait;
use crate::record::Service;
use unicode_width::UnicodeWidthStr;

/// Truncates a string to the given display width, appending an ellipsis when
/// anything was cut.
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let budget = max_width.saturating_sub(ELLIPSIS.width());
    for ch in s.chars() {
        let mut widened = out.clone();
        widened.push(ch);
        if widened.width() > budget {
            break;
        }
        out = widened;
    }
    out.push_str(ELLIPSIS);
    out
}

impl Model {
    /// Renders the complete page as a styled string.
    pub fn view(&self) -> String {
        let mut sections = vec![self.view_header()];

        if self.pending.dialog_open {
            sections.push(self.view_dialog());
        } else {
            sections.push(self.view_items());
            sections.push(self.view_footer());
        }

        sections.retain(|s| !s.is_empty());
        sections.join("\n")
    }

    fn view_header(&self) -> String {
        let mut header = self.styles.title.clone().render(&self.title);
        if self.is_fetching() {
            header.push(' ');
            header.push_str(&self.styles.fetching.clone().render("(fetching…)"));
        }
        if self.searching {
            header.push('\n');
            header.push_str(&self.search.view());
        } else if !self.query().trim().is_empty() {
            header.push('\n');
            header.push_str(
                &self
                    .styles
                    .fetching
                    .clone()
                    .render(&format!("filter: {:?} ({} matches)", self.query(), self.working.len())),
            );
        }
        header
    }

    fn view_items(&self) -> String {
        if self.working.is_empty() {
            return self.styles.no_items.clone().render("No services.");
        }

        let mut rows = Vec::new();
        for (row, svc) in self.visible_page().iter().enumerate() {
            rows.push(self.view_row(row, svc));
        }
        rows.join("\n")
    }

    fn view_row(&self, row: usize, svc: &Service) -> String {
        let mark = if svc.conformant {
            self.styles.conform_yes.clone().render("✓")
        } else {
            self.styles.conform_no.clone().render("✗")
        };

        let is_selected = self
            .selection
            .selected()
            .is_some_and(|sel| sel.svc_id == svc.svc_id);
        let name = truncate(&svc.name, self.width.saturating_sub(8));
        let style = if row == self.cursor {
            &self.styles.cursor_item
        } else if is_selected {
            &self.styles.selected_item
        } else {
            &self.styles.item
        };
        let prefix = if row == self.cursor { ">" } else { " " };

        format!("{} {} {}", prefix, mark, style.clone().render(&name))
    }

    fn view_dialog(&self) -> String {
        let name = self
            .pending
            .target
            .as_ref()
            .map(|svc| svc.name.as_str())
            .unwrap_or("this service");
        let prompt = format!("Deactivate {name}? (y/n)");
        self.styles.dialog.clone().render(&prompt)
    }

    fn view_footer(&self) -> String {
        let mut footer = self
            .styles
            .pagination
            .clone()
            .render(&self.paginator.view());

        let count = self.working.len();
        let noun = if count == 1 { "service" } else { "services" };
        footer.push_str(&self.styles.help.clone().render(&format!(" • {count} {noun}")));

        let help: Vec<String> = self
            .keymap
            .short_help()
            .into_iter()
            .map(|binding| {
                let (key, desc) = binding.help();
                format!("{key} {desc}")
            })
            .collect();
        if !help.is_empty() {
            footer.push('\n');
            footer.push_str(&self.styles.help.clone().render(&help.join(" • ")));
        }
        footer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_strings_untouched() {
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn test_truncate_appends_ellipsis() {
        let out = truncate("a very long service name", 10);
        assert!(out.ends_with(ELLIPSIS));
        assert!(out.width() <= 10);
    }
}
