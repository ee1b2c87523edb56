//! Styling for the services page.
//!
//! All defaults use adaptive colors so the page reads well on both light and
//! dark terminals. Applications can replace any field wholesale.

use lipgloss_extras::prelude::*;

/// Unicode ellipsis used when truncating long service names.
pub const ELLIPSIS: &str = "…";

/// Styling configuration for every visual element of the page.
#[derive(Debug, Clone)]
pub struct PageStyles {
    /// The page title ("Services").
    pub title: Style,
    /// The "fetching" note shown while loads are in flight.
    pub fetching: Style,
    /// A normal list row.
    pub item: Style,
    /// The list row under the cursor.
    pub cursor_item: Style,
    /// The row of the selected service.
    pub selected_item: Style,
    /// The conformity mark on conformant services.
    pub conform_yes: Style,
    /// The conformity mark on non-conformant services.
    pub conform_no: Style,
    /// The "No services." empty-state message.
    pub no_items: Style,
    /// The pagination line.
    pub pagination: Style,
    /// The confirm dialog body.
    pub dialog: Style,
    /// The help footer.
    pub help: Style,
}

impl Default for PageStyles {
    fn default() -> Self {
        Self {
            title: Style::new()
                .bold(true)
                .foreground(AdaptiveColor {
                    Light: "#1A1A1A",
                    Dark: "#FFFDF5",
                })
                .padding_left(1),
            fetching: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            item: Style::new().foreground(AdaptiveColor {
                Light: "#3C3C3C",
                Dark: "#DDDDDD",
            }),
            cursor_item: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#7D56F4",
                Dark: "#AD8CFA",
            }),
            selected_item: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#04B575",
            }),
            conform_yes: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#04B575",
            }),
            conform_no: Style::new().foreground(AdaptiveColor {
                Light: "#FF4672",
                Dark: "#ED567A",
            }),
            no_items: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            pagination: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#A49FA5",
                    Dark: "#777777",
                })
                .padding_left(1),
            dialog: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#FF4672",
                Dark: "#ED567A",
            }),
            help: Style::new().foreground(AdaptiveColor {
                Light: "#A49FA5",
                Dark: "#777777",
            }),
        }
    }
}
