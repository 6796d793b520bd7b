//! Status bar at the bottom of the TUI.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::Action;
use crate::components::browser::truncate;
use crate::components::Component;
use crate::theme::Theme;

pub struct StatusBarComponent {
    /// Current status message.
    pub message: String,
    /// Filtered vs total record counts, once a catalog is loaded.
    pub results: Option<(usize, usize)>,
}

impl StatusBarComponent {
    pub fn new() -> Self {
        Self {
            message: "Welcome to paperdeck. Press [?] for keybindings.".to_string(),
            results: None,
        }
    }

    /// Result-count pill for the left edge.
    fn results_badge(&self) -> String {
        match self.results {
            Some((shown, total)) => format!("{}/{}", shown, total),
            None => "—".to_string(),
        }
    }
}

impl Component for StatusBarComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::SetStatus(msg) => {
                self.message = msg.clone();
                None
            }
            Action::ClearStatus => {
                self.message.clear();
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = area.width as usize;

        // Right side: compact key hints
        let hints = "q·?·/·e·r";
        let hints_len = hints.chars().count() + 1; // +1 for trailing space

        let badge = self.results_badge();
        let badge_len = badge.chars().count() + 2; // spaces around badge

        // Truncate message to remaining space. Messages carry error text
        // and file paths, so count chars rather than bytes.
        let msg_budget = width
            .saturating_sub(badge_len)
            .saturating_sub(hints_len)
            .saturating_sub(4); // separators and spacing

        let msg = truncate(&self.message, msg_budget);

        // Pad to push hints to the right edge
        let used = badge_len + 2 + msg.chars().count();
        let pad = width.saturating_sub(used + hints_len);

        let line = Line::from(vec![
            Span::styled(format!(" {} ", badge), Theme::muted()),
            Span::styled("  ", Theme::dim()),
            Span::styled(msg, Theme::dim()),
            Span::raw(" ".repeat(pad)),
            Span::styled(hints, Theme::key_hint()),
            Span::raw(" "),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw_at_width(bar: &StatusBarComponent, width: u16) {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| bar.render(frame, frame.area()))
            .unwrap();
    }

    #[test]
    fn narrow_bar_cuts_multibyte_message_on_char_boundary() {
        let mut bar = StatusBarComponent::new();
        bar.handle_action(&Action::SetStatus(
            "Export failed: répertoire — unavailable: données.csv".to_string(),
        ));
        // Widths chosen so the cut lands inside a multibyte character if
        // the message were sliced by byte offset.
        for width in 1..60 {
            draw_at_width(&bar, width);
        }
    }

    #[test]
    fn empty_results_badge_is_a_dash() {
        let bar = StatusBarComponent::new();
        assert_eq!(bar.results_badge(), "—");
        draw_at_width(&bar, 40);
    }
}
