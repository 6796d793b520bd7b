//! Component trait and all TUI components.
//!
//! Each component encapsulates rendering and input handling for one piece
//! of the screen.

pub mod browser;
pub mod filter_panel;
pub mod help;
pub mod status_bar;

use ratatui::layout::Rect;
use ratatui::Frame;

use crate::action::Action;

/// Trait implemented by all TUI components.
pub trait Component {
    /// Handle an action and optionally return a new action to dispatch.
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        let _ = action;
        None
    }

    /// Render the component into the given area.
    fn render(&self, frame: &mut Frame, area: Rect);
}
