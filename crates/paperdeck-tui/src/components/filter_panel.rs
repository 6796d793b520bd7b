//! Filter form — title query, abstract query, and base URL.
//!
//! Opened with `/`, edited in Editing mode, applied with Enter. Esc closes
//! the form without touching the active filters.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

/// Which form field is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    TitleQuery,
    AbstractQuery,
    BaseUrl,
}

impl Field {
    fn next(self) -> Field {
        match self {
            Field::TitleQuery => Field::AbstractQuery,
            Field::AbstractQuery => Field::BaseUrl,
            Field::BaseUrl => Field::TitleQuery,
        }
    }

    fn prev(self) -> Field {
        match self {
            Field::TitleQuery => Field::BaseUrl,
            Field::AbstractQuery => Field::TitleQuery,
            Field::BaseUrl => Field::AbstractQuery,
        }
    }
}

pub struct FilterPanelComponent {
    pub visible: bool,
    title_query: String,
    abstract_query: String,
    base_url: String,
    focused: Field,
    /// Cursor position (byte offset) within the focused field.
    cursor: usize,
}

impl FilterPanelComponent {
    pub fn new() -> Self {
        Self {
            visible: false,
            title_query: String::new(),
            abstract_query: String::new(),
            base_url: String::new(),
            focused: Field::TitleQuery,
            cursor: 0,
        }
    }

    /// Open the form pre-filled with the currently active values.
    pub fn open(&mut self, title_query: &str, abstract_query: &str, base_url: &str) {
        self.visible = true;
        self.title_query = title_query.to_string();
        self.abstract_query = abstract_query.to_string();
        self.base_url = base_url.to_string();
        self.focused = Field::TitleQuery;
        self.cursor = self.title_query.len();
    }

    fn focused_input(&self) -> &str {
        match self.focused {
            Field::TitleQuery => &self.title_query,
            Field::AbstractQuery => &self.abstract_query,
            Field::BaseUrl => &self.base_url,
        }
    }

    fn focused_input_mut(&mut self) -> &mut String {
        match self.focused {
            Field::TitleQuery => &mut self.title_query,
            Field::AbstractQuery => &mut self.abstract_query,
            Field::BaseUrl => &mut self.base_url,
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.focused_input().len();
        if self.cursor > len {
            self.cursor = len;
        }
    }

    fn insert_char(&mut self, c: char) {
        self.clamp_cursor();
        let cursor = self.cursor;
        self.focused_input_mut().insert(cursor, c);
        self.cursor += c.len_utf8();
    }

    fn insert_str(&mut self, s: &str) {
        self.clamp_cursor();
        let cursor = self.cursor;
        self.focused_input_mut().insert_str(cursor, s);
        self.cursor += s.len();
    }

    fn delete_char(&mut self) {
        self.clamp_cursor();
        if self.cursor > 0 {
            let cursor = self.cursor;
            let input = self.focused_input_mut();
            let prev = input[..cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev);
            self.cursor = prev;
        }
    }

    fn delete_word(&mut self) {
        self.clamp_cursor();
        if self.cursor > 0 {
            let cursor = self.cursor;
            let input = self.focused_input_mut();
            let mut end = cursor;
            while end > 0 && input.as_bytes().get(end - 1) == Some(&b' ') {
                end -= 1;
            }
            let mut start = end;
            while start > 0 && input.as_bytes().get(start - 1) != Some(&b' ') {
                start -= 1;
            }
            input.drain(start..cursor);
            self.cursor = start;
        }
    }

    fn focus(&mut self, field: Field) {
        self.focused = field;
        self.cursor = self.focused_input().len();
    }

    /// Render a single-line field with a block cursor when focused.
    fn render_text_field(
        text: &str,
        cursor: usize,
        is_focused: bool,
        title: &str,
        frame: &mut Frame,
        area: Rect,
    ) {
        let border_style = if is_focused {
            Style::default().fg(Theme::accent())
        } else {
            Theme::border()
        };
        let block = Block::default()
            .title(title)
            .title_style(if is_focused {
                Theme::key_hint()
            } else {
                Theme::muted()
            })
            .borders(Borders::ALL)
            .border_style(border_style);

        let display = if is_focused {
            let pos = cursor.min(text.len());
            let (before, after) = text.split_at(pos);
            let cursor_char = if after.is_empty() {
                " ".to_string()
            } else {
                after.chars().next().unwrap().to_string()
            };
            let rest = if after.len() > cursor_char.len() {
                &after[cursor_char.len()..]
            } else {
                ""
            };
            Paragraph::new(Line::from(vec![
                Span::styled(before, Theme::normal()),
                Span::styled(
                    cursor_char,
                    Style::default().fg(Theme::bg()).bg(Theme::accent()),
                ),
                Span::styled(rest, Theme::normal()),
            ]))
        } else {
            Paragraph::new(Span::styled(text, Theme::normal()))
        };

        frame.render_widget(display.block(block), area);
    }

    fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
        let vertical = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .flex(Flex::Center)
        .split(area);

        let horizontal = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .flex(Flex::Center)
        .split(vertical[1]);

        horizontal[1]
    }
}

impl Component for FilterPanelComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        if !self.visible {
            return None;
        }

        match action {
            Action::CharInput(c) => {
                self.insert_char(*c);
                None
            }
            Action::BackspaceInput => {
                self.delete_char();
                None
            }
            Action::DeleteWord => {
                self.delete_word();
                None
            }
            Action::PasteBulk(text) => {
                // Single-line fields: only the first line of the paste.
                if let Some(first) = text.lines().next() {
                    self.insert_str(first);
                }
                None
            }
            Action::SwitchInputField | Action::ScrollDown => {
                self.focus(self.focused.next());
                None
            }
            Action::ScrollUp => {
                self.focus(self.focused.prev());
                None
            }
            Action::SubmitForm => {
                self.visible = false;
                Some(Action::ApplyFilters {
                    title_query: self.title_query.clone(),
                    abstract_query: self.abstract_query.clone(),
                    base_url: self.base_url.clone(),
                })
            }
            Action::CloseOverlay => {
                self.visible = false;
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let dialog = Self::centered_rect(area, 64.min(area.width), 13);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Filters ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::accent()));

        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let chunks = Layout::vertical([
            Constraint::Length(3), // Title query
            Constraint::Length(3), // Abstract query
            Constraint::Length(3), // Base URL
            Constraint::Length(2), // Hints
        ])
        .split(inner);

        Self::render_text_field(
            &self.title_query,
            self.cursor,
            self.focused == Field::TitleQuery,
            " Search title ",
            frame,
            chunks[0],
        );
        Self::render_text_field(
            &self.abstract_query,
            self.cursor,
            self.focused == Field::AbstractQuery,
            " Search abstract ",
            frame,
            chunks[1],
        );
        Self::render_text_field(
            &self.base_url,
            self.cursor,
            self.focused == Field::BaseUrl,
            " Base URL (for relative links) ",
            frame,
            chunks[2],
        );

        let hints = Paragraph::new(Line::from(vec![
            Span::styled(" [Enter]", Theme::key_hint()),
            Span::styled(" apply  ", Theme::dim()),
            Span::styled("[Tab/↑↓]", Theme::key_hint()),
            Span::styled(" field  ", Theme::dim()),
            Span::styled("[Esc]", Theme::key_hint()),
            Span::styled(" cancel", Theme::dim()),
        ]));
        frame.render_widget(hints, chunks[3]);
    }
}
