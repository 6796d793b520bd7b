//! Overview table and detail view for the filtered paper set.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

use paperdeck_core::PaperRecord;

/// Braille spinner frames.
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct BrowserComponent {
    /// The filtered, link-resolved rows currently shown.
    pub papers: Vec<PaperRecord>,
    /// Size of the unfiltered catalog (to tell "empty filter result"
    /// apart from "nothing loaded").
    pub total: usize,
    /// Currently selected row index.
    pub selected: usize,
    /// Whether the source file is still loading.
    pub loading: bool,
    /// Fatal load error (missing file, bad schema, parse failure).
    pub error: Option<String>,
    /// Whether the expanded detail view is open.
    detail_expanded: bool,
    /// Scroll position within the expanded detail view.
    detail_scroll: u16,
    /// Spinner animation frame counter.
    spinner_tick: usize,
}

impl BrowserComponent {
    pub fn new() -> Self {
        Self {
            papers: Vec::new(),
            total: 0,
            selected: 0,
            loading: true,
            error: None,
            detail_expanded: false,
            detail_scroll: 0,
            spinner_tick: 0,
        }
    }

    /// Replace the visible row set after a load or filter change.
    pub fn set_papers(&mut self, papers: Vec<PaperRecord>, total: usize) {
        self.papers = papers;
        self.total = total;
        self.error = None;
        if self.selected >= self.papers.len() {
            self.selected = self.papers.len().saturating_sub(1);
        }
        if self.papers.is_empty() {
            self.detail_expanded = false;
            self.detail_scroll = 0;
        }
    }

    pub fn selected_paper(&self) -> Option<&PaperRecord> {
        self.papers.get(self.selected)
    }

    /// Status warning when the selected paper's title is shared by other
    /// rows; selection by title would be ambiguous.
    fn collision_warning(&self) -> Option<Action> {
        let paper = self.selected_paper()?;
        let count = self
            .papers
            .iter()
            .filter(|p| p.title == paper.title)
            .count();
        if count > 1 {
            Some(Action::SetStatus(format!(
                "Warning: {} rows share this title; showing row {}.",
                count,
                self.selected + 1
            )))
        } else {
            None
        }
    }
}

impl Component for BrowserComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::Tick => {
                if self.loading {
                    self.spinner_tick = self.spinner_tick.wrapping_add(1);
                }
                None
            }
            Action::Confirm => {
                if self.detail_expanded {
                    self.detail_expanded = false;
                    self.detail_scroll = 0;
                    None
                } else if !self.papers.is_empty() {
                    self.detail_expanded = true;
                    self.detail_scroll = 0;
                    self.collision_warning()
                } else {
                    None
                }
            }
            Action::CloseOverlay => {
                if self.detail_expanded {
                    self.detail_expanded = false;
                    self.detail_scroll = 0;
                }
                None
            }
            Action::ScrollUp => {
                if self.detail_expanded {
                    self.detail_scroll = self.detail_scroll.saturating_sub(1);
                } else if self.selected > 0 {
                    self.selected -= 1;
                }
                None
            }
            Action::ScrollDown => {
                if self.detail_expanded {
                    self.detail_scroll = self.detail_scroll.saturating_add(1);
                } else if self.selected + 1 < self.papers.len() {
                    self.selected += 1;
                }
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Paper Overview ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::dim());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Fatal load error — nothing else is rendered.
        if let Some(ref err) = self.error {
            let msg = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("Error: {}", err),
                    Style::default().fg(Theme::error()),
                )),
                Line::from(""),
                Line::from(Span::styled("Press [r] to retry, [q] to quit.", Theme::dim())),
            ])
            .wrap(Wrap { trim: true });
            frame.render_widget(msg, inner);
            return;
        }

        if self.loading {
            let spinner = SPINNER[self.spinner_tick % SPINNER.len()];
            let msg = Paragraph::new(vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled(format!(" {} ", spinner), Theme::selected()),
                    Span::styled("Loading catalog...", Theme::header()),
                ]),
            ]);
            frame.render_widget(msg, inner);
            return;
        }

        // Empty filter result — warn and skip the table and detail.
        if self.papers.is_empty() {
            let text = if self.total == 0 {
                "The source file contains no records."
            } else {
                "No papers match the filters."
            };
            let msg = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(text, Style::default().fg(Theme::warning()))),
                Line::from(""),
                Line::from(Span::styled("Press [/] to edit the filters.", Theme::dim())),
            ]);
            frame.render_widget(msg, inner);
            return;
        }

        if self.detail_expanded {
            if let Some(paper) = self.papers.get(self.selected) {
                self.render_expanded_detail(frame, inner, paper);
            }
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Length(2), // Summary
            Constraint::Min(8),    // Paper table
            Constraint::Length(8), // Compact detail
        ])
        .split(inner);

        let summary = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{} of {} papers", self.papers.len(), self.total),
                Theme::header(),
            ),
            Span::styled("  |  ", Theme::dim()),
            Span::styled("[Enter]", Theme::selected()),
            Span::styled(" detail  ", Theme::dim()),
            Span::styled("[/]", Theme::selected()),
            Span::styled(" filter  ", Theme::dim()),
            Span::styled("[e]", Theme::selected()),
            Span::styled(" export", Theme::dim()),
        ]));
        frame.render_widget(summary, chunks[0]);

        self.render_paper_table(frame, chunks[1]);
        self.render_paper_detail(frame, chunks[2]);
    }
}

impl BrowserComponent {
    // ── Overview table ──────────────────────────────────────────

    fn render_paper_table(&self, frame: &mut Frame, area: Rect) {
        let table_width = area.width as usize;
        // Three link columns share what the index and title leave over.
        let link_width = (table_width / 5).clamp(8, 32);
        let title_max = table_width
            .saturating_sub(4 + 3 * (link_width + 1))
            .max(10);

        let table_inner_height = area.height.saturating_sub(2) as usize;
        let scroll_offset = if self.selected >= table_inner_height {
            self.selected - table_inner_height + 1
        } else {
            0
        };

        let header = Row::new(vec![
            Cell::from(" # "),
            Cell::from("Title"),
            Cell::from("Paper PDF"),
            Cell::from("Supplemental"),
            Cell::from("arXiv"),
        ])
        .style(Theme::header());

        let rows: Vec<Row> = self
            .papers
            .iter()
            .enumerate()
            .skip(scroll_offset)
            .take(table_inner_height)
            .map(|(i, paper)| {
                let style = if i == self.selected {
                    Theme::selected()
                } else {
                    Theme::normal()
                };

                Row::new(vec![
                    Cell::from(format!("{:>3}", i + 1)),
                    Cell::from(truncate(&paper.title, title_max)),
                    Cell::from(link_cell(paper.paper_pdf_url.as_deref(), link_width)),
                    Cell::from(link_cell(paper.supplemental_pdf_url.as_deref(), link_width)),
                    Cell::from(link_cell(paper.arxiv_url.as_deref(), link_width)),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Min(10),
                Constraint::Length(link_width as u16),
                Constraint::Length(link_width as u16),
                Constraint::Length(link_width as u16),
            ],
        )
        .header(header)
        .column_spacing(1)
        .block(Block::default().borders(Borders::TOP));

        frame.render_widget(table, area);
    }

    // ── Compact detail ──────────────────────────────────────────

    fn render_paper_detail(&self, frame: &mut Frame, area: Rect) {
        let Some(paper) = self.papers.get(self.selected) else {
            return;
        };

        let detail_block = Block::default()
            .title(" Paper Detail ")
            .borders(Borders::ALL)
            .border_style(Theme::dim());

        let detail_inner_width = area.width.saturating_sub(2) as usize;
        let abstract_text = truncate(&paper.abstract_text, detail_inner_width * 2);

        let link_status = |present: bool| -> (&'static str, Style) {
            if present {
                ("Available", Style::default().fg(Theme::success()))
            } else {
                ("N/A", Theme::dim())
            }
        };
        let (pdf_label, pdf_style) = link_status(paper.paper_pdf_url.is_some());
        let (supp_label, supp_style) = link_status(paper.supplemental_pdf_url.is_some());
        let (arxiv_label, arxiv_style) = link_status(paper.usable_arxiv_url().is_some());

        let detail = Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Title: ", Theme::header()),
                Span::styled(truncate(&paper.title, detail_inner_width), Theme::normal()),
            ]),
            Line::from(vec![
                Span::styled("PDF: ", Theme::header()),
                Span::styled(pdf_label, pdf_style),
                Span::styled("  Supplemental: ", Theme::header()),
                Span::styled(supp_label, supp_style),
                Span::styled("  arXiv: ", Theme::header()),
                Span::styled(arxiv_label, arxiv_style),
            ]),
            Line::from(""),
            Line::from(Span::styled(abstract_text, Theme::dim())),
        ])
        .wrap(Wrap { trim: true })
        .block(detail_block);

        frame.render_widget(detail, area);
    }

    // ── Expanded detail ─────────────────────────────────────────

    fn render_expanded_detail(&self, frame: &mut Frame, area: Rect, paper: &PaperRecord) {
        let block = Block::default()
            .title(format!(
                " Paper {}/{} — [Enter/Esc] close  [↑↓] scroll ",
                self.selected + 1,
                self.papers.len()
            ))
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::accent()));

        let inner = block.inner(area);
        let w = inner.width as usize;

        let mut lines: Vec<Line> = vec![
            Line::from(vec![
                Span::styled("Title: ", Theme::header()),
                Span::styled(&paper.title, Theme::normal()),
            ]),
            Line::from(""),
            Line::from(Span::styled("Links", Theme::header())),
        ];

        // Only links that resolved to a value are listed; the arXiv link
        // additionally has to look like an absolute URL.
        let mut any_link = false;
        if let Some(ref url) = paper.paper_pdf_url {
            lines.push(link_line("Paper PDF", url));
            any_link = true;
        }
        if let Some(ref url) = paper.supplemental_pdf_url {
            lines.push(link_line("Supplemental PDF", url));
            any_link = true;
        }
        if let Some(url) = paper.usable_arxiv_url() {
            lines.push(link_line("arXiv", url));
            any_link = true;
        }
        if !any_link {
            lines.push(Line::from(Span::styled("  (no links)", Theme::dim())));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Abstract", Theme::header())));
        lines.push(Line::from(Span::styled(
            "─".repeat(w.min(60)),
            Theme::dim(),
        )));
        lines.push(Line::from(""));

        for wrapped_line in word_wrap(&paper.abstract_text, w.saturating_sub(1).max(1)) {
            lines.push(Line::from(Span::styled(wrapped_line, Theme::normal())));
        }

        let para = Paragraph::new(lines)
            .scroll((self.detail_scroll, 0))
            .block(block);

        frame.render_widget(para, area);
    }
}

// ── Helpers ─────────────────────────────────────────────────────

fn link_line<'a>(label: &'a str, url: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {}: ", label), Theme::muted()),
        Span::styled(url, Theme::key_hint()),
    ])
}

fn link_cell(link: Option<&str>, max_len: usize) -> String {
    match link {
        Some(url) => truncate(url, max_len),
        None => "—".to_string(),
    }
}

fn word_wrap(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            if current_line.is_empty() {
                current_line = word.to_string();
            } else if current_line.len() + 1 + word.len() <= max_width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                lines.push(current_line);
                current_line = word.to_string();
            }
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Shorten `s` to at most `max_len` characters, appending `...` when cut.
/// Operates on chars, not bytes, so multibyte text never splits mid-char.
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if max_len < 4 {
        return s.chars().take(max_len).collect();
    }
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    }
}
