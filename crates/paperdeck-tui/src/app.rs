//! Main application state and render loop.

use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use paperdeck_core::filter::FilterQuery;
use paperdeck_core::{export, Catalog, LoadCache};

use crate::action::{Action, InputMode};
use crate::components::browser::BrowserComponent;
use crate::components::filter_panel::FilterPanelComponent;
use crate::components::help::HelpComponent;
use crate::components::status_bar::StatusBarComponent;
use crate::components::Component;
use crate::event::{self, EventHandler, InputModeFlag};
use crate::theme::Theme;

/// Main application state.
pub struct App {
    /// Whether the app should exit.
    should_quit: bool,
    /// Shared flag to tell the EventHandler which key-mapping to use.
    input_mode_flag: InputModeFlag,

    // ── Pipeline inputs ──────────────────────────────────────
    /// Path to the CSV source.
    source_path: PathBuf,
    /// Base URL for resolving relative PDF paths.
    base_url: String,
    /// Active substring filters.
    filter: FilterQuery,

    // ── Pipeline state ───────────────────────────────────────
    /// One parse per distinct source path.
    load_cache: LoadCache,
    /// The loaded (unresolved) catalog.
    catalog: Option<Arc<Catalog>>,

    // Components
    browser: BrowserComponent,
    filter_panel: FilterPanelComponent,
    status_bar: StatusBarComponent,
    help: HelpComponent,
}

impl App {
    pub fn new(source_path: PathBuf, base_url: String) -> Self {
        Self {
            should_quit: false,
            input_mode_flag: event::new_input_mode_flag(),
            source_path,
            base_url,
            filter: FilterQuery::default(),
            load_cache: LoadCache::new(),
            catalog: None,
            browser: BrowserComponent::new(),
            filter_panel: FilterPanelComponent::new(),
            status_bar: StatusBarComponent::new(),
            help: HelpComponent::new(),
        }
    }

    /// Run the TUI application.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Set up terminal.
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Create the action channel.
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

        // Start the event handler with the shared input mode flag.
        let event_tx = tx.clone();
        let mode_flag = self.input_mode_flag.clone();
        let event_handler = EventHandler::new(event_tx, Duration::from_millis(100), mode_flag);
        tokio::spawn(async move {
            event_handler.run().await;
        });

        // Load the source file in the background so the TUI renders immediately.
        self.spawn_load(tx.clone());
        self.sync_input_mode();

        // Main loop.
        loop {
            terminal.draw(|frame| {
                self.render(frame);
            })?;

            if let Some(action) = rx.recv().await {
                self.handle_action(&action, &tx);

                if self.should_quit {
                    break;
                }
            }
        }

        // Restore terminal.
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Determine and set the correct input mode based on component state.
    /// Called after every action.
    fn sync_input_mode(&self) {
        let mode = self.current_input_mode();
        event::set_input_mode(&self.input_mode_flag, mode);
    }

    /// What input mode should be active right now?
    fn current_input_mode(&self) -> InputMode {
        if self.help.visible {
            return InputMode::Normal;
        }
        if self.filter_panel.visible {
            InputMode::Editing
        } else {
            InputMode::Normal
        }
    }

    /// Dispatch an action to all relevant components.
    fn handle_action(&mut self, action: &Action, tx: &mpsc::UnboundedSender<Action>) {
        // Global actions first.
        match action {
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            Action::ReloadCatalog => {
                self.load_cache.invalidate(&self.source_path);
                self.catalog = None;
                self.browser.loading = true;
                self.browser.error = None;
                self.spawn_load(tx.clone());
            }
            Action::CatalogLoaded(catalog) => {
                info!(records = catalog.len(), "Catalog loaded");
                let catalog = Arc::new(*catalog.clone());
                self.load_cache
                    .insert(self.source_path.clone(), catalog.clone());
                self.catalog = Some(catalog);
                self.browser.loading = false;
                self.refresh_view(tx);
            }
            Action::CatalogLoadFailed(err) => {
                error!("Catalog load failed: {}", err);
                self.browser.loading = false;
                self.browser.error = Some(err.clone());
                let _ = tx.send(Action::SetStatus(format!("Load failed: {}", err)));
            }
            Action::OpenFilterPanel => {
                let _ = tx.send(Action::ClearStatus);
                self.filter_panel.open(
                    &self.filter.title,
                    &self.filter.abstract_query,
                    &self.base_url,
                );
            }
            Action::ApplyFilters {
                title_query,
                abstract_query,
                base_url,
            } => {
                self.filter = FilterQuery::new(title_query.clone(), abstract_query.clone());
                self.base_url = base_url.clone();
                self.refresh_view(tx);
            }
            Action::ExportSelected => {
                self.spawn_export(tx.clone());
            }
            Action::ExportFinished(path) => {
                let _ = tx.send(Action::SetStatus(format!("Exported to {}", path)));
            }
            Action::ExportFailed(err) => {
                warn!("Export failed: {}", err);
                let _ = tx.send(Action::SetStatus(format!("Export failed: {}", err)));
            }
            _ => {}
        }

        // Forward to the focused component: the filter form captures input
        // while it is open, otherwise the browser gets the action.
        let result = if self.filter_panel.visible {
            self.filter_panel.handle_action(action)
        } else if self.help.visible {
            None
        } else {
            self.browser.handle_action(action)
        };

        // Always forward to overlays and status bar.
        self.help.handle_action(action);
        self.status_bar.handle_action(action);

        // Sync input mode after every action (a dialog may have opened
        // or closed).
        self.sync_input_mode();

        // Handle chained actions from components.
        if let Some(chained) = result {
            self.handle_action(&chained, tx);
        }
    }

    /// Re-run resolution and filtering, then push the visible rows into the
    /// browser. Called whenever the catalog, filters, or base URL change.
    fn refresh_view(&mut self, tx: &mpsc::UnboundedSender<Action>) {
        let Some(catalog) = self.catalog.clone() else {
            return;
        };

        let base = if self.base_url.trim().is_empty() {
            None
        } else {
            Some(self.base_url.as_str())
        };
        let resolved = catalog.with_resolved_links(base);
        let indices = self.filter.apply(&resolved.records);
        let papers: Vec<_> = indices
            .iter()
            .map(|&i| resolved.records[i].clone())
            .collect();

        let shown = papers.len();
        let total = resolved.len();
        self.browser.set_papers(papers, total);
        self.status_bar.results = Some((shown, total));

        let status = if shown == 0 && total > 0 {
            "No papers match the filters.".to_string()
        } else if self.filter.is_empty() {
            format!("{} papers loaded.", total)
        } else {
            format!("{} of {} papers match.", shown, total)
        };
        let _ = tx.send(Action::SetStatus(status));
    }

    // ── Async task spawners ─────────────────────────────────────

    /// Load the source file off the UI task. Cache hits apply immediately.
    fn spawn_load(&mut self, tx: mpsc::UnboundedSender<Action>) {
        if let Some(cached) = self.load_cache.get(&self.source_path) {
            info!(path = %self.source_path.display(), "Using cached catalog");
            self.catalog = Some(cached);
            self.browser.loading = false;
            self.refresh_view(&tx);
            return;
        }

        let path = self.source_path.clone();
        info!(path = %path.display(), "Loading catalog");
        let _ = tx.send(Action::SetStatus(format!("Loading {}...", path.display())));

        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(move || Catalog::from_path(&path)).await;
            match result {
                Ok(Ok(catalog)) => {
                    let _ = tx.send(Action::CatalogLoaded(Box::new(catalog)));
                }
                Ok(Err(e)) => {
                    let _ = tx.send(Action::CatalogLoadFailed(e.to_string()));
                }
                Err(e) => {
                    let _ = tx.send(Action::CatalogLoadFailed(e.to_string()));
                }
            }
        });
    }

    /// Write the selected paper to paper.md in the working directory.
    fn spawn_export(&self, tx: mpsc::UnboundedSender<Action>) {
        let Some(paper) = self.browser.selected_paper().cloned() else {
            let _ = tx.send(Action::SetStatus(
                "Nothing to export — no paper selected.".to_string(),
            ));
            return;
        };

        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(move || {
                let dir = std::env::current_dir()?;
                export::write_markdown(&paper, &dir)
            })
            .await;
            match result {
                Ok(Ok(path)) => {
                    info!(path = %path.display(), "Markdown export written");
                    let _ = tx.send(Action::ExportFinished(path.display().to_string()));
                }
                Ok(Err(e)) => {
                    let _ = tx.send(Action::ExportFailed(e.to_string()));
                }
                Err(e) => {
                    let _ = tx.send(Action::ExportFailed(e.to_string()));
                }
            }
        });
    }

    // ── Rendering ───────────────────────────────────────────────

    /// Render the full UI.
    fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(2), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.render_header(frame, chunks[0]);
        self.browser.render(frame, chunks[1]);
        self.status_bar.render(frame, chunks[2]);

        // Overlays (rendered on top)
        self.filter_panel.render(frame, area);
        self.help.render(frame, area);
    }

    /// Render the header line: app name, source path, base URL.
    fn render_header(&self, frame: &mut ratatui::Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" paperdeck ", Theme::title()),
            Span::styled("— ", Theme::dim()),
            Span::styled(self.source_path.display().to_string(), Theme::muted()),
            Span::styled("  base: ", Theme::dim()),
            Span::styled(&self.base_url, Theme::muted()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
