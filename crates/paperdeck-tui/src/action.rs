//! Action enum — the central message bus for the TUI.
//! All user interactions and async results flow through here.

use paperdeck_core::Catalog;

/// Every possible action that can occur in the application.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Global ──────────────────────────────────────────────
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,
    /// Display a status message in the status bar.
    SetStatus(String),
    /// Clear the status message.
    ClearStatus,
    /// A tick event for animations and polling.
    Tick,

    // ── Loading ─────────────────────────────────────────────
    /// Re-read the source file, bypassing the load cache.
    ReloadCatalog,
    /// The catalog finished loading (raw, links not yet resolved).
    CatalogLoaded(Box<Catalog>),
    /// Loading failed (missing file, parse error, missing columns).
    CatalogLoadFailed(String),

    // ── Filtering ───────────────────────────────────────────
    /// Open the filter form (title query, abstract query, base URL).
    OpenFilterPanel,
    /// Apply the edited filter form to the catalog.
    ApplyFilters {
        title_query: String,
        abstract_query: String,
        base_url: String,
    },

    // ── Detail / export ─────────────────────────────────────
    /// Toggle the expanded detail view for the selected paper.
    Confirm,
    /// Export the selected paper as Markdown.
    ExportSelected,
    /// The export finished; payload is the written path.
    ExportFinished(String),
    /// The export failed.
    ExportFailed(String),

    // ── Text input ──────────────────────────────────────────
    /// A character was typed (only sent when in input mode).
    CharInput(char),
    /// Backspace pressed (only sent when in input mode).
    BackspaceInput,
    /// Delete word (Ctrl+W).
    DeleteWord,
    /// Switch focus between input fields (Tab in input mode).
    SwitchInputField,
    /// Submit the filter form (Enter in editing mode).
    SubmitForm,
    /// Bulk paste from bracketed paste mode.
    PasteBulk(String),

    // ── Scrolling / selection ───────────────────────────────
    ScrollUp,
    ScrollDown,
    /// Close the topmost overlay or collapse the detail view (Esc).
    CloseOverlay,
}

/// Whether the app is in a text-input mode where raw keys should be
/// forwarded to the focused field instead of interpreted as global
/// shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode — keys are global shortcuts.
    Normal,
    /// Text input mode — keys go to the focused text field.
    Editing,
}
