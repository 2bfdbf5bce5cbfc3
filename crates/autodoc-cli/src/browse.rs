//! Two-pane TUI: source files on the left, their highlighted documentation
//! on the right.
use anyhow::{Context, Result};
use autodoc_config::Config;
use autodoc_core::{HighlightSpan, InputShape, ParseCache, SourceKind};
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::{
    io::{Stdout, stdout},
    path::{Path, PathBuf},
};

use crate::style::tui_style;

struct App {
    root: PathBuf,
    files: Vec<PathBuf>,
    file_list_state: ListState,
    kind: SourceKind,
    cache: ParseCache,
    title: String,
    current_content: Vec<Line<'static>>,
    scroll: u16,
}

impl App {
    fn new(root: PathBuf, config: &Config, kind: SourceKind) -> Result<Self> {
        let files = config
            .scan(&root)
            .with_context(|| format!("Failed to scan {}", root.display()))?;
        log::info!("found {} source files under {}", files.len(), root.display());

        let mut app = Self {
            root,
            files,
            file_list_state: ListState::default(),
            kind,
            cache: ParseCache::new(config.cache_capacity),
            title: "Documentation".to_string(),
            current_content: Vec::new(),
            scroll: 0,
        };

        // Select first file if available
        if !app.files.is_empty() {
            app.file_list_state.select(Some(0));
            app.update_content_for_selection();
        }

        Ok(app)
    }

    fn next_file(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(i) => (i + 1) % self.files.len(),
            None => 0,
        };
        self.file_list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn previous_file(&mut self) {
        if self.files.is_empty() {
            return;
        }
        let i = match self.file_list_state.selected() {
            Some(0) | None => self.files.len() - 1,
            Some(i) => i - 1,
        };
        self.file_list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn display_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    fn update_content_for_selection(&mut self) {
        self.scroll = 0;
        let Some(path) = self
            .file_list_state
            .selected()
            .and_then(|i| self.files.get(i))
            .cloned()
        else {
            return;
        };
        let name = self.display_name(&path);

        match std::fs::read_to_string(&path) {
            Ok(text) => {
                let doc = self.cache.get_or_parse(&text, InputShape::Source(self.kind));
                let mut lines = spans_to_lines(&doc.highlight());
                if !doc.diagnostics.is_empty() {
                    lines.push(Line::default());
                    let style = Style::default().fg(Color::Red);
                    lines.extend(
                        doc.diagnostics
                            .iter()
                            .map(|d| Line::from(Span::styled(d.to_string(), style))),
                    );
                }
                self.title = format!("{name} ({} diagnostics)", doc.diagnostics.len());
                self.current_content = lines;
            }
            Err(e) => {
                log::warn!("reading {}: {e}", path.display());
                self.title = name;
                self.current_content = vec![Line::from(format!("Error reading file: {e}"))];
            }
        }
    }
}

/// Splits span texts at newlines into styled terminal lines.
fn spans_to_lines(spans: &[HighlightSpan]) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];
    for span in spans {
        let style = tui_style(span.class);
        for (i, part) in span.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            if !part.is_empty()
                && let Some(line) = lines.last_mut()
            {
                line.spans.push(Span::styled(part.to_string(), style));
            }
        }
    }
    lines
}

pub fn run(root: PathBuf, config: &Config, kind: SourceKind) -> Result<()> {
    if !root.is_dir() {
        anyhow::bail!("'{}' is not a directory", root.display());
    }

    // Create app before touching the terminal so scan errors print normally
    let mut app = App::new(root, config, kind)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!(
        "parse cache: {} hits, {} misses",
        app.cache.hits(),
        app.cache.misses()
    );
    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_file(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_file(),
                KeyCode::PageDown | KeyCode::Char(' ') => app.scroll = app.scroll.saturating_add(10),
                KeyCode::PageUp => app.scroll = app.scroll.saturating_sub(10),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);

    // File list panel
    let file_items: Vec<ListItem> = app
        .files
        .iter()
        .map(|path| ListItem::new(Line::from(app.display_name(path))))
        .collect();

    let files_list = List::new(file_items)
        .block(Block::default().borders(Borders::ALL).title("Files"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(files_list, chunks[0], &mut app.file_list_state);

    // Content panel
    let content_text = if app.files.is_empty() {
        vec![Line::from("No source files match the configured include globs")]
    } else {
        app.current_content.clone()
    };

    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title(app.title.as_str()))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));

    f.render_widget(content, chunks[1]);

    let help = Paragraph::new(Line::from(
        "q: Quit | ↑/k: Previous | ↓/j: Next | PgDn/Space, PgUp: Scroll",
    ));
    f.render_widget(help, rows[1]);
}
