use std::{
    fs::OpenOptions,
    io,
    path::Path,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use folio_tui::chat::{ChatSession, ChatWorker, Delivery, HttpChatTransport, OrbState, Role};
use folio_tui::config::Config;
use folio_tui::editor::{EditorSession, ProjectForms};
use folio_tui::editor_display::FormDisplay;
use folio_tui::export::{
    SystemClipboard, clipboard_status, copy_to_clipboard, download_status, write_download,
};
use folio_tui::render::{build_page, render_page};
use folio_tui::source::{load_document, load_status};
use folio_tui::theme::Theme;

const STATUS_TIMEOUT: Duration = Duration::from_secs(4);
const TICK_RATE: Duration = Duration::from_millis(250);
const RESPONDING_LINGER: Duration = Duration::from_millis(1500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum View {
    Form,
    Preview,
    Chat,
}

impl View {
    fn title(self) -> &'static str {
        match self {
            View::Form => "Form",
            View::Preview => "Preview",
            View::Chat => "Chat",
        }
    }
}

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let config = Config::load();
    init_logging(&config.log_file)?;

    let result = load_document(&config.source);
    let status = load_status(&config.source, &result);
    let mut session = EditorSession::new();
    match result {
        Ok(document) => session.load(document, config.source.to_string()),
        Err(err) => {
            tracing::warn!(source = %config.source, error = %err, "failed to load site content");
            if config.print {
                return Err(err).with_context(|| format!("failed to load {}", config.source));
            }
        }
    }

    if config.print {
        println!("{}", session.export_json());
        return Ok(());
    }

    let mut app = App::new(config, session, status);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to initialize terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal backend")?;
    terminal.clear().ok();

    let res = run_app(&mut terminal, &mut app).context("application error");

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

/// The terminal owns stdout, so log lines go to a file.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("folio=info,folio_tui=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut last_tick = Instant::now();
    let mut needs_redraw = true;

    while !app.should_quit() {
        if needs_redraw {
            terminal
                .draw(|frame| app.draw(frame))
                .context("failed to draw frame")?;
            needs_redraw = false;
        }

        let timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout).context("event poll failed")? {
            let evt = event::read().context("failed to read event")?;
            if let Event::Resize(_, _) = evt {
                needs_redraw = true;
                continue;
            }
            app.handle_event(evt);
            needs_redraw = true;
        }

        if last_tick.elapsed() >= TICK_RATE {
            // Chat replies and expiring status messages both change the frame.
            if app.on_tick() {
                needs_redraw = true;
            }
            last_tick = Instant::now();
        }
    }

    Ok(())
}

struct App {
    config: Config,
    display: FormDisplay,
    theme: Theme,
    view: View,
    form_scroll: usize,
    preview_scroll: usize,
    preview_max_scroll: usize,
    preview_viewport: usize,
    chat: ChatSession,
    chat_input: String,
    chat_worker: Option<ChatWorker>,
    responded_at: Option<Instant>,
    clipboard: SystemClipboard,
    should_quit: bool,
    status_message: Option<(String, Instant)>,
}

impl App {
    fn new(config: Config, session: EditorSession, initial_status: String) -> Self {
        let chat_worker = config.chat_endpoint.as_ref().map(|endpoint| {
            tracing::info!(%endpoint, "assistant chat enabled");
            ChatWorker::new(Arc::new(HttpChatTransport::new(endpoint.clone())))
        });

        Self {
            config,
            display: FormDisplay::new(session),
            theme: Theme::default(),
            view: View::Form,
            form_scroll: 0,
            preview_scroll: 0,
            preview_max_scroll: 0,
            preview_viewport: 1,
            chat: ChatSession::new(),
            chat_input: String::new(),
            chat_worker,
            responded_at: None,
            clipboard: SystemClipboard::default(),
            should_quit: false,
            status_message: Some((initial_status, Instant::now())),
        }
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Returns whether anything visible changed.
    fn on_tick(&mut self) -> bool {
        let mut changed = false;

        if let Some(worker) = &self.chat_worker
            && let Some((pending, result)) = worker.poll()
        {
            self.chat.finish_send(&pending, result);
            self.responded_at = Some(Instant::now());
            changed = true;
        }

        if self.chat.orb() == OrbState::Responding
            && self
                .responded_at
                .is_some_and(|at| at.elapsed() >= RESPONDING_LINGER)
        {
            self.chat.settle();
            self.responded_at = None;
            changed = true;
        }

        let had_message = self.status_message.is_some();
        self.prune_status_message();
        changed || (had_message && self.status_message.is_none())
    }

    fn prune_status_message(&mut self) {
        if let Some((_, instant)) = &self.status_message
            && instant.elapsed() > STATUS_TIMEOUT
        {
            self.status_message = None;
        }
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return;
        };

        if modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_command(code);
            return;
        }

        match code {
            KeyCode::F(1) => self.view = View::Form,
            KeyCode::F(2) => self.view = View::Preview,
            KeyCode::F(3) => {
                if self.chat_worker.is_some() {
                    self.view = View::Chat;
                } else {
                    self.set_status(
                        "Chat is disabled. Set --chat-endpoint or FOLIO_CHAT_ENDPOINT.",
                    );
                }
            }
            _ => match self.view {
                View::Form => self.handle_form_key(code),
                View::Preview => self.handle_preview_key(code),
                View::Chat => self.handle_chat_key(code),
            },
        }
    }

    fn handle_command(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('c') => self.should_quit = true,
            KeyCode::Char('s') => self.download(),
            KeyCode::Char('y') => self.copy_json(),
            KeyCode::Char('r') => {
                if self.display.is_loaded() {
                    self.display.revert();
                    self.set_status("Reverted to the loaded content.");
                } else {
                    self.set_status("Nothing loaded to revert to.");
                }
            }
            KeyCode::Char('n') => {
                let index = self.display.add_project();
                self.view = View::Form;
                self.set_status(format!("Added {}.", ProjectForms::label(index)));
            }
            KeyCode::Char('d') if self.view == View::Form => {
                match self.display.remove_focused_project() {
                    Some(index) => {
                        self.set_status(format!("Removed {}.", ProjectForms::label(index)))
                    }
                    None => self.set_status("Move into a project to remove it."),
                }
            }
            _ => {}
        }
    }

    fn download(&mut self) {
        let json = self.display.session_mut().export_json();
        let result = write_download(&self.config.out_dir, &json);
        if let Err(err) = &result {
            tracing::warn!(error = %err, "download failed");
        }
        self.set_status(download_status(&result));
    }

    fn copy_json(&mut self) {
        let json = self.display.session_mut().export_json();
        let result = copy_to_clipboard(&mut self.clipboard, &json);
        self.set_status(clipboard_status(&result));
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Tab => self.display.focus_next(),
            KeyCode::BackTab => self.display.focus_prev(),
            KeyCode::Up => self.display.move_vertical(-1),
            KeyCode::Down => self.display.move_vertical(1),
            KeyCode::Left => {
                self.display.move_left();
            }
            KeyCode::Right => {
                self.display.move_right();
            }
            KeyCode::Home => self.display.move_home(),
            KeyCode::End => self.display.move_end(),
            KeyCode::Backspace => {
                self.display.backspace();
            }
            KeyCode::Delete => {
                self.display.delete();
            }
            KeyCode::Enter => {
                if !self.display.insert_newline() {
                    self.display.focus_next();
                }
            }
            KeyCode::Char(ch) => self.display.insert_char(ch),
            _ => {}
        }
    }

    fn handle_preview_key(&mut self, code: KeyCode) {
        let page = self.preview_viewport;
        let scroll = &mut self.preview_scroll;
        match code {
            KeyCode::Up => *scroll = scroll.saturating_sub(1),
            KeyCode::Down => *scroll = scroll.saturating_add(1),
            KeyCode::PageUp => *scroll = scroll.saturating_sub(page),
            KeyCode::PageDown => *scroll = scroll.saturating_add(page),
            KeyCode::Home => *scroll = 0,
            KeyCode::End => *scroll = self.preview_max_scroll,
            _ => {}
        }
        *scroll = (*scroll).min(self.preview_max_scroll);
    }

    fn handle_chat_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.send_chat(),
            KeyCode::Backspace => {
                self.chat_input.pop();
            }
            KeyCode::Esc => self.chat_input.clear(),
            KeyCode::Char(ch) => self.chat_input.push(ch),
            _ => {}
        }
    }

    fn send_chat(&mut self) {
        let Some(worker) = &self.chat_worker else {
            return;
        };
        if let Some(pending) = self.chat.begin_send(&self.chat_input) {
            tracing::info!(id = pending.id, "sending chat message");
            worker.dispatch(pending);
            self.chat_input.clear();
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area.height == 0 || area.width == 0 {
            return;
        }

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);
        let main_area = vertical[0];
        let status_area = vertical[1];

        match self.view {
            View::Form => self.draw_form(frame, main_area),
            View::Preview => self.draw_preview(frame, main_area),
            View::Chat => self.draw_chat(frame, main_area),
        }

        let status_line = self.status_line(status_area.width as usize);
        let status_widget = Paragraph::new(status_line)
            .block(Block::default().borders(Borders::NONE))
            .style(self.theme.status_bar_style());
        frame.render_widget(status_widget, status_area);
    }

    fn draw_form(&mut self, frame: &mut Frame, area: Rect) {
        let render = self.display.render_form(area.width as usize, &self.theme);
        let viewport = area.height as usize;
        self.display.update_after_render(viewport, render.total_lines);

        let max_scroll = render.total_lines.saturating_sub(viewport.max(1));
        if let Some(cursor) = render.cursor {
            self.form_scroll =
                scroll_top_for_cursor(self.form_scroll, cursor.line, viewport, max_scroll);
        }
        self.form_scroll = self.form_scroll.min(max_scroll);

        let paragraph = Paragraph::new(Text::from(render.lines))
            .block(Block::default().borders(Borders::NONE))
            .scroll((self.form_scroll as u16, 0));
        frame.render_widget(paragraph, area);

        if let Some(cursor) = render.cursor
            && cursor.line >= self.form_scroll
            && cursor.line < self.form_scroll + viewport
        {
            let y = area.y + (cursor.line - self.form_scroll) as u16;
            let x = area.x + cursor.column.min(area.width.saturating_sub(1));
            frame.set_cursor_position(Position::new(x, y));
        }
    }

    fn draw_preview(&mut self, frame: &mut Frame, area: Rect) {
        let site = self.display.preview().site();
        let page = build_page(&site);
        let render = render_page(&page, area.width as usize, &self.theme);

        let viewport = (area.height as usize).max(1);
        self.preview_viewport = viewport;
        self.preview_max_scroll = render.total_lines.saturating_sub(viewport);
        self.preview_scroll = self.preview_scroll.min(self.preview_max_scroll);

        let paragraph = Paragraph::new(Text::from(render.lines))
            .block(Block::default().borders(Borders::NONE))
            .scroll((self.preview_scroll as u16, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_chat(&mut self, frame: &mut Frame, area: Rect) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);
        let (header_area, messages_area, input_area) = (layout[0], layout[1], layout[2]);

        let orb_color = match self.chat.orb() {
            OrbState::Idle => self.theme.orb_idle_color,
            OrbState::Processing => self.theme.orb_processing_color,
            OrbState::Responding => self.theme.orb_responding_color,
        };
        let header = Line::from(vec![
            Span::styled("● ", Style::default().fg(orb_color)),
            Span::styled(self.chat.header(), self.theme.heading_style()),
        ]);
        frame.render_widget(Paragraph::new(header), header_area);

        let mut lines = Vec::new();
        for message in self.chat.messages() {
            let mut spans = match message.role {
                Role::User => vec![
                    Span::styled(
                        "You: ",
                        self.theme.chat_user_style().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(message.content.clone(), self.theme.chat_user_style()),
                ],
                Role::Assistant => vec![
                    Span::styled(
                        "Assistant: ",
                        self.theme.chat_assistant_style().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(message.content.clone(), self.theme.chat_assistant_style()),
                ],
            };
            if let Some(status) = message.status {
                spans.push(Span::styled(
                    format!(" {}", status.ticks()),
                    tick_style(&self.theme, status),
                ));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }

        // Keep the newest messages in view.
        let viewport = messages_area.height as usize;
        let scroll = lines.len().saturating_sub(viewport);
        let messages = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .scroll((scroll as u16, 0));
        frame.render_widget(messages, messages_area);

        let prompt = if self.chat.is_sending() { "… " } else { "> " };
        let input = Line::from(vec![
            Span::styled(prompt, self.theme.muted_style()),
            Span::raw(self.chat_input.clone()),
        ]);
        frame.render_widget(Paragraph::new(input), input_area);
        let column = (prompt.chars().count() + self.chat_input.chars().count()) as u16;
        frame.set_cursor_position(Position::new(
            input_area.x + column.min(input_area.width.saturating_sub(1)),
            input_area.y,
        ));
    }

    fn status_line(&mut self, terminal_width: usize) -> Line<'static> {
        self.prune_status_message();

        let view = format!("[{}]", self.view.title());
        if let Some((message, _)) = &self.status_message {
            return Line::from(vec![
                Span::raw(format!("{view} ")),
                Span::raw(message.clone()),
            ]);
        }

        let location = self
            .display
            .source()
            .map(str::to_string)
            .unwrap_or_else(|| "(nothing loaded)".to_string());
        let marker = if self.display.has_changes() { "*" } else { "" };
        let projects = self.display.fields().projects.len();

        // Least to most important; the front of the list is dropped first.
        let mut all_shortcuts = vec!["^R:Revert", "^D:Del", "^N:New", "^Y:Copy", "^S:Write"];
        if self.chat_worker.is_some() {
            all_shortcuts.push("F3:Chat");
        }
        all_shortcuts.extend(["F2:Preview", "F1:Form", "^Q:Quit"]);

        let mut spans = vec![
            Span::raw(format!("{view} ")),
            Span::styled(format!("{location}{marker}"), self.theme.filename_style()),
            Span::raw(format!(", {projects} projects")),
        ];
        let left_width: usize = spans.iter().map(|span| span.content.chars().count()).sum();

        let min_padding = 1;
        let mut shortcuts_to_show = Vec::new();
        let mut shortcuts_width = 0;
        for shortcut in all_shortcuts.iter().rev() {
            let test_width = if shortcuts_to_show.is_empty() {
                shortcut.chars().count()
            } else {
                shortcuts_width + 1 + shortcut.chars().count()
            };
            if left_width + min_padding + test_width <= terminal_width {
                shortcuts_to_show.insert(0, *shortcut);
                shortcuts_width = test_width;
            } else {
                break;
            }
        }

        if !shortcuts_to_show.is_empty() {
            let padding = terminal_width
                .saturating_sub(left_width)
                .saturating_sub(shortcuts_width)
                .max(min_padding);
            spans.push(Span::raw(" ".repeat(padding)));
            spans.push(Span::raw(shortcuts_to_show.join(" ")));
        }

        Line::from(spans)
    }
}

fn tick_style(theme: &Theme, status: Delivery) -> Style {
    match status {
        Delivery::Sent => theme.muted_style(),
        Delivery::Delivered => theme.tick_style(),
    }
}

/// Scroll offset that keeps `cursor_line` inside the viewport, with a one
/// line margin when there is room for it.
fn scroll_top_for_cursor(
    current: usize,
    cursor_line: usize,
    viewport: usize,
    max_scroll: usize,
) -> usize {
    let mut scroll = current.min(max_scroll);
    if viewport == 0 {
        return scroll;
    }

    let margin = if viewport >= 3 { 1 } else { 0 };
    let top_limit = scroll.saturating_add(margin);
    let bottom_offset = viewport.saturating_sub(1).saturating_sub(margin);
    let bottom_limit = scroll.saturating_add(bottom_offset);
    if cursor_line < top_limit {
        scroll = cursor_line.saturating_sub(margin);
    } else if cursor_line > bottom_limit {
        scroll = cursor_line.saturating_sub(bottom_offset);
    }

    scroll.min(max_scroll)
}
