use crate::api::PriceBackend;
use crate::error::PriceWatchError;
use crate::model::PriceHistory;
use crate::ui::chart;
use crate::ui::core::tracker::{TrackerState, INVALID_TARGET_MESSAGE};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, error, info};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span, Text},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Wrap},
    Frame, Terminal,
};
use std::error::Error;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

type DynError = Box<dyn Error + Send + Sync>;

const URL_PLACEHOLDER: &str = "Enter Amazon product URL";
const EMPTY_PRODUCT_HINT: &str = "Enter a product URL and press Enter to load its price history.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Url,
    Email,
    TargetPrice,
}

/// Result of a spawned request, delivered back to the UI loop.
#[derive(Debug)]
pub enum Completion {
    History {
        seq: u64,
        result: Result<PriceHistory, PriceWatchError>,
    },
    Alert {
        seq: u64,
        result: Result<(), PriceWatchError>,
    },
}

pub struct Dashboard {
    pub state: TrackerState,
    pub focus: Focus,
    backend: Arc<dyn PriceBackend>,
    completion_tx: mpsc::Sender<Completion>,
    completion_rx: mpsc::Receiver<Completion>,
    /// Index of the inspected price point, if any.
    cursor: Option<usize>,
    running: bool,
}

impl Dashboard {
    pub fn new(backend: Arc<dyn PriceBackend>) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel(16);
        Self {
            state: TrackerState::new(),
            focus: Focus::Url,
            backend,
            completion_tx,
            completion_rx,
            cursor: None,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub async fn run(&mut self) -> Result<(), DynError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<(), DynError> {
        while self.running {
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            while let Ok(completion) = self.completion_rx.try_recv() {
                self.apply(completion);
            }

            terminal.draw(|f| self.draw(f))?;
        }
        info!("Dashboard closed");
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }

        if self.state.alert.is_visible() {
            self.handle_form_key(key);
            return;
        }

        match key.code {
            KeyCode::Esc => self.running = false,
            KeyCode::Enter => self.start_fetch(),
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Char('t') if ctrl => {
                if self.state.show_alert_form() {
                    self.focus = Focus::Email;
                }
            }
            KeyCode::Backspace => {
                let mut url = self.state.url.clone();
                url.pop();
                self.state.set_url(&url);
            }
            KeyCode::Char(c) if !ctrl => {
                let mut url = self.state.url.clone();
                url.push(c);
                self.state.set_url(&url);
            }
            _ => (),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                if self.state.cancel_alert() {
                    self.focus = Focus::Url;
                }
            }
            KeyCode::Enter => self.start_alert_submit(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    Focus::Email => Focus::TargetPrice,
                    _ => Focus::Email,
                };
            }
            KeyCode::Backspace => self.edit_focused(|text| {
                text.pop();
            }),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit_focused(|text| text.push(c))
            }
            _ => (),
        }
    }

    fn edit_focused<F: FnOnce(&mut String)>(&mut self, edit: F) {
        let Some(draft) = self.state.alert.draft() else {
            return;
        };
        match self.focus {
            Focus::Email => {
                let mut email = draft.email.clone();
                edit(&mut email);
                self.state.edit_alert_email(&email);
            }
            Focus::TargetPrice => {
                let mut target = draft.target_text.clone();
                edit(&mut target);
                self.state.edit_alert_target(&target);
            }
            Focus::Url => (),
        }
    }

    /// Steps the inspected point. The first step enters from the nearer end.
    fn move_cursor(&mut self, step: isize) {
        let len = self.state.history.as_ref().map_or(0, |h| h.history.len());
        if len == 0 {
            self.cursor = None;
            return;
        }

        self.cursor = Some(match self.cursor {
            None if step < 0 => len - 1,
            None => 0,
            Some(i) => i.saturating_add_signed(step).min(len - 1),
        });
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    fn start_fetch(&mut self) {
        let Some(ticket) = self.state.begin_fetch() else {
            return;
        };
        debug!("Spawning history fetch #{}", ticket.seq);

        let backend = Arc::clone(&self.backend);
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = backend.fetch_history(&ticket.url).await;
            if let Err(e) = tx.send(Completion::History { seq: ticket.seq, result }).await {
                error!("Failed to deliver history response: {}", e);
            }
        });
    }

    fn start_alert_submit(&mut self) {
        let Some(ticket) = self.state.begin_alert_submit() else {
            if !self.state.alert.is_visible() {
                self.focus = Focus::Url;
            }
            return;
        };
        debug!("Spawning alert submission #{}", ticket.seq);

        let backend = Arc::clone(&self.backend);
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = backend.create_alert(&ticket.request).await;
            if let Err(e) = tx.send(Completion::Alert { seq: ticket.seq, result }).await {
                error!("Failed to deliver alert response: {}", e);
            }
        });
    }

    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::History { seq, result } => {
                let replaced = result.is_ok();
                if self.state.finish_fetch(seq, result) && replaced {
                    self.cursor = None;
                }
            }
            Completion::Alert { seq, result } => self.state.finish_alert_submit(seq, result),
        }
        if !self.state.alert.is_visible() {
            self.focus = Focus::Url;
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(2),
            ])
            .split(f.size());

        self.render_header(f, chunks[0]);
        self.render_url_input(f, chunks[1]);
        self.render_status(f, chunks[2]);
        self.render_product(f, chunks[3]);
        self.render_footer(f, chunks[4]);

        if self.state.alert.is_visible() {
            self.render_alert_form(f, centered_rect(60, 12, f.size()));
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                "PRICEWATCH ",
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Amazon Price History Tracker"),
        ]))
        .block(Block::default().borders(Borders::BOTTOM));

        f.render_widget(header, area);
    }

    fn render_url_input(&self, f: &mut Frame, area: Rect) {
        let button = if self.state.loading {
            Span::styled("[ Loading... ]", Style::default().fg(Color::Yellow))
        } else if self.state.can_fetch() {
            Span::styled("[ Fetch Price History ]", Style::default().fg(Color::LightBlue))
        } else {
            Span::styled("[ Fetch Price History ]", Style::default().fg(Color::DarkGray))
        };

        let input = if self.state.url.is_empty() {
            Span::styled(URL_PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(self.state.url.as_str())
        };

        let border = if self.focus == Focus::Url {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let paragraph = Paragraph::new(Line::from(input)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(Line::from(vec![Span::raw("Product URL "), button])),
        );
        f.render_widget(paragraph, area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let paragraph = match &self.state.error {
            Some(message) => Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Error")),
            None => Paragraph::new("").block(Block::default()),
        };
        f.render_widget(paragraph, area);
    }

    fn render_product(&self, f: &mut Frame, area: Rect) {
        let Some(history) = &self.state.history else {
            let message = Paragraph::new(EMPTY_PRODUCT_HINT)
                .style(Style::default().fg(Color::Gray))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(message, area);
            return;
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Price History for ASIN: {}", history.identifier()));
        let inner_area = block.inner(area);
        f.render_widget(block, area);

        if inner_area.height < 3 || inner_area.width < 20 {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(2)])
            .split(inner_area);

        let mut summary = summary_line(history);
        let selected = self.cursor.and_then(|i| chart::point_label(history, i));
        if let Some(label) = &selected {
            summary.spans.push(Span::raw(" | Selected: "));
            summary.spans.push(Span::styled(
                label.clone(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
        }
        f.render_widget(Paragraph::new(summary), chunks[0]);

        if history.history.is_empty() {
            let message = Paragraph::new("No price points returned")
                .style(Style::default().fg(Color::Gray));
            f.render_widget(message, chunks[1]);
            return;
        }

        let data = chart::series(history);
        let y_bounds = chart::price_bounds(history);
        let highlight: Vec<(f64, f64)> = self
            .cursor
            .and_then(|i| data.get(i).copied())
            .into_iter()
            .collect();

        let mut datasets = vec![Dataset::default()
            .name("Price")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::LightBlue))
            .data(&data)];
        if !highlight.is_empty() {
            datasets.push(
                Dataset::default()
                    .marker(symbols::Marker::Block)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(Color::Yellow))
                    .data(&highlight),
            );
        }

        let chart_widget = Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds(chart::x_bounds(history))
                    .labels(
                        chart::axis_date_labels(history)
                            .into_iter()
                            .map(Span::raw)
                            .collect(),
                    ),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds(y_bounds)
                    .labels(
                        chart::axis_price_labels(y_bounds)
                            .into_iter()
                            .map(Span::raw)
                            .collect(),
                    ),
            );

        f.render_widget(chart_widget, chunks[1]);
    }

    fn render_alert_form(&self, f: &mut Frame, area: Rect) {
        let Some(draft) = self.state.alert.draft() else {
            return;
        };

        let field_style = |focus: Focus| {
            if self.focus == focus {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            }
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Email: ", field_style(Focus::Email)),
                Span::raw(draft.email.as_str()),
            ]),
            Line::from(vec![
                Span::styled("Target Price ($): ", field_style(Focus::TargetPrice)),
                Span::raw(draft.target_text.as_str()),
            ]),
            Line::from(""),
        ];

        if !draft.has_valid_target() {
            lines.push(Line::from(Span::styled(
                INVALID_TARGET_MESSAGE,
                Style::default().fg(Color::Yellow),
            )));
        }

        lines.push(if draft.submitting {
            Line::from(Span::styled("Submitting...", Style::default().fg(Color::Yellow)))
        } else {
            let create = if self.state.can_submit_alert() {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(vec![
                Span::styled("Enter", create.add_modifier(Modifier::BOLD)),
                Span::styled(" Create Alert  ", create),
                Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" Cancel"),
            ])
        });

        let form = Paragraph::new(Text::from(lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Set Price Alert ({})", draft.asin)),
        );

        f.render_widget(Clear, area);
        f.render_widget(form, area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let controls = if self.state.alert.is_visible() {
            vec![
                Span::raw("Controls: "),
                Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" Next field  "),
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" Create Alert  "),
                Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" Cancel"),
            ]
        } else {
            let mut controls = vec![
                Span::raw("Controls: "),
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" Fetch  "),
            ];
            if self.state.history.is_some() {
                let bold = Style::default().add_modifier(Modifier::BOLD);
                controls.push(Span::styled("Ctrl+T", bold));
                controls.push(Span::raw(" Track This Deal  "));
                controls.push(Span::styled("←/→", bold));
                controls.push(Span::raw(" Inspect  "));
            }
            controls.push(Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)));
            controls.push(Span::raw(" Quit"));
            controls
        };

        let footer = Paragraph::new(Line::from(controls))
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::TOP));

        f.render_widget(footer, area);
    }
}

fn summary_line(history: &PriceHistory) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("{} points", history.history.len()),
        Style::default().fg(Color::Gray),
    )];

    let stats = [
        ("Latest", history.latest(), Color::White),
        ("Low", history.lowest(), Color::Green),
        ("High", history.highest(), Color::Red),
    ];
    for (label, point, color) in stats {
        if let Some(point) = point {
            spans.push(Span::raw(format!(" | {}: ", label)));
            spans.push(Span::styled(
                chart::format_price_label(point.price),
                Style::default().fg(color),
            ));
        }
    }

    Line::from(spans)
}

fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_percent.min(100)) / 100) as u16;
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::backend::testing::ScriptedBackend;
    use crate::model::PricePoint;
    use ratatui::{backend::TestBackend, buffer::Buffer};

    fn sample_history() -> PriceHistory {
        PriceHistory {
            asin: "B000X".into(),
            history: vec![
                PricePoint {
                    date: "2024-01-01".into(),
                    price: 19.99,
                },
                PricePoint {
                    date: "2024-01-02".into(),
                    price: 17.49,
                },
            ],
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(dashboard: &mut Dashboard, text: &str) {
        for c in text.chars() {
            dashboard.handle_key(press(KeyCode::Char(c)));
        }
    }

    fn render_buffer(dashboard: &Dashboard) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        terminal.draw(|f| dashboard.draw(f)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn render(dashboard: &Dashboard) -> String {
        buffer_text(&render_buffer(dashboard))
    }

    /// Position of the first cell where `needle` starts.
    fn find_text(buffer: &Buffer, needle: &str) -> Option<(u16, u16)> {
        let chars: Vec<String> = needle.chars().map(String::from).collect();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                let fits = chars.iter().enumerate().all(|(i, c)| {
                    let cx = x as usize + i;
                    cx < buffer.area.width as usize && buffer.get(cx as u16, y).symbol() == c
                });
                if fits {
                    return Some((x, y));
                }
            }
        }
        None
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer.get(x, y).symbol());
            }
            out.push('\n');
        }
        out
    }

    #[tokio::test]
    async fn enter_fetches_once_and_renders_history() {
        let backend = Arc::new(ScriptedBackend::default());
        backend.push_history(Ok(sample_history()));
        let mut dashboard = Dashboard::new(backend.clone());

        type_text(&mut dashboard, "http://a/product");
        dashboard.handle_key(press(KeyCode::Enter));
        assert!(dashboard.state.loading);
        assert!(render(&dashboard).contains("Loading..."));

        dashboard.handle_key(press(KeyCode::Enter));

        let completion = dashboard.completion_rx.recv().await.unwrap();
        dashboard.apply(completion);

        assert_eq!(backend.history_calls.lock().unwrap().len(), 1);
        assert!(!dashboard.state.loading);
        let screen = render(&dashboard);
        assert!(screen.contains("Price History for ASIN: B000X"));
        assert!(screen.contains("Low: $17.49"));
    }

    #[tokio::test]
    async fn backend_error_is_shown() {
        let backend = Arc::new(ScriptedBackend::default());
        backend.push_history(Err(PriceWatchError::BackendError {
            status: 400,
            detail: "invalid url".into(),
        }));
        let mut dashboard = Dashboard::new(backend);

        type_text(&mut dashboard, "http://a/product");
        dashboard.handle_key(press(KeyCode::Enter));
        let completion = dashboard.completion_rx.recv().await.unwrap();
        dashboard.apply(completion);

        assert!(dashboard.state.history.is_none());
        assert!(render(&dashboard).contains("invalid url"));
    }

    #[tokio::test]
    async fn alert_form_round_trip() {
        let backend = Arc::new(ScriptedBackend::default());
        backend.push_alert(Ok(()));
        let mut dashboard = Dashboard::new(backend.clone());
        dashboard.state.history = Some(sample_history());

        dashboard.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert!(dashboard.state.alert.is_visible());
        assert_eq!(dashboard.focus, Focus::Email);
        assert!(render(&dashboard).contains("Set Price Alert"));

        type_text(&mut dashboard, "a@b.com");
        dashboard.handle_key(press(KeyCode::Tab));
        dashboard.handle_key(press(KeyCode::Backspace));
        type_text(&mut dashboard, "15.00");

        dashboard.handle_key(press(KeyCode::Enter));
        dashboard.handle_key(press(KeyCode::Enter));
        let completion = dashboard.completion_rx.recv().await.unwrap();
        dashboard.apply(completion);

        let calls = backend.alert_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].email, "a@b.com");
        assert_eq!(calls[0].target_price, 15.0);
        assert!(!dashboard.state.alert.is_visible());
        assert_eq!(dashboard.focus, Focus::Url);
    }

    #[test]
    fn escape_cancels_form_then_quits() {
        let mut dashboard = Dashboard::new(Arc::new(ScriptedBackend::default()));
        dashboard.state.history = Some(sample_history());

        dashboard.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        type_text(&mut dashboard, "x@y.z");
        dashboard.handle_key(press(KeyCode::Esc));
        assert!(!dashboard.state.alert.is_visible());
        assert!(dashboard.is_running());
        assert_eq!(dashboard.state.url, "");

        dashboard.handle_key(press(KeyCode::Esc));
        assert!(!dashboard.is_running());
    }

    #[test]
    fn track_shortcut_needs_history() {
        let mut dashboard = Dashboard::new(Arc::new(ScriptedBackend::default()));
        dashboard.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert!(!dashboard.state.alert.is_visible());
        assert_eq!(dashboard.state.url, "");
        assert!(!render(&dashboard).contains("Track This Deal"));
    }

    #[test]
    fn popup_fits_very_wide_terminals() {
        let area = centered_rect(60, 12, Rect::new(0, 0, 1200, 40));
        assert_eq!(area, Rect::new(240, 14, 720, 12));

        let area = centered_rect(60, 12, Rect::new(0, 0, 2000, 8));
        assert_eq!(area, Rect::new(400, 0, 1200, 8));
    }

    #[test]
    fn create_alert_dimmed_until_target_is_valid() {
        let mut dashboard = Dashboard::new(Arc::new(ScriptedBackend::default()));
        dashboard.state.history = Some(sample_history());
        dashboard.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        dashboard.handle_key(press(KeyCode::Tab));
        type_text(&mut dashboard, "x");

        let buffer = render_buffer(&dashboard);
        let (x, y) = find_text(&buffer, "Create Alert").unwrap();
        assert_eq!(buffer.get(x, y).fg, Color::DarkGray);

        dashboard.handle_key(press(KeyCode::Backspace));
        let buffer = render_buffer(&dashboard);
        let (x, y) = find_text(&buffer, "Create Alert").unwrap();
        assert_ne!(buffer.get(x, y).fg, Color::DarkGray);
    }

    #[test]
    fn arrows_inspect_price_points() {
        let mut dashboard = Dashboard::new(Arc::new(ScriptedBackend::default()));
        dashboard.handle_key(press(KeyCode::Right));
        assert_eq!(dashboard.cursor(), None);

        dashboard.state.history = Some(sample_history());
        dashboard.handle_key(press(KeyCode::Left));
        assert_eq!(dashboard.cursor(), Some(1));
        assert!(render(&dashboard).contains("Selected: 1/2/2024 $17.49"));

        dashboard.handle_key(press(KeyCode::Left));
        dashboard.handle_key(press(KeyCode::Left));
        assert_eq!(dashboard.cursor(), Some(0));
        assert!(render(&dashboard).contains("Selected: 1/1/2024 $19.99"));

        dashboard.handle_key(press(KeyCode::Right));
        dashboard.handle_key(press(KeyCode::Right));
        assert_eq!(dashboard.cursor(), Some(1));
        assert_eq!(dashboard.state.url, "");
    }

    #[tokio::test]
    async fn new_history_clears_inspected_point() {
        let backend = Arc::new(ScriptedBackend::default());
        backend.push_history(Ok(sample_history()));
        let mut dashboard = Dashboard::new(backend);
        dashboard.state.history = Some(sample_history());
        dashboard.handle_key(press(KeyCode::Right));
        assert_eq!(dashboard.cursor(), Some(0));

        type_text(&mut dashboard, "http://a/product");
        dashboard.handle_key(press(KeyCode::Enter));
        let completion = dashboard.completion_rx.recv().await.unwrap();
        dashboard.apply(completion);

        assert_eq!(dashboard.cursor(), None);
        assert!(!render(&dashboard).contains("Selected:"));
    }
}
