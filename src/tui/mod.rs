//! TUI module - Terminal dashboard with ratatui

use std::io::{Stdout, stdout};
use std::sync::mpsc::{Receiver, Sender, channel};

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use crate::alert;
use crate::defaults::default_collection;
use crate::model::WorkoutDay;
use crate::progress::{CompletionMap, compute_progress};
use crate::schema::{self, EXPORT_FILENAME};
use crate::store::{Store, ThemePref};
use crate::timer::{PRESETS, RestTimer, Tick, TickOutcome, Ticker, TimerState};
use crate::tips::TipClient;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Pending yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Confirm {
    /// Wipe the completion map (offered once the day hits 100%).
    SessionReset,
    /// Throw away the custom collection and restore the built-in plan.
    RestoreDefaults,
}

/// App state for TUI
pub struct App {
    store: Store,
    days: Vec<WorkoutDay>,
    completed: CompletionMap,
    theme: ThemePref,
    active_day: usize,
    selected: usize,
    timer: RestTimer,
    ticker: Ticker,
    tick_tx: Sender<Tick>,
    tick_rx: Receiver<Tick>,
    tips: TipClient,
    tip_popup: Option<(String, String)>,
    confirm: Option<Confirm>,
    status: Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(store: Store) -> Result<Self> {
        let days = match store.load_collection()? {
            Some(days) if !days.is_empty() => days,
            _ => default_collection(),
        };
        let completed = store.load_completion()?;
        // Dark unless the user explicitly switched, like the original UI.
        let theme = store.load_theme()?.unwrap_or(ThemePref::Dark);
        let (tick_tx, tick_rx) = channel();

        Ok(Self {
            store,
            days,
            completed,
            theme,
            active_day: 0,
            selected: 0,
            timer: RestTimer::new(),
            ticker: Ticker::new(),
            tick_tx,
            tick_rx,
            tips: TipClient::from_env(),
            tip_popup: None,
            confirm: None,
            status: None,
            should_quit: false,
        })
    }

    /// Run the TUI application
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = init_terminal()?;

        while !self.should_quit {
            self.apply_ticks();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_events()?;
        }

        self.ticker.stop();
        restore_terminal()?;
        Ok(())
    }

    fn day(&self) -> &WorkoutDay {
        &self.days[self.active_day]
    }

    fn progress(&self) -> u8 {
        compute_progress(self.day(), &self.completed)
    }

    /// Drain the background clock. Ticks stamped by a superseded ticker run
    /// are dropped so a rapid pause/resume cannot double-count a second.
    fn apply_ticks(&mut self) {
        while let Ok(tick) = self.tick_rx.try_recv() {
            if tick.generation != self.ticker.current_generation() {
                continue;
            }
            if self.timer.tick() == TickOutcome::Expired {
                self.ticker.stop();
                alert::timer_expired(self.timer.base());
            }
        }
    }

    /// Keep the background clock aligned with the state machine: running
    /// means exactly one live ticker task, anything else means none.
    fn sync_ticker(&mut self) {
        if self.timer.is_running() {
            self.ticker.start(self.tick_tx.clone());
        } else {
            self.ticker.stop();
        }
    }

    fn select_day(&mut self, idx: usize) {
        if idx < self.days.len() {
            self.active_day = idx;
            self.selected = 0;
        }
    }

    fn next_day(&mut self) {
        self.select_day((self.active_day + 1) % self.days.len());
    }

    fn prev_day(&mut self) {
        self.select_day((self.active_day + self.days.len() - 1) % self.days.len());
    }

    fn move_selection(&mut self, down: bool) {
        let count = self.day().exercise_count();
        if count == 0 {
            return;
        }
        self.selected = if down {
            (self.selected + 1).min(count - 1)
        } else {
            self.selected.saturating_sub(1)
        };
    }

    fn selected_exercise_name(&self) -> Option<String> {
        self.day().exercises().nth(self.selected).map(|ex| ex.name.clone())
    }

    fn toggle_selected(&mut self) -> Result<()> {
        let day_id = self.day().id;
        if let Some(name) = self.selected_exercise_name() {
            self.completed.toggle(day_id, &name);
            self.store.save_completion(&self.completed)?;
        }
        Ok(())
    }

    fn toggle_theme(&mut self) -> Result<()> {
        self.theme = self.theme.toggled();
        self.store.save_theme(self.theme)?;
        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        let json = schema::export_collection(&self.days)?;
        std::fs::write(EXPORT_FILENAME, json)?;
        self.status = Some(format!("esportato in {EXPORT_FILENAME}"));
        Ok(())
    }

    fn show_tip(&mut self) {
        let Some(ex) = self.day().exercises().nth(self.selected).cloned() else {
            return;
        };
        let tip = self.tips.workout_tip(&ex.name, &ex.notes);
        self.tip_popup = Some((ex.name, tip));
    }

    fn confirm_yes(&mut self) -> Result<()> {
        match self.confirm.take() {
            Some(Confirm::SessionReset) => {
                self.completed.reset_all();
                self.store.save_completion(&self.completed)?;
                self.status = Some("sessione azzerata".into());
            }
            Some(Confirm::RestoreDefaults) => {
                self.days = default_collection();
                self.store.clear_collection()?;
                self.select_day(0);
                self.status = Some("scheda predefinita ripristinata".into());
            }
            None => {}
        }
        Ok(())
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(key.code)?;
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<()> {
        // Modal layers first: tip popup, confirmation, duration editing.
        if self.tip_popup.is_some() {
            if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q' | 'g')) {
                self.tip_popup = None;
            }
            return Ok(());
        }
        if self.confirm.is_some() {
            match code {
                KeyCode::Char('y' | 'Y') => self.confirm_yes()?,
                KeyCode::Char('n' | 'N') | KeyCode::Esc => self.confirm = None,
                _ => {}
            }
            return Ok(());
        }
        if self.timer.state() == TimerState::Editing {
            match code {
                KeyCode::Char(c) => self.timer.edit_push(c),
                KeyCode::Backspace => self.timer.edit_backspace(),
                KeyCode::Enter => {
                    self.timer.commit_edit();
                    self.sync_ticker();
                }
                KeyCode::Esc => {
                    self.timer.cancel_edit();
                    self.sync_ticker();
                }
                _ => {}
            }
            return Ok(());
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right => self.next_day(),
            KeyCode::BackTab | KeyCode::Left => self.prev_day(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected()?,
            KeyCode::Char('d') => self.toggle_theme()?,
            KeyCode::Char('s') => {
                self.timer.start_pause();
                self.sync_ticker();
            }
            KeyCode::Char('r') => {
                self.timer.reset();
                self.sync_ticker();
            }
            KeyCode::Char('e') => {
                self.timer.begin_edit();
                self.sync_ticker();
            }
            KeyCode::Char('1') => {
                self.timer.preset(PRESETS[0]);
                self.sync_ticker();
            }
            KeyCode::Char('2') => {
                self.timer.preset(PRESETS[1]);
                self.sync_ticker();
            }
            KeyCode::Char('3') => {
                self.timer.preset(PRESETS[2]);
                self.sync_ticker();
            }
            KeyCode::Char('x') => self.export()?,
            KeyCode::Char('g') => self.show_tip(),
            KeyCode::Char('R') => self.confirm = Some(Confirm::RestoreDefaults),
            KeyCode::Char('c') if self.progress() == 100 => {
                self.confirm = Some(Confirm::SessionReset);
            }
            _ => {}
        }
        Ok(())
    }

    fn fg(&self) -> Color {
        match self.theme {
            ThemePref::Dark => Color::White,
            ThemePref::Light => Color::Black,
        }
    }

    fn muted(&self) -> Color {
        Color::DarkGray
    }

    fn render(&self, frame: &mut Frame) {
        let complete = self.progress() == 100;
        let mut constraints = vec![
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Min(8),
        ];
        if complete {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Length(4));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.render_dashboard(frame, chunks[1]);
        self.render_exercises(frame, chunks[2]);
        if complete {
            self.render_complete_banner(frame, chunks[3]);
        }
        self.render_footer(frame, chunks[chunks.len() - 1]);

        if let Some((name, tip)) = &self.tip_popup {
            self.render_tip_popup(frame, name, tip);
        }
        if let Some(confirm) = self.confirm {
            self.render_confirm(frame, confirm);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let day = self.day();
        let accent = day.accent_color();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(format!(" Sessione {} ", day.id));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                day.title.clone(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(day.subtitle.clone(), Style::default().fg(self.muted())),
        ]));
        frame.render_widget(title, rows[0]);

        let titles: Vec<Line> = self
            .days
            .iter()
            .map(|d| Line::from(d.title.clone()))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.active_day)
            .style(Style::default().fg(self.muted()))
            .highlight_style(
                Style::default()
                    .fg(accent)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            );
        frame.render_widget(tabs, rows[2]);
    }

    fn render_dashboard(&self, frame: &mut Frame, area: Rect) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let accent = self.day().accent_color();
        let progress = self.progress();
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" Goal "))
            .gauge_style(Style::default().fg(accent))
            .percent(progress.into())
            .label(format!("{progress}%"));
        frame.render_widget(gauge, halves[0]);

        frame.render_widget(self.timer_widget(accent), halves[1]);
    }

    fn timer_widget(&self, accent: Color) -> Paragraph<'_> {
        let (display, state_line) = match self.timer.state() {
            TimerState::Editing => (
                format!("{}_", self.timer.edit_buffer()),
                Span::styled("✎ secondi, Invio conferma", Style::default().fg(Color::Yellow)),
            ),
            TimerState::Running => (
                self.timer.display(),
                Span::styled("▶ in corso", Style::default().fg(Color::Green)),
            ),
            TimerState::Expired => (
                self.timer.display(),
                Span::styled("✓ riposo finito", Style::default().fg(Color::Green)),
            ),
            TimerState::Idle => (
                self.timer.display(),
                Span::styled("⏸ in pausa", Style::default().fg(self.muted())),
            ),
        };

        let presets: Vec<Span> = PRESETS
            .iter()
            .flat_map(|&p| {
                let style = if self.timer.base() == p {
                    Style::default().fg(accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.muted())
                };
                [Span::styled(format!("{p}s"), style), Span::raw("  ")]
            })
            .collect();

        Paragraph::new(vec![
            Line::from(Span::styled(
                display,
                Style::default().fg(self.fg()).add_modifier(Modifier::BOLD),
            )),
            Line::from(state_line),
            Line::from(presets),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Recupero ")
                .border_style(Style::default().fg(accent)),
        )
    }

    fn render_exercises(&self, frame: &mut Frame, area: Rect) {
        let day = self.day();
        let mut items: Vec<ListItem> = Vec::new();
        let mut highlight = None;
        let mut exercise_idx = 0usize;

        for zone in &day.zones {
            items.push(ListItem::new(Line::from(Span::styled(
                format!("── {} ", zone.name.to_uppercase()),
                Style::default().fg(self.muted()).add_modifier(Modifier::BOLD),
            ))));
            for ex in &zone.exercises {
                let done = self.completed.is_done(day.id, &ex.name);
                if exercise_idx == self.selected {
                    highlight = Some(items.len());
                }

                let line = if done {
                    Line::from(vec![
                        Span::styled("✔ ", Style::default().fg(Color::Green)),
                        Span::styled(
                            ex.name.clone(),
                            Style::default()
                                .fg(self.muted())
                                .add_modifier(Modifier::CROSSED_OUT),
                        ),
                        Span::styled(format!("  {}", ex.sets), Style::default().fg(self.muted())),
                    ])
                } else {
                    Line::from(vec![
                        Span::styled(
                            format!("{} ", ex.kind.glyph()),
                            Style::default().fg(ex.kind.color()),
                        ),
                        Span::styled(
                            ex.name.clone(),
                            Style::default().fg(self.fg()).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!("  {}", ex.sets),
                            Style::default().fg(day.accent_color()),
                        ),
                        Span::styled(
                            format!("  {}", ex.notes),
                            Style::default().fg(self.muted()),
                        ),
                    ])
                };
                items.push(ListItem::new(line));
                exercise_idx += 1;
            }
        }

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" Esercizi "))
            .highlight_symbol("▸ ");
        let mut state = ListState::default();
        state.select(highlight);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_complete_banner(&self, frame: &mut Frame, area: Rect) {
        let banner = Paragraph::new(Line::from(vec![
            Span::styled(
                "Workout Completo! ",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "Bravo! Nutriti bene e riposa per crescere.  [c] reset sessione",
                Style::default().fg(self.fg()),
            ),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );
        frame.render_widget(banner, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let keys = Line::from(Span::styled(
            "←→: giorno | ↑↓: seleziona | spazio: fatto | s: timer | e: durata | 1/2/3: preset | g: tip | x: export | R: reset scheda | d: tema | q: esci",
            Style::default().fg(self.muted()),
        ));
        let status = Line::from(Span::styled(
            self.status.clone().unwrap_or_default(),
            Style::default().fg(Color::Yellow),
        ));
        let footer = Paragraph::new(vec![keys, status])
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, area);
    }

    fn render_tip_popup(&self, frame: &mut Frame, name: &str, tip: &str) {
        let area = centered_rect(60, 40, frame.area());
        frame.render_widget(Clear, area);
        let popup = Paragraph::new(vec![
            Line::from(Span::styled(
                name.to_string(),
                Style::default().fg(self.fg()).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("\"{tip}\""),
                Style::default().fg(self.fg()).add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
            Line::from(Span::styled("Invio per chiudere", Style::default().fg(self.muted()))),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Coach Tip ")
                .border_style(Style::default().fg(Color::Magenta)),
        );
        frame.render_widget(popup, area);
    }

    fn render_confirm(&self, frame: &mut Frame, confirm: Confirm) {
        let question = match confirm {
            Confirm::SessionReset => "Azzerare i progressi della sessione?",
            Confirm::RestoreDefaults => "Ripristinare la scheda predefinita?",
        };
        let area = centered_rect(50, 20, frame.area());
        frame.render_widget(Clear, area);
        let popup = Paragraph::new(vec![
            Line::from(Span::styled(question, Style::default().fg(self.fg()))),
            Line::from(""),
            Line::from(Span::styled("[y] sì   [n] no", Style::default().fg(self.muted()))),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Conferma ")
                .border_style(Style::default().fg(Color::Yellow)),
        );
        frame.render_widget(popup, area);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
