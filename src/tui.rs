use color_eyre::Result;
use crossbeam::channel::{Receiver, unbounded};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind, poll, read,
    },
    execute,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Flex, Layout, Margin, Position, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, List, ListItem, Paragraph, Wrap},
};
use std::io::stdout;
use std::time::{Duration, Instant};
use tui_big_text::{BigText, PixelSize};

use crate::{
    assets::{AssetLibrary, VIDEO_EXTENSION},
    audio_player::{MediaBackend, RodioBackend},
    config::Config,
    engine::{PlaybackEngine, PlayerEvent, SubscriptionId, TransportState, format_time},
    library::LibraryView,
    onboarding::{Carousel, CarouselAction, PreviewStatus},
    playlist::Playlist,
    sheet::{FULL_ARTWORK, FULL_HEIGHT, MINI_ARTWORK, SheetController, SheetGeometry},
    theme::Theme,
    visualizer::{self, WaveformBars},
    waveform,
};

const FRAME: Duration = Duration::from_millis(16);
const IDLE: Duration = Duration::from_millis(250);
const SEEK_STEP: f64 = 0.05;
// rows of the collapsed sheet, borders included
const MINI_ROWS: u16 = 3;
const ROWS_PER_ITEM: u16 = 2;
const MAX_EDGE_COLS: f32 = 2.;
const MAX_ART_COLS: f32 = 24.;
const WAVE_ROWS: u16 = 3;
// times + waveform + transport + hints
const CONTROL_ROWS: u16 = 1 + WAVE_ROWS + 1 + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Onboarding,
    Library,
}

/// What the current mouse press started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerDrag {
    Sheet { last_row: u16 },
    Scrub,
}

/// Areas of the last frame used for mouse hit testing.
#[derive(Debug, Default, Clone, Copy)]
struct HitAreas {
    list: Rect,
    sheet: Rect,
    waveform: Rect,
    get_started: Rect,
}

struct App<B: MediaBackend> {
    engine: PlaybackEngine<B>,
    player_rx: Receiver<PlayerEvent>,
    subscription: SubscriptionId,
    sheet: SheetController,
    library: LibraryView,
    carousel: Carousel,
    has_completed_onboarding: bool,
    theme: Theme,
    waveform: Vec<f32>,
    sample_count: usize,
    units_per_row: f32,
    // previewed playback fraction while the waveform is dragged
    scrub: Option<f64>,
    pointer: Option<PointerDrag>,
    hit: HitAreas,
    should_quit: bool,
}

impl<B: MediaBackend> App<B> {
    fn new(mut engine: PlaybackEngine<B>, config: &Config) -> Self {
        let (player_tx, player_rx) = unbounded::<PlayerEvent>();
        let subscription = engine.subscribe(move |event| {
            // receiver is dropped only together with the engine
            let _ = player_tx.send(event.clone());
        });

        let durations = engine
            .playlist()
            .tracks()
            .iter()
            .map(|track| engine.duration_text(track))
            .collect();
        let library = LibraryView::new(engine.playlist(), durations);
        let carousel = Carousel::builtin(engine.assets());

        Self {
            engine,
            player_rx,
            subscription,
            sheet: SheetController::new(config.sheet_config()),
            library,
            carousel,
            has_completed_onboarding: false,
            theme: config.theme(),
            waveform: Vec::new(),
            sample_count: config.waveform.sample_count,
            units_per_row: config.sheet.units_per_row,
            scrub: None,
            pointer: None,
            hit: HitAreas::default(),
            should_quit: false,
        }
    }

    fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        loop {
            let now = Instant::now();
            self.engine.tick(now);
            self.sheet.advance(now);
            self.drain_player_events();

            terminal.draw(|f| self.draw(f))?;
            if self.should_quit {
                self.engine.unsubscribe(self.subscription);
                return Ok(());
            }

            // event reader
            if poll(self.next_timeout(Instant::now()))? {
                let event = read()?;
                self.handle_event(event, Instant::now());
            }
        }
    }

    fn next_timeout(&self, now: Instant) -> Duration {
        if self.sheet.is_animating() || self.sheet.is_dragging() || self.scrub.is_some() {
            return FRAME;
        }
        match self.engine.next_poll_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(IDLE),
            None => IDLE,
        }
    }

    fn drain_player_events(&mut self) {
        while let Ok(event) = self.player_rx.try_recv() {
            if let PlayerEvent::TrackChanged { source_id } = event {
                self.waveform = match self.engine.waveform(self.sample_count) {
                    Some(profile) => profile,
                    None => match self.engine.assets().resolve_audio(&source_id) {
                        Ok(path) => waveform::compute_profile(&path, self.sample_count),
                        Err(err) => {
                            log::warn!("no waveform for {}: {}", source_id, err);
                            waveform::flat_profile(self.sample_count)
                        }
                    },
                };
                if let Some(index) = self.engine.playlist().index_of(&source_id) {
                    self.library.select(index);
                }
            }
        }
    }

    fn screen(&self) -> Screen {
        if self.has_completed_onboarding {
            Screen::Library
        } else {
            Screen::Onboarding
        }
    }

    fn sheet_visible(&self) -> bool {
        self.screen() == Screen::Library && self.engine.current_track().is_some()
    }

    fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            _ => (),
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if key.code == KeyCode::Char('q') || ctrl_c {
            self.should_quit = true;
            return;
        }

        match self.screen() {
            Screen::Onboarding => match key.code {
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.carousel.next_page(),
                KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
                    self.carousel.previous_page()
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let action = self.carousel.activate();
                    self.apply_carousel_action(action);
                }
                _ => (),
            },
            Screen::Library => match key.code {
                KeyCode::Up if !self.sheet.is_expanded() => self.library.select_previous(),
                KeyCode::Down if !self.sheet.is_expanded() => self.library.select_next(),
                KeyCode::Enter => {
                    let track = self
                        .library
                        .activate()
                        .and_then(|index| self.engine.playlist().get(index).cloned());
                    if let Some(track) = track {
                        self.engine.load_track(&track);
                    }
                }
                KeyCode::Char(' ') => self.engine.toggle_play_pause(),
                KeyCode::Char('n') => self.engine.next(),
                KeyCode::Char('p') => self.engine.previous(),
                KeyCode::Char('r') => self.engine.toggle_repeat(),
                KeyCode::Left => self.seek_by(-SEEK_STEP),
                KeyCode::Right => self.seek_by(SEEK_STEP),
                KeyCode::Char('k') | KeyCode::PageUp if self.sheet_visible() => {
                    self.sheet.expand(now)
                }
                KeyCode::Char('j') | KeyCode::PageDown | KeyCode::Esc => self.sheet.collapse(now),
                _ => (),
            },
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match self.screen() {
                Screen::Onboarding => {
                    if self.hit.get_started.contains(position) {
                        let action = self.carousel.activate();
                        self.apply_carousel_action(action);
                    }
                }
                Screen::Library => {
                    if self.sheet_visible() && self.hit.waveform.contains(position) {
                        self.scrub = Some(visualizer::fraction_at(self.hit.waveform, mouse.column));
                        self.pointer = Some(PointerDrag::Scrub);
                    } else if self.sheet_visible() && self.hit.sheet.contains(position) {
                        self.sheet.begin_drag(now);
                        self.pointer = Some(PointerDrag::Sheet {
                            last_row: mouse.row,
                        });
                    } else if self.hit.list.contains(position) {
                        // first item row sits below the top border
                        let row = mouse.row.saturating_sub(self.hit.list.y + 1);
                        if let Some(index) = self.library.index_at_row(row, ROWS_PER_ITEM) {
                            self.library.select(index);
                            self.engine.load_index(index);
                        }
                    }
                }
            },
            MouseEventKind::Drag(MouseButton::Left) => match self.pointer {
                Some(PointerDrag::Sheet { last_row }) => {
                    let delta = mouse.row as f32 - last_row as f32;
                    self.sheet.drag_by(delta * self.units_per_row);
                    self.pointer = Some(PointerDrag::Sheet {
                        last_row: mouse.row,
                    });
                }
                Some(PointerDrag::Scrub) => {
                    self.scrub = Some(visualizer::fraction_at(self.hit.waveform, mouse.column));
                }
                None => (),
            },
            MouseEventKind::Up(MouseButton::Left) => match self.pointer.take() {
                Some(PointerDrag::Sheet { .. }) => self.sheet.release(now),
                Some(PointerDrag::Scrub) => {
                    if let Some(fraction) = self.scrub.take() {
                        self.engine.seek(fraction);
                    }
                }
                None => (),
            },
            MouseEventKind::ScrollDown if self.screen() == Screen::Library => {
                self.library.select_next()
            }
            MouseEventKind::ScrollUp if self.screen() == Screen::Library => {
                self.library.select_previous()
            }
            _ => (),
        }
    }

    fn apply_carousel_action(&mut self, action: CarouselAction) {
        if action == CarouselAction::Completed {
            self.has_completed_onboarding = true;
        }
    }

    fn seek_by(&mut self, delta: f64) {
        let fraction = self.engine.state().playback_fraction + delta;
        self.engine.seek(fraction);
    }

    fn draw(&mut self, f: &mut Frame) {
        let area = f.area();
        f.render_widget(Block::default().style(self.theme.base()), area);
        self.hit = HitAreas::default();

        match self.screen() {
            Screen::Onboarding => self.render_onboarding(f, area),
            Screen::Library => {
                self.render_library(f, area);
                if self.sheet_visible() {
                    self.render_sheet(f, area);
                }
            }
        }
    }

    fn render_onboarding(&mut self, frame: &mut Frame, area: Rect) {
        let Some(page) = self.carousel.current_page().cloned() else {
            return;
        };
        let index = self.carousel.current_index();
        let muted = Style::default().fg(self.theme.muted);

        let [preview_area, title_area, detail_area, button_area, dots_area] = Layout::vertical([
            Constraint::Percentage(45),
            Constraint::Length(4),
            Constraint::Min(2),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(area);

        let status = match (
            self.carousel.preview_status(index),
            self.carousel.is_preview_playing(index),
        ) {
            (Some(PreviewStatus::Available), true) => "▶ playing preview",
            (Some(PreviewStatus::Available), false) => "❚❚ preview paused",
            _ => "preview unavailable",
        };
        let preview = Paragraph::new(vec![Line::default(), Line::from(status)])
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(muted)
                    .title(format!(" {}.{} ", page.video_id, VIDEO_EXTENSION)),
            );
        frame.render_widget(preview, preview_area.inner(Margin::new(4, 1)));

        let title = BigText::builder()
            .pixel_size(PixelSize::Quadrant)
            .style(Style::default().fg(self.theme.foreground))
            .lines(vec![Line::from(page.title)])
            .build();
        frame.render_widget(title, title_area.inner(Margin::new(1, 0)));

        let detail = Paragraph::new(page.detail)
            .style(muted)
            .wrap(Wrap { trim: true });
        frame.render_widget(detail, detail_area.inner(Margin::new(1, 0)));

        if self.carousel.is_last_page() {
            let [button] = Layout::horizontal([Constraint::Length(24)])
                .flex(Flex::Center)
                .areas(button_area);
            let get_started = Paragraph::new(Line::from("Get Started").bold())
                .alignment(Alignment::Center)
                .style(Style::default().fg(self.theme.highlight))
                .block(Block::bordered().border_type(BorderType::Rounded));
            frame.render_widget(get_started, button);
            self.hit.get_started = button;
        } else {
            let hint = Paragraph::new(Line::from("← → browse   q quit"))
                .alignment(Alignment::Center)
                .style(muted);
            frame.render_widget(hint, button_area.inner(Margin::new(0, 1)));
        }

        let mut dots = Vec::new();
        for i in 0..self.carousel.pages().len() {
            if i > 0 {
                dots.push(Span::raw(" "));
            }
            if i == index {
                dots.push(Span::styled("●", Style::default().fg(self.theme.foreground)));
            } else {
                dots.push(Span::styled("○", muted));
            }
        }
        frame.render_widget(
            Paragraph::new(Line::from(dots)).alignment(Alignment::Center),
            dots_area,
        );
    }

    fn render_library(&mut self, frame: &mut Frame, area: Rect) {
        let reserved = if self.sheet_visible() { MINI_ROWS } else { 0 };
        let [header, list_area, _] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(reserved),
        ])
        .areas(area);

        let heading = Paragraph::new(Line::from("Discover Music").bold());
        frame.render_widget(heading, header.inner(Margin::new(1, 0)));

        let muted = Style::default().fg(self.theme.muted);
        // borders, highlight symbol and one space of margin
        let width = list_area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .engine
            .playlist()
            .tracks()
            .iter()
            .enumerate()
            .map(|(i, track)| {
                let duration = self.library.duration(i).to_string();
                ListItem::new(vec![
                    padded_line(
                        Span::raw(track.title.as_str()),
                        Span::styled(duration, muted),
                        width,
                    ),
                    Line::from(Span::styled(track.description.as_str(), muted)),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(muted),
            )
            .highlight_style(
                Style::default()
                    .fg(self.theme.highlight)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▌");
        frame.render_stateful_widget(list, list_area, &mut self.library.list_state);
        self.hit.list = list_area;
    }

    fn render_sheet(&mut self, frame: &mut Frame, area: Rect) {
        let geometry = self.sheet.geometry();

        let rows = (geometry.visible_height() / FULL_HEIGHT * area.height as f32).round() as u16;
        let rows = rows.clamp(MINI_ROWS.min(area.height), area.height);
        let pad = ((geometry.edge_padding / 30. * MAX_EDGE_COLS).round() as u16).min(area.width / 4);
        let sheet_area = Rect::new(
            area.x + pad,
            area.bottom() - rows,
            area.width.saturating_sub(pad * 2),
            rows,
        );
        self.hit.sheet = sheet_area;

        let border_type = if geometry.corner_radius >= 32. {
            BorderType::Rounded
        } else {
            BorderType::Plain
        };
        let block = Block::bordered()
            .border_type(border_type)
            .border_style(Style::default().fg(self.theme.muted))
            .style(self.theme.sheet());
        let inner = block.inner(sheet_area);
        frame.render_widget(Clear, sheet_area);
        frame.render_widget(block, sheet_area);

        if self.sheet.expansion_fraction() < 0.5 {
            self.render_mini_player(frame, inner, &geometry);
        } else {
            self.render_full_player(frame, inner, &geometry);
        }
    }

    fn render_mini_player(&mut self, frame: &mut Frame, area: Rect, geometry: &SheetGeometry) {
        let Some(track) = self.engine.current_track() else {
            return;
        };
        let label = self.theme.faded(self.theme.foreground, self.sheet.label_opacity());
        let art_cols = ((geometry.artwork_size / MINI_ARTWORK * 2.).round() as u16).min(area.width / 3);
        let shift = (self.sheet.drag_offset() / 5. / self.units_per_row).round() as u16;
        let symbol = match self.engine.transport() {
            TransportState::Playing => "❚❚",
            _ => "▶",
        };

        let [top, rest] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
        let [art, _, title, button] = Layout::horizontal([
            Constraint::Length(art_cols),
            Constraint::Length(1 + shift),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .areas(top);

        frame.render_widget(
            Paragraph::new("█".repeat(art.width as usize))
                .style(Style::default().fg(self.theme.highlight)),
            art,
        );
        frame.render_widget(
            Paragraph::new(track.title.as_str()).style(Style::default().fg(label)),
            title,
        );
        frame.render_widget(
            Paragraph::new(symbol).style(Style::default().fg(self.theme.foreground)),
            button,
        );

        // the sheet is being pulled open: fade the full controls in underneath
        if rest.height >= CONTROL_ROWS {
            let [_, controls] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(CONTROL_ROWS)])
                    .areas(rest);
            self.render_player_controls(frame, controls, self.sheet.controls_opacity());
        }
    }

    fn render_full_player(&mut self, frame: &mut Frame, area: Rect, geometry: &SheetGeometry) {
        let Some(track) = self.engine.current_track().cloned() else {
            return;
        };
        let label_opacity = self.sheet.label_opacity();

        let top_pad = (geometry.top_padding / FULL_HEIGHT * area.height as f32).round() as u16;
        let art_cols = ((geometry.artwork_size / FULL_ARTWORK * MAX_ART_COLS).round() as u16)
            .clamp(2, area.width.max(2));
        let art_rows = (art_cols / 2).max(1);

        let [_, art_row, title_area, desc_area, _, controls] = Layout::vertical([
            Constraint::Length(top_pad),
            Constraint::Length(art_rows),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(CONTROL_ROWS),
        ])
        .areas(area);

        let [art] = Layout::horizontal([Constraint::Length(art_cols)])
            .flex(Flex::Center)
            .areas(art_row);
        let artwork = Paragraph::new(vec![Line::from("▒".repeat(art.width as usize)); art.height as usize])
            .style(Style::default().fg(self.theme.highlight))
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title(track.image_ref.as_str()),
            );
        frame.render_widget(artwork, art);

        let mut title_style = Style::default().fg(self.theme.faded(self.theme.foreground, label_opacity));
        if geometry.title_scale >= 1.5 {
            title_style = title_style.add_modifier(Modifier::BOLD);
        }
        frame.render_widget(
            Paragraph::new(track.title.as_str())
                .alignment(Alignment::Center)
                .style(title_style),
            title_area,
        );
        frame.render_widget(
            Paragraph::new(track.description.as_str())
                .alignment(Alignment::Center)
                .style(Style::default().fg(self.theme.faded(self.theme.muted, label_opacity))),
            desc_area,
        );

        self.render_player_controls(frame, controls, self.sheet.controls_opacity());
    }

    fn render_player_controls(&mut self, frame: &mut Frame, area: Rect, opacity: f32) {
        let state = self.engine.state();
        let fg = self.theme.faded(self.theme.foreground, opacity);
        let muted = self.theme.faded(self.theme.muted, opacity);
        let highlight = self.theme.faded(self.theme.highlight, opacity);

        let [times, wave, transport, hints] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(WAVE_ROWS),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area.inner(Margin::new(1, 0)));

        let current = match self.scrub {
            Some(fraction) => format_time(fraction * state.duration_secs),
            None => state.current_time_display.clone(),
        };
        frame.render_widget(
            Paragraph::new(padded_line(
                Span::styled(current, Style::default().fg(fg)),
                Span::styled(state.total_time_display.clone(), Style::default().fg(fg)),
                times.width as usize,
            )),
            times,
        );

        frame.render_widget(
            WaveformBars {
                profile: &self.waveform,
                progress: self.scrub.unwrap_or(state.playback_fraction),
                played: highlight,
                unplayed: muted,
            },
            wave,
        );

        let play = if state.is_playing { "❚❚" } else { "▶" };
        let repeat_color = if state.is_repeating { highlight } else { muted };
        let buttons = Line::from(vec![
            Span::styled("|◀", Style::default().fg(fg)),
            Span::raw("    "),
            Span::styled(play, Style::default().fg(fg).add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("▶|", Style::default().fg(fg)),
            Span::raw("    "),
            Span::styled("↻", Style::default().fg(repeat_color)),
        ]);
        frame.render_widget(
            Paragraph::new(buttons).alignment(Alignment::Center),
            transport,
        );
        frame.render_widget(
            Paragraph::new("space play · n/p next/prev · r repeat · ←/→ seek · j/k sheet")
                .alignment(Alignment::Center)
                .style(Style::default().fg(muted)),
            hints,
        );

        self.hit.waveform = wave;
    }
}

/// `left` and `right` on one line, `right` flush with `width`.
fn padded_line<'a>(left: Span<'a>, right: Span<'a>, width: usize) -> Line<'a> {
    let pad = width.saturating_sub(left.width() + right.width());
    Line::from(vec![left, Span::raw(" ".repeat(pad)), right])
}

pub fn run(config: &Config, assets: AssetLibrary) -> Result<()> {
    let engine = PlaybackEngine::new(
        Playlist::builtin()?,
        assets,
        RodioBackend::new(),
        config.poll_interval(),
    );
    let app = App::new(engine, config);

    let terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;
    let app_result = app.run(terminal);
    let mouse_result = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    app_result?;
    mouse_result?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::{FakeBackend, FakeMedia, Fixture, fixture};
    use ratatui::{Terminal, backend::TestBackend};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Harness {
        app: App<FakeBackend>,
        media: Rc<RefCell<FakeMedia>>,
        terminal: Terminal<TestBackend>,
        _dir: tempfile::TempDir,
    }

    impl Harness {
        fn new(ids: &[&str]) -> Self {
            let Fixture {
                engine, media, dir, ..
            } = fixture(ids);
            Self {
                app: App::new(engine, &Config::default()),
                media,
                terminal: Terminal::new(TestBackend::new(80, 40)).unwrap(),
                _dir: dir,
            }
        }

        fn in_library(ids: &[&str]) -> Self {
            let mut harness = Self::new(ids);
            harness.app.has_completed_onboarding = true;
            harness
        }

        fn key(&mut self, code: KeyCode) {
            self.app
                .handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), Instant::now());
            self.app.drain_player_events();
        }

        fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16, now: Instant) {
            let event = MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            };
            self.app.handle_event(Event::Mouse(event), now);
            self.app.drain_player_events();
        }

        fn render(&mut self) -> String {
            let app = &mut self.app;
            self.terminal.draw(|f| app.draw(f)).unwrap();
            self.terminal
                .backend()
                .buffer()
                .content()
                .iter()
                .map(|cell| cell.symbol())
                .collect()
        }
    }

    const LEFT: MouseButton = MouseButton::Left;

    #[test]
    fn test_onboarding_completes_from_last_page_only() {
        let mut h = Harness::new(&["a"]);
        h.key(KeyCode::Enter);
        assert_eq!(h.app.screen(), Screen::Onboarding);
        h.key(KeyCode::Right);
        h.key(KeyCode::Right);
        h.key(KeyCode::Enter);
        assert_eq!(h.app.screen(), Screen::Library);
        assert!(h.app.has_completed_onboarding);
    }

    #[test]
    fn test_onboarding_renders_current_page() {
        let mut h = Harness::new(&["a"]);
        let screen = h.render();
        assert!(screen.contains("v1.mp4"));
        assert!(screen.contains("preview unavailable"));
        assert!(!screen.contains("Get Started"));

        h.key(KeyCode::Right);
        h.key(KeyCode::Right);
        let screen = h.render();
        assert!(screen.contains("Get Started"));
        let button = h.app.hit.get_started;
        h.mouse(MouseEventKind::Down(LEFT), button.x + 1, button.y + 1, Instant::now());
        assert_eq!(h.app.screen(), Screen::Library);
    }

    #[test]
    fn test_library_lists_tracks_without_sheet() {
        let mut h = Harness::in_library(&["a", "b"]);
        let screen = h.render();
        assert!(screen.contains("Discover Music"));
        assert!(screen.contains("A"));
        assert_eq!(h.app.hit.sheet, Rect::default());
    }

    #[test]
    fn test_selecting_a_track_computes_its_waveform() {
        let mut h = Harness::in_library(&["a", "b", "c"]);
        h.key(KeyCode::Down);
        h.key(KeyCode::Enter);

        assert_eq!(h.app.engine.state().current_index, 1);
        assert!(h.media.borrow().playing);
        // the fixture assets are empty files, so the profile is flat
        assert_eq!(h.app.waveform, waveform::flat_profile(80));
        assert!(h.render().contains("B"));
    }

    #[test]
    fn test_waveform_reuses_backend_samples() {
        let mut h = Harness::in_library(&["a", "b"]);
        h.media.borrow_mut().profile = Some(vec![0.75; 120]);
        h.key(KeyCode::Enter);
        assert_eq!(h.app.waveform, vec![0.75; 80]);
    }

    #[test]
    fn test_screen_follows_onboarding_flag() {
        let mut h = Harness::new(&["a"]);
        assert_eq!(h.app.screen(), Screen::Onboarding);
        h.app.has_completed_onboarding = true;
        assert_eq!(h.app.screen(), Screen::Library);
        assert!(h.render().contains("Discover Music"));
    }

    #[test]
    fn test_transport_keys() {
        let mut h = Harness::in_library(&["a", "b", "c"]);
        h.key(KeyCode::Enter);

        h.key(KeyCode::Char('n'));
        assert_eq!(h.app.engine.state().current_index, 1);
        assert_eq!(h.app.library.selected(), 1);
        h.key(KeyCode::Char('p'));
        h.key(KeyCode::Char('p'));
        assert_eq!(h.app.engine.state().current_index, 2);
        assert_eq!(h.app.library.selected(), 2);

        h.key(KeyCode::Char(' '));
        assert!(!h.app.engine.state().is_playing);
        h.key(KeyCode::Char('r'));
        assert!(h.app.engine.state().is_repeating);

        h.key(KeyCode::Right);
        h.key(KeyCode::Right);
        assert!((h.app.engine.state().playback_fraction - 0.1).abs() < 1e-9);
        h.key(KeyCode::Left);
        assert!((h.app.engine.state().position_secs - 10.).abs() < 1e-9);
    }

    #[test]
    fn test_list_click_loads_track() {
        let mut h = Harness::in_library(&["a", "b", "c"]);
        h.render();
        let list = h.app.hit.list;
        h.mouse(
            MouseEventKind::Down(LEFT),
            list.x + 3,
            list.y + 1 + 2 * ROWS_PER_ITEM,
            Instant::now(),
        );
        assert_eq!(h.app.engine.state().current_index, 2);
    }

    #[test]
    fn test_dragging_the_mini_sheet_up_expands_it() {
        let mut h = Harness::in_library(&["a", "b"]);
        h.key(KeyCode::Enter);
        h.render();
        let sheet = h.app.hit.sheet;
        assert_eq!(sheet.height, MINI_ROWS);

        let t0 = Instant::now();
        h.mouse(MouseEventKind::Down(LEFT), sheet.x + 4, sheet.y, t0);
        h.mouse(MouseEventKind::Drag(LEFT), sheet.x + 4, sheet.y - 3, t0);
        h.mouse(MouseEventKind::Drag(LEFT), sheet.x + 4, sheet.y - 6, t0);
        assert_eq!(h.app.sheet.drag_offset(), 60.);
        h.mouse(MouseEventKind::Up(LEFT), sheet.x + 4, sheet.y - 6, t0);
        assert!(h.app.sheet.is_expanded());

        h.app.sheet.advance(t0 + Duration::from_secs(1));
        assert_eq!(h.app.sheet.expansion_fraction(), 1.);
        assert_eq!(h.app.sheet.drag_offset(), 0.);
        h.render();
        assert_eq!(h.app.hit.sheet.height, 40);
    }

    #[test]
    fn test_short_drag_keeps_sheet_collapsed() {
        let mut h = Harness::in_library(&["a"]);
        h.key(KeyCode::Enter);
        h.render();
        let sheet = h.app.hit.sheet;

        let t0 = Instant::now();
        h.mouse(MouseEventKind::Down(LEFT), sheet.x + 4, sheet.y, t0);
        h.mouse(MouseEventKind::Drag(LEFT), sheet.x + 4, sheet.y - 3, t0);
        h.mouse(MouseEventKind::Up(LEFT), sheet.x + 4, sheet.y - 3, t0);
        assert!(!h.app.sheet.is_expanded());
        h.app.sheet.advance(t0 + Duration::from_secs(1));
        assert_eq!(h.app.sheet.drag_offset(), 0.);
    }

    #[test]
    fn test_scrubbing_previews_then_seeks() {
        let mut h = Harness::in_library(&["a"]);
        h.key(KeyCode::Enter);
        h.key(KeyCode::Char('k'));
        h.app.sheet.advance(Instant::now() + Duration::from_secs(1));
        let screen = h.render();
        assert!(screen.contains("3:20"));

        let wave = h.app.hit.waveform;
        assert!(wave.width > 1);
        let t0 = Instant::now();
        h.mouse(MouseEventKind::Down(LEFT), wave.x, wave.y, t0);
        h.mouse(MouseEventKind::Drag(LEFT), wave.x + wave.width - 1, wave.y, t0);
        assert_eq!(h.app.scrub, Some(1.));
        assert_eq!(h.app.engine.state().position_secs, 0., "not committed yet");

        h.mouse(MouseEventKind::Drag(LEFT), wave.x + (wave.width - 1) / 2, wave.y, t0);
        let preview = h.app.scrub.unwrap();
        assert!(h.render().contains(&format_time(preview * 200.)));

        h.mouse(MouseEventKind::Up(LEFT), wave.x, wave.y, t0);
        assert_eq!(h.app.scrub, None);
        assert!((h.app.engine.state().position_secs - preview * 200.).abs() < 1e-9);
    }

    #[test]
    fn test_quit() {
        let mut h = Harness::new(&["a"]);
        h.key(KeyCode::Char('q'));
        assert!(h.app.should_quit);
    }

    #[test]
    fn test_timeout_follows_poll_and_animation() {
        let mut h = Harness::in_library(&["a"]);
        assert_eq!(h.app.next_timeout(Instant::now()), IDLE);
        h.key(KeyCode::Enter);
        let now = Instant::now();
        assert!(h.app.next_timeout(now) <= Duration::from_millis(100));
        h.app.sheet.expand(now);
        assert_eq!(h.app.next_timeout(now), FRAME);
    }
}
