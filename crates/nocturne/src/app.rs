//! The terminal application: event loop, input delivery and drawing.

use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use log::debug;
use nocturne_config::Config;
use nocturne_sky::{CellCanvas, Debounce, Scheduler, SkyEvent, Surface};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::Line,
    widgets::Paragraph,
};

use crate::frame_clock::FrameClock;

/// How long to wait for input when nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Accent color for key hints.
const ACCENT: Color = Color::Cyan;

type Sky = Scheduler<CellCanvas, FrameClock>;

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    /// The starfield, absent if it refused to start.
    sky: Option<Sky>,
    /// Pending terminal size in cells.
    resize: Debounce<(u16, u16)>,
    /// Pending mouse position in cells.
    pointer: Debounce<(u16, u16)>,
    show_help: bool,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        Self {
            running: false,
            resize: Debounce::new(config.display.resize_debounce()),
            pointer: Debounce::new(config.display.pointer_throttle()),
            show_help: config.display.show_help,
            sky: None,
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.sky = self.start_sky(size.width, size.height);
        self.running = true;

        while self.running {
            let now = Instant::now();
            self.flush_input(now);
            self.run_due_frame(now);
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }

        if let Some(sky) = self.sky.as_mut() {
            sky.destroy();
        }
        Ok(())
    }

    /// Start the sky on a canvas covering `columns × rows` cells.
    ///
    /// A zero-sized terminal offers no surface; the app then runs without a
    /// sky until a usable resize arrives.
    fn start_sky(&self, columns: u16, rows: u16) -> Option<Sky> {
        let display = &self.config.display;
        let surface = (columns > 0 && rows > 0).then(|| {
            CellCanvas::new(columns, rows, display.cell_width_px, display.cell_height_px)
        });
        let host = FrameClock::new(display.frame_interval());
        Scheduler::initialize(surface, host, self.config.sky.clone()).ok()
    }

    /// Deliver debounced resize and pointer input that has settled.
    fn flush_input(&mut self, now: Instant) {
        if let Some((columns, rows)) = self.resize.poll(now) {
            self.apply_resize(columns, rows);
        }
        if let Some((column, row)) = self.pointer.poll(now) {
            self.apply_pointer(column, row);
        }
    }

    fn apply_resize(&mut self, columns: u16, rows: u16) {
        let Some(sky) = self.sky.as_mut() else {
            self.sky = self.start_sky(columns, rows);
            return;
        };
        sky.surface_mut().resize(columns, rows);
        let (width, height) = sky.surface().size();
        if let Err(err) = sky.handle(SkyEvent::Resized { width, height }) {
            debug!("resize to {columns}x{rows} cells not applied: {err}");
        }
    }

    fn apply_pointer(&mut self, column: u16, row: u16) {
        let Some(sky) = self.sky.as_mut() else {
            return;
        };
        let position = sky.surface().cell_center(column, row);
        let event = SkyEvent::PointerMoved {
            x: position.x,
            y: position.y,
        };
        if let Err(err) = sky.handle(event) {
            debug!("pointer move not applied: {err}");
        }
    }

    /// Fire the sky's frame callback if it is due.
    fn run_due_frame(&mut self, now: Instant) {
        let Some(sky) = self.sky.as_mut() else {
            return;
        };
        if let Some(request) = sky.host_mut().take_due(now) {
            sky.on_frame(request);
        }
    }

    /// Time until the next frame or settled input, whichever comes first.
    fn poll_timeout(&self, now: Instant) -> Duration {
        let frame = self.sky.as_ref().and_then(|sky| sky.host().deadline());
        [frame, self.resize.deadline(), self.pointer.deadline()]
            .into_iter()
            .flatten()
            .min()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(IDLE_POLL)
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if let Some(sky) = &self.sky {
            frame.render_widget(Paragraph::new(sky.surface().to_lines()), area);
        }

        if self.show_help {
            let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(area);
            let help = Line::from(vec![
                "q".bold().fg(ACCENT),
                " quit  ".dark_gray(),
                "r".bold().fg(ACCENT),
                " reseed  ".dark_gray(),
                "h".bold().fg(ACCENT),
                " hide help".dark_gray(),
            ])
            .centered();
            frame.render_widget(help, chunks[1]);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits no longer than the next scheduled frame.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self.poll_timeout(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse, Instant::now()),
                Event::Resize(columns, rows) => self.resize.push((columns, rows), Instant::now()),
                _ => {}
            }
        }
        Ok(())
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent, now: Instant) {
        if let MouseEventKind::Moved | MouseEventKind::Drag(_) = mouse.kind {
            self.pointer.push((mouse.column, mouse.row), now);
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('h')) => self.show_help = !self.show_help,
            (_, KeyCode::Char('r')) => self.reseed(),
            _ => {}
        }
    }

    /// Rebuild the sky from fresh entropy.
    fn reseed(&mut self) {
        if let Some(sky) = self.sky.as_mut() {
            if let Err(err) = sky.reseed(None) {
                debug!("reseed not applied: {err}");
            }
        }
    }

    /// Stop the sky and set running to false to quit the application.
    fn quit(&mut self) {
        if let Some(sky) = self.sky.as_mut() {
            sky.destroy();
        }
        self.running = false;
    }
}
