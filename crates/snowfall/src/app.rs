//! Terminal application loop.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Rect, Size},
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::Line,
};
use snowfall_config::{Config, MarkerKind};
use snowfall_core::{AnimationSpeed, Bounds, Simulation};
use snowfall_render::{CELL_HEIGHT_PX, CELL_WIDTH_PX, SnowfallRenderer, viewport_size};

use crate::driver::Snowfall;
use crate::frame_source::{Capabilities, FrameSource, FrameTiming};

/// Poll timeout while paused.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Whether the screen must be redrawn without a new frame.
    dirty: bool,
    /// Animation driver.
    snowfall: Snowfall,
    /// Flake renderer.
    renderer: SnowfallRenderer,
    /// Where the speed choice is persisted on exit.
    config_path: Option<PathBuf>,
    /// Speed the app started with.
    initial_speed: AnimationSpeed,
}

impl App {
    /// Construct a new instance of [`App`] for a terminal of `size` cells.
    pub fn new(
        config: &Config,
        config_path: Option<PathBuf>,
        caps: Capabilities,
        size: Size,
    ) -> color_eyre::Result<Self> {
        let (width, height) =
            viewport_size(size.width, size.height).unwrap_or((CELL_WIDTH_PX, CELL_HEIGHT_PX));
        let bounds = Bounds::new(width, height)?;
        let simulation = match config.seed {
            Some(seed) => Simulation::seeded(config.flakes, bounds, config.spawn, seed)?,
            None => Simulation::with_params(config.flakes, bounds, config.spawn)?,
        };

        let timing = FrameTiming {
            frame_budget: Duration::from_millis(config.frame_budget_ms),
            interval: Duration::from_millis(config.interval_ms),
        };
        let frames = FrameSource::select(config.frame_source, caps, timing);

        Ok(Self {
            running: false,
            dirty: true,
            snowfall: Snowfall::new(simulation, frames, config.speed),
            renderer: SnowfallRenderer::new(config.background, marker(config.marker)),
            config_path,
            initial_speed: config.speed,
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.snowfall.start();
        while self.running {
            let produced = self.snowfall.tick(Instant::now()).is_some();
            if produced || self.dirty {
                terminal.draw(|frame| self.render(frame))?;
                self.dirty = false;
            }
            self.handle_crossterm_events()?;
        }
        self.snowfall.stop();
        self.persist_speed();
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let simulation = self.snowfall.simulation();
        self.renderer
            .render(frame, area, &simulation.snapshot(), simulation.bounds());

        if area.height == 0 {
            return;
        }
        let color = Color::Gray;
        let state = if self.snowfall.is_running() {
            "running"
        } else {
            "paused"
        };
        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "space".bold().fg(color),
            format!(" {state}  ").dark_gray(),
            "s".bold().fg(color),
            format!(" speed: {}  ", self.snowfall.speed().name()).dark_gray(),
            "r".bold().fg(color),
            " reset".dark_gray(),
        ])
        .style(Style::new().bg(self.renderer.background()))
        .centered();
        let help_area = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        frame.render_widget(help, help_area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits no longer than the time left until the next frame.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self
            .snowfall
            .time_until_next(Instant::now())
            .unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(width, height) => self.on_resize(width, height),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ')) => self.snowfall.toggle(),
            (_, KeyCode::Char('s')) => {
                self.snowfall.cycle_speed();
            }
            (_, KeyCode::Char('r')) => self.snowfall.reset(),
            _ => return,
        }
        self.dirty = true;
    }

    /// Forward the new terminal size to the simulation.
    fn on_resize(&mut self, width: u16, height: u16) {
        match viewport_size(width, height) {
            Some((w, h)) => {
                self.snowfall.resize(w, h);
            }
            None => warn!("ignoring resize to {width}x{height} cells"),
        }
        self.dirty = true;
    }

    /// Save the speed into an existing config file if it was changed during
    /// the session. No file is created.
    fn persist_speed(&self) {
        let speed = self.snowfall.speed();
        if speed == self.initial_speed {
            return;
        }
        let Some(path) = self.config_path.as_deref().filter(|path| path.is_file()) else {
            debug!("no config file, speed {} not saved", speed.name());
            return;
        };
        // Reload so command line overrides are not written back.
        let saved = Config::load_from(path).and_then(|mut config| {
            config.speed = speed;
            config.save_to(path)
        });
        if let Err(e) = saved {
            warn!("could not save speed to {}: {e}", path.display());
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Map the configured glyph set to a canvas marker.
fn marker(kind: MarkerKind) -> Marker {
    match kind {
        MarkerKind::Braille => Marker::Braille,
        MarkerKind::Dot => Marker::Dot,
        MarkerKind::Block => Marker::Block,
        MarkerKind::HalfBlock => Marker::HalfBlock,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn app(config: &Config) -> App {
        let caps = Capabilities { interactive: false };
        App::new(config, None, caps, Size::new(20, 10)).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_app_creation() {
        let config = Config {
            flakes: 25,
            seed: Some(1),
            ..Default::default()
        };
        let app = app(&config);
        assert_eq!(app.snowfall.simulation().len(), 25);
        assert_eq!(app.snowfall.bounds(), Bounds::new(160.0, 160.0).unwrap());
        assert_eq!(app.snowfall.frame_source().name(), "interval");
    }

    #[test]
    fn test_zero_sized_terminal_still_starts() {
        let caps = Capabilities { interactive: true };
        let app = App::new(&Config::default(), None, caps, Size::new(0, 0)).unwrap();
        assert_eq!(app.snowfall.bounds(), Bounds::new(8.0, 16.0).unwrap());
        assert_eq!(app.snowfall.frame_source().name(), "native");
    }

    #[test]
    fn test_key_events() {
        let mut app = app(&Config::default());
        app.running = true;
        app.snowfall.start();

        app.on_key_event(key(KeyCode::Char(' ')));
        assert!(!app.snowfall.is_running());
        app.on_key_event(key(KeyCode::Char(' ')));
        assert!(app.snowfall.is_running());

        app.on_key_event(key(KeyCode::Char('s')));
        assert_eq!(app.snowfall.speed(), AnimationSpeed::Fast);

        app.on_key_event(key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_resize_updates_bounds() {
        let mut app = app(&Config::default());
        app.on_resize(40, 20);
        assert_eq!(app.snowfall.bounds(), Bounds::new(320.0, 320.0).unwrap());
        app.on_resize(0, 20);
        assert_eq!(app.snowfall.bounds(), Bounds::new(320.0, 320.0).unwrap());
    }

    #[test]
    fn test_render_draws_help_line() {
        let mut app = app(&Config {
            seed: Some(4),
            ..Default::default()
        });
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let last_row: String = (0..60).map(|x| buffer[(x, 9)].symbol()).collect();
        assert!(last_row.contains("quit"), "{last_row}");
        assert!(last_row.contains("speed: medium"), "{last_row}");
    }

    #[test]
    fn test_speed_not_persisted_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let caps = Capabilities { interactive: false };
        let mut app = App::new(&Config::default(), Some(path.clone()), caps, Size::new(20, 10))
            .unwrap();

        app.on_key_event(key(KeyCode::Char('s')));
        app.persist_speed();

        assert!(!path.exists());
    }

    #[test]
    fn test_speed_persisted_into_existing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "flakes = 5\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        let caps = Capabilities { interactive: false };
        let mut app = App::new(&config, Some(path.clone()), caps, Size::new(20, 10)).unwrap();

        app.on_key_event(key(KeyCode::Char('s')));
        app.persist_speed();

        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.speed, AnimationSpeed::Fast);
        assert_eq!(saved.flakes, 5);
    }

    #[test]
    fn test_marker_mapping() {
        assert_eq!(marker(MarkerKind::Braille), Marker::Braille);
        assert_eq!(marker(MarkerKind::HalfBlock), Marker::HalfBlock);
    }
}
