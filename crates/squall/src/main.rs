use std::{
    path::Path,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::{Line, Span},
};
use squall_config::Settings;
use squall_core::{AnimationState, FieldConfig, MAX_DIRECTION, MIN_DIRECTION};
use squall_field::FieldRun;
use tracing::{info, warn};

mod chars;
mod logging;
mod render;

/// Degrees added or removed per arrow key press.
const DIRECTION_STEP: i32 = 5;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let settings = Settings::load()?;
    // the log level comes from the settings, so loading is reported afterwards
    let log_path = logging::init(settings.log_level)?;
    let config_path = squall_config::config_path();
    info!(
        log = ?log_path,
        config = ?config_path,
        found = config_path.as_deref().is_some_and(Path::exists),
        "squall starting"
    );

    let app = App::new(settings)?;
    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Settings, kept in sync with the field so they can be saved.
    settings: Settings,
    /// The particle field being animated.
    run: FieldRun<StdRng>,
    /// Message shown in place of the field summary.
    status: Option<String>,
}

impl App {
    /// Construct a new instance of [`App`].
    ///
    /// Out of range field settings are reported and replaced by defaults.
    pub fn new(mut settings: Settings) -> color_eyre::Result<Self> {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut status = None;
        if let Err(err) = settings.field.validate() {
            warn!(%err, "invalid field settings, using defaults");
            status = Some(format!("{err}, using defaults"));
            settings.field = FieldConfig::default();
        }

        Ok(Self {
            running: false,
            run: FieldRun::new(settings.field, rng)?,
            settings,
            status,
        })
    }

    /// Run the application's main loop.
    ///
    /// Acts as the frame scheduler: the field is stepped once per frame
    /// interval while input is polled in between.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.run.start()?;

        let interval = self.settings.frame_interval();
        let mut next_frame = Instant::now();

        while self.running {
            let size = terminal.size()?;
            self.run
                .surface_ready(render::field_bounds(size.width, size.height))?;
            terminal.draw(|frame| self.render(frame))?;

            self.handle_crossterm_events(next_frame.saturating_duration_since(Instant::now()))?;

            let now = Instant::now();
            if now >= next_frame {
                self.run.tick();
                next_frame += interval;
                // fell behind, do not try to catch up
                if next_frame < now {
                    next_frame = now + interval;
                }
            }
        }
        info!("squall exiting");
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        render::render_field(frame, area, self.run.field());

        let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(area);
        let color = Color::Cyan;

        let summary = match &self.status {
            Some(message) => message.clone(),
            None => {
                let config = self.run.config();
                format!(
                    "{} {}° speed {:.0} {:?}",
                    config.kind.name(),
                    config.direction,
                    config.speed,
                    self.run.state()
                )
            }
        };

        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "space".bold().fg(color),
            " pause  ".dark_gray(),
            "s".bold().fg(color),
            " start/stop  ".dark_gray(),
            "k".bold().fg(color),
            " kind  ".dark_gray(),
            "←→".bold().fg(color),
            " direction  ".dark_gray(),
            "↑↓".bold().fg(color),
            " speed  ".dark_gray(),
            "w".bold().fg(color),
            " save  ".dark_gray(),
            Span::raw(summary).fg(color),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so the next frame is not delayed.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                // picked up by surface_ready on the next frame
                Event::Resize(_, _) => {}
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
            (_, KeyCode::Char(' ')) => self.toggle_pause(),
            (_, KeyCode::Char('s')) => self.toggle_stop(),
            (_, KeyCode::Char('k')) => self.update_field(|c| c.kind = c.kind.next()),
            (_, KeyCode::Left) => self.update_field(|c| {
                c.direction = (c.direction - DIRECTION_STEP).max(MIN_DIRECTION)
            }),
            (_, KeyCode::Right) => self.update_field(|c| {
                c.direction = (c.direction + DIRECTION_STEP).min(MAX_DIRECTION)
            }),
            (_, KeyCode::Up) => self.update_field(|c| c.speed += 1.0),
            (_, KeyCode::Down) => self.update_field(|c| c.speed = (c.speed - 1.0).max(0.0)),
            (_, KeyCode::Char('w')) => self.save_settings(),
            _ => {}
        }
    }

    /// Pause a playing field or resume a paused one.
    fn toggle_pause(&mut self) {
        match self.run.state() {
            AnimationState::Play => self.run.pause(),
            AnimationState::Pause => self.run.resume(),
            AnimationState::Stop => {}
        }
    }

    /// Start a stopped field or stop a running one.
    fn toggle_stop(&mut self) {
        if self.run.state() == AnimationState::Stop {
            if let Err(err) = self.run.start() {
                warn!(%err, "failed to start field");
                self.status = Some(err.to_string());
            }
        } else {
            self.run.stop();
        }
    }

    /// Apply a change to the field configuration, respawning it in its previous state.
    fn update_field(&mut self, change: impl FnOnce(&mut FieldConfig)) {
        let mut config = self.settings.field;
        change(&mut config);

        let previous = self.run.state();
        if let Err(err) = self.run.reconfigure(config) {
            self.status = Some(err.to_string());
            return;
        }
        self.settings.field = config;
        self.status = None;

        if previous == AnimationState::Stop {
            return;
        }
        if let Err(err) = self.run.start() {
            warn!(%err, "failed to restart field");
            self.status = Some(err.to_string());
            return;
        }
        if previous == AnimationState::Pause {
            self.run.pause();
        }
    }

    /// Write the current settings to the config file.
    fn save_settings(&mut self) {
        match self.settings.save() {
            Ok(path) => {
                info!(path = %path.display(), "settings saved");
                self.status = Some(format!("saved to {}", path.display()));
            }
            Err(err) => {
                warn!(%err, "failed to save settings");
                self.status = Some(err.to_string());
            }
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
