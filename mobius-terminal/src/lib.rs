/// Terminal presentation shell for the Möbius strip viewer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use mobius_core::{ParamName, Session, StripParams};
use std::io::{self, stdout, Write};

pub mod canvas;
pub mod config;
pub mod headless;

pub use canvas::TerminalCanvas;
pub use config::{FileConfig, SortMode};
pub use headless::PolygonLog;

/// Rows reserved under the canvas for the parameter panel and key help
const PANEL_ROWS: u16 = 2;

/// What a key press asks the viewer to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Rotate(f64),
    /// Move a parameter slider by whole steps without rebuilding
    Nudge(ParamName, i32),
    Rebuild,
    Quit,
}

/// Key bindings: arrows rotate, letter pairs act as sliders
pub fn action_for(code: KeyCode, rotate_step: f64) -> Option<Action> {
    let action = match code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Left => Action::Rotate(-rotate_step),
        KeyCode::Right => Action::Rotate(rotate_step),
        KeyCode::Enter | KeyCode::Char(' ') => Action::Rebuild,
        KeyCode::Char('r') => Action::Nudge(ParamName::Radius, -1),
        KeyCode::Char('R') => Action::Nudge(ParamName::Radius, 1),
        KeyCode::Char('t') => Action::Nudge(ParamName::Twist, -1),
        KeyCode::Char('T') => Action::Nudge(ParamName::Twist, 1),
        KeyCode::Char('u') => Action::Nudge(ParamName::USteps, -1),
        KeyCode::Char('U') => Action::Nudge(ParamName::USteps, 1),
        KeyCode::Char('v') => Action::Nudge(ParamName::VSteps, -1),
        KeyCode::Char('V') => Action::Nudge(ParamName::VSteps, 1),
        _ => return None,
    };
    Some(action)
}

/// Main application struct for the interactive viewer
pub struct TerminalApp {
    session: Session,
    canvas: TerminalCanvas,
    rotate_step: f64,
    /// Parameters the current mesh was generated from
    built: StripParams,
    status: Option<String>,
    running: bool,
}

impl TerminalApp {
    pub fn new(session: Session, rotate_step: f64) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(session, rotate_step, width, height))
    }

    /// Build the app for a fixed terminal size
    pub fn with_size(session: Session, rotate_step: f64, width: u16, height: u16) -> Self {
        let viewport = session.renderer().viewport;
        let canvas = TerminalCanvas::new(
            width as usize,
            height.saturating_sub(PANEL_ROWS) as usize,
            2.0 * viewport.center_x,
            2.0 * viewport.center_y,
        );
        let built = *session.params();

        let mut app = Self {
            session,
            canvas,
            rotate_step,
            built,
            status: None,
            running: true,
        };
        app.session.redraw(&mut app.canvas);
        app
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn canvas(&self) -> &TerminalCanvas {
        &self.canvas
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True when slider edits are waiting for a rebuild
    pub fn has_pending_changes(&self) -> bool {
        *self.session.params() != self.built
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.present()?;

        // Every redraw happens synchronously in response to one event
        while self.running {
            match event::read()? {
                Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                    if let Some(action) = action_for(code, self.rotate_step) {
                        self.handle(action);
                    }
                }
                Event::Resize(width, height) => self.resize(width, height),
                _ => continue,
            }

            if self.running {
                self.present()?;
            }
        }

        Ok(())
    }

    pub fn handle(&mut self, action: Action) {
        match action {
            Action::Quit => {
                log::info!("quit requested");
                self.running = false;
            }
            Action::Rotate(delta) => {
                self.session.on_rotate(delta, &mut self.canvas);
            }
            Action::Rebuild => {
                self.session.on_rebuild_requested(&mut self.canvas);
                self.built = *self.session.params();
                self.status = None;
            }
            Action::Nudge(name, ticks) => {
                let current = self.session.params().get(name);
                let next = name.range().nudge(current, ticks);
                if let Err(e) = self.session.on_parameter_change(name, next) {
                    log::warn!("{e}");
                    self.status = Some(e.to_string());
                }
            }
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        let rows = height.saturating_sub(PANEL_ROWS) as usize;
        self.canvas.resize(width as usize, rows);
        self.session.redraw(&mut self.canvas);
    }

    /// One-line summary of the slider values
    pub fn panel_line(&self) -> String {
        let params = self.session.params();
        let pending = if self.has_pending_changes() {
            "  [Enter to rebuild]"
        } else {
            ""
        };
        format!(
            "{} {:.1} | {} {:.1} | {} {} | {} {} | angle {:.2}{}",
            ParamName::Radius.label(),
            params.radius,
            ParamName::Twist.label(),
            params.twist,
            ParamName::USteps.label(),
            params.u_steps,
            ParamName::VSteps.label(),
            params.v_steps,
            self.session.camera().angle(),
            pending,
        )
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.canvas.draw(&mut stdout)?;

        let help = match &self.status {
            Some(message) => message.clone(),
            None => "Left/Right=Rotate r/R t/T u/U v/V=Adjust Enter=Rebuild Q=Quit".to_string(),
        };
        queue!(
            stdout,
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(self.panel_line()),
            ResetColor,
            Print("\r\n"),
            terminal::Clear(ClearType::CurrentLine),
            Print(help),
        )?;

        stdout.flush()?;
        Ok(())
    }
}
