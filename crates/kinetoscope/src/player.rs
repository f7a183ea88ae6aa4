//! Interactive terminal playback.
//!
//! [`Player`] loops the animation at its nominal frame interval and redraws
//! a [`TerminalCanvas`] sized to the terminal until the viewer presses `q`,
//! `Esc` or `Ctrl+C`.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    disable_raw_mode, enable_raw_mode,
};
use crossterm::{execute, queue};
use scene::TerminalCanvas;
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::animation::Animation;

/// Size used when the terminal size is unknown.
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Player error.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// I/O error during terminal operations.
    #[error("terminal io error: {0}")]
    Io(#[from] io::Error),

    /// Failed to enable raw mode.
    #[error("failed to {action} raw mode: {source}")]
    RawMode {
        action: &'static str,
        #[source]
        source: io::Error,
    },

    /// Failed to enter the alternate screen.
    #[error("failed to {action} alternate screen: {source}")]
    AltScreen {
        action: &'static str,
        #[source]
        source: io::Error,
    },

    /// Failed to poll for terminal events.
    #[error("failed to poll terminal events: {0}")]
    EventPoll(io::Error),

    /// Failed to draw a frame.
    #[error("failed to render frame: {0}")]
    Render(io::Error),
}

/// Playback options.
#[derive(Debug, Clone)]
pub struct PlayerOptions {
    pub alt_screen: bool,
    /// Skip raw mode and event polling; the caller owns the terminal.
    pub custom_io: bool,
    pub colored: bool,
    pub frame_interval: Duration,
    /// Stop after this many frames instead of looping until closed.
    pub max_frames: Option<u64>,
    /// Canvas size; defaults to the terminal size.
    pub size: Option<(u16, u16)>,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            alt_screen: false,
            custom_io: false,
            colored: true,
            frame_interval: Duration::from_millis(17),
            max_frames: None,
            size: None,
        }
    }
}

/// Plays an animation in the terminal.
///
/// ```rust,no_run
/// use kinetoscope::{Animation, BallisticConfig, Player};
///
/// let animation = Animation::ballistic(&BallisticConfig::default());
/// let animation = Player::new(animation).with_alt_screen().run()?;
/// # Ok::<(), kinetoscope::PlayerError>(())
/// ```
#[derive(Debug)]
pub struct Player {
    animation: Animation,
    options: PlayerOptions,
}

impl Player {
    /// A player pacing frames by the animation's playback settings.
    pub fn new(animation: Animation) -> Self {
        let frame_interval = Duration::from_millis(animation.playback().frame_interval_ms);
        Self {
            animation,
            options: PlayerOptions {
                frame_interval,
                ..PlayerOptions::default()
            },
        }
    }

    pub fn with_alt_screen(mut self) -> Self {
        self.options.alt_screen = true;
        self
    }

    /// Leave raw mode and input to the caller.
    pub fn with_custom_io(mut self) -> Self {
        self.options.custom_io = true;
        self
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.options.frame_interval = interval;
        self
    }

    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.options.max_frames = Some(frames);
        self
    }

    pub fn with_size(mut self, cols: u16, rows: u16) -> Self {
        self.options.size = Some((cols, rows));
        self
    }

    pub fn colored(mut self, colored: bool) -> Self {
        self.options.colored = colored;
        self
    }

    pub const fn options(&self) -> &PlayerOptions {
        &self.options
    }

    /// Plays on stdout until closed and returns the animation.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up or written.
    pub fn run(self) -> Result<Animation, PlayerError> {
        self.run_with_writer(io::stdout())
    }

    /// Plays on `writer` until closed and returns the animation.
    ///
    /// The terminal is restored on every exit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up or written.
    pub fn run_with_writer<W: Write>(mut self, mut writer: W) -> Result<Animation, PlayerError> {
        let options = self.options.clone();
        info!(animation = self.animation.name(), "starting interactive view");

        let result = self
            .setup(&mut writer)
            .and_then(|()| self.event_loop(&mut writer));

        let _ = execute!(writer, Show);
        if options.alt_screen {
            let _ = execute!(writer, LeaveAlternateScreen);
        }
        if !options.custom_io {
            let _ = disable_raw_mode();
        }

        result.map(|()| self.animation)
    }

    fn setup<W: Write>(&self, writer: &mut W) -> Result<(), PlayerError> {
        if !self.options.custom_io {
            enable_raw_mode().map_err(|source| PlayerError::RawMode {
                action: "enable",
                source,
            })?;
        }
        if self.options.alt_screen {
            execute!(writer, EnterAlternateScreen).map_err(|source| PlayerError::AltScreen {
                action: "enter",
                source,
            })?;
        }
        execute!(
            writer,
            Hide,
            SetTitle(self.animation.window_title()),
            Clear(ClearType::All)
        )?;
        Ok(())
    }

    fn event_loop<W: Write>(&mut self, writer: &mut W) -> Result<(), PlayerError> {
        let frames = self.animation.frame_count().max(1);
        let mut size = self.initial_size();
        let mut frame = 0;
        let mut shown: u64 = 0;
        debug!(frames, ?size, interval = ?self.options.frame_interval, "playback loop");

        loop {
            if self.options.max_frames.is_some_and(|max| shown >= max) {
                return Ok(());
            }

            let deadline = Instant::now() + self.options.frame_interval;
            self.animation.render_frame(frame);
            trace!(frame, "drawing frame");
            self.draw(writer, size).map_err(PlayerError::Render)?;

            shown += 1;
            frame = (frame + 1) % frames;

            if self.options.custom_io {
                thread::sleep(deadline.saturating_duration_since(Instant::now()));
                continue;
            }

            loop {
                let timeout = deadline.saturating_duration_since(Instant::now());
                if !event::poll(timeout).map_err(PlayerError::EventPoll)? {
                    break;
                }
                match event::read().map_err(PlayerError::EventPoll)? {
                    Event::Key(key) if key.kind == KeyEventKind::Press && is_quit(key) => {
                        info!("view closed");
                        return Ok(());
                    }
                    Event::Resize(cols, rows) => {
                        size = (cols, rows);
                        execute!(writer, Clear(ClearType::All)).map_err(PlayerError::Render)?;
                    }
                    _ => {}
                }
                if timeout.is_zero() {
                    break;
                }
            }
        }
    }

    fn initial_size(&self) -> (u16, u16) {
        if let Some(size) = self.options.size {
            return size;
        }
        if self.options.custom_io {
            return FALLBACK_SIZE;
        }
        terminal::size().unwrap_or(FALLBACK_SIZE)
    }

    fn draw<W: Write>(&self, writer: &mut W, (cols, rows): (u16, u16)) -> io::Result<()> {
        let canvas = TerminalCanvas::new(cols, rows).colored(self.options.colored);
        for (row, line) in (0..rows).zip(canvas.render_lines(self.animation.scene())) {
            queue!(writer, MoveTo(0, row))?;
            write!(writer, "{line}")?;
        }
        writer.flush()
    }
}

fn is_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BallisticConfig, LissajousConfig};

    fn headless(animation: Animation) -> Player {
        Player::new(animation)
            .with_custom_io()
            .with_frame_interval(Duration::ZERO)
            .with_size(60, 20)
            .colored(false)
    }

    #[test]
    fn interval_comes_from_playback_settings() {
        let player = Player::new(Animation::ballistic(&BallisticConfig::default()));
        assert_eq!(player.options().frame_interval, Duration::from_millis(17));
        assert!(!player.options().alt_screen);
    }

    #[test]
    fn plays_requested_frames() {
        let mut out = Vec::new();
        let animation = headless(Animation::ballistic(&BallisticConfig::default()))
            .with_max_frames(3)
            .run_with_writer(&mut out)
            .unwrap();

        assert_eq!(animation.current_frame(), Some(2));
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Ballistic trajectories"));
    }

    #[test]
    fn loops_past_the_last_frame() {
        let mut config = LissajousConfig::default();
        config.playback.frames = 3;
        let animation = headless(Animation::lissajous(&config))
            .with_max_frames(5)
            .run_with_writer(io::sink())
            .unwrap();
        assert_eq!(animation.current_frame(), Some(1));
    }

    #[test]
    fn hides_and_restores_cursor() {
        let mut out = Vec::new();
        headless(Animation::lissajous(&LissajousConfig::default()))
            .with_alt_screen()
            .with_max_frames(1)
            .run_with_writer(&mut out)
            .unwrap();

        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("\u{1b}[?25l"));
        assert!(text.contains("\u{1b}[?25h"));
        assert!(text.contains("\u{1b}[?1049h"));
        assert!(text.contains("\u{1b}[?1049l"));
        assert!(text.contains("Pytronix"));
    }

    #[test]
    fn zero_frames_draws_nothing() {
        let mut out = Vec::new();
        let animation = headless(Animation::ballistic(&BallisticConfig::default()))
            .with_max_frames(0)
            .run_with_writer(&mut out)
            .unwrap();
        assert_eq!(animation.current_frame(), None);
    }

    #[test]
    fn quit_keys() {
        let key = |code, modifiers| KeyEvent::new(code, modifiers);
        assert!(is_quit(key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(key(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
