use std::io;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::config::Config;
use crate::dispatch::{self, Session};
use crate::matcher::Matcher;
use crate::render;
use crate::AppResult;

/// Block on one key at a time until Ctrl-C.
pub fn run(config: &Config, matcher: &dyn Matcher) -> AppResult<()> {
    let mut session = Session::new(config.capacity, config.initial_mode, config.delete_key);
    session.results = matcher.find(session.buffer.text(), session.mode);

    let (mut terminal, _guard) = setup_terminal()?;
    tracing::info!(mode = ?session.mode, capacity = config.capacity, "session started");
    terminal.draw(|frame| render::draw(frame, &session))?;

    loop {
        match event::read()? {
            Event::Key(key) => {
                if dispatch::is_interrupt(&key) {
                    break;
                }
                if session.handle_key(&key, matcher) {
                    terminal.draw(|frame| render::draw(frame, &session))?;
                }
            }
            Event::Resize(_, _) => {
                terminal.draw(|frame| render::draw(frame, &session))?;
            }
            _ => {}
        }
    }

    terminal.show_cursor()?;
    if session.buffer.is_empty() {
        tracing::info!(mode = ?session.mode, "session ended");
    } else {
        tracing::info!(query = session.buffer.text(), mode = ?session.mode, "session ended");
    }
    Ok(())
}

pub fn ensure_tty_stdin() -> AppResult<()> {
    #[cfg(unix)]
    {
        use std::io::IsTerminal;
        use std::os::unix::io::AsRawFd;

        if io::stdin().is_terminal() {
            return Ok(());
        }

        let tty = std::fs::File::open("/dev/tty")?;
        let result = unsafe { libc::dup2(tty.as_raw_fd(), libc::STDIN_FILENO) };
        if result == -1 {
            return Err(io::Error::last_os_error().into());
        }
    }
    Ok(())
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
    }
}

fn setup_terminal() -> AppResult<(Terminal<CrosstermBackend<io::Stderr>>, TerminalGuard)> {
    enable_raw_mode()?;
    let guard = TerminalGuard;
    execute!(io::stderr(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stderr());
    let terminal = Terminal::new(backend)?;
    Ok((terminal, guard))
}
