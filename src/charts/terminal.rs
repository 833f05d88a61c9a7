use std::io::{self, IsTerminal};
use std::panic;

use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::{draw::draw_chart, Chart, ChartRenderer};
use crate::error::{LensError, LensResult};
use crate::logging::{log_debug, log_error, log_info, log_panic_info};

/// Draws charts full-screen and waits for the user to dismiss them.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    hook_installed: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn install_panic_hook(&mut self) {
        if self.hook_installed {
            return;
        }
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            log_panic_info(panic_info);
            original_hook(panic_info);
        }));
        self.hook_installed = true;
    }
}

impl ChartRenderer for TerminalRenderer {
    fn render(&mut self, chart: &Chart) -> LensResult<()> {
        if !io::stdout().is_terminal() {
            return Err(LensError::Terminal(
                "standard output is not a terminal, cannot display the chart".to_string(),
            ));
        }

        log_info(&format!("Rendering chart '{}'", chart.title()));
        self.install_panic_hook();

        let _guard = TerminalGuard::acquire()?;
        let result = enter_and_show(chart);
        if let Err(e) = &result {
            log_error(&format!("Chart rendering failed: {}", e));
        }

        log_info("Chart dismissed");
        result.map_err(LensError::from)
    }
}

/// Raw mode for as long as the guard lives. Dropping it, including on an
/// early `?` during setup, runs the restore function.
pub struct TerminalGuard {
    restore: fn() -> io::Result<()>,
}

impl TerminalGuard {
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self::with_restore(restore_terminal))
    }

    pub fn with_restore(restore: fn() -> io::Result<()>) -> Self {
        Self { restore }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = (self.restore)() {
            log_error(&format!("Failed to restore terminal: {}", e));
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen, Show);
    raw.and(screen)
}

fn enter_and_show(chart: &Chart) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor()?;
    show_until_dismissed(&mut terminal, chart)
}

fn show_until_dismissed(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    chart: &Chart,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw_chart(f, chart))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                log_debug(&format!("Key pressed: {:?}", key.code));
                if is_dismiss_key(&key) {
                    return Ok(());
                }
            }
            // Resize and everything else just redraws
            _ => {}
        }
    }
}

pub fn is_dismiss_key(key: &KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter)
}
