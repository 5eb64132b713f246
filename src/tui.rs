use crate::tournament::Bracket;
use crate::types::AppResult;
use crate::ui::ui::Ui;
use crossterm::cursor::{Hide, Show};
use crossterm::event::KeyEvent;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle};
use ratatui::layout::Rect;
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::panic;

#[derive(Clone, Copy, Debug)]
pub enum TerminalEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

#[derive(Debug)]
pub struct Tui {
    pub terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl Tui {
    pub fn new() -> AppResult<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        let mut tui = Self { terminal };
        tui.init()?;
        Ok(tui)
    }

    fn init(&mut self) -> AppResult<()> {
        terminal::enable_raw_mode()?;

        crossterm::execute!(
            self.terminal.backend_mut(),
            EnterAlternateScreen,
            SetTitle("Chess cup"),
            Clear(ClearType::All),
            Hide
        )?;

        // Restore the terminal before the default hook prints the panic.
        let panic_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic| {
            if let Err(e) = Self::reset() {
                eprintln!("Failed to reset the terminal: {e}");
            }
            panic_hook(panic);
        }));

        Ok(())
    }

    fn reset() -> AppResult<()> {
        crossterm::execute!(
            io::stdout(),
            LeaveAlternateScreen,
            Clear(ClearType::All),
            Show
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, ui: &mut Ui, bracket: &Bracket, is_admin: bool) -> AppResult<()> {
        self.terminal
            .draw(|frame| ui.render(frame, bracket, is_admin))?;
        Ok(())
    }

    pub fn resize(&mut self, size: (u16, u16)) -> AppResult<()> {
        self.terminal.resize(Rect {
            x: 0,
            y: 0,
            width: size.0,
            height: size.1,
        })?;
        Ok(())
    }

    pub fn exit(&mut self) -> AppResult<()> {
        Self::reset()
    }
}
