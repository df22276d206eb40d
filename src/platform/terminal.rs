//! Terminal setup and teardown

use std::io::{self, Write};

use crossterm::{cursor, execute, terminal};

/// Raw mode on the alternate screen until dropped, including on unwind
pub struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    pub fn enter(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // Drop undoes whatever part of the setup succeeded
        let mut guard = Self { out };
        execute!(
            guard.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap
        )?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = execute!(
            self.out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap
        ) {
            log::error!("Failed to leave alternate screen: {}", e);
        }
        if let Err(e) = terminal::disable_raw_mode() {
            log::error!("Failed to disable raw mode: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_restores_screen() {
        let mut out = Vec::new();
        {
            let _guard = TerminalGuard { out: &mut out };
        }
        let text = String::from_utf8(out).unwrap();
        // Leave alternate screen, show cursor
        assert!(text.contains("\x1b[?1049l"));
        assert!(text.contains("\x1b[?25h"));
    }

    #[test]
    fn test_drop_during_unwind_restores_screen() {
        let mut out = Vec::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = TerminalGuard { out: &mut out };
            panic!("frame failed");
        }));
        assert!(result.is_err());
        assert!(String::from_utf8(out).unwrap().contains("\x1b[?1049l"));
    }
}
