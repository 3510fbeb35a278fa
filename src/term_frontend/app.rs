use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use crossterm::cursor;
use crossterm::queue;
use crossterm::event;
use crossterm::style::Print;
use crate::session::State;
use std::io::Write;
use std::io::stdout;
use std::time::Duration;

// puts the terminal back however the loop exits
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = queue!(stdout(), Print("\r\n"), terminal::EnableLineWrap);
        let _ = stdout().flush();
        let _ = terminal::disable_raw_mode();
    }
}

pub fn crossterm_main(mut state: State) -> std::io::Result<()> {
    let _guard = RawModeGuard::enable()?;

    queue!(stdout(),
        terminal::DisableLineWrap,
        cursor::SavePosition,
        cursor::EnableBlinking,
        Print(state.display()),
    )?;
    stdout().flush()?;

    while !state.exiting {
        queue!(stdout(),
            cursor::RestorePosition,
            terminal::Clear(terminal::ClearType::CurrentLine)
        )?;

        if event::poll(Duration::from_millis(1000)).unwrap_or(false) {
            if let Ok(event::Event::Key(key)) = event::read() {
                if key.kind != KeyEventKind::Release {
                    handle_key(&mut state, key);
                }
            }
        }

        queue!(stdout(),
            Print(state.display())
        )?;
        stdout().flush()?;
    }
    Ok(())
}

fn handle_key(state: &mut State, key: KeyEvent) {
    // raw mode swallows SIGINT
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d')) {
            state.exiting = true;
        }
        return;
    }
    match key.code {
        KeyCode::Char(char) => {
            if char == ':' && state.command.is_none() {
                state.enter_command_entry(String::new());
                return;
            }
            state.type_string(char.to_string().as_str())
        },
        KeyCode::Backspace => state.delete_one(),
        KeyCode::Tab => state.switch_field(),
        KeyCode::Enter => {
            if state.command.is_some() {
                state.execute_command()
            } else {
                state.convert();
            }
        },
        KeyCode::Esc => {
            if state.command.is_some() {
                state.enter_field_entry()
            } else {
                state.exiting = true;
            }
        },
        _ => {}
    }
}
