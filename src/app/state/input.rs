use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    TogglePause,
    Regrow,
    CycleMotion,
    ToggleHud,
}

pub(crate) fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&'c'))
    {
        return Some(Command::Quit);
    }
    if key.code == KeyCode::Esc {
        return Some(Command::Quit);
    }
    match command_char(key)? {
        'q' => Some(Command::Quit),
        ' ' => Some(Command::TogglePause),
        'r' => Some(Command::Regrow),
        'm' => Some(Command::CycleMotion),
        'h' => Some(Command::ToggleHud),
        _ => None,
    }
}

fn command_char(key: KeyEvent) -> Option<char> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    {
        return None;
    }
    if let KeyCode::Char(ch) = key.code {
        Some(ch.to_ascii_lowercase())
    } else {
        None
    }
}
