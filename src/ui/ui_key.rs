use crossterm::event::KeyCode;

pub const QUIT: KeyCode = KeyCode::Char('q');
pub const ESC: KeyCode = KeyCode::Esc;

pub const NEXT_SELECTION: KeyCode = KeyCode::Down;
pub const PREVIOUS_SELECTION: KeyCode = KeyCode::Up;

pub const PICK_FIRST_PLAYER: KeyCode = KeyCode::Char('1');
pub const PICK_SECOND_PLAYER: KeyCode = KeyCode::Char('2');

pub const ADMIN_LOGIN: KeyCode = KeyCode::Char('a');
pub const ADMIN_LOGOUT: KeyCode = KeyCode::Char('l');

pub const YES_TO_DIALOG: KeyCode = KeyCode::Enter;
