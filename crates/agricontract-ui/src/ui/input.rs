//! Key bindings.
//!
//! Navigation keys are fixed. Screen actions get a letter: typed plainly on
//! screens without text entry, and with Ctrl on screens that take text.

use agricontract_app::frontend::ui_boundary::{Intent, Screen, ScreenAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(crate) const QUIT_KEY: char = 'q';

pub(crate) fn action_key(action: ScreenAction) -> char {
    match action {
        ScreenAction::GetStarted => 'g',
        ScreenAction::ToggleTheme => 't',
        ScreenAction::ChooseFarmer => 'f',
        ScreenAction::ChooseBuyer => 'b',
        ScreenAction::ToggleSignUp => 'u',
        ScreenAction::QuickDemo => 'd',
        ScreenAction::Logout => 'l',
        ScreenAction::OpenProducts => 'p',
        ScreenAction::OpenContracts => 'k',
        ScreenAction::OpenProfile => 'o',
        ScreenAction::OpenListProduct => 'n',
        ScreenAction::ToggleOfferForm => 'f',
        ScreenAction::AcceptOffer => 'a',
        ScreenAction::ToggleAgreement => 'a',
        ScreenAction::BackToNegotiation => 'n',
        ScreenAction::Sign => 's',
        ScreenAction::ProceedToPayment => 'p',
        ScreenAction::Download => 'w',
        ScreenAction::EditProfile => 'e',
        ScreenAction::SaveProfile => 's',
        ScreenAction::ReturnToDashboard => 'r',
    }
}

/// Label for an action key as shown in the footer.
pub(crate) fn action_key_label(action: ScreenAction, text_entry: bool) -> String {
    if text_entry {
        format!("^{}", action_key(action))
    } else {
        action_key(action).to_string()
    }
}

pub(crate) fn intent_for_key(key: KeyEvent, screen: &Screen) -> Option<Intent> {
    let text_entry = screen.accepts_text();
    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if control => Some(Intent::Quit),
        KeyCode::Char(ch) if control => {
            text_entry.then(|| find_action(screen, ch)).flatten()
        }
        KeyCode::Char(ch) if text_entry => Some(Intent::Insert(ch)),
        KeyCode::Char(QUIT_KEY) => Some(Intent::Quit),
        KeyCode::Char(ch) => find_action(screen, ch),
        KeyCode::Tab => Some(Intent::FocusNext),
        KeyCode::BackTab => Some(Intent::FocusPrevious),
        KeyCode::Up => Some(Intent::SelectPrevious),
        KeyCode::Down => Some(Intent::SelectNext),
        KeyCode::Right => Some(Intent::Increase),
        KeyCode::Left => Some(Intent::Decrease),
        KeyCode::Enter => Some(Intent::Submit),
        KeyCode::Esc => Some(Intent::Back),
        KeyCode::Backspace => Some(Intent::DeleteBackward),
        _ => None,
    }
}

fn find_action(screen: &Screen, ch: char) -> Option<Intent> {
    let ch = ch.to_ascii_lowercase();
    screen
        .actions()
        .into_iter()
        .find(|action| action_key(*action) == ch)
        .map(Intent::Action)
}
