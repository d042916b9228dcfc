use agricontract_domain::Role;

use crate::intents::{Intent, ScreenAction};
use crate::navigator::NavEvent;

use super::{step_selection, Outcome};

#[derive(Debug, Default)]
pub struct RoleSelectionScreen {
    pub highlighted: usize,
}

impl RoleSelectionScreen {
    pub fn actions(&self) -> Vec<ScreenAction> {
        vec![
            ScreenAction::ChooseFarmer,
            ScreenAction::ChooseBuyer,
            ScreenAction::ToggleTheme,
        ]
    }

    pub fn highlighted_role(&self) -> Role {
        Role::ALL[self.highlighted.min(Role::ALL.len() - 1)]
    }

    pub fn handle(&mut self, intent: Intent) -> Outcome {
        match intent {
            Intent::SelectNext | Intent::Increase | Intent::FocusNext => {
                let next = step_selection(self.highlighted, Role::ALL.len(), true);
                Outcome::changed(std::mem::replace(&mut self.highlighted, next) != next)
            }
            Intent::SelectPrevious | Intent::Decrease | Intent::FocusPrevious => {
                let next = step_selection(self.highlighted, Role::ALL.len(), false);
                Outcome::changed(std::mem::replace(&mut self.highlighted, next) != next)
            }
            Intent::Submit => Outcome::Navigate(NavEvent::SelectRole(self.highlighted_role())),
            Intent::Action(ScreenAction::ChooseFarmer) => {
                Outcome::Navigate(NavEvent::SelectRole(Role::Farmer))
            }
            Intent::Action(ScreenAction::ChooseBuyer) => {
                Outcome::Navigate(NavEvent::SelectRole(Role::Buyer))
            }
            _ => Outcome::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_picks_the_highlighted_card() {
        let mut screen = RoleSelectionScreen::default();
        assert_eq!(screen.highlighted_role(), Role::Farmer);
        assert_eq!(screen.handle(Intent::SelectNext), Outcome::Updated);
        assert_eq!(screen.handle(Intent::SelectNext), Outcome::Unchanged);
        assert_eq!(
            screen.handle(Intent::Submit),
            Outcome::Navigate(NavEvent::SelectRole(Role::Buyer))
        );
    }

    #[test]
    fn role_shortcuts_select_directly() {
        let mut screen = RoleSelectionScreen::default();
        assert_eq!(
            screen.handle(Intent::Action(ScreenAction::ChooseBuyer)),
            Outcome::Navigate(NavEvent::SelectRole(Role::Buyer))
        );
    }
}
