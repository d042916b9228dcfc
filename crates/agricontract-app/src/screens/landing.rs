use crate::intents::{Intent, ScreenAction};
use crate::navigator::NavEvent;

use super::Outcome;

#[derive(Debug, Default)]
pub struct LandingScreen;

impl LandingScreen {
    pub fn actions(&self) -> Vec<ScreenAction> {
        vec![ScreenAction::GetStarted]
    }

    pub fn handle(&mut self, intent: Intent) -> Outcome {
        match intent {
            Intent::Submit | Intent::Action(ScreenAction::GetStarted) => {
                Outcome::Navigate(NavEvent::GetStarted)
            }
            _ => Outcome::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_started_leads_to_role_selection() {
        let mut screen = LandingScreen;
        assert_eq!(
            screen.handle(Intent::Submit),
            Outcome::Navigate(NavEvent::GetStarted)
        );
        assert_eq!(screen.handle(Intent::Back), Outcome::Unchanged);
    }
}
