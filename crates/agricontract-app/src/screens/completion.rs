use agricontract_domain::{CompletionRecord, User};

use crate::intents::{Intent, ScreenAction};
use crate::navigator::Destination;

use super::{back_to_dashboard, Outcome};

#[derive(Debug)]
pub struct CompletionScreen {
    pub user: User,
    pub record: CompletionRecord,
}

impl CompletionScreen {
    pub fn new(user: User, record: CompletionRecord) -> Self {
        Self { user, record }
    }

    pub fn actions(&self) -> Vec<ScreenAction> {
        vec![ScreenAction::ReturnToDashboard, ScreenAction::OpenProfile]
    }

    pub fn handle(&mut self, intent: Intent) -> Outcome {
        match intent {
            Intent::Action(ScreenAction::ReturnToDashboard) | Intent::Submit | Intent::Back => {
                back_to_dashboard()
            }
            Intent::Action(ScreenAction::OpenProfile) => Outcome::navigate(Destination::Profile),
            _ => Outcome::Unchanged,
        }
    }
}
