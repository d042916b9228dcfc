use agricontract_domain::{mock_contracts, Contract, User};

use crate::forms::TextInput;
use crate::intents::Intent;
use crate::navigator::Destination;

use super::{back_to_dashboard, step_selection, Outcome};

#[derive(Debug)]
pub struct ContractsScreen {
    pub user: User,
    pub contracts: Vec<Contract>,
    pub search: TextInput,
    pub selected: usize,
}

impl ContractsScreen {
    pub fn new(user: User) -> Self {
        Self {
            user,
            contracts: mock_contracts(),
            search: TextInput::default(),
            selected: 0,
        }
    }

    pub fn visible(&self) -> Vec<&Contract> {
        self.contracts
            .iter()
            .filter(|contract| contract.matches_search(self.search.value(), self.user.role))
            .collect()
    }

    pub fn handle(&mut self, intent: Intent) -> Outcome {
        match intent {
            Intent::Insert(ch) => {
                self.selected = 0;
                Outcome::changed(self.search.insert(ch))
            }
            Intent::DeleteBackward => {
                self.selected = 0;
                Outcome::changed(self.search.backspace())
            }
            Intent::SelectNext | Intent::SelectPrevious => {
                let forward = intent == Intent::SelectNext;
                let next = step_selection(self.selected, self.visible().len(), forward);
                Outcome::changed(std::mem::replace(&mut self.selected, next) != next)
            }
            Intent::Submit => match self.visible().get(self.selected) {
                Some(contract) => Outcome::navigate(Destination::ContractView((*contract).clone())),
                None => Outcome::Rejected("No contracts found".to_owned()),
            },
            Intent::Back => back_to_dashboard(),
            _ => Outcome::Unchanged,
        }
    }
}
