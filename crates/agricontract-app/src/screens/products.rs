use agricontract_domain::{mock_products, Product, Role, User};

use crate::forms::TextInput;
use crate::intents::{Intent, ScreenAction};
use crate::navigator::Destination;

use super::{back_to_dashboard, step_selection, Outcome};

#[derive(Debug)]
pub struct ProductsScreen {
    pub user: User,
    pub catalog: Vec<Product>,
    pub search: TextInput,
    pub selected: usize,
}

impl ProductsScreen {
    pub fn new(user: User) -> Self {
        Self {
            user,
            catalog: mock_products(),
            search: TextInput::default(),
            selected: 0,
        }
    }

    pub fn actions(&self) -> Vec<ScreenAction> {
        match self.user.role {
            Role::Farmer => vec![ScreenAction::OpenListProduct],
            Role::Buyer => Vec::new(),
        }
    }

    pub fn visible(&self) -> Vec<&Product> {
        self.catalog
            .iter()
            .filter(|product| product.matches_search(self.search.value()))
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
                Some(product) => Outcome::navigate(Destination::ProductDetails((*product).clone())),
                None => Outcome::Rejected("No products match your search".to_owned()),
            },
            Intent::Action(ScreenAction::OpenListProduct) if self.user.role == Role::Farmer => {
                Outcome::navigate(Destination::ListProduct)
            }
            Intent::Back => back_to_dashboard(),
            _ => Outcome::Unchanged,
        }
    }
}
