use agricontract_domain::{
    dashboard_stats, mock_products, DashboardNotice, DashboardStat, Product, Role, User,
};

use crate::intents::{Intent, ScreenAction};
use crate::navigator::{Destination, NavEvent};

use super::{step_selection, Outcome};

#[derive(Debug)]
pub struct DashboardScreen {
    pub user: User,
    pub stats: Vec<DashboardStat>,
    pub products: Vec<Product>,
    pub selected: usize,
    pub notice: Option<String>,
}

impl DashboardScreen {
    pub fn new(user: User, notice: Option<DashboardNotice>) -> Self {
        let mut products = mock_products();
        let notice = notice.map(|notice| {
            if let Some(product) = notice.new_product {
                products.insert(0, product);
            }
            notice.message
        });
        Self {
            stats: dashboard_stats(user.role),
            user,
            products,
            selected: 0,
            notice,
        }
    }

    pub fn actions(&self) -> Vec<ScreenAction> {
        let mut actions = vec![
            ScreenAction::OpenProducts,
            ScreenAction::OpenContracts,
            ScreenAction::OpenProfile,
        ];
        if self.user.role == Role::Farmer {
            actions.push(ScreenAction::OpenListProduct);
        }
        actions.extend([ScreenAction::ToggleTheme, ScreenAction::Logout]);
        actions
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.products.get(self.selected)
    }

    pub fn handle(&mut self, intent: Intent) -> Outcome {
        match intent {
            Intent::SelectNext => {
                let next = step_selection(self.selected, self.products.len(), true);
                Outcome::changed(std::mem::replace(&mut self.selected, next) != next)
            }
            Intent::SelectPrevious => {
                let next = step_selection(self.selected, self.products.len(), false);
                Outcome::changed(std::mem::replace(&mut self.selected, next) != next)
            }
            Intent::Submit => match self.selected_product() {
                Some(product) => Outcome::navigate(Destination::ProductDetails(product.clone())),
                None => Outcome::Unchanged,
            },
            Intent::Action(ScreenAction::OpenProducts) => Outcome::navigate(Destination::Products),
            Intent::Action(ScreenAction::OpenContracts) => {
                Outcome::navigate(Destination::Contracts)
            }
            Intent::Action(ScreenAction::OpenProfile) => Outcome::navigate(Destination::Profile),
            Intent::Action(ScreenAction::OpenListProduct) if self.user.role == Role::Farmer => {
                Outcome::navigate(Destination::ListProduct)
            }
            Intent::Action(ScreenAction::Logout) => Outcome::Navigate(NavEvent::Logout),
            _ => Outcome::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{buyer, farmer};

    #[test]
    fn only_farmers_can_list_products() {
        let mut screen = DashboardScreen::new(buyer(), None);
        assert!(!screen.actions().contains(&ScreenAction::OpenListProduct));
        assert_eq!(
            screen.handle(Intent::Action(ScreenAction::OpenListProduct)),
            Outcome::Unchanged
        );

        let mut screen = DashboardScreen::new(farmer(), None);
        assert_eq!(
            screen.handle(Intent::Action(ScreenAction::OpenListProduct)),
            Outcome::navigate(Destination::ListProduct)
        );
    }

    #[test]
    fn listed_product_is_shown_first_with_notice() {
        let mut listed = mock_products().remove(2);
        listed.name = "Heirloom Beans".to_owned();
        let screen = DashboardScreen::new(
            farmer(),
            Some(DashboardNotice {
                message: "Product listed successfully!".to_owned(),
                new_product: Some(listed.clone()),
            }),
        );
        assert_eq!(screen.notice.as_deref(), Some("Product listed successfully!"));
        assert_eq!(screen.products.len(), 5);
        assert_eq!(screen.selected_product(), Some(&listed));
    }

    #[test]
    fn enter_opens_selected_product() {
        let mut screen = DashboardScreen::new(buyer(), None);
        screen.handle(Intent::SelectNext);
        assert_eq!(
            screen.handle(Intent::Submit),
            Outcome::navigate(Destination::ProductDetails(mock_products().remove(1)))
        );
        assert_eq!(
            screen.handle(Intent::Action(ScreenAction::Logout)),
            Outcome::Navigate(NavEvent::Logout)
        );
    }
}
