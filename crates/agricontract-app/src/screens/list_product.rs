use std::sync::Arc;

use agricontract_domain::{
    DashboardNotice, DomainResult, Product, ProductCategory, ProductListing, QuantityUnit, User,
};

use crate::forms::{FieldKind, Form, FormField};
use crate::intents::Intent;
use crate::navigator::Destination;
use crate::simulation::ListingDesk;
use crate::tasks::ScreenTasks;

use super::{back_to_dashboard, Outcome, ScreenContext};

pub const LISTING_SUCCESS_MESSAGE: &str = "Product listed successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingField {
    Name,
    Category,
    Description,
    Quantity,
    Unit,
    Price,
    HarvestDate,
    Location,
}

impl FormField for ListingField {
    const ALL: &'static [Self] = &[
        Self::Name,
        Self::Category,
        Self::Description,
        Self::Quantity,
        Self::Unit,
        Self::Price,
        Self::HarvestDate,
        Self::Location,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Product name",
            Self::Category => "Category",
            Self::Description => "Description",
            Self::Quantity => "Quantity",
            Self::Unit => "Unit",
            Self::Price => "Price per unit",
            Self::HarvestDate => "Harvest date (YYYY-MM-DD)",
            Self::Location => "Location",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            Self::Category | Self::Unit => FieldKind::Choice,
            _ => FieldKind::Text,
        }
    }
}

#[derive(Debug)]
enum ListingEvent {
    Listed(DomainResult<Product>),
}

pub struct ListProductScreen {
    pub user: User,
    pub form: Form<ListingField>,
    pub category: Option<ProductCategory>,
    pub unit: QuantityUnit,
    pub submitting: bool,
    desk: Arc<dyn ListingDesk>,
    tasks: ScreenTasks<ListingEvent>,
}

impl std::fmt::Debug for ListProductScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListProductScreen")
            .field("form", &self.form)
            .field("category", &self.category)
            .field("unit", &self.unit)
            .field("submitting", &self.submitting)
            .finish()
    }
}

impl ListProductScreen {
    pub fn new(user: User, desk: Arc<dyn ListingDesk>) -> Self {
        Self {
            user,
            form: Form::new(),
            category: None,
            unit: QuantityUnit::default(),
            submitting: false,
            desk,
            tasks: ScreenTasks::new("list-product"),
        }
    }

    pub fn accepts_text(&self) -> bool {
        self.form.accepts_text()
    }

    pub fn listing(&self) -> ProductListing {
        ProductListing {
            name: self.form.value(ListingField::Name).to_owned(),
            category: self.category,
            description: self.form.value(ListingField::Description).to_owned(),
            quantity: self.form.value(ListingField::Quantity).to_owned(),
            unit: self.unit,
            price: self.form.value(ListingField::Price).to_owned(),
            harvest_date: self.form.value(ListingField::HarvestDate).to_owned(),
            location: self.form.value(ListingField::Location).to_owned(),
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting && self.listing().is_complete()
    }

    fn cycle_choice(&mut self, forward: bool) -> bool {
        match self.form.focused() {
            ListingField::Category => {
                let all = ProductCategory::ALL;
                let next = match self.category.and_then(|current| {
                    all.iter().position(|candidate| *candidate == current)
                }) {
                    None => 0,
                    Some(index) if forward => (index + 1) % all.len(),
                    Some(index) => (index + all.len() - 1) % all.len(),
                };
                self.category = Some(all[next]);
                true
            }
            ListingField::Unit => {
                let all = QuantityUnit::ALL;
                let index = all
                    .iter()
                    .position(|candidate| *candidate == self.unit)
                    .unwrap_or(0);
                let next = if forward {
                    (index + 1) % all.len()
                } else {
                    (index + all.len() - 1) % all.len()
                };
                self.unit = all[next];
                true
            }
            _ => false,
        }
    }

    fn submit(&mut self, ctx: &mut ScreenContext<'_>) -> Outcome {
        if self.submitting {
            return Outcome::Unchanged;
        }
        let product = match self.listing().into_product(&self.user, ctx.now) {
            Ok(product) => product,
            Err(error) => return Outcome::rejected(error),
        };
        let desk = Arc::clone(&self.desk);
        if let Err(error) = self
            .tasks
            .spawn(async move { ListingEvent::Listed(desk.submit(product).await) })
        {
            return Outcome::rejected(error);
        }
        self.submitting = true;
        Outcome::Updated
    }

    pub fn handle(&mut self, intent: Intent, ctx: &mut ScreenContext<'_>) -> Outcome {
        match intent {
            Intent::Back => back_to_dashboard(),
            _ if self.submitting => Outcome::Unchanged,
            Intent::Insert(ch) => Outcome::changed(self.form.insert(ch)),
            Intent::DeleteBackward => Outcome::changed(self.form.backspace()),
            Intent::FocusNext | Intent::SelectNext => {
                self.form.focus_next();
                Outcome::Updated
            }
            Intent::FocusPrevious | Intent::SelectPrevious => {
                self.form.focus_previous();
                Outcome::Updated
            }
            Intent::Increase => Outcome::changed(self.cycle_choice(true)),
            Intent::Decrease => Outcome::changed(self.cycle_choice(false)),
            Intent::Submit => self.submit(ctx),
            _ => Outcome::Unchanged,
        }
    }

    pub fn tick(&mut self) -> Outcome {
        let mut outcome = Outcome::Unchanged;
        for event in self.tasks.drain() {
            let ListingEvent::Listed(result) = event;
            self.submitting = false;
            outcome = match result {
                Ok(product) => Outcome::navigate(Destination::Dashboard(Some(DashboardNotice {
                    message: LISTING_SUCCESS_MESSAGE.to_owned(),
                    new_product: Some(product),
                }))),
                Err(error) => Outcome::rejected(error),
            };
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{farmer, now, rng};
    use crate::simulation::test_support::services;
    use std::time::Duration;

    fn fill(screen: &mut ListProductScreen, ctx: &mut ScreenContext<'_>) {
        for (field, text) in [
            (ListingField::Name, "Basmati Rice"),
            (ListingField::Description, "Long grain, aged one year"),
            (ListingField::Quantity, "750"),
            (ListingField::Price, "98"),
            (ListingField::HarvestDate, "2024-03-01"),
        ] {
            screen.form.focus(field);
            for ch in text.chars() {
                screen.handle(Intent::Insert(ch), ctx);
            }
        }
        screen.form.focus(ListingField::Category);
        screen.handle(Intent::Increase, ctx);
        screen.handle(Intent::Increase, ctx);
        screen.handle(Intent::Increase, ctx);
    }

    #[test]
    fn submit_is_blocked_until_required_fields_are_filled() {
        let services = services();
        let mut rng = rng();
        let mut ctx = ScreenContext {
            services: &services,
            rng: &mut rng,
            now: now(),
        };
        let mut screen = ListProductScreen::new(farmer(), services.listing_desk.clone());
        assert!(!screen.can_submit());
        assert_eq!(
            screen.handle(Intent::Submit, &mut ctx),
            Outcome::Rejected("name is required".to_owned())
        );
        assert!(!screen.submitting);
    }

    #[test]
    fn choice_fields_cycle_instead_of_typing() {
        let services = services();
        let mut rng = rng();
        let mut ctx = ScreenContext {
            services: &services,
            rng: &mut rng,
            now: now(),
        };
        let mut screen = ListProductScreen::new(farmer(), services.listing_desk.clone());
        screen.form.focus(ListingField::Unit);
        assert!(!screen.accepts_text());
        screen.handle(Intent::Decrease, &mut ctx);
        assert_eq!(screen.unit, QuantityUnit::Liter);
        screen.form.focus(ListingField::Category);
        screen.handle(Intent::Increase, &mut ctx);
        assert_eq!(screen.category, Some(ProductCategory::Vegetables));
    }

    #[test]
    fn invalid_date_is_rejected_before_submission() {
        let services = services();
        let mut rng = rng();
        let mut ctx = ScreenContext {
            services: &services,
            rng: &mut rng,
            now: now(),
        };
        let mut screen = ListProductScreen::new(farmer(), services.listing_desk.clone());
        fill(&mut screen, &mut ctx);
        screen.form.set(ListingField::HarvestDate, "03/01/2024");
        assert!(matches!(
            screen.handle(Intent::Submit, &mut ctx),
            Outcome::Rejected(message) if message.contains("YYYY-MM-DD")
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn listing_returns_to_dashboard_after_desk_delay() {
        let services = services();
        let mut rng = rng();
        let mut ctx = ScreenContext {
            services: &services,
            rng: &mut rng,
            now: now(),
        };
        let mut screen = ListProductScreen::new(farmer(), services.listing_desk.clone());
        fill(&mut screen, &mut ctx);
        assert_eq!(screen.category, Some(ProductCategory::Grains));
        assert!(screen.can_submit());
        assert_eq!(screen.handle(Intent::Submit, &mut ctx), Outcome::Updated);
        assert!(screen.submitting);
        assert_eq!(screen.handle(Intent::Submit, &mut ctx), Outcome::Unchanged);

        tokio::time::sleep(Duration::from_millis(1_999)).await;
        assert_eq!(screen.tick(), Outcome::Unchanged);
        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;

        let Outcome::Navigate(crate::navigator::NavEvent::Navigate(Destination::Dashboard(Some(
            notice,
        )))) = screen.tick()
        else {
            panic!("expected dashboard navigation with notice");
        };
        assert_eq!(notice.message, LISTING_SUCCESS_MESSAGE);
        let product = notice.new_product.expect("listed product");
        assert_eq!(product.name, "Basmati Rice");
        assert_eq!(product.quantity, 750);
        assert_eq!(product.farmer_id, farmer().id);
    }
}
