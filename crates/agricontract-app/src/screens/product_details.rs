use agricontract_domain::{Amount, NegotiationThread, Product, User};

use crate::intents::Intent;
use crate::navigator::Destination;

use super::{back_to_dashboard, Outcome, ScreenContext};

const DEFAULT_QUANTITY: u32 = 100;
const COARSE_STEP: u32 = 10;

#[derive(Debug)]
pub struct ProductDetailsScreen {
    pub user: User,
    pub product: Product,
    pub quantity: u32,
}

impl ProductDetailsScreen {
    pub fn new(user: User, product: Product) -> Self {
        let quantity = DEFAULT_QUANTITY.min(product.quantity).max(1);
        Self {
            user,
            product,
            quantity,
        }
    }

    /// Farmers cannot open a negotiation on their own listing.
    pub fn is_own_product(&self) -> bool {
        self.product.is_listed_by(&self.user)
    }

    pub fn estimated_total(&self) -> Amount {
        self.product.price_per_unit.times(self.quantity)
    }

    fn set_quantity(&mut self, quantity: u32) -> Outcome {
        let clamped = quantity.clamp(1, self.product.quantity.max(1));
        Outcome::changed(std::mem::replace(&mut self.quantity, clamped) != clamped)
    }

    pub fn handle(&mut self, intent: Intent, ctx: &mut ScreenContext<'_>) -> Outcome {
        match intent {
            Intent::SelectNext => self.set_quantity(self.quantity.saturating_sub(1)),
            Intent::SelectPrevious => self.set_quantity(self.quantity.saturating_add(1)),
            Intent::Increase => self.set_quantity(self.quantity.saturating_add(COARSE_STEP)),
            Intent::Decrease => self.set_quantity(self.quantity.saturating_sub(COARSE_STEP)),
            Intent::Submit => {
                if self.is_own_product() {
                    return Outcome::Rejected(
                        "You cannot negotiate on your own product".to_owned(),
                    );
                }
                let thread =
                    NegotiationThread::open(&self.product, &self.user, self.quantity, ctx.now.date());
                tracing::debug!(
                    product = self.product.id.as_str(),
                    quantity = self.quantity,
                    "opening negotiation"
                );
                Outcome::navigate(Destination::Negotiation(thread))
            }
            Intent::Back => back_to_dashboard(),
            _ => Outcome::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{buyer, farmer, now, rng};
    use crate::simulation::test_support::services;
    use agricontract_domain::{mock_products, Offer};
    use time::macros::date;

    #[test]
    fn quantity_defaults_to_hundred_and_stays_within_stock() {
        let services = services();
        let mut rng = rng();
        let mut ctx = ScreenContext {
            services: &services,
            rng: &mut rng,
            now: now(),
        };
        let mut product = mock_products().remove(0);
        product.quantity = 105;
        let mut screen = ProductDetailsScreen::new(buyer(), product);
        assert_eq!(screen.quantity, 100);
        screen.handle(Intent::Increase, &mut ctx);
        assert_eq!(screen.quantity, 105);
        assert_eq!(screen.handle(Intent::Increase, &mut ctx), Outcome::Unchanged);

        for _ in 0..20 {
            screen.handle(Intent::Decrease, &mut ctx);
        }
        assert_eq!(screen.quantity, 1);
    }

    #[test]
    fn small_stock_caps_the_default() {
        let mut product = mock_products().remove(0);
        product.quantity = 40;
        assert_eq!(ProductDetailsScreen::new(buyer(), product).quantity, 40);
    }

    #[test]
    fn own_product_cannot_be_negotiated() {
        let services = services();
        let mut rng = rng();
        let mut ctx = ScreenContext {
            services: &services,
            rng: &mut rng,
            now: now(),
        };
        let mut screen = ProductDetailsScreen::new(farmer(), mock_products().remove(0));
        assert!(screen.is_own_product());
        assert!(matches!(
            screen.handle(Intent::Submit, &mut ctx),
            Outcome::Rejected(_)
        ));
    }

    #[test]
    fn start_negotiation_opens_thread_with_initial_offer() {
        let services = services();
        let mut rng = rng();
        let mut ctx = ScreenContext {
            services: &services,
            rng: &mut rng,
            now: now(),
        };
        let mut screen = ProductDetailsScreen::new(buyer(), mock_products().remove(0));
        assert_eq!(screen.estimated_total(), Amount::from_whole(4500));

        let Outcome::Navigate(crate::navigator::NavEvent::Navigate(Destination::Negotiation(
            thread,
        ))) = screen.handle(Intent::Submit, &mut ctx)
        else {
            panic!("expected negotiation navigation");
        };
        assert_eq!(
            thread.initial_offer,
            Offer {
                quantity: 100,
                price_per_unit: Amount::from_whole(45),
                total_price: Amount::from_whole(4500),
                delivery_date: date!(2024 - 02 - 01),
            }
        );
        assert_eq!(thread.buyer_id, buyer().id);
        assert_eq!(thread.seller_name, "John Smith");
    }
}
