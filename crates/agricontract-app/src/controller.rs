//! Root of the running application.
//!
//! The controller owns the navigator, the active screen and the simulation
//! services. Frontends feed it [`Intent`]s and call [`AppController::tick`]
//! on a timer; everything they draw comes from the accessors here.

use rand::rngs::StdRng;
use rand::SeedableRng;
use time::OffsetDateTime;

use agricontract_config::{SimulationRuntimeConfig, UiViewConfig};
use agricontract_domain::User;

use crate::intents::{Intent, ScreenAction};
use crate::navigator::{NavEvent, Navigator, PageId, Session};
use crate::screens::{Outcome, Screen, ScreenContext};
use crate::simulation::Services;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Unknown names fall back to dark.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Self::Light,
            _ => Self::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub level: StatusLevel,
    pub message: String,
}

pub struct AppController {
    navigator: Navigator,
    screen: Screen,
    services: Services,
    rng: StdRng,
    theme: Theme,
    status: Option<StatusLine>,
    should_quit: bool,
}

impl std::fmt::Debug for AppController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppController")
            .field("page", &self.navigator.current_page())
            .field("theme", &self.theme)
            .field("status", &self.status)
            .field("should_quit", &self.should_quit)
            .finish()
    }
}

impl AppController {
    pub fn new(ui: &UiViewConfig, simulation: &SimulationRuntimeConfig) -> Self {
        Self::with_services(
            Theme::parse(&ui.theme),
            Services::simulated(simulation),
            simulation.rng_seed,
        )
    }

    pub fn with_services(theme: Theme, services: Services, rng_seed: Option<u64>) -> Self {
        let navigator = Navigator::new();
        let screen = Screen::build(navigator.session(), &services);
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            navigator,
            screen,
            services,
            rng,
            theme,
            status: None,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn session(&self) -> &Session {
        self.navigator.session()
    }

    pub fn page(&self) -> PageId {
        self.navigator.current_page()
    }

    pub fn user(&self) -> Option<&User> {
        self.navigator.current_user()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Applies one input intent. Returns whether anything visible changed.
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Quit => {
                tracing::info!(page = self.page().as_str(), "quit requested");
                self.should_quit = true;
                return true;
            }
            Intent::Action(ScreenAction::ToggleTheme) => {
                self.theme = self.theme.toggled();
                tracing::debug!(theme = self.theme.as_str(), "theme toggled");
                return true;
            }
            _ => {}
        }

        let had_status = self.status.take().is_some();
        let mut ctx = ScreenContext {
            services: &self.services,
            rng: &mut self.rng,
            now: OffsetDateTime::now_utc(),
        };
        let outcome = self.screen.handle(intent, &mut ctx);
        self.settle(outcome) || had_status
    }

    /// Folds finished background work into the active screen.
    pub fn tick(&mut self) -> bool {
        let mut ctx = ScreenContext {
            services: &self.services,
            rng: &mut self.rng,
            now: OffsetDateTime::now_utc(),
        };
        let outcome = self.screen.tick(&mut ctx);
        self.settle(outcome)
    }

    fn settle(&mut self, outcome: Outcome) -> bool {
        match outcome {
            Outcome::Unchanged => false,
            Outcome::Updated => true,
            Outcome::Navigate(event) => {
                self.navigate(event);
                true
            }
            Outcome::Notice(message) => {
                self.status = Some(StatusLine {
                    level: StatusLevel::Info,
                    message,
                });
                true
            }
            Outcome::Rejected(message) => {
                tracing::warn!(page = self.page().as_str(), reason = message.as_str(), "input rejected");
                self.status = Some(StatusLine {
                    level: StatusLevel::Warning,
                    message,
                });
                true
            }
        }
    }

    fn navigate(&mut self, event: NavEvent) {
        let transition = self.navigator.apply(event);
        // Replacing the screen drops its task scope, cancelling pending work.
        self.screen = Screen::build(self.navigator.session(), &self.services);
        self.status = None;
        if transition.redirected {
            self.status = Some(StatusLine {
                level: StatusLevel::Warning,
                message: "Please choose an account type and sign in first".to_owned(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::{CardField, TermsField};
    use crate::simulation::test_support::config_with_seed;
    use agricontract_domain::{PaymentStatus, Role};
    use std::time::Duration;

    fn controller() -> AppController {
        AppController::new(
            &UiViewConfig {
                theme: "dark".to_owned(),
                tick_rate_ms: 100,
            },
            &config_with_seed(42),
        )
    }

    fn type_text(controller: &mut AppController, text: &str) {
        for ch in text.chars() {
            controller.apply(Intent::Insert(ch));
        }
    }

    async fn advance(controller: &mut AppController, millis: u64) {
        tokio::time::sleep(Duration::from_millis(millis)).await;
        tokio::task::yield_now().await;
        controller.tick();
    }

    fn sign_in_as_buyer(controller: &mut AppController) {
        controller.apply(Intent::Action(ScreenAction::GetStarted));
        controller.apply(Intent::Action(ScreenAction::ChooseBuyer));
        assert_eq!(controller.page(), PageId::Login);
        controller.apply(Intent::Action(ScreenAction::QuickDemo));
        assert_eq!(controller.page(), PageId::Dashboard);
    }

    #[test]
    fn starts_on_landing_with_configured_theme() {
        let controller = AppController::new(
            &UiViewConfig {
                theme: "light".to_owned(),
                tick_rate_ms: 100,
            },
            &config_with_seed(1),
        );
        assert_eq!(controller.page(), PageId::Landing);
        assert_eq!(controller.theme(), Theme::Light);
        assert!(controller.user().is_none());
    }

    #[test]
    fn theme_toggle_and_quit_are_handled_on_any_page() {
        let mut controller = controller();
        assert!(controller.apply(Intent::Action(ScreenAction::ToggleTheme)));
        assert_eq!(controller.theme(), Theme::Light);
        assert!(controller.apply(Intent::Quit));
        assert!(controller.should_quit());
    }

    #[test]
    fn theme_names_parse_leniently() {
        assert_eq!(Theme::parse(" LIGHT "), Theme::Light);
        assert_eq!(Theme::parse("solarized"), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().as_str(), "light");
    }

    #[test]
    fn rejected_input_sets_a_warning_until_the_next_intent() {
        let mut controller = controller();
        sign_in_as_buyer(&mut controller);
        controller.apply(Intent::Action(ScreenAction::OpenContracts));
        controller.apply(Intent::Submit);
        assert_eq!(controller.page(), PageId::ContractView);

        controller.apply(Intent::Action(ScreenAction::ProceedToPayment));
        assert_eq!(
            controller.status().map(|status| status.level),
            Some(StatusLevel::Warning)
        );
        assert!(controller.apply(Intent::FocusNext));
        assert!(controller.status().is_none());
    }

    #[test]
    fn logout_returns_to_role_selection_and_clears_the_user() {
        let mut controller = controller();
        sign_in_as_buyer(&mut controller);
        assert_eq!(controller.user().map(|user| user.role), Some(Role::Buyer));
        controller.apply(Intent::Action(ScreenAction::Logout));
        assert_eq!(controller.page(), PageId::UserTypeSelection);
        assert!(controller.user().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn buyer_walks_from_product_to_completed_payment() {
        let mut controller = controller();
        sign_in_as_buyer(&mut controller);

        controller.apply(Intent::Submit);
        assert_eq!(controller.page(), PageId::ProductDetails);
        controller.apply(Intent::Submit);
        assert_eq!(controller.page(), PageId::Negotiation);

        type_text(&mut controller, "Is delivery to Fresno possible?");
        controller.apply(Intent::Submit);
        advance(&mut controller, 2_001).await;
        let Screen::Negotiation(chat) = controller.screen() else {
            panic!("expected negotiation");
        };
        assert_eq!(chat.messages.len(), 4);

        controller.apply(Intent::Action(ScreenAction::AcceptOffer));
        assert_eq!(controller.page(), PageId::ContractFinalization);
        while !matches!(
            controller.screen(),
            Screen::ContractFinalization(screen)
                if screen.form.focused() == TermsField::DeliveryLocation
        ) {
            controller.apply(Intent::FocusNext);
        }
        type_text(&mut controller, "Fresno Cold Storage");
        controller.apply(Intent::Action(ScreenAction::ToggleAgreement));
        controller.apply(Intent::Submit);
        assert_eq!(controller.page(), PageId::ContractView);

        controller.apply(Intent::Action(ScreenAction::Sign));
        advance(&mut controller, 2_001).await;
        controller.apply(Intent::Action(ScreenAction::ProceedToPayment));
        assert_eq!(controller.page(), PageId::Payment);

        controller.apply(Intent::FocusNext);
        type_text(&mut controller, "Sarah Buyer");
        controller.apply(Intent::FocusNext);
        type_text(&mut controller, "4111111111111111");
        let Screen::Payment(payment) = controller.screen() else {
            panic!("expected payment");
        };
        assert_eq!(payment.form.value(CardField::Number), "4111111111111111");
        controller.apply(Intent::Submit);
        for _ in 0..4 {
            advance(&mut controller, 1_501).await;
        }
        controller.apply(Intent::Submit);
        assert_eq!(controller.page(), PageId::Completion);
        let Screen::Completion(done) = controller.screen() else {
            panic!("expected completion");
        };
        assert_eq!(done.record.payment_status, PaymentStatus::Completed);
        assert!(!done.record.transaction_id.as_str().is_empty());

        controller.apply(Intent::Action(ScreenAction::ReturnToDashboard));
        assert_eq!(controller.page(), PageId::Dashboard);
    }

    #[tokio::test(start_paused = true)]
    async fn navigating_away_drops_the_pending_reply() {
        let mut controller = controller();
        sign_in_as_buyer(&mut controller);
        controller.apply(Intent::Submit);
        controller.apply(Intent::Submit);
        type_text(&mut controller, "hello");
        controller.apply(Intent::Submit);

        controller.apply(Intent::Back);
        assert_eq!(controller.page(), PageId::Dashboard);
        tokio::time::sleep(Duration::from_millis(5_000)).await;
        assert!(!controller.tick());
        assert_eq!(controller.page(), PageId::Dashboard);
    }
}
