//! Per-frame projection of the controller into header and footer content.

use agricontract_app::frontend::ui_boundary::{
    AppController, PageId, PaymentPhase, Screen, StatusLine, Theme,
};

use super::input::{action_key_label, QUIT_KEY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FooterHint {
    pub key: String,
    pub label: &'static str,
}

impl FooterHint {
    fn new(key: impl Into<String>, label: &'static str) -> Self {
        Self {
            key: key.into(),
            label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ViewState {
    pub title: &'static str,
    pub user_line: Option<String>,
    pub hints: Vec<FooterHint>,
    pub status: Option<StatusLine>,
    pub theme: Theme,
}

impl ViewState {
    pub(crate) fn from_controller(controller: &AppController) -> Self {
        let screen = controller.screen();
        Self {
            title: page_title(controller.page()),
            user_line: controller
                .user()
                .map(|user| format!("{} · {}", user.name, user.role.label())),
            hints: footer_hints(screen),
            status: controller.status().cloned(),
            theme: controller.theme(),
        }
    }

    pub(crate) fn footer_text(&self) -> String {
        self.hints
            .iter()
            .map(|hint| format!("{} {}", hint.key, hint.label))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

pub(crate) fn page_title(page: PageId) -> &'static str {
    match page {
        PageId::Landing => "AgriContract",
        PageId::UserTypeSelection => "Choose your account type",
        PageId::Login => "Sign in",
        PageId::Dashboard => "Dashboard",
        PageId::Products => "Products",
        PageId::ListProduct => "List a product",
        PageId::ProductDetails => "Product details",
        PageId::Contracts => "Contracts",
        PageId::Negotiation => "Negotiation",
        PageId::ContractFinalization => "Finalize contract",
        PageId::ContractView => "Contract",
        PageId::Payment => "Advance payment",
        PageId::Profile => "Profile",
        PageId::Completion => "Payment complete",
    }
}

/// What Enter does on the current screen, if anything.
fn submit_label(screen: &Screen) -> Option<&'static str> {
    match screen {
        Screen::Landing(_) => Some("get started"),
        Screen::UserTypeSelection(_) => Some("continue"),
        Screen::Login(_) => Some("sign in"),
        Screen::Dashboard(_) | Screen::Products(_) => Some("view product"),
        Screen::ListProduct(_) => Some("list product"),
        Screen::ProductDetails(_) => Some("start negotiation"),
        Screen::Contracts(_) => Some("open contract"),
        Screen::Negotiation(_) => Some("send"),
        Screen::ContractFinalization(_) => Some("generate contract"),
        Screen::ContractView(_) => Some("pay advance"),
        Screen::Payment(payment) => match payment.phase {
            PaymentPhase::Entering => Some("pay"),
            PaymentPhase::Processing { .. } => None,
            PaymentPhase::Completed => Some("continue"),
        },
        Screen::Profile(profile) if profile.is_editing() => Some("save"),
        Screen::Profile(_) => None,
        Screen::Completion(_) => Some("dashboard"),
    }
}

fn footer_hints(screen: &Screen) -> Vec<FooterHint> {
    let text_entry = screen.accepts_text();
    let mut hints = Vec::new();
    if let Some(label) = submit_label(screen) {
        hints.push(FooterHint::new("enter", label));
    }
    match screen {
        Screen::Landing(_) => {}
        Screen::Payment(payment) if !payment.can_go_back() => {}
        _ => hints.push(FooterHint::new("esc", "back")),
    }
    hints.extend(
        screen
            .actions()
            .into_iter()
            .map(|action| FooterHint::new(action_key_label(action, text_entry), action.label())),
    );
    if text_entry {
        hints.push(FooterHint::new("^c", "quit"));
    } else {
        hints.push(FooterHint::new(QUIT_KEY.to_string(), "quit"));
    }
    hints
}

#[cfg(test)]
mod tests {
    use super::*;
    use agricontract_app::frontend::ui_boundary::{
        Intent, ScreenAction, SimulationRuntimeConfig, UiViewConfig,
    };

    fn controller() -> AppController {
        AppController::new(
            &UiViewConfig {
                theme: "light".to_owned(),
                tick_rate_ms: 100,
            },
            &SimulationRuntimeConfig {
                counterparty_reply_delay_ms: 2_000,
                counterparty_signature_delay_ms: 2_000,
                payment_step_delay_ms: 1_500,
                listing_submit_delay_ms: 2_000,
                rng_seed: Some(3),
            },
        )
    }

    #[test]
    fn landing_footer_offers_get_started_and_quit() {
        let view = ViewState::from_controller(&controller());
        assert_eq!(view.title, "AgriContract");
        assert_eq!(view.user_line, None);
        assert_eq!(view.theme, Theme::Light);
        assert_eq!(
            view.footer_text(),
            "enter get started  g get started  q quit"
        );
    }

    #[test]
    fn login_footer_uses_ctrl_keys() {
        let mut controller = controller();
        controller.apply(Intent::Action(ScreenAction::GetStarted));
        controller.apply(Intent::Action(ScreenAction::ChooseBuyer));
        let view = ViewState::from_controller(&controller);
        assert_eq!(
            view.footer_text(),
            "enter sign in  esc back  ^u login/sign up  ^d quick demo  ^c quit"
        );
    }

    #[test]
    fn signed_in_header_names_the_user() {
        let mut controller = controller();
        controller.apply(Intent::Action(ScreenAction::GetStarted));
        controller.apply(Intent::Action(ScreenAction::ChooseFarmer));
        controller.apply(Intent::Action(ScreenAction::QuickDemo));
        let view = ViewState::from_controller(&controller);
        assert_eq!(view.title, "Dashboard");
        assert_eq!(view.user_line.as_deref(), Some("John Farmer · Farmer"));
        assert!(view.footer_text().contains("n list product"));
    }
}
