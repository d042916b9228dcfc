//! One state machine per page.
//!
//! A screen is built from the session when its page becomes current and is
//! dropped when the page changes, which cancels any simulation it started.
//! Screens never touch the navigator; they hand navigation requests back to
//! the controller as an [`Outcome`].

mod completion;
mod contract_finalization;
mod contract_view;
mod contracts;
mod dashboard;
mod landing;
mod list_product;
mod login;
mod negotiation;
mod payment;
mod product_details;
mod products;
mod profile;
mod role_selection;

use rand::rngs::StdRng;
use time::OffsetDateTime;

use agricontract_domain::{parse_iso_date, Amount, DomainError, DomainResult, Offer, User};

use crate::intents::{Intent, ScreenAction};
use crate::navigator::{Destination, NavEvent, PageData, PageId, Session};
use crate::simulation::Services;

pub use completion::CompletionScreen;
pub use contract_finalization::{ContractFinalizationScreen, TermsField};
pub use contract_view::ContractViewScreen;
pub use contracts::ContractsScreen;
pub use dashboard::DashboardScreen;
pub use landing::LandingScreen;
pub use list_product::{ListProductScreen, ListingField};
pub use login::{LoginField, LoginMode, LoginScreen};
pub use negotiation::{Composer, NegotiationScreen, OfferField};
pub use payment::{CardField, PaymentPhase, PaymentScreen};
pub use product_details::ProductDetailsScreen;
pub use products::ProductsScreen;
pub use profile::{ProfileField, ProfileScreen};
pub use role_selection::RoleSelectionScreen;

/// What a screen asks the controller to do after handling input or a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Updated,
    Navigate(NavEvent),
    Notice(String),
    Rejected(String),
}

impl Outcome {
    pub fn navigate(destination: Destination) -> Self {
        Self::Navigate(NavEvent::Navigate(destination))
    }

    pub fn rejected(error: impl std::fmt::Display) -> Self {
        Self::Rejected(error.to_string())
    }

    pub(crate) fn changed(changed: bool) -> Self {
        if changed {
            Self::Updated
        } else {
            Self::Unchanged
        }
    }
}

pub struct ScreenContext<'a> {
    pub services: &'a Services,
    pub rng: &'a mut StdRng,
    pub now: OffsetDateTime,
}

#[derive(Debug)]
pub enum Screen {
    Landing(LandingScreen),
    UserTypeSelection(RoleSelectionScreen),
    Login(LoginScreen),
    Dashboard(DashboardScreen),
    Products(ProductsScreen),
    ListProduct(ListProductScreen),
    ProductDetails(ProductDetailsScreen),
    Contracts(ContractsScreen),
    Negotiation(NegotiationScreen),
    ContractFinalization(ContractFinalizationScreen),
    ContractView(ContractViewScreen),
    Payment(PaymentScreen),
    Profile(ProfileScreen),
    Completion(CompletionScreen),
}

impl Screen {
    /// Builds the screen for the session's current page. The session has
    /// already passed the navigator guard.
    pub fn build(session: &Session, services: &Services) -> Self {
        let role = session.selected_role;
        let user = session.current_user.clone();
        let data = session.page_data.clone();

        match (session.current_page, role, user) {
            (PageId::Landing, _, _) => Self::Landing(LandingScreen),
            (PageId::Login, Some(role), _) => Self::Login(LoginScreen::new(role)),
            (PageId::UserTypeSelection, _, _) | (PageId::Login, None, _) | (_, _, None) => {
                Self::UserTypeSelection(RoleSelectionScreen::default())
            }
            (page, _, Some(user)) => Self::build_authenticated(page, user, data, services),
        }
    }

    fn build_authenticated(
        page: PageId,
        user: User,
        data: Option<PageData>,
        services: &Services,
    ) -> Self {
        match (page, data) {
            (PageId::Products, _) => Self::Products(ProductsScreen::new(user)),
            (PageId::ListProduct, _) => Self::ListProduct(ListProductScreen::new(
                user,
                services.listing_desk.clone(),
            )),
            (PageId::ProductDetails, Some(PageData::Product(product))) => {
                Self::ProductDetails(ProductDetailsScreen::new(user, product))
            }
            (PageId::Contracts, _) => Self::Contracts(ContractsScreen::new(user)),
            (PageId::Negotiation, Some(PageData::Negotiation(thread))) => Self::Negotiation(
                NegotiationScreen::new(user, thread, services.counterparty.clone()),
            ),
            (PageId::ContractFinalization, Some(PageData::ContractDraft(draft))) => {
                Self::ContractFinalization(ContractFinalizationScreen::new(user, draft))
            }
            (PageId::ContractView, Some(PageData::Contract(contract))) => Self::ContractView(
                ContractViewScreen::new(user, contract, services.counterparty.clone()),
            ),
            (PageId::Payment, Some(PageData::Payment(request))) => {
                Self::Payment(PaymentScreen::new(user, request, services.payments.clone()))
            }
            (PageId::Profile, _) => Self::Profile(ProfileScreen::new(user)),
            (PageId::Completion, Some(PageData::Completion(record))) => {
                Self::Completion(CompletionScreen::new(user, record))
            }
            (PageId::Dashboard, Some(PageData::DashboardNotice(notice))) => {
                Self::Dashboard(DashboardScreen::new(user, Some(notice)))
            }
            (page, _) => {
                if page != PageId::Dashboard {
                    tracing::warn!(page = page.as_str(), "page opened without its payload");
                }
                Self::Dashboard(DashboardScreen::new(user, None))
            }
        }
    }

    pub fn page(&self) -> PageId {
        match self {
            Self::Landing(_) => PageId::Landing,
            Self::UserTypeSelection(_) => PageId::UserTypeSelection,
            Self::Login(_) => PageId::Login,
            Self::Dashboard(_) => PageId::Dashboard,
            Self::Products(_) => PageId::Products,
            Self::ListProduct(_) => PageId::ListProduct,
            Self::ProductDetails(_) => PageId::ProductDetails,
            Self::Contracts(_) => PageId::Contracts,
            Self::Negotiation(_) => PageId::Negotiation,
            Self::ContractFinalization(_) => PageId::ContractFinalization,
            Self::ContractView(_) => PageId::ContractView,
            Self::Payment(_) => PageId::Payment,
            Self::Profile(_) => PageId::Profile,
            Self::Completion(_) => PageId::Completion,
        }
    }

    /// Named actions currently offered, in footer order.
    pub fn actions(&self) -> Vec<ScreenAction> {
        match self {
            Self::Landing(screen) => screen.actions(),
            Self::UserTypeSelection(screen) => screen.actions(),
            Self::Login(screen) => screen.actions(),
            Self::Dashboard(screen) => screen.actions(),
            Self::Products(screen) => screen.actions(),
            Self::ListProduct(_) => Vec::new(),
            Self::ProductDetails(_) => Vec::new(),
            Self::Contracts(_) => Vec::new(),
            Self::Negotiation(screen) => screen.actions(),
            Self::ContractFinalization(screen) => screen.actions(),
            Self::ContractView(screen) => screen.actions(),
            Self::Payment(_) => Vec::new(),
            Self::Profile(screen) => screen.actions(),
            Self::Completion(screen) => screen.actions(),
        }
    }

    /// Whether plain characters should be typed into the screen.
    pub fn accepts_text(&self) -> bool {
        match self {
            Self::Login(_)
            | Self::Products(_)
            | Self::Contracts(_)
            | Self::Negotiation(_)
            | Self::ContractFinalization(_) => true,
            Self::ListProduct(screen) => screen.accepts_text(),
            Self::Payment(screen) => screen.accepts_text(),
            Self::Profile(screen) => screen.is_editing(),
            Self::Landing(_)
            | Self::UserTypeSelection(_)
            | Self::Dashboard(_)
            | Self::ProductDetails(_)
            | Self::ContractView(_)
            | Self::Completion(_) => false,
        }
    }

    pub fn handle(&mut self, intent: Intent, ctx: &mut ScreenContext<'_>) -> Outcome {
        match self {
            Self::Landing(screen) => screen.handle(intent),
            Self::UserTypeSelection(screen) => screen.handle(intent),
            Self::Login(screen) => screen.handle(intent, ctx),
            Self::Dashboard(screen) => screen.handle(intent),
            Self::Products(screen) => screen.handle(intent),
            Self::ListProduct(screen) => screen.handle(intent, ctx),
            Self::ProductDetails(screen) => screen.handle(intent, ctx),
            Self::Contracts(screen) => screen.handle(intent),
            Self::Negotiation(screen) => screen.handle(intent, ctx),
            Self::ContractFinalization(screen) => screen.handle(intent, ctx),
            Self::ContractView(screen) => screen.handle(intent),
            Self::Payment(screen) => screen.handle(intent, ctx),
            Self::Profile(screen) => screen.handle(intent),
            Self::Completion(screen) => screen.handle(intent),
        }
    }

    /// Applies finished background work. Screens without tasks never change.
    pub fn tick(&mut self, ctx: &mut ScreenContext<'_>) -> Outcome {
        match self {
            Self::ListProduct(screen) => screen.tick(),
            Self::Negotiation(screen) => screen.tick(ctx),
            Self::ContractView(screen) => screen.tick(),
            Self::Payment(screen) => screen.tick(),
            _ => Outcome::Unchanged,
        }
    }

    /// The signed-in user, for pages that have one.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Landing(_) | Self::UserTypeSelection(_) | Self::Login(_) => None,
            Self::Dashboard(screen) => Some(&screen.user),
            Self::Products(screen) => Some(&screen.user),
            Self::ListProduct(screen) => Some(&screen.user),
            Self::ProductDetails(screen) => Some(&screen.user),
            Self::Contracts(screen) => Some(&screen.user),
            Self::Negotiation(screen) => Some(&screen.user),
            Self::ContractFinalization(screen) => Some(&screen.user),
            Self::ContractView(screen) => Some(&screen.user),
            Self::Payment(screen) => Some(&screen.user),
            Self::Profile(screen) => Some(&screen.user),
            Self::Completion(screen) => Some(&screen.user),
        }
    }
}

/// Moves a list cursor within `len` items, clamping at both ends.
pub(crate) fn step_selection(selected: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (selected + 1).min(len - 1)
    } else {
        selected.saturating_sub(1)
    }
}

pub(crate) fn back_to_dashboard() -> Outcome {
    Outcome::navigate(Destination::Dashboard(None))
}

/// Parses offer terms typed into a form.
pub(crate) fn offer_from_text(quantity: &str, price: &str, delivery_date: &str) -> DomainResult<Offer> {
    let raw_quantity = quantity.trim();
    let quantity = raw_quantity
        .parse::<u32>()
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| DomainError::InvalidQuantity {
            field: "quantity",
            value: raw_quantity.to_owned(),
        })?;
    let price_per_unit = price
        .parse::<Amount>()
        .map_err(|_| DomainError::InvalidAmount {
            field: "price per unit",
            value: price.trim().to_owned(),
        })?;
    let delivery_date = parse_iso_date(delivery_date)?;
    Offer::checked(quantity, price_per_unit, delivery_date)
}

/// Amount as typed into a form: digits with optional cents, no symbol.
pub(crate) fn plain_amount(amount: Amount) -> String {
    let cents = amount.cents();
    if cents % 100 == 0 {
        (cents / 100).to_string()
    } else {
        format!("{}.{:02}", cents / 100, cents % 100)
    }
}
