//! Page routing for the session.
//!
//! Transitions are pure `(Session, NavEvent) -> Session` functions. The
//! [`Navigator`] owns the current session, applies events, and runs the
//! access guard after every transition so a protected page is never shown
//! without the identity it needs.

use agricontract_domain::{
    CompletionRecord, Contract, ContractDraft, DashboardNotice, NegotiationThread, PaymentRequest,
    Product, Role, User,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageId {
    #[default]
    Landing,
    UserTypeSelection,
    Login,
    Dashboard,
    Products,
    ListProduct,
    ProductDetails,
    Contracts,
    Negotiation,
    ContractFinalization,
    ContractView,
    Payment,
    Profile,
    Completion,
}

impl PageId {
    pub const ALL: [Self; 14] = [
        Self::Landing,
        Self::UserTypeSelection,
        Self::Login,
        Self::Dashboard,
        Self::Products,
        Self::ListProduct,
        Self::ProductDetails,
        Self::Contracts,
        Self::Negotiation,
        Self::ContractFinalization,
        Self::ContractView,
        Self::Payment,
        Self::Profile,
        Self::Completion,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::UserTypeSelection => "user-type-selection",
            Self::Login => "login",
            Self::Dashboard => "dashboard",
            Self::Products => "products",
            Self::ListProduct => "list-product",
            Self::ProductDetails => "product-details",
            Self::Contracts => "contracts",
            Self::Negotiation => "negotiation",
            Self::ContractFinalization => "contract-finalization",
            Self::ContractView => "contract-view",
            Self::Payment => "payment",
            Self::Profile => "profile",
            Self::Completion => "completion",
        }
    }

    pub fn requires_role(self) -> bool {
        !matches!(self, Self::Landing | Self::UserTypeSelection)
    }

    pub fn requires_user(self) -> bool {
        !matches!(self, Self::Landing | Self::UserTypeSelection | Self::Login)
    }
}

/// Payload attached to the page it was navigated to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageData {
    DashboardNotice(DashboardNotice),
    Product(Product),
    Negotiation(NegotiationThread),
    ContractDraft(ContractDraft),
    Contract(Contract),
    Payment(PaymentRequest),
    Completion(CompletionRecord),
}

/// Navigation target for a logged-in session. Pages that carry data can only
/// be reached with their payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Dashboard(Option<DashboardNotice>),
    Products,
    ListProduct,
    ProductDetails(Product),
    Contracts,
    Negotiation(NegotiationThread),
    ContractFinalization(ContractDraft),
    ContractView(Contract),
    Payment(PaymentRequest),
    Profile,
    Completion(CompletionRecord),
}

impl Destination {
    pub fn page(&self) -> PageId {
        match self {
            Self::Dashboard(_) => PageId::Dashboard,
            Self::Products => PageId::Products,
            Self::ListProduct => PageId::ListProduct,
            Self::ProductDetails(_) => PageId::ProductDetails,
            Self::Contracts => PageId::Contracts,
            Self::Negotiation(_) => PageId::Negotiation,
            Self::ContractFinalization(_) => PageId::ContractFinalization,
            Self::ContractView(_) => PageId::ContractView,
            Self::Payment(_) => PageId::Payment,
            Self::Profile => PageId::Profile,
            Self::Completion(_) => PageId::Completion,
        }
    }

    fn into_parts(self) -> (PageId, Option<PageData>) {
        let page = self.page();
        let data = match self {
            Self::Dashboard(notice) => notice.map(PageData::DashboardNotice),
            Self::ProductDetails(product) => Some(PageData::Product(product)),
            Self::Negotiation(thread) => Some(PageData::Negotiation(thread)),
            Self::ContractFinalization(draft) => Some(PageData::ContractDraft(draft)),
            Self::ContractView(contract) => Some(PageData::Contract(contract)),
            Self::Payment(request) => Some(PageData::Payment(request)),
            Self::Completion(record) => Some(PageData::Completion(record)),
            Self::Products | Self::ListProduct | Self::Contracts | Self::Profile => None,
        };
        (page, data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    GetStarted,
    SelectRole(Role),
    BackToRoleSelection,
    Login { role: Role, user: User },
    Logout,
    Navigate(Destination),
}

impl NavEvent {
    fn label(&self) -> &'static str {
        match self {
            Self::GetStarted => "get_started",
            Self::SelectRole(_) => "select_role",
            Self::BackToRoleSelection => "back_to_role_selection",
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::Navigate(_) => "navigate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub current_page: PageId,
    pub current_user: Option<User>,
    pub selected_role: Option<Role>,
    pub page_data: Option<PageData>,
}

impl Session {
    pub fn role(&self) -> Option<Role> {
        self.selected_role
    }
}

pub fn reduce(session: Session, event: NavEvent) -> Session {
    match event {
        NavEvent::GetStarted => Session {
            current_page: PageId::UserTypeSelection,
            page_data: None,
            ..session
        },
        NavEvent::SelectRole(role) => Session {
            current_page: PageId::Login,
            selected_role: Some(role),
            page_data: None,
            ..session
        },
        NavEvent::BackToRoleSelection => Session {
            current_page: PageId::UserTypeSelection,
            selected_role: None,
            page_data: None,
            ..session
        },
        NavEvent::Login { role, user } => Session {
            current_page: PageId::Dashboard,
            current_user: Some(user),
            selected_role: Some(role),
            page_data: None,
        },
        NavEvent::Logout => Session {
            current_page: PageId::UserTypeSelection,
            current_user: None,
            selected_role: None,
            page_data: None,
        },
        NavEvent::Navigate(destination) => {
            let (current_page, page_data) = destination.into_parts();
            Session {
                current_page,
                page_data,
                ..session
            }
        }
    }
}

/// Redirects to role selection when the page is missing the user or role it
/// needs. Returns the checked session and whether it redirected.
pub fn guard(session: Session) -> (Session, bool) {
    let page = session.current_page;
    let missing_user = page.requires_user() && session.current_user.is_none();
    let missing_role = page.requires_role() && session.selected_role.is_none();
    if !(missing_user || missing_role) {
        return (session, false);
    }
    (
        Session {
            current_page: PageId::UserTypeSelection,
            page_data: None,
            ..session
        },
        true,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: PageId,
    pub to: PageId,
    pub redirected: bool,
}

#[derive(Debug, Default)]
pub struct Navigator {
    session: Session,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_page(&self) -> PageId {
        self.session.current_page
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user.as_ref()
    }

    pub fn apply(&mut self, event: NavEvent) -> Transition {
        let from = self.session.current_page;
        let label = event.label();
        let next = reduce(std::mem::take(&mut self.session), event);
        let (next, redirected) = guard(next);
        self.session = next;
        let to = self.session.current_page;

        if redirected {
            tracing::warn!(
                event = label,
                from = from.as_str(),
                "navigation redirected to role selection; page requires a signed-in user"
            );
        } else {
            tracing::debug!(event = label, from = from.as_str(), to = to.as_str(), "navigated");
        }

        Transition {
            from,
            to,
            redirected,
        }
    }

    /// Re-runs the access guard against the current session.
    pub fn enforce_guard(&mut self) -> bool {
        let (next, redirected) = guard(std::mem::take(&mut self.session));
        self.session = next;
        if redirected {
            tracing::warn!("guard redirected stale session to role selection");
        }
        redirected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agricontract_domain::{mock_contracts, mock_products, Amount, ContractStatus, Offer, UserId};
    use time::macros::date;

    fn john() -> User {
        User {
            id: UserId::new("john"),
            name: "John Farmer".to_owned(),
            email: "john@farm.com".to_owned(),
            phone: "+1234567890".to_owned(),
            role: Role::Farmer,
        }
    }

    fn sarah() -> User {
        User {
            id: UserId::new("sarah"),
            name: "Sarah Buyer".to_owned(),
            email: "sarah@company.com".to_owned(),
            phone: "+1234567890".to_owned(),
            role: Role::Buyer,
        }
    }

    fn logged_in(role: Role, user: User) -> Navigator {
        let mut navigator = Navigator::new();
        navigator.apply(NavEvent::GetStarted);
        navigator.apply(NavEvent::SelectRole(role));
        navigator.apply(NavEvent::Login { role, user });
        navigator
    }

    fn every_destination() -> Vec<Destination> {
        let product = mock_products().remove(0);
        let thread = NegotiationThread::open(&product, &sarah(), 100, date!(2024 - 01 - 18));
        let draft = ContractDraft::from_accepted_offer(thread.clone(), thread.initial_offer.clone());
        let contract = mock_contracts().remove(0);
        let request = PaymentRequest::advance_for(contract.clone());
        let record = CompletionRecord::completed(
            request.clone(),
            time::macros::datetime!(2024-01-20 10:00 UTC),
        );
        vec![
            Destination::Dashboard(None),
            Destination::Products,
            Destination::ListProduct,
            Destination::ProductDetails(product),
            Destination::Contracts,
            Destination::Negotiation(thread),
            Destination::ContractFinalization(draft),
            Destination::ContractView(contract),
            Destination::Payment(request),
            Destination::Profile,
            Destination::Completion(record),
        ]
    }

    #[test]
    fn navigator_starts_on_landing_with_empty_session() {
        let navigator = Navigator::new();
        assert_eq!(navigator.session(), &Session::default());
        assert_eq!(navigator.current_page(), PageId::Landing);
    }

    #[test]
    fn page_ids_are_unique() {
        let mut names = PageId::ALL.iter().map(|page| page.as_str()).collect::<Vec<_>>();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PageId::ALL.len());
    }

    #[test]
    fn select_role_moves_to_login_with_role() {
        let session = reduce(Session::default(), NavEvent::SelectRole(Role::Buyer));
        assert_eq!(session.current_page, PageId::Login);
        assert_eq!(session.selected_role, Some(Role::Buyer));
        assert!(session.current_user.is_none());
    }

    #[test]
    fn back_to_role_selection_clears_role() {
        let session = reduce(Session::default(), NavEvent::SelectRole(Role::Farmer));
        let session = reduce(session, NavEvent::BackToRoleSelection);
        assert_eq!(session.current_page, PageId::UserTypeSelection);
        assert_eq!(session.selected_role, None);
    }

    #[test]
    fn login_lands_on_dashboard_and_drops_payload() {
        let session = Session {
            current_page: PageId::Login,
            selected_role: Some(Role::Farmer),
            page_data: Some(PageData::Product(mock_products().remove(0))),
            ..Session::default()
        };
        let session = reduce(
            session,
            NavEvent::Login {
                role: Role::Farmer,
                user: john(),
            },
        );
        assert_eq!(session.current_page, PageId::Dashboard);
        assert_eq!(session.current_user, Some(john()));
        assert!(session.page_data.is_none());
    }

    #[test]
    fn logout_always_resets_identity_from_any_page() {
        for destination in every_destination() {
            let mut navigator = logged_in(Role::Buyer, sarah());
            navigator.apply(NavEvent::Navigate(destination));
            navigator.apply(NavEvent::Logout);
            assert_eq!(
                navigator.session(),
                &Session {
                    current_page: PageId::UserTypeSelection,
                    current_user: None,
                    selected_role: None,
                    page_data: None,
                }
            );
        }
    }

    #[test]
    fn protected_pages_redirect_without_user() {
        for destination in every_destination() {
            let mut navigator = Navigator::new();
            navigator.apply(NavEvent::SelectRole(Role::Farmer));
            let transition = navigator.apply(NavEvent::Navigate(destination));
            assert!(transition.redirected);
            assert_eq!(navigator.current_page(), PageId::UserTypeSelection);
            assert!(navigator.session().page_data.is_none());
        }
    }

    #[test]
    fn authenticated_pages_always_see_a_user() {
        for destination in every_destination() {
            let mut navigator = logged_in(Role::Farmer, john());
            let page = destination.page();
            let transition = navigator.apply(NavEvent::Navigate(destination));
            assert!(!transition.redirected);
            assert_eq!(navigator.current_page(), page);
            assert!(navigator.current_user().is_some());
            assert!(navigator.session().selected_role.is_some());
        }
    }

    #[test]
    fn login_page_without_role_redirects() {
        let (session, redirected) = guard(Session {
            current_page: PageId::Login,
            ..Session::default()
        });
        assert!(redirected);
        assert_eq!(session.current_page, PageId::UserTypeSelection);
    }

    #[test]
    fn product_details_carries_the_product_payload() {
        let product = mock_products().remove(1);
        let mut navigator = logged_in(Role::Farmer, john());
        navigator.apply(NavEvent::Navigate(Destination::ProductDetails(
            product.clone(),
        )));
        assert_eq!(navigator.current_page(), PageId::ProductDetails);
        assert_eq!(
            navigator.session().page_data,
            Some(PageData::Product(product))
        );
    }

    #[test]
    fn contract_finalization_keeps_agreed_terms_exactly() {
        let offer = Offer {
            quantity: 100,
            price_per_unit: Amount::from_whole(45),
            total_price: Amount::from_whole(4500),
            delivery_date: date!(2024 - 02 - 01),
        };
        let product = mock_products().remove(0);
        let thread = NegotiationThread::open(&product, &sarah(), 100, date!(2024 - 01 - 18));
        let mut navigator = logged_in(Role::Buyer, sarah());
        navigator.apply(NavEvent::Navigate(Destination::ContractFinalization(
            ContractDraft::from_accepted_offer(thread, offer.clone()),
        )));

        let Some(PageData::ContractDraft(draft)) = &navigator.session().page_data else {
            panic!("expected contract draft payload");
        };
        assert_eq!(draft.agreed_terms, offer);
        assert_eq!(draft.status, ContractStatus::PendingSignature);
    }

    #[test]
    fn dashboard_without_notice_has_no_payload() {
        let mut navigator = logged_in(Role::Buyer, sarah());
        navigator.apply(NavEvent::Navigate(Destination::Products));
        navigator.apply(NavEvent::Navigate(Destination::Dashboard(None)));
        assert_eq!(navigator.current_page(), PageId::Dashboard);
        assert!(navigator.session().page_data.is_none());
    }
}
