//! What terminal frontends are allowed to see.
//!
//! The UI crate imports only from [`ui_boundary`]; the workspace test
//! `mvc_boundary` keeps it from reaching into the domain crate directly.

pub mod ui_boundary {
    pub use agricontract_config::{SimulationRuntimeConfig, UiViewConfig};
    pub use crate::controller::{AppController, StatusLevel, StatusLine, Theme};
    pub use crate::forms::{FieldKind, Form, FormField, TextInput};
    pub use crate::intents::{Intent, ScreenAction};
    pub use crate::navigator::PageId;
    pub use crate::screens::{
        CardField, Composer, CompletionScreen, ContractFinalizationScreen, ContractViewScreen,
        ContractsScreen, DashboardScreen, LandingScreen, ListProductScreen, ListingField,
        LoginField, LoginMode, LoginScreen, NegotiationScreen, OfferField, PaymentPhase,
        PaymentScreen, ProductDetailsScreen, ProductsScreen, ProfileField, ProfileScreen,
        RoleSelectionScreen, Screen, TermsField,
    };
    pub use agricontract_domain::{
        format_iso_date, ActivityEntry, Amount, ChatMessage, CompletionRecord, Contract,
        ContractStatus, DashboardStat, MessageBody, Offer, PaymentMethod, Product, Review, Role,
        User,
    };
}
