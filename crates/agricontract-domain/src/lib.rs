//! Domain vocabulary shared by the AgriContract navigator, screens and
//! frontends: roles, users, products, offers, contracts and payments, plus the
//! mock catalog every screen renders from.

mod catalog;
mod contract;
mod dates;
mod error;
mod identifiers;
mod money;
mod negotiation;
mod payment;
mod product;
mod profile;
mod role;

pub use catalog::{dashboard_stats, mock_contracts, mock_products, DashboardStat};
pub use contract::{
    Contract, ContractDraft, ContractStatus, ContractTerms, SignatureState,
    DEFAULT_PAYMENT_TERMS, DEFAULT_PENALTIES, DEFAULT_QUALITY_STANDARDS,
};
pub use dates::{format_iso_date, parse_iso_date, today_utc};
pub use error::{DomainError, DomainResult};
pub use identifiers::{ContractId, MessageId, ProductId, TransactionId, UserId};
pub use money::Amount;
pub use negotiation::{ChatMessage, MessageBody, NegotiationThread, Offer};
pub use payment::{
    CardDetails, CompletionRecord, PaymentMethod, PaymentRequest, PaymentStatus, PaymentStep,
    ADVANCE_PERCENT, PAYMENT_STEPS,
};
pub use product::{DashboardNotice, Product, ProductCategory, ProductListing, QuantityUnit};
pub use profile::{profile_activity, profile_reviews, profile_stats, ActivityEntry, Review};
pub use role::{Role, User};
