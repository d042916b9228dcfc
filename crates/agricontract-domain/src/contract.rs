use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{ContractId, DomainError, DomainResult, NegotiationThread, Offer, Role, UserId};

pub const DEFAULT_PAYMENT_TERMS: &str = "50% advance, 50% on delivery";
pub const DEFAULT_QUALITY_STANDARDS: &str = "Grade A quality as per industry standards";
pub const DEFAULT_PENALTIES: &str = "Late delivery: 2% per day penalty";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractStatus {
    Pending,
    PendingSignature,
    PendingSignatures,
    Active,
    Completed,
    Cancelled,
}

impl ContractStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::PendingSignature => "pending signature",
            Self::PendingSignatures => "pending signatures",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Terms agreed in the chat, handed to contract finalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDraft {
    pub thread: NegotiationThread,
    pub agreed_terms: Offer,
    pub status: ContractStatus,
}

impl ContractDraft {
    pub fn from_accepted_offer(thread: NegotiationThread, offer: Offer) -> Self {
        Self {
            thread,
            agreed_terms: offer,
            status: ContractStatus::PendingSignature,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTerms {
    pub offer: Offer,
    pub delivery_location: String,
    pub payment_terms: String,
    pub quality_standards: String,
    pub penalties: String,
    pub additional_terms: String,
}

impl ContractTerms {
    pub fn from_agreed(offer: &Offer) -> Self {
        Self {
            offer: offer.clone(),
            delivery_location: String::new(),
            payment_terms: DEFAULT_PAYMENT_TERMS.to_owned(),
            quality_standards: DEFAULT_QUALITY_STANDARDS.to_owned(),
            penalties: DEFAULT_PENALTIES.to_owned(),
            additional_terms: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub contract_id: ContractId,
    pub thread: NegotiationThread,
    pub agreed_terms: Offer,
    pub final_terms: ContractTerms,
    pub created_at: OffsetDateTime,
    pub status: ContractStatus,
}

impl Contract {
    /// Generates the signable contract. The delivery location is the only
    /// free-text term that must be filled in.
    pub fn generate(
        draft: ContractDraft,
        final_terms: ContractTerms,
        created_at: OffsetDateTime,
    ) -> DomainResult<Self> {
        if final_terms.delivery_location.trim().is_empty() {
            return Err(DomainError::missing("delivery location"));
        }
        Ok(Self {
            contract_id: ContractId::issued_at(created_at),
            thread: draft.thread,
            agreed_terms: draft.agreed_terms,
            final_terms,
            created_at,
            status: ContractStatus::PendingSignatures,
        })
    }

    pub fn product_name(&self) -> &str {
        &self.thread.product_name
    }

    pub fn delivery_date(&self) -> Date {
        self.final_terms.offer.delivery_date
    }

    /// Name of the other party as seen by `role`.
    pub fn counterparty_name(&self, role: Role) -> &str {
        self.thread.counterparty_of(role).1
    }

    pub fn involves(&self, user_id: &UserId) -> bool {
        &self.thread.buyer_id == user_id || &self.thread.seller_id == user_id
    }

    /// Case-insensitive match on product name or the counterparty name.
    pub fn matches_search(&self, term: &str, viewer: Role) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.product_name().to_lowercase().contains(&term)
            || self.counterparty_name(viewer).to_lowercase().contains(&term)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureState {
    pub buyer_signed: bool,
    pub seller_signed: bool,
}

impl SignatureState {
    pub fn has_signed(&self, role: Role) -> bool {
        match role {
            Role::Buyer => self.buyer_signed,
            Role::Farmer => self.seller_signed,
        }
    }

    pub fn can_sign(&self, role: Role) -> bool {
        !self.has_signed(role)
    }

    /// Records a signature; returns false if `role` had already signed.
    pub fn sign(&mut self, role: Role) -> bool {
        let slot = match role {
            Role::Buyer => &mut self.buyer_signed,
            Role::Farmer => &mut self.seller_signed,
        };
        if *slot {
            return false;
        }
        *slot = true;
        true
    }

    pub fn both_signed(&self) -> bool {
        self.buyer_signed && self.seller_signed
    }
}
