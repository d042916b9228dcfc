use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Amount, Contract, DomainError, DomainResult, TransactionId};

/// Share of the contract total collected up front.
pub const ADVANCE_PERCENT: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentStep {
    pub message: &'static str,
    pub progress: u8,
}

pub const PAYMENT_STEPS: [PaymentStep; 4] = [
    PaymentStep {
        message: "Validating payment details...",
        progress: 25,
    },
    PaymentStep {
        message: "Processing payment...",
        progress: 50,
    },
    PaymentStep {
        message: "Confirming transaction...",
        progress: 75,
    },
    PaymentStep {
        message: "Payment completed successfully!",
        progress: 100,
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Card,
    BankTransfer,
    DigitalWallet,
}

impl PaymentMethod {
    pub const ALL: [Self; 3] = [Self::Card, Self::BankTransfer, Self::DigitalWallet];

    pub fn label(self) -> &'static str {
        match self {
            Self::Card => "Credit/Debit Card",
            Self::BankTransfer => "Bank Transfer (Coming Soon)",
            Self::DigitalWallet => "Digital Wallet (Coming Soon)",
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, Self::Card)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDetails {
    pub number: String,
    pub expiry: String,
    pub cvv: String,
    pub name: String,
}

impl CardDetails {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::missing("cardholder name"));
        }
        if self.number.trim().is_empty() {
            return Err(DomainError::missing("card number"));
        }
        Ok(())
    }

    /// Card number with everything but the last four digits hidden.
    pub fn masked_number(&self) -> String {
        let digits = self
            .number
            .chars()
            .filter(|ch| ch.is_ascii_digit())
            .collect::<Vec<_>>();
        let visible = digits.len().saturating_sub(4);
        digits
            .iter()
            .enumerate()
            .map(|(index, ch)| if index < visible { '*' } else { *ch })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub contract: Contract,
    pub payment_amount: Amount,
}

impl PaymentRequest {
    pub fn advance_for(contract: Contract) -> Self {
        let payment_amount = contract.final_terms.offer.total_price.percent(ADVANCE_PERCENT);
        Self {
            contract,
            payment_amount,
        }
    }

    pub fn balance_due(&self) -> Amount {
        Amount::from_cents(
            self.contract
                .final_terms
                .offer
                .total_price
                .cents()
                .saturating_sub(self.payment_amount.cents()),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub payment: PaymentRequest,
    pub payment_status: PaymentStatus,
    pub paid_at: OffsetDateTime,
    pub transaction_id: TransactionId,
}

impl CompletionRecord {
    pub fn completed(payment: PaymentRequest, paid_at: OffsetDateTime) -> Self {
        Self {
            payment,
            payment_status: PaymentStatus::Completed,
            paid_at,
            transaction_id: TransactionId::issued_at(paid_at),
        }
    }
}
