use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};

use crate::{Amount, DomainError, DomainResult, MessageId, Product, ProductId, Role, User, UserId};

const INITIAL_DELIVERY_LEAD_DAYS: i64 = 14;

/// Proposed contract terms exchanged during negotiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub quantity: u32,
    pub price_per_unit: Amount,
    pub total_price: Amount,
    pub delivery_date: Date,
}

impl Offer {
    /// Builds an offer whose total is `quantity * price_per_unit`.
    pub fn priced(quantity: u32, price_per_unit: Amount, delivery_date: Date) -> Self {
        Self {
            quantity,
            price_per_unit,
            total_price: price_per_unit.times(quantity),
            delivery_date,
        }
    }

    /// Like [`Offer::priced`], but refuses terms whose total exceeds
    /// [`Amount::MAX`].
    pub fn checked(quantity: u32, price_per_unit: Amount, delivery_date: Date) -> DomainResult<Self> {
        let total_price = price_per_unit.checked_times(quantity).ok_or_else(|| {
            DomainError::InvalidAmount {
                field: "total price",
                value: format!("{quantity} x {price_per_unit}"),
            }
        })?;
        Ok(Self {
            quantity,
            price_per_unit,
            total_price,
            delivery_date,
        })
    }

    pub fn with_recomputed_total(mut self) -> Self {
        self.total_price = self.price_per_unit.times(self.quantity);
        self
    }
}

/// Everything a negotiation screen needs to seed its conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationThread {
    pub product_id: ProductId,
    pub product_name: String,
    pub buyer_id: UserId,
    pub buyer_name: String,
    pub seller_id: UserId,
    pub seller_name: String,
    pub initial_offer: Offer,
}

impl NegotiationThread {
    /// Opens a thread from the product page. The initial offer uses the listed
    /// price and a delivery date two weeks out.
    pub fn open(product: &Product, buyer: &User, quantity: u32, today: Date) -> Self {
        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            buyer_id: buyer.id.clone(),
            buyer_name: buyer.name.clone(),
            seller_id: product.farmer_id.clone(),
            seller_name: product.farmer_name.clone(),
            initial_offer: Offer::priced(
                quantity,
                product.price_per_unit,
                today + Duration::days(INITIAL_DELIVERY_LEAD_DAYS),
            ),
        }
    }

    /// The party on the other side of the conversation from `role`.
    pub fn counterparty_of(&self, role: Role) -> (&UserId, &str) {
        match role {
            Role::Buyer => (&self.seller_id, self.seller_name.as_str()),
            Role::Farmer => (&self.buyer_id, self.buyer_name.as_str()),
        }
    }

    pub fn opening_messages(&self, at: OffsetDateTime) -> Vec<ChatMessage> {
        vec![
            ChatMessage {
                id: MessageId::new("1"),
                sender_id: self.buyer_id.clone(),
                sender_name: self.buyer_name.clone(),
                body: MessageBody::Text(format!(
                    "Hi {}, I'm interested in your {}. Here's my initial offer:",
                    self.seller_name, self.product_name
                )),
                sent_at: at,
            },
            ChatMessage {
                id: MessageId::new("2"),
                sender_id: self.buyer_id.clone(),
                sender_name: self.buyer_name.clone(),
                body: MessageBody::Offer {
                    label: "Initial offer".to_owned(),
                    offer: self.initial_offer.clone(),
                },
                sent_at: at,
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageBody {
    Text(String),
    Offer { label: String, offer: Offer },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender_id: UserId,
    pub sender_name: String,
    pub body: MessageBody,
    pub sent_at: OffsetDateTime,
}

impl ChatMessage {
    pub fn offer(&self) -> Option<&Offer> {
        match &self.body {
            MessageBody::Offer { offer, .. } => Some(offer),
            MessageBody::Text(_) => None,
        }
    }

    pub fn is_from(&self, user_id: &UserId) -> bool {
        &self.sender_id == user_id
    }
}
