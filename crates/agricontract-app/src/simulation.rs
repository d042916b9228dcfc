//! Simulated parties the demo talks to.
//!
//! Each seam is an async trait so screens can be driven by scripted or
//! instant implementations in tests. The default implementations wait for the
//! configured delay and then answer.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use agricontract_config::SimulationRuntimeConfig;
use agricontract_domain::{
    ContractId, DomainResult, NegotiationThread, PaymentRequest, PaymentStep, Product, Role,
};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SCRIPTED_REPLIES: [&str; 4] = [
    "Thanks for your interest! Let me review your offer.",
    "That's a good starting point. Can we discuss the delivery timeline?",
    "I appreciate the offer. The quantity works well for me.",
    "Let me check my inventory and get back to you.",
];

#[async_trait]
pub trait Counterparty: Send + Sync {
    /// Answers a chat message in `thread` on behalf of `replier`.
    async fn reply(&self, thread: &NegotiationThread, replier: Role) -> String;

    /// Countersigns `contract` as `signer` and reports the role that signed.
    async fn countersign(&self, contract: &ContractId, signer: Role) -> Role;
}

#[async_trait]
pub trait ListingDesk: Send + Sync {
    async fn submit(&self, product: Product) -> DomainResult<Product>;
}

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Completes one processing step for `request`.
    async fn process_step(&self, request: &PaymentRequest, step: PaymentStep) -> PaymentStep;
}

/// Handles to every simulated party, cloned into screens as they are built.
#[derive(Clone)]
pub struct Services {
    pub counterparty: Arc<dyn Counterparty>,
    pub listing_desk: Arc<dyn ListingDesk>,
    pub payments: Arc<dyn PaymentProcessor>,
}

impl Services {
    pub fn simulated(config: &SimulationRuntimeConfig) -> Self {
        Self {
            counterparty: Arc::new(SimulatedCounterparty::new(config)),
            listing_desk: Arc::new(SimulatedListingDesk::new(config)),
            payments: Arc::new(SimulatedPaymentProcessor::new(config)),
        }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Services")
    }
}

pub struct SimulatedCounterparty {
    reply_delay: Duration,
    signature_delay: Duration,
    rng: Mutex<StdRng>,
}

impl SimulatedCounterparty {
    pub fn new(config: &SimulationRuntimeConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            reply_delay: Duration::from_millis(config.counterparty_reply_delay_ms),
            signature_delay: Duration::from_millis(config.counterparty_signature_delay_ms),
            rng: Mutex::new(rng),
        }
    }

    fn pick_reply(&self) -> &'static str {
        let index = match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(0..SCRIPTED_REPLIES.len()),
            Err(poisoned) => poisoned.into_inner().gen_range(0..SCRIPTED_REPLIES.len()),
        };
        SCRIPTED_REPLIES[index]
    }
}

#[async_trait]
impl Counterparty for SimulatedCounterparty {
    async fn reply(&self, thread: &NegotiationThread, replier: Role) -> String {
        tokio::time::sleep(self.reply_delay).await;
        let reply = self.pick_reply();
        tracing::debug!(
            product = thread.product_name.as_str(),
            replier = replier.label(),
            "counterparty replied"
        );
        reply.to_owned()
    }

    async fn countersign(&self, contract: &ContractId, signer: Role) -> Role {
        tokio::time::sleep(self.signature_delay).await;
        tracing::debug!(
            contract = contract.as_str(),
            signer = signer.label(),
            "counterparty signed"
        );
        signer
    }
}

pub struct SimulatedListingDesk {
    submit_delay: Duration,
}

impl SimulatedListingDesk {
    pub fn new(config: &SimulationRuntimeConfig) -> Self {
        Self {
            submit_delay: Duration::from_millis(config.listing_submit_delay_ms),
        }
    }
}

#[async_trait]
impl ListingDesk for SimulatedListingDesk {
    async fn submit(&self, product: Product) -> DomainResult<Product> {
        tokio::time::sleep(self.submit_delay).await;
        tracing::info!(product = product.id.as_str(), "product listed");
        Ok(product)
    }
}

pub struct SimulatedPaymentProcessor {
    step_delay: Duration,
}

impl SimulatedPaymentProcessor {
    pub fn new(config: &SimulationRuntimeConfig) -> Self {
        Self {
            step_delay: Duration::from_millis(config.payment_step_delay_ms),
        }
    }
}

#[async_trait]
impl PaymentProcessor for SimulatedPaymentProcessor {
    async fn process_step(&self, request: &PaymentRequest, step: PaymentStep) -> PaymentStep {
        tokio::time::sleep(self.step_delay).await;
        tracing::debug!(
            contract = request.contract.contract_id.as_str(),
            progress = step.progress,
            "payment step finished"
        );
        step
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn config_with_seed(seed: u64) -> SimulationRuntimeConfig {
        SimulationRuntimeConfig {
            counterparty_reply_delay_ms: 2_000,
            counterparty_signature_delay_ms: 2_000,
            payment_step_delay_ms: 1_500,
            listing_submit_delay_ms: 2_000,
            rng_seed: Some(seed),
        }
    }

    pub fn services() -> Services {
        Services::simulated(&config_with_seed(7))
    }
}
