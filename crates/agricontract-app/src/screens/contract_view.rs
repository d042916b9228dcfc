use std::sync::Arc;

use agricontract_domain::{Contract, PaymentRequest, Role, SignatureState, User};

use crate::intents::{Intent, ScreenAction};
use crate::navigator::Destination;
use crate::simulation::Counterparty;
use crate::tasks::ScreenTasks;

use super::{back_to_dashboard, Outcome};

pub const DOWNLOAD_NOTICE: &str = "Contract PDF downloaded successfully!";

#[derive(Debug)]
enum SignatureEvent {
    Signed(Role),
}

pub struct ContractViewScreen {
    pub user: User,
    pub contract: Contract,
    pub signatures: SignatureState,
    counterparty: Arc<dyn Counterparty>,
    tasks: ScreenTasks<SignatureEvent>,
}

impl std::fmt::Debug for ContractViewScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractViewScreen")
            .field("contract", &self.contract.contract_id)
            .field("signatures", &self.signatures)
            .field("tasks", &self.tasks)
            .finish()
    }
}

impl ContractViewScreen {
    pub fn new(user: User, contract: Contract, counterparty: Arc<dyn Counterparty>) -> Self {
        Self {
            user,
            contract,
            signatures: SignatureState::default(),
            counterparty,
            tasks: ScreenTasks::new("contract-view"),
        }
    }

    pub fn actions(&self) -> Vec<ScreenAction> {
        vec![
            ScreenAction::Sign,
            ScreenAction::ProceedToPayment,
            ScreenAction::Download,
        ]
    }

    pub fn can_sign(&self) -> bool {
        self.signatures.can_sign(self.user.role)
    }

    pub fn awaiting_countersignature(&self) -> bool {
        self.tasks.pending() > 0
    }

    fn sign(&mut self) -> Outcome {
        let role = self.user.role;
        if !self.signatures.sign(role) {
            return Outcome::Rejected("You have already signed this contract".to_owned());
        }
        tracing::info!(
            contract = self.contract.contract_id.as_str(),
            signer = role.label(),
            "contract signed"
        );

        let signer = role.counterparty();
        if self.signatures.has_signed(signer) {
            return Outcome::Updated;
        }
        let counterparty = Arc::clone(&self.counterparty);
        let contract_id = self.contract.contract_id.clone();
        if let Err(error) = self.tasks.spawn(async move {
            SignatureEvent::Signed(counterparty.countersign(&contract_id, signer).await)
        }) {
            return Outcome::rejected(error);
        }
        Outcome::Updated
    }

    fn proceed_to_payment(&self) -> Outcome {
        if !self.signatures.both_signed() {
            return Outcome::Rejected(
                "Both parties must sign before payment can start".to_owned(),
            );
        }
        Outcome::navigate(Destination::Payment(PaymentRequest::advance_for(
            self.contract.clone(),
        )))
    }

    pub fn handle(&mut self, intent: Intent) -> Outcome {
        match intent {
            Intent::Action(ScreenAction::Sign) => self.sign(),
            Intent::Action(ScreenAction::ProceedToPayment) | Intent::Submit => {
                self.proceed_to_payment()
            }
            Intent::Action(ScreenAction::Download) => {
                tracing::info!(contract = self.contract.contract_id.as_str(), "contract downloaded");
                Outcome::Notice(DOWNLOAD_NOTICE.to_owned())
            }
            Intent::Back => back_to_dashboard(),
            _ => Outcome::Unchanged,
        }
    }

    pub fn tick(&mut self) -> Outcome {
        let mut changed = false;
        for SignatureEvent::Signed(role) in self.tasks.drain() {
            changed |= self.signatures.sign(role);
        }
        Outcome::changed(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::NavEvent;
    use crate::screens::test_support::{buyer, farmer};
    use crate::simulation::test_support::services;
    use agricontract_domain::{mock_contracts, Amount};
    use std::time::Duration;

    fn screen_for(user: User) -> ContractViewScreen {
        ContractViewScreen::new(user, mock_contracts().remove(0), services().counterparty)
    }

    #[test]
    fn payment_is_blocked_until_both_parties_sign() {
        let mut screen = screen_for(buyer());
        assert!(matches!(
            screen.handle(Intent::Action(ScreenAction::ProceedToPayment)),
            Outcome::Rejected(_)
        ));
    }

    #[test]
    fn download_reports_a_notice() {
        let mut screen = screen_for(farmer());
        assert_eq!(
            screen.handle(Intent::Action(ScreenAction::Download)),
            Outcome::Notice(DOWNLOAD_NOTICE.to_owned())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn counterparty_signs_after_the_user() {
        let mut screen = screen_for(buyer());
        assert_eq!(screen.handle(Intent::Action(ScreenAction::Sign)), Outcome::Updated);
        assert!(screen.signatures.buyer_signed);
        assert!(!screen.can_sign());
        assert!(screen.awaiting_countersignature());
        assert!(matches!(
            screen.handle(Intent::Action(ScreenAction::Sign)),
            Outcome::Rejected(_)
        ));

        tokio::time::sleep(Duration::from_millis(2_001)).await;
        tokio::task::yield_now().await;
        assert_eq!(screen.tick(), Outcome::Updated);
        assert!(screen.signatures.both_signed());

        let Outcome::Navigate(NavEvent::Navigate(Destination::Payment(request))) =
            screen.handle(Intent::Action(ScreenAction::ProceedToPayment))
        else {
            panic!("expected payment");
        };
        assert_eq!(
            request.payment_amount,
            mock_contracts()[0].final_terms.offer.total_price.percent(50)
        );
        assert!(request.payment_amount > Amount::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn countersignature_waits_for_the_configured_delay() {
        let mut screen = screen_for(farmer());
        screen.handle(Intent::Action(ScreenAction::Sign));
        assert!(screen.signatures.seller_signed);

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        assert_eq!(screen.tick(), Outcome::Unchanged);
        assert!(!screen.signatures.buyer_signed);

        tokio::time::sleep(Duration::from_millis(501)).await;
        tokio::task::yield_now().await;
        assert_eq!(screen.tick(), Outcome::Updated);
        assert!(screen.signatures.buyer_signed);
    }
}
