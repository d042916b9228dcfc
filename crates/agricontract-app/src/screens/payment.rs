use std::sync::Arc;

use agricontract_domain::{
    CardDetails, CompletionRecord, PaymentMethod, PaymentRequest, PaymentStep, User,
    PAYMENT_STEPS,
};

use crate::forms::{FieldKind, Form, FormField};
use crate::intents::Intent;
use crate::navigator::Destination;
use crate::simulation::PaymentProcessor;
use crate::tasks::ScreenTasks;

use super::{Outcome, ScreenContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Method,
    Name,
    Number,
    Expiry,
    Cvv,
}

impl FormField for CardField {
    const ALL: &'static [Self] = &[
        Self::Method,
        Self::Name,
        Self::Number,
        Self::Expiry,
        Self::Cvv,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Method => "Payment method",
            Self::Name => "Cardholder name",
            Self::Number => "Card number",
            Self::Expiry => "Expiry (MM/YY)",
            Self::Cvv => "CVV",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            Self::Method => FieldKind::Choice,
            Self::Cvv => FieldKind::Secret,
            _ => FieldKind::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentPhase {
    Entering,
    /// `step` is the last step that finished, if any.
    Processing { step: Option<PaymentStep> },
    Completed,
}

#[derive(Debug)]
enum PaymentEvent {
    Progress(PaymentStep),
}

pub struct PaymentScreen {
    pub user: User,
    pub request: PaymentRequest,
    pub method: PaymentMethod,
    pub form: Form<CardField>,
    pub phase: PaymentPhase,
    processor: Arc<dyn PaymentProcessor>,
    tasks: ScreenTasks<PaymentEvent>,
}

impl std::fmt::Debug for PaymentScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentScreen")
            .field("contract", &self.request.contract.contract_id)
            .field("method", &self.method)
            .field("phase", &self.phase)
            .field("tasks", &self.tasks)
            .finish()
    }
}

impl PaymentScreen {
    pub fn new(user: User, request: PaymentRequest, processor: Arc<dyn PaymentProcessor>) -> Self {
        Self {
            user,
            request,
            method: PaymentMethod::default(),
            form: Form::new(),
            phase: PaymentPhase::Entering,
            processor,
            tasks: ScreenTasks::new("payment"),
        }
    }

    pub fn accepts_text(&self) -> bool {
        self.phase == PaymentPhase::Entering && self.form.accepts_text()
    }

    /// Back leaves the page only before the card is submitted.
    pub fn can_go_back(&self) -> bool {
        self.phase == PaymentPhase::Entering
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.phase, PaymentPhase::Processing { .. })
    }

    pub fn progress(&self) -> u8 {
        match self.phase {
            PaymentPhase::Entering | PaymentPhase::Processing { step: None } => 0,
            PaymentPhase::Processing { step: Some(step) } => step.progress,
            PaymentPhase::Completed => 100,
        }
    }

    pub fn card(&self) -> CardDetails {
        CardDetails {
            number: self.form.value(CardField::Number).to_owned(),
            expiry: self.form.value(CardField::Expiry).to_owned(),
            cvv: self.form.value(CardField::Cvv).to_owned(),
            name: self.form.value(CardField::Name).to_owned(),
        }
    }

    pub fn can_pay(&self) -> bool {
        self.phase == PaymentPhase::Entering && self.card().validate().is_ok()
    }

    fn cycle_method(&mut self, forward: bool) -> Outcome {
        if self.form.focused() != CardField::Method {
            return Outcome::Unchanged;
        }
        let all = PaymentMethod::ALL;
        let index = all
            .iter()
            .position(|candidate| *candidate == self.method)
            .unwrap_or(0);
        let next = if forward {
            all[(index + 1) % all.len()]
        } else {
            all[(index + all.len() - 1) % all.len()]
        };
        if !next.is_available() {
            return Outcome::Rejected(format!("{} is not available", next.label()));
        }
        self.method = next;
        Outcome::Updated
    }

    fn pay(&mut self) -> Outcome {
        if let Err(error) = self.card().validate() {
            return Outcome::rejected(error);
        }
        let processor = Arc::clone(&self.processor);
        let request = self.request.clone();
        let spawned = self.tasks.spawn_with(|sender| async move {
            for step in PAYMENT_STEPS {
                let finished = processor.process_step(&request, step).await;
                if sender.send(PaymentEvent::Progress(finished)).await.is_err() {
                    break;
                }
            }
        });
        if let Err(error) = spawned {
            return Outcome::rejected(error);
        }
        tracing::info!(
            contract = self.request.contract.contract_id.as_str(),
            amount = %self.request.payment_amount,
            card = self.card().masked_number().as_str(),
            "payment started"
        );
        self.phase = PaymentPhase::Processing { step: None };
        Outcome::Updated
    }

    fn finish(&self, ctx: &ScreenContext<'_>) -> Outcome {
        let record = CompletionRecord::completed(self.request.clone(), ctx.now);
        tracing::info!(
            transaction = record.transaction_id.as_str(),
            "payment completed"
        );
        Outcome::navigate(Destination::Completion(record))
    }

    pub fn handle(&mut self, intent: Intent, ctx: &mut ScreenContext<'_>) -> Outcome {
        match (self.phase, intent) {
            (PaymentPhase::Processing { .. }, _) => Outcome::Unchanged,
            (PaymentPhase::Completed, Intent::Submit) => self.finish(ctx),
            (PaymentPhase::Entering, Intent::Back) => {
                Outcome::navigate(Destination::ContractView(self.request.contract.clone()))
            }
            (PaymentPhase::Completed, _) => Outcome::Unchanged,
            (PaymentPhase::Entering, Intent::Insert(ch)) => Outcome::changed(self.form.insert(ch)),
            (PaymentPhase::Entering, Intent::DeleteBackward) => {
                Outcome::changed(self.form.backspace())
            }
            (PaymentPhase::Entering, Intent::FocusNext | Intent::SelectNext) => {
                self.form.focus_next();
                Outcome::Updated
            }
            (PaymentPhase::Entering, Intent::FocusPrevious | Intent::SelectPrevious) => {
                self.form.focus_previous();
                Outcome::Updated
            }
            (PaymentPhase::Entering, Intent::Increase) => self.cycle_method(true),
            (PaymentPhase::Entering, Intent::Decrease) => self.cycle_method(false),
            (PaymentPhase::Entering, Intent::Submit) => self.pay(),
            (PaymentPhase::Entering, _) => Outcome::Unchanged,
        }
    }

    pub fn tick(&mut self) -> Outcome {
        let mut changed = false;
        for PaymentEvent::Progress(step) in self.tasks.drain() {
            self.phase = if step.progress >= 100 {
                PaymentPhase::Completed
            } else {
                PaymentPhase::Processing { step: Some(step) }
            };
            changed = true;
        }
        Outcome::changed(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::NavEvent;
    use crate::screens::test_support::{buyer, now, rng};
    use crate::simulation::test_support::services;
    use agricontract_domain::{mock_contracts, PaymentStatus};
    use std::time::Duration;

    fn screen() -> PaymentScreen {
        let request = PaymentRequest::advance_for(mock_contracts().remove(0));
        PaymentScreen::new(buyer(), request, services().payments)
    }

    fn fill_card(screen: &mut PaymentScreen) {
        screen.form.set(CardField::Name, "Sarah Buyer");
        screen.form.set(CardField::Number, "4111 1111 1111 1234");
        screen.form.set(CardField::Expiry, "12/27");
        screen.form.set(CardField::Cvv, "123");
    }

    #[test]
    fn paying_requires_cardholder_and_number() {
        let services = services();
        let mut rng = rng();
        let mut ctx = ScreenContext {
            services: &services,
            rng: &mut rng,
            now: now(),
        };
        let mut screen = screen();
        assert!(!screen.can_pay());
        assert_eq!(
            screen.handle(Intent::Submit, &mut ctx),
            Outcome::Rejected("cardholder name is required".to_owned())
        );
        screen.form.set(CardField::Name, "Sarah Buyer");
        assert_eq!(
            screen.handle(Intent::Submit, &mut ctx),
            Outcome::Rejected("card number is required".to_owned())
        );
        assert_eq!(screen.phase, PaymentPhase::Entering);
    }

    #[test]
    fn only_the_card_method_can_be_chosen() {
        let services = services();
        let mut rng = rng();
        let mut ctx = ScreenContext {
            services: &services,
            rng: &mut rng,
            now: now(),
        };
        let mut screen = screen();
        assert_eq!(screen.form.focused(), CardField::Method);
        assert!(!screen.accepts_text());
        assert!(matches!(
            screen.handle(Intent::Increase, &mut ctx),
            Outcome::Rejected(_)
        ));
        assert_eq!(screen.method, PaymentMethod::Card);
    }

    #[tokio::test(start_paused = true)]
    async fn progress_climbs_through_each_step_then_completes() {
        let services = services();
        let mut rng = rng();
        let mut ctx = ScreenContext {
            services: &services,
            rng: &mut rng,
            now: now(),
        };
        let mut screen = screen();
        fill_card(&mut screen);
        assert_eq!(screen.handle(Intent::Submit, &mut ctx), Outcome::Updated);
        assert!(screen.is_processing());
        assert!(!screen.accepts_text());
        assert_eq!(screen.handle(Intent::Back, &mut ctx), Outcome::Unchanged);

        let mut seen = Vec::new();
        for _ in PAYMENT_STEPS {
            tokio::time::sleep(Duration::from_millis(1_501)).await;
            tokio::task::yield_now().await;
            assert_eq!(screen.tick(), Outcome::Updated);
            seen.push(screen.progress());
        }
        assert_eq!(seen, vec![25, 50, 75, 100]);
        assert_eq!(screen.phase, PaymentPhase::Completed);
        assert!(!screen.can_go_back());
        assert_eq!(screen.handle(Intent::Back, &mut ctx), Outcome::Unchanged);
        assert_eq!(screen.phase, PaymentPhase::Completed);

        let Outcome::Navigate(NavEvent::Navigate(Destination::Completion(record))) =
            screen.handle(Intent::Submit, &mut ctx)
        else {
            panic!("expected completion");
        };
        assert_eq!(record.payment_status, PaymentStatus::Completed);
        assert!(record.transaction_id.as_str().starts_with("TXN-"));
        assert_eq!(record.paid_at, now());
        assert_eq!(record.payment, screen.request);
    }

    #[test]
    fn back_returns_to_the_contract() {
        let services = services();
        let mut rng = rng();
        let mut ctx = ScreenContext {
            services: &services,
            rng: &mut rng,
            now: now(),
        };
        let mut screen = screen();
        assert_eq!(
            screen.handle(Intent::Back, &mut ctx),
            Outcome::navigate(Destination::ContractView(mock_contracts().remove(0)))
        );
    }
}
