use std::sync::Arc;

use agricontract_domain::{
    format_iso_date, ChatMessage, ContractDraft, DomainError, DomainResult, MessageBody, MessageId,
    NegotiationThread, Offer, User,
};

use crate::forms::{Form, FormField, TextInput};
use crate::intents::{Intent, ScreenAction};
use crate::navigator::Destination;
use crate::simulation::Counterparty;
use crate::tasks::ScreenTasks;

use super::{back_to_dashboard, offer_from_text, plain_amount, Outcome, ScreenContext};

const COUNTER_OFFER_LABEL: &str = "Counter offer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferField {
    Quantity,
    PricePerUnit,
    DeliveryDate,
}

impl FormField for OfferField {
    const ALL: &'static [Self] = &[Self::Quantity, Self::PricePerUnit, Self::DeliveryDate];

    fn label(self) -> &'static str {
        match self {
            Self::Quantity => "Quantity",
            Self::PricePerUnit => "Price per unit",
            Self::DeliveryDate => "Delivery date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Composer {
    #[default]
    Message,
    Offer,
}

#[derive(Debug)]
enum NegotiationEvent {
    Reply(String),
}

pub struct NegotiationScreen {
    pub user: User,
    pub thread: NegotiationThread,
    pub messages: Vec<ChatMessage>,
    pub draft: TextInput,
    pub offer_form: Form<OfferField>,
    pub composer: Composer,
    next_message_id: u64,
    counterparty: Arc<dyn Counterparty>,
    tasks: ScreenTasks<NegotiationEvent>,
}

impl std::fmt::Debug for NegotiationScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NegotiationScreen")
            .field("thread", &self.thread.product_name)
            .field("messages", &self.messages.len())
            .field("composer", &self.composer)
            .field("tasks", &self.tasks)
            .finish()
    }
}

impl NegotiationScreen {
    pub fn new(user: User, thread: NegotiationThread, counterparty: Arc<dyn Counterparty>) -> Self {
        let messages = thread.opening_messages(time::OffsetDateTime::now_utc());
        let offer_form = offer_form_from(&thread.initial_offer);
        Self {
            user,
            next_message_id: messages.len() as u64 + 1,
            messages,
            thread,
            draft: TextInput::default(),
            offer_form,
            composer: Composer::Message,
            counterparty,
            tasks: ScreenTasks::new("negotiation"),
        }
    }

    pub fn actions(&self) -> Vec<ScreenAction> {
        vec![ScreenAction::ToggleOfferForm, ScreenAction::AcceptOffer]
    }

    /// Name shown in the header: the other party from the user's side.
    pub fn counterparty_name(&self) -> &str {
        self.thread.counterparty_of(self.user.role).1
    }

    pub fn awaiting_reply(&self) -> bool {
        self.tasks.pending() > 0
    }

    /// The message an accept would agree to: the counterparty's latest
    /// offer, or the latest offer on the table when they have not made one.
    fn acceptable_message(&self) -> Option<&ChatMessage> {
        let offers = || self.messages.iter().rev().filter(|message| message.offer().is_some());
        offers()
            .find(|message| !message.is_from(&self.user.id))
            .or_else(|| offers().next())
    }

    pub fn acceptable_offer(&self) -> Option<&Offer> {
        self.acceptable_message().and_then(ChatMessage::offer)
    }

    /// True when accepting would confirm the user's own offer because the
    /// counterparty has not made one.
    pub fn accepting_own_offer(&self) -> bool {
        self.acceptable_message()
            .is_some_and(|message| message.is_from(&self.user.id))
    }

    fn next_id(&mut self) -> MessageId {
        let id = MessageId::new(self.next_message_id.to_string());
        self.next_message_id += 1;
        id
    }

    fn push_from_user(&mut self, body: MessageBody, ctx: &ScreenContext<'_>) {
        let message = ChatMessage {
            id: self.next_id(),
            sender_id: self.user.id.clone(),
            sender_name: self.user.name.clone(),
            body,
            sent_at: ctx.now,
        };
        self.messages.push(message);
    }

    fn send_message(&mut self, ctx: &mut ScreenContext<'_>) -> Outcome {
        if self.draft.value().trim().is_empty() {
            return Outcome::rejected(DomainError::missing("message"));
        }
        let text = self.draft.take();
        self.push_from_user(MessageBody::Text(text), ctx);

        let counterparty = Arc::clone(&self.counterparty);
        let thread = self.thread.clone();
        let replier = self.user.role.counterparty();
        if let Err(error) = self.tasks.spawn(async move {
            NegotiationEvent::Reply(counterparty.reply(&thread, replier).await)
        }) {
            return Outcome::rejected(error);
        }
        tracing::debug!(product = self.thread.product_name.as_str(), "scheduled counterparty reply");
        Outcome::Updated
    }

    fn send_offer(&mut self, ctx: &mut ScreenContext<'_>) -> Outcome {
        let offer = match self.offer_from_form() {
            Ok(offer) => offer,
            Err(error) => return Outcome::rejected(error),
        };
        self.push_from_user(
            MessageBody::Offer {
                label: COUNTER_OFFER_LABEL.to_owned(),
                offer,
            },
            ctx,
        );
        self.composer = Composer::Message;
        Outcome::Updated
    }

    fn offer_from_form(&self) -> DomainResult<Offer> {
        offer_from_text(
            self.offer_form.value(OfferField::Quantity),
            self.offer_form.value(OfferField::PricePerUnit),
            self.offer_form.value(OfferField::DeliveryDate),
        )
    }

    fn toggle_offer_form(&mut self) -> Outcome {
        self.composer = match self.composer {
            Composer::Message => {
                let latest = self
                    .messages
                    .iter()
                    .rev()
                    .find_map(ChatMessage::offer)
                    .unwrap_or(&self.thread.initial_offer);
                self.offer_form = offer_form_from(latest);
                Composer::Offer
            }
            Composer::Offer => Composer::Message,
        };
        Outcome::Updated
    }

    fn accept(&self) -> Outcome {
        let Some(offer) = self.acceptable_offer() else {
            return Outcome::Rejected("There is no offer to accept yet".to_owned());
        };
        tracing::info!(
            product = self.thread.product_name.as_str(),
            total = %offer.total_price,
            own_offer = self.accepting_own_offer(),
            "offer accepted"
        );
        Outcome::navigate(Destination::ContractFinalization(
            ContractDraft::from_accepted_offer(self.thread.clone(), offer.clone()),
        ))
    }

    pub fn handle(&mut self, intent: Intent, ctx: &mut ScreenContext<'_>) -> Outcome {
        match (self.composer, intent) {
            (_, Intent::Back) => back_to_dashboard(),
            (_, Intent::Action(ScreenAction::ToggleOfferForm)) => self.toggle_offer_form(),
            (_, Intent::Action(ScreenAction::AcceptOffer)) => self.accept(),
            (Composer::Message, Intent::Insert(ch)) => Outcome::changed(self.draft.insert(ch)),
            (Composer::Message, Intent::DeleteBackward) => Outcome::changed(self.draft.backspace()),
            (Composer::Message, Intent::Submit) => self.send_message(ctx),
            (Composer::Offer, Intent::Insert(ch)) => Outcome::changed(self.offer_form.insert(ch)),
            (Composer::Offer, Intent::DeleteBackward) => {
                Outcome::changed(self.offer_form.backspace())
            }
            (Composer::Offer, Intent::FocusNext | Intent::SelectNext) => {
                self.offer_form.focus_next();
                Outcome::Updated
            }
            (Composer::Offer, Intent::FocusPrevious | Intent::SelectPrevious) => {
                self.offer_form.focus_previous();
                Outcome::Updated
            }
            (Composer::Offer, Intent::Submit) => self.send_offer(ctx),
            _ => Outcome::Unchanged,
        }
    }

    pub fn tick(&mut self, ctx: &mut ScreenContext<'_>) -> Outcome {
        let mut changed = false;
        for event in self.tasks.drain() {
            let NegotiationEvent::Reply(text) = event;
            let (sender_id, sender_name) = self.thread.counterparty_of(self.user.role);
            let message = ChatMessage {
                id: MessageId::new(self.next_message_id.to_string()),
                sender_id: sender_id.clone(),
                sender_name: sender_name.to_owned(),
                body: MessageBody::Text(text),
                sent_at: ctx.now,
            };
            self.next_message_id += 1;
            self.messages.push(message);
            changed = true;
        }
        Outcome::changed(changed)
    }
}

fn offer_form_from(offer: &Offer) -> Form<OfferField> {
    Form::new()
        .with(OfferField::Quantity, offer.quantity.to_string())
        .with(
            OfferField::PricePerUnit,
            plain_amount(offer.price_per_unit),
        )
        .with(OfferField::DeliveryDate, format_iso_date(offer.delivery_date))
}
