use agricontract_domain::{
    format_iso_date, Amount, Contract, ContractDraft, ContractTerms, DomainResult, Offer, User,
};

use crate::forms::{Form, FormField};
use crate::intents::{Intent, ScreenAction};
use crate::navigator::Destination;

use super::{back_to_dashboard, offer_from_text, plain_amount, Outcome, ScreenContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermsField {
    Quantity,
    PricePerUnit,
    DeliveryDate,
    DeliveryLocation,
    PaymentTerms,
    QualityStandards,
    Penalties,
    AdditionalTerms,
}

impl FormField for TermsField {
    const ALL: &'static [Self] = &[
        Self::Quantity,
        Self::PricePerUnit,
        Self::DeliveryDate,
        Self::DeliveryLocation,
        Self::PaymentTerms,
        Self::QualityStandards,
        Self::Penalties,
        Self::AdditionalTerms,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Quantity => "Quantity",
            Self::PricePerUnit => "Price per unit",
            Self::DeliveryDate => "Delivery date",
            Self::DeliveryLocation => "Delivery location",
            Self::PaymentTerms => "Payment terms",
            Self::QualityStandards => "Quality standards",
            Self::Penalties => "Penalties",
            Self::AdditionalTerms => "Additional terms",
        }
    }
}

#[derive(Debug)]
pub struct ContractFinalizationScreen {
    pub user: User,
    pub draft: ContractDraft,
    pub form: Form<TermsField>,
    pub agreed: bool,
}

impl ContractFinalizationScreen {
    pub fn new(user: User, draft: ContractDraft) -> Self {
        let terms = ContractTerms::from_agreed(&draft.agreed_terms);
        let form = Form::new()
            .with(TermsField::Quantity, terms.offer.quantity.to_string())
            .with(
                TermsField::PricePerUnit,
                plain_amount(terms.offer.price_per_unit),
            )
            .with(
                TermsField::DeliveryDate,
                format_iso_date(terms.offer.delivery_date),
            )
            .with(TermsField::PaymentTerms, terms.payment_terms)
            .with(TermsField::QualityStandards, terms.quality_standards)
            .with(TermsField::Penalties, terms.penalties);
        Self {
            user,
            draft,
            form,
            agreed: false,
        }
    }

    pub fn actions(&self) -> Vec<ScreenAction> {
        vec![ScreenAction::ToggleAgreement, ScreenAction::BackToNegotiation]
    }

    pub fn can_generate(&self) -> bool {
        self.agreed && !self.form.value(TermsField::DeliveryLocation).trim().is_empty()
    }

    /// Total implied by the edited quantity and price, when both parse.
    pub fn preview_total(&self) -> Option<Amount> {
        self.edited_offer().ok().map(|offer| offer.total_price)
    }

    fn edited_offer(&self) -> DomainResult<Offer> {
        offer_from_text(
            self.form.value(TermsField::Quantity),
            self.form.value(TermsField::PricePerUnit),
            self.form.value(TermsField::DeliveryDate),
        )
    }

    fn final_terms(&self) -> DomainResult<ContractTerms> {
        Ok(ContractTerms {
            offer: self.edited_offer()?,
            delivery_location: self.form.value(TermsField::DeliveryLocation).trim().to_owned(),
            payment_terms: self.form.value(TermsField::PaymentTerms).trim().to_owned(),
            quality_standards: self.form.value(TermsField::QualityStandards).trim().to_owned(),
            penalties: self.form.value(TermsField::Penalties).trim().to_owned(),
            additional_terms: self.form.value(TermsField::AdditionalTerms).trim().to_owned(),
        })
    }

    fn generate(&self, ctx: &ScreenContext<'_>) -> Outcome {
        if !self.agreed {
            return Outcome::Rejected(
                "Agree to the terms and conditions before generating the contract".to_owned(),
            );
        }
        let generated = self
            .final_terms()
            .and_then(|terms| Contract::generate(self.draft.clone(), terms, ctx.now));
        match generated {
            Ok(contract) => {
                tracing::info!(contract = contract.contract_id.as_str(), "contract generated");
                Outcome::navigate(Destination::ContractView(contract))
            }
            Err(error) => Outcome::rejected(error),
        }
    }

    pub fn handle(&mut self, intent: Intent, ctx: &mut ScreenContext<'_>) -> Outcome {
        match intent {
            Intent::Insert(ch) => Outcome::changed(self.form.insert(ch)),
            Intent::DeleteBackward => Outcome::changed(self.form.backspace()),
            Intent::FocusNext | Intent::SelectNext => {
                self.form.focus_next();
                Outcome::Updated
            }
            Intent::FocusPrevious | Intent::SelectPrevious => {
                self.form.focus_previous();
                Outcome::Updated
            }
            Intent::Action(ScreenAction::ToggleAgreement) => {
                self.agreed = !self.agreed;
                Outcome::Updated
            }
            Intent::Action(ScreenAction::BackToNegotiation) => {
                Outcome::navigate(Destination::Negotiation(self.draft.thread.clone()))
            }
            Intent::Submit => self.generate(ctx),
            Intent::Back => back_to_dashboard(),
            _ => Outcome::Unchanged,
        }
    }
}
