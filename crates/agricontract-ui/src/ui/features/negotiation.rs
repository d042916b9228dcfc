use agricontract_app::frontend::ui_boundary::{
    format_iso_date, ChatMessage, Composer, FormField, MessageBody, NegotiationScreen, Offer,
    OfferField,
};
use ratatui::text::{Line, Span};

use super::{form_lines, heading, label_value};
use crate::ui::theme::Palette;

fn offer_summary(offer: &Offer) -> String {
    format!(
        "{} units at {} = {}, deliver by {}",
        offer.quantity,
        offer.price_per_unit,
        offer.total_price,
        format_iso_date(offer.delivery_date)
    )
}

fn message_lines(
    message: &ChatMessage,
    own: bool,
    palette: &Palette,
) -> Vec<Line<'static>> {
    let (who, style) = if own {
        ("You".to_owned(), palette.accent)
    } else {
        (message.sender_name.clone(), palette.title)
    };
    let stamp = format!("{:02}:{:02}", message.sent_at.hour(), message.sent_at.minute());
    let header = Line::from(vec![
        Span::styled(who, style),
        Span::styled(format!("  {stamp}"), palette.muted),
    ]);
    let body = match &message.body {
        MessageBody::Text(text) => Line::from(format!("  {text}")),
        MessageBody::Offer { label, offer } => Line::from(vec![
            Span::styled(format!("  [{label}] "), palette.success),
            Span::raw(offer_summary(offer)),
        ]),
    };
    vec![header, body]
}

pub(super) fn negotiation(screen: &NegotiationScreen, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading(
            format!(
                "{} with {}",
                screen.thread.product_name,
                screen.counterparty_name()
            ),
            palette,
        ),
        Line::default(),
    ];
    for message in &screen.messages {
        lines.extend(message_lines(message, message.is_from(&screen.user.id), palette));
    }
    if screen.awaiting_reply() {
        lines.push(Line::from(Span::styled(
            format!("{} is typing...", screen.counterparty_name()),
            palette.muted,
        )));
    }
    lines.push(Line::default());
    if let Some(offer) = screen.acceptable_offer() {
        if screen.accepting_own_offer() {
            lines.push(label_value("Your offer", offer_summary(offer), palette));
            lines.push(Line::from(Span::styled(
                format!(
                    "{} has not countered yet. Accepting confirms your own offer.",
                    screen.counterparty_name()
                ),
                palette.warning,
            )));
        } else {
            lines.push(label_value("Offer on the table", offer_summary(offer), palette));
        }
    }
    match screen.composer {
        Composer::Message => {
            lines.push(label_value(
                "Message",
                format!("{}_", screen.draft.value()),
                palette,
            ));
        }
        Composer::Offer => {
            lines.push(heading("Counter offer", palette));
            lines.extend(form_lines(
                &screen.offer_form,
                OfferField::ALL,
                true,
                palette,
                |_| None,
            ));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{rendered, signed_in};
    use agricontract_app::frontend::ui_boundary::{AppController, Intent, ScreenAction};

    fn negotiating() -> AppController {
        let mut controller = signed_in(ScreenAction::ChooseBuyer);
        controller.apply(Intent::Submit);
        controller.apply(Intent::Submit);
        controller
    }

    #[test]
    fn chat_shows_greeting_and_initial_offer() {
        let text = rendered(&negotiating());
        assert!(text.contains("Organic Tomatoes with John Smith"));
        assert!(text.contains("Hi John Smith, I'm interested in your Organic Tomatoes."));
        assert!(text.contains("[Initial offer] 100 units at $45 = $4,500"));
        assert!(text.contains("Message: _"));
        assert!(text.contains("Your offer: 100 units at $45 = $4,500"));
        assert!(text.contains("John Smith has not countered yet. Accepting confirms your own offer."));
    }

    #[test]
    fn offer_composer_replaces_the_message_box() {
        let mut controller = negotiating();
        controller.apply(Intent::Action(ScreenAction::ToggleOfferForm));
        let text = rendered(&controller);
        assert!(text.contains("Counter offer"));
        assert!(text.contains("Price per unit"));
        assert!(!text.contains("Message: _"));
    }
}
