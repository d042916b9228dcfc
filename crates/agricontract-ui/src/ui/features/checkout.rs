use agricontract_app::frontend::ui_boundary::{
    format_iso_date, CardField, CompletionScreen, FormField, PaymentMethod, PaymentPhase,
    PaymentScreen,
};
use ratatui::text::{Line, Span};

use super::{form_lines, heading, label_value};
use crate::ui::theme::Palette;

const PROGRESS_WIDTH: usize = 20;

fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress.min(100)) * PROGRESS_WIDTH / 100;
    format!(
        "[{}{}] {progress}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled)
    )
}

pub(super) fn payment(screen: &PaymentScreen, palette: &Palette) -> Vec<Line<'static>> {
    let request = &screen.request;
    let contract = &request.contract;
    let mut lines = vec![
        heading(format!("Advance for {}", contract.product_name()), palette),
        label_value("Contract", contract.contract_id.as_str().to_owned(), palette),
        label_value(
            "Contract total",
            contract.final_terms.offer.total_price.to_string(),
            palette,
        ),
        label_value("Due now (50%)", request.payment_amount.to_string(), palette),
        label_value("Due on delivery", request.balance_due().to_string(), palette),
        Line::default(),
    ];

    match screen.phase {
        PaymentPhase::Entering => {
            lines.extend(form_lines(
                &screen.form,
                CardField::ALL,
                true,
                palette,
                |field| match field {
                    CardField::Method => Some(screen.method.label().to_owned()),
                    _ => None,
                },
            ));
            lines.push(Line::default());
            let unavailable = PaymentMethod::ALL
                .iter()
                .filter(|method| !method.is_available())
                .map(|method| method.label())
                .collect::<Vec<_>>();
            lines.push(Line::from(Span::styled(
                format!("Also listed: {}", unavailable.join(", ")),
                palette.muted,
            )));
            if !screen.can_pay() {
                lines.push(Line::from(Span::styled(
                    "Cardholder name and card number are required.",
                    palette.muted,
                )));
            }
        }
        PaymentPhase::Processing { step } => {
            let message = step.map(|step| step.message).unwrap_or("Starting payment...");
            lines.push(Line::from(Span::styled(message, palette.accent)));
            lines.push(Line::from(progress_bar(screen.progress())));
            lines.push(label_value(
                "Card",
                screen.card().masked_number(),
                palette,
            ));
        }
        PaymentPhase::Completed => {
            lines.push(Line::from(Span::styled(
                "Payment completed successfully!",
                palette.success,
            )));
            lines.push(Line::from(progress_bar(100)));
            lines.push(Line::from("Press enter to see your receipt."));
        }
    }
    lines
}

pub(super) fn completion(screen: &CompletionScreen, palette: &Palette) -> Vec<Line<'static>> {
    let record = &screen.record;
    let contract = &record.payment.contract;
    vec![
        heading("Payment received", palette),
        Line::from(Span::styled(
            "Your contract is now active. The farmer has been notified.",
            palette.success,
        )),
        Line::default(),
        label_value("Transaction", record.transaction_id.as_str().to_owned(), palette),
        label_value("Contract", contract.contract_id.as_str().to_owned(), palette),
        label_value("Product", contract.product_name().to_owned(), palette),
        label_value("Amount paid", record.payment.payment_amount.to_string(), palette),
        label_value(
            "Paid on",
            format!(
                "{} {:02}:{:02} UTC",
                format_iso_date(record.paid_at.date()),
                record.paid_at.hour(),
                record.paid_at.minute()
            ),
            palette,
        ),
        Line::default(),
        heading("What happens next", palette),
        Line::from(format!(
            "  1. {} prepares the delivery for {}",
            contract.thread.seller_name,
            format_iso_date(contract.delivery_date())
        )),
        Line::from("  2. Quality is checked against the agreed standards"),
        Line::from(format!(
            "  3. The balance of {} is paid on delivery",
            record.payment.balance_due()
        )),
    ]
}
