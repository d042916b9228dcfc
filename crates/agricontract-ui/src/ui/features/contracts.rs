use agricontract_app::frontend::ui_boundary::{
    format_iso_date, Contract, ContractFinalizationScreen, ContractStatus, ContractViewScreen,
    ContractsScreen, FormField, Role, TermsField,
};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use super::{form_lines, heading, label_value, list_row};
use crate::ui::theme::Palette;

fn status_style(status: ContractStatus, palette: &Palette) -> Style {
    match status {
        ContractStatus::Active | ContractStatus::Completed => palette.success,
        ContractStatus::Cancelled => palette.warning,
        ContractStatus::Pending
        | ContractStatus::PendingSignature
        | ContractStatus::PendingSignatures => palette.accent,
    }
}

pub(super) fn contracts(screen: &ContractsScreen, palette: &Palette) -> Vec<Line<'static>> {
    let visible = screen.visible();
    let mut lines = vec![
        label_value("Search", format!("{}_", screen.search.value()), palette),
        Line::default(),
    ];
    if visible.is_empty() {
        lines.push(Line::from(Span::styled(
            "No contracts match your search.",
            palette.muted,
        )));
        return lines;
    }
    for (index, contract) in visible.iter().enumerate() {
        let row = format!(
            "{:<18} {:<20} {:>10}  due {}",
            contract.product_name(),
            contract.counterparty_name(screen.user.role),
            contract.final_terms.offer.total_price.to_string(),
            format_iso_date(contract.delivery_date())
        );
        let mut line = list_row(row, index == screen.selected, palette);
        line.spans.push(Span::styled(
            format!("  [{}]", contract.status.label()),
            status_style(contract.status, palette),
        ));
        lines.push(line);
    }
    lines
}

pub(super) fn finalization(
    screen: &ContractFinalizationScreen,
    palette: &Palette,
) -> Vec<Line<'static>> {
    let agreed = &screen.draft.agreed_terms;
    let thread = &screen.draft.thread;
    let mut lines = vec![
        heading(format!("Agreement for {}", thread.product_name), palette),
        label_value(
            "Parties",
            format!("{} (buyer) and {} (farmer)", thread.buyer_name, thread.seller_name),
            palette,
        ),
        label_value(
            "Agreed in chat",
            format!(
                "{} units at {} = {}",
                agreed.quantity, agreed.price_per_unit, agreed.total_price
            ),
            palette,
        ),
        Line::default(),
    ];
    lines.extend(form_lines(
        &screen.form,
        TermsField::ALL,
        true,
        palette,
        |_| None,
    ));
    lines.push(Line::default());
    if let Some(total) = screen.preview_total() {
        lines.push(label_value("Contract total", total.to_string(), palette));
    }
    let checkbox = if screen.agreed { "[x]" } else { "[ ]" };
    lines.push(Line::from(format!(
        "{checkbox} I agree to the terms and conditions of this contract"
    )));
    lines
}

fn signature_line(name: &str, signed: bool, palette: &Palette) -> Line<'static> {
    let (mark, style) = if signed {
        ("signed", palette.success)
    } else {
        ("awaiting signature", palette.muted)
    };
    Line::from(vec![
        Span::raw(format!("  {name}: ")),
        Span::styled(mark, style),
    ])
}

pub(super) fn contract_view(screen: &ContractViewScreen, palette: &Palette) -> Vec<Line<'static>> {
    let contract: &Contract = &screen.contract;
    let terms = &contract.final_terms;
    let mut lines = vec![
        heading(format!("Contract {}", contract.contract_id.as_str()), palette),
        Line::from(vec![
            Span::styled("Status: ", palette.muted),
            Span::styled(contract.status.label(), status_style(contract.status, palette)),
        ]),
        Line::default(),
        label_value("Product", contract.product_name().to_owned(), palette),
        label_value(
            "Quantity",
            terms.offer.quantity.to_string(),
            palette,
        ),
        label_value("Price per unit", terms.offer.price_per_unit.to_string(), palette),
        label_value("Total", terms.offer.total_price.to_string(), palette),
        label_value("Delivery date", format_iso_date(terms.offer.delivery_date), palette),
        label_value("Delivery location", terms.delivery_location.clone(), palette),
        label_value("Payment terms", terms.payment_terms.clone(), palette),
        label_value("Quality standards", terms.quality_standards.clone(), palette),
        label_value("Penalties", terms.penalties.clone(), palette),
    ];
    if !terms.additional_terms.is_empty() {
        lines.push(label_value("Additional terms", terms.additional_terms.clone(), palette));
    }
    lines.push(Line::default());
    lines.push(heading("Signatures", palette));
    lines.push(signature_line(
        &format!("{} (buyer)", contract.thread.buyer_name),
        screen.signatures.has_signed(Role::Buyer),
        palette,
    ));
    lines.push(signature_line(
        &format!("{} (farmer)", contract.thread.seller_name),
        screen.signatures.has_signed(Role::Farmer),
        palette,
    ));
    if screen.awaiting_countersignature() {
        lines.push(Line::from(Span::styled(
            format!(
                "Waiting for {} to sign...",
                contract.counterparty_name(screen.user.role)
            ),
            palette.muted,
        )));
    }
    if screen.signatures.both_signed() {
        lines.push(Line::from(Span::styled(
            "Both parties have signed. The advance payment can be made.",
            palette.success,
        )));
    }
    lines
}
