//! Page bodies. Each function turns one screen into styled lines; layout,
//! header and footer live in `render`.

mod checkout;
mod contracts;
mod marketplace;
mod negotiation;
mod onboarding;
mod profile;

use agricontract_app::frontend::ui_boundary::{FieldKind, Form, FormField, Screen};
use ratatui::text::{Line, Span};

use super::theme::Palette;

pub(crate) fn body_lines(screen: &Screen, palette: &Palette) -> Vec<Line<'static>> {
    match screen {
        Screen::Landing(_) => onboarding::landing(palette),
        Screen::UserTypeSelection(screen) => onboarding::role_selection(screen, palette),
        Screen::Login(screen) => onboarding::login(screen, palette),
        Screen::Dashboard(screen) => marketplace::dashboard(screen, palette),
        Screen::Products(screen) => marketplace::products(screen, palette),
        Screen::ListProduct(screen) => marketplace::list_product(screen, palette),
        Screen::ProductDetails(screen) => marketplace::product_details(screen, palette),
        Screen::Contracts(screen) => contracts::contracts(screen, palette),
        Screen::Negotiation(screen) => negotiation::negotiation(screen, palette),
        Screen::ContractFinalization(screen) => contracts::finalization(screen, palette),
        Screen::ContractView(screen) => contracts::contract_view(screen, palette),
        Screen::Payment(screen) => checkout::payment(screen, palette),
        Screen::Profile(screen) => profile::profile(screen, palette),
        Screen::Completion(screen) => checkout::completion(screen, palette),
    }
}

fn heading(text: impl Into<String>, palette: &Palette) -> Line<'static> {
    Line::from(Span::styled(text.into(), palette.title))
}

fn label_value(label: &str, value: impl Into<String>, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), palette.muted),
        Span::raw(value.into()),
    ])
}

fn list_row(text: String, selected: bool, palette: &Palette) -> Line<'static> {
    if selected {
        Line::from(Span::styled(format!("> {text}"), palette.selected))
    } else {
        Line::from(format!("  {text}"))
    }
}

/// Renders `fields` of `form`. `display` supplies values for choice fields
/// whose state lives outside the form.
fn form_lines<F: FormField>(
    form: &Form<F>,
    fields: &[F],
    active: bool,
    palette: &Palette,
    display: impl Fn(F) -> Option<String>,
) -> Vec<Line<'static>> {
    fields
        .iter()
        .map(|field| {
            let field = *field;
            let raw = form.value(field);
            let value = match field.kind() {
                FieldKind::Secret => "•".repeat(raw.chars().count()),
                FieldKind::Choice => format!("< {} >", display(field).unwrap_or_default()),
                FieldKind::Text => display(field).unwrap_or_else(|| raw.to_owned()),
            };
            let focused = active && form.focused() == field;
            let cursor = if focused && field.kind() != FieldKind::Choice {
                "_"
            } else {
                ""
            };
            let label_style = if focused { palette.selected } else { palette.muted };
            Line::from(vec![
                Span::styled(format!("{:<22}", field.label()), label_style),
                Span::raw(format!("{value}{cursor}")),
            ])
        })
        .collect()
}
