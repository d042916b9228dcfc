use agricontract_app::frontend::ui_boundary::{
    format_iso_date, DashboardScreen, FormField, ListProductScreen, ListingField, Product,
    ProductDetailsScreen, ProductsScreen, Role,
};
use ratatui::text::{Line, Span};

use super::{form_lines, heading, label_value, list_row};
use crate::ui::theme::Palette;

fn product_row(product: &Product) -> String {
    format!(
        "{:<22} {:<11} {:>6} {:<4} {:>8}/{}  by {}",
        product.name,
        product.category.label(),
        product.quantity,
        product.unit.label(),
        product.price_per_unit.to_string(),
        product.unit.label(),
        product.farmer_name
    )
}

fn product_list(
    products: &[&Product],
    selected: usize,
    empty: &str,
    palette: &Palette,
) -> Vec<Line<'static>> {
    if products.is_empty() {
        return vec![Line::from(Span::styled(empty.to_owned(), palette.muted))];
    }
    products
        .iter()
        .enumerate()
        .map(|(index, product)| list_row(product_row(product), index == selected, palette))
        .collect()
}

pub(super) fn dashboard(screen: &DashboardScreen, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![heading(format!("Welcome back, {}", screen.user.name), palette)];
    if let Some(notice) = &screen.notice {
        lines.push(Line::from(Span::styled(notice.clone(), palette.success)));
    }
    lines.push(Line::default());
    lines.push(Line::from(
        screen
            .stats
            .iter()
            .flat_map(|stat| {
                [
                    Span::styled(format!("{}: ", stat.label), palette.muted),
                    Span::styled(format!("{}   ", stat.value), palette.accent),
                ]
            })
            .collect::<Vec<_>>(),
    ));
    lines.push(Line::default());
    let section = match screen.user.role {
        Role::Farmer => "Marketplace (your listings and others)",
        Role::Buyer => "Available products",
    };
    lines.push(heading(section, palette));
    let products = screen.products.iter().collect::<Vec<_>>();
    lines.extend(product_list(
        &products,
        screen.selected,
        "No products listed yet.",
        palette,
    ));
    lines
}

pub(super) fn products(screen: &ProductsScreen, palette: &Palette) -> Vec<Line<'static>> {
    let visible = screen.visible();
    let mut lines = vec![
        label_value("Search", format!("{}_", screen.search.value()), palette),
        Line::from(Span::styled(
            format!("{} of {} products", visible.len(), screen.catalog.len()),
            palette.muted,
        )),
        Line::default(),
    ];
    lines.extend(product_list(
        &visible,
        screen.selected,
        "No products match your search.",
        palette,
    ));
    lines
}

pub(super) fn list_product(screen: &ListProductScreen, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Tell buyers about your produce", palette),
        Line::default(),
    ];
    lines.extend(form_lines(
        &screen.form,
        ListingField::ALL,
        !screen.submitting,
        palette,
        |field| match field {
            ListingField::Category => Some(
                screen
                    .category
                    .map(|category| category.label().to_owned())
                    .unwrap_or_else(|| "select a category".to_owned()),
            ),
            ListingField::Unit => Some(screen.unit.label().to_owned()),
            _ => None,
        },
    ));
    lines.push(Line::default());
    let missing = screen.listing().missing_fields();
    let status = if screen.submitting {
        Span::styled("Listing product...", palette.accent)
    } else if missing.is_empty() {
        Span::styled("Ready to list.", palette.success)
    } else {
        Span::styled(format!("Still needed: {}", missing.join(", ")), palette.muted)
    };
    lines.push(Line::from(status));
    lines
}

pub(super) fn product_details(
    screen: &ProductDetailsScreen,
    palette: &Palette,
) -> Vec<Line<'static>> {
    let product = &screen.product;
    let mut lines = vec![
        heading(product.name.clone(), palette),
        Line::from(Span::styled(product.description.clone(), palette.muted)),
        Line::default(),
        label_value("Category", product.category.label(), palette),
        label_value(
            "Price",
            format!("{} per {}", product.price_per_unit, product.unit.label()),
            palette,
        ),
        label_value(
            "Available",
            format!("{} {}", product.quantity, product.unit.label()),
            palette,
        ),
        label_value("Harvested", format_iso_date(product.harvest_date), palette),
        label_value("Farmer", product.farmer_name.clone(), palette),
    ];
    if let Some(location) = &product.location {
        lines.push(label_value("Location", location.clone(), palette));
    }
    lines.push(Line::default());
    lines.push(heading("Why buy here", palette));
    for feature in [
        "Quality guaranteed by the contract terms",
        "Delivery date agreed up front",
        "Direct from the farm",
    ] {
        lines.push(Line::from(format!("  • {feature}")));
    }
    lines.push(Line::default());
    if screen.is_own_product() {
        lines.push(Line::from(Span::styled(
            "This is your listing. Buyers will contact you to negotiate.",
            palette.muted,
        )));
    } else {
        lines.push(label_value(
            "Quantity",
            format!(
                "{} {}  (up/down ±1, left/right ±10)",
                screen.quantity,
                product.unit.label()
            ),
            palette,
        ));
        lines.push(label_value(
            "Estimated total",
            screen.estimated_total().to_string(),
            palette,
        ));
    }
    lines
}
