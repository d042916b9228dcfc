use agricontract_app::frontend::ui_boundary::{format_iso_date, FormField, ProfileField, ProfileScreen};
use ratatui::text::{Line, Span};

use super::{form_lines, heading, label_value};
use crate::ui::theme::Palette;

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "*".repeat(filled), ".".repeat(5 - filled))
}

pub(super) fn profile(screen: &ProfileScreen, palette: &Palette) -> Vec<Line<'static>> {
    let user = &screen.user;
    let mut lines = vec![
        heading(format!("{} ({})", user.name, user.role.label()), palette),
        Line::default(),
    ];

    let stats = screen
        .stats
        .iter()
        .map(|stat| format!("{}: {}", stat.label, stat.value))
        .collect::<Vec<_>>();
    lines.push(Line::from(Span::styled(stats.join("  |  "), palette.accent)));
    lines.push(Line::default());

    if screen.is_editing() {
        lines.push(heading("Editing profile", palette));
        lines.extend(form_lines(&screen.form, ProfileField::ALL, true, palette, |_| None));
    } else {
        lines.push(heading("Profile information", palette));
        lines.extend(
            ProfileField::ALL
                .iter()
                .map(|field| label_value(field.label(), screen.saved.value(*field), palette)),
        );
    }

    lines.push(Line::default());
    lines.push(heading("Recent activity", palette));
    lines.extend(screen.activity.iter().map(|entry| {
        Line::from(vec![
            Span::raw(format!("  {} ", entry.title)),
            Span::styled(
                format!("{}  {}", format_iso_date(entry.date), entry.amount),
                palette.muted,
            ),
        ])
    }));

    lines.push(Line::default());
    let rating = screen
        .average_rating()
        .map(|rating| format!("Reviews (average {rating:.1}/5)"))
        .unwrap_or_else(|| "Reviews".to_owned());
    lines.push(heading(rating, palette));
    for review in &screen.reviews {
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", stars(review.rating)), palette.warning),
            Span::raw(review.reviewer),
            Span::styled(format!("  {}", format_iso_date(review.date)), palette.muted),
        ]));
        lines.push(Line::from(format!("    \"{}\"", review.comment)));
    }
    lines
}
