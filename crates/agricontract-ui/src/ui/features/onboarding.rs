use agricontract_app::frontend::ui_boundary::{
    LoginMode, LoginScreen, Role, RoleSelectionScreen,
};
use ratatui::text::{Line, Span};

use super::{form_lines, heading, list_row};
use crate::ui::theme::Palette;

const FEATURES: [(&str, &str); 4] = [
    (
        "Transparent communication",
        "Chat directly with the other party and keep every offer on record.",
    ),
    (
        "Price negotiation",
        "Trade counter offers on quantity, price and delivery date.",
    ),
    (
        "Secure contracts",
        "Turn agreed terms into a contract both sides sign.",
    ),
    (
        "Secure payment processing",
        "Pay the advance once the contract is signed.",
    ),
];

const STEPS: [&str; 5] = [
    "Create your profile",
    "Browse and connect",
    "Negotiate terms",
    "Secure the contract",
    "Execute and pay",
];

pub(super) fn landing(palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("AgriContract", palette),
        Line::from("Contract farming that connects farmers and buyers, one contract at a time."),
        Line::default(),
        heading("Platform features", palette),
    ];
    for (title, description) in FEATURES {
        lines.push(Line::from(vec![
            Span::styled(format!("  {title}: "), palette.accent),
            Span::raw(description),
        ]));
    }
    lines.push(Line::default());
    lines.push(heading("How it works", palette));
    lines.extend(
        STEPS
            .iter()
            .enumerate()
            .map(|(index, step)| Line::from(format!("  {}. {step}", index + 1))),
    );
    lines
}

fn role_points(role: Role) -> [&'static str; 4] {
    match role {
        Role::Farmer => [
            "List your agricultural products",
            "Negotiate directly with buyers",
            "Secure guaranteed payments",
            "Manage contracts digitally",
        ],
        Role::Buyer => [
            "Browse fresh agricultural products",
            "Connect directly with farmers",
            "Ensure quality and freshness",
            "Secure contract agreements",
        ],
    }
}

pub(super) fn role_selection(screen: &RoleSelectionScreen, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Welcome to AgriContract", palette),
        Line::from("Choose how you want to use the platform."),
        Line::default(),
    ];
    for role in Role::ALL {
        let selected = screen.highlighted_role() == role;
        lines.push(list_row(format!("I'm a {}", role.label()), selected, palette));
        lines.push(Line::from(Span::styled(
            format!("    {}", role.tagline()),
            palette.muted,
        )));
        lines.extend(
            role_points(role)
                .iter()
                .map(|point| Line::from(format!("    • {point}"))),
        );
        lines.push(Line::default());
    }
    lines
}

pub(super) fn login(screen: &LoginScreen, palette: &Palette) -> Vec<Line<'static>> {
    let title = match screen.mode {
        LoginMode::Login => format!("Sign in as a {}", screen.role.label()),
        LoginMode::SignUp => format!("Create a {} account", screen.role.label()),
    };
    let mut lines = vec![heading(title, palette), Line::default()];
    lines.extend(form_lines(
        &screen.form,
        screen.mode.fields(),
        true,
        palette,
        |_| None,
    ));
    lines.push(Line::default());
    let hint = if screen.can_submit() {
        Span::styled("Ready to continue.", palette.success)
    } else {
        Span::styled("Email and password are required.", palette.muted)
    };
    lines.push(Line::from(hint));
    lines
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{controller, rendered};
    use agricontract_app::frontend::ui_boundary::{Intent, ScreenAction};

    #[test]
    fn landing_lists_features_and_steps() {
        let text = rendered(&controller());
        assert!(text.contains("Platform features"));
        assert!(text.contains("Price negotiation"));
        assert!(text.contains("5. Execute and pay"));
    }

    #[test]
    fn role_cards_mark_the_highlighted_role() {
        let mut controller = controller();
        controller.apply(Intent::Action(ScreenAction::GetStarted));
        controller.apply(Intent::SelectNext);
        let text = rendered(&controller);
        assert!(text.contains("  I'm a Farmer"));
        assert!(text.contains("> I'm a Buyer"));
        assert!(text.contains("Connect directly with farmers"));
    }

    #[test]
    fn login_masks_the_password() {
        let mut controller = controller();
        controller.apply(Intent::Action(ScreenAction::GetStarted));
        controller.apply(Intent::Action(ScreenAction::ChooseBuyer));
        controller.apply(Intent::FocusNext);
        for ch in "secret".chars() {
            controller.apply(Intent::Insert(ch));
        }
        let text = rendered(&controller);
        assert!(text.contains("Sign in as a Buyer"));
        assert!(text.contains("••••••"));
        assert!(!text.contains("secret"));
    }
}
