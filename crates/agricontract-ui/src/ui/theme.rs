use agricontract_app::frontend::ui_boundary::{StatusLevel, Theme};
use ratatui::style::{Color, Modifier, Style};

/// Styles used across every page. Dark follows the Nord palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Palette {
    pub base: Style,
    pub title: Style,
    pub accent: Style,
    pub muted: Style,
    pub selected: Style,
    pub success: Style,
    pub warning: Style,
    pub bar: Style,
}

pub(crate) fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            base: Style::default()
                .fg(Color::Rgb(216, 222, 233))
                .bg(Color::Rgb(46, 52, 64)),
            title: Style::default()
                .fg(Color::Rgb(235, 203, 139))
                .add_modifier(Modifier::BOLD),
            accent: Style::default().fg(Color::Rgb(136, 192, 208)),
            muted: Style::default().fg(Color::Rgb(129, 161, 193)),
            selected: Style::default()
                .fg(Color::Rgb(236, 239, 244))
                .bg(Color::Rgb(67, 76, 94))
                .add_modifier(Modifier::BOLD),
            success: Style::default().fg(Color::Rgb(163, 190, 140)),
            warning: Style::default().fg(Color::Rgb(191, 97, 106)),
            bar: Style::default()
                .fg(Color::Rgb(236, 239, 244))
                .bg(Color::Rgb(59, 66, 82)),
        },
        Theme::Light => Palette {
            base: Style::default()
                .fg(Color::Rgb(46, 52, 64))
                .bg(Color::Rgb(236, 239, 244)),
            title: Style::default()
                .fg(Color::Rgb(94, 129, 172))
                .add_modifier(Modifier::BOLD),
            accent: Style::default().fg(Color::Rgb(94, 129, 172)),
            muted: Style::default().fg(Color::Rgb(76, 86, 106)),
            selected: Style::default()
                .fg(Color::Rgb(46, 52, 64))
                .bg(Color::Rgb(216, 222, 233))
                .add_modifier(Modifier::BOLD),
            success: Style::default().fg(Color::Rgb(73, 120, 62)),
            warning: Style::default().fg(Color::Rgb(170, 60, 70)),
            bar: Style::default()
                .fg(Color::Rgb(46, 52, 64))
                .bg(Color::Rgb(216, 222, 233)),
        },
    }
}

impl Palette {
    pub(crate) fn status(&self, level: StatusLevel) -> Style {
        match level {
            StatusLevel::Info => self.success,
            StatusLevel::Warning => self.warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_use_distinct_backgrounds() {
        assert_ne!(palette(Theme::Dark).base.bg, palette(Theme::Light).base.bg);
        assert_eq!(
            palette(Theme::Dark).status(StatusLevel::Warning),
            palette(Theme::Dark).warning
        );
    }
}
