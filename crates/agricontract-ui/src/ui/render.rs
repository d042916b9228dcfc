use agricontract_app::frontend::ui_boundary::AppController;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::features::body_lines;
use super::theme::palette;
use super::view_state::ViewState;

pub(crate) fn draw(frame: &mut Frame<'_>, controller: &AppController) {
    let view = ViewState::from_controller(controller);
    let palette = palette(view.theme);
    let area = frame.area();
    let [header, body, status, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let mut header_spans = vec![Span::styled(" AgriContract ", palette.title)];
    if let Some(user_line) = view.user_line.as_ref() {
        header_spans.push(Span::styled(format!(" {user_line}"), palette.muted));
    }
    frame.render_widget(
        Paragraph::new(Line::from(header_spans)).style(palette.bar),
        header,
    );

    let body_block = Block::default()
        .title(Span::styled(format!(" {} ", view.title), palette.title))
        .borders(Borders::ALL)
        .border_style(palette.muted);
    frame.render_widget(
        Paragraph::new(body_lines(controller.screen(), &palette))
            .block(body_block)
            .style(palette.base)
            .wrap(Wrap { trim: false }),
        body,
    );

    let status_line = match view.status.as_ref() {
        Some(line) => Line::from(Span::styled(
            format!(" {}", line.message),
            palette.status(line.level),
        )),
        None => Line::default(),
    };
    frame.render_widget(Paragraph::new(status_line).style(palette.base), status);

    frame.render_widget(
        Paragraph::new(format!(" {}", view.footer_text())).style(palette.bar),
        footer,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::features::test_support::controller;
    use agricontract_app::frontend::ui_boundary::{Intent, ScreenAction};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text(controller: &AppController) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).expect("test terminal");
        terminal
            .draw(|frame| draw(frame, controller))
            .expect("draw frame");
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn landing_frame_has_title_body_and_footer() {
        let text = screen_text(&controller());
        assert!(text.contains("AgriContract"));
        assert!(text.contains("g get started"));
        assert!(text.contains("q quit"));
    }

    #[test]
    fn warnings_appear_on_the_status_line() {
        let mut controller = controller();
        controller.apply(Intent::Action(ScreenAction::GetStarted));
        controller.apply(Intent::Action(ScreenAction::ChooseBuyer));
        controller.apply(Intent::Submit);
        let status = controller.status().expect("empty login is rejected");
        let text = screen_text(&controller);
        assert!(text.contains(status.message.as_str()));
        assert!(text.contains("Sign in"));
    }
}
