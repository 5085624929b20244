//! Help overlay: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect) {
    let popup = super::centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Keyboard");
    key(&mut lines, "h / l, ← / →", "Fewer / more samples per cohort");
    key(&mut lines, "p", "Show or hide individual points");
    key(&mut lines, "j / k", "Scroll cards or table rows");
    key(&mut lines, "t", "Switch between panels and summary table");
    key(&mut lines, "x", "Export figure and artifacts");
    key(&mut lines, "?", "Toggle this help");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Reading a card");
    key(&mut lines, "box", "Quartiles and median, whiskers at 1.5 IQR");
    key(&mut lines, "dots", "Individual samples, jittered");
    key(&mut lines, "bracket", "Reported significance between two cohorts");
    key(&mut lines, "a/b", "Configured mean / sample mean");

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help ")
        .title_style(theme::accent_bold());
    f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>14}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
