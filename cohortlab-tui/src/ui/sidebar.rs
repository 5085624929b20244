//! Sidebar: sample-count slider, points toggle, seed info, cohort legend.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use cohortlab_core::domain::Cohort;

use crate::app::{AppState, MAX_SAMPLES, MIN_SAMPLES};
use crate::theme;

const BAR_WIDTH: usize = 20;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(" Controls ")
        .title_style(theme::panel_title(false));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled("Samples per cohort", theme::accent_bold())));
    lines.push(Line::from(vec![
        Span::styled(slider(app.sample_count), theme::accent()),
        Span::styled(format!(" {}", app.sample_count), theme::text()),
    ]));
    lines.push(Line::from(Span::styled(
        format!("{MIN_SAMPLES}..={MAX_SAMPLES}  [h/l] adjust"),
        theme::muted(),
    )));
    lines.push(Line::from(""));

    let (mark, style) = if app.show_points {
        ("[x]", theme::positive())
    } else {
        ("[ ]", theme::muted())
    };
    lines.push(Line::from(vec![
        Span::styled(format!("{mark} "), style),
        Span::styled("Show points", theme::text()),
        Span::styled("  [p]", theme::muted()),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Seed", theme::accent_bold())));
    lines.push(Line::from(vec![
        Span::styled(format!("{} ", app.config.seed), theme::text()),
        Span::styled(format!("({})", app.config.seed_mode.label()), theme::neutral()),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Cohorts", theme::accent_bold())));
    for cohort in Cohort::ALL {
        lines.push(Line::from(vec![
            Span::styled("██ ", Style::default().fg(theme::cohort_color(cohort))),
            Span::styled(cohort.label(), theme::text()),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// Inline slider, e.g. `[=====     ]`, filled in proportion to the range.
fn slider(n: usize) -> String {
    let span = (MAX_SAMPLES - MIN_SAMPLES) as f64;
    let frac = (n.saturating_sub(MIN_SAMPLES)) as f64 / span;
    let filled = (frac * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "=".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_ends() {
        assert_eq!(slider(MIN_SAMPLES), format!("[{}]", " ".repeat(BAR_WIDTH)));
        assert_eq!(slider(MAX_SAMPLES), format!("[{}]", "=".repeat(BAR_WIDTH)));
        assert_eq!(slider(MAX_SAMPLES + 10).len(), BAR_WIDTH + 2);
    }
}
