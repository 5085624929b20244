//! Summary table view: configured mean ± sd per cohort and p-value label.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::Modifier;
use ratatui::text::Span;
use ratatui::widgets::{Cell, Row, Table};
use ratatui::Frame;

use cohortlab_core::summary::{headers, NOT_SIGNIFICANT};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let header = Row::new(
        headers()
            .into_iter()
            .map(|h| Cell::from(Span::styled(h, theme::accent_bold()))),
    )
    .bottom_margin(1);

    let rows = app.summary.iter().skip(app.scroll).map(|row| {
        let p_style = if row.p_value == NOT_SIGNIFICANT {
            theme::muted()
        } else {
            theme::warning().add_modifier(Modifier::BOLD)
        };
        Row::new(vec![
            Cell::from(Span::styled(row.marker.clone(), theme::text())),
            Cell::from(Span::styled(row.cells[0].clone(), theme::muted())),
            Cell::from(Span::styled(row.cells[1].clone(), theme::muted())),
            Cell::from(Span::styled(row.cells[2].clone(), theme::muted())),
            Cell::from(Span::styled(row.p_value.clone(), p_style)),
        ])
    });

    let widths = [
        Constraint::Min(32),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths).header(header).column_spacing(2);
    f.render_widget(table, area);
}
