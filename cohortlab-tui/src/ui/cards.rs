//! Card grid: one box-and-strip canvas per marker.
//!
//! Every card carries its own y-axis label. Below the canvas each cohort
//! shows its configured mean next to the empirical mean of the clamped
//! sample, so drift from clamping is visible.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Color;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine, Points, Rectangle};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use cohortlab_core::domain::Cohort;
use cohortlab_core::panel::BOX_WIDTH;
use cohortlab_core::Panel;

use crate::app::AppState;
use crate::theme;

/// Height of one card row in terminal lines.
pub const CARD_HEIGHT: u16 = 16;

/// Vertical strokes used to shade a box.
const FILL_STROKES: usize = 12;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let panels = app.panels();
    if panels.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No panels to show.", theme::muted())),
            area,
        );
        return;
    }

    let columns = app.layout.columns;
    let visible_rows = visible_rows(area.height);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(area);

    for (slot, row_area) in row_areas.iter().enumerate() {
        let row = app.scroll + slot;
        let start = row * columns;
        if start >= panels.len() {
            break;
        }
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);
        for (col, cell) in cells.iter().enumerate() {
            let index = start + col;
            if let Some(panel) = panels.get(index) {
                let y_label = app
                    .layout
                    .shows_y_label(index)
                    .then_some(app.config.figure.y_label.as_str());
                render_card(f, *cell, panel, app.show_points, y_label);
            }
        }
    }
}

/// Card rows that fit in `height`, at least one.
pub fn visible_rows(height: u16) -> usize {
    usize::from((height / CARD_HEIGHT).max(1))
}

fn render_card(f: &mut Frame, area: Rect, panel: &Panel, show_points: bool, y_label: Option<&str>) {
    let title = match &panel.group {
        Some(group) => Line::from(vec![
            Span::styled(format!(" {} ", panel.marker), theme::accent_bold()),
            Span::styled(format!("{group} "), theme::muted()),
        ]),
        None => Line::from(Span::styled(format!(" {} ", panel.marker), theme::accent_bold())),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let y_upper = panel.y_upper();
    let header = match y_label {
        Some(label) => format!("{label}  0..{y_upper:.2}"),
        None => format!("0..{y_upper:.2}"),
    };
    f.render_widget(Paragraph::new(Span::styled(header, theme::muted())), parts[0]);

    let points: Vec<(f64, f64)> = if show_points {
        panel.points().map(|(_, x, y)| (x, y)).collect()
    } else {
        Vec::new()
    };

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-0.5, 2.5])
        .y_bounds([0.0, y_upper])
        .paint(|ctx| {
            draw_boxes(ctx, panel);
            ctx.layer();
            if !points.is_empty() {
                ctx.draw(&Points {
                    coords: &points,
                    color: theme::point_color(),
                });
            }
            draw_bracket(ctx, panel);
        });
    f.render_widget(canvas, parts[1]);

    f.render_widget(Paragraph::new(cohort_row(|c| c.label().to_string())), parts[2]);
    f.render_widget(
        Paragraph::new(cohort_row(|c| match panel.summary_for(c) {
            Some(s) => format!("{:.2}/{:.2}", s.configured_mean, s.empirical_mean),
            None => String::new(),
        })),
        parts[3],
    );
}

fn draw_boxes(ctx: &mut Context, panel: &Panel) {
    let half = BOX_WIDTH / 2.0;
    let cap = half / 2.0;
    for summary in &panel.cohorts {
        let x = summary.cohort.position() as f64;
        let b = &summary.summary;
        let color = theme::cohort_color(summary.cohort);

        for i in 0..=FILL_STROKES {
            let xi = x - half + BOX_WIDTH * i as f64 / FILL_STROKES as f64;
            ctx.draw(&line(xi, b.q1, xi, b.q3, color));
        }
        ctx.draw(&Rectangle {
            x: x - half,
            y: b.q1,
            width: BOX_WIDTH,
            height: b.iqr(),
            color: theme::TEXT,
        });
        ctx.draw(&line(x - half, b.median, x + half, b.median, theme::TEXT));
        ctx.draw(&line(x, b.q3, x, b.whisker_high, theme::TEXT));
        ctx.draw(&line(x, b.q1, x, b.whisker_low, theme::TEXT));
        ctx.draw(&line(x - cap, b.whisker_high, x + cap, b.whisker_high, theme::TEXT));
        ctx.draw(&line(x - cap, b.whisker_low, x + cap, b.whisker_low, theme::TEXT));
    }
}

fn draw_bracket(ctx: &mut Context, panel: &Panel) {
    let Some(bracket) = &panel.bracket else {
        return;
    };
    for pair in bracket.points.windows(2) {
        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
        ctx.draw(&line(x1, y1, x2, y2, theme::point_color()));
    }
    let (lx, ly) = bracket.label_pos;
    // Canvas text is anchored at its left edge.
    let shift = bracket.label.chars().count() as f64 * 0.03;
    ctx.print(
        lx - shift,
        ly,
        Span::styled(bracket.label.clone(), theme::warning()),
    );
}

fn line(x1: f64, y1: f64, x2: f64, y2: f64, color: Color) -> CanvasLine {
    CanvasLine {
        x1,
        y1,
        x2,
        y2,
        color,
    }
}

/// Three centred cells, one per cohort, in axis order.
fn cohort_row(cell: impl Fn(Cohort) -> String) -> Line<'static> {
    let spans: Vec<Span> = Cohort::ALL
        .into_iter()
        .map(|c| Span::styled(format!("{:^14}", cell(c)), theme::muted()))
        .collect();
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_least_one_row_is_visible() {
        assert_eq!(visible_rows(0), 1);
        assert_eq!(visible_rows(CARD_HEIGHT - 1), 1);
        assert_eq!(visible_rows(CARD_HEIGHT * 3 + 2), 3);
    }

    #[test]
    fn cohort_row_has_three_cells() {
        let row = cohort_row(|c| c.label().to_string());
        assert_eq!(row.spans.len(), 3);
        assert!(row.spans[2].content.contains("Vaka Grubu"));
    }
}
