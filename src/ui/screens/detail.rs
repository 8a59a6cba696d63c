use ratatui::{prelude::*, widgets::*};

use crate::present::RuleDetail;
use crate::ui::components::{rate_bar_spans, utils::centered_rect};
use crate::ui::styles::{secondary_line, tier_color, ACCENT};
use crate::ui::UiRoute;

const LABEL_WIDTH: usize = 30;

pub fn render_detail(f: &mut Frame<'_>, area: Rect, detail: &RuleDetail, scroll: u16) {
    let area = centered_rect(80, 85, area);
    f.render_widget(Clear, area);

    let mut lines: Vec<Line<'static>> = Vec::new();
    lines.push(Line::from("Rule".bold().fg(ACCENT)));
    lines.push(Line::from(detail.rule_text.clone()));
    lines.push(Line::default());

    for field in &detail.fields {
        lines.push(Line::from(vec![
            Span::from(format!("{:<width$}", field.label, width = LABEL_WIDTH)).bold(),
            Span::from(field.value.clone()),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from("Drug Categories".bold().fg(ACCENT)));
    let mut drugs = Vec::with_capacity(detail.drugs.len() * 2);
    for drug in &detail.drugs {
        let badge = if drug.enabled {
            Span::from(format!("{}: {}", drug.label, drug.badge())).fg(Color::Green)
        } else {
            Span::from(format!("{}: {}", drug.label, drug.badge())).dim()
        };
        drugs.push(badge);
        drugs.push(Span::from("   "));
    }
    lines.push(Line::from(drugs));

    lines.push(Line::default());
    lines.push(Line::from("Exclusion Rates".bold().fg(ACCENT)));
    for item in &detail.exclusion_rates {
        let mut spans = vec![Span::from(format!("{:<width$}", item.label, width = LABEL_WIDTH))];
        spans.extend(rate_bar_spans(item.width, tier_color(item.tier), &item.value));
        lines.push(Line::from(spans));
    }

    lines.push(Line::default());
    lines.push(secondary_line("↑/↓ scroll • Esc/Enter close"));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(UiRoute::Detail.title()),
        );
    f.render_widget(paragraph, area);
}
