use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::cli::OutputFormat;
use crate::color::Color as AppColor;
use crate::pipeline::assign::{Palette, SLOT_NAMES};

const SHORT_NAMES: [&str; 16] = [
    "bg", "c1", "c2", "c3", "c4", "c5", "c6", "c7", "c8", "c9", "c10", "c11", "c12", "c13",
    "c14", "fg",
];

/// A widget that renders the palette as an 8x2 grid of colored swatches in
/// ANSI order. Highlights the currently selected slot.
pub struct PaletteWidget<'a> {
    palette: &'a Palette,
    selected: Option<usize>,
    format: OutputFormat,
}

impl<'a> PaletteWidget<'a> {
    pub fn new(palette: &'a Palette, selected: Option<usize>, format: OutputFormat) -> Self {
        Self {
            palette,
            selected,
            format,
        }
    }
}

fn to_color(c: &AppColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Choose black or white foreground for readable text on the given background.
fn contrast_fg(c: &AppColor) -> Color {
    if c.luminance() > 0.5 {
        Color::Black
    } else {
        Color::White
    }
}

/// Build a row of colored swatches. Each swatch is 6 chars wide with the slot
/// name centered on the colored background. Selected slot gets bold + underline.
fn build_swatch_row(
    slots: &[AppColor; 16],
    start: usize,
    selected: Option<usize>,
) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (offset, c) in slots[start..start + 8].iter().enumerate() {
        let i = start + offset;
        let mut style = Style::default().bg(to_color(c)).fg(contrast_fg(c));
        if selected == Some(i) {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        spans.push(Span::styled(format!("{:^6}", SHORT_NAMES[i]), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Build a row of 1-based ANSI positions below the swatches.
fn build_index_row(start: usize, selected: Option<usize>) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for i in start..start + 8 {
        let style = if selected == Some(i) {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{:^6}", i + 1), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Info line for the selected slot: swatch, name, template token, value.
pub(crate) fn slot_info(
    palette: &Palette,
    slot: usize,
    format: OutputFormat,
) -> Option<Line<'static>> {
    let color = palette.slots().get(slot)?;
    Some(Line::from(vec![
        Span::raw("  "),
        Span::styled(
            format!("  {}  ", SHORT_NAMES[slot]),
            Style::default().bg(to_color(color)).fg(contrast_fg(color)),
        ),
        Span::raw(format!(
            "  {}  `@color{}`  {}  luminance {:.3}",
            SLOT_NAMES[slot],
            slot + 1,
            format.format(*color),
            color.luminance(),
        )),
    ]))
}

impl Widget for PaletteWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title("Palette");
        let inner = block.inner(area);
        block.render(area, buf);

        let slots = self.palette.slots();
        let mut lines = vec![
            Line::from("  Normal"),
            build_swatch_row(slots, 0, self.selected),
            build_index_row(0, self.selected),
            Line::from(""),
            Line::from("  Bright"),
            build_swatch_row(slots, 8, self.selected),
            build_index_row(8, self.selected),
        ];

        if let Some(info) = self
            .selected
            .and_then(|slot| slot_info(self.palette, slot, self.format))
        {
            lines.push(Line::from(""));
            lines.push(info);
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
