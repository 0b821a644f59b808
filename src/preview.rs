use std::fmt::Write;

use crossterm::style::{Color as TermColor, Stylize};

use crate::cli::OutputFormat;
use crate::color::Color;
use crate::pipeline::assign::{Palette, SLOT_NAMES};

pub(crate) fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Black or white, whichever reads better on `c`.
pub(crate) fn contrast_fg(c: Color) -> TermColor {
    if c.luminance() > 0.5 {
        TermColor::Black
    } else {
        TermColor::White
    }
}

/// Colored swatch preview: the normal and bright halves as two rows of eight,
/// labelled with their ANSI position, then every slot with its value.
pub fn render(palette: &Palette, format: OutputFormat) -> String {
    let mut out = String::new();
    for (label, start, row) in [
        ("normal", 1, palette.normal()),
        ("bright", 9, palette.bright()),
    ] {
        let _ = write!(out, "{label:<8}");
        for (offset, c) in row.iter().enumerate() {
            let swatch = format!("{:^6}", start + offset);
            let _ = write!(out, "{} ", swatch.with(contrast_fg(*c)).on(term_color(*c)));
        }
        out.push('\n');
    }
    out.push('\n');
    for (name, c) in SLOT_NAMES.iter().zip(palette.slots()) {
        let _ = writeln!(
            out,
            "{}  {name:<12}{}",
            "    ".on(term_color(*c)),
            format.format(*c)
        );
    }
    out
}

/// Plain listing, one `name value` line per slot, background and foreground
/// first.
pub fn list(palette: &Palette, format: OutputFormat) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "background {}", format.format(palette.background()));
    let _ = writeln!(out, "foreground {}", format.format(palette.foreground()));
    for n in 1..=14 {
        if let Some(c) = palette.color(n) {
            let _ = writeln!(out, "color{n} {}", format.format(c));
        }
    }
    out
}
