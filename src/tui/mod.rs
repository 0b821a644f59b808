pub mod widgets;

use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use ratatui::{DefaultTerminal, Frame};

use crate::cli::OutputFormat;
use crate::pipeline::assign::{Palette, SLOT_COUNT};
use widgets::PaletteWidget;

/// State for the interactive palette viewer.
pub struct TuiApp {
    pub palette: Palette,
    pub image_path: PathBuf,
    pub method: &'static str,
    pub format: OutputFormat,
    pub selected: usize,
}

impl TuiApp {
    pub fn new(
        palette: Palette,
        image_path: PathBuf,
        method: &'static str,
        format: OutputFormat,
    ) -> Self {
        Self {
            palette,
            image_path,
            method,
            format,
            selected: 0,
        }
    }

    /// Apply one key press. Returns `true` when the viewer should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected = (self.selected + SLOT_COUNT - 1) % SLOT_COUNT;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.selected = (self.selected + 1) % SLOT_COUNT;
            }
            // swap between the normal and bright row
            KeyCode::Up | KeyCode::Down | KeyCode::Char('k') | KeyCode::Char('j') => {
                self.selected = (self.selected + 8) % SLOT_COUNT;
            }
            _ => {}
        }
        false
    }
}

/// Launch the viewer and block until the user quits.
pub fn run(mut app: TuiApp) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut TuiApp) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.handle_key(key.code) {
                return Ok(());
            }
        }
    }
}

fn draw(frame: &mut Frame, app: &TuiApp) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(format!(" pal  {}  [{}]", app.image_path.display(), app.method)),
        header,
    );
    frame.render_widget(
        PaletteWidget::new(&app.palette, Some(app.selected), app.format),
        body,
    );
    frame.render_widget(
        Paragraph::new(" ←/→ move   ↑/↓ normal/bright   q quit")
            .style(Style::default().fg(Color::DarkGray)),
        footer,
    );
}
