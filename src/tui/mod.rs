//! Terminal chart viewer for aggregated reports.
//!
//! Static charts over a finished report: Tab/arrows cycle pages, q/Esc quits.

mod charts;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;
use std::time::Duration;

use crate::model::{KmeansReport, SobelReport};

pub fn show_sobel(report: &SobelReport) -> Result<()> {
    run_viewer(2, |f, page| match page {
        0 => charts::draw_sobel_times(f, report),
        _ => charts::draw_sobel_speedup(f, report),
    })
}

pub fn show_kmeans(report: &KmeansReport) -> Result<()> {
    run_viewer(3, |f, page| match page {
        0 => charts::draw_kmeans_speedup(f, report),
        1 => charts::draw_kmeans_efficiency(f, report),
        _ => charts::draw_kmeans_boxplots(f, report),
    })
}

fn run_viewer<F>(pages: usize, mut draw: F) -> Result<()>
where
    F: FnMut(&mut Frame, usize),
{
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut page = 0usize;
    let res: Result<()> = loop {
        if let Err(e) = terminal.draw(|f| draw(f, page)) {
            break Err(e.into());
        }
        if event::poll(Duration::from_millis(100)).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        break Ok(())
                    }
                    KeyCode::Tab | KeyCode::Right => page = (page + 1) % pages,
                    KeyCode::BackTab | KeyCode::Left => page = (page + pages - 1) % pages,
                    _ => {}
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}
