use std::io;

use crossterm::event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use ratatui::Terminal;

use crate::cli::CommonArgs;
use crate::model::DateRange;
use crate::timeline::{CumulativeMode, Selection, Timeline};
use crate::util::resolve_window;

use super::events::{handle_key_events, handle_mouse_event, refresh_window};
use super::state::{TuiState, ViewMode};
use super::views::{
    draw_commits_view, draw_contributors_view, draw_help_overlay, draw_statistics_view,
    draw_timeline_view,
};

pub fn run(common: &CommonArgs, cumulative: CumulativeMode) -> io::Result<()> {
    let dataset = crate::cli::load_dataset(common)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    let records = dataset.records;

    let absolute = DateRange::from_records(&records);
    let window = resolve_window(&absolute, common.since.as_deref(), common.until.as_deref())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let timeline = Timeline::new(&records);
    let mut state = TuiState::new(Selection::with_window(absolute, window), cumulative);
    state.track = timeline.window(&absolute);
    refresh_window(&mut state, &timeline, &records);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    loop {
        state.expire_status();

        let draw_result = terminal.draw(|f| {
            let size = f.size();

            if state.show_help {
                draw_help_overlay(f, size);
                return;
            }

            let chunks = ratatui::layout::Layout::default()
                .direction(ratatui::layout::Direction::Vertical)
                .constraints([
                    ratatui::layout::Constraint::Length(3),
                    ratatui::layout::Constraint::Min(0),
                    ratatui::layout::Constraint::Length(1),
                ])
                .split(size);

            let tabs = ratatui::widgets::Tabs::new(vec![
                "Timeline",
                "Contributors",
                "Commits",
                "Stats",
            ])
            .block(
                ratatui::widgets::Block::default()
                    .borders(ratatui::widgets::Borders::ALL)
                    .title("View Mode"),
            )
            .highlight_style(
                ratatui::style::Style::default()
                    .fg(ratatui::style::Color::Yellow)
                    .add_modifier(ratatui::style::Modifier::BOLD),
            )
            .select(state.tab_index);
            f.render_widget(tabs, chunks[0]);

            state.view_mode = match state.tab_index {
                0 => ViewMode::Timeline,
                1 => ViewMode::Contributors,
                2 => ViewMode::Commits,
                3 => ViewMode::Statistics,
                _ => ViewMode::Timeline,
            };

            match state.view_mode {
                ViewMode::Timeline => draw_timeline_view(f, chunks[1], &mut state),
                ViewMode::Contributors => draw_contributors_view(f, chunks[1], &state),
                ViewMode::Commits => draw_commits_view(f, chunks[1], &state),
                ViewMode::Statistics => draw_statistics_view(f, chunks[1], &state),
            }

            let footer = if state.search_mode {
                format!("/{}", state.search_query)
            } else if let Some((message, _)) = &state.status_message {
                message.clone()
            } else {
                "q quit · h help · Tab views · drag brush to zoom".to_string()
            };
            f.render_widget(
                Paragraph::new(footer).style(Style::default().fg(Color::Gray)),
                chunks[2],
            );
        });

        if let Err(e) = draw_result {
            eprintln!("TUI draw error: {e}");
        }

        if poll(std::time::Duration::from_millis(200))? {
            match read()? {
                Event::Key(key_event) => {
                    if handle_key_events(key_event, &mut state, &timeline, &records)? {
                        break;
                    }
                }
                Event::Mouse(mouse_event) => {
                    handle_mouse_event(mouse_event, &mut state, &timeline, &records)?;
                }
                _ => {}
            }
        }
    }

    terminal.clear()?;
    execute!(terminal.backend_mut(), DisableMouseCapture)?;
    disable_raw_mode()?;
    Ok(())
}
