pub mod app;
pub mod card_list;
pub mod input;

pub use app::App;
pub use card_list::CardList;
pub use input::InputWidget;

use crate::event::Event;
use anyhow::{Context, Result};
use crossterm::{
    event::{Event as TerminalEvent, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;

/// How often finished searches are collected and the spinner advances
const TICK_RATE: Duration = Duration::from_millis(100);

/// Run the terminal UI until the user quits
pub async fn run(mut app: App) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))
        .context("Failed to initialize terminal")?;

    let result = event_loop(&mut terminal, &mut app).await;

    // Restore the terminal even if the loop failed
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

async fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(TICK_RATE);

    while !app.should_quit() {
        terminal
            .draw(|frame| app.render(frame))
            .context("Failed to draw frame")?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(TerminalEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.handle_event(Event::Key(key))?;
                }
                Some(Ok(TerminalEvent::Resize(width, height))) => {
                    app.handle_event(Event::Resize(width, height))?;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                None => app.handle_event(Event::Quit)?,
            },
            _ = tick.tick() => app.handle_event(Event::Tick)?,
        }
    }

    Ok(())
}
