use crossterm::event::KeyEvent;

/// Events that can occur in the application
#[derive(Debug, Clone)]
pub enum Event {
    /// Terminal key press event
    Key(KeyEvent),
    /// Terminal resize event
    Resize(u16, u16),
    /// Periodic tick: collects finished searches and animates the spinner
    Tick,
    /// Request to quit the application
    Quit,
}

/// Result type for event handling
pub type EventResult<T> = anyhow::Result<T>;
