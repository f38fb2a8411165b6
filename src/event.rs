use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::Duration;

/// Application events
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// The terminal was resized; only a redraw is needed
    Resize,
    /// No input arrived within the tick rate
    Tick,
}

/// Poll for input, falling back to a tick after `tick_rate`.
///
/// Ticks keep the stopwatch display moving and give the timer's ticker a
/// chance to deliver due seconds.
pub fn poll_event(tick_rate: Duration) -> color_eyre::Result<Option<AppEvent>> {
    if !event::poll(tick_rate)? {
        return Ok(Some(AppEvent::Tick));
    }

    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(AppEvent::Key(key))),
        Event::Resize(_, _) => Ok(Some(AppEvent::Resize)),
        _ => Ok(None),
    }
}
