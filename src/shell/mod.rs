//! Presentation Shell: per-page state machine, live clock and HTML view.

pub mod registry;
pub mod state;
pub mod ticker;
pub mod view;

pub use registry::{SessionGuard, ShellRegistry};
pub use state::{ClockView, PresentationShell, ReadyState, ShellError, ShellState, View};
pub use ticker::{ClockSubscription, ClockTicker, TICK_PERIOD};
pub use view::{render_page, PageOptions};

#[cfg(test)]
mod tests;
