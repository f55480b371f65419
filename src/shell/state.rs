//! Presentation Shell: owns one page session's render lifecycle.
//!
//! ```text
//! Unmounted → AwaitingData → AwaitingConfig → Ready (ticking)
//!                  │               │
//!                  ▼               ▼
//!             FetchFailed    SetupIncomplete
//! ```
//!
//! Nothing leads from `Ready` back to `AwaitingConfig`: a new design needs a
//! fresh mount.

use super::ticker::{ClockSubscription, ClockTicker};
use crate::cosmic::{DesignFetcher, FetchError};
use crate::design::styles::{self, Viewport};
use crate::design::{format_now, generate_random_design, CatalogCounts, DesignConfiguration, DesignData, StyleMap};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShellError {
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

/// Everything synthesized once when a configuration is accepted. Ticks only
/// recompute the time text.
#[derive(Debug, Clone)]
pub struct ReadyState {
    pub config: Arc<DesignConfiguration>,
    pub stylesheet: String,
    pub background: StyleMap,
    pub layout: StyleMap,
    /// Container styles with the text styles layered on top.
    pub text: StyleMap,
    pub time_format: String,
}

impl ReadyState {
    fn synthesize(config: DesignConfiguration, viewport: Viewport, animation_suffix: &str) -> Self {
        let mut text = styles::container_styles(&config);
        text.merge(&styles::text_styles(&config));

        Self {
            stylesheet: styles::global_stylesheet(&config, animation_suffix),
            background: styles::background_style(&config),
            layout: styles::layout_styles(&config, viewport),
            time_format: config.time_display.metadata.time_format_key().to_string(),
            text,
            config: Arc::new(config),
        }
    }
}

#[derive(Debug)]
pub enum ShellState {
    Unmounted,
    AwaitingData,
    AwaitingConfig(DesignData),
    Ready(Box<ReadyState>),
    /// A catalog was empty, or a selected slot came back missing.
    SetupIncomplete(CatalogCounts),
    /// The content repository could not be reached.
    FetchFailed(String),
}

impl ShellState {
    pub fn name(&self) -> &'static str {
        match self {
            ShellState::Unmounted => "unmounted",
            ShellState::AwaitingData => "awaiting data",
            ShellState::AwaitingConfig(_) => "awaiting config",
            ShellState::Ready(_) => "ready",
            ShellState::SetupIncomplete(_) => "setup incomplete",
            ShellState::FetchFailed(_) => "fetch failed",
        }
    }
}

/// What the surface should show right now. Only `Clock` carries time text.
#[derive(Debug)]
pub enum View<'a> {
    Placeholder,
    SetupIncomplete(CatalogCounts),
    Error,
    Clock(ClockView<'a>),
}

#[derive(Debug)]
pub struct ClockView<'a> {
    pub ready: &'a ReadyState,
    pub time: String,
}

pub struct PresentationShell {
    state: ShellState,
    viewport: Viewport,
    ticker: Option<ClockTicker>,
}

impl PresentationShell {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            state: ShellState::Unmounted,
            viewport,
            ticker: None,
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ShellState::Ready(_))
    }

    pub fn ready(&self) -> Option<&ReadyState> {
        match &self.state {
            ShellState::Ready(ready) => Some(&**ready),
            _ => None,
        }
    }

    fn invalid(&self, action: &'static str) -> ShellError {
        ShellError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }

    pub fn mount(&mut self) -> Result<(), ShellError> {
        match self.state {
            ShellState::Unmounted => {
                self.state = ShellState::AwaitingData;
                Ok(())
            }
            _ => Err(self.invalid("mount")),
        }
    }

    /// Accept the fetch outcome. A failed fetch is terminal for this session
    /// but never an error for the caller.
    pub fn receive_data(&mut self, data: Result<DesignData, FetchError>) -> Result<(), ShellError> {
        if !matches!(self.state, ShellState::AwaitingData) {
            return Err(self.invalid("receive data"));
        }
        self.state = match data {
            Ok(data) => ShellState::AwaitingConfig(data),
            Err(e) => {
                tracing::error!(error = %e, "error loading page");
                ShellState::FetchFailed(e.to_string())
            }
        };
        Ok(())
    }

    /// Draw a configuration from the received catalogs and synthesize its
    /// styles. `animation_suffix` keeps the keyframe name unique per load.
    pub fn select_design<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        animation_suffix: &str,
    ) -> Result<(), ShellError> {
        let ShellState::AwaitingConfig(data) = &self.state else {
            return Err(self.invalid("select a design"));
        };

        self.state = match generate_random_design(rng, data) {
            Some(config) => ShellState::Ready(Box::new(ReadyState::synthesize(
                config,
                self.viewport,
                animation_suffix,
            ))),
            None => ShellState::SetupIncomplete(data.counts()),
        };
        Ok(())
    }

    /// Mount, fetch and select in one go.
    pub async fn load(&mut self, fetcher: &DesignFetcher) -> Result<(), ShellError> {
        self.mount()?;
        let data = fetcher.get_all_design_data().await;
        self.receive_data(data)?;
        if matches!(self.state, ShellState::AwaitingConfig(_)) {
            let suffix = chrono::Utc::now().timestamp_millis().to_string();
            self.select_design(&mut rand::thread_rng(), &suffix)?;
        }
        Ok(())
    }

    /// Start (or join) the ticking clock. Only a ready shell ticks.
    pub fn start_clock(&mut self, period: Duration) -> Result<ClockSubscription, ShellError> {
        let ShellState::Ready(ready) = &self.state else {
            return Err(self.invalid("start the clock"));
        };
        let ticker = match self.ticker.take() {
            Some(ticker) => ticker,
            None => ClockTicker::spawn(ready.time_format.clone(), period),
        };
        let rx = ticker.subscribe();
        self.ticker = Some(ticker);
        Ok(rx)
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(ClockTicker::is_running)
    }

    pub fn view(&self) -> View<'_> {
        match &self.state {
            ShellState::Unmounted | ShellState::AwaitingData | ShellState::AwaitingConfig(_) => {
                View::Placeholder
            }
            ShellState::SetupIncomplete(counts) => View::SetupIncomplete(*counts),
            ShellState::FetchFailed(_) => View::Error,
            ShellState::Ready(ready) => View::Clock(ClockView {
                ready,
                time: match &self.ticker {
                    Some(ticker) => ticker.current(),
                    None => format_now(Some(&ready.time_format)),
                },
            }),
        }
    }

    /// Cancel the clock and drop the session's design.
    pub fn teardown(&mut self) {
        if self.ticker.take().is_some() {
            tracing::debug!("clock ticker stopped");
        }
        self.state = ShellState::Unmounted;
    }
}
