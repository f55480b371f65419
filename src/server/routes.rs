use crate::cosmic::DesignFetcher;
use crate::design::Viewport;
use crate::shell::{
    render_page, ClockSubscription, PageOptions, PresentationShell, SessionGuard, ShellRegistry,
};
use futures::Stream;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use warp::sse::Event;
use warp::{Filter, Rejection, Reply};

/// Client hints the page asks for on subsequent requests.
const ACCEPT_CH: &str = "Viewport-Width, Sec-CH-Viewport-Width";

#[derive(Clone)]
pub struct AppState {
    pub fetcher: DesignFetcher,
    pub registry: Arc<ShellRegistry>,
    pub dev_mode: bool,
    pub tick_interval: Duration,
}

pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let index = warp::path::end()
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(warp::header::optional::<String>("viewport-width"))
        .and(warp::header::optional::<String>("sec-ch-viewport-width"))
        .and(with_state(state.clone()))
        .and_then(index);

    let clock = warp::path!("clock" / Uuid)
        .and(warp::get())
        .and(with_state(state))
        .and_then(clock_stream);

    let health = warp::path!("healthz").and(warp::get()).map(|| "ok");

    index
        .or(clock)
        .or(health)
        .with(warp::trace::request())
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// First usable width among the `?vw=` query and the two client hints.
pub fn parse_viewport(
    query: Option<&str>,
    viewport_width: Option<&str>,
    sec_ch_viewport_width: Option<&str>,
) -> Viewport {
    let width = [query, viewport_width, sec_ch_viewport_width]
        .into_iter()
        .flatten()
        .find_map(|raw| {
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|w| w.is_finite() && *w > 0.0 && *w <= u32::MAX as f64)
                .map(|w| w.round() as u32)
        });
    Viewport { width }
}

async fn index(
    query: HashMap<String, String>,
    viewport_width: Option<String>,
    sec_ch_viewport_width: Option<String>,
    state: AppState,
) -> Result<impl Reply, Infallible> {
    let viewport = parse_viewport(
        query.get("vw").map(String::as_str),
        viewport_width.as_deref(),
        sec_ch_viewport_width.as_deref(),
    );

    let mut shell = PresentationShell::new(viewport);
    if let Err(e) = shell.load(&state.fetcher).await {
        tracing::error!(error = %e, "page session failed to load");
    }

    let id = Uuid::new_v4();
    let ready = shell.is_ready();
    let options = PageOptions {
        dev_mode: state.dev_mode,
        clock_url: ready.then(|| format!("/clock/{}", id)),
    };
    let html = render_page(&shell.view(), &options);

    if ready {
        state.registry.insert(id, shell).await;
        tracing::debug!(session = %id, width = ?viewport.width, "page session created");
    }

    let reply = warp::reply::html(html);
    let reply = warp::reply::with_header(reply, "Accept-CH", ACCEPT_CH);
    Ok(warp::reply::with_header(reply, "Cache-Control", "no-store"))
}

async fn clock_stream(id: Uuid, state: AppState) -> Result<impl Reply, Rejection> {
    let Some(rx) = state.registry.connect(id, state.tick_interval).await else {
        return Err(warp::reject::not_found());
    };
    let guard = state.registry.guard(id);
    Ok(warp::sse::reply(
        warp::sse::keep_alive().stream(tick_events(rx, guard)),
    ))
}

/// One `tick` event per published time, starting with the current value.
/// The guard lives as long as the stream, so a disconnect tears the
/// session down.
pub fn tick_events(
    rx: ClockSubscription,
    guard: SessionGuard,
) -> impl Stream<Item = Result<Event, Infallible>> + Send + 'static {
    futures::stream::unfold((rx, guard, true), |(mut rx, guard, first)| async move {
        if !first && rx.changed().await.is_err() {
            tracing::debug!(session = %guard.id(), "clock stopped, closing stream");
            return None;
        }
        let time = rx.borrow_and_update().clone();
        let event = Event::default().event("tick").data(time);
        Some((Ok(event), (rx, guard, false)))
    })
}
