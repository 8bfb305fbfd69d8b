//! WeatherWise terminal dashboard.
//!
//! Startup resolves the initial position (share link, flags, saved
//! location, default, in that order), sets up the terminal, then hands
//! control to the dispatch loop. Every async operation runs as a keyed
//! task or timer; the reducer only ever sees actions.

use std::fs::File;
use std::io;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use weatherwise::action::DashboardAction;
use weatherwise::api::WeatherClient;
use weatherwise::dispatch::{EffectContext, Runtime};
use weatherwise::effect::DashboardEffect;
use weatherwise::reducer::reduce;
use weatherwise::state::{
    DashboardState, ErrorPolicy, GeoPosition, NotificationKind, CLOCK_TICK_MS, LOADING_TICK_MS,
    NOTIFICATION_DISMISS_MS,
};
use weatherwise::ui::{Component, Dashboard};
use weatherwise::{share, storage};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OnFetchError {
    /// Drop back to the initial view.
    ReturnToInitial,
    /// Keep previous results visible with an inline error.
    StayOnResults,
}

impl From<OnFetchError> for ErrorPolicy {
    fn from(value: OnFetchError) -> Self {
        match value {
            OnFetchError::ReturnToInitial => ErrorPolicy::ReturnToInitial,
            OnFetchError::StayOnResults => ErrorPolicy::StayOnResults,
        }
    }
}

/// Historical weather dashboard: pick a point and a date, see what the
/// weather has done there over the years.
#[derive(Parser, Debug)]
#[command(name = "weatherwise", version, about)]
struct Args {
    /// Starting latitude
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Starting longitude
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Date to analyze (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Open a shared selection instead of flags or the saved location
    #[arg(long)]
    share_link: Option<String>,

    /// Backend base URL
    #[arg(long, default_value = "http://localhost:5000")]
    backend_url: String,

    /// Origin used when building share links
    #[arg(long, default_value = share::DEFAULT_ORIGIN)]
    share_origin: String,

    /// What the dashboard does when the historical fetch fails
    #[arg(long, value_enum, default_value_t = OnFetchError::ReturnToInitial)]
    on_fetch_error: OnFetchError,

    /// Write debug logs to weatherwise.log
    #[arg(long)]
    debug: bool,
}

fn init_logging(debug: bool) -> io::Result<()> {
    if !debug {
        return Ok(());
    }
    // Stdout belongs to the TUI, so logs go to a file.
    let file = File::create("weatherwise.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_writer(file)
        .with_ansi(false)
        .init();
    Ok(())
}

struct Startup {
    position: GeoPosition,
    date: NaiveDate,
    /// A shared selection is opened to be analyzed, not just displayed.
    analyze: bool,
    /// Shown as an error notification once the UI is up.
    warning: Option<String>,
}

/// Share link beats flags, flags beat the saved location, which beats the
/// default. A malformed share link falls back to the default selection with
/// a warning rather than refusing to start.
fn initial_selection(args: &Args) -> Result<Startup, String> {
    if let Some(link) = &args.share_link {
        match share::decode(link) {
            Ok((position, date)) => {
                return Ok(Startup {
                    position,
                    date,
                    analyze: true,
                    warning: None,
                })
            }
            Err(err) => {
                return Ok(Startup {
                    position: storage::load().unwrap_or(weatherwise::state::DEFAULT_POSITION),
                    date: Local::now().date_naive(),
                    analyze: false,
                    warning: Some(err.to_string()),
                })
            }
        }
    }

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let position = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => {
            let position = GeoPosition::new(lat, lon);
            if !position.is_valid() {
                return Err(format!("coordinates out of range: {lat}, {lon}"));
            }
            position
        }
        (None, None) => storage::load().unwrap_or(weatherwise::state::DEFAULT_POSITION),
        _ => return Err("provide both --lat and --lon, or neither".to_string()),
    };
    Ok(Startup {
        position,
        date,
        analyze: false,
        warning: None,
    })
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(args.debug)?;

    let startup = match initial_selection(&args) {
        Ok(startup) => startup,
        Err(message) => {
            eprintln!("Error: {message}");
            std::process::exit(1);
        }
    };

    let mut state = DashboardState::new(startup.position, startup.date);
    state.error_policy = args.on_fetch_error.into();
    state.share_origin = args.share_origin.clone();
    let client = WeatherClient::new(&args.backend_url);
    info!(
        backend = %args.backend_url,
        lat = startup.position.lat,
        lon = startup.position.lng,
        "starting"
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, state, client, startup).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: DashboardState,
    client: WeatherClient,
    startup: Startup,
) -> io::Result<()> {
    let mut runtime: Runtime<DashboardState, DashboardAction, DashboardEffect> =
        Runtime::new(state, reduce);

    // The clock runs for the lifetime of the app.
    runtime.timers().interval(
        "clock",
        Duration::from_millis(CLOCK_TICK_MS),
        || DashboardAction::ClockTick(Local::now().time()),
    );
    runtime.enqueue(DashboardAction::ClockTick(Local::now().time()));
    runtime.enqueue(DashboardAction::CurrentRefresh);
    if let Some(warning) = startup.warning {
        runtime.enqueue(DashboardAction::Notify(warning, NotificationKind::Error));
    }
    if startup.analyze {
        runtime.enqueue(DashboardAction::AnalyzeRequest);
    }

    let mut dashboard = Dashboard::default();
    let mut view = Dashboard::default();

    runtime
        .run(
            terminal,
            move |frame, area, state| {
                view.render(frame, area, weatherwise::ui::DashboardProps { state });
            },
            move |event, state| {
                dashboard.handle_event(event, weatherwise::ui::DashboardProps { state })
            },
            |action| matches!(action, DashboardAction::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &client),
        )
        .await
}

fn handle_effect(
    effect: DashboardEffect,
    ctx: &mut EffectContext<DashboardAction>,
    client: &WeatherClient,
) {
    match effect {
        DashboardEffect::FetchCurrent { position } => {
            let client = client.clone();
            ctx.tasks().spawn("current-weather", async move {
                match client.fetch_current(position).await {
                    Ok(snapshot) => DashboardAction::CurrentDidLoad(snapshot),
                    Err(err) => DashboardAction::CurrentDidError(err),
                }
            });
        }

        DashboardEffect::FetchHistorical {
            position,
            month,
            day,
        } => {
            let client = client.clone();
            ctx.tasks().spawn("historical", async move {
                match client.fetch_historical(position, month, day).await {
                    Ok(historical) => DashboardAction::HistoricalDidLoad(historical),
                    Err(err) => DashboardAction::HistoricalDidError(err),
                }
            });
        }

        DashboardEffect::Geolocate => {
            let client = client.clone();
            ctx.tasks().spawn("geolocate", async move {
                match client.device_location().await {
                    Ok(position) => DashboardAction::LocateDidResolve(position),
                    Err(_) => DashboardAction::LocateDidError,
                }
            });
        }

        DashboardEffect::Geocode { query } => {
            let client = client.clone();
            ctx.tasks().spawn("geocode", async move {
                match client.geocode(&query).await {
                    Ok(place) => DashboardAction::SearchDidResolve {
                        name: place.name,
                        position: place.position,
                    },
                    Err(err) => DashboardAction::SearchDidError(err),
                }
            });
        }

        DashboardEffect::CopyShareLink(link) => {
            // arboard is blocking; keep it off the async loop.
            ctx.tasks().spawn("clipboard", async move {
                let copied = tokio::task::spawn_blocking(move || share::copy_to_clipboard(&link))
                    .await
                    .map(|r| r.is_ok())
                    .unwrap_or(false);
                if copied {
                    DashboardAction::ShareDidCopy
                } else {
                    DashboardAction::ShareDidError
                }
            });
        }

        DashboardEffect::PersistLocation(position) => {
            ctx.tasks().spawn("persist-location", async move {
                let saved = tokio::task::spawn_blocking(move || storage::save(position))
                    .await
                    .map(|r| r.is_ok())
                    .unwrap_or(false);
                DashboardAction::SaveLocationDidFinish(saved)
            });
        }

        DashboardEffect::StartLoadingTicker => {
            ctx.timers().interval(
                "loading-ticker",
                Duration::from_millis(LOADING_TICK_MS),
                || DashboardAction::LoadingTick,
            );
        }

        DashboardEffect::StopLoadingTicker => {
            ctx.timers().cancel(&"loading-ticker".into());
        }

        DashboardEffect::ScheduleNotificationDismiss { id } => {
            ctx.timers().once(
                "notification",
                Duration::from_millis(NOTIFICATION_DISMISS_MS),
                DashboardAction::NotificationExpired(id),
            );
        }
    }
}
