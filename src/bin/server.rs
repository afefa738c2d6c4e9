use std::{
    fs::OpenOptions,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use budget_tracker::{
    AppState, KeyValueSlot, MemorySlot, SqliteSlot, TRANSACTIONS_SLOT_KEY, build_router,
    graceful_shutdown, initialize_db, logging_middleware,
};

/// The web server for the budget tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    ///
    /// Transactions are kept in memory only and lost on exit when this is not set.
    #[arg(long)]
    db_path: Option<String>,

    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The canonical name of the timezone used to decide the current month.
    #[arg(long, default_value = "America/Sao_Paulo")]
    timezone: String,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    if time_tz::timezones::get_by_name(&args.timezone).is_none() {
        tracing::error!(
            "Unknown timezone {}, the dashboard will not load until it is fixed",
            args.timezone
        );
    }

    let slot: Box<dyn KeyValueSlot + Send> = match &args.db_path {
        Some(db_path) => {
            let conn = Connection::open(db_path).expect("Could not open the database.");
            initialize_db(&conn).expect("Could not initialize the database.");
            tracing::info!("Saving transactions to {db_path}");

            Box::new(SqliteSlot::new(
                Arc::new(Mutex::new(conn)),
                TRANSACTIONS_SLOT_KEY,
            ))
        }
        None => {
            tracing::warn!("No database path given, transactions will not be saved");
            Box::new(MemorySlot::new())
        }
    };

    let app_state = AppState::new(slot, &args.timezone);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(app_state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("Server stopped unexpectedly.");
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged by the handlers themselves.
        .on_failure(());

    router.layer(tracing_layer)
}
