use anyhow::{Context, Result, anyhow};
use axum::{
    Router, middleware,
    response::{IntoResponse, Redirect},
    routing::get,
};
use clap::Parser;
use config::EnvConfig;
use minijinja::Environment;
use state::{AppState, SharedState, TemplateEngine};
use std::{collections::HashMap, net::SocketAddr, path::Path, path::PathBuf, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{debug, info};
use tracing_subscriber::filter::EnvFilter;

mod config;
mod error;
mod html;
mod state;
mod util;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(short, long, default_value = "web/config.yaml")]
    pub config: PathBuf,
    #[arg(short, long, default_value = "dev")]
    pub env: String,
    #[arg(
        long,
        default_value = "web",
        help = "Directory containing the 'templates' and 'static' folders"
    )]
    pub datadir: PathBuf,
}

pub(crate) fn template_engine<P: AsRef<Path>>(envname: &str, template_dir: P) -> TemplateEngine {
    let mut jinja = Environment::new();
    jinja.set_loader(minijinja::path_loader(template_dir));
    jinja.set_debug(envname != "prod");
    jinja.add_global("envname", envname);
    jinja.add_filter("latitude", util::latitude);
    jinja.add_filter("longitude", util::longitude);
    jinja.add_filter("latitude_decimal", util::latitude_decimal);
    jinja.add_filter("longitude_decimal", util::longitude_decimal);
    jinja.add_function("format_coordinates", util::format_coordinates);
    jinja.add_function(
        "format_coordinates_decimal",
        util::format_coordinates_decimal,
    );
    TemplateEngine::from(jinja)
}

async fn favicon_redirect() -> impl IntoResponse {
    Redirect::permanent("/static/favicon.ico")
}

pub(crate) fn app(state: AppState) -> Router {
    Router::new()
        .merge(html::router())
        .route("/favicon.ico", get(favicon_redirect))
        .nest_service("/static", ServeDir::new(state.datadir.join("static")))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::map_response_with_state(
                    state.clone(),
                    error::map_error_response,
                )),
        )
        .with_state(state)
}

#[cfg(test)]
pub(crate) fn test_app(pool: sqlx::Pool<sqlx::Sqlite>) -> (Router, AppState) {
    let state = Arc::new(SharedState::test(pool));
    (app(state.clone()), state)
}

fn load_config(path: &Path, envname: &str) -> Result<EnvConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Unable to read config file {path:?}"))?;
    let mut configs: HashMap<String, EnvConfig> = serde_yaml::from_str(&contents)
        .with_context(|| format!("Unable to parse config file {path:?}"))?;
    configs
        .remove(envname)
        .ok_or_else(|| anyhow!("No environment '{envname}' found in config file {path:?}"))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Unable to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Unable to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("MAPWEB_LOG"))
        .init();
    let args = Cli::parse();
    debug!(?args, "starting up");

    let env = load_config(&args.config, &args.env)?;
    debug!(?env, "Loaded configuration for environment '{}'", args.env);
    if let Some(url) = &env.public_base_url {
        info!("Public base url is {url}");
    }

    let addr: SocketAddr = format!("{}:{}", env.listen.host, env.listen.port)
        .parse()
        .with_context(|| "Invalid listen address")?;
    let shared_state = Arc::new(SharedState::new(&args.env, env, args.datadir).await?);
    let app = app(shared_state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Unable to listen on {addr}"))?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
