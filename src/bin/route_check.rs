//! Route resolution checker
//!
//! Resolves URLs against the application's route table and prints the
//! resulting locations as JSON. With `--live` each URL is navigated through
//! a real router, so store warm-up and guard probes hit the configured API.
//!
//! Usage: route-check [--config PATH] [--live] URL...

use anyhow::{bail, Context, Result};
use classroom_router::config::{load_config, Config};
use classroom_router::router::routes::route_table;
use classroom_router::router::Router;
use classroom_router::store::{ReqwestClient, Stores};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct Args {
    config: Option<PathBuf>,
    live: bool,
    urls: Vec<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        config: None,
        live: false,
        urls: Vec::new(),
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--live" => args.live = true,
            "--config" => {
                let path = iter.next().context("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            _ => args.urls.push(arg),
        }
    }
    if args.urls.is_empty() {
        bail!("usage: route-check [--config PATH] [--live] URL...");
    }
    Ok(args)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "classroom_router=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = parse_args()?;
    let config = load_config(args.config.as_deref())?;
    tracing::info!(?config, "Configuration loaded");

    if args.live {
        check_live(&config, &args.urls).await
    } else {
        check_static(&args.urls)
    }
}

/// Resolve only; no stores, hooks or guards.
fn check_static(urls: &[String]) -> Result<()> {
    let table = route_table()?;
    for url in urls {
        let location = table
            .resolve(url)
            .with_context(|| format!("resolving {url}"))?;
        println!("{}", serde_json::to_string(&location)?);
    }
    Ok(())
}

/// Full navigation against the configured API, including late redirects.
async fn check_live(config: &Config, urls: &[String]) -> Result<()> {
    let stores = Stores::http(ReqwestClient::from_config(config)?);
    let mut router = Router::new(route_table()?, stores).with_config(config);

    for url in urls {
        router
            .navigate(url.as_str())
            .await
            .with_context(|| format!("navigating to {url}"))?;
        router.settle().await?;
        if let Some(location) = router.current() {
            println!("{}", serde_json::to_string(location)?);
        }
    }
    tracing::info!(stores = ?router.stores(), "Done");
    Ok(())
}
