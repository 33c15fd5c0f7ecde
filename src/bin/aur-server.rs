//! `aur-server`: accepts newline-delimited JSON v1 requests over TCP and
//! answers them against a hot-reloadable [`aur_index::engine::QueryEngine`].
//!
//! Grounded in `original_source`'s `server/server.cc`/`main.cc`: default
//! listen address `127.0.0.1:9000`, `-l`/`-h` flags, SIGHUP triggers
//! `Reload`, SIGINT/SIGTERM trigger graceful shutdown. The original's
//! `sd_event`/gRPC machinery becomes a `tokio` multi-threaded runtime with
//! a `TcpListener` accept loop and `tokio::signal::unix::signal` (spec
//! §6.1/§6.4: gRPC itself is out of scope, the request/response shapes and
//! signal behavior are not).

use std::path::PathBuf;
use std::sync::Arc;

use aur_index::engine::QueryEngine;
use aur_index::rpc::v1::{LookupRequest, ResolveRequest, SearchRequest};
use aur_index::storage::FilesystemStorage;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::signal::unix::{signal, SignalKind};

/// In-memory AUR-shaped package query daemon.
#[derive(Parser, Debug)]
#[command(name = "aur-server")]
struct Args {
    /// Address to listen on.
    #[arg(
        short = 'l',
        long = "listen",
        env = "AUR_INDEX_LISTEN_ADDRESS",
        default_value = "127.0.0.1:9000"
    )]
    listen_address: String,

    /// Directory holding one JSON blob per package (see `Storage`).
    #[arg(short = 'd', long = "db", env = "AUR_INDEX_DB_PATH", default_value = "db")]
    db_dir: PathBuf,
}

#[derive(serde::Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
enum Envelope {
    Lookup(LookupRequest),
    Search(SearchRequest),
    Resolve(ResolveRequest),
    /// A lightweight liveness/reload probe; carries no fields.
    Health,
}

/// Wire-level result wrapper: each reply line is either the response body
/// or a single `error` field carrying the message.
#[derive(serde::Serialize)]
#[serde(untagged)]
enum Reply<T> {
    Ok(T),
    Err { error: String },
}

impl<T> From<Result<T, aur_index::error::EngineError>> for Reply<T> {
    fn from(result: Result<T, aur_index::error::EngineError>) -> Self {
        match result {
            Ok(value) => Reply::Ok(value),
            Err(err) => Reply::Err {
                error: err.to_string(),
            },
        }
    }
}

async fn handle_connection(stream: TcpStream, engine: Arc<QueryEngine>) {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return,
            Err(err) => {
                tracing::warn!(error = %err, "connection read failed");
                return;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Envelope>(&line) {
            Ok(Envelope::Lookup(request)) => serde_json::to_string(&Reply::from(request.handle(&engine))),
            Ok(Envelope::Search(request)) => serde_json::to_string(&Reply::from(request.handle(&engine))),
            Ok(Envelope::Resolve(request)) => {
                serde_json::to_string(&Reply::Ok(request.handle(&engine)))
            }
            Ok(Envelope::Health) => serde_json::to_string(&Reply::Ok(engine.health())),
            Err(err) => serde_json::to_string(&Reply::<()>::Err {
                error: format!("malformed request: {err}"),
            }),
        };

        let Ok(mut response) = response else {
            tracing::warn!("failed to serialize response");
            continue;
        };
        response.push('\n');
        if let Err(err) = writer.write_all(response.as_bytes()).await {
            tracing::warn!(error = %err, "connection write failed");
            return;
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let storage = Arc::new(FilesystemStorage::new(args.db_dir));
    let engine = Arc::new(QueryEngine::new(storage));

    let mut sighup = signal(SignalKind::hangup())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    let listener = TcpListener::bind(&args.listen_address).await?;
    tracing::info!(address = %args.listen_address, "ready to serve");

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, _) = accepted?;
                let engine = Arc::clone(&engine);
                tokio::spawn(handle_connection(stream, engine));
            }
            _ = sighup.recv() => {
                tracing::info!("sighup received, reloading");
                engine.reload().await;
            }
            _ = sigint.recv() => {
                tracing::info!("sigint received, shutting down");
                return Ok(());
            }
            _ = sigterm.recv() => {
                tracing::info!("sigterm received, shutting down");
                return Ok(());
            }
        }
    }
}
