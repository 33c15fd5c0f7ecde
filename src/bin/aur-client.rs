//! `aur-client`: a thin CLI that sends newline-delimited JSON v1 requests
//! to `aur-server` and prints the JSON reply.
//!
//! Grounded in `original_source`'s `client/client.cc`/`main.cc`: `-a`
//! server address, `-l`/`-s`/`-o`/`-m` request options shared across
//! subcommands, then one of `lookup`/`search`/`resolve` with its
//! arguments. `clap::Subcommand` replaces the original's manual
//! `argv[1]` dispatch.

use std::io::Write as _;

use aur_index::rpc::v1::{LookupRequest, RequestOptions, ResolveRequest, SearchRequest};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

/// Command-line client for an `aur-server` instance.
#[derive(Parser, Debug)]
#[command(name = "aur-client")]
struct Args {
    /// Address of the server to connect to.
    #[arg(
        short = 'a',
        long = "address",
        env = "AUR_INDEX_SERVER_ADDRESS",
        default_value = "127.0.0.1:9000"
    )]
    server_address: String,

    /// Index to look up by.
    #[arg(short = 'l', long = "lookup-by", default_value = "NAME")]
    lookup_by: String,

    /// Field to search by (`NAME` or `NAME_DESC`).
    #[arg(short = 's', long = "search-by", default_value = "NAME_DESC")]
    search_by: String,

    /// Search set logic (`DISJUNCTIVE` or `CONJUNCTIVE`).
    #[arg(short = 'o', long = "search-logic", default_value = "DISJUNCTIVE")]
    search_logic: String,

    /// Comma-delimited list of fields to include in the response.
    #[arg(short = 'm', long = "mask")]
    mask: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up one or more packages by name, pkgbase, maintainer, etc.
    Lookup { names: Vec<String> },
    /// Search the full corpus for terms.
    Search { terms: Vec<String> },
    /// Resolve depstrings to their providers.
    Resolve { depstrings: Vec<String> },
    /// Query the server's liveness/reload status.
    Health,
}

impl Args {
    fn options(&self) -> Option<RequestOptions> {
        self.mask.as_ref().map(|mask| RequestOptions {
            package_field_mask: Some(mask.split(',').map(str::to_string).collect()),
        })
    }
}

#[derive(serde::Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
enum Envelope {
    Lookup(LookupRequest),
    Search(SearchRequest),
    Resolve(ResolveRequest),
    Health,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let envelope = match &args.command {
        Command::Lookup { names } => Envelope::Lookup(LookupRequest {
            lookup_by: args.lookup_by.clone(),
            names: names.clone(),
            options: args.options(),
        }),
        Command::Search { terms } => Envelope::Search(SearchRequest {
            search_by: args.search_by.clone(),
            search_logic: args.search_logic.clone(),
            terms: terms.clone(),
            options: args.options(),
        }),
        Command::Resolve { depstrings } => Envelope::Resolve(ResolveRequest {
            depstrings: depstrings.clone(),
            options: args.options(),
        }),
        Command::Health => Envelope::Health,
    };

    let stream = TcpStream::connect(&args.server_address).await?;
    let (reader, mut writer) = stream.into_split();

    let mut request_line = serde_json::to_string(&envelope).expect("request always serializes");
    request_line.push('\n');
    writer.write_all(request_line.as_bytes()).await?;

    let mut reply = String::new();
    BufReader::new(reader).read_line(&mut reply).await?;
    std::io::stdout().write_all(reply.as_bytes())?;

    Ok(())
}
