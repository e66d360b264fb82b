#![forbid(unsafe_code)]

//! chatscan CLI - extract mentions, emoticons and titled links from chat messages.
//!
//! # Commands
//!
//! - `parse`: Print the JSON record for a message
//! - `title`: Resolve the page title for a single URL
//! - `serve`: Start a local HTTP endpoint that parses posted messages (requires `serve` feature)

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cs_core::{NoopResolver, ResolverConfig, TitleResolver};
use cs_fetch::HttpTitleResolver;
use cs_parser::{parse_evidence_json, parse_with};
use serde::Serialize;
use tracing::{debug, info, warn};

/// chatscan CLI - extract mentions, emoticons and titled links from chat messages.
#[derive(Debug, Parser)]
#[command(
    name = "chatscan",
    version,
    about = "Extract mentions, emoticons and titled links from chat messages",
    long_about = "Scans a chat message for @mentions, (emoticons) and http(s) links.\n\n\
        Each link's page is fetched and its <title> recorded; links without a\n\
        title are left out of the output."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging (can be repeated for more detail: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a chat message and print its entities as JSON.
    Parse {
        /// Message text, a file path, or "-" for stdin. If omitted, reads from stdin.
        #[arg(default_value = "-")]
        input: String,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Print entity counts instead of the record
        #[arg(long)]
        summary: bool,

        #[command(flatten)]
        resolver: ResolverArgs,
    },

    /// Fetch a URL and print its page title.
    Title {
        /// URL to fetch
        url: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        resolver: ResolverArgs,
    },

    /// Start a local HTTP endpoint that parses posted messages (requires `serve` feature).
    #[cfg(feature = "serve")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[command(flatten)]
        resolver: ResolverArgs,
    },
}

/// Options controlling how link titles are fetched.
#[derive(Debug, Default, Args)]
struct ResolverArgs {
    /// Do not fetch link titles; every link is dropped
    #[arg(long)]
    offline: bool,

    /// Verify TLS certificates when fetching titles
    #[arg(long)]
    strict_tls: bool,

    /// Resolver config file (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct TitleResult<'a> {
    url: &'a str,
    title: String,
    elapsed_ms: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Command::Parse {
            input,
            pretty,
            summary,
            resolver,
        } => cmd_parse(&input, pretty, summary, &resolver),

        Command::Title {
            url,
            json,
            resolver,
        } => cmd_title(&url, json, &resolver),

        #[cfg(feature = "serve")]
        Command::Serve {
            port,
            host,
            resolver,
        } => cmd_serve(&host, port, &resolver),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .try_init();
}

fn load_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else if Path::new(input).is_file() {
        std::fs::read_to_string(input).context(format!("Failed to read file: {input}"))
    } else {
        // Treat as inline message text
        Ok(input.to_string())
    }
}

/// Config file first, then command-line overrides.
fn resolve_config(args: &ResolverArgs) -> Result<ResolverConfig> {
    let mut config = match &args.config {
        Some(path) => ResolverConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ResolverConfig::default(),
    };

    if args.strict_tls {
        config.accept_invalid_certs = false;
    }

    Ok(config)
}

fn build_resolver(args: &ResolverArgs) -> Result<Box<dyn TitleResolver>> {
    if args.offline {
        debug!("Offline mode: link titles will not be fetched");
        return Ok(Box::new(NoopResolver));
    }

    let config = resolve_config(args)?;
    if config.accept_invalid_certs {
        debug!("TLS certificate verification is disabled for title fetches");
    }

    let resolver = HttpTitleResolver::new(&config).context("Failed to build HTTP client")?;
    Ok(Box::new(resolver))
}

// =============================================================================
// Command: parse
// =============================================================================

fn cmd_parse(input: &str, pretty: bool, summary: bool, args: &ResolverArgs) -> Result<()> {
    let start = Instant::now();
    let source = load_input(input)?;
    let resolver = build_resolver(args)?;

    let parsed = parse_with(&source, resolver.as_ref());

    let output = if summary {
        if pretty {
            let value: serde_json::Value = serde_json::from_str(&parse_evidence_json(&parsed))?;
            serde_json::to_string_pretty(&value)?
        } else {
            parse_evidence_json(&parsed)
        }
    } else if pretty {
        parsed.to_json_pretty()
    } else {
        parsed.to_json()
    };

    println!("{output}");

    info!(
        "Parsed {} mentions, {} emoticons, {} links in {:.2}ms",
        parsed.mentions.len(),
        parsed.emoticons.len(),
        parsed.links.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}

// =============================================================================
// Command: title
// =============================================================================

fn cmd_title(url: &str, json_output: bool, args: &ResolverArgs) -> Result<()> {
    let start = Instant::now();
    let resolver = build_resolver(args)?;
    let title = resolver.resolve_title(url);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    if title.is_empty() {
        warn!("No title found for {url}");
    }

    if json_output {
        let result = TitleResult {
            url,
            title,
            elapsed_ms,
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{title}");
    }

    Ok(())
}

// =============================================================================
// Command: serve
// =============================================================================

#[cfg(feature = "serve")]
fn cmd_serve(host: &str, port: u16, args: &ResolverArgs) -> Result<()> {
    use tiny_http::Server;

    let resolver = build_resolver(args)?;
    let addr = format!("{host}:{port}");
    let server = Server::http(&addr).map_err(|e| anyhow::anyhow!("Failed to start server: {e}"))?;

    println!("chatscan listening at: http://{addr}");
    println!("POST a message to /parse; press Ctrl+C to stop");

    for mut request in server.incoming_requests() {
        let mut body = String::new();
        let read = request.as_reader().read_to_string(&mut body);
        let reply = match read {
            Ok(_) => route(request.method(), request.url(), &body, resolver.as_ref()),
            Err(e) => Reply::text(400, format!("Failed to read body: {e}")),
        };

        debug!("{} {} -> {}", request.method(), request.url(), reply.status);
        let _ = request.respond(reply.into_response());
    }

    Ok(())
}

#[cfg(feature = "serve")]
#[derive(Debug, PartialEq, Eq)]
struct Reply {
    status: u16,
    body: String,
    content_type: &'static str,
}

#[cfg(feature = "serve")]
impl Reply {
    fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            content_type: "text/plain; charset=utf-8",
        }
    }

    fn json(body: String) -> Self {
        Self {
            status: 200,
            body,
            content_type: "application/json",
        }
    }

    fn into_response(self) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
        use tiny_http::{Header, Response};

        let response = Response::from_string(self.body).with_status_code(self.status);
        match Header::from_bytes(&b"Content-Type"[..], self.content_type.as_bytes()) {
            Ok(header) => response.with_header(header),
            Err(()) => response,
        }
    }
}

#[cfg(feature = "serve")]
fn route(
    method: &tiny_http::Method,
    path: &str,
    body: &str,
    resolver: &dyn TitleResolver,
) -> Reply {
    use tiny_http::Method;

    match (method, path) {
        (Method::Post, "/parse") => Reply::json(parse_with(body, resolver).to_json()),
        (_, "/parse") => Reply::text(405, "Method Not Allowed"),
        (Method::Get, "/health") => Reply::text(200, "ok"),
        _ => Reply::text(404, "Not Found"),
    }
}
