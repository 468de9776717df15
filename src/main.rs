//! http-adaptor: send one request through the fast transport.
//!
//! ```text
//! CLI flags + optional TOML config
//!     → AdaptorConfig (validated)
//!     → http::Request
//!     → Adaptor<HyperTransport>::execute
//!     → status line, headers and decoded body on stdout
//! ```

use std::io::Write;
use std::path::PathBuf;

use bytes::Bytes;
use clap::Parser;
use http::Request;
use http_body_util::Full;

use http_adaptor::config::{load_config, validate_config, AdaptorConfig, ConfigError};
use http_adaptor::observability::logging::init_logging;
use http_adaptor::{Adaptor, Target};

#[derive(Parser)]
#[command(name = "http-adaptor")]
#[command(about = "Send a request through the fast HTTP adaptor", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Full target URL, used verbatim.
    #[arg(long)]
    url: Option<String>,

    /// Target base URL, joined with --path.
    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    path: Option<String>,

    #[arg(long)]
    timeout_ms: Option<u64>,

    #[arg(short = 'X', long, default_value = "GET")]
    method: String,

    /// Request header as "Name: value" (repeatable).
    #[arg(short = 'H', long = "header")]
    headers: Vec<String>,

    /// Request body. Only forwarded with a JSON, form, HTML or plain-text
    /// Content-Type.
    #[arg(short, long)]
    data: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AdaptorConfig::default(),
    };
    if let Some(url) = cli.url {
        config.target.full_url = url;
    }
    if let Some(host) = cli.host {
        config.target.host = host;
    }
    if let Some(path) = cli.path {
        config.target.path = path;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.target.timeout_ms = timeout_ms;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability.log_filter)?;

    let mut builder = Request::builder()
        .method(cli.method.as_str())
        .uri(Target::from(&config.target).url());
    for header in &cli.headers {
        let (name, value) = header
            .split_once(':')
            .ok_or_else(|| format!("invalid header {:?}, expected \"Name: value\"", header))?;
        builder = builder.header(name.trim(), value.trim());
    }
    let request = builder.body(Full::new(cli.data.map(Bytes::from).unwrap_or_default()))?;

    tracing::info!(
        method = %cli.method,
        url = %Target::from(&config.target).url(),
        timeout_ms = config.target.timeout_ms,
        "Sending request"
    );

    let adaptor = Adaptor::hyper(&config);
    let (response, error) = adaptor.execute(request).await;
    if let Some(e) = error {
        tracing::error!(error = %e, "Request failed");
        return Err(e.into());
    }

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{} {}", response.proto, response.status)?;
    for (name, value) in response.headers.iter() {
        writeln!(stdout, "{}: {}", name, String::from_utf8_lossy(value.as_bytes()))?;
    }
    writeln!(stdout)?;
    if let Some(mut body) = response.body {
        std::io::copy(&mut body, &mut stdout)?;
    }
    stdout.flush()?;

    Ok(())
}
