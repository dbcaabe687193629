//! ibirs CLI
//!
//! Command-line consumer of the IBFS report platform:
//! - Browsing the resource repository (`browse`)
//! - Discovering report parameters and synthesizing the input form
//!   (`describe`)
//! - Executing reports with overlaid parameter values (`run`)
//!
//! Connection settings come from flags first, then the `IBIRS_BASE_URL`,
//! `IBIRS_USER`, `IBIRS_PASSWORD` and `IBIRS_TIMEOUT_SECS` environment
//! variables.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use ibirs_client::{ClientConfig, IbfsClient};
use ibirs_form::{synthesize, ControlKind, ControlSpec};

#[derive(Parser)]
#[command(name = "ibirs")]
#[command(
    author,
    version,
    about = "Browse, describe and run reports on an IBFS platform"
)]
struct Cli {
    #[command(flatten)]
    connect: ConnectArgs,
    /// Log request details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConnectArgs {
    /// Dispatcher URL, e.g. http://host:8080/ibi_apps/rs
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Platform user name
    #[arg(long, global = true)]
    user: Option<String>,
    /// Platform password
    #[arg(long, global = true)]
    password: Option<String>,
    /// HTTP timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the children of a repository folder
    Browse {
        /// Folder path
        #[arg(default_value = "IBFS:/WFC/Repository")]
        path: String,
    },
    /// Discover a report's parameters and synthesize its input form
    Describe {
        /// Report path, e.g. IBFS:/WFC/Repository/test/amptest.fex
        path: String,
        /// Write the synthesized form spec as pretty JSON
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Execute a report, overlaying parameter values on the form defaults
    Run {
        /// Report path
        path: String,
        /// Parameter override, NAME=VALUE (repeatable)
        #[arg(short, long = "param", value_name = "NAME=VALUE")]
        param: Vec<String>,
        /// Write the report output here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Print the run URL without executing the report
        #[arg(long)]
        url_only: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = resolve_config(&cli.connect)?;
    let (user, password) = resolve_credentials(&cli.connect)?;
    let client = IbfsClient::new(config)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow!("failed to initialize tokio runtime: {e}"))?;

    rt.block_on(async move {
        let session = client
            .sign_on(&user, &password)
            .await
            .with_context(|| format!("sign-on as {user} failed"))?;
        eprintln!("{} {}", "signed on".green().bold(), session.display_name);

        match cli.command {
            Commands::Browse { path } => cmd_browse(&client, &path).await,
            Commands::Describe { path, out } => cmd_describe(&client, &path, out.as_deref()).await,
            Commands::Run {
                path,
                param,
                out,
                url_only,
            } => cmd_run(&client, &path, &param, out.as_deref(), url_only).await,
        }
    })
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Environment first, flags override.
fn resolve_config(args: &ConnectArgs) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &args.base_url {
        config.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout_secs = secs;
    }
    Ok(config)
}

fn resolve_credentials(args: &ConnectArgs) -> Result<(String, String)> {
    let user = args
        .user
        .clone()
        .or_else(|| env::var("IBIRS_USER").ok())
        .ok_or_else(|| anyhow!("no user: pass --user or set IBIRS_USER"))?;
    let password = args
        .password
        .clone()
        .or_else(|| env::var("IBIRS_PASSWORD").ok())
        .ok_or_else(|| anyhow!("no password: pass --password or set IBIRS_PASSWORD"))?;
    Ok((user, password))
}

async fn cmd_browse(client: &IbfsClient, path: &str) -> Result<()> {
    let items = client
        .resource_items(path)
        .await
        .with_context(|| format!("listing {path}"))?;

    println!("{} {}", "Folder".green().bold(), path.bold());
    for item in &items {
        let marker = if item.container { "▸" } else { " " };
        match item.description.as_deref() {
            Some(desc) if !desc.is_empty() => {
                println!("  {} {}  {}", marker.cyan(), item.name.bold(), desc.dimmed())
            }
            _ => println!("  {} {}", marker.cyan(), item.name.bold()),
        }
    }
    println!("{} {} items", "ok".green().bold(), items.len());
    Ok(())
}

async fn cmd_describe(client: &IbfsClient, path: &str, out: Option<&Path>) -> Result<()> {
    let schema = client
        .describe_fex(path)
        .await
        .with_context(|| format!("describing {path}"))?;
    let form = synthesize(&schema);

    println!(
        "{} {}",
        "Form".green().bold(),
        form.title.as_deref().unwrap_or(path).bold()
    );
    if form.is_empty() {
        println!("  (no input controls; the report runs as-is)");
    }
    for control in &form.controls {
        println!(
            "  {} {:<8} {} = {:?}  {}",
            "→".cyan(),
            kind_word(control),
            control.name.bold(),
            control.initial,
            control.label.dimmed()
        );
    }

    if let Some(out) = out {
        let json = serde_json::to_string_pretty(&form)?;
        fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;
        println!(
            "{} {}",
            "wrote".green().bold(),
            out.display().to_string().bold()
        );
    }
    Ok(())
}

async fn cmd_run(
    client: &IbfsClient,
    path: &str,
    params: &[String],
    out: Option<&Path>,
    url_only: bool,
) -> Result<()> {
    let schema = client
        .describe_fex(path)
        .await
        .with_context(|| format!("describing {path}"))?;
    let form = synthesize(&schema);

    let mut values = form.initial_values();
    for raw in params {
        let (name, value) = raw
            .split_once('=')
            .ok_or_else(|| anyhow!("--param wants NAME=VALUE, got {raw:?}"))?;
        if !values.contains_key(name) {
            eprintln!("note: {name} names no form control; ignored");
        }
        values.insert(name.to_string(), value.to_string());
    }

    let pairs = form.submission(&values);
    let url = client.run_url(path, &pairs);
    eprintln!("{} {}", "URL".green().bold(), url);
    if url_only {
        return Ok(());
    }

    let body = client
        .run_report(path, &pairs)
        .await
        .with_context(|| format!("running {path}"))?;
    match out {
        Some(out) => {
            fs::write(out, body).with_context(|| format!("writing {}", out.display()))?;
            eprintln!(
                "{} {}",
                "wrote".green().bold(),
                out.display().to_string().bold()
            );
        }
        None => println!("{body}"),
    }
    Ok(())
}

fn kind_word(control: &ControlSpec) -> String {
    match &control.kind {
        ControlKind::Text { max_len: Some(n) } => format!("text({n})"),
        ControlKind::Text { max_len: None } => "text".to_string(),
        ControlKind::Number => "number".to_string(),
        ControlKind::Date => "date".to_string(),
        ControlKind::Month => "month".to_string(),
        ControlKind::Choice { options } => format!("choice[{}]", options.len()),
    }
}
