//! SiteAudit CLI - audit a website's automation potential from the
//! command line

use clap::{Parser, Subcommand, ValueEnum};
use siteaudit::{audit_with_options, AuditOptions, AuditReport};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

/// Output format for the audit subcommand
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// Markdown body with YAML frontmatter
    Md,
}

/// SiteAudit - heuristic website automation-potential auditor
#[derive(Parser, Debug)]
#[command(name = "siteaudit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Audit a URL and print the score report
    Audit {
        /// Website URL, e.g. https://example.com
        url: String,

        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 12)]
        timeout: u64,

        /// Custom User-Agent header
        #[arg(long)]
        user_agent: Option<String>,

        /// Also write the JSON report to a file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the JSON Schema of the audit report
    Schema,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Audit {
            url,
            output,
            timeout,
            user_agent,
            out,
        } => {
            run_audit(&url, output, timeout, user_agent, out).await;
        }
        Commands::Schema => {
            let schema = schemars::schema_for!(AuditReport);
            let json = serde_json::to_string_pretty(&schema).unwrap_or_else(|e| {
                eprintln!("Error serializing schema: {}", e);
                std::process::exit(1);
            });
            writeln_safe(&json);
        }
    }
}

async fn run_audit(
    url: &str,
    output: OutputFormat,
    timeout: u64,
    user_agent: Option<String>,
    out: Option<PathBuf>,
) {
    let options = AuditOptions {
        user_agent,
        timeout: Duration::from_secs(timeout),
    };

    let report = match audit_with_options(url, options).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(path) = out {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    eprintln!("Error writing report to {}: {}", path.display(), e);
                    std::process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                std::process::exit(1);
            }
        }
    }

    match output {
        OutputFormat::Text => writeln_safe(&render_text(&report)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
                eprintln!("Error serializing report: {}", e);
                std::process::exit(1);
            });
            writeln_safe(&json);
        }
        OutputFormat::Md => writeln_safe(&render_md(&report)),
    }
}

fn yes_no(v: bool) -> &'static str {
    if v {
        "yes"
    } else {
        "no"
    }
}

fn present_missing(v: bool) -> &'static str {
    if v {
        "present"
    } else {
        "missing"
    }
}

/// Render the human-readable report
fn render_text(report: &AuditReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Automation Potential Audit: {}\n",
        report.input_url
    ));
    out.push_str(&format!("Final URL: {}\n", report.final_url));
    let status = report
        .http_status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    out.push_str(&format!(
        "HTTP: {}  |  Redirects: {}\n\n",
        status, report.redirect_count
    ));

    out.push_str(&format!(
        "Score: {} / 100 ({})\n",
        report.score,
        report.band()
    ));
    out.push_str(&format!("Suggested approach: {}\n\n", report.recommendation));

    out.push_str("Signals\n");
    out.push_str(&format!(
        "  robots.txt       {}\n",
        present_missing(report.robots.present)
    ));
    if report.robots.present {
        out.push_str(&format!(
            "  robots disallow  {}\n",
            yes_no(report.robots.any_disallow)
        ));
    }
    out.push_str(&format!(
        "  sitemap          {}\n",
        present_missing(report.sitemap_present)
    ));
    out.push_str(&format!(
        "  login form       {}\n",
        yes_no(report.login_form_detected)
    ));
    out.push_str(&format!(
        "  captcha hints    {}\n",
        yes_no(report.captcha_hints_detected)
    ));
    out.push_str(&format!(
        "  structured data  {}\n",
        yes_no(report.structured_data_detected)
    ));
    out.push_str(&format!(
        "  RSS/Atom         {}\n",
        yes_no(report.feed_detected)
    ));
    if report.api_hints_detected {
        out.push_str(&format!(
            "  API hints        yes ({})\n",
            report.api_hints.join(", ")
        ));
    } else {
        out.push_str("  API hints        no\n");
    }
    let platform = if report.platform_hints.is_empty() {
        "-".to_string()
    } else {
        report.platform_hints.join(", ")
    };
    out.push_str(&format!("  platform hints   {}\n", platform));

    if !report.reasons.is_empty() {
        out.push_str("\nReasons\n");
        for reason in &report.reasons {
            out.push_str(&format!("- {}\n", reason));
        }
    }

    if !report.warnings.is_empty() {
        out.push_str("\nWarnings\n");
        for warning in &report.warnings {
            out.push_str(&format!("- {}\n", warning));
        }
    }

    out
}

/// Render the report as markdown with YAML frontmatter
fn render_md(report: &AuditReport) -> String {
    let mut out = String::new();

    out.push_str("---\n");
    out.push_str(&format!("input_url: {}\n", report.input_url));
    out.push_str(&format!("final_url: {}\n", report.final_url));
    if let Some(status) = report.http_status {
        out.push_str(&format!("http_status: {}\n", status));
    }
    out.push_str(&format!("redirect_count: {}\n", report.redirect_count));
    out.push_str(&format!("score: {}\n", report.score));
    out.push_str(&format!("band: {}\n", report.band()));
    out.push_str("---\n");

    out.push_str(&format!("# Audit: {}\n\n", report.final_url));
    out.push_str(&format!(
        "**Score:** {} / 100 ({})\n\n",
        report.score,
        report.band()
    ));
    out.push_str(&format!(
        "**Suggested approach:** {}\n\n",
        report.recommendation
    ));

    out.push_str("## Signals\n\n");
    out.push_str(&format!(
        "- robots.txt: {}\n",
        present_missing(report.robots.present)
    ));
    out.push_str(&format!(
        "- sitemap.xml: {}\n",
        present_missing(report.sitemap_present)
    ));
    out.push_str(&format!(
        "- login form: {}\n",
        yes_no(report.login_form_detected)
    ));
    out.push_str(&format!(
        "- captcha hints: {}\n",
        yes_no(report.captcha_hints_detected)
    ));
    out.push_str(&format!(
        "- structured data: {}\n",
        yes_no(report.structured_data_detected)
    ));
    out.push_str(&format!("- RSS/Atom: {}\n", yes_no(report.feed_detected)));
    if report.api_hints_detected {
        out.push_str(&format!("- API hints: {}\n", report.api_hints.join(", ")));
    } else {
        out.push_str("- API hints: no\n");
    }
    if !report.platform_hints.is_empty() {
        out.push_str(&format!(
            "- platform hints: {}\n",
            report.platform_hints.join(", ")
        ));
    }

    if !report.reasons.is_empty() {
        out.push_str("\n## Reasons\n\n");
        for reason in &report.reasons {
            out.push_str(&format!("- {}\n", reason));
        }
    }

    if !report.warnings.is_empty() {
        out.push_str("\n## Warnings\n\n");
        for warning in &report.warnings {
            out.push_str(&format!("- {}\n", warning));
        }
    }

    out
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
