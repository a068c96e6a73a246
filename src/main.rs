// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;
use url::Url;

use podpush::{
    FEED_KEY, FfprobeProber, MemoryStore, NoopReporter, S3Client, S3Config, SharedSyncReporter,
    SyncEvent, SyncOptions, SyncReporter, TracingReporter, read_feed_descriptor, sync_podcast,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static BUCKET: Emoji<'_, '_> = Emoji("🪣 ", "[~] ");
static UPLOAD: Emoji<'_, '_> = Emoji("📤 ", "[^] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "[+] ");
static PARTY: Emoji<'_, '_> = Emoji("🎉 ", "[*] ");
static LINK: Emoji<'_, '_> = Emoji("🔗 ", "");

/// Push podcast episodes to S3 and publish their RSS feed
#[derive(Parser, Debug)]
#[command(name = "podpush")]
#[command(about = "Push podcast episodes to S3 and publish their RSS feed")]
#[command(version)]
struct Args {
    /// Path to the JSON feed descriptor
    descriptor: PathBuf,

    /// Destination bucket
    #[arg(short, long, env = "PODPUSH_BUCKET")]
    bucket: String,

    /// S3 region [default: AWS_REGION or profile, then us-east-1]
    #[arg(long)]
    region: Option<String>,

    /// S3-compatible endpoint, addressed path-style [default: AWS S3]
    #[arg(long, env = "PODPUSH_S3_ENDPOINT")]
    endpoint: Option<Url>,

    /// ffprobe binary used to read audio duration and format
    #[arg(long, env = "PODPUSH_FFPROBE", default_value = "ffprobe")]
    ffprobe: PathBuf,

    /// Run against an in-memory bucket and print the feed instead of uploading
    #[arg(long)]
    dry_run: bool,

    /// Quiet mode - suppress progress output
    #[arg(short, long)]
    quiet: bool,

    /// Write progress as structured log records instead of a spinner
    #[arg(long, conflicts_with = "quiet")]
    log: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn s3_config(&self) -> S3Config {
        let mut config = S3Config::new();
        if let Some(region) = &self.region {
            config = config.with_region(region.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint.clone());
        }
        config
    }
}

/// Progress reporter using a spinner and colored lines on the terminal
#[derive(Clone)]
struct ConsoleReporter {
    spinner: ProgressBar,
}

impl ConsoleReporter {
    fn new() -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {wide_msg}")
            .unwrap();

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));

        Self { spinner }
    }

    /// Remove the spinner line after a failed run
    fn abandon(&self) {
        self.spinner.finish_and_clear();
    }
}

impl SyncReporter for ConsoleReporter {
    fn report(&self, event: SyncEvent) {
        match event {
            SyncEvent::SyncStarted {
                bucket,
                total_items,
            } => {
                self.spinner.set_message(format!(
                    "{BUCKET}Checking bucket {} ({} episodes)",
                    bucket.cyan(),
                    total_items.to_string().cyan()
                ));
            }

            SyncEvent::BucketChecked { .. } => {}

            SyncEvent::CreatingBucket { bucket } => {
                self.spinner
                    .set_message(format!("{BUCKET}Creating bucket {}", bucket.yellow()));
            }

            SyncEvent::BucketCreated { bucket } => {
                self.spinner
                    .println(format!("{SUCCESS}Created bucket {}", bucket.green()));
            }

            SyncEvent::ProcessingItem {
                title,
                item_index,
                total_items,
            } => {
                self.spinner.set_message(format!(
                    "{UPLOAD}[{}/{}] {}",
                    (item_index + 1).to_string().cyan(),
                    total_items.to_string().cyan(),
                    truncate_title(&title, 40)
                ));
            }

            SyncEvent::ItemUploaded { key, .. } => {
                self.spinner
                    .set_message(format!("{HEADPHONES}Probing {}", key.cyan()));
            }

            SyncEvent::ItemProbed {
                title,
                duration_secs,
                format,
            } => {
                self.spinner.println(format!(
                    "  {SUCCESS}{} {}",
                    truncate_title(&title, 40).green(),
                    format!("({format}, {})", format_duration(duration_secs)).dimmed()
                ));
            }

            SyncEvent::FeedGenerated { item_count, .. } => {
                self.spinner.set_message(format!(
                    "{UPLOAD}Publishing {} with {} episodes",
                    FEED_KEY.cyan(),
                    item_count.to_string().cyan()
                ));
            }

            SyncEvent::SyncCompleted {
                feed_url,
                item_count,
            } => {
                self.spinner.finish_and_clear();
                println!(
                    "\n{PARTY}{} {} episodes published",
                    "Sync complete:".bold().green(),
                    item_count.to_string().green().bold(),
                );
                println!("{LINK}Feed: {}\n", feed_url.cyan());
            }
        }
    }
}

fn truncate_title(title: &str, max_len: usize) -> String {
    if title.chars().count() <= max_len {
        title.to_string()
    } else {
        let head: String = title.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

fn format_duration(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn init_tracing(args: &Args) {
    let default_filter = if args.verbose {
        "podpush=debug"
    } else if args.log {
        "podpush=info"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args);

    // Dry runs keep stdout for the feed document
    let console = !args.quiet && !args.log && !args.dry_run;

    if console {
        println!(
            "\n{}{} {}\n",
            MICROPHONE,
            "podpush".bold().magenta(),
            "- Podcast Publisher".dimmed()
        );
    }

    let mut descriptor = read_feed_descriptor(&args.descriptor)
        .with_context(|| format!("Failed to load {}", args.descriptor.display()))?;

    if descriptor.last_build_date.is_none() {
        descriptor.last_build_date = Some(Utc::now().to_rfc2822());
    }

    let client = if args.dry_run {
        None
    } else {
        Some(S3Client::from_env(args.s3_config()).await)
    };

    let console_reporter = console.then(ConsoleReporter::new);
    let reporter: SharedSyncReporter = match &console_reporter {
        Some(console_reporter) => Arc::new(console_reporter.clone()),
        None if args.log => TracingReporter::shared(),
        None => NoopReporter::shared(),
    };

    let options = SyncOptions::new(args.bucket.clone()).with_reporter(reporter);
    let prober = FfprobeProber::with_binary(&args.ffprobe);

    let Some(client) = client else {
        let store = MemoryStore::new();
        sync_podcast(&store, &prober, &descriptor, &options)
            .await
            .context("Dry run failed")?;

        let feed = store
            .object(&options.bucket, FEED_KEY)
            .context("Dry run did not produce a feed")?;
        std::io::stdout()
            .write_all(&feed.body)
            .context("Failed to write feed to stdout")?;
        return Ok(());
    };

    let result = sync_podcast(&client, &prober, &descriptor, &options).await;
    if result.is_err()
        && let Some(console_reporter) = &console_reporter
    {
        console_reporter.abandon();
    }
    result.context("Failed to sync podcast")?;

    Ok(())
}
