//! Readpace command-line front end.
//!
//! Loads a page from a URL or a local HTML file, decides whether it is
//! article-like, and if so prints the reading estimate and replays the given
//! scroll offsets through a live reading session.

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use tokio::sync::mpsc;

use readpace::services::debounce::Debouncer;
use readpace::services::estimator::format_number;
use readpace::services::html_document::HtmlDocument;
use readpace::services::readability::ReadabilityClassifier;
use readpace::services::reading_session::{
    run_event_loop, Activation, Presenter, ReadingEvent, ReadingSession,
};
use readpace::services::settings_engine::JsonSettingsStore;
use readpace::types::document::ScrollGeometry;
use readpace::types::progress::ReadingReport;

const USAGE: &str = "\
Usage: readpace <URL|FILE> [options]

Options:
  --url URL        page URL of a local FILE (used for the host name)
  --speed N        reading speed in words per minute (1-1000)
  --viewport H     viewport height in pixels (default 900)
  --height H       document height in pixels; repeat to give every height
                   the host reports, the largest wins (default 4000)
  --scroll T       scroll offset to replay; repeat for several
  --pause MS       delay between replayed scroll offsets (default 150)
  --config PATH    settings file (default: platform config dir)";

const CONGRATULATIONS: &[&str] = &[
    "You made it to the end!",
    "Finished. Knowledge is power!",
    "Goal reached, nicely done!",
    "Perfect, keep that curiosity going!",
    "Done! This article has been conquered.",
];

#[derive(Debug)]
struct Options {
    target: String,
    page_url: Option<String>,
    speed: Option<u32>,
    viewport: f64,
    heights: Vec<f64>,
    scrolls: Vec<f64>,
    pause: Duration,
    config: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut options = Options {
        target: String::new(),
        page_url: None,
        speed: None,
        viewport: 900.0,
        heights: Vec::new(),
        scrolls: Vec::new(),
        pause: Duration::from_millis(150),
        config: None,
    };

    fn value<T: std::str::FromStr>(flag: &str, raw: Option<String>) -> Result<T, String> {
        let raw = raw.ok_or_else(|| format!("{} needs a value", flag))?;
        raw.parse()
            .map_err(|_| format!("invalid value for {}: {}", flag, raw))
    }

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--url" => options.page_url = Some(value(&arg, args.next())?),
            "--speed" => options.speed = Some(value(&arg, args.next())?),
            "--viewport" => options.viewport = value(&arg, args.next())?,
            "--height" => options.heights.push(value(&arg, args.next())?),
            "--scroll" => options.scrolls.push(value(&arg, args.next())?),
            "--pause" => options.pause = Duration::from_millis(value(&arg, args.next())?),
            "--config" => options.config = Some(value(&arg, args.next())?),
            "-h" | "--help" => return Err(String::new()),
            flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
            _ if options.target.is_empty() => options.target = arg,
            _ => return Err(format!("unexpected argument {}", arg)),
        }
    }

    if options.target.is_empty() {
        return Err("missing URL or FILE".to_string());
    }
    if options.heights.is_empty() {
        options.heights.push(4000.0);
    }
    Ok(options)
}

/// Prints every report to stdout.
struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn render(&mut self, report: &ReadingReport) {
        if report.is_complete() {
            println!("  progress 100%  done");
            return;
        }
        println!(
            "  progress {:>3}%  ~{} min left ({} words)",
            report.snapshot.progress,
            report.snapshot.remaining_minutes,
            format_number(report.snapshot.remaining_words)
        );
    }

    fn celebrate(&mut self, report: &ReadingReport) {
        let message = CONGRATULATIONS[(report.word_count as usize) % CONGRATULATIONS.len()];
        println!("  🎉 {}", message);
    }
}

async fn load_document(options: &Options) -> Result<HtmlDocument, Box<dyn std::error::Error>> {
    if Path::new(&options.target).is_file() {
        let page_url = options.page_url.as_deref().unwrap_or_default();
        return Ok(HtmlDocument::from_file(&options.target, page_url)?);
    }
    fetch_document(&options.target).await
}

#[cfg(feature = "network")]
async fn fetch_document(target: &str) -> Result<HtmlDocument, Box<dyn std::error::Error>> {
    let page = readpace::services::page_loader::fetch_page(target).await?;
    log::info!("Fetched {} ({}, {})", page.url, page.status, page.content_type);
    Ok(HtmlDocument::parse(&page.html, &page.url))
}

#[cfg(not(feature = "network"))]
async fn fetch_document(target: &str) -> Result<HtmlDocument, Box<dyn std::error::Error>> {
    Err(format!("{} is not a file and network support is disabled", target).into())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init();

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(o) => o,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("error: {}", msg);
            }
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    let mut document = match load_document(&options).await {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let geometry = ScrollGeometry::from_candidates(0.0, options.viewport, &options.heights);
    document.set_geometry(geometry);

    let mut store = JsonSettingsStore::new(options.config.clone());
    if let Err(e) = store.load() {
        log::warn!("Using default settings: {}", e);
    }

    if let Some(title) = document.title() {
        println!("{}", title);
    }

    let classifier = ReadabilityClassifier::new();
    let mut session =
        match ReadingSession::activate(&document, &classifier, store, ConsolePresenter) {
            Activation::Active(session) => session,
            Activation::NotReadable(verdict) => {
                match verdict.decided_by {
                    Some(stage) => println!("Not an article (rejected by {})", stage),
                    None => println!("Not an article"),
                }
                return ExitCode::SUCCESS;
            }
            Activation::TooShort { word_count } => {
                println!("Too short to track ({} words)", format_number(word_count));
                return ExitCode::SUCCESS;
            }
        };

    if let Some(stage) = session.verdict().decided_by {
        println!("Article (accepted by {})", stage);
    }
    if let Some(report) = session.last_report() {
        println!(
            "{} words, about {} min at {}",
            format_number(report.word_count),
            report.total_minutes,
            session.speed()
        );
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let scrolls = options.scrolls.clone();
    let speed = options.speed;
    let pause = options.pause;
    tokio::spawn(async move {
        if let Some(wpm) = speed {
            let _ = tx.send(ReadingEvent::SpeedInput(wpm));
        }
        for top in scrolls {
            if tx.send(ReadingEvent::Scroll(geometry.scrolled_to(top))).is_err() {
                break;
            }
            tokio::time::sleep(pause).await;
        }
    });

    let mut debouncer = Debouncer::new();
    run_event_loop(&mut session, &mut rx, &mut debouncer).await;

    ExitCode::SUCCESS
}
