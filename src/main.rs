//! formgen - fill in a form generated from a JSON or YAML schema
//!
//! The form is drawn on stderr; the submitted values are printed to stdout
//! as JSON (or written to `--output-file`).

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use formgen::{
    app::App,
    config::FormgenConfig,
    defaults::generate_default_values,
    schema::FormSchema,
    state::{AppState, FormState, Outcome},
    submit::{FileHandler, MemoryHandler, OutputFormat, StdoutHandler, SubmitHandler},
    ui,
    validation::{compile, Locale, Messages},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "formgen", version, about)]
struct Cli {
    /// Schema file (.json, .yaml or .yml)
    schema: PathBuf,

    /// Write the submission to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output_file: Option<PathBuf>,

    /// Language of validation messages
    #[arg(long, value_enum, env = "FORMGEN_LOCALE")]
    locale: Option<Locale>,

    /// Pretty-print the submitted JSON
    #[arg(long)]
    pretty: bool,

    /// Append logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Check the schema and print its default values without opening the form
    #[arg(long)]
    check: bool,

    /// Form title (defaults to the schema file name)
    #[arg(long)]
    title: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = FormgenConfig::load().unwrap_or_else(|err| {
        tracing::warn!("Ignoring unreadable config: {err:#}");
        FormgenConfig::default()
    });
    let messages = Messages::new(cli.locale.unwrap_or_else(|| config.locale()));
    let format = if cli.pretty {
        OutputFormat::JsonPretty
    } else {
        config.output()
    };

    let schema = FormSchema::load(&cli.schema)
        .with_context(|| format!("Failed to load schema {}", cli.schema.display()))?;

    if cli.check {
        compile(&schema, &messages)
            .with_context(|| format!("Invalid schema {}", cli.schema.display()))?;
        tracing::info!("{} is valid ({} fields)", cli.schema.display(), schema.len());
        StdoutHandler::new(format)
            .submit(&generate_default_values(&schema))
            .await?;
        return Ok(ExitCode::SUCCESS);
    }

    let title = cli.title.clone().unwrap_or_else(|| {
        cli.schema
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Form".to_string())
    });
    let form = FormState::from_schema(schema, &messages)
        .with_context(|| format!("Invalid schema {}", cli.schema.display()))?;
    let mut state = AppState::new(title, form);
    state.show_descriptions = config.show_descriptions();

    let outcome = match &cli.output_file {
        Some(path) => run(state, FileHandler::new(path, format)).await?.0,
        None => {
            let (outcome, handler) = run(state, MemoryHandler::new()).await?;
            if let Some(values) = handler.into_submitted() {
                StdoutHandler::new(format).submit(&values).await?;
            }
            outcome
        }
    };

    Ok(match outcome {
        Outcome::Submitted => ExitCode::SUCCESS,
        Outcome::Editing | Outcome::Cancelled => ExitCode::FAILURE,
    })
}

/// Logs go to `--log-file` when given. Without one they go to stderr in
/// `--check` mode and nowhere while the form owns the terminal.
fn init_logging(cli: &Cli) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "formgen=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if let Some(path) = &cli.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else if cli.check {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    } else {
        registry.init();
    }
    Ok(())
}

/// Run the form on stderr until it is submitted or cancelled
async fn run<H: SubmitHandler>(state: AppState, handler: H) -> Result<(Outcome, H)> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(state, handler);
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    let outcome = app.outcome().clone();
    Ok((outcome, app.into_handler()))
}

async fn run_app<B: ratatui::backend::Backend, H: SubmitHandler>(
    terminal: &mut Terminal<B>,
    app: &mut App<H>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, &app.state))?;

        if event::poll(Duration::from_millis(100))? {
            // Resize needs no handling; the next draw uses the new size
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key).await?;
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
