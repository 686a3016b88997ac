mod app;
mod cli;
mod commands;
mod config;
mod effects;
mod render;

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::Parser;
use log::LevelFilter;
use safetyboard_core::{LoadStatus, Msg, SourceKind};
use safetyboard_engine::{export_dashboard, EngineHandle, ExportOptions};
use safetyboard_logging::{board_info, board_warn, LogDestination};

use crate::app::App;
use crate::cli::Cli;
use crate::commands::{parse_command, Command, HELP};
use crate::config::{load_config, DashboardConfig};
use crate::effects::EffectRunner;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loaded = load_config(&cli.config);
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => DashboardConfig::default(),
    };

    let destination = match cli.log {
        Some(destination) => destination,
        None => config.log.parse::<LogDestination>().unwrap_or_default(),
    };
    let level = config.log_level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);
    safetyboard_logging::initialize(destination, level);

    match &loaded {
        Ok(Some(_)) => board_info!("Loaded config from {:?}", cli.config),
        Ok(None) => {}
        Err(err) => board_warn!("{}; using defaults", err),
    }

    let mut sources = config.source_set();
    if let Some(base) = &cli.base {
        sources = safetyboard_engine::SourceSet::from_base(base);
    }
    for (kind, location) in [
        (SourceKind::Trustified, &cli.trustified),
        (SourceKind::UnboxHealth, &cli.unbox),
        (SourceKind::OpenData, &cli.open_data),
    ] {
        if let Some(location) = location {
            sources.set_location(kind, location.clone());
        }
    }

    let engine = EngineHandle::new(config.fetch_settings());
    let mut app = App::new(EffectRunner::new(engine, sources));

    // Only the loading notice is shown live; the dashboard is drawn once the
    // initial filters are applied.
    let mut loading_frame = cli.interactive;
    app.dispatch_with(Msg::LoadRequested, |frame| {
        if std::mem::take(&mut loading_frame) {
            print!("{frame}");
        }
    });
    if app.state().load_status() == LoadStatus::Ready {
        apply_initial_filters(&mut app, &cli);
    }

    let export_dir = cli.export.clone().or_else(|| config.export_dir.clone());
    if let Some(dir) = &export_dir {
        export(&app, dir)?;
    }

    if cli.interactive {
        run_interactive(&mut app)?;
    } else {
        app.focus_top();
        print!("{}", app.render());
    }

    if app.state().load_status() == LoadStatus::Failed {
        let reason = app.state().load_error().unwrap_or("unknown error");
        bail!("failed to load datasets: {reason}");
    }
    Ok(())
}

fn apply_initial_filters(app: &mut App, cli: &Cli) {
    if let Some(status) = cli.status {
        app.dispatch(Msg::StatusFilterSelected(status));
    }
    if let Some(category) = &cli.category {
        app.dispatch(Msg::CategoryClicked(category.clone()));
    }
    if let Some(query) = &cli.query {
        app.dispatch(Msg::SearchChanged(query.clone()));
    }
}

fn export(app: &App, dir: &Path) -> anyhow::Result<()> {
    let options = ExportOptions {
        generated_utc: Utc::now().to_rfc3339(),
        ..ExportOptions::default()
    };
    let summary = export_dashboard(dir, &app.view(), &options)
        .with_context(|| format!("failed to export dashboard to {dir:?}"))?;
    println!(
        "Exported {} of {} records to {}",
        summary.visible,
        summary.total,
        summary.html_path.display()
    );
    Ok(())
}

fn run_interactive(app: &mut App) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    app.focus_top();
    print!("{}", app.render());
    println!("{HELP}");

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        match parse_command(&line) {
            Ok(Command::Dispatch(msg)) => app.dispatch_with(msg, |frame| print!("{frame}")),
            Ok(Command::Export(dir)) => {
                if let Err(err) = export(app, &dir) {
                    eprintln!("{err:#}");
                }
            }
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Quit) => return Ok(()),
            Err(message) => eprintln!("{message}"),
        }
    }
}
