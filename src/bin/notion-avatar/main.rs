//! notion-avatar command-line front end.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use notion_avatar::{
    AvatarConfig, AvatarEditor, DirAssets, EditorOptions, FileSink, StyleCatalog,
};

mod cli;
mod logging;

use crate::cli::{Cli, Command, ConfigArgs, CycleArgs, ExportArgs};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(logging::level_from_verbosity(cli.verbose), cli.log_format);

    if let Err(error) = run(cli).await {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let catalog = match &cli.catalog {
        Some(path) => StyleCatalog::from_path(path)?,
        None => StyleCatalog::default(),
    };
    let options = match &cli.options {
        Some(path) => EditorOptions::from_path(path)?,
        None => EditorOptions::default(),
    };
    let editor = AvatarEditor::new(DirAssets::new(&cli.assets), catalog).with_options(options);

    match cli.command {
        Command::Random => print_config(editor.config()),
        Command::Cycle(args) => cycle(editor, args),
        Command::Controls(args) => {
            let editor = load_config(editor, &args)?;
            for control in editor.controls() {
                println!("{:<12} {:>3}  {}", control.tooltip, control.index, control.thumbnail);
            }
            Ok(())
        }
        Command::Compose(args) => {
            let mut editor = load_config(editor, &args)?;
            let preview = editor.refresh().await;
            println!("{}", preview.markup);
            Ok(())
        }
        Command::Export(args) => export(editor, args).await,
    }
}

fn load_config(editor: AvatarEditor<DirAssets>, args: &ConfigArgs) -> Result<AvatarEditor<DirAssets>> {
    let Some(path) = &args.config else {
        return Ok(editor);
    };
    let config = read_config(path)?;
    editor
        .with_config(config)
        .with_context(|| format!("configuration {} does not fit the catalog", path.display()))
}

fn read_config(path: &Path) -> Result<AvatarConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration {}", path.display()))?;
    AvatarConfig::from_json(&json)
        .with_context(|| format!("failed to parse configuration {}", path.display()))
}

fn print_config(config: &AvatarConfig) -> Result<()> {
    println!("{}", config.to_json()?);
    Ok(())
}

fn cycle(editor: AvatarEditor<DirAssets>, args: CycleArgs) -> Result<()> {
    let mut editor = load_config(editor, &args.config)?;
    for _ in 0..args.times {
        editor
            .cycle(args.part)
            .with_context(|| format!("catalog has no styles for `{}`", args.part))?;
    }
    print_config(editor.config())
}

async fn export(editor: AvatarEditor<DirAssets>, args: ExportArgs) -> Result<()> {
    let mut editor = load_config(editor, &args.config)?;
    if let Some(scale) = args.scale {
        let options = editor.options().clone().with_device_pixel_ratio(scale);
        editor = editor.with_options(options);
    }

    let preview = editor.refresh().await;
    if !preview.missing.is_empty() {
        tracing::warn!(missing = ?preview.missing, "some parts have no fragment");
    }

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create {}", args.out.display()))?;
    let mut sink = FileSink::new(&args.out);
    let mode = editor.download(args.format, &args.user_agent, &mut sink)?;

    if mode.is_none() {
        tracing::warn!("nothing to export");
    }
    for path in sink.written() {
        println!("{}", path.display());
    }
    Ok(())
}
