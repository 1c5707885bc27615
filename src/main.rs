use anyhow::Result;
use clap::{CommandFactory, Parser};
use lectern::app::{run_process_command, run_serve_command};
use lectern::cli::{Cli, Commands, ModelsAction};
use lectern::config::Config;
use lectern::models::catalog::list_models;
use lectern::models::download::{download_model, format_model_info};
use lectern::models::t5_catalog::list_text_models;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        None => {
            run_serve_command(config, None, cli.quiet, cli.no_download).await?;
        }
        Some(Commands::Serve { addr }) => {
            run_serve_command(config, addr, cli.quiet, cli.no_download).await?;
        }
        Some(Commands::Process { audio }) => {
            run_process_command(config, &audio, cli.quiet, cli.no_download).await?;
        }
        Some(Commands::Models { action }) => {
            handle_models_command(action).await?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "lectern",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Load config from --config or the default path, then layer env and CLI overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_default(&path)?.with_env_overrides();

    if let Some(model) = &cli.model {
        config.stt.model = model.clone();
    }
    if let Some(language) = &cli.language {
        config.stt.language = language.clone();
    }
    if let Some(model) = &cli.text_model {
        config.textgen.summary_model = model.clone();
        config.textgen.question_model = model.clone();
    }
    if let Some(path) = &cli.output {
        config.output.path = path.clone();
    }

    Ok(config)
}

async fn handle_models_command(action: ModelsAction) -> Result<()> {
    match action {
        ModelsAction::List => {
            println!("Whisper models:");
            for model in list_models() {
                println!("  {}", format_model_info(model));
            }
            println!();
            println!("Text models (fetched through the HuggingFace cache on first use):");
            for model in list_text_models() {
                println!(
                    "  {:<14} {:>5} MB  {}",
                    model.name, model.size_mb, model.description
                );
            }
        }
        ModelsAction::Install { name } => {
            let path = download_model(&name, true).await?;
            println!("Model '{}' installed successfully", name);
            println!("Location: {}", path.display());
        }
    }
    Ok(())
}
