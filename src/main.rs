use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pipeflow_rust::commands::{parse_data_command, run_command, RunOptions};
use pipeflow_rust::config::{AppConfig, CONFIG};
use pipeflow_rust::AppError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pipeflow", version, about = "Ejecuta pipelines de datos (source, filter, max, min, count, sum)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ejecuta un workflow JSON e imprime el resultado.
    Run {
        /// Archivo del workflow (por defecto PIPEFLOW_WORKFLOW).
        workflow: Option<PathBuf>,
        /// Datos para un step Source: valores separados por comas o array JSON.
        #[arg(long)]
        data: Option<String>,
        /// Step que recibe `--data` (por defecto el primer Source).
        #[arg(long, requires = "data")]
        data_step: Option<String>,
        /// Imprime la traza de eventos en stderr.
        #[arg(long)]
        trace: bool,
    },
    /// Muestra cómo se interpreta un texto de datos.
    ParseData { text: String },
}

fn main() {
    let config = &*CONFIG;
    init_logging(config);
    let cli = Cli::parse();

    let code = match dispatch(cli.command, config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[pipeflow] {e}");
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    // también captura los registros de `log` emitidos por pipe-core
    let _ = tracing_subscriber::fmt().with_env_filter(filter)
                                     .with_writer(std::io::stderr)
                                     .try_init();
}

fn dispatch(command: Command, config: &AppConfig) -> Result<i32, AppError> {
    let mut out = std::io::stdout().lock();
    match command {
        Command::Run { workflow, data, data_step, trace } => {
            let options = RunOptions { workflow, data, data_step, trace };
            run_command(options, config, &mut out, &mut std::io::stderr().lock())
        }
        Command::ParseData { text } => parse_data_command(&text, &mut out),
    }
}
