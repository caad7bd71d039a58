use clap::Parser;
use log::*;
use xmrlock_cli::commands::{exec_lock_command, exec_params_command, exec_secret_command, exec_vectors_command};
use xmrlock_cli::config::{CliCommand, Config};
use xmrlock_cli::settings::Settings;

fn main() {
    env_logger::init();
    let config: Config = Config::parse();
    let (global_options, command) = config.to_parts();

    let result = Settings::load_or_default(global_options.config_file.as_ref())
        .map_err(anyhow::Error::from)
        .and_then(|settings| {
            let format = global_options.output_format.unwrap_or(settings.output_format);
            debug!("Using settings {settings:?}, output format {format:?}");
            match command {
                CliCommand::Secret(cmd) => exec_secret_command(cmd, format),
                CliCommand::Params(cmd) => exec_params_command(cmd, format),
                CliCommand::Lock(cmd) => exec_lock_command(cmd, &settings),
                CliCommand::Vectors => exec_vectors_command(format),
            }
        });

    if let Err(err) = result {
        eprintln!("** Error ** \n {err}");
        std::process::exit(1);
    }
}
