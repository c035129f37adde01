use asciify::cli::{handle_config_action, run_render, AppError, Args, Command};
use asciify::config::Config;
use clap::Parser;

fn run(args: Args) -> Result<(), AppError> {
    let config_path = args.config.as_deref();
    let config = Config::load(config_path)?;

    match args.command {
        Command::Render(render) => run_render(&render, config),
        Command::Config { action } => handle_config_action(&action, &config, config_path),
    }
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
