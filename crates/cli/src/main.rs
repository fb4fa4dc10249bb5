use clap::Parser;

use purific_cli::{AppConfig, Cli, run};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    purific_observability::init(config.log_format);

    let stdout = std::io::stdout();
    run(cli, &config, &mut stdout.lock())
}
