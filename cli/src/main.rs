mod commands;
mod terminal;

use anyhow::Context;
use commands::{CommandLine, Commands, catalogo, empresas, exportar, perfil, sesion};
use padron_common::config::{ClientConfig, Config};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.quiet);

    let config_path = ClientConfig::default_path();
    let file = ClientConfig::load(&config_path)
        .with_context(|| format!("cannot read {}", config_path.display()))?;
    let cfg = Config {
        quiet: commands.quiet,
        json: commands.json,
        ..Config::resolve(commands.server, &file)
    };

    if !cfg.json {
        print::banner(cfg.quiet);
    }

    match commands.command {
        Commands::Login { email, password } => {
            print::header("logging in", cfg.quiet);
            sesion::login(&email, password, &cfg).await
        }
        Commands::Logout => sesion::logout(&cfg).await,
        Commands::Whoami => sesion::whoami(&cfg).await,
        Commands::Empresas { action } => empresas::run(action, &cfg).await,
        Commands::Perfil { action } => perfil::run(action, &cfg).await,
        Commands::Catalogo { action } => catalogo::run(action, &cfg).await,
        Commands::Exportar {
            formato,
            ficha,
            output,
            filtros,
        } => {
            print::header("export", cfg.quiet);
            exportar::run(formato, ficha, output, filtros.into_filtro(None), &cfg).await
        }
        Commands::Servidor { url } => sesion::servidor(&url),
    }
}
