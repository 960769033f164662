use clap::Parser;

use clicktrail::cli::{Cli, Commands};
use clicktrail::config::{StaticConfig, get_config, init_config_from};
use clicktrail::errors::ClicktrailError;
use clicktrail::runtime::modes::run_server;
use clicktrail::system::logging::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::ConfigGen { output } => {
            match output {
                Some(path) => {
                    StaticConfig::default()
                        .save_to_file(&path)
                        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path, e))?;
                    println!("Sample configuration written to {}", path);
                }
                None => print!("{}", StaticConfig::generate_sample_config()),
            }
            Ok(())
        }
        Commands::Serve => {
            init_config_from(&cli.config);
            let _guard = init_logging(&get_config().logging);

            if let Err(e) = run_server().await {
                // 启动阶段的领域错误用彩色格式输出到终端
                if let Some(err) = e.downcast_ref::<ClicktrailError>() {
                    eprintln!("{}", err.format_colored());
                }
                return Err(e);
            }
            Ok(())
        }
    }
}
