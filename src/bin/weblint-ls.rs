use anyhow::Result;
use weblint_language_server::check::check_file;
use weblint_language_server::config::{Config, Mode};
use weblint_language_server::frameworks;
use weblint_language_server::lsp::server::serve;
use weblint_language_server::validation::Checkers;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    match config.mode.clone() {
        Mode::ListFrameworks => {
            println!("{}", serde_json::to_string_pretty(frameworks::catalog())?);
            Ok(())
        }
        Mode::Check(path) => {
            let report = check_file(&path, &config.checkers, &Checkers::default())?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if report.has_errors() {
                std::process::exit(1);
            }
            Ok(())
        }
        Mode::Serve => serve(config).await,
    }
}
