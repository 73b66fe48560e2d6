// src/main.rs

use runwatch::cli::{self, EXIT_ERR};
use runwatch::{logging, run};

#[tokio::main]
async fn main() {
    let code = match run_main().await {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("runwatch error: {err:?}");
            EXIT_ERR
        }
    };
    std::process::exit(code);
}

async fn run_main() -> anyhow::Result<runwatch::engine::Outcome> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    Ok(run(args).await?)
}
