pub mod api;
pub mod cli;
pub mod models;
pub mod ui;

use cli::Args;
use log::info;
use std::error::Error;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("API Base URL: {}", args.api_base_url);
    info!("Request Timeout: {}s", args.request_timeout_secs);
    info!("Seed History: {}", args.seed_history);
    info!("-------------------------");

    let client = api::new_client(&args)?;
    ui::run_chat_ui(&args, client).await
}
