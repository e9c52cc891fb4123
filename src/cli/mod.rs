use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Base URL of the chat API, including any path prefix the routes hang off
    /// (e.g., http://127.0.0.1:3000/api)
    #[arg(long, env = "API_BASE_URL", default_value = "http://127.0.0.1:3000/api")]
    pub api_base_url: String,

    /// Timeout in seconds applied to every chat API request.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "30")]
    pub request_timeout_secs: u64,

    /// Seed the conversation view with the chat ids returned by the initial
    /// list call instead of only logging them.
    #[arg(long, env = "SEED_HISTORY", default_value = "false")]
    pub seed_history: bool,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}
