use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "llm-console", version, about = "Terminal client for an LLM-serving backend")]
pub struct Cli {
    /// Backend base URL (overrides config.toml)
    #[arg(short, long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Browse and edit model configurations
    Models {
        #[command(subcommand)]
        action: ModelCommands,
    },

    /// Single-shot prompt against a model
    Generate {
        /// Prompt text
        prompt: String,

        /// Model name (falls back to backend.default_model from config)
        #[arg(short, long)]
        model: Option<String>,

        /// Generation length cap
        #[arg(long)]
        max_new_tokens: Option<u32>,

        /// Sampling temperature
        #[arg(short, long)]
        temperature: Option<f64>,

        /// Nucleus sampling threshold
        #[arg(long)]
        top_p: Option<f64>,
    },

    /// Interactive streaming chat session
    Chat {
        /// Model name (falls back to backend.default_model from config)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Browse request history
    History {
        /// Maximum entries to fetch
        #[arg(short, long, default_value = "20")]
        limit: u32,

        /// Entries to skip
        #[arg(short, long, default_value = "0")]
        offset: u32,

        /// Print full prompt/response text instead of one-line summaries
        #[arg(short, long)]
        full: bool,
    },

    /// Backend application settings
    AppConfig {
        #[command(subcommand)]
        action: AppConfigCommands,
    },

    /// One-shot metrics fetch, printed as a table
    Metrics,

    /// Live metrics dashboard
    Stats {
        /// Refresh interval in seconds
        #[arg(short, long, default_value = "1.0")]
        interval: f64,

        /// Metrics endpoint URL (built from config if not provided)
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Client configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective client configuration
    Show,

    /// Validate config.toml and environment overrides
    Validate,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ModelCommands {
    /// List configured models
    List,

    /// Show one model's full configuration
    Show { name: String },

    /// Set a generation parameter on a model
    SetParam {
        model: String,
        param: String,
        /// JSON value; bare words are taken as strings
        value: String,
    },

    /// Set the backend's default model
    SetDefault { model: String },
}

#[derive(Subcommand, Debug, Clone)]
pub enum AppConfigCommands {
    /// Display the backend's application config
    Show,

    /// Merge a JSON object into the backend's application config
    Set { json: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_with_model() {
        let cli = Cli::try_parse_from(["llm-console", "chat", "--model", "deepseek"]).unwrap();
        match cli.command {
            Commands::Chat { model } => assert_eq!(model.as_deref(), Some("deepseek")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_history_defaults() {
        let cli = Cli::try_parse_from(["llm-console", "history"]).unwrap();
        match cli.command {
            Commands::History { limit, offset, full } => {
                assert_eq!(limit, 20);
                assert_eq!(offset, 0);
                assert!(!full);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_base_url_flag() {
        let cli =
            Cli::try_parse_from(["llm-console", "metrics", "--base-url", "http://h:9"]).unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://h:9"));
    }
}
