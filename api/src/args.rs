use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use foogie_core::domain::common::{FoogieConfig, LLMConfig, StoreBackend, StoreConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "foogie", version, about = "Food inventory API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackendArg {
    Jsonbin,
    Memory,
}

#[derive(Debug, Clone, clap::Args)]
pub struct StoreArgs {
    #[arg(
        long = "store-backend",
        env = "STORE_BACKEND",
        value_enum,
        default_value_t = StoreBackendArg::Jsonbin
    )]
    pub backend: StoreBackendArg,

    #[arg(
        id = "jsonbin_base_url",
        long = "jsonbin-base-url",
        env = "JSONBIN_BASE_URL",
        default_value = "https://api.jsonbin.io/v3/b"
    )]
    pub base_url: String,

    #[arg(long = "jsonbin-master-key", env = "JSONBIN_MASTER_KEY", default_value = "")]
    pub master_key: String,

    #[arg(
        long = "jsonbin-private",
        env = "JSONBIN_PRIVATE",
        action = ArgAction::Set,
        default_value_t = false
    )]
    pub private_bins: bool,

    #[arg(id = "store_timeout_secs", long = "store-timeout-secs", env = "STORE_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    #[arg(
        long = "store-max-conflict-retries",
        env = "STORE_MAX_CONFLICT_RETRIES",
        default_value_t = 3
    )]
    pub max_conflict_retries: u32,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LlmArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", default_value = "")]
    pub gemini_api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = "gemini-2.5-flash")]
    pub gemini_model: String,

    #[arg(
        id = "gemini_base_url",
        long = "gemini-base-url",
        env = "GEMINI_BASE_URL",
        default_value = "https://generativelanguage.googleapis.com/v1beta"
    )]
    pub base_url: String,

    #[arg(id = "llm_timeout_secs", long = "llm-timeout-secs", env = "LLM_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", action = ArgAction::Set, default_value_t = false)]
    pub json: bool,
}

impl From<StoreBackendArg> for StoreBackend {
    fn from(backend: StoreBackendArg) -> Self {
        match backend {
            StoreBackendArg::Jsonbin => StoreBackend::JsonBin,
            StoreBackendArg::Memory => StoreBackend::Memory,
        }
    }
}

impl From<Args> for FoogieConfig {
    fn from(args: Args) -> Self {
        FoogieConfig {
            store: StoreConfig {
                backend: args.store.backend.into(),
                base_url: args.store.base_url,
                master_key: args.store.master_key,
                private_bins: args.store.private_bins,
                request_timeout: Duration::from_secs(args.store.timeout_secs),
                max_conflict_retries: args.store.max_conflict_retries,
            },
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                base_url: args.llm.base_url,
                request_timeout: Duration::from_secs(args.llm.timeout_secs),
            },
        }
    }
}
