pub mod board;
pub mod config;
pub mod controller;
pub mod metrics;
pub mod source;
pub mod testing;

pub use board::{
    build_view, BoardError, BoardView, Column, GroupBy, Preferences, PreferencesUpdate, SortBy,
    Ticket, User,
};
pub use config::{
    load_config, load_config_from_str, validate_config, BoardConfig, Config, ConfigError,
    ServerConfig, SourceConfig,
};
pub use controller::{BoardController, BoardState, RefreshOutcome};
pub use source::{BoardPayload, HttpTicketSource, SourceError, TicketSource};
