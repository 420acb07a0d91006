pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod reports;
pub mod settings;
pub mod slider;
pub mod state;
pub mod status;
pub mod storage;
pub mod theme;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
pub use storage::load_data;
