//! Stillwater demo application: window, input, clock, and configuration.

pub mod app;
pub mod clock;
pub mod config;
pub mod input;

pub use app::DemoApp;
pub use clock::GameClock;
pub use config::DemoConfig;
pub use input::InputState;
