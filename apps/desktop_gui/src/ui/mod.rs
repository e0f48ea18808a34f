//! UI layer for the desktop quick start form.

pub mod app;

pub use app::QuickStartApp;
