mod app;

pub use app::crossterm_main;
