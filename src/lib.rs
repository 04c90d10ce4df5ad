pub mod chat;
pub mod config;
pub mod content;
pub mod editor;
pub mod editor_display;
pub mod export;
pub mod render;
pub mod source;
pub mod theme;
