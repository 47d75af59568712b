mod component;
mod config;
mod error;
mod layout;
mod lifecycle;
mod poller;
mod render;
mod source;
mod types;
mod viewport;

pub use component::JobFlowCanvas;
