mod chat;
mod config;
mod llm;
mod mcp;
mod prompts;
mod ui;

use tracing_subscriber::EnvFilter;

use tracing::info;

pub fn tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("wgpu_core=error".parse().unwrap())
        .add_directive("naga=error".parse().unwrap())
        .add_directive("cosmic_text=error".parse().unwrap())
        .add_directive("sctk=error".parse().unwrap())
        .add_directive("wgpu_hal=error".parse().unwrap())
        .add_directive("iced_wgpu=error".parse().unwrap());

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn main() -> cosmic::iced::Result {
    // Initialize logging
    tracing();

    info!("Starting cosmic_nexus...");

    // Run the cosmic application
    cosmic::app::run::<ui::CosmicNexusApp>(ui::settings(), ui::flags())
}
