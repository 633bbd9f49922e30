pub mod chat;
pub mod dashboard;
pub mod settings;
pub mod studio;

pub use chat::ChatPage;
pub use dashboard::DashboardPage;
pub use settings::SettingsPage;
pub use studio::StudioPage;
