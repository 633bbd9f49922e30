use cosmic::{
    iced::{Alignment, Length},
    widget::{self, button, column, container, row, text, text_input},
    Element,
};

use crate::config::{AppConfig, API_KEY_ENV};
use crate::mcp::McpCatalog;

#[derive(Debug, Clone)]
pub enum Message {
    ModelChanged(String),
    EndpointChanged(String),
    Save,
    Reset,
}

/// Read-only credential display plus in-memory edits of the model profile,
/// persisted to the TOML config on save. The API key itself only ever comes
/// from the environment.
pub struct SettingsPage {
    pub model_input: String,
    pub endpoint_input: String,
    pub changed: bool,
}

impl SettingsPage {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            model_input: config.profile.model.clone(),
            endpoint_input: config.profile.endpoint.clone(),
            changed: false,
        }
    }

    pub fn reset(&mut self, config: &AppConfig) {
        self.model_input = config.profile.model.clone();
        self.endpoint_input = config.profile.endpoint.clone();
        self.changed = false;
    }

    fn profile_card<'a>(&'a self, config: &'a AppConfig) -> Element<'a, Message> {
        let dim = cosmic::iced::Color::from_rgb(0.5, 0.5, 0.5);

        container(
            column()
                .push(text("Gemini Profile").size(16))
                .push(
                    text(format!(
                        "API key ({}): {}",
                        API_KEY_ENV,
                        config.profile.masked_key()
                    ))
                    .size(12)
                    .class(cosmic::style::Text::Color(dim)),
                )
                .push(
                    row()
                        .push(
                            text_input("Chat model", &self.model_input)
                                .on_input(Message::ModelChanged)
                                .width(Length::Fill),
                        )
                        .push(widget::Space::with_width(8))
                        .push(
                            text_input("Endpoint", &self.endpoint_input)
                                .on_input(Message::EndpointChanged)
                                .width(Length::Fill),
                        ),
                )
                .push(
                    text(format!("Image model: {}", config.profile.image_model))
                        .size(12)
                        .class(cosmic::style::Text::Color(dim)),
                )
                .spacing(12),
        )
        .padding(16)
        .class(cosmic::style::Container::Card)
        .into()
    }

    fn prompt_card<'a>(&self, config: &'a AppConfig, overridden: bool) -> Element<'a, Message> {
        let dim = cosmic::iced::Color::from_rgb(0.5, 0.5, 0.5);

        let source = if overridden {
            config
                .prompts
                .system_prompt_file
                .clone()
                .unwrap_or_else(|| "override file".to_string())
        } else {
            "built-in SRE agent instruction".to_string()
        };

        container(
            column()
                .push(text("System Prompt").size(16))
                .push(
                    text(format!("Source: {}", source))
                        .size(12)
                        .class(cosmic::style::Text::Color(dim)),
                )
                .spacing(8),
        )
        .padding(16)
        .class(cosmic::style::Container::Card)
        .into()
    }

    fn servers_card<'a>(&self, catalog: &'a McpCatalog) -> Element<'a, Message> {
        let dim = cosmic::iced::Color::from_rgb(0.5, 0.5, 0.5);

        let mut servers = column().spacing(8);
        for server in catalog.servers() {
            servers = servers.push(
                container(
                    column()
                        .push(
                            row()
                                .push(text(server.name).size(14))
                                .push(widget::Space::with_width(Length::Fill))
                                .push(
                                    text(server.status.label())
                                        .size(10)
                                        .font(cosmic::font::Font::MONOSPACE),
                                )
                                .align_y(Alignment::Center),
                        )
                        .push(
                            text(format!("Type: {} | {}", server.kind.label(), server.url))
                                .size(12)
                                .class(cosmic::style::Text::Color(dim)),
                        )
                        .spacing(4),
                )
                .padding(12)
                .class(cosmic::style::Container::Card),
            );
        }

        container(
            column()
                .push(text(format!("MCP Servers ({})", catalog.servers().len())).size(16))
                .push(
                    text("Static catalog; connections are presentational in this build.")
                        .size(12)
                        .class(cosmic::style::Text::Color(dim)),
                )
                .push(servers)
                .spacing(12),
        )
        .padding(16)
        .class(cosmic::style::Container::Card)
        .into()
    }

    pub fn view<'a>(
        &'a self,
        config: &'a AppConfig,
        prompt_overridden: bool,
        catalog: &'a McpCatalog,
    ) -> Element<'a, Message> {
        let status: Element<Message> = if self.changed {
            text("Unsaved changes").size(12).into()
        } else {
            text("All changes saved").size(12).into()
        };

        widget::scrollable(
            column()
                .push(container(text("Configuration").size(22)).padding(16))
                .push(self.profile_card(config))
                .push(self.prompt_card(config, prompt_overridden))
                .push(self.servers_card(catalog))
                .push(
                    container(
                        row()
                            .push(button::suggested("Save Settings").on_press(Message::Save))
                            .push(button::standard("Reset").on_press(Message::Reset))
                            .push(status)
                            .spacing(12)
                            .align_y(Alignment::Center),
                    )
                    .padding(16),
                )
                .spacing(16),
        )
        .into()
    }
}
