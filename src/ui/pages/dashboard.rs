use chrono::{DateTime, Local};
use cosmic::{iced::Length, Element};

use crate::mcp::{McpCatalog, McpServer, McpServerStatus};

/// Mock time-series shown on the dashboard. There is no live feed; the
/// panels render these fixed datasets.
const ETL_METRICS: &[(&str, f32)] = &[
    ("08:00", 450.0),
    ("10:00", 1200.0),
    ("12:00", 980.0),
    ("14:00", 1600.0),
    ("16:00", 2100.0),
    ("18:00", 800.0),
];

const INCIDENT_METRICS: &[(&str, f32)] = &[
    ("Mon", 12.0),
    ("Tue", 8.0),
    ("Wed", 15.0),
    ("Thu", 4.0),
    ("Fri", 9.0),
    ("Sat", 2.0),
    ("Sun", 3.0),
];

#[derive(Debug, Clone)]
pub enum Message {
    Refresh,
}

/// Pure display view: static server catalog plus mock metric panels.
pub struct DashboardPage {
    last_refreshed: DateTime<Local>,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self {
            last_refreshed: Local::now(),
        }
    }

    pub fn refresh(&mut self) {
        self.last_refreshed = Local::now();
    }

    fn status_color(status: McpServerStatus) -> cosmic::iced::Color {
        match status {
            McpServerStatus::Connected => cosmic::iced::Color::from_rgb(0.2, 0.7, 0.2),
            McpServerStatus::Disconnected => cosmic::iced::Color::from_rgb(0.6, 0.6, 0.6),
            McpServerStatus::Error => cosmic::iced::Color::from_rgb(0.8, 0.2, 0.2),
        }
    }

    fn server_card<'a>(&self, server: &'a McpServer) -> Element<'a, Message> {
        let dim = cosmic::iced::Color::from_rgb(0.5, 0.5, 0.5);

        let mut chips = cosmic::widget::row::with_capacity(server.capabilities.len()).spacing(6);
        for cap in server.capabilities {
            chips = chips.push(
                cosmic::widget::container(cosmic::widget::text(*cap).size(10))
                    .padding([2, 6])
                    .class(cosmic::style::Container::Card),
            );
        }

        cosmic::widget::container(
            cosmic::widget::column::with_capacity(4)
                .push(
                    cosmic::widget::row::with_capacity(3)
                        .push(cosmic::widget::text(server.name).size(16))
                        .push(cosmic::widget::Space::with_width(Length::Fill))
                        .push(
                            cosmic::widget::text(server.status.label())
                                .size(10)
                                .font(cosmic::font::Font::MONOSPACE)
                                .class(cosmic::style::Text::Color(Self::status_color(
                                    server.status,
                                ))),
                        )
                        .align_y(cosmic::iced::Alignment::Center),
                )
                .push(
                    cosmic::widget::text(server.url)
                        .size(12)
                        .font(cosmic::font::Font::MONOSPACE)
                        .class(cosmic::style::Text::Color(dim)),
                )
                .push(
                    cosmic::widget::text(format!("{} · MCP CAPABILITIES", server.kind.label()))
                        .size(10)
                        .class(cosmic::style::Text::Color(dim)),
                )
                .push(chips)
                .spacing(8),
        )
        .padding(16)
        .width(Length::Fill)
        .class(cosmic::style::Container::Card)
        .into()
    }

    fn metric_panel<'a>(&self, title: &'a str, data: &'a [(&'a str, f32)]) -> Element<'a, Message> {
        let max = data.iter().map(|(_, v)| *v).fold(f32::MIN, f32::max).max(1.0);
        let dim = cosmic::iced::Color::from_rgb(0.5, 0.5, 0.5);

        let mut rows = cosmic::widget::column::with_capacity(data.len() + 1)
            .push(cosmic::widget::text(title).size(14))
            .spacing(8);

        for (label, value) in data {
            rows = rows.push(
                cosmic::widget::row::with_capacity(3)
                    .push(
                        cosmic::widget::container(
                            cosmic::widget::text(*label)
                                .size(11)
                                .font(cosmic::font::Font::MONOSPACE),
                        )
                        .width(Length::Fixed(56.0)),
                    )
                    .push(cosmic::widget::progress_bar(0.0..=max, *value))
                    .push(
                        cosmic::widget::container(
                            cosmic::widget::text(format!("{}", *value as u32))
                                .size(11)
                                .class(cosmic::style::Text::Color(dim)),
                        )
                        .width(Length::Fixed(48.0)),
                    )
                    .spacing(8)
                    .align_y(cosmic::iced::Alignment::Center),
            );
        }

        cosmic::widget::container(rows)
            .padding(16)
            .width(Length::Fill)
            .class(cosmic::style::Container::Card)
            .into()
    }

    pub fn view<'a>(&'a self, catalog: &'a McpCatalog) -> Element<'a, Message> {
        let dim = cosmic::iced::Color::from_rgb(0.5, 0.5, 0.5);

        let header = cosmic::widget::row::with_capacity(3)
            .push(
                cosmic::widget::column::with_capacity(2)
                    .push(cosmic::widget::text("Ops Control Center").size(22))
                    .push(
                        cosmic::widget::text(format!(
                            "Monitoring of ETL pipelines and incident response · updated {}",
                            self.last_refreshed.format("%H:%M:%S")
                        ))
                        .size(12)
                        .class(cosmic::style::Text::Color(dim)),
                    )
                    .spacing(2),
            )
            .push(cosmic::widget::Space::with_width(Length::Fill))
            .push(
                cosmic::widget::button::standard("Refresh Status").on_press(Message::Refresh),
            )
            .align_y(cosmic::iced::Alignment::Center);

        let mut servers = cosmic::widget::row::with_capacity(catalog.servers().len()).spacing(16);
        for server in catalog.servers() {
            servers = servers.push(self.server_card(server));
        }

        let metrics = cosmic::widget::row::with_capacity(2)
            .push(self.metric_panel("Ab Initio: Records Processed", ETL_METRICS))
            .push(self.metric_panel("PagerDuty: Active Incidents", INCIDENT_METRICS))
            .spacing(16);

        cosmic::widget::scrollable(
            cosmic::widget::column::with_capacity(3)
                .push(header)
                .push(servers)
                .push(metrics)
                .spacing(24)
                .padding(24),
        )
        .height(Length::Fill)
        .width(Length::Fill)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_datasets_match_the_shipped_dashboard() {
        assert_eq!(ETL_METRICS.len(), 6);
        assert_eq!(INCIDENT_METRICS.len(), 7);
        assert!(ETL_METRICS.iter().all(|(_, v)| *v > 0.0));
        // Peak hour drives the bar scale.
        let peak = ETL_METRICS.iter().map(|(_, v)| *v).fold(f32::MIN, f32::max);
        assert_eq!(peak, 2100.0);
    }

    #[test]
    fn refresh_only_restamps_the_clock() {
        let mut page = DashboardPage::new();
        let before = page.last_refreshed;
        page.refresh();
        assert!(page.last_refreshed >= before);
    }
}
