use cosmic::{
    font,
    iced::{Length, Padding},
    widget::{column, container, row, scrollable, text, Space},
    Element,
};

use crate::llm::{ToolCall, ToolResponse};

#[derive(Debug, Clone)]
pub enum Message {
    ToggleExpanded,
}

/// Card rendered under a model message for each function call the model
/// reported. Purely presentational: nothing is executed on this side.
#[derive(Debug, Clone)]
pub struct ToolCallWidget {
    pub tool_name: String,
    pub args: String,
    pub result: Option<String>,
    pub is_expanded: bool,
}

impl ToolCallWidget {
    pub fn from_call(call: &ToolCall, responses: &[ToolResponse], is_expanded: bool) -> Self {
        let result = responses
            .iter()
            .find(|r| r.id == call.id)
            .map(|r| serde_json::to_string_pretty(&r.result).unwrap_or_default());

        Self {
            tool_name: call.name.clone(),
            args: serde_json::to_string_pretty(&call.args).unwrap_or_default(),
            result,
            is_expanded,
        }
    }

    /// Consumes the widget so the produced element owns its strings.
    pub fn view(self) -> Element<'static, Message> {
        let Self {
            tool_name,
            args,
            result,
            is_expanded,
        } = self;

        let accent = cosmic::iced::Color::from_rgb(0.2, 0.7, 0.2);
        let dim = cosmic::iced::Color::from_rgb(0.6, 0.6, 0.6);

        let expand_icon = if is_expanded { "▼" } else { "▶" };

        let header = row()
            .push(
                text("MCP Tool Execution")
                    .size(12)
                    .class(cosmic::theme::Text::Color(dim)),
            )
            .push(text(tool_name).font(font::Font::MONOSPACE))
            .push(Space::with_width(Length::Fill))
            .push(
                cosmic::widget::button::text(expand_icon)
                    .on_press(Message::ToggleExpanded)
                    .class(cosmic::theme::Button::Text),
            )
            .spacing(10)
            .align_y(cosmic::iced::Alignment::Center)
            .width(Length::Fill);

        let mut content = column().push(header).spacing(10);

        if is_expanded {
            let args_widget = column()
                .push(
                    text("Arguments")
                        .size(14)
                        .class(cosmic::theme::Text::Color(dim)),
                )
                .push(
                    container(
                        scrollable(text(args).size(12).font(font::Font::MONOSPACE))
                            .height(Length::Fixed(80.0)),
                    )
                    .class(cosmic::theme::Container::Card)
                    .padding(8),
                )
                .spacing(5);
            content = content.push(args_widget);

            match result {
                Some(result) => {
                    let result_widget = column()
                        .push(
                            text("Result")
                                .size(14)
                                .class(cosmic::theme::Text::Color(accent)),
                        )
                        .push(
                            container(
                                scrollable(text(result).size(12).font(font::Font::MONOSPACE))
                                    .height(Length::Fixed(120.0)),
                            )
                            .class(cosmic::theme::Container::Card)
                            .padding(8),
                        )
                        .spacing(5);
                    content = content.push(result_widget);
                }
                None => {
                    content = content.push(
                        text("Querying backend system…")
                            .size(12)
                            .class(cosmic::theme::Text::Color(accent)),
                    );
                }
            }
        }

        container(content)
            .width(Length::Fill)
            .padding(Padding::from([10, 15]))
            .class(cosmic::theme::Container::Card)
            .into()
    }
}
