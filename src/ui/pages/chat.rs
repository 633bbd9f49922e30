use cosmic::{
    iced::{Length, Padding},
    widget::{self, markdown, scrollable, text_input},
    Element,
};
use std::collections::HashSet;
use std::sync::Arc;

use crate::chat::ChatSession;
use crate::llm::{self, ChatResponse, LlmError, Role};
use crate::ui::widgets::ToolCallWidget;

#[derive(Debug, Clone)]
pub enum Message {
    InputChanged(String),
    Send,
    Completed(Result<ChatResponse, Arc<LlmError>>),
    ToggleToolCall(usize, usize),
    ShowFullText(String),
    LinkClicked(markdown::Url),
}

/// The agent chat view. Owns the session history and the input line;
/// nothing outside this page mutates them.
pub struct ChatPage {
    pub session: ChatSession,
    pub input: String,
    input_id: widget::Id,
    scrollable_id: widget::Id,
    expanded_tool_calls: HashSet<(usize, usize)>,
}

impl ChatPage {
    pub fn new(system_prompt: String) -> Self {
        Self {
            session: ChatSession::new(system_prompt),
            input: String::new(),
            input_id: widget::Id::unique(),
            scrollable_id: widget::Id::unique(),
            expanded_tool_calls: HashSet::new(),
        }
    }

    pub fn toggle_tool_call(&mut self, message_idx: usize, call_idx: usize) {
        let key = (message_idx, call_idx);
        if !self.expanded_tool_calls.remove(&key) {
            self.expanded_tool_calls.insert(key);
        }
    }

    fn header(&self) -> Element<Message> {
        let dim = cosmic::iced::Color::from_rgb(0.5, 0.5, 0.5);
        let green = cosmic::iced::Color::from_rgb(0.2, 0.7, 0.2);

        cosmic::widget::container(
            cosmic::widget::row::with_capacity(3)
                .push(
                    cosmic::widget::column::with_capacity(2)
                        .push(cosmic::widget::text("SRE Agent").size(18))
                        .push(
                            cosmic::widget::text("Ab Initio & PagerDuty Connected")
                                .size(12)
                                .class(cosmic::style::Text::Color(dim)),
                        )
                        .spacing(2),
                )
                .push(cosmic::widget::Space::with_width(Length::Fill))
                .push(
                    cosmic::widget::text("MCP: ACTIVE")
                        .size(12)
                        .font(cosmic::font::Font::MONOSPACE)
                        .class(cosmic::style::Text::Color(green)),
                )
                .align_y(cosmic::iced::Alignment::Center)
                .spacing(12),
        )
        .padding(12)
        .class(cosmic::style::Container::Card)
        .into()
    }

    fn message_bubble<'a>(&'a self, msg: &'a crate::chat::ChatMessage) -> Element<'a, Message> {
        let is_user = msg.role == Role::User;

        let content_widget: Element<Message> = if is_user {
            widget::container(
                cosmic::widget::text(&msg.content)
                    .size(14)
                    .class(cosmic::style::Text::Color(cosmic::iced::Color::WHITE)),
            )
            .width(Length::Fill)
            .into()
        } else {
            widget::container(widget::lazy(&msg.content, |_| {
                let items = markdown::parse(&msg.content).collect::<Vec<_>>();
                let style = widget::markdown::Style {
                    inline_code_padding: cosmic::iced::Padding::from([1, 2]),
                    inline_code_highlight: widget::markdown::Highlight {
                        background: cosmic::iced::Background::Color(cosmic::iced::Color::from_rgb(
                            0.1, 0.1, 0.1,
                        )),
                        border: cosmic::iced::Border::default().rounded(2),
                    },
                    inline_code_color: cosmic::iced::Color::WHITE,
                    link_color: cosmic::iced::Color::from_rgb(0.3, 0.6, 1.0),
                };
                widget::markdown(&items, widget::markdown::Settings::default(), style)
                    .map(Message::LinkClicked)
            }))
            .width(Length::Fill)
            .into()
        };

        let bubble = cosmic::widget::container(
            cosmic::widget::row::with_capacity(2).push(content_widget).push(
                cosmic::widget::button::text("📋")
                    .on_press(Message::ShowFullText(msg.content.clone()))
                    .padding(4)
                    .class(cosmic::style::Button::Text),
            ),
        )
        .padding(Padding::from([12, 16]))
        .class(if is_user {
            cosmic::style::Container::Primary
        } else {
            cosmic::style::Container::Card
        })
        .width(Length::FillPortion(7));

        if is_user {
            cosmic::widget::row::with_capacity(2)
                .push(cosmic::widget::Space::with_width(Length::FillPortion(3)))
                .push(bubble)
                .into()
        } else {
            cosmic::widget::row::with_capacity(2)
                .push(bubble)
                .push(cosmic::widget::Space::with_width(Length::FillPortion(3)))
                .into()
        }
    }

    pub fn view(&self) -> Element<Message> {
        let messages = self.session.messages();

        let mut column = cosmic::widget::column::with_capacity(messages.len()).spacing(12);

        for (i, msg) in messages.iter().enumerate() {
            column = column.push(self.message_bubble(msg));

            // Structured function calls render right under the model turn
            // that produced them.
            for (ci, call) in msg.tool_calls.iter().enumerate() {
                let is_expanded = self.expanded_tool_calls.contains(&(i, ci));
                let card = ToolCallWidget::from_call(call, &msg.tool_responses, is_expanded);
                let element: Element<Message> = cosmic::widget::row::with_capacity(2)
                    .push(card.view().map(move |_| Message::ToggleToolCall(i, ci)))
                    .push(cosmic::widget::Space::with_width(Length::FillPortion(3)))
                    .into();
                column = column.push(element);
            }

            for uri in &msg.images {
                if let Some(bytes) = llm::decode_data_uri(uri) {
                    let handle = cosmic::widget::image::Handle::from_bytes(bytes);
                    column = column.push(
                        cosmic::widget::container(cosmic::widget::image(handle))
                            .max_height(320.0)
                            .padding(4),
                    );
                }
            }
        }

        if self.session.is_busy() {
            column = column.push(
                cosmic::widget::row::with_capacity(2)
                    .push(cosmic::widget::text("Working…").size(12))
                    .push(cosmic::widget::Space::with_width(Length::Fill)),
            );
        }

        // Spacer keeps the scroll pinned to the newest turn.
        column = column.push(cosmic::widget::Space::with_height(Length::Fixed(1.0)).width(Length::Fill));

        cosmic::widget::column::with_capacity(5)
            .push(self.header())
            .push(cosmic::widget::Space::with_height(Length::Fixed(16.0)))
            .push(
                scrollable(column)
                    .scrollbar_width(8)
                    .scrollbar_padding(4)
                    .id(self.scrollable_id.clone())
                    .height(Length::Fill)
                    .width(Length::Fill),
            )
            .push(cosmic::widget::Space::with_height(Length::Fixed(16.0)))
            .push(
                cosmic::widget::container(
                    cosmic::widget::row::with_capacity(2)
                        .push(
                            text_input(
                                "E.g. 'Check failures in the daily_sales graph' or 'List high urgency incidents'",
                                &self.input,
                            )
                            .id(self.input_id.clone())
                            .on_input(Message::InputChanged)
                            .on_submit(|_| Message::Send)
                            .width(Length::Fill)
                            .padding(12),
                        )
                        .push(widget::button::suggested("Send").on_press(Message::Send))
                        .spacing(8)
                        .align_y(cosmic::iced::Alignment::Center),
                )
                .padding(16)
                .width(Length::Fill)
                .class(cosmic::style::Container::Card),
            )
            .into()
    }
}
