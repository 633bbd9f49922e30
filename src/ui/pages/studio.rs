use cosmic::{
    iced::Length,
    widget::{self, text_input},
    Element,
};
use std::sync::Arc;

use crate::llm::{self, AspectRatio, ImageGenConfig, ImageSize, LlmError};

/// Fixed error surfaced when the image endpoint fails, whatever the cause.
pub const ERROR_TEXT: &str = "Failed to generate image. Please try again.";

#[derive(Debug, Clone)]
pub enum Message {
    PromptChanged(String),
    AspectSelected(usize),
    SizeSelected(usize),
    Generate,
    Generated(Result<Vec<String>, Arc<LlmError>>),
}

/// The creative studio view. Owns the prompt form and the displayed image
/// set; one generation may be in flight at a time.
pub struct StudioPage {
    pub prompt: String,
    aspect_index: usize,
    size_index: usize,
    images: Vec<String>,
    generating: bool,
    error: Option<String>,
    prompt_id: widget::Id,
    aspect_labels: Vec<String>,
    size_labels: Vec<String>,
}

impl StudioPage {
    pub fn new() -> Self {
        Self {
            prompt: String::new(),
            aspect_index: 0,
            size_index: 0,
            images: Vec::new(),
            generating: false,
            error: None,
            prompt_id: widget::Id::unique(),
            aspect_labels: AspectRatio::SUPPORTED.iter().map(|r| r.label().to_string()).collect(),
            size_labels: ImageSize::SUPPORTED.iter().map(|s| s.label().to_string()).collect(),
        }
    }

    pub fn select_aspect(&mut self, index: usize) {
        if index < AspectRatio::SUPPORTED.len() {
            self.aspect_index = index;
        }
    }

    pub fn select_size(&mut self, index: usize) {
        if index < ImageSize::SUPPORTED.len() {
            self.size_index = index;
        }
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Snapshot the form into a request. Returns `None` without side effects
    /// when the prompt is empty after trimming or a generation is already
    /// running.
    pub fn begin_generate(&mut self) -> Option<ImageGenConfig> {
        let prompt = self.prompt.trim();
        if prompt.is_empty() || self.generating {
            return None;
        }

        self.generating = true;
        self.error = None;

        Some(ImageGenConfig {
            prompt: prompt.to_string(),
            aspect_ratio: AspectRatio::SUPPORTED[self.aspect_index],
            image_size: ImageSize::SUPPORTED[self.size_index],
        })
    }

    /// Replace the displayed set with the new result. Only the first image
    /// is rendered.
    pub fn complete(&mut self, images: Vec<String>) {
        self.images = images;
        self.generating = false;
    }

    pub fn fail(&mut self) {
        self.error = Some(ERROR_TEXT.to_string());
        self.generating = false;
    }

    fn control_panel(&self) -> Element<Message> {
        let dim = cosmic::iced::Color::from_rgb(0.5, 0.5, 0.5);

        let mut panel = cosmic::widget::column::with_capacity(7)
            .push(cosmic::widget::text("Creative Studio").size(18))
            .push(
                cosmic::widget::text("High-fidelity visual aids for runbooks and postmortems")
                    .size(12)
                    .class(cosmic::style::Text::Color(dim)),
            )
            .push(
                text_input("A futuristic data center with glowing blue cables...", &self.prompt)
                    .id(self.prompt_id.clone())
                    .on_input(Message::PromptChanged)
                    .on_submit(|_| Message::Generate)
                    .width(Length::Fill)
                    .padding(12),
            )
            .push(
                cosmic::widget::column::with_capacity(2)
                    .push(cosmic::widget::text("Aspect Ratio").size(12))
                    .push(widget::dropdown(
                        &self.aspect_labels,
                        Some(self.aspect_index),
                        Message::AspectSelected,
                    ))
                    .spacing(4),
            )
            .push(
                cosmic::widget::column::with_capacity(2)
                    .push(cosmic::widget::text("Resolution").size(12))
                    .push(widget::dropdown(
                        &self.size_labels,
                        Some(self.size_index),
                        Message::SizeSelected,
                    ))
                    .spacing(4),
            )
            .push(if self.generating {
                // No on_press while a generation is pending.
                widget::button::suggested("Generating…")
            } else {
                widget::button::suggested("Generate Image").on_press(Message::Generate)
            })
            .spacing(16);

        if let Some(error) = &self.error {
            panel = panel.push(
                cosmic::widget::text(error)
                    .size(12)
                    .class(cosmic::style::Text::Color(cosmic::iced::Color::from_rgb(
                        0.8, 0.2, 0.2,
                    ))),
            );
        }

        cosmic::widget::container(panel)
            .padding(16)
            .width(Length::Fixed(320.0))
            .height(Length::Fill)
            .class(cosmic::style::Container::Card)
            .into()
    }

    fn preview(&self) -> Element<Message> {
        let dim = cosmic::iced::Color::from_rgb(0.5, 0.5, 0.5);

        let content: Element<Message> = if let Some(first) = self.images.first() {
            match llm::decode_data_uri(first) {
                Some(bytes) => {
                    let handle = cosmic::widget::image::Handle::from_bytes(bytes);
                    cosmic::widget::container(cosmic::widget::image(handle))
                        .padding(8)
                        .class(cosmic::style::Container::Card)
                        .into()
                }
                None => cosmic::widget::text("The returned image could not be decoded.")
                    .size(14)
                    .class(cosmic::style::Text::Color(dim))
                    .into(),
            }
        } else if self.generating {
            cosmic::widget::text("Dreaming up your image…")
                .size(14)
                .class(cosmic::style::Text::Color(dim))
                .into()
        } else {
            cosmic::widget::text("Enter a prompt to generate high-fidelity assets.")
                .size(14)
                .class(cosmic::style::Text::Color(dim))
                .into()
        };

        cosmic::widget::container(content)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    pub fn view(&self) -> Element<Message> {
        cosmic::widget::row::with_capacity(2)
            .push(self.control_panel())
            .push(self.preview())
            .spacing(16)
            .padding(16)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prompt_is_a_no_op() {
        let mut page = StudioPage::new();
        page.prompt = "   ".to_string();
        assert!(page.begin_generate().is_none());
        assert!(!page.is_generating());
        assert!(page.images().is_empty());
    }

    #[test]
    fn generation_while_pending_is_rejected() {
        let mut page = StudioPage::new();
        page.prompt = "a data center".to_string();

        let first = page.begin_generate();
        assert!(first.is_some());
        assert!(page.is_generating());
        assert!(page.begin_generate().is_none());
    }

    #[test]
    fn success_replaces_the_displayed_set() {
        let mut page = StudioPage::new();
        page.prompt = "blue cables".to_string();
        page.complete(vec!["data:image/png;base64,old".to_string()]);

        page.begin_generate().unwrap();
        page.complete(vec![
            "data:image/png;base64,new".to_string(),
            "data:image/png;base64,second".to_string(),
        ]);

        assert_eq!(page.images().len(), 2);
        assert_eq!(page.images()[0], "data:image/png;base64,new");
        assert!(!page.is_generating());
    }

    #[test]
    fn failure_surfaces_the_fixed_error_and_keeps_images() {
        let mut page = StudioPage::new();
        page.prompt = "a graph".to_string();
        page.complete(vec!["data:image/png;base64,kept".to_string()]);

        page.begin_generate().unwrap();
        page.fail();

        assert_eq!(page.error.as_deref(), Some(ERROR_TEXT));
        assert_eq!(page.images().len(), 1);
        assert!(!page.is_generating());
    }

    #[test]
    fn form_snapshot_uses_the_selected_options() {
        let mut page = StudioPage::new();
        page.prompt = "widescreen shot".to_string();
        page.select_aspect(1);
        page.select_size(0);

        let config = page.begin_generate().unwrap();
        assert_eq!(config.aspect_ratio, AspectRatio::Widescreen);
        assert_eq!(config.image_size, ImageSize::Standard1K);
        assert_eq!(config.prompt, "widescreen shot");
    }
}
