use cosmic::{
    app::{self, Core},
    widget::{self, menu, text_editor},
    Application, Element,
};
use std::sync::Arc;

use crate::{
    config::{AppConfig, LlmProfile},
    llm::{gemini::GeminiClient, LlmClient},
    mcp::McpCatalog,
    prompts::PromptManager,
    ui::context::ContextPage,
    ui::dialogs::{DialogAction, DialogPage},
    ui::pages::{chat, dashboard, settings, studio},
    ui::pages::{ChatPage, DashboardPage, SettingsPage, StudioPage},
};

#[derive(Debug, Clone)]
pub enum Message {
    Chat(chat::Message),
    Dashboard(dashboard::Message),
    Studio(studio::Message),
    Settings(settings::Message),
    // Menu actions
    ShowAbout,
    CloseAbout,
    OpenUrl(String),
    OpenSettings,
    Quit,
    // Dialog actions
    DialogAction(DialogAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPage {
    Chat,
    Dashboard,
    Studio,
    Settings,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuAction {
    About,
    Settings,
    Quit,
    SendMessage,
}

impl menu::Action for MenuAction {
    type Message = Message;

    fn message(&self) -> Self::Message {
        match self {
            MenuAction::About => Message::ShowAbout,
            MenuAction::Settings => Message::OpenSettings,
            MenuAction::Quit => Message::Quit,
            MenuAction::SendMessage => Message::Chat(chat::Message::Send),
        }
    }
}

// NavMenuAction for the navigation context menu
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NavMenuAction {
    Settings,
    About,
    Quit,
}

impl menu::Action for NavMenuAction {
    type Message = cosmic::Action<Message>;

    fn message(&self) -> Self::Message {
        cosmic::Action::App(match self {
            NavMenuAction::Settings => Message::OpenSettings,
            NavMenuAction::About => Message::ShowAbout,
            NavMenuAction::Quit => Message::Quit,
        })
    }
}

pub struct CosmicNexusApp {
    core: Core,
    config: AppConfig,
    prompt_manager: PromptManager,
    catalog: McpCatalog,
    llm_client: Arc<dyn LlmClient>,
    current_page: NavigationPage,
    key_binds: std::collections::HashMap<menu::KeyBind, MenuAction>,
    context_page: ContextPage,
    about: widget::about::About,
    // Navigation model to integrate with the COSMIC shell nav bar
    nav_model: widget::segmented_button::SingleSelectModel,
    // Dialog state
    dialog: Option<DialogPage>,
    dialog_text_input_id: widget::Id,
    // Views. Each page owns its state; nothing crosses page boundaries.
    chat: ChatPage,
    dashboard: DashboardPage,
    studio: StudioPage,
    settings: SettingsPage,
}

impl CosmicNexusApp {
    fn create_key_binds() -> std::collections::HashMap<menu::KeyBind, MenuAction> {
        use cosmic::iced::keyboard::Key;
        use cosmic::widget::menu::key_bind::{KeyBind, Modifier};

        let mut key_binds = std::collections::HashMap::new();

        key_binds.insert(
            KeyBind {
                modifiers: vec![Modifier::Ctrl],
                key: Key::Character("q".into()),
            },
            MenuAction::Quit,
        );

        key_binds.insert(
            KeyBind {
                modifiers: vec![Modifier::Ctrl],
                key: Key::Character(",".into()),
            },
            MenuAction::Settings,
        );

        key_binds.insert(
            KeyBind {
                modifiers: vec![Modifier::Ctrl],
                key: Key::Named(cosmic::iced::keyboard::key::Named::Enter),
            },
            MenuAction::SendMessage,
        );

        key_binds
    }

    fn rebuild_client(&mut self) {
        self.llm_client = Arc::new(GeminiClient::new(self.config.profile.clone()));
    }

    fn update_chat(&mut self, message: chat::Message) -> app::Task<Message> {
        match message {
            chat::Message::InputChanged(input) => {
                self.chat.input = input;
            }
            chat::Message::Send => {
                let input = self.chat.input.clone();
                if let Some(turns) = self.chat.session.begin_submit(&input) {
                    self.chat.input.clear();

                    let client = self.llm_client.clone();
                    let tools = self.catalog.tool_definitions();
                    return cosmic::task::future(async move {
                        let result = client
                            .send_message_with_tools(turns, tools)
                            .await
                            .map_err(Arc::new);
                        Message::Chat(chat::Message::Completed(result))
                    });
                }
            }
            chat::Message::Completed(Ok(response)) => {
                self.chat.session.complete(response);
            }
            chat::Message::Completed(Err(error)) => {
                log::error!("Chat completion failed: {}", error);
                self.chat.session.fail();
            }
            chat::Message::ToggleToolCall(message_idx, call_idx) => {
                self.chat.toggle_tool_call(message_idx, call_idx);
            }
            chat::Message::ShowFullText(content) => {
                self.dialog = Some(DialogPage::MessageText(text_editor::Content::with_text(
                    &content,
                )));
            }
            chat::Message::LinkClicked(url) => {
                let _ = webbrowser::open(url.as_str());
            }
        }
        app::Task::none()
    }

    fn update_studio(&mut self, message: studio::Message) -> app::Task<Message> {
        match message {
            studio::Message::PromptChanged(prompt) => {
                self.studio.prompt = prompt;
            }
            studio::Message::AspectSelected(index) => {
                self.studio.select_aspect(index);
            }
            studio::Message::SizeSelected(index) => {
                self.studio.select_size(index);
            }
            studio::Message::Generate => {
                if let Some(config) = self.studio.begin_generate() {
                    let client = self.llm_client.clone();
                    return cosmic::task::future(async move {
                        let result = client.generate_images(&config).await.map_err(Arc::new);
                        Message::Studio(studio::Message::Generated(result))
                    });
                }
            }
            studio::Message::Generated(Ok(images)) => {
                self.studio.complete(images);
            }
            studio::Message::Generated(Err(error)) => {
                log::error!("Image generation failed: {}", error);
                self.studio.fail();
            }
        }
        app::Task::none()
    }

    fn update_settings(&mut self, message: settings::Message) {
        match message {
            settings::Message::ModelChanged(value) => {
                self.settings.model_input = value;
                self.settings.changed = true;
            }
            settings::Message::EndpointChanged(value) => {
                self.settings.endpoint_input = value;
                self.settings.changed = true;
            }
            settings::Message::Save => {
                self.config.profile.model = self.settings.model_input.trim().to_string();
                self.config.profile.endpoint = self.settings.endpoint_input.trim().to_string();
                if let Err(e) = self.config.save() {
                    log::error!("Failed to save settings: {}", e);
                } else {
                    self.settings.changed = false;
                    self.rebuild_client();
                }
            }
            settings::Message::Reset => {
                // The credential only ever comes from the environment.
                let api_key = std::mem::take(&mut self.config.profile.api_key);
                self.config.profile = LlmProfile {
                    api_key,
                    ..LlmProfile::default()
                };
                self.settings.reset(&self.config);
                self.rebuild_client();
            }
        }
    }

    fn create_menu_bar(&self) -> Element<Message> {
        use cosmic::widget::menu::{items, root, Item, ItemHeight, ItemWidth, MenuBar, Tree};
        use cosmic::widget::RcElementWrapper;

        MenuBar::new(vec![
            Tree::with_children(
                RcElementWrapper::new(Element::from(root("File"))),
                items(
                    &self.key_binds,
                    vec![Item::Button("Quit", None, MenuAction::Quit)],
                ),
            ),
            Tree::with_children(
                RcElementWrapper::new(Element::from(root("View"))),
                items(
                    &self.key_binds,
                    vec![Item::Button("Settings", None, MenuAction::Settings)],
                ),
            ),
            Tree::with_children(
                RcElementWrapper::new(Element::from(root("Help"))),
                items(
                    &self.key_binds,
                    vec![Item::Button("About", None, MenuAction::About)],
                ),
            ),
        ])
        .item_height(ItemHeight::Dynamic(40))
        .item_width(ItemWidth::Uniform(200))
        .spacing(4.0)
        .into()
    }
}

impl Application for CosmicNexusApp {
    type Executor = cosmic::executor::Default;
    type Flags = ();
    type Message = Message;
    const APP_ID: &'static str = "com.github.etlops.cosmic_nexus";

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, _flags: Self::Flags) -> (Self, app::Task<Self::Message>) {
        let config = AppConfig::load_or_default();
        if config.profile.api_key.is_empty() {
            log::warn!(
                "{} is not set; chat and image requests will fail",
                crate::config::API_KEY_ENV
            );
        }

        let prompt_manager = PromptManager::load_from_config(&config.prompts)
            .unwrap_or_else(|e| {
                log::warn!("Failed to load prompts: {}", e);
                PromptManager::default()
            });

        let catalog = McpCatalog::default();
        let llm_client: Arc<dyn LlmClient> = Arc::new(GeminiClient::new(config.profile.clone()));

        let about = widget::about::About::default()
            .name("COSMIC Nexus")
            .icon(cosmic::widget::icon::Named::new(Self::APP_ID))
            .version("0.1.0")
            .license("GPL-3.0")
            .links([("Repository", "https://github.com/etlops/cosmic_nexus")])
            .comments(
                "An ETL & Ops control center for the COSMIC desktop: SRE agent chat, \
                 pipeline dashboard and a creative studio, backed by the Gemini API.",
            );

        let nav_model = {
            // Build and populate a segmented nav model mirroring app sections
            let mut model = widget::segmented_button::ModelBuilder::default().build();
            model.insert().text("Agent Chat").data(NavigationPage::Chat);
            model
                .insert()
                .text("Dashboard")
                .data(NavigationPage::Dashboard)
                .divider_above(true);
            model.insert().text("Studio").data(NavigationPage::Studio);
            model
                .insert()
                .text("Settings")
                .data(NavigationPage::Settings)
                .divider_above(true);
            // Activate first item - collect entity first to avoid borrow issues
            let first_entity = model.iter().next();
            if let Some(first) = first_entity {
                model.activate(first);
            }
            model
        };

        let chat = ChatPage::new(prompt_manager.get_system_prompt().to_string());
        let settings = SettingsPage::new(&config);

        let app = Self {
            core,
            config,
            prompt_manager,
            catalog,
            llm_client,
            current_page: NavigationPage::Chat,
            key_binds: Self::create_key_binds(),
            context_page: ContextPage::About,
            about,
            nav_model,
            dialog: None,
            dialog_text_input_id: widget::Id::unique(),
            chat,
            dashboard: DashboardPage::new(),
            studio: StudioPage::new(),
            settings,
        };

        (app, app::Task::none())
    }

    fn update(&mut self, message: Self::Message) -> app::Task<Self::Message> {
        match message {
            Message::Chat(msg) => return self.update_chat(msg),
            Message::Dashboard(dashboard::Message::Refresh) => {
                self.dashboard.refresh();
            }
            Message::Studio(msg) => return self.update_studio(msg),
            Message::Settings(msg) => self.update_settings(msg),
            Message::ShowAbout => {
                // Toggle behavior: if About is already shown, hide it
                if self.context_page == ContextPage::About && self.core.window.show_context {
                    self.core.window.show_context = false;
                } else {
                    self.context_page = ContextPage::About;
                    self.core.window.show_context = true;
                }
            }
            Message::CloseAbout => {
                self.core.window.show_context = false;
            }
            Message::OpenUrl(url) => {
                let _ = webbrowser::open(&url);
            }
            Message::OpenSettings => {
                self.current_page = NavigationPage::Settings;
            }
            Message::Quit => {
                std::process::exit(0);
            }
            Message::DialogAction(action) => match action {
                DialogAction::Close => {
                    self.dialog = None;
                }
                DialogAction::CopyText => {
                    if let Some(DialogPage::MessageText(content)) = &self.dialog {
                        let _ = cli_clipboard::set_contents(content.text());
                    }
                    // Keep dialog open for multiple copies
                }
                DialogAction::TextEditorAction(action) => {
                    if let Some(DialogPage::MessageText(content)) = &mut self.dialog {
                        content.perform(action);
                    }
                }
            },
        }

        app::Task::none()
    }

    fn view(&self) -> Element<Self::Message> {
        let mut content = cosmic::widget::row::with_capacity(1).push(match self.current_page {
            NavigationPage::Chat => self.chat.view().map(Message::Chat),
            NavigationPage::Dashboard => self.dashboard.view(&self.catalog).map(Message::Dashboard),
            NavigationPage::Studio => self.studio.view().map(Message::Studio),
            NavigationPage::Settings => self
                .settings
                .view(
                    &self.config,
                    self.prompt_manager.is_overridden(),
                    &self.catalog,
                )
                .map(Message::Settings),
        });

        // Add dialog overlay if dialog is open
        if let Some(dialog_page) = &self.dialog {
            content = content.push(dialog_page.view(&self.dialog_text_input_id));
        }

        content.into()
    }

    fn header_start(&self) -> Vec<Element<Self::Message>> {
        vec![self.create_menu_bar()]
    }

    fn nav_model(&self) -> Option<&widget::segmented_button::SingleSelectModel> {
        Some(&self.nav_model)
    }

    fn on_nav_select(&mut self, entity: widget::segmented_button::Entity) -> app::Task<Self::Message> {
        if let Some(page) = self.nav_model.data::<NavigationPage>(entity) {
            self.current_page = *page;
        }
        app::Task::none()
    }

    fn nav_context_menu(
        &self,
        _id: widget::nav_bar::Id,
    ) -> Option<Vec<widget::menu::Tree<cosmic::Action<Self::Message>>>> {
        Some(cosmic::widget::menu::items(
            &std::collections::HashMap::new(),
            vec![
                cosmic::widget::menu::Item::Button("Settings", None, NavMenuAction::Settings),
                cosmic::widget::menu::Item::Button("About", None, NavMenuAction::About),
                cosmic::widget::menu::Item::Button("Quit", None, NavMenuAction::Quit),
            ],
        ))
    }

    fn context_drawer(
        &self,
    ) -> Option<app::context_drawer::ContextDrawer<<Self as Application>::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => app::context_drawer::about(
                &self.about,
                |url| Message::OpenUrl(url.to_string()),
                Message::CloseAbout,
            )
            .title(self.context_page.title()),
        })
    }
}
