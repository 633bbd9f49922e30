/// Context drawer page variants for cosmic_nexus
///
/// Provides type-safe context page management with dynamic titles

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ContextPage {
    About,
}

impl ContextPage {
    /// Get the title for the context drawer
    pub fn title(&self) -> String {
        match self {
            Self::About => "About".to_string(),
        }
    }
}

impl Default for ContextPage {
    fn default() -> Self {
        Self::About
    }
}
