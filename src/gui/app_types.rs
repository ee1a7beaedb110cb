//! Type definitions for ManagerApp

/// Which panel fills the central area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Settings,
    Agents,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::Settings, ViewMode::Agents];

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Settings => "Settings",
            ViewMode::Agents => "Agents & Routing",
        }
    }
}
