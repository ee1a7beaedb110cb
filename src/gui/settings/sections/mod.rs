//! Settings sections, one per config slice plus maintenance

mod browser;
mod compaction;
mod gateway;
mod maintenance;
mod subagents;
mod update;
mod web;
mod workspace;

pub use browser::render_browser_section;
pub use compaction::render_compaction_section;
pub use gateway::render_gateway_section;
pub use maintenance::render_maintenance_section;
pub use subagents::render_subagents_section;
pub use update::render_update_section;
pub use web::render_web_section;
pub use workspace::render_workspace_section;
