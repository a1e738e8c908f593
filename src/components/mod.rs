pub mod app;
pub mod description_panel;
pub mod diagram_view;
pub mod injury_panel;
pub mod legend;
pub mod legend_panel;
pub mod nerve_panel;
pub mod pathway_explorer;
pub mod settings_modal;
pub mod step_timeline;
pub mod tooltip;

pub use app::App;
