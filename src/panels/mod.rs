mod central_panel;
mod tools_panel;

pub use central_panel::canvas_panel;
pub use tools_panel::controls_panel;
