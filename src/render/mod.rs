pub mod controls;
pub mod renderer;

pub use controls::ControlLayout;
pub use renderer::Renderer;
