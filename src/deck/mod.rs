pub mod commands;
pub mod controller;
pub mod navigator;
pub mod session;
pub mod view;

pub use controller::DeckController;
pub use navigator::{Navigator, Transition, TransitionListener};
pub use session::DeckSession;
pub use view::{DeckView, LogSurface, SlideSurface, SlideVisibility};
