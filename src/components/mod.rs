//! UI Components
//!
//! Leptos components rendering the board store.

mod board_view;
mod filter_bar;
mod messages;
mod new_event_button;
mod point_card;
mod point_editor;
mod shake;
mod sort_bar;

pub use board_view::BoardView;
pub use filter_bar::FilterBar;
pub use new_event_button::NewEventButton;
pub use point_card::PointCard;
pub use point_editor::PointEditor;
pub use sort_bar::SortBar;
