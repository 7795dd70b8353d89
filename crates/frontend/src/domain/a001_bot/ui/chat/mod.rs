//! Chat pane: history of the selected bot and the message input

mod view;

pub use view::ChatPane;
