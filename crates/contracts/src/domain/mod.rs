pub mod a001_bot;
pub mod a002_chat;
