pub mod a001_bot;
