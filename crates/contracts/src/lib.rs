//! Wire types shared between the MyBots server API and the browser client.

pub mod domain;
pub mod shared;
