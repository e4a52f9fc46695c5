pub mod chat;
pub mod completion;
pub mod config;
pub mod message;
pub mod persona;
pub mod storage;
pub mod transcript;
