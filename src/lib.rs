#![doc = include_str!("../README.md")]

mod client;
pub mod http;
pub mod models;
pub mod report;

pub use client::Client;
