pub mod client;
pub mod config;
pub mod controller;
pub mod gauge;
pub mod recommend;
pub mod risk;
pub mod sample;
pub mod ui;
pub mod validate;
