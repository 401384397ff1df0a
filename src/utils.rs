#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod errors;
pub mod gls_utils;
