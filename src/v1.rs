#![forbid(unsafe_code)]

pub mod games_list;
pub mod health_check;
