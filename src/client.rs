#![forbid(unsafe_code)]

pub mod games_view;
