use crate::cli::run;

pub mod cli;
mod config;
pub mod domain;
pub mod fs;
pub mod http;
pub mod metadata;
pub mod query;
pub mod storage;

fn main() {
    run();
}
