pub mod config;
pub mod errors;
pub mod extract;
pub mod filter;
pub mod seq;
mod runner;

use crate::errors::PrepError;

pub fn run_remove_acc() -> Result<(), PrepError> {
    runner::remove_acc::run()
}

pub fn run_nr_prepare() -> Result<(), PrepError> {
    runner::nr_prepare::run()
}
