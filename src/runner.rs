// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

pub mod nr_prepare;
pub mod remove_acc;

use env_logger::Env;

// Progress messages go to stderr at info level unless RUST_LOG says otherwise. Stdout is left
// free for piped FastA output.
fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
