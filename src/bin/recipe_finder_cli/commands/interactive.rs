// ABOUTME: Interactive browser command for recipe-finder
// ABOUTME: Runs the event loop over stdin and stdout until quit or end of input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Finder Contributors

use std::io;

use recipe_finder::{app::App, context::ServiceContext, errors::AppResult};
use tokio::io::BufReader;

type Result<T> = AppResult<T>;

/// Run the REPL
pub async fn run(services: &ServiceContext) -> Result<()> {
    println!("Type 'help' for commands.");
    App::new(services, io::stdout())
        .run(BufReader::new(tokio::io::stdin()))
        .await
}
