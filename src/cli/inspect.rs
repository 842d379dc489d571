//! `inspect` subcommand

use std::sync::Arc;

use anyhow::Context;
use clap::Args;

use crate::config::AppConfig;
use crate::domain::auth::FixedClock;
use crate::infrastructure::auth::TokenDecoder;
use crate::infrastructure::logging::init_logging;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Bearer token to verify
    pub token: String,

    /// Check time claims as if it were this Unix time
    #[arg(long)]
    pub now: Option<i64>,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let mut decoder = TokenDecoder::new(config.jwt)?;
    if let Some(now) = args.now {
        decoder = decoder.with_clock(Arc::new(FixedClock(now)));
    }

    // Local operator tool: show the real rejection reason
    let claims = decoder
        .decode(args.token.trim())
        .map_err(|e| anyhow::anyhow!("Token rejected: {}", e.reason()))?;

    let json = serde_json::to_string_pretty(&claims).context("Failed to render claims")?;
    println!("{}", json);

    Ok(())
}
