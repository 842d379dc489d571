//! `issue` subcommand

use std::sync::Arc;

use clap::Args;
use serde_json::Value;

use crate::config::AppConfig;
use crate::domain::auth::{ClaimSet, FixedClock, StaticIssuer, TokenSubject};
use crate::infrastructure::auth::TokenIssuer;
use crate::infrastructure::logging::init_logging;

#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Value of the `uid` claim (JSON, or taken as a string)
    #[arg(long)]
    pub uid: String,

    /// Value of the `jti` claim; defaults to the uid
    #[arg(long)]
    pub jti: Option<String>,

    /// Extra claim as name=value, repeatable
    #[arg(long = "claim", value_parser = super::parse_claim)]
    pub claims: Vec<(String, Value)>,

    /// Stamp the token as if issued at this Unix time
    #[arg(long)]
    pub now: Option<i64>,
}

/// Subject described entirely on the command line
struct CliSubject {
    uid: Value,
    jti: Value,
}

impl TokenSubject for CliSubject {
    fn payload_uid(&self) -> Value {
        self.uid.clone()
    }

    fn unique_lookup_id(&self) -> Value {
        self.jti.clone()
    }
}

pub fn run(args: IssueArgs) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let mut issuer = TokenIssuer::new(config.jwt)?;
    if let Some(now) = args.now {
        issuer = issuer.with_clock(Arc::new(FixedClock(now)));
    }
    if let Some(iss) = config.issuer {
        issuer = issuer.with_issuer_context(Arc::new(StaticIssuer::new(iss)));
    }

    let uid = super::parse_claim_value(&args.uid);
    let jti = args
        .jti
        .as_deref()
        .map(super::parse_claim_value)
        .unwrap_or_else(|| uid.clone());
    let subject = CliSubject { uid, jti };

    let token = issuer.issue(&subject, args.claims.into_iter().collect::<ClaimSet>())?;
    println!("{}", token);

    Ok(())
}
