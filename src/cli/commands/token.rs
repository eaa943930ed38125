use anyhow::Context;
use chrono::Duration;

use crate::auth::{generate_jwt, Claims};
use crate::config::AppConfig;

/// Print a signed token for `user` to stdout
pub fn handle(config: &AppConfig, user: &str, minutes: Option<i64>) -> anyhow::Result<()> {
    let token = mint(config, user, minutes)?;
    println!("{}", token);
    Ok(())
}

fn mint(config: &AppConfig, user: &str, minutes: Option<i64>) -> anyhow::Result<String> {
    if user.trim().is_empty() {
        anyhow::bail!("--user must not be empty");
    }

    let minutes = minutes.unwrap_or(config.jwt.expiry_minutes);
    let lifetime = Duration::try_minutes(minutes).context("--minutes out of range")?;
    let claims = Claims::with_lifetime(user, &config.jwt, lifetime).context("--minutes out of range")?;

    Ok(generate_jwt(&claims, &config.jwt)?)
}
