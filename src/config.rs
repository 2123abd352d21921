use std::env;
use std::fmt::Display;
use std::str::FromStr;

use log::{info, warn};

/// Port the HTTP server binds on. Overridable via `PORT`.
pub fn port() -> u16 {
    try_load("PORT", "3000")
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_variable_falls_back_to_default() {
        let port: u16 = try_load("STAYVOTE_TEST_UNSET_PORT", "3000");
        assert_eq!(port, 3000);
    }
}
