use board_config::BoardConfig;

/// Emit warnings for config that will fail at request time or was likely mistyped.
pub fn warn_unconfigured(config: &BoardConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &BoardConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.upstream.is_configured() {
        warnings.push(format!(
            "No upstream API key: set upstream.api_key or export {}. Requests through the proxy will fail with 500.",
            config.upstream.api_key_env
        ));
    }

    for section in ["UPSTREAM", "SERVER", "CLIENT", "GENERAL"] {
        let loose = format!("BOARDROOM_{section}_");
        let nested = format!("BOARDROOM_{section}__");
        if env_keys
            .iter()
            .any(|key| key.starts_with(&loose) && !key.starts_with(&nested))
        {
            warnings.push(format!(
                "BOARDROOM_{section}_* env vars are ignored. Use double underscores (example: BOARDROOM_{section}__KEY)."
            ));
        }
    }

    warnings
}
