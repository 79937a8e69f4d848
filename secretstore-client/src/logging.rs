use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber for applications embedding the client
///
/// `RUST_LOG` is honoured; `default_level` applies to this crate and to the
/// `secretstore` diagnostics target. HTTP internals are kept quiet.
pub fn init_tracing(default_level: &str) -> eyre::Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("secretstore_client={}", default_level).parse()?)
        .add_directive(format!("secretstore={}", default_level).parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| eyre::eyre!("failed to install tracing subscriber: {}", e))
}
