use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zyra_cli::ZyraCli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zyra_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    ZyraCli::new().parse_and_run()
}
