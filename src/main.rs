use pause_greeter::utils::{logger, validation::Validate};
use pause_greeter::{Fixture, FixtureConfig, FixtureError, RawStdout, SignalWaiter};

async fn run() -> pause_greeter::Result<()> {
    let config = FixtureConfig::built_in();
    config.validate()?;

    let unresolved = config.unresolved_placeholders();
    if !unresolved.is_empty() {
        tracing::warn!("Greeting still carries placeholders: {}", unresolved.join(", "));
    }
    if !config.fits_atomic_write() {
        tracing::warn!(
            "Greeting is {} bytes, larger than PIPE_BUF; a pipe reader may see it split",
            config.message().payload().len()
        );
    }
    let policy = config.write_policy()?;

    // Handlers go in before the write so a signal sent right after the
    // greeting shows up never hits the default action.
    let waiter = SignalWaiter::install()?;

    let mut fixture = Fixture::new(RawStdout::new(), waiter, config.message(), policy);
    fixture.run().await?;
    Ok(())
}

fn report(e: &FixtureError) {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logger::init_logger();

    if let Err(e) = run().await {
        report(&e);
        std::process::exit(e.exit_code());
    }
}
