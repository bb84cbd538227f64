#[tokio::main]
async fn main() -> bobby::error::Result<()> {
    // reqwest and fantoccini both pull in rustls; pick one crypto provider for the process.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    dotenvy::dotenv().ok();
    bobby::logging::init(&bobby::logging::log_file_from_env());
    log::info!("Starting Professor Bobby Discord bot");

    match bobby::run().await {
        Ok(()) => {
            log::info!("Bot shut down successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Bot encountered an error: {e}");
            Err(e)
        }
    }
}
