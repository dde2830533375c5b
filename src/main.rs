use anyhow::Result;
use emis_form_filler::config::Config;
use emis_form_filler::logger;
use emis_form_filler::orchestrator::App;

#[tokio::main]
async fn main() -> Result<()> {
    logger::init();

    let config = Config::load();

    App::initialize(config).await?.run().await?;

    Ok(())
}
