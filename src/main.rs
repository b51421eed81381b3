use spaceweather_monitor_lib::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    spaceweather_monitor_lib::init_tracing();

    let config = AppConfig::from_env()?;
    spaceweather_monitor_lib::run(config).await?;

    Ok(())
}
