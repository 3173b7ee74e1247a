use buggy_race_editor_lib::infrastructure::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    buggy_race_editor_lib::run(config).await
}
