use anyhow::Result;
use landing_quiz::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志（配置解析的警告也需要输出）
    landing_quiz::utils::logging::init(Config::verbose_from_env());

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
