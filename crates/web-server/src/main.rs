// Entry point for `cargo run -p web-server`: serve the API with the
// settings from `config.toml` and the environment.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = configuration::load_config()?;
    let _guard = configuration::init_tracing(&config.logging)?;
    web_server::run_server(&config).await
}
