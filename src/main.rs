#[tokio::main]
async fn main() -> std::io::Result<()> {
    jet_duel::run_with_config().await
}
