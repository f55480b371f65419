#[tokio::main]
async fn main() -> anyhow::Result<()> {
    timecanvas_lib::run().await
}
