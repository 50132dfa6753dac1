use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pulsewatch::run()
        .await
        .context("heart rate monitor exited with an error")
}
