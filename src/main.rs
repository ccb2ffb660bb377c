use pubjobs::app;
use pubjobs::error::GatewayError;

#[tokio::main]
async fn main() -> Result<(), GatewayError> {
    app::run().await
}
