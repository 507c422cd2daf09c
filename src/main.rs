use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(error) = campus_pay::run().await {
        error!("Server exited with error: {}", error);
        std::process::exit(1);
    }
}
