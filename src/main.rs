#[tokio::main]
async fn main() {
    if let Err(e) = telehealth_analytics::run().await {
        eprintln!("telehealth-analytics: {e}");
        std::process::exit(1);
    }
}
