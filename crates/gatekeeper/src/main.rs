#[tokio::main]
async fn main() {
    gatekeeper::start(std::env::args()).await;
}
