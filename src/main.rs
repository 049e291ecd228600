#[tokio::main]
async fn main() {
    price_widget::run().await;
}
