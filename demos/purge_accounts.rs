use form3api::{Client, ClientConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    dotenvy::dotenv().ok();

    let accounts = Client::with_config(ClientConfig::from_env()?)?.accounts();
    let size = match env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 100,
    };

    // Deleting shifts every later page left, so following `next` would skip
    // accounts. Keep re-reading the first page until it comes back empty.
    let mut deleted = 0;
    let mut page = accounts.list(0, size, None).await?;
    while !page.is_empty() {
        for account in page.data() {
            accounts.delete(account.id, account.version).await?;
            deleted += 1;
        }
        page = match page.first().await {
            Ok(first) => first,
            Err(_) => accounts.list(0, size, None).await?,
        };
    }

    println!("Deleted {} accounts", deleted);
    Ok(())
}
