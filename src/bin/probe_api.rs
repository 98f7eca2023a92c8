use anyhow::Result;
use dog_discoverer::adapters::the_dog_api::DEFAULT_ENDPOINT;
use dog_discoverer::domain::ports::DogSource;
use dog_discoverer::TheDogApi;

/// 對真實 API 打一發，印出解析後的回應形狀（開發用）
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    println!("🚀 Probing {}", endpoint);

    let mut api = TheDogApi::new(endpoint);
    if let Ok(key) = std::env::var("DOG_API_KEY") {
        api = api.with_api_key(key);
    } else {
        println!("🔑 DOG_API_KEY unset, probing anonymously");
    }

    let image = api.fetch_random().await?;

    println!("🖼  url: {}", image.url);
    if image.breeds.is_empty() {
        println!("⚠️  no breed data in this result");
    }
    for breed in &image.breeds {
        println!("🐶 breed: {}", breed.name);
        println!(
            "   origin: {}",
            breed.origin.as_deref().unwrap_or("(none)")
        );
        match breed.temperament_tokens().as_slice() {
            [] => println!("   temperament: (none)"),
            tokens => println!("   temperament: {}", tokens.join(", ")),
        }
    }

    Ok(())
}
