//! Basic example demonstrating the RankVectors API client.
//!
//! Run with:
//! ```
//! RANKVECTORS_API_KEY=your-key cargo run --example basic -- proj_123
//! ```

use rankvectors::{
    get_credits, get_implementations, verify_content, CreditQuery, ImplementationListQuery,
    List, RankVectorsClient, Suggestion, SuggestionListQuery,
};

#[tokio::main]
async fn main() -> rankvectors::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let project_id = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "proj_demo".to_string());

    // Create client from environment variables
    println!("Creating RankVectors client...");
    let client = RankVectorsClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // Credits first, since implementing costs them
    println!("\n--- Credits ---");
    let credits = get_credits(&client, &project_id, CreditQuery::with_history()).await?;
    println!("Balance: {}", credits.available());
    for tx in credits.transactions().iter().take(5) {
        let kind = tx.kind.as_deref().unwrap_or("unknown");
        println!("  {:>+6} {}", tx.amount.unwrap_or_default(), kind);
    }

    // Suggestions waiting for review
    println!("\n--- Pending Suggestions ---");
    let query = SuggestionListQuery {
        limit: Some(10),
        ..SuggestionListQuery::pending()
    };
    let pending = Suggestion::list(&client, &(project_id.clone(), query)).await?;
    println!("Found {} pending suggestions", pending.len());

    for suggestion in &pending {
        let anchor = suggestion.anchor_text.as_deref().unwrap_or("-");
        let score = suggestion
            .relevance()
            .map(|s| format!("{s:.2}"))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "  - {} -> {} [{}] score {}",
            suggestion.source_url.as_deref().unwrap_or("-"),
            suggestion.target_url.as_deref().unwrap_or("-"),
            anchor,
            score
        );
    }

    // Check whether the first suggestion's page still matches the last scrape
    let first = pending
        .iter()
        .find_map(|s| s.source_url.as_deref().map(|url| (s, url)));
    if let Some((suggestion, page_url)) = first {
        println!("\n--- Content Verification ---");
        let result = verify_content(&client, &project_id, page_url, &suggestion.id).await?;
        if result.is_current() {
            println!("{} is unchanged", page_url);
        } else {
            println!("{} changed since last scrape", page_url);
        }
    }

    // Recent implementations
    println!("\n--- Implementations ---");
    let implementations = get_implementations(
        &client,
        &project_id,
        ImplementationListQuery {
            limit: Some(5),
            ..Default::default()
        },
    )
    .await?;

    for implementation in &implementations {
        println!(
            "  - {} on {} ({})",
            implementation.id,
            implementation.platform(),
            implementation.status()
        );
    }

    println!("\nDone!");
    Ok(())
}
