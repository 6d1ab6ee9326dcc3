//! Sample blog content for fresh development databases.

use whipsaw_core::DomainError;
use whipsaw_core::domain::BlogDraft;
use whipsaw_core::ports::AdminIdentity;

use crate::state::AppState;

const SEED_AUTHOR: &str = "seed";

fn sample_posts() -> Vec<BlogDraft> {
    vec![
        BlogDraft {
            title: "The Future of Product Design".into(),
            content: "Exploring emerging trends and technologies shaping the future of product \
                      design. From AI-powered tools to sustainable materials, the landscape of \
                      product design is evolving rapidly."
                .into(),
            author: Some("Jane Smith".into()),
            image: Some("https://source.unsplash.com/random/800x600?design,product&sig=1".into()),
        },
        BlogDraft {
            title: "Sustainable Design Practices".into(),
            content: "How designers are incorporating sustainability into their process and \
                      outcomes, and why it is no longer optional."
                .into(),
            author: Some("John Doe".into()),
            image: Some("https://source.unsplash.com/random/800x600?sustainable,design&sig=2".into()),
        },
        BlogDraft {
            title: "User-Centered Design: A Case Study".into(),
            content: "How user-centered research and iteration turned a failing product into \
                      one that resonated with its audience."
                .into(),
            author: Some("Alex Johnson".into()),
            image: Some("https://source.unsplash.com/random/800x600?user,design&sig=3".into()),
        },
    ]
}

/// Create the sample posts when the blog collection is empty.
///
/// Returns how many posts were created; zero when content already exists.
pub async fn seed_sample_content(state: &AppState) -> Result<usize, DomainError> {
    if state.blogs.count().await? > 0 {
        tracing::info!("Blog collection not empty, skipping sample content");
        return Ok(0);
    }

    let seeder = AdminIdentity {
        username: SEED_AUTHOR.to_string(),
    };
    let posts = sample_posts();
    let total = posts.len();
    for draft in posts {
        state.blogs.create(&seeder, draft).await?;
    }

    tracing::info!(count = total, "Sample blog posts created");
    Ok(total)
}
