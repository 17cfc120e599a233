//! Built-in sample records served when the directory API is unreachable.

use chrono::NaiveDate;

use toolscout_core::ProductId;

use crate::filter::FilterOptions;
use crate::product::{Feature, Product, Review, SeoMetadata};

/// Read-only set of sample products.
///
/// Constructed explicitly and shared behind an `Arc` by whoever needs it; it
/// is never mutated after construction, so sharing needs no locking.
#[derive(Debug, Clone, Default)]
pub struct SampleCatalog {
    products: Vec<Product>,
}

impl SampleCatalog {
    /// Catalog over an arbitrary product list.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The three built-in listings (ChatGPT, Midjourney, Claude).
    pub fn builtin() -> Self {
        let seeds = [
            SampleSeed {
                id: "1",
                name: "ChatGPT",
                description: "Advanced AI chatbot for conversations and assistance",
                categories: &["chatbot", "ai-assistant"],
                tags: &["nlp", "conversation", "openai"],
                usps: &["Natural conversations", "Code generation", "Multiple languages"],
                features: &[
                    ("Text Generation", "Generate human-like text responses"),
                    ("Code Assistance", "Help with programming tasks"),
                ],
                review: ("John Doe", 5, "Excellent AI tool!", (2024, 1, 15)),
                price: 20.0,
                purchase_link: "https://openai.com/chatgpt",
                popularity: 95.0,
                seo: ("ChatGPT - AI Assistant", "Advanced AI chatbot"),
            },
            SampleSeed {
                id: "2",
                name: "Midjourney",
                description: "AI-powered image generation tool",
                categories: &["image-generation", "creative"],
                tags: &["art", "design", "images"],
                usps: &["High-quality images", "Artistic styles", "Easy to use"],
                features: &[
                    ("Image Generation", "Create stunning images from text"),
                    ("Style Control", "Various artistic styles available"),
                ],
                review: ("Jane Smith", 4, "Great for creative work!", (2024, 1, 10)),
                price: 30.0,
                purchase_link: "https://midjourney.com",
                popularity: 88.0,
                seo: ("Midjourney - AI Art", "AI image generation"),
            },
            SampleSeed {
                id: "3",
                name: "Claude",
                description: "Anthropic's AI assistant for analysis and conversation",
                categories: &["chatbot", "ai-assistant"],
                tags: &["analysis", "conversation", "anthropic"],
                usps: &["Constitutional AI", "Long conversations", "Helpful and harmless"],
                features: &[
                    ("Document Analysis", "Analyze and summarize documents"),
                    ("Code Review", "Review and improve code quality"),
                ],
                review: ("Alex Johnson", 5, "Very helpful for analysis!", (2024, 1, 12)),
                price: 25.0,
                purchase_link: "https://claude.ai",
                popularity: 92.0,
                seo: ("Claude - AI Assistant", "Anthropic AI assistant"),
            },
        ];
        Self::new(seeds.into_iter().filter_map(sample).collect())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Listing fallback: category membership and search text only.
    ///
    /// Sort, tags, page and limit are not applied.
    pub fn filter(&self, options: &FilterOptions) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| options.category().is_none_or(|c| p.in_category(c)))
            .filter(|p| options.search().is_none_or(|q| p.matches_search(q)))
            .cloned()
            .collect()
    }

    /// Detail fallback: the record with `id`, else the first record.
    ///
    /// `None` only when the catalog is empty.
    pub fn find(&self, id: &ProductId) -> Option<Product> {
        self.products
            .iter()
            .find(|p| &p.id == id)
            .or_else(|| self.products.first())
            .cloned()
    }

    /// Exact lookup without the first-record substitution.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Trending fallback: category filter, most popular first, at most `limit`.
    pub fn trending(&self, category: Option<&str>, limit: usize) -> Vec<Product> {
        let mut matching: Vec<Product> = self
            .products
            .iter()
            .filter(|p| {
                category
                    .filter(|c| !c.is_empty())
                    .is_none_or(|c| p.in_category(c))
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));
        matching.truncate(limit);
        matching
    }

    /// Search fallback: case-insensitive substring on name and description.
    pub fn search(&self, query: &str) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.matches_search(query))
            .cloned()
            .collect()
    }

    /// Comparison fallback: ids without a sample record are dropped.
    pub fn compare(&self, ids: &[ProductId]) -> Vec<Product> {
        ids.iter().filter_map(|id| self.get(id)).cloned().collect()
    }
}

struct SampleSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    categories: &'static [&'static str],
    tags: &'static [&'static str],
    usps: &'static [&'static str],
    features: &'static [(&'static str, &'static str)],
    review: (&'static str, u8, &'static str, (i32, u32, u32)),
    price: f64,
    purchase_link: &'static str,
    popularity: f64,
    seo: (&'static str, &'static str),
}

fn sample(seed: SampleSeed) -> Option<Product> {
    let strings = |values: &[&str]| values.iter().map(|v| v.to_string()).collect::<Vec<_>>();
    let (user, rating, comment, (y, m, d)) = seed.review;

    Some(Product {
        id: ProductId::new(seed.id).ok()?,
        name: seed.name.to_string(),
        description: seed.description.to_string(),
        categories: strings(seed.categories),
        tags: strings(seed.tags),
        usps: strings(seed.usps),
        features: seed
            .features
            .iter()
            .map(|(name, description)| Feature {
                name: name.to_string(),
                description: description.to_string(),
            })
            .collect(),
        reviews: vec![Review {
            user: user.to_string(),
            rating,
            comment: comment.to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        }],
        gallery: vec!["https://via.placeholder.com/300x200".to_string()],
        price: Some(seed.price),
        purchase_link: Some(seed.purchase_link.to_string()),
        popularity: seed.popularity,
        seo_metadata: Some(SeoMetadata {
            title: seed.seo.0.to_string(),
            description: seed.seo.1.to_string(),
        }),
    })
}
