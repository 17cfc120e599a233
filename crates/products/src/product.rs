use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use toolscout_core::{DomainError, DomainResult, Entity, ProductId};

/// Lowest rating a review can carry.
pub const MIN_RATING: u8 = 1;
/// Highest rating a review can carry.
pub const MAX_RATING: u8 = 5;

/// A named capability listed on a product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub description: String,
}

/// A single user review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub user: String,
    /// Always within `MIN_RATING..=MAX_RATING` once decoded.
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
}

/// Search-engine metadata for a product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoMetadata {
    pub title: String,
    pub description: String,
}

/// Read model of an AI-tool listing (matches the API response shape).
///
/// Products are immutable snapshots: a refetch replaces the value wholesale.
/// Decoding goes through [`ProductRecord`], so a `Product` obtained from JSON
/// has already been validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord", rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub usps: Vec<String>,
    pub features: Vec<Feature>,
    pub reviews: Vec<Review>,
    pub gallery: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_link: Option<String>,
    /// Popularity score in `0..=100`.
    pub popularity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_metadata: Option<SeoMetadata>,
}

impl Product {
    /// Mean review rating, `0.0` when there are no reviews.
    pub fn average_rating(&self) -> f64 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        f64::from(sum) / self.reviews.len() as f64
    }

    /// Case-insensitive substring match over name and description.
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }

    /// Exact membership in `categories`.
    pub fn in_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Whether any category, slugified, equals `slug`.
    ///
    /// Slugs lower-case the category and replace its first space with `-`
    /// ("Customer Support" -> "customer-support").
    pub fn in_category_slug(&self, slug: &str) -> bool {
        self.categories.iter().any(|c| category_slug(c) == slug)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Slug form of a category name, as used in directory URLs.
pub fn category_slug(category: &str) -> String {
    category.to_lowercase().replacen(' ', "-", 1)
}

/// Mean review rating of `product`; `0.0` for a product with no reviews.
pub fn average_rating(product: &Product) -> f64 {
    product.average_rating()
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire records
// ─────────────────────────────────────────────────────────────────────────────

/// Lenient wire shape of a product as the API sends it.
///
/// Missing sequences default to empty and a missing popularity defaults to 0;
/// everything else is checked in the `TryFrom` conversion.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub usps: Vec<String>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub reviews: Vec<ReviewRecord>,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub purchase_link: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub seo_metadata: Option<SeoMetadata>,
}

/// Wire shape of a review.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRecord {
    #[serde(default)]
    pub user: String,
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
    pub date: String,
}

impl TryFrom<ReviewRecord> for Review {
    type Error = DomainError;

    fn try_from(record: ReviewRecord) -> Result<Self, Self::Error> {
        let rating = record
            .rating
            .clamp(i64::from(MIN_RATING), i64::from(MAX_RATING)) as u8;

        Ok(Self {
            user: record.user,
            rating,
            comment: record.comment,
            date: parse_review_date(&record.date)?,
        })
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = DomainError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let id = ProductId::new(record.id)?;

        if record.name.trim().is_empty() {
            return Err(DomainError::validation(format!("product {id}: name cannot be empty")));
        }

        if let Some(price) = record.price {
            if !price.is_finite() || price < 0.0 {
                return Err(DomainError::validation(format!(
                    "product {id}: price must be a non-negative number"
                )));
            }
        }

        let popularity = if record.popularity.is_finite() {
            record.popularity.clamp(0.0, 100.0)
        } else {
            0.0
        };

        let reviews = record
            .reviews
            .into_iter()
            .map(Review::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            name: record.name,
            description: record.description,
            categories: record.categories,
            tags: record.tags,
            usps: record.usps,
            features: record.features,
            reviews,
            gallery: record.gallery,
            price: record.price,
            purchase_link: record.purchase_link,
            popularity,
            seo_metadata: record.seo_metadata,
        })
    }
}

fn parse_review_date(raw: &str) -> DomainResult<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| DomainError::validation(format!("invalid review date: {raw:?}")))
}
