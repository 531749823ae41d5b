//! Listing nodes and the `scraper` backend that provides them
//!
//! The extractor only sees [`ListingNode`]: "give me the text playing this
//! role". Everything that knows about CSS selectors and the parsed DOM lives
//! here, so another markup backend only needs its own `ListingNode`.

use crate::config::SelectorConfig;
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};
use std::fmt;

/// Structural role of a sub-element inside a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    Image,
    Title,
    Description,
    Price,
    ReviewCount,
}

impl FieldRole {
    pub const ALL: [FieldRole; 5] = [
        FieldRole::Image,
        FieldRole::Title,
        FieldRole::Description,
        FieldRole::Price,
        FieldRole::ReviewCount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Title => "title",
            Self::Description => "description",
            Self::Price => "price",
            Self::ReviewCount => "review-count",
        }
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog entry with accessors for its named sub-elements
pub trait ListingNode {
    /// Trimmed value of the sub-element playing `role`, `None` if it is absent
    ///
    /// For [`FieldRole::Image`] the value is the image source, for every other
    /// role it is the element's text.
    fn field(&self, role: FieldRole) -> Option<String>;

    /// Short human-readable description used in error messages
    fn describe(&self) -> String;
}

/// Compiled selectors for listings, their fields and the pagination control
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    listing: Selector,
    image: Selector,
    title: Selector,
    description: Selector,
    price: Selector,
    review_count: Selector,
    pagination_item: Selector,
}

impl ListingSelectors {
    /// Compiles every selector of the configuration
    ///
    /// # Returns
    ///
    /// * `Err(ConfigError::InvalidSelector)` naming the first selector that
    ///   does not parse
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            listing: compile_one("listing", &config.listing)?,
            image: compile_one("image", &config.image)?,
            title: compile_one("title", &config.title)?,
            description: compile_one("description", &config.description)?,
            price: compile_one("price", &config.price)?,
            review_count: compile_one("review-count", &config.review_count)?,
            pagination_item: compile_one("pagination-item", &config.pagination_item)?,
        })
    }

    pub fn listing(&self) -> &Selector {
        &self.listing
    }

    pub fn pagination_item(&self) -> &Selector {
        &self.pagination_item
    }

    fn for_role(&self, role: FieldRole) -> &Selector {
        match role {
            FieldRole::Image => &self.image,
            FieldRole::Title => &self.title,
            FieldRole::Description => &self.description,
            FieldRole::Price => &self.price,
            FieldRole::ReviewCount => &self.review_count,
        }
    }
}

fn compile_one(field: &'static str, selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|_| ConfigError::InvalidSelector {
        field,
        selector: selector.to_string(),
    })
}

/// A parsed catalog page
pub struct CatalogPage {
    document: Html,
}

impl CatalogPage {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Listing nodes in document order
    pub fn listings<'a>(&'a self, selectors: &'a ListingSelectors) -> Vec<ScraperListing<'a>> {
        self.document
            .select(selectors.listing())
            .map(|element| ScraperListing {
                element,
                selectors,
            })
            .collect()
    }

    /// Trimmed text of every pagination item, in document order
    pub fn pagination_labels(&self, selectors: &ListingSelectors) -> Vec<String> {
        self.document
            .select(selectors.pagination_item())
            .map(|item| element_text(&item))
            .collect()
    }
}

/// A listing node backed by a `scraper` element
#[derive(Clone, Copy)]
pub struct ScraperListing<'a> {
    element: ElementRef<'a>,
    selectors: &'a ListingSelectors,
}

impl ListingNode for ScraperListing<'_> {
    fn field(&self, role: FieldRole) -> Option<String> {
        let found = self.element.select(self.selectors.for_role(role)).next()?;

        match role {
            FieldRole::Image => found.value().attr("src").map(|src| src.trim().to_string()),
            _ => Some(element_text(&found)),
        }
    }

    fn describe(&self) -> String {
        let element = self.element.value();
        let classes: Vec<&str> = element.classes().collect();

        let mut description = if classes.is_empty() {
            format!("<{}>", element.name())
        } else {
            format!("<{} class=\"{}\">", element.name(), classes.join(" "))
        };

        if let Some(title) = self.field(FieldRole::Title).filter(|t| !t.is_empty()) {
            description.push_str(&format!(" titled {:?}", title));
        }

        description
    }
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <div class="col"><div class="thumbnail">
            <img class="img-fluid" src=" /images/laptop1.png ">
            <h4 class="price">$295.99</h4>
            <a class="title" href="/product/1"> Asus VivoBook X441NA </a>
            <p class="description">Asus VivoBook, 14" HD</p>
            <p class="review-count"> 14 reviews </p>
        </div></div>
        <div class="col"><div class="thumbnail">
            <a class="title" href="/product/2">Prestigio SmartBook</a>
        </div></div>
        </body></html>
    "#;

    fn selectors() -> ListingSelectors {
        ListingSelectors::compile(&SelectorConfig::default()).unwrap()
    }

    #[test]
    fn test_listings_in_document_order() {
        let selectors = selectors();
        let page = CatalogPage::parse(PAGE);
        let listings = page.listings(&selectors);

        assert_eq!(listings.len(), 2);
        assert_eq!(
            listings[0].field(FieldRole::Title).as_deref(),
            Some("Asus VivoBook X441NA")
        );
        assert_eq!(
            listings[1].field(FieldRole::Title).as_deref(),
            Some("Prestigio SmartBook")
        );
    }

    #[test]
    fn test_fields_are_trimmed() {
        let selectors = selectors();
        let page = CatalogPage::parse(PAGE);
        let listing = page.listings(&selectors)[0];

        assert_eq!(
            listing.field(FieldRole::Image).as_deref(),
            Some("/images/laptop1.png")
        );
        assert_eq!(listing.field(FieldRole::Price).as_deref(), Some("$295.99"));
        assert_eq!(
            listing.field(FieldRole::ReviewCount).as_deref(),
            Some("14 reviews")
        );
    }

    #[test]
    fn test_missing_sub_elements() {
        let selectors = selectors();
        let page = CatalogPage::parse(PAGE);
        let listing = page.listings(&selectors)[1];

        assert_eq!(listing.field(FieldRole::Price), None);
        assert_eq!(listing.field(FieldRole::Image), None);
    }

    #[test]
    fn test_image_without_src_is_missing() {
        let selectors = selectors();
        let page = CatalogPage::parse(
            r#"<div class="thumbnail"><img class="img-fluid"></div>"#,
        );
        let listing = page.listings(&selectors)[0];
        assert_eq!(listing.field(FieldRole::Image), None);
    }

    #[test]
    fn test_describe_names_element_and_title() {
        let selectors = selectors();
        let page = CatalogPage::parse(PAGE);
        let listing = page.listings(&selectors)[1];

        assert_eq!(
            listing.describe(),
            "<div class=\"thumbnail\"> titled \"Prestigio SmartBook\""
        );
    }

    #[test]
    fn test_invalid_selector_named() {
        let config = SelectorConfig {
            listing: "div..thumbnail".to_string(),
            ..SelectorConfig::default()
        };
        let err = ListingSelectors::compile(&config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSelector {
                field: "listing",
                ..
            }
        ));
    }

    #[test]
    fn test_role_display() {
        assert_eq!(FieldRole::ReviewCount.to_string(), "review-count");
        assert_eq!(FieldRole::ALL.len(), 5);
    }
}
