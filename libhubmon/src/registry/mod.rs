//! Registry operations module.
//!
//! This module provides the typed operations the collector runs against the
//! repositories API: fetching a single image record and walking an
//! organisation listing page by page. It orchestrates the client and hub
//! modules; failure policy (what is terminal, what was already retried)
//! is decided below it in the client.

use crate::client::Client;
use crate::error::{HubmonError, Result};
use crate::hub::{ImageResult, OrganisationPage};

#[cfg(test)]
mod tests;

/// Hard cap on pages followed for a single organisation.
///
/// A misbehaving upstream that keeps handing out "next" links (including a
/// self-referential one) must not turn a scrape into an open-ended loop.
pub const MAX_PAGES: usize = 100;

/// Typed API over the registry endpoints.
///
/// Cheap to clone; collector tasks each hold their own copy.
#[derive(Debug, Clone)]
pub struct HubRegistry {
    /// HTTP client for API communication.
    client: Client,
}

impl HubRegistry {
    /// Creates a new `HubRegistry` around a configured client.
    ///
    /// # Examples
    ///
    /// ```
    /// use libhubmon::client::Client;
    /// use libhubmon::registry::HubRegistry;
    ///
    /// let client = Client::new("https://hub.docker.com/v2/repositories").unwrap();
    /// let registry = HubRegistry::new(client);
    /// ```
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Returns the base API URL this registry talks to.
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Builds the resource URL for a target slug.
    fn target_url(&self, slug: &str) -> String {
        format!("{}/{}", self.client.base_url(), slug)
    }

    /// Fetches and decodes a single image record.
    ///
    /// # Arguments
    ///
    /// * `slug` - The image slug (e.g., "library/nginx")
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use libhubmon::client::Client;
    /// # use libhubmon::registry::HubRegistry;
    /// # async fn example() -> libhubmon::error::Result<()> {
    /// let client = Client::new("https://hub.docker.com/v2/repositories")?;
    /// let registry = HubRegistry::new(client);
    /// let image = registry.fetch_image("library/nginx").await?;
    /// println!("{} has {} pulls", image.name, image.pull_count);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch exhausts its retries or the body does
    /// not decode as an image record.
    pub async fn fetch_image(&self, slug: &str) -> Result<ImageResult> {
        let url = self.target_url(slug);
        let body = self.client.fetch(&url).await?;
        ImageResult::from_bytes(&body)
    }

    /// Fetches every page of an organisation listing, in fetch order.
    ///
    /// Follows the `next` link of each page until it is absent or empty.
    /// Page-following is a bounded loop, capped at [`MAX_PAGES`]; on hitting
    /// the cap the pages accumulated so far are returned and a warning is
    /// logged, so a cyclic or endless "next" chain cannot hang a scrape.
    ///
    /// # Arguments
    ///
    /// * `slug` - The organisation slug (e.g., "myorg")
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use libhubmon::client::Client;
    /// # use libhubmon::registry::HubRegistry;
    /// # async fn example() -> libhubmon::error::Result<()> {
    /// let client = Client::new("https://hub.docker.com/v2/repositories")?;
    /// let registry = HubRegistry::new(client);
    /// let pages = registry.fetch_organisation("myorg").await?;
    /// let images: usize = pages.iter().map(|p| p.results.len()).sum();
    /// println!("{} images across {} pages", images, pages.len());
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`HubmonError::NoResults`] when a page reports a zero count
    /// or an empty result list (an organisation with no images and one that
    /// does not exist are indistinguishable here; both are terminal), plus
    /// any fetch or decode error from the underlying layers.
    pub async fn fetch_organisation(&self, slug: &str) -> Result<Vec<OrganisationPage>> {
        let mut pages = Vec::new();
        let mut url = self.target_url(slug);

        loop {
            let body = self.client.fetch(&url).await?;
            let page = OrganisationPage::from_bytes(&body)?;

            if page.count == 0 || page.results.is_empty() {
                return Err(HubmonError::no_results(&url));
            }

            let next = page.next_url().map(str::to_string);
            pages.push(page);

            match next {
                Some(next) => {
                    if pages.len() >= MAX_PAGES {
                        tracing::warn!(
                            organisation = slug,
                            pages = pages.len(),
                            "page limit reached, truncating listing"
                        );
                        break;
                    }
                    url = next;
                }
                None => break,
            }
        }

        Ok(pages)
    }
}
