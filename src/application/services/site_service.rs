//! Site resolution: `(domain, path)` to the owning site and matched endpoint.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::application::services::cached::{CacheValue, Cached, SiteEndpoint, keys};
use crate::domain::context::RequestContext;
use crate::domain::entities::{Site, Status};
use crate::domain::repositories::query::{COLUMN_DOMAIN_NAMES, COLUMN_ID, COLUMN_STATUS};
use crate::domain::repositories::{SiteQuery, Store};
use crate::error::AppError;

/// Maps inbound requests to tenant sites.
///
/// Every active site declares endpoints (`domain_names`) such as
/// `example.com` or `example.com/blog`. The longest endpoint that is a prefix
/// of `domain + path` wins, so nested sites take precedence over their parent.
pub struct SiteService<S: Store + ?Sized> {
    store: Arc<S>,
    cache: Cached,
}

impl<S: Store + ?Sized> SiteService<S> {
    pub fn new(store: Arc<S>, cache: Cached) -> Self {
        Self { store, cache }
    }

    /// Resolves the site serving `domain + path`.
    ///
    /// A match is cached with the long TTL. "No site" and Store failures are
    /// cached as a negative result with the short TTL; the failure is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if active sites could not be listed.
    pub async fn resolve_site(
        &self,
        ctx: &RequestContext,
        domain: &str,
        path: &str,
    ) -> Result<Option<SiteEndpoint>, AppError> {
        let key = keys::site_endpoint(domain, path);

        if let Some(CacheValue::SiteEndpoint(hit)) = self.cache.lookup(&key).await {
            return Ok(hit);
        }

        let sites = match self.active_sites(ctx).await {
            Ok(sites) => sites,
            Err(e) => {
                error!(domain, path, error = %e, "Failed to resolve site");
                if !matches!(e, AppError::Cancelled) {
                    self.cache
                        .store_briefly(&key, CacheValue::SiteEndpoint(None))
                        .await;
                }
                return Err(e);
            }
        };

        let resolved = match_endpoint(&sites, &format!("{}{}", domain, path));

        match &resolved {
            Some(found) => debug!(
                domain,
                path,
                site_id = %found.site.id,
                endpoint = %found.endpoint,
                "Site resolved"
            ),
            None => warn!(domain, path, "No site serves this domain"),
        }

        let value = CacheValue::SiteEndpoint(resolved.clone());
        if resolved.is_some() {
            self.cache.store(&key, value).await;
        } else {
            self.cache.store_briefly(&key, value).await;
        }

        Ok(resolved)
    }

    /// Lists active sites (id and endpoints only), cached under `sites_active`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on Store failure. An empty list is then
    /// cached briefly.
    pub async fn active_sites(&self, ctx: &RequestContext) -> Result<Vec<Site>, AppError> {
        if let Some(CacheValue::Sites(sites)) = self.cache.lookup(keys::SITES_ACTIVE).await {
            return Ok(sites);
        }

        let query = SiteQuery::new()
            .status(Status::Active)
            .columns(&[COLUMN_ID, COLUMN_DOMAIN_NAMES, COLUMN_STATUS]);

        match ctx.guard(self.store.site_list(ctx, query)).await {
            Ok(sites) => {
                let sites: Vec<Site> = sites.into_iter().filter(Site::is_active).collect();
                self.cache
                    .store(keys::SITES_ACTIVE, CacheValue::Sites(sites.clone()))
                    .await;
                Ok(sites)
            }
            Err(AppError::Cancelled) => Err(AppError::Cancelled),
            Err(e) => {
                metrics::counter!("cms_store_errors_total", "operation" => "site_list").increment(1);
                self.cache
                    .store_briefly(keys::SITES_ACTIVE, CacheValue::Sites(Vec::new()))
                    .await;
                Err(e)
            }
        }
    }
}

/// Picks the site whose endpoint is the longest prefix of `page_path`.
///
/// Endpoints are compared verbatim. Empty endpoints are ignored, and when two
/// sites claim the same endpoint the first one listed keeps it.
///
/// The comparison is a plain string prefix with no path-segment boundary:
/// `example.com/blog` also claims `example.com/blogger`, and `example.com`
/// claims `example.com:8080/...` with alias `:8080/...`. Hosts served on a
/// non-default port must be listed with the port.
pub fn match_endpoint(sites: &[Site], page_path: &str) -> Option<SiteEndpoint> {
    let mut seen = HashSet::new();
    let mut endpoints: Vec<(&str, &Site)> = Vec::new();

    for site in sites {
        for endpoint in &site.domain_names {
            let endpoint = endpoint.trim();
            if endpoint.is_empty() {
                continue;
            }
            if !seen.insert(endpoint) {
                warn!(endpoint, site_id = %site.id, "Endpoint claimed by more than one site");
                continue;
            }
            endpoints.push((endpoint, site));
        }
    }

    endpoints.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    endpoints
        .into_iter()
        .find(|(endpoint, _)| page_path.starts_with(endpoint))
        .map(|(endpoint, site)| SiteEndpoint {
            site: site.clone(),
            endpoint: endpoint.to_string(),
        })
}
