// ── Web-content filter table ──
//
// Two sources feed the effective blocklist: manually entered domains
// and the member sites of active categories. A manual entry that is
// also covered by an active category must not be individually
// removable -- the category owns it until the category is disabled.

use serde::Serialize;

use portway_api::models::FilteringResponse;

use crate::error::CoreError;

/// Where a blocklist entry comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BlockOrigin {
    /// Entered by hand; removable (unless also category-covered).
    Manual,
    /// Inherited from the named active category.
    Category(String),
}

/// One entry in the effective blocklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockedSite {
    pub domain: String,
    pub origin: BlockOrigin,
}

/// A named group of domains toggled as one unit.
#[derive(Debug, Clone, Serialize)]
pub struct SiteCategory {
    pub name: String,
    pub active: bool,
    pub sites: Vec<String>,
}

/// The full filtering state: manual blocks plus categories.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FilterTable {
    manual: Vec<String>,
    categories: Vec<SiteCategory>,
}

impl FilterTable {
    pub fn from_response(resp: FilteringResponse) -> Self {
        Self {
            manual: resp.manual_blocks,
            categories: resp
                .categories
                .into_iter()
                .map(|(name, raw)| SiteCategory {
                    name,
                    active: raw.active,
                    sites: raw.sites,
                })
                .collect(),
        }
    }

    pub fn manual_blocks(&self) -> &[String] {
        &self.manual
    }

    pub fn categories(&self) -> &[SiteCategory] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&SiteCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Flip a category's active flag locally (mirror of the backend
    /// toggle response).
    pub fn set_category_active(&mut self, name: &str, active: bool) -> Result<(), CoreError> {
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| CoreError::NotFound {
                entity: "category".into(),
                identifier: name.to_owned(),
            })?;
        category.active = active;
        Ok(())
    }

    /// The effective blocklist: manual entries first, then sites of
    /// active categories that are not already listed manually.
    pub fn effective_blocklist(&self) -> Vec<BlockedSite> {
        let mut out: Vec<BlockedSite> = self
            .manual
            .iter()
            .map(|domain| BlockedSite {
                domain: domain.clone(),
                origin: BlockOrigin::Manual,
            })
            .collect();

        for category in self.categories.iter().filter(|c| c.active) {
            for site in &category.sites {
                if !out.iter().any(|b| &b.domain == site) {
                    out.push(BlockedSite {
                        domain: site.clone(),
                        origin: BlockOrigin::Category(category.name.clone()),
                    });
                }
            }
        }

        out
    }

    /// The first active category covering `domain`, if any.
    pub fn covering_category(&self, domain: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.active && c.sites.iter().any(|s| s == domain))
            .map(|c| c.name.as_str())
    }

    /// Guard for manual removal: a category-covered domain is rejected
    /// with the category named, rather than silently ignored.
    pub fn check_removable(&self, domain: &str) -> Result<(), CoreError> {
        match self.covering_category(domain) {
            Some(category) => Err(CoreError::CategoryCovered {
                domain: domain.to_owned(),
                category: category.to_owned(),
            }),
            None => Ok(()),
        }
    }

    /// Which category a domain belongs to (active or not), for report
    /// attribution; manual-only domains answer `None`.
    pub fn attribution(&self, domain: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.sites.iter().any(|s| s == domain))
            .map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portway_api::models::RawCategory;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn table() -> FilterTable {
        let mut categories = BTreeMap::new();
        categories.insert(
            "Gaming".to_owned(),
            RawCategory {
                active: true,
                sites: vec!["twitch.tv".into(), "roblox.com".into()],
            },
        );
        categories.insert(
            "Streaming".to_owned(),
            RawCategory {
                active: false,
                sites: vec!["netflix.com".into()],
            },
        );
        FilterTable::from_response(FilteringResponse {
            manual_blocks: vec!["proxy.net".into(), "twitch.tv".into()],
            categories,
        })
    }

    #[test]
    fn effective_blocklist_is_manual_first_then_active_categories() {
        let list = table().effective_blocklist();
        let domains: Vec<&str> = list.iter().map(|b| b.domain.as_str()).collect();
        // twitch.tv appears once, attributed to its manual entry
        assert_eq!(domains, vec!["proxy.net", "twitch.tv", "roblox.com"]);
        assert_eq!(list[0].origin, BlockOrigin::Manual);
        assert_eq!(list[2].origin, BlockOrigin::Category("Gaming".into()));
    }

    #[test]
    fn inactive_category_sites_are_not_listed() {
        let list = table().effective_blocklist();
        assert!(!list.iter().any(|b| b.domain == "netflix.com"));
    }

    #[test]
    fn category_covered_manual_entry_is_not_removable() {
        let err = table().check_removable("twitch.tv").expect_err("covered");
        match err {
            CoreError::CategoryCovered { domain, category } => {
                assert_eq!(domain, "twitch.tv");
                assert_eq!(category, "Gaming");
            }
            other => panic!("unexpected error: {other}"),
        }
        // ... and the entry is still listed.
        assert!(table().effective_blocklist().iter().any(|b| b.domain == "twitch.tv"));
    }

    #[test]
    fn uncovered_manual_entry_is_removable() {
        assert!(table().check_removable("proxy.net").is_ok());
    }

    #[test]
    fn covered_domain_becomes_removable_once_category_is_disabled() {
        let mut t = table();
        t.set_category_active("Gaming", false).expect("known category");
        assert!(t.check_removable("twitch.tv").is_ok());
    }

    #[test]
    fn double_toggle_restores_the_visible_site_list() {
        let mut t = table();
        let before = t.effective_blocklist();
        let was_active = t.category("Gaming").expect("known").active;

        t.set_category_active("Gaming", !was_active).expect("toggle");
        t.set_category_active("Gaming", was_active).expect("toggle back");

        assert_eq!(t.category("Gaming").expect("known").active, was_active);
        assert_eq!(t.effective_blocklist(), before);
    }

    #[test]
    fn unknown_category_toggle_is_an_error() {
        let mut t = table();
        assert!(t.set_category_active("Adult Content", true).is_err());
    }
}
