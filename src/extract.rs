//! Small helpers shared by the site adapters for pulling an image URL out of
//! a fetched page. The rules themselves (selectors, patterns) live next to
//! each adapter.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::domain::SiteId;
use crate::errors::{PotdError, PotdResult};

pub fn parse_html(page: &[u8]) -> Html {
    Html::parse_document(&String::from_utf8_lossy(page))
}

pub fn selector(site: SiteId, css: &str) -> PotdResult<Selector> {
    Selector::parse(css).map_err(|e| PotdError::parse(site, format!("bad selector {:?}: {}", css, e)))
}

pub fn regex(site: SiteId, pattern: &str) -> PotdResult<Regex> {
    Regex::new(pattern).map_err(|e| PotdError::parse(site, format!("bad pattern {:?}: {}", pattern, e)))
}

/// First element matching `css` below `scope`
pub fn first<'a>(site: SiteId, scope: ElementRef<'a>, css: &str) -> PotdResult<Option<ElementRef<'a>>> {
    let selector = selector(site, css)?;
    Ok(scope.select(&selector).next())
}

/// Attribute of the first element matching `css`; a missing element or
/// attribute means the page layout changed.
pub fn first_attr(site: SiteId, document: &Html, css: &str, attr: &str) -> PotdResult<String> {
    let element = first(site, document.root_element(), css)?
        .ok_or_else(|| PotdError::parse(site, format!("no element matches {:?}", css)))?;
    attr_of(site, element, attr)
}

pub fn attr_of(site: SiteId, element: ElementRef<'_>, attr: &str) -> PotdResult<String> {
    element
        .value()
        .attr(attr)
        .map(|v| v.trim().to_string())
        .ok_or_else(|| {
            PotdError::parse(
                site,
                format!("<{}> has no {} attribute", element.value().name(), attr),
            )
        })
}

/// Every value of `attr` on elements matching `css`
pub fn all_attrs(site: SiteId, document: &Html, css: &str, attr: &str) -> PotdResult<Vec<String>> {
    let selector = selector(site, css)?;
    Ok(document
        .select(&selector)
        .filter_map(|e| e.value().attr(attr))
        .map(|v| v.trim().to_string())
        .collect())
}

/// First capture group of `pattern` in `text`
pub fn capture(site: SiteId, pattern: &str, text: &str) -> PotdResult<String> {
    let re = regex(site, pattern)?;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| PotdError::parse(site, format!("pattern {:?} not found", pattern)))
}

/// The first candidate URL of a `srcset` attribute
pub fn first_srcset_url(srcset: &str) -> Option<&str> {
    srcset
        .split(',')
        .next()
        .and_then(|candidate| candidate.split_whitespace().next())
}

/// Resolve `href` (absolute, protocol-relative or relative) against `base`
pub fn resolve_url(base: &str, href: &str) -> PotdResult<String> {
    let base = Url::parse(base).map_err(|e| PotdError::InvalidUrl(format!("{}: {}", base, e)))?;
    base.join(href)
        .map(String::from)
        .map_err(|e| PotdError::InvalidUrl(format!("{}: {}", href, e)))
}
