//! Document metadata synchronizer.
//!
//! Keeps the document head consistent with (active locale × current
//! path). The derivation is pure — [`Seo::derive`] computes a
//! [`PageMeta`] from its inputs — and the mutation is a separate,
//! idempotent step: [`Head::apply`] upserts tags into an in-memory
//! model of the head that the host environment mirrors into the real
//! document. Calling sync twice with identical arguments leaves the
//! head byte-identical to calling it once.
//!
//! URL scheme: Arabic (primary) pages live at the unprefixed path and
//! English pages carry the `/en` prefix, giving exactly one canonical
//! URL per (page, locale) pair. The x-default alternate always points
//! at the unprefixed path.

use crate::i18n::Locale;
use crate::routes;
use serde_json::{json, Value};

/// Path prefix marking the secondary-locale variant of a page.
const EN_MARKER: &str = "/en";

/// Path segment reserved for versioned legal pages, dropped from
/// breadcrumbs.
const VERSION_SEGMENT: &str = "v1";

/// Per-page overrides for the derived metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaOverrides {
    /// Document title override.
    pub title: Option<String>,
    /// Description override.
    pub description: Option<String>,
    /// Social-preview image URL override.
    pub image: Option<String>,
    /// Social-preview image alt text override.
    pub image_alt: Option<String>,
}

/// One entry of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Localized display label.
    pub label: String,
    /// Absolute URL of this trail position.
    pub url: String,
}

/// Derived head metadata for one (page, locale) pair. Ephemeral:
/// recomputed on every navigation, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    /// Document title.
    pub title: String,
    /// Meta description.
    pub description: String,
    /// Social-preview image URL.
    pub image: String,
    /// Social-preview image alt text.
    pub image_alt: String,
    /// The single authoritative URL for this (page, locale).
    pub canonical_url: String,
    /// Per-locale alternate URLs (both recognized locales).
    pub alternates: Vec<(Locale, String)>,
    /// Locale-neutral URL for the x-default alternate.
    pub x_default_url: String,
    /// Open Graph locale tag.
    pub og_locale: &'static str,
    /// Breadcrumb trail (root included); only emitted as structured
    /// data when it has more than one entry.
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// Strip the secondary-locale marker from a path, if present.
pub fn strip_locale_marker(path: &str) -> &str {
    if path == EN_MARKER {
        "/"
    } else if path.starts_with("/en/") {
        // "/enterprise" is not a marked path; only "/en/" counts.
        &path[EN_MARKER.len()..]
    } else {
        path
    }
}

/// Canonical path for a (logical or already-prefixed) path under a
/// locale: `/en`-prefixed for English, unprefixed for Arabic.
pub fn canonical_path(path: &str, locale: Locale) -> String {
    let logical = strip_locale_marker(path);
    match locale {
        Locale::Ar => logical.to_string(),
        Locale::En => {
            if logical == "/" {
                EN_MARKER.to_string()
            } else {
                format!("{}{}", EN_MARKER, logical)
            }
        }
    }
}

/// Derives and applies head metadata for the site.
#[derive(Debug, Clone)]
pub struct Seo {
    base_url: String,
}

impl Seo {
    /// Create a synchronizer rooted at the site's base URL (no
    /// trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Derive the full metadata for a path under a locale.
    pub fn derive(&self, path: &str, locale: Locale, overrides: &MetaOverrides) -> PageMeta {
        let logical = strip_locale_marker(path).to_string();
        let canonical = canonical_path(&logical, locale);
        let canonical_url = self.absolute(&canonical);
        let x_default_url = self.absolute(&logical);

        let alternates = vec![
            (Locale::Ar, self.absolute(&canonical_path(&logical, Locale::Ar))),
            (Locale::En, self.absolute(&canonical_path(&logical, Locale::En))),
        ];

        let title = overrides
            .title
            .clone()
            .unwrap_or_else(|| default_title(locale).to_string());
        let description = overrides
            .description
            .clone()
            .unwrap_or_else(|| default_description(locale).to_string());
        let image = overrides
            .image
            .clone()
            .unwrap_or_else(|| format!("{}/images/logos/brand-mark.png", self.base_url));
        let image_alt = overrides
            .image_alt
            .clone()
            .unwrap_or_else(|| default_image_alt(locale).to_string());

        PageMeta {
            title,
            description,
            image,
            image_alt,
            canonical_url,
            alternates,
            x_default_url,
            og_locale: locale.og_locale(),
            breadcrumbs: self.breadcrumbs(&logical, locale),
        }
    }

    /// Derive metadata and upsert it into the head model.
    pub fn sync(
        &self,
        head: &mut Head,
        path: &str,
        locale: Locale,
        overrides: &MetaOverrides,
    ) -> PageMeta {
        let meta = self.derive(path, locale, overrides);
        head.apply(&meta);
        meta
    }

    /// Breadcrumb trail for a logical path, rooted at the localized
    /// home URL. The reserved version segment is dropped; unknown
    /// segments keep their raw token as the label.
    fn breadcrumbs(&self, logical: &str, locale: Locale) -> Vec<Breadcrumb> {
        let root_path = canonical_path("/", locale);
        let mut crumbs = vec![Breadcrumb {
            label: routes::home_label(locale).to_string(),
            url: self.absolute(&root_path),
        }];

        let mut cumulative = String::new();
        for segment in logical.split('/').filter(|s| !s.is_empty()) {
            cumulative.push('/');
            cumulative.push_str(segment);
            if segment == VERSION_SEGMENT {
                continue;
            }
            let label = routes::segment_label(segment, locale)
                .map(str::to_string)
                .unwrap_or_else(|| segment.to_string());
            crumbs.push(Breadcrumb {
                label,
                url: self.absolute(&canonical_path(&cumulative, locale)),
            });
        }
        crumbs
    }

    fn absolute(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn default_title(locale: Locale) -> &'static str {
    match locale {
        Locale::Ar => "لا باس - Labas",
        Locale::En => "Labas - لا باس",
    }
}

fn default_description(locale: Locale) -> &'static str {
    match locale {
        Locale::Ar => {
            "منصة «لا باس» تربط المرضى بالأطباء والمستشفيات في ليبيا، مع مواعيد رقمية، تقارير طبية آمنة، ودردشة مع فريق الرعاية"
        }
        Locale::En => {
            "Labas connects patients, doctors, and hospitals across Libya with secure digital tools."
        }
    }
}

fn default_image_alt(locale: Locale) -> &'static str {
    match locale {
        Locale::Ar => "شعار لا باس",
        Locale::En => "Labas brand mark",
    }
}

/// How a meta tag is addressed in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaAttribute {
    /// Addressed by the `name` attribute (description, twitter:*).
    Name,
    /// Addressed by the `property` attribute (og:*).
    Property,
}

/// A meta tag in the head model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    /// Which attribute addresses the tag.
    pub attribute: MetaAttribute,
    /// The `name`/`property` value.
    pub name: String,
    /// The tag content.
    pub content: String,
}

/// A link element in the head model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadLink {
    /// The `rel` value (`canonical` or `alternate`).
    pub rel: String,
    /// The `hreflang` value for alternate links.
    pub hreflang: Option<String>,
    /// The link target.
    pub href: String,
}

/// In-memory model of the mutable parts of the document head.
///
/// The host environment mirrors this into the real document; tests
/// assert on it directly. All writes are idempotent upserts:
/// meta tags are matched by (attribute, name), links by
/// (rel, hreflang), and JSON-LD blocks by their `@type` discriminator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Head {
    title: Option<String>,
    metas: Vec<MetaTag>,
    links: Vec<HeadLink>,
    scripts: Vec<Value>,
}

impl Head {
    /// Create an empty head model.
    pub fn new() -> Self {
        Self::default()
    }

    /// The document title, if set.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// All meta tags.
    pub fn metas(&self) -> &[MetaTag] {
        &self.metas
    }

    /// All link elements.
    pub fn links(&self) -> &[HeadLink] {
        &self.links
    }

    /// All JSON-LD structured-data blocks.
    pub fn scripts(&self) -> &[Value] {
        &self.scripts
    }

    /// Content of a meta tag, if present.
    pub fn meta_content(&self, attribute: MetaAttribute, name: &str) -> Option<&str> {
        self.metas
            .iter()
            .find(|tag| tag.attribute == attribute && tag.name == name)
            .map(|tag| tag.content.as_str())
    }

    /// Target of a link, if present.
    pub fn link_href(&self, rel: &str, hreflang: Option<&str>) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.rel == rel && link.hreflang.as_deref() == hreflang)
            .map(|link| link.href.as_str())
    }

    /// The JSON-LD block of a given `@type`, if present.
    pub fn json_ld(&self, type_name: &str) -> Option<&Value> {
        self.scripts
            .iter()
            .find(|block| block.get("@type").and_then(Value::as_str) == Some(type_name))
    }

    /// Upsert the full tag/link/structured-data set for a page.
    pub fn apply(&mut self, meta: &PageMeta) {
        self.title = Some(meta.title.clone());

        self.upsert_meta(MetaAttribute::Name, "description", &meta.description);

        self.upsert_meta(MetaAttribute::Property, "og:title", &meta.title);
        self.upsert_meta(MetaAttribute::Property, "og:description", &meta.description);
        self.upsert_meta(MetaAttribute::Property, "og:url", &meta.canonical_url);
        self.upsert_meta(MetaAttribute::Property, "og:image", &meta.image);
        self.upsert_meta(MetaAttribute::Property, "og:image:alt", &meta.image_alt);
        self.upsert_meta(MetaAttribute::Property, "og:type", "website");
        self.upsert_meta(MetaAttribute::Property, "og:locale", meta.og_locale);

        self.upsert_meta(MetaAttribute::Name, "twitter:card", "summary_large_image");
        self.upsert_meta(MetaAttribute::Name, "twitter:title", &meta.title);
        self.upsert_meta(MetaAttribute::Name, "twitter:description", &meta.description);
        self.upsert_meta(MetaAttribute::Name, "twitter:image", &meta.image);
        self.upsert_meta(MetaAttribute::Name, "twitter:image:alt", &meta.image_alt);

        self.upsert_link("canonical", None, &meta.canonical_url);
        for (locale, url) in &meta.alternates {
            self.upsert_link("alternate", Some(locale.code()), url);
        }
        self.upsert_link("alternate", Some("x-default"), &meta.x_default_url);

        if meta.breadcrumbs.len() > 1 {
            self.upsert_json_ld(breadcrumb_json_ld(&meta.breadcrumbs));
        }
    }

    fn upsert_meta(&mut self, attribute: MetaAttribute, name: &str, content: &str) {
        match self
            .metas
            .iter_mut()
            .find(|tag| tag.attribute == attribute && tag.name == name)
        {
            Some(tag) => tag.content = content.to_string(),
            None => self.metas.push(MetaTag {
                attribute,
                name: name.to_string(),
                content: content.to_string(),
            }),
        }
    }

    fn upsert_link(&mut self, rel: &str, hreflang: Option<&str>, href: &str) {
        match self
            .links
            .iter_mut()
            .find(|link| link.rel == rel && link.hreflang.as_deref() == hreflang)
        {
            Some(link) => link.href = href.to_string(),
            None => self.links.push(HeadLink {
                rel: rel.to_string(),
                hreflang: hreflang.map(str::to_string),
                href: href.to_string(),
            }),
        }
    }

    /// Replace any existing block of the same `@type`, matching by the
    /// type discriminator rather than exact content.
    fn upsert_json_ld(&mut self, block: Value) {
        let type_name = block.get("@type").and_then(Value::as_str).map(str::to_string);
        match self.scripts.iter_mut().find(|existing| {
            existing.get("@type").and_then(Value::as_str) == type_name.as_deref()
        }) {
            Some(existing) => *existing = block,
            None => self.scripts.push(block),
        }
    }
}

/// BreadcrumbList structured data for search engines.
fn breadcrumb_json_ld(crumbs: &[Breadcrumb]) -> Value {
    let items: Vec<Value> = crumbs
        .iter()
        .enumerate()
        .map(|(index, crumb)| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": crumb.label,
                "item": crumb.url,
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}
