//! Core library for the Labas bilingual site: i18n and SEO metadata,
//! the Sanity content client, the form relay endpoints, and the
//! supporting route table and visibility observer.

pub mod config;
pub mod i18n;
pub mod relay;
pub mod routes;
pub mod sanity;
pub mod seo;
pub mod visibility;
