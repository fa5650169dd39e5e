//! # CAOJAMBO Site
//!
//! Bilingual (Spanish/English) marketing site for De Origen Natural Company,
//! a Peruvian exporter of fine aroma cacao and majambo. The crate renders
//! the one-page site for both languages, reads the photo gallery from the
//! company backend, and sends visitor messages to it.
//!
//! # Architecture
//!
//! The visitor-facing behavior is modelled as small state machines that the
//! CLI drives and that `static/site.js` mirrors in the browser:
//!
//! ```text
//! LanguageStore ── Storage (file / memory)         active language, persisted
//! GalleryLoader ── GallerySource (ApiClient)       one read, built-in fallback
//! Lightbox                                          open / next / prev / close
//! ContactForm   ── ContactEndpoint (ApiClient)     one POST, one notification
//! generate      ── Translations + gallery + config  dist/index.html, dist/en/
//! ```
//!
//! The backend sits behind two traits, so every state machine is tested
//! against in-memory doubles and only [`api`] touches the network.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`i18n`] | Locale enum, translation tables, the persisted [`i18n::LanguageStore`] |
//! | [`storage`] | `localStorage`-style key/value trait with file and memory backends |
//! | [`gallery`] | Gallery records, the loader, and the six built-in fallback images |
//! | [`lightbox`] | Full-screen viewer over the gallery with wraparound navigation |
//! | [`contact`] | Contact form state, required-field check, notifications |
//! | [`api`] | Blocking HTTP client for `/api/gallery` and `/api/contact` |
//! | [`config`] | `site.toml` loading, validation, merging, and CSS palette generation |
//! | [`generate`] | Renders both language pages with Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Failures Stay Local
//!
//! A broken backend never breaks the site. A failed gallery read is logged
//! and replaced by the built-in images; a failed contact POST becomes one
//! error notification with the form left as typed. Neither retries.
//!
//! ## Translations Are Data
//!
//! Copy lives in `locales/es.toml` and `locales/en.toml`, embedded at compile
//! time. Lookups use dotted keys (`hero.title`); a key missing from the
//! active language resolves to the key itself, so a gap shows up on the page
//! instead of as an error. `caojambo check` reports keys defined in one
//! language but not the other.
//!
//! ## One Page Per Language
//!
//! Each language gets its own static document, so the site needs no
//! client-side templating. The embedded script only restores the visitor's
//! stored language (by following the toggle link), runs the lightbox, and
//! posts the contact form.

pub mod api;
pub mod config;
pub mod contact;
pub mod gallery;
pub mod generate;
pub mod i18n;
pub mod lightbox;
pub mod output;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_helpers;
