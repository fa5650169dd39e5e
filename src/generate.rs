//! HTML site generation.
//!
//! Renders the single-page site once per language and writes it to the
//! output directory. Every piece of copy goes through the [`Translations`]
//! store; gallery titles and descriptions are picked per locale from the
//! loaded [`GalleryImage`] records.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html      # Spanish (default language)
//! └── en/
//!     └── index.html  # English
//! ```
//!
//! ## Page Sections
//!
//! Header (nav + language toggle) → hero → about → processes → values →
//! varieties → services → sustainability → gallery (grid + lightbox) →
//! contact form → footer. Each section has an `id` for in-page anchors and a
//! `data-testid` for browser tests.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (palette injected from config)
//! - `static/site.js`: Language persistence, lightbox, contact form POST
//!
//! The script reads the backend location from `data-api` on `<body>` and the
//! localized notification text from `data-*` attributes on the form, so the
//! same script serves both pages.

use crate::config::{self, SiteConfig};
use crate::gallery::GalleryImage;
use crate::i18n::{Locale, ParityGap, Translations};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

/// In-page anchors, in header order. Labels live under `nav.<key>`.
pub const NAV_SECTIONS: [&str; 8] = [
    "about",
    "processes",
    "values",
    "varieties",
    "services",
    "sustainability",
    "gallery",
    "contact",
];

const HERO_IMAGE: &str = "https://images.unsplash.com/photo-1699575947488-30f08e71896b?crop=entropy&cs=srgb&fm=jpg&q=85";
const ABOUT_IMAGE: &str = "https://images.unsplash.com/photo-1699575678956-aefa714b67f0?crop=entropy&cs=srgb&fm=jpg&q=85";
const PROCESSES_IMAGE: &str =
    "https://images.pexels.com/photos/6420910/pexels-photo-6420910.jpeg?auto=compress&cs=tinysrgb&dpr=2&h=650&w=940";
const CONTACT_IMAGE: &str =
    "https://images.pexels.com/photos/7450070/pexels-photo-7450070.jpeg?auto=compress&cs=tinysrgb&dpr=2&h=650&w=940";

const PROCESSES: [&str; 3] = ["produce", "transport", "distribute"];
const VALUES: [&str; 3] = ["integrity", "traceability", "sustainability"];
const SERVICES: [&str; 3] = ["beans", "development", "export"];
const INITIATIVES: [&str; 4] = ["circular", "zero", "biodiversity", "human"];

/// Variety key, photo, and the translation key of its badge.
const VARIETIES: [(&str, &str, &str); 3] = [
    (
        "majambo",
        "https://images.pexels.com/photos/14436424/pexels-photo-14436424.jpeg?auto=compress&cs=tinysrgb&dpr=2&h=650&w=940",
        "varieties.practices",
    ),
    (
        "cacao",
        "https://images.pexels.com/photos/7450070/pexels-photo-7450070.jpeg?auto=compress&cs=tinysrgb&dpr=2&h=650&w=940",
        "varieties.flavors",
    ),
    (
        "derivatives",
        "https://images.pexels.com/photos/33662910/pexels-photo-33662910.jpeg?auto=compress&cs=tinysrgb&dpr=2&h=650&w=940",
        "varieties.nutrition",
    ),
];

/// Literal keys the renderers resolve. Per-section keys are expanded in
/// [`page_keys`].
const PAGE_KEYS: [&str; 51] = [
    "about.brand",
    "about.description",
    "about.mission",
    "about.missionText",
    "about.title",
    "about.vision",
    "about.visionText",
    "contact.company",
    "contact.email",
    "contact.error",
    "contact.message",
    "contact.name",
    "contact.phone",
    "contact.selectService",
    "contact.sending",
    "contact.service",
    "contact.submit",
    "contact.subtitle",
    "contact.success",
    "contact.title",
    "footer.address",
    "footer.addressValue",
    "footer.email",
    "footer.emailValue",
    "footer.phone",
    "footer.phoneValue",
    "footer.rights",
    "footer.tagline",
    "gallery.close",
    "gallery.next",
    "gallery.previous",
    "gallery.subtitle",
    "gallery.title",
    "hero.cta",
    "hero.description",
    "hero.scroll",
    "hero.subtitle",
    "hero.title",
    "nav.language",
    "nav.menu",
    "processes.subtitle",
    "processes.title",
    "services.subtitle",
    "services.title",
    "sustainability.subtitle",
    "sustainability.title",
    "values.essence",
    "values.subtitle",
    "values.title",
    "varieties.subtitle",
    "varieties.title",
];

/// Every translation key the page resolves, sorted.
pub fn page_keys() -> Vec<String> {
    let mut keys: Vec<String> = PAGE_KEYS.iter().map(|k| k.to_string()).collect();
    keys.extend(NAV_SECTIONS.iter().map(|k| format!("nav.{k}")));
    for key in PROCESSES {
        for leaf in ["number", "title", "description"] {
            keys.push(format!("processes.{key}.{leaf}"));
        }
    }
    for (section, items) in [
        ("values", &VALUES[..]),
        ("services", &SERVICES[..]),
        ("sustainability", &INITIATIVES[..]),
    ] {
        for key in items {
            keys.push(format!("{section}.{key}.title"));
            keys.push(format!("{section}.{key}.description"));
        }
    }
    for (key, _, badge) in VARIETIES {
        keys.push(format!("varieties.{key}.title"));
        keys.push(format!("varieties.{key}.description"));
        keys.push(badge.to_string());
    }
    keys.extend(
        crate::contact::SERVICE_OPTIONS
            .iter()
            .map(|option| format!("contact.serviceOptions.{option}")),
    );
    keys.sort();
    keys.dedup();
    keys
}

/// Page keys that do not resolve to text in some locale. Such a key would
/// show up raw on that locale's page.
pub fn missing_page_keys(translations: &Translations) -> Vec<ParityGap> {
    let mut missing = Vec::new();
    for locale in Locale::ALL {
        for key in page_keys() {
            if translations.lookup(locale, &key).is_none() {
                missing.push(ParityGap {
                    key,
                    missing_in: locale,
                });
            }
        }
    }
    missing
}

/// Everything a page render needs.
pub struct PageContext<'a> {
    pub translations: &'a Translations,
    pub locale: Locale,
    pub gallery: &'a [GalleryImage],
    pub config: &'a SiteConfig,
    /// Year shown in the copyright line.
    pub year: i32,
}

impl PageContext<'_> {
    fn t<'k>(&'k self, key: &'k str) -> &'k str {
        self.translations.resolve(self.locale, key)
    }

    /// Owned lookup for keys built at render time (`processes.produce.title`).
    fn tf(&self, key: String) -> String {
        self.translations.resolve(self.locale, &key).to_string()
    }
}

/// One written page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub locale: Locale,
    pub path: PathBuf,
}

/// Output path of a locale's page, relative to the site root.
pub fn page_path(locale: Locale) -> &'static str {
    match locale {
        Locale::Es => "index.html",
        Locale::En => "en/index.html",
    }
}

/// Relative link from `from`'s page to `to`'s page.
pub fn locale_href(from: Locale, to: Locale) -> String {
    let up = if from == Locale::En { "../" } else { "" };
    format!("{up}{}", page_path(to))
}

/// Render and write every locale's page into `output_dir`.
pub fn generate(
    output_dir: &Path,
    translations: &Translations,
    gallery: &[GalleryImage],
    config: &SiteConfig,
    year: i32,
) -> Result<Vec<GeneratedPage>, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let mut pages = Vec::new();
    for locale in Locale::ALL {
        let ctx = PageContext {
            translations,
            locale,
            gallery,
            config,
            year,
        };
        let path = output_dir.join(page_path(locale));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, render_page(&ctx).into_string())?;
        tracing::debug!(path = %path.display(), %locale, "wrote page");
        pages.push(GeneratedPage { locale, path });
    }
    Ok(pages)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the full document for one locale.
pub fn render_page(ctx: &PageContext<'_>) -> Markup {
    let css = format!("{}\n\n{}", config::generate_color_css(&ctx.config.colors), CSS_STATIC);
    let api = format!("{}/api", ctx.config.api.backend_url.trim_end_matches('/'));
    let title = format!("{} | {}", ctx.config.brand.name, ctx.t("hero.title"));

    html! {
        (DOCTYPE)
        html lang=(ctx.locale.as_str()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(ctx.t("hero.description"));
                title { (title) }
                link rel="alternate" hreflang=(ctx.locale.toggled().as_str())
                    href=(locale_href(ctx.locale, ctx.locale.toggled()));
                style { (PreEscaped(css)) }
            }
            body data-api=(api) data-testid="app-container" {
                div #toaster .toaster aria-live="polite" {}
                (render_header(ctx))
                main {
                    (render_hero(ctx))
                    (render_about(ctx))
                    (render_processes(ctx))
                    (render_values(ctx))
                    (render_varieties(ctx))
                    (render_services(ctx))
                    (render_sustainability(ctx))
                    (render_gallery(ctx))
                    (render_contact(ctx))
                }
                (render_footer(ctx))
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Section heading block shared by most sections.
fn section_heading(title: &str, subtitle: &str, testid: &str) -> Markup {
    html! {
        div.section-heading {
            h2 data-testid=(testid) { (title) }
            p.section-subtitle { (subtitle) }
        }
    }
}

fn nav_links(ctx: &PageContext<'_>, prefix: &str) -> Markup {
    html! {
        @for key in NAV_SECTIONS {
            a href={ "#" (key) } data-testid={ (prefix) "nav-" (key) } {
                (ctx.tf(format!("nav.{key}")))
            }
        }
    }
}

/// Fixed header: logo, section nav, language toggle, mobile menu.
pub fn render_header(ctx: &PageContext<'_>) -> Markup {
    let other = ctx.locale.toggled();
    html! {
        header.site-header data-testid="main-header" {
            div.header-inner {
                a.logo href="#" data-testid="logo-link" { (ctx.config.brand.name) }
                nav.desktop-nav data-testid="desktop-nav" {
                    (nav_links(ctx, ""))
                }
                div.header-actions {
                    a.language-toggle
                        href=(locale_href(ctx.locale, other))
                        hreflang=(other.as_str())
                        title=(ctx.t("nav.language"))
                        data-language-toggle
                        data-target=(other.as_str())
                        data-testid="language-toggle" {
                        span.globe aria-hidden="true" { "◍" }
                        span.locale-code { (ctx.locale.as_str()) }
                    }
                    button.menu-toggle type="button" aria-controls="mobile-menu" aria-expanded="false"
                        aria-label=(ctx.t("nav.menu")) data-testid="mobile-menu-toggle" {
                        span.menu-line {}
                        span.menu-line {}
                        span.menu-line {}
                    }
                }
            }
            nav #mobile-menu .mobile-menu hidden data-testid="mobile-menu" {
                (nav_links(ctx, "mobile-"))
            }
        }
    }
}

fn render_hero(ctx: &PageContext<'_>) -> Markup {
    html! {
        section #hero .hero data-testid="hero-section" style={ "background-image: url('" (HERO_IMAGE) "')" } {
            div.hero-overlay {}
            div.hero-content {
                h1 data-testid="hero-title" { (ctx.t("hero.title")) }
                p.hero-subtitle data-testid="hero-subtitle" { (ctx.t("hero.subtitle")) }
                p.hero-description { (ctx.t("hero.description")) }
                a.button.button-primary href="#contact" data-testid="hero-cta" { (ctx.t("hero.cta")) }
            }
            a.scroll-indicator href="#about" data-testid="scroll-indicator" {
                (ctx.t("hero.scroll"))
            }
        }
    }
}

fn render_about(ctx: &PageContext<'_>) -> Markup {
    html! {
        section #about .section data-testid="about-section" {
            div.two-column {
                div.about-copy {
                    span.eyebrow { (ctx.t("about.brand")) }
                    h2 data-testid="about-title" { (ctx.t("about.title")) }
                    p { (ctx.t("about.description")) }
                    div.mission-vision {
                        div.card {
                            h3 { (ctx.t("about.mission")) }
                            p { (ctx.t("about.missionText")) }
                        }
                        div.card {
                            h3 { (ctx.t("about.vision")) }
                            p { (ctx.t("about.visionText")) }
                        }
                    }
                }
                figure.about-image {
                    img src=(ABOUT_IMAGE) alt=(ctx.t("about.title")) loading="lazy";
                }
            }
        }
    }
}

fn render_processes(ctx: &PageContext<'_>) -> Markup {
    html! {
        section #processes .section.section-dark data-testid="processes-section" {
            (section_heading(ctx.t("processes.title"), ctx.t("processes.subtitle"), "processes-title"))
            div.two-column {
                figure.process-image {
                    img src=(PROCESSES_IMAGE) alt=(ctx.t("processes.title")) loading="lazy";
                }
                ol.process-list {
                    @for key in PROCESSES {
                        li.process data-testid={ "process-" (key) } {
                            span.process-number { (ctx.tf(format!("processes.{key}.number"))) }
                            div {
                                h3 { (ctx.tf(format!("processes.{key}.title"))) }
                                p { (ctx.tf(format!("processes.{key}.description"))) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_values(ctx: &PageContext<'_>) -> Markup {
    html! {
        section #values .section data-testid="values-section" {
            (section_heading(ctx.t("values.title"), ctx.t("values.subtitle"), "values-title"))
            blockquote.essence { (ctx.t("values.essence")) }
            div.card-grid.cols-3 {
                @for key in VALUES {
                    article.card data-testid={ "value-" (key) } {
                        h3 { (ctx.tf(format!("values.{key}.title"))) }
                        p { (ctx.tf(format!("values.{key}.description"))) }
                    }
                }
            }
        }
    }
}

fn render_varieties(ctx: &PageContext<'_>) -> Markup {
    html! {
        section #varieties .section.section-sand data-testid="varieties-section" {
            (section_heading(ctx.t("varieties.title"), ctx.t("varieties.subtitle"), "varieties-title"))
            div.card-grid.cols-3 {
                @for (key, image, badge) in VARIETIES {
                    @let title = ctx.tf(format!("varieties.{key}.title"));
                    article.variety data-testid={ "variety-" (key) } {
                        div.variety-image {
                            img src=(image) alt=(title) loading="lazy";
                            span.badge { (ctx.t(badge)) }
                        }
                        h3 { (title) }
                        p { (ctx.tf(format!("varieties.{key}.description"))) }
                    }
                }
            }
        }
    }
}

fn render_services(ctx: &PageContext<'_>) -> Markup {
    html! {
        section #services .section data-testid="services-section" {
            (section_heading(ctx.t("services.title"), ctx.t("services.subtitle"), "services-title"))
            div.card-grid.cols-3 {
                @for key in SERVICES {
                    article.card.service data-testid={ "service-" (key) } {
                        h3 { (ctx.tf(format!("services.{key}.title"))) }
                        p { (ctx.tf(format!("services.{key}.description"))) }
                    }
                }
            }
        }
    }
}

fn render_sustainability(ctx: &PageContext<'_>) -> Markup {
    html! {
        section #sustainability .section.section-dark data-testid="sustainability-section" {
            (section_heading(
                ctx.t("sustainability.title"),
                ctx.t("sustainability.subtitle"),
                "sustainability-title",
            ))
            div.card-grid.cols-4 {
                @for key in INITIATIVES {
                    article.card data-testid={ "sustainability-" (key) } {
                        h3 { (ctx.tf(format!("sustainability.{key}.title"))) }
                        p { (ctx.tf(format!("sustainability.{key}.description"))) }
                    }
                }
            }
        }
    }
}

/// Gallery grid plus the (initially hidden) lightbox overlay.
///
/// Each tile carries its locale-selected caption in `data-*` attributes so
/// the script can fill the lightbox without another request.
pub fn render_gallery(ctx: &PageContext<'_>) -> Markup {
    html! {
        section #gallery .section data-testid="gallery-section" {
            (section_heading(ctx.t("gallery.title"), ctx.t("gallery.subtitle"), "gallery-title"))
            div.gallery-grid {
                @for (idx, image) in ctx.gallery.iter().enumerate() {
                    @let title = image.title(ctx.locale);
                    @let description = image.description(ctx.locale).unwrap_or_default();
                    button.gallery-item.wide[idx == 0] type="button"
                        data-index=(idx)
                        data-src=(image.image_url)
                        data-title=(title)
                        data-description=(description)
                        data-category=(image.category)
                        data-testid={ "gallery-image-" (image.id) } {
                        img src=(image.image_url) alt=(title) loading="lazy";
                        span.gallery-caption {
                            span.gallery-title { (title) }
                            @if !description.is_empty() {
                                span.gallery-description { (description) }
                            }
                        }
                    }
                }
            }
            div #lightbox .lightbox hidden role="dialog" aria-modal="true" data-testid="gallery-lightbox" {
                button.lightbox-close type="button" aria-label=(ctx.t("gallery.close")) data-testid="lightbox-close" { "×" }
                button.lightbox-prev type="button" aria-label=(ctx.t("gallery.previous")) data-testid="lightbox-prev" { "‹" }
                button.lightbox-next type="button" aria-label=(ctx.t("gallery.next")) data-testid="lightbox-next" { "›" }
                figure.lightbox-figure {
                    img.lightbox-image alt="";
                    figcaption {
                        h3.lightbox-title {}
                        p.lightbox-description {}
                    }
                }
            }
        }
    }
}

/// Contact copy and form. Required fields carry `required` and a `*` marker.
pub fn render_contact(ctx: &PageContext<'_>) -> Markup {
    html! {
        section #contact .section data-testid="contact-section" {
            div.two-column {
                div.contact-info {
                    h2 data-testid="contact-title" { (ctx.t("contact.title")) }
                    p.section-subtitle { (ctx.t("contact.subtitle")) }
                    figure.contact-image {
                        img src=(CONTACT_IMAGE) alt=(ctx.t("contact.title")) loading="lazy";
                    }
                }
                form #contact-form .contact-form
                    data-success=(ctx.t("contact.success"))
                    data-error=(ctx.t("contact.error"))
                    data-submit=(ctx.t("contact.submit"))
                    data-sending=(ctx.t("contact.sending"))
                    data-testid="contact-form" {
                    label {
                        span { (ctx.t("contact.name")) " *" }
                        input type="text" name="name" required data-testid="contact-name-input";
                    }
                    label {
                        span { (ctx.t("contact.company")) }
                        input type="text" name="company" data-testid="contact-company-input";
                    }
                    label {
                        span { (ctx.t("contact.email")) " *" }
                        input type="email" name="email" required data-testid="contact-email-input";
                    }
                    label {
                        span { (ctx.t("contact.phone")) }
                        input type="tel" name="phone" data-testid="contact-phone-input";
                    }
                    label {
                        span { (ctx.t("contact.service")) }
                        select name="service_interest" data-testid="contact-service-select" {
                            option value="" { (ctx.t("contact.selectService")) }
                            @for option in crate::contact::SERVICE_OPTIONS {
                                option value=(option) { (ctx.tf(format!("contact.serviceOptions.{option}"))) }
                            }
                        }
                    }
                    label {
                        span { (ctx.t("contact.message")) " *" }
                        textarea name="message" rows="4" required data-testid="contact-message-input" {}
                    }
                    button.button.button-primary type="submit" data-testid="contact-submit-button" {
                        (ctx.t("contact.submit"))
                    }
                }
            }
        }
    }
}

fn render_footer(ctx: &PageContext<'_>) -> Markup {
    let social = &ctx.config.social;
    html! {
        footer.site-footer data-testid="footer" {
            div.footer-grid {
                div {
                    span.logo data-testid="footer-logo" { (ctx.config.brand.name) }
                    p { (ctx.t("footer.tagline")) }
                    div.social {
                        a href=(social.facebook) data-testid="social-facebook" { "Facebook" }
                        a href=(social.instagram) data-testid="social-instagram" { "Instagram" }
                        a href=(social.linkedin) data-testid="social-linkedin" { "LinkedIn" }
                    }
                }
                nav.footer-links {
                    @for key in ["about", "services", "gallery"] {
                        a href={ "#" (key) } data-testid={ "footer-link-" (key) } {
                            (ctx.tf(format!("nav.{key}")))
                        }
                    }
                }
                div.footer-contact {
                    h4 { (ctx.t("contact.title")) }
                    dl {
                        dt { (ctx.t("footer.address")) }
                        dd { (ctx.t("footer.addressValue")) }
                        dt { (ctx.t("footer.phone")) }
                        dd { (ctx.t("footer.phoneValue")) }
                        dt { (ctx.t("footer.email")) }
                        dd {
                            a href={ "mailto:" (ctx.t("footer.emailValue")) } { (ctx.t("footer.emailValue")) }
                        }
                    }
                }
            }
            p.copyright {
                "© " (ctx.year) " " (ctx.config.brand.company) ". " (ctx.t("footer.rights")) "."
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
