//! CLI output formatting for every subcommand.
//!
//! # Display Contract
//!
//! Gallery entries lead with a positional index and the locale-selected
//! title; the image URL and category follow as indented context lines. Pages
//! lead with the language name and point at the file written.
//!
//! ## Gallery
//!
//! ```text
//! Gallery (6 images, built-in)
//! 001 Cacao Fino de Aroma
//!     Category: cacao
//!     Image: https://images.unsplash.com/...
//! ```
//!
//! ## Build
//!
//! ```text
//! Español → dist/index.html
//! English → dist/en/index.html
//! Generated 2 pages with 6 gallery images (backend)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>` or
//! `String`) for testability and, where the output is more than one line, a
//! `print_*` wrapper that writes to stdout. Format functions are pure: no
//! I/O, no side effects.

use crate::contact::{Notification, NotificationKind};
use crate::gallery::{GalleryImage, GalleryLoad, GalleryOrigin};
use crate::generate::GeneratedPage;
use crate::i18n::{Locale, ParityGap};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn origin_label(origin: GalleryOrigin) -> &'static str {
    match origin {
        GalleryOrigin::Remote => "backend",
        GalleryOrigin::Fallback => "built-in",
    }
}

fn language_name(locale: Locale) -> &'static str {
    match locale {
        Locale::Es => "Español",
        Locale::En => "English",
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Gallery
// ============================================================================

fn image_lines(index: usize, image: &GalleryImage, locale: Locale) -> Vec<String> {
    let mut lines = vec![format!("{} {}", format_index(index), image.title(locale))];
    if let Some(description) = image.description(locale).filter(|d| !d.is_empty()) {
        lines.push(format!("    {description}"));
    }
    lines.push(format!("    Category: {}", image.category));
    lines.push(format!("    Image: {}", image.image_url));
    lines
}

/// Format a loaded gallery, titles in `locale`.
pub fn format_gallery(load: &GalleryLoad, locale: Locale) -> Vec<String> {
    let mut lines = vec![format!(
        "Gallery ({}, {})",
        plural(load.images.len(), "image", "images"),
        origin_label(load.origin)
    )];
    for (i, image) in load.images.iter().enumerate() {
        lines.extend(image_lines(i + 1, image, locale));
    }
    lines
}

pub fn print_gallery(load: &GalleryLoad, locale: Locale) {
    for line in format_gallery(load, locale) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format the pages written by a build.
pub fn format_build_output(pages: &[GeneratedPage], gallery: &GalleryLoad) -> Vec<String> {
    let mut lines: Vec<String> = pages
        .iter()
        .map(|page| {
            format!(
                "{} \u{2192} {}",
                language_name(page.locale),
                page.path.display()
            )
        })
        .collect();
    lines.push(format!(
        "Generated {} with {} ({})",
        plural(pages.len(), "page", "pages"),
        plural(gallery.images.len(), "gallery image", "gallery images"),
        origin_label(gallery.origin)
    ));
    lines
}

pub fn print_build_output(pages: &[GeneratedPage], gallery: &GalleryLoad) {
    for line in format_build_output(pages, gallery) {
        println!("{}", line);
    }
}

// ============================================================================
// Language, contact, check
// ============================================================================

/// One-line language status: `es (Español) stored in .caojambo-state.json`.
pub fn format_language(locale: Locale, state_path: &Path) -> String {
    format!(
        "{} ({}) stored in {}",
        locale,
        language_name(locale),
        state_path.display()
    )
}

pub fn format_notification(notification: &Notification) -> String {
    let mark = match notification.kind {
        NotificationKind::Success => '\u{2713}',
        NotificationKind::Error => '\u{2717}',
    };
    format!("{} {}", mark, notification.message)
}

/// Format translation keys present in one locale but not the other.
pub fn format_parity_gaps(gaps: &[ParityGap]) -> Vec<String> {
    if gaps.is_empty() {
        return vec!["Translations: es and en define the same keys".to_string()];
    }
    let mut lines = vec![format!(
        "Translations: {} out of sync",
        plural(gaps.len(), "key", "keys")
    )];
    for gap in gaps {
        lines.push(format!("    {} missing in {}", gap.key, gap.missing_in));
    }
    lines
}

/// Format page keys that would render raw in some locale.
pub fn format_missing_page_keys(missing: &[ParityGap]) -> Vec<String> {
    if missing.is_empty() {
        return vec!["Page copy: every key resolves in es and en".to_string()];
    }
    let mut lines = vec![format!(
        "Page copy: {} unresolved",
        plural(missing.len(), "key", "keys")
    )];
    for gap in missing {
        lines.push(format!("    {} missing in {}", gap.key, gap.missing_in));
    }
    lines
}
