//! Full-screen image viewer over the loaded gallery.
//!
//! # State
//!
//! The viewer is either closed, or open on one image of its current sequence.
//! The selection is stored as an index into that sequence and is only ever
//! set from a position that exists, so the open image is always an element of
//! the sequence. When the sequence is replaced (the gallery finished loading
//! while the viewer was open) the selection is re-found by id, or the viewer
//! closes.
//!
//! # Navigation
//!
//! `next` and `prev` wrap: stepping past the last image lands on the first and
//! vice versa. Both are no-ops while closed.
//!
//! # Scroll
//!
//! The page behind the overlay must not scroll while it is open. The viewer
//! tracks that as [`Lightbox::scroll_suspended`]; the browser script mirrors it
//! with `overflow: hidden` on the body.

use crate::gallery::GalleryImage;
use crate::i18n::Locale;

#[derive(Debug, Clone, Default)]
pub struct Lightbox {
    images: Vec<GalleryImage>,
    selected: Option<usize>,
}

/// Locale-selected text shown under the open image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
}

impl Lightbox {
    pub fn new(images: Vec<GalleryImage>) -> Self {
        Self {
            images,
            selected: None,
        }
    }

    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    /// Open on the image with `id`. Returns `false` (and stays as it was)
    /// when no such image is in the sequence.
    pub fn open(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.selected = Some(idx);
                true
            }
            None => false,
        }
    }

    /// Open on the image at `index`, if it exists.
    pub fn open_at(&mut self, index: usize) -> bool {
        if index < self.images.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn scroll_suspended(&self) -> bool {
        self.is_open()
    }

    pub fn current(&self) -> Option<&GalleryImage> {
        self.selected.map(|idx| &self.images[idx])
    }

    pub fn current_index(&self) -> Option<usize> {
        self.selected
    }

    /// Advance one image, wrapping from the last to the first.
    pub fn next(&mut self) {
        if let Some(idx) = self.selected {
            self.selected = Some((idx + 1) % self.images.len());
        }
    }

    /// Step back one image, wrapping from the first to the last.
    pub fn prev(&mut self) {
        if let Some(idx) = self.selected {
            let len = self.images.len();
            self.selected = Some((idx + len - 1) % len);
        }
    }

    /// Swap in a new sequence, keeping the open image if it is still there.
    pub fn replace_images(&mut self, images: Vec<GalleryImage>) {
        let selected_id = self.current().map(|img| img.id.clone());
        self.images = images;
        self.selected = selected_id.and_then(|id| self.position(&id));
    }

    pub fn caption(&self, locale: Locale) -> Option<Caption<'_>> {
        self.current().map(|img| Caption {
            title: img.title(locale),
            description: img.description(locale),
        })
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.images.iter().position(|img| img.id == id)
    }
}
