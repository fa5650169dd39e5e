//! Gallery records and the best-effort loader.
//!
//! The gallery is owned by the backend: records are created there and only
//! read here. [`GalleryLoader::load`] makes exactly one request to a
//! [`GallerySource`]. Any failure (unreachable host, error status, body that
//! is not an array of images) is logged and replaced by the built-in
//! six-image set from [`fallback_images`]. Visitors never see the failure.
//!
//! There is no retry and no backoff: a page build gets one attempt.

use crate::api::ApiError;
use crate::i18n::Locale;
use serde::{Deserialize, Serialize};

/// One gallery photo, with copy in both languages.
///
/// The backend also sends `order` and `created_at`; they are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: String,
    pub title_es: String,
    pub title_en: String,
    #[serde(default)]
    pub description_es: Option<String>,
    #[serde(default)]
    pub description_en: Option<String>,
    pub image_url: String,
    pub category: String,
}

impl GalleryImage {
    pub fn title(&self, locale: Locale) -> &str {
        match locale {
            Locale::Es => &self.title_es,
            Locale::En => &self.title_en,
        }
    }

    pub fn description(&self, locale: Locale) -> Option<&str> {
        match locale {
            Locale::Es => self.description_es.as_deref(),
            Locale::En => self.description_en.as_deref(),
        }
    }
}

/// Anything that can produce the current gallery.
pub trait GallerySource {
    fn fetch_gallery(&self) -> Result<Vec<GalleryImage>, ApiError>;
}

/// Where a loaded gallery came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryOrigin {
    Remote,
    Fallback,
}

/// Result of a gallery load. Always holds a usable sequence.
#[derive(Debug, Clone)]
pub struct GalleryLoad {
    pub images: Vec<GalleryImage>,
    pub origin: GalleryOrigin,
}

pub struct GalleryLoader;

impl GalleryLoader {
    /// Fetch once from `source`, falling back to the built-in set on error.
    pub fn load(source: &dyn GallerySource) -> GalleryLoad {
        match source.fetch_gallery() {
            Ok(images) => {
                tracing::debug!(count = images.len(), "gallery loaded");
                GalleryLoad {
                    images,
                    origin: GalleryOrigin::Remote,
                }
            }
            Err(err) => {
                tracing::warn!(%err, "error fetching gallery, using built-in images");
                Self::fallback()
            }
        }
    }

    /// The built-in set, without touching the network.
    pub fn fallback() -> GalleryLoad {
        GalleryLoad {
            images: fallback_images(),
            origin: GalleryOrigin::Fallback,
        }
    }
}

/// The six images shown when the backend is unavailable.
pub fn fallback_images() -> Vec<GalleryImage> {
    let image = |id: &str,
                 (title_es, title_en): (&str, &str),
                 (description_es, description_en): (&str, &str),
                 image_url: &str,
                 category: &str| GalleryImage {
        id: id.to_string(),
        title_es: title_es.to_string(),
        title_en: title_en.to_string(),
        description_es: Some(description_es.to_string()),
        description_en: Some(description_en.to_string()),
        image_url: image_url.to_string(),
        category: category.to_string(),
    };

    vec![
        image(
            "1",
            ("Cacao Fino de Aroma", "Fine Aroma Cacao"),
            (
                "Granos de cacao seleccionados de la Amazonía Peruana",
                "Selected cacao beans from the Peruvian Amazon",
            ),
            "https://images.unsplash.com/photo-1699575947488-30f08e71896b?w=800",
            "cacao",
        ),
        image(
            "2",
            ("Bosque Amazónico", "Amazon Forest"),
            (
                "Nuestro entorno natural de producción",
                "Our natural production environment",
            ),
            "https://images.unsplash.com/photo-1699575678956-aefa714b67f0?w=800",
            "nature",
        ),
        image(
            "3",
            ("Proceso de Fermentación", "Fermentation Process"),
            (
                "Control de calidad en cada etapa",
                "Quality control at every stage",
            ),
            "https://images.pexels.com/photos/6420910/pexels-photo-6420910.jpeg?w=800",
            "process",
        ),
        image(
            "4",
            ("Majambo Fresco", "Fresh Majambo"),
            ("Fruta exótica del Amazonas", "Exotic fruit from the Amazon"),
            "https://images.pexels.com/photos/14436424/pexels-photo-14436424.jpeg?w=800",
            "product",
        ),
        image(
            "5",
            ("Sostenibilidad", "Sustainability"),
            (
                "Prácticas responsables con el medio ambiente",
                "Environmentally responsible practices",
            ),
            "https://images.pexels.com/photos/7450070/pexels-photo-7450070.jpeg?w=800",
            "sustainability",
        ),
        image(
            "6",
            ("Granos Seleccionados", "Selected Beans"),
            (
                "Calidad premium para mercados gourmet",
                "Premium quality for gourmet markets",
            ),
            "https://images.pexels.com/photos/33662910/pexels-photo-33662910.jpeg?w=800",
            "product",
        ),
    ]
}
