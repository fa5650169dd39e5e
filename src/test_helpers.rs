//! Shared test doubles for the caojambo-site test suite.
//!
//! Gallery and contact code talk to the backend through the
//! [`GallerySource`] and [`ContactEndpoint`] traits. The types here stand in
//! for the HTTP client so unit tests never open a socket:
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let load = GalleryLoader::load(&StaticSource(sample_images(3)));
//! let load = GalleryLoader::load(&FailingSource::status(500));
//!
//! let endpoint = RecordingEndpoint::ok();
//! filled_form().submit(&endpoint, &t, Locale::Es, &mut Toaster::new());
//! assert_eq!(endpoint.calls(), 1);
//! ```

use std::cell::RefCell;

use crate::api::ApiError;
use crate::contact::{ContactEndpoint, ContactForm, ContactSubmission};
use crate::gallery::{GalleryImage, GallerySource};
use crate::storage::{Storage, StorageError};

// =========================================================================
// Gallery
// =========================================================================

/// `n` images with ids `img-1` through `img-n`.
pub fn sample_images(n: usize) -> Vec<GalleryImage> {
    (1..=n)
        .map(|i| GalleryImage {
            id: format!("img-{i}"),
            title_es: format!("Imagen {i}"),
            title_en: format!("Image {i}"),
            description_es: Some(format!("Descripción {i}")),
            description_en: Some(format!("Description {i}")),
            image_url: format!("https://cdn.example.com/gallery/{i}.jpg"),
            category: "cacao".to_string(),
        })
        .collect()
}

/// Always answers with the images it was built with.
pub struct StaticSource(pub Vec<GalleryImage>);

impl GallerySource for StaticSource {
    fn fetch_gallery(&self) -> Result<Vec<GalleryImage>, ApiError> {
        Ok(self.0.clone())
    }
}

/// Always fails. The error is rebuilt on each call since `ApiError` is not
/// `Clone`.
pub enum FailingSource {
    Status(u16),
    Malformed,
}

impl FailingSource {
    pub fn status(code: u16) -> Self {
        FailingSource::Status(code)
    }

    /// A 200 whose body is not an array of images.
    pub fn malformed() -> Self {
        FailingSource::Malformed
    }
}

impl GallerySource for FailingSource {
    fn fetch_gallery(&self) -> Result<Vec<GalleryImage>, ApiError> {
        match self {
            FailingSource::Status(code) => Err(ApiError::Status(*code)),
            FailingSource::Malformed => {
                let err = serde_json::from_str::<Vec<GalleryImage>>(r#"{"detail":"oops"}"#)
                    .unwrap_err();
                Err(ApiError::Decode(err))
            }
        }
    }
}

// =========================================================================
// Storage
// =========================================================================

/// Reads like an empty store; every write fails like a full disk.
#[derive(Default)]
pub struct ReadOnlyStorage {
    pub attempts: usize,
}

impl Storage for ReadOnlyStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        self.attempts += 1;
        Err(StorageError::Io(std::io::Error::other("disk full")))
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("disk full")))
    }
}

// =========================================================================
// Contact
// =========================================================================

/// Records every submission and answers with a fixed result.
pub struct RecordingEndpoint {
    fail_with: Option<u16>,
    received: RefCell<Vec<ContactSubmission>>,
}

impl RecordingEndpoint {
    pub fn ok() -> Self {
        Self {
            fail_with: None,
            received: RefCell::new(Vec::new()),
        }
    }

    pub fn status(code: u16) -> Self {
        Self {
            fail_with: Some(code),
            received: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.received.borrow().len()
    }

    pub fn last(&self) -> Option<ContactSubmission> {
        self.received.borrow().last().cloned()
    }
}

impl ContactEndpoint for RecordingEndpoint {
    fn submit_contact(&self, submission: &ContactSubmission) -> Result<(), ApiError> {
        self.received.borrow_mut().push(submission.clone());
        match self.fail_with {
            Some(code) => Err(ApiError::Status(code)),
            None => Ok(()),
        }
    }
}

/// A form with every field filled in.
pub fn filled_form() -> ContactForm {
    ContactForm::with_fields(ContactSubmission {
        name: "Ana Torres".to_string(),
        company: "Chocolatería Andina".to_string(),
        email: "ana@example.com".to_string(),
        phone: "+593 99 123 4567".to_string(),
        service_interest: "beans".to_string(),
        message: "Quisiera una muestra de cacao fino de aroma.".to_string(),
    })
}
