//! New-complaint wizard.
//!
//! Holds everything the citizen has entered across the four steps. A failed
//! validation or submission never clears entered data.

use std::sync::Arc;

use crate::core::error::{AppError, Result, WizardField};
use crate::features::auth::guards::SessionGuard;
use crate::features::categories::{default_categories, Category};
use crate::features::reports::models::{Attachment, ComplaintSubmission};
use crate::features::wizard::state::{LocationPin, ReviewSummary, WizardStep};
use crate::modules::api::{CategoriesApi, ReportsApi};
use crate::modules::geocoding::Geocoder;
use crate::shared::constants::{
    ALLOWED_PHOTO_TYPES, MAX_DESCRIPTION_CHARS, MAX_PHOTO_SIZE_BYTES, RECORDING_CONTENT_TYPE,
    RECORDING_FILE_NAME, TITLE_WORD_COUNT,
};

pub const INVALID_PHOTO_TYPE: &str = "Please upload a valid image file (JPEG, PNG, GIF, or WebP).";
pub const PHOTO_TOO_LARGE: &str = "File size must be less than 10MB.";
pub const ADDRESS_LOOKUP_FAILED: &str = "Could not fetch address.";
pub const LOCATION_NOT_FOUND: &str = "Location not found.";

pub struct ComplaintWizard {
    guard: Arc<SessionGuard>,
    reports: Arc<dyn ReportsApi>,
    categories_api: Arc<dyn CategoriesApi>,
    geocoder: Arc<dyn Geocoder>,
    step: WizardStep,
    categories: Vec<Category>,
    photo: Option<Attachment>,
    audio: Option<Attachment>,
    category: Option<Category>,
    description: String,
    location: Option<LocationPin>,
}

impl ComplaintWizard {
    pub fn new(
        guard: Arc<SessionGuard>,
        reports: Arc<dyn ReportsApi>,
        categories_api: Arc<dyn CategoriesApi>,
        geocoder: Arc<dyn Geocoder>,
    ) -> Self {
        Self {
            guard,
            reports,
            categories_api,
            geocoder,
            step: WizardStep::Photo,
            categories: default_categories(),
            photo: None,
            audio: None,
            category: None,
            description: String::new(),
            location: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn photo(&self) -> Option<&Attachment> {
        self.photo.as_ref()
    }

    pub fn audio(&self) -> Option<&Attachment> {
        self.audio.as_ref()
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> Option<&LocationPin> {
        self.location.as_ref()
    }

    // ========================================================================
    // Categories
    // ========================================================================

    /// Load the category tiles, falling back to the built-in list when the
    /// backend fails or has none.
    pub async fn load_categories(&mut self) -> &[Category] {
        match self.categories_api.get_all().await {
            Ok(categories) if !categories.is_empty() => {
                tracing::debug!("Loaded {} categories", categories.len());
                self.categories = categories;
            }
            Ok(_) => {
                tracing::warn!("No categories received from backend, using default categories");
                self.categories = default_categories();
            }
            Err(e) => {
                tracing::error!("Error loading categories: {}", e);
                tracing::warn!("Using default categories due to API error");
                self.categories = default_categories();
            }
        }
        &self.categories
    }

    pub fn select_category(&mut self, category_id: &str) -> Result<&Category> {
        let category = self
            .categories
            .iter()
            .find(|c| c.category_id == category_id)
            .cloned()
            .ok_or_else(|| AppError::missing(WizardField::Category))?;

        tracing::debug!("Category selected: {} ({})", category.name, category.category_id);
        let selected = self.category.insert(category);
        Ok(&*selected)
    }

    // ========================================================================
    // Photo and audio
    // ========================================================================

    /// Accept an image; a rejected file leaves any earlier photo in place.
    pub fn set_photo(&mut self, photo: Attachment) -> Result<()> {
        if !ALLOWED_PHOTO_TYPES.contains(&photo.content_type.as_str()) {
            tracing::warn!("Rejected photo {} of type {}", photo.file_name, photo.content_type);
            return Err(AppError::invalid(WizardField::Photo, INVALID_PHOTO_TYPE));
        }
        if photo.size() > MAX_PHOTO_SIZE_BYTES {
            tracing::warn!("Rejected photo {} of {} bytes", photo.file_name, photo.size());
            return Err(AppError::invalid(WizardField::Photo, PHOTO_TOO_LARGE));
        }

        tracing::debug!("Photo selected: {} ({} bytes)", photo.file_name, photo.size());
        self.photo = Some(photo);
        Ok(())
    }

    pub fn remove_photo(&mut self) {
        self.photo = None;
    }

    /// Store a finished microphone recording.
    pub fn record_audio(&mut self, bytes: Vec<u8>) {
        self.audio = Some(Attachment::new(
            RECORDING_FILE_NAME,
            RECORDING_CONTENT_TYPE,
            bytes,
        ));
    }

    /// Accept an uploaded audio file. Anything that is not `audio/*` clears
    /// the current audio.
    pub fn upload_audio(&mut self, file: Attachment) -> Result<()> {
        if !file.content_type.starts_with("audio/") {
            self.audio = None;
            return Err(AppError::missing(WizardField::Audio));
        }
        self.audio = Some(file);
        Ok(())
    }

    pub fn remove_audio(&mut self) {
        self.audio = None;
    }

    // ========================================================================
    // Details
    // ========================================================================

    /// Set the description, keeping at most 500 characters.
    pub fn set_description(&mut self, text: &str) {
        self.description = text.chars().take(MAX_DESCRIPTION_CHARS).collect();
    }

    pub fn description_chars(&self) -> usize {
        self.description.chars().count()
    }

    // ========================================================================
    // Location
    // ========================================================================

    /// Drop a pin and resolve its address. A failed lookup keeps the pin.
    pub async fn set_location(&mut self, lat: f64, lng: f64) -> Result<&LocationPin> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(AppError::invalid(
                WizardField::Location,
                WizardField::Location.missing_message(),
            ));
        }

        let address = match self.geocoder.reverse(lat, lng).await {
            Ok(address) => address,
            Err(e) => {
                tracing::error!("Reverse geocoding failed: {}", e);
                ADDRESS_LOOKUP_FAILED.to_string()
            }
        };

        let pin = self.location.insert(LocationPin::new(lat, lng, address));
        Ok(&*pin)
    }

    /// Forward-geocode `query` and move the pin there.
    pub async fn search_address(&mut self, query: &str) -> Result<&LocationPin> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::invalid(WizardField::Location, LOCATION_NOT_FOUND));
        }

        match self.geocoder.search(query).await? {
            Some(found) => {
                tracing::debug!("Address search {:?} -> {}", query, found.display_name);
                let pin = self
                    .location
                    .insert(LocationPin::new(found.lat, found.lng, found.display_name));
                Ok(&*pin)
            }
            None => Err(AppError::invalid(WizardField::Location, LOCATION_NOT_FOUND)),
        }
    }

    // ========================================================================
    // Steps
    // ========================================================================

    /// Whether the current step has what it needs to move on.
    pub fn check_step(&self) -> Result<()> {
        match self.step {
            WizardStep::Photo => self.require_photo(),
            WizardStep::Details => {
                self.require_category()?;
                self.require_description()
            }
            WizardStep::Location => self.require_location(),
            WizardStep::Review => Ok(()),
        }
    }

    pub fn next(&mut self) -> Result<WizardStep> {
        self.check_step()?;
        self.step = self.step.next();
        Ok(self.step)
    }

    pub fn back(&mut self) -> WizardStep {
        self.step = self.step.previous();
        self.step
    }

    pub fn review(&self) -> ReviewSummary {
        let description = self.description.trim();
        ReviewSummary {
            photo_name: self.photo.as_ref().map(|p| p.file_name.clone()),
            category_name: self.category.as_ref().map(|c| c.name.clone()),
            description: if description.is_empty() {
                "No description provided".to_string()
            } else {
                description.to_string()
            },
            audio_name: self.audio.as_ref().map(|a| a.file_name.clone()),
            address: self
                .location
                .as_ref()
                .map(|l| l.address.clone())
                .unwrap_or_else(|| "No address provided".to_string()),
            coordinates: self.location.as_ref().map(LocationPin::coordinates),
        }
    }

    /// `Complaint about {first five words}`, or the category name when
    /// there is no description.
    pub fn generate_title(&self) -> String {
        let words: Vec<&str> = self
            .description
            .split_whitespace()
            .take(TITLE_WORD_COUNT)
            .collect();

        let subject = if words.is_empty() {
            self.category
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "General".to_string())
        } else {
            words.join(" ")
        };
        format!("Complaint about {}", subject)
    }

    // ========================================================================
    // Submit
    // ========================================================================

    /// Validate, build the multipart submission and send it.
    ///
    /// Returns the id the backend assigned. The wizard resets only on success.
    pub async fn submit(&mut self) -> Result<String> {
        self.require_photo()?;
        self.require_category()?;
        self.require_description()?;
        self.require_location()?;

        if !self.has_session_token() {
            tracing::warn!("Submission attempted without a session token");
            self.guard.navigate_to_login();
            return Err(AppError::Unauthorized("No session token".to_string()));
        }

        let submission = self.build_submission()?;
        submission.check()?;

        match self.reports.submit(&submission).await {
            Ok(report_id) => {
                tracing::info!("Complaint submitted: {}", report_id);
                self.reset();
                Ok(report_id)
            }
            Err(e) if e.is_auth_failure() => {
                tracing::error!("Submission rejected credentials: {}", e);
                self.guard.expire_to_login();
                Err(e)
            }
            Err(e) => {
                tracing::error!("Submission failed: {}", e);
                Err(e)
            }
        }
    }

    /// Start a fresh complaint; loaded categories are kept.
    pub fn reset(&mut self) {
        self.step = WizardStep::Photo;
        self.photo = None;
        self.audio = None;
        self.category = None;
        self.description.clear();
        self.location = None;
    }

    fn has_session_token(&self) -> bool {
        match self.guard.store().token() {
            Ok(token) => token.is_some(),
            Err(e) => {
                tracing::error!("Could not read session token: {}", e);
                false
            }
        }
    }

    fn build_submission(&self) -> Result<ComplaintSubmission> {
        let photo = self.photo.clone().ok_or_else(|| AppError::missing(WizardField::Photo))?;
        let category = self.category.as_ref().ok_or_else(|| AppError::missing(WizardField::Category))?;
        let location = self.location.as_ref().ok_or_else(|| AppError::missing(WizardField::Location))?;

        Ok(ComplaintSubmission {
            title: self.generate_title(),
            description: self.description.trim().to_string(),
            category_id: category.category_id.clone(),
            location_lat: location.lat,
            location_lng: location.lng,
            photo,
            voice_recording: self.audio.clone(),
        })
    }

    fn require_photo(&self) -> Result<()> {
        match self.photo {
            Some(_) => Ok(()),
            None => Err(AppError::missing(WizardField::Photo)),
        }
    }

    fn require_category(&self) -> Result<()> {
        match &self.category {
            Some(c) if !c.category_id.is_empty() => Ok(()),
            _ => Err(AppError::missing(WizardField::Category)),
        }
    }

    fn require_description(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            Err(AppError::missing(WizardField::Description))
        } else {
            Ok(())
        }
    }

    fn require_location(&self) -> Result<()> {
        match self.location {
            Some(_) => Ok(()),
            None => Err(AppError::missing(WizardField::Location)),
        }
    }
}
