// Validation pipe for request validation

use crate::{Entity, Schema, ValidatedValues, ValidationFailure, Validator};
use formwork_config::{ConfigError, Validate, ValidationSettings};
use formwork_core::{Error, HttpRequest, HttpResponse, ResponseMode};
use formwork_i18n::Locale;
use formwork_log::debug;

/// Why a request could not be turned into an entity
#[derive(Debug, thiserror::Error)]
pub enum PipeError {
    /// The body could not be read
    #[error(transparent)]
    Malformed(#[from] Error),

    /// The input broke one or more rules
    #[error(transparent)]
    Invalid(#[from] ValidationFailure),
}

impl PipeError {
    pub fn status_code(&self) -> u16 {
        match self {
            PipeError::Malformed(e) => e.status_code(),
            PipeError::Invalid(f) => f.status_code(),
        }
    }

    pub fn into_response(self) -> HttpResponse {
        match self {
            PipeError::Malformed(e) => HttpResponse::from(e),
            PipeError::Invalid(f) => f.into_response(),
        }
    }
}

impl From<PipeError> for HttpResponse {
    fn from(err: PipeError) -> Self {
        err.into_response()
    }
}

/// Validates whole requests: collects input, picks locale and response
/// mode, and runs the validator.
#[derive(Debug, Clone)]
pub struct ValidationPipe {
    validator: Validator,
    settings: ValidationSettings,
    default_locale: Locale,
}

impl ValidationPipe {
    /// Fails when the settings do not validate.
    pub fn new(validator: Validator, settings: ValidationSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let default_locale = settings.locale()?;
        Ok(Self {
            validator,
            settings,
            default_locale,
        })
    }

    /// Bundled messages, settings from `FORMWORK_*` variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(Validator::default(), ValidationSettings::from_env()?)
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn settings(&self) -> &ValidationSettings {
        &self.settings
    }

    /// Locale for a request-scoped language code.
    ///
    /// Unsupported or malformed codes use the configured default.
    pub fn locale_for(&self, requested: Option<&str>) -> Locale {
        self.settings
            .resolve_locale(requested)
            .unwrap_or_else(|_| self.default_locale.clone())
    }

    /// Response mode for a request
    pub fn mode_for(&self, req: &HttpRequest) -> ResponseMode {
        ResponseMode::negotiate(req, self.settings.response_mode)
    }

    /// Validate a request into an entity
    pub fn parse<E: Entity>(&self, req: &HttpRequest, locale: Option<&str>) -> Result<E, PipeError> {
        self.parse_schema(E::schema(), req, locale)
            .map(E::from_validated)
    }

    /// Validate a request against a schema
    pub fn parse_schema(
        &self,
        schema: &Schema,
        req: &HttpRequest,
        locale: Option<&str>,
    ) -> Result<ValidatedValues, PipeError> {
        let raw = req.input()?;
        let locale = self.locale_for(locale);
        let mode = self.mode_for(req);
        debug!("{} {}: validating as {} ({}, {})", req.method, req.path, schema.name(), locale, mode);

        Ok(self.validator.validate_schema(schema, &raw, &locale, mode)?)
    }
}
