//! Settings command handlers

use anyhow::{Context, Result};

use biolink_core::Settings;

use crate::api::AdminApi;
use crate::output::Output;

/// Show the current page settings
pub async fn show(api: &dyn AdminApi, output: &Output) -> Result<()> {
    let settings = api
        .get_settings()
        .await
        .context("Failed to fetch settings")?;
    output.print_settings(&settings);
    Ok(())
}

/// Fields to change; `None` keeps the current value
#[derive(Debug, Default)]
pub struct SettingsUpdate {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub profile_image: Option<String>,
}

impl SettingsUpdate {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.subtitle.is_none() && self.profile_image.is_none()
    }

    fn apply(self, settings: &mut Settings) {
        if let Some(title) = self.title {
            settings.title = title;
        }
        if let Some(subtitle) = self.subtitle {
            settings.subtitle = subtitle;
        }
        if let Some(profile_image) = self.profile_image {
            settings.profile_image = profile_image;
        }
    }
}

/// Change one or more settings fields
///
/// The settings document is replaced as a whole, so the current values are
/// fetched first and the untouched fields are sent back unchanged.
pub async fn set(api: &dyn AdminApi, update: SettingsUpdate, output: &Output) -> Result<()> {
    if update.is_empty() {
        output.message("Nothing to change. Use --title, --subtitle or --profile-image.");
        return Ok(());
    }

    let mut settings = api
        .get_settings()
        .await
        .context("Failed to fetch settings")?;
    update.apply(&mut settings);

    let ack = api
        .replace_settings(&settings)
        .await
        .context("Failed to update settings")?;

    output.success(&ack.message);
    output.print_settings(&settings);
    Ok(())
}
