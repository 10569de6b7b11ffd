use chrono::{DateTime, TimeZone};
use thiserror::Error;

pub const DEFAULT_REMINDER_HOUR: u8 = 9;
pub const DEFAULT_REMINDER_MINUTE: u8 = 0;

/// Daily reminder preferences.
///
/// Delivery belongs to the host platform; this type only carries the user's
/// choice and computes when the next reminder is due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotificationSettings {
    enabled: bool,
    hour: u8,
    minute: u8,
}

#[derive(Clone, Copy, Debug)]
pub struct NotificationSettingsDraft {
    pub enabled: bool,
    pub hour: u32,
    pub minute: u32,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotificationSettingsError {
    #[error("reminder hour must be between 0 and 23, got {0}")]
    InvalidHour(u32),
    #[error("reminder minute must be between 0 and 59, got {0}")]
    InvalidMinute(u32),
}

impl Default for NotificationSettingsDraft {
    fn default() -> Self {
        NotificationSettings::default().to_draft()
    }
}

impl NotificationSettingsDraft {
    /// Validate the draft into settings.
    ///
    /// # Errors
    ///
    /// Returns `NotificationSettingsError` if the hour or minute is out of range.
    pub fn validate(self) -> Result<NotificationSettings, NotificationSettingsError> {
        let hour = u8::try_from(self.hour)
            .ok()
            .filter(|h| *h < 24)
            .ok_or(NotificationSettingsError::InvalidHour(self.hour))?;
        let minute = u8::try_from(self.minute)
            .ok()
            .filter(|m| *m < 60)
            .ok_or(NotificationSettingsError::InvalidMinute(self.minute))?;

        Ok(NotificationSettings {
            enabled: self.enabled,
            hour,
            minute,
        })
    }
}

impl NotificationSettings {
    /// Rebuild settings from stored values.
    ///
    /// # Errors
    ///
    /// Returns `NotificationSettingsError` if the stored time is out of range.
    pub fn from_persisted(
        enabled: bool,
        hour: u32,
        minute: u32,
    ) -> Result<Self, NotificationSettingsError> {
        NotificationSettingsDraft {
            enabled,
            hour,
            minute,
        }
        .validate()
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn hour(&self) -> u8 {
        self.hour
    }

    #[must_use]
    pub fn minute(&self) -> u8 {
        self.minute
    }

    #[must_use]
    pub fn to_draft(&self) -> NotificationSettingsDraft {
        NotificationSettingsDraft {
            enabled: self.enabled,
            hour: u32::from(self.hour),
            minute: u32::from(self.minute),
        }
    }

    /// Next reminder strictly after `now`, in `now`'s time zone.
    ///
    /// Today at `hour:minute` if that is still ahead, otherwise the same time
    /// tomorrow. Returns `None` when reminders are disabled or the local time
    /// does not exist on either day (DST gaps).
    #[must_use]
    pub fn next_trigger<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        if !self.enabled {
            return None;
        }

        let today = now.date_naive();
        let at = |date: chrono::NaiveDate| {
            date.and_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
                .and_then(|naive| now.timezone().from_local_datetime(&naive).earliest())
        };

        match at(today) {
            Some(candidate) if candidate > *now => Some(candidate),
            _ => today.succ_opt().and_then(at),
        }
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            hour: DEFAULT_REMINDER_HOUR,
            minute: DEFAULT_REMINDER_MINUTE,
        }
    }
}
