mod lesson;
mod notification;
mod progress;

pub use lesson::{LessonRecord, WeekInfo, completion_key};
pub use notification::{
    DEFAULT_REMINDER_HOUR, DEFAULT_REMINDER_MINUTE, NotificationSettings,
    NotificationSettingsDraft, NotificationSettingsError,
};
pub use progress::ProgressRecord;
