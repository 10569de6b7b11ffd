#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod progress_service;
pub mod reminder_service;

pub use pylearn_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, ProgressServiceError, ReminderServiceError};
pub use progress_service::{ProceedOutcome, ProceedResult, ProgressService};
pub use reminder_service::ReminderService;
