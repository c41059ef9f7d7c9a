use std::path::PathBuf;

use crate::notifier::AlertNotifier;
use crate::settings::SettingsHandle;
use crate::upstream::OpenRouterClient;

// app's shared state

#[derive(Clone)]
pub struct AppState {
    pub upstream: OpenRouterClient,
    pub notifier: AlertNotifier,
    pub settings: SettingsHandle, // API key + webhook URL, swapped on reload
    pub log_dir: PathBuf,         // quoted back to callers on unexpected errors
}
