use serde::{Deserialize, Serialize};

/// User settings, one document per owner in the "settings" collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub dark_mode: bool,
    pub notifications: bool,
    pub language: String,
    pub timezone: String,
}

impl Default for Settings {
    /// Used when the owner has never saved settings
    fn default() -> Self {
        Self {
            dark_mode: false,
            notifications: true,
            language: "en".to_string(),
            timezone: "UTC".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert!(!settings.dark_mode);
        assert!(settings.notifications);
        assert_eq!(settings.language, "en");
        assert_eq!(settings.timezone, "UTC");
    }

    #[test]
    fn test_settings_decode_from_app_payload() {
        let settings: Settings = serde_json::from_str(
            r#"{"darkMode":true,"notifications":false,"language":"zh","timezone":"Asia/Shanghai"}"#,
        )
        .unwrap();

        assert!(settings.dark_mode);
        assert!(!settings.notifications);
        assert_eq!(settings.language, "zh");
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"darkMode":true}"#).unwrap();

        assert!(settings.dark_mode);
        assert!(settings.notifications);
        assert_eq!(settings.language, "en");
        assert_eq!(settings.timezone, "UTC");
    }
}
