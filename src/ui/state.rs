use crate::models::AssignmentConfig;
use std::path::PathBuf;

/// Active screen. Domain state (config, submission, countdown, language)
/// lives on the `App` controller; this enum only carries what the view being
/// shown needs on top of it.
#[derive(Debug, Clone)]
pub enum View {
    Overview,
    ConfigEdit {
        title_input: String,
        description_input: String,
        date_input: String,
        time_input: String,
        focused_field: ConfigField,
        invalid_deadline: bool,
    },
    FilePicker {
        files: Vec<PathBuf>,
        selected_index: usize,
        error: Option<String>,
    },
}

impl View {
    /// Open the configuration editor pre-filled from the current config.
    pub fn config_edit(config: &AssignmentConfig) -> Self {
        View::ConfigEdit {
            title_input: config.title.clone(),
            description_input: config.description.clone(),
            date_input: config.due_date.format("%Y-%m-%d").to_string(),
            time_input: config.due_date.format("%H:%M").to_string(),
            focused_field: ConfigField::Title,
            invalid_deadline: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigField {
    Title,
    DueDate,
    DueTime,
    Description,
}

impl ConfigField {
    pub fn next(self) -> Self {
        match self {
            ConfigField::Title => ConfigField::DueDate,
            ConfigField::DueDate => ConfigField::DueTime,
            ConfigField::DueTime => ConfigField::Description,
            ConfigField::Description => ConfigField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ConfigField::Title => ConfigField::Description,
            ConfigField::DueDate => ConfigField::Title,
            ConfigField::DueTime => ConfigField::DueDate,
            ConfigField::Description => ConfigField::DueTime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_config_edit_prefills_inputs() {
        let mut config = AssignmentConfig::demo(Utc::now());
        config.due_date = Utc.with_ymd_and_hms(2025, 3, 10, 23, 59, 0).unwrap();

        let view = View::config_edit(&config);
        match view {
            View::ConfigEdit {
                title_input,
                date_input,
                time_input,
                focused_field,
                invalid_deadline,
                ..
            } => {
                assert_eq!(title_input, config.title);
                assert_eq!(date_input, "2025-03-10");
                assert_eq!(time_input, "23:59");
                assert_eq!(focused_field, ConfigField::Title);
                assert!(!invalid_deadline);
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[test]
    fn test_field_cycle_is_a_loop() {
        let mut field = ConfigField::Title;
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, ConfigField::Title);
        assert_eq!(ConfigField::Title.prev(), ConfigField::Description);
        assert_eq!(ConfigField::Description.next(), ConfigField::Title);
    }
}
