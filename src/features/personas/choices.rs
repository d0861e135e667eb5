//! Persona keyboard layout
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.0.0: Button rows built from the loaded catalogue

use super::manager::PersonaManager;

/// Buttons per keyboard row
pub const BUTTONS_PER_ROW: usize = 2;

/// Persona buttons ("🏛️ Лев Толстой") in rows, followed by `trailing` on its own row
pub fn persona_button_rows(manager: &PersonaManager, trailing: &[&str]) -> Vec<Vec<String>> {
    let labels: Vec<String> = manager
        .list_personas()
        .into_iter()
        .map(|p| p.button_label())
        .collect();

    let mut rows: Vec<Vec<String>> = labels
        .chunks(BUTTONS_PER_ROW)
        .map(|chunk| chunk.to_vec())
        .collect();
    if !trailing.is_empty() {
        rows.push(trailing.iter().map(|s| s.to_string()).collect());
    }
    rows
}

/// Validate a persona key exists in the catalogue
pub fn is_valid_persona(manager: &PersonaManager, key: &str) -> bool {
    manager.contains(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_cover_every_persona() {
        let manager = PersonaManager::new();
        let rows = persona_button_rows(&manager, &["🔙 Назад"]);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows.last().unwrap(), &vec!["🔙 Назад".to_string()]);

        let buttons: Vec<&String> = rows.iter().flatten().collect();
        assert_eq!(buttons.len(), 6);
        assert!(buttons.iter().any(|b| b.ends_with("Лев Толстой")));
    }

    #[test]
    fn test_buttons_match_back_to_personas() {
        let manager = PersonaManager::new();
        for label in persona_button_rows(&manager, &[]).into_iter().flatten() {
            assert!(manager.match_display_name(&label).is_some(), "{label}");
        }
    }

    #[test]
    fn test_is_valid_persona() {
        let manager = PersonaManager::new();
        assert!(is_valid_persona(&manager, "gogol"));
        assert!(!is_valid_persona(&manager, "гоголь"));
        assert!(!is_valid_persona(&manager, "invalid"));
    }
}
