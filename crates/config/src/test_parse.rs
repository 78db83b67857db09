#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::*;

    #[test]
    fn empty_file_yields_defaults() {
        let s = loader::load_from_str("()", None).unwrap();
        assert_eq!(s, Settings::default());
        assert!(s.disable_animations);
        assert!(!s.center_when_unmaximizing);
        assert_eq!(s.keybindings().count(), 19);
    }

    #[test]
    fn flags_and_bindings_merge_over_defaults() {
        let ron = r#"(
            disable_animations: false,
            center_when_unmaximizing: true,
            keybindings: {
                "kp5": "<Control>KP_5",
                "popup-kp1": "",
            },
        )"#;
        let s = loader::load_from_str(ron, None).unwrap();
        assert!(!s.disable_animations);
        assert!(s.center_when_unmaximizing);
        assert_eq!(s.accelerator("kp5").unwrap().to_string(), "<Control>KP_5");
        assert!(s.accelerator("popup-kp1").unwrap().is_disabled());
        assert_eq!(s.accelerator("kp1").unwrap().to_string(), "<Super>KP_1");
    }

    #[test]
    fn single_flag() {
        let s = loader::load_from_str("(disable_animations: false)", None).unwrap();
        assert!(!s.disable_animations);
        assert_eq!(s.accelerator("kp0").unwrap().to_string(), "<Super>KP_0");
    }

    #[test]
    fn unknown_binding_is_validation_error() {
        let ron = r#"(keybindings: { "popup-kp5": "<Super>KP_5" })"#;
        let err = loader::load_from_str(ron, Some(Path::new("/tmp/s.ron"))).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("can't change keybinding"));
        assert_eq!(err.path(), Some(Path::new("/tmp/s.ron")));
    }

    #[test]
    fn bad_accelerator_is_validation_error() {
        let ron = r#"(keybindings: { "kp1": "<Nope>KP_1" })"#;
        let err = loader::load_from_str(ron, None).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn unknown_field_is_parse_error_with_excerpt() {
        let ron = "(\n  speed: 3,\n)";
        let err = loader::load_from_str(ron, None).unwrap_err();
        match &err {
            Error::Parse { line, excerpt, .. } => {
                assert!(*line >= 2);
                assert!(excerpt.contains('^'));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
        assert!(err.pretty().starts_with("Settings parse error at line"));
    }

    #[test]
    fn parse_error_from_file_names_file_and_position() {
        let err = loader::load_from_str("(disable_animations: maybe)", Some(Path::new("/tmp/s.ron")))
            .unwrap_err();
        let pretty = err.pretty();
        assert!(pretty.starts_with("Settings parse error at /tmp/s.ron:1:"));
        assert!(pretty.contains("   1 | (disable_animations: maybe)"));
    }

    #[test]
    fn set_accelerator_rejects_unknown_name() {
        let mut s = Settings::default();
        assert!(s.set_accelerator("kp10", "<Super>KP_1").is_err());
        s.set_accelerator("kpdivide", "<Shift>KP_Divide").unwrap();
        assert_eq!(
            s.accelerator("kpdivide").unwrap().modifiers(),
            Modifiers::SHIFT
        );
    }

    #[test]
    fn load_from_path_reports_missing_file() {
        let err = load_from_path(Path::new("/nonexistent/kptile/settings.ron")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert!(err.pretty().starts_with("Read error at /nonexistent"));
    }
}
