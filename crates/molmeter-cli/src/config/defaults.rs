use super::models::{ColorScheme, RenderQuality, Theme, ViewMode, ViewerSettings};

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            background_color: "#0a0e1a".to_string(),
            ambient_lighting: 0.4,
            quality: RenderQuality::High,
            antialiasing: true,
            shadows: true,
            auto_rotate: false,
            rotation_speed: 0.01,
            atom_scale: 1.0,
            bond_scale: 0.3,
            show_hydrogens: false,
            show_water: false,
            color_scheme: ColorScheme::ChainId,
            transparency: 0.0,
            sound_enabled: true,
            theme: Theme::Dark,
            view_mode: ViewMode::Cartoon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_launch_settings() {
        let s = ViewerSettings::default();
        assert_eq!(s.background_color, "#0a0e1a");
        assert!((s.ambient_lighting - 0.4).abs() < 1e-12);
        assert_eq!(s.quality, RenderQuality::High);
        assert!(s.antialiasing && s.shadows && s.sound_enabled);
        assert!(!s.auto_rotate && !s.show_hydrogens && !s.show_water);
        assert!((s.rotation_speed - 0.01).abs() < 1e-12);
        assert!((s.atom_scale - 1.0).abs() < 1e-12);
        assert!((s.bond_scale - 0.3).abs() < 1e-12);
        assert_eq!(s.color_scheme, ColorScheme::ChainId);
        assert_eq!(s.transparency, 0.0);
        assert_eq!(s.theme, Theme::Dark);
        assert_eq!(s.view_mode, ViewMode::Cartoon);
    }
}
