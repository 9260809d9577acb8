use serde::Deserialize;

/// Page-wide configuration bundle.
///
/// Defaults carry the launch page's shipped constants; a host page can
/// override them by passing a JSON bundle at construction.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub particles: ParticleConfig,
    pub matrix: MatrixConfig,
    pub form: FormConfig,
    pub modal: ModalConfig,
    pub hero: HeroConfig,
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            particles: ParticleConfig::default(),
            matrix: MatrixConfig::default(),
            form: FormConfig::default(),
            modal: ModalConfig::default(),
            hero: HeroConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Particle count for viewports at or above `mobile_width_px`
    pub desktop_count: u32,
    /// Viewports narrower than this get half the particle count
    pub mobile_width_px: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Per-axis velocity is uniform in [-max_speed, max_speed)
    pub max_speed: f32,
    /// Base fill color (r, g, b)
    pub color: [u8; 3],
    pub base_alpha: f32,
    /// The field starts stepping this many ms after boot
    pub start_delay_ms: f64,
    pub connections_enabled: bool,
    /// Pairs closer than this get a connection edge
    pub connect_distance: f32,
    pub repulsion_enabled: bool,
    pub repulse_radius: f32,
    pub repulse_force: f32,
}

impl ParticleConfig {
    /// Particle count for a given viewport width.
    pub fn count_for_width(&self, width: f32) -> u32 {
        if width < self.mobile_width_px {
            self.desktop_count / 2
        } else {
            self.desktop_count
        }
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            desktop_count: 80,
            mobile_width_px: 768.0,
            min_radius: 0.5,
            max_radius: 2.5,
            max_speed: 0.25,
            color: [217, 70, 239],
            base_alpha: 0.6,
            start_delay_ms: 100.0,
            connections_enabled: true,
            connect_distance: 100.0,
            repulsion_enabled: true,
            repulse_radius: 100.0,
            repulse_force: 2.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    /// Gap between starting each letter's glitch phase
    pub letter_interval_ms: f64,
    /// Symbol swap cadence while glitching
    pub glitch_tick_ms: f64,
    /// Total glitch time per letter before it settles
    pub glitch_duration_ms: f64,
    /// Highlight color applied while a cell is glitching
    pub glitch_color: String,
    /// Fade applied to the subtext once the last cell settles
    pub subtext_fade_ms: f64,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            letter_interval_ms: 100.0,
            glitch_tick_ms: 50.0,
            glitch_duration_ms: 500.0,
            glitch_color: "#00ff00".to_string(),
            subtext_fade_ms: 1000.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Spreadsheet-backed collection endpoint
    pub endpoint_url: String,
    pub idle_label: String,
    pub submitting_label: String,
    /// Text revealed in the success view
    pub success_text: String,
    /// Shake amplitude in px for a failed field
    pub shake_amplitude: f32,
    pub shake_cycle_ms: f64,
    pub shake_repeats: u32,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint_url: String::new(),
            idle_label: "REGISTER NOW".to_string(),
            submitting_label: "COMPILING...".to_string(),
            success_text: "SUCCESSFUL!".to_string(),
            shake_amplitude: 5.0,
            shake_cycle_ms: 100.0,
            shake_repeats: 3,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    pub open_duration_ms: f64,
    pub close_duration_ms: f64,
    pub open_overshoot: f32,
    /// Content scale at the collapsed end of the transition
    pub collapsed_scale: f32,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            open_duration_ms: 500.0,
            close_duration_ms: 300.0,
            open_overshoot: 1.7,
            collapsed_scale: 0.8,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub delay_ms: f64,
    pub duration_ms: f64,
    /// Entrance slides up from this y offset
    pub rise_px: f32,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            delay_ms: 200.0,
            duration_ms: 1200.0,
            rise_px: 20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_constants() {
        let cfg = PageConfig::default();
        assert_eq!(cfg.particles.desktop_count, 80);
        assert_eq!(cfg.particles.count_for_width(1280.0), 80);
        assert_eq!(cfg.particles.count_for_width(375.0), 40);
        assert_eq!(cfg.matrix.letter_interval_ms, 100.0);
        assert_eq!(cfg.matrix.glitch_duration_ms, 500.0);
        assert_eq!(cfg.form.success_text, "SUCCESSFUL!");
        assert_eq!(cfg.modal.collapsed_scale, 0.8);
    }

    #[test]
    fn from_json_overrides_selected_fields() {
        let cfg = PageConfig::from_json(
            r#"{ "particles": { "desktop_count": 20 }, "form": { "endpoint_url": "https://example.test/collect" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.particles.desktop_count, 20);
        assert_eq!(cfg.form.endpoint_url, "https://example.test/collect");
        // untouched sections keep their defaults
        assert_eq!(cfg.modal.open_duration_ms, 500.0);
    }

    #[test]
    fn from_json_rejects_malformed_bundles() {
        assert!(PageConfig::from_json("{ not json").is_err());
    }
}
