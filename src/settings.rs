//! Audio preferences
//!
//! Persisted inside the save snapshot alongside progress.

use serde::{Deserialize, Serialize};

/// Player audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub music_enabled: bool,
    pub sound_enabled: bool,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sound_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sound_enabled: true,
            music_volume: 0.7,
            sound_volume: 1.0,
        }
    }
}

impl Settings {
    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = clamp_volume(volume);
    }

    pub fn set_sound_volume(&mut self, volume: f32) {
        self.sound_volume = clamp_volume(volume);
    }

    /// Music volume to apply (0 when music is off)
    pub fn effective_music_volume(&self) -> f32 {
        if self.music_enabled { self.music_volume } else { 0.0 }
    }

    /// Sound effect volume to apply (0 when sound is off)
    pub fn effective_sound_volume(&self) -> f32 {
        if self.sound_enabled { self.sound_volume } else { 0.0 }
    }

    /// Clamp values that may have been edited by hand in a save file
    pub fn sanitized(mut self) -> Self {
        self.music_volume = clamp_volume(self.music_volume);
        self.sound_volume = clamp_volume(self.sound_volume);
        self
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volumes() {
        let mut settings = Settings::default();
        assert_eq!(settings.effective_sound_volume(), 1.0);
        settings.sound_enabled = false;
        assert_eq!(settings.effective_sound_volume(), 0.0);
        settings.set_music_volume(1.5);
        assert_eq!(settings.effective_music_volume(), 1.0);
    }

    #[test]
    fn test_sanitized() {
        let settings = Settings {
            music_volume: f32::NAN,
            sound_volume: -2.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.music_volume, 0.0);
        assert_eq!(settings.sound_volume, 0.0);
    }

    #[test]
    fn test_missing_fields_default() {
        let settings: Settings = serde_json::from_str(r#"{ "music_enabled": false }"#).unwrap();
        assert!(!settings.music_enabled);
        assert!(settings.sound_enabled);
        assert_eq!(settings.music_volume, 0.7);
    }
}
