use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Tilt-shift depth-of-field tuning carried per slide
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TiltShiftSettings {
    pub focus_area: f32,
    pub feather: f32,
    pub blur: f32,
}

impl Default for TiltShiftSettings {
    fn default() -> Self {
        Self {
            focus_area: 0.4,
            feather: 0.3,
            blur: 0.15,
        }
    }
}

/// Built-in procedural scene kinds available to a deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// 4D hypercube wireframe projector
    Hypercube,
    /// Same projector with the inner/outer colors swapped
    HypercubeSwapped,
    /// Pointer-reactive point wave field
    WaveField,
    /// Wave field with the gradient colors swapped
    WaveFieldSwapped,
}

/// Where a slide's pixels come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SlideSource {
    /// Static image on disk
    Image { path: String },
    /// Procedurally generated scene
    Scene { kind: SceneKind },
}

/// One selectable unit of hero content. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideSpec {
    #[serde(flatten)]
    pub source: SlideSource,
    #[serde(default)]
    pub tilt_shift: Option<TiltShiftSettings>,
}

impl SlideSpec {
    pub fn scene(kind: SceneKind, tilt_shift: TiltShiftSettings) -> Self {
        Self {
            source: SlideSource::Scene { kind },
            tilt_shift: Some(tilt_shift),
        }
    }
}

/// An ordered slide deck, loadable from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideDeck {
    pub slides: Vec<SlideSpec>,
    /// Title shown by the pixel-text overlay
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    "MAKE\nFUN".to_string()
}

impl SlideDeck {
    /// The deck the demo binary uses when no config file is given:
    /// two hypercube slides and two wave-field slides with swapped palettes.
    pub fn default_deck() -> Self {
        let crisp = TiltShiftSettings {
            focus_area: 0.8,
            feather: 0.4,
            blur: 0.08,
        };
        let soft = TiltShiftSettings {
            focus_area: 0.4,
            feather: 0.3,
            blur: 0.15,
        };
        Self {
            slides: vec![
                SlideSpec::scene(SceneKind::Hypercube, crisp),
                SlideSpec::scene(SceneKind::HypercubeSwapped, crisp),
                SlideSpec::scene(SceneKind::WaveField, soft),
                SlideSpec::scene(SceneKind::WaveFieldSwapped, soft),
            ],
            title: default_title(),
        }
    }

    /// Load a deck from a JSON file
    pub fn load(path: &str) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::DeckRead {
            path: path.to_string(),
            source,
        })?;
        let deck: SlideDeck =
            serde_json::from_str(&text).map_err(|source| EngineError::DeckParse {
                path: path.to_string(),
                source,
            })?;
        if deck.slides.is_empty() {
            return Err(EngineError::EmptyDeck);
        }
        Ok(deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_deck_has_four_slides() {
        let deck = SlideDeck::default_deck();
        assert_eq!(deck.slides.len(), 4);
        assert!(deck.slides.iter().all(|s| s.tilt_shift.is_some()));
    }

    #[test]
    fn deck_round_trips_through_json() {
        let deck = SlideDeck::default_deck();
        let json = serde_json::to_string(&deck).unwrap();
        let back: SlideDeck = serde_json::from_str(&json).unwrap();
        assert_eq!(deck, back);
    }

    #[test]
    fn image_slide_parses() {
        let json = r#"{
            "slides": [
                { "type": "image", "path": "hero.png" },
                { "type": "scene", "kind": "hypercube" }
            ]
        }"#;
        let deck: SlideDeck = serde_json::from_str(json).unwrap();
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(
            deck.slides[0].source,
            SlideSource::Image {
                path: "hero.png".to_string()
            }
        );
        assert_eq!(deck.title, "MAKE\nFUN");
    }
}
