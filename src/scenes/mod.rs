pub mod font;

mod code_rain;
mod hypercube;
mod pixel_text;
mod wave_field;

pub use code_rain::CodeRainScene;
pub use hypercube::HypercubeScene;
pub use pixel_text::PixelTextScene;
pub use wave_field::WaveFieldScene;

use crate::traits::Scene;
use crate::types::SceneKind;

/// Instantiate the scene a deck entry asks for
pub fn create_scene(kind: SceneKind) -> Box<dyn Scene> {
    match kind {
        SceneKind::Hypercube => Box::new(HypercubeScene::new(false)),
        SceneKind::HypercubeSwapped => Box::new(HypercubeScene::new(true)),
        SceneKind::WaveField => Box::new(WaveFieldScene::new(false)),
        SceneKind::WaveFieldSwapped => Box::new(WaveFieldScene::new(true)),
    }
}
