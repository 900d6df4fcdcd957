use hero_grid::core::InputEvent;
use hero_grid::{EngineOptions, HeroEngine, SceneKind, SlideDeck, SlideSpec, TiltShiftSettings};

#[cfg(test)]
mod engine_tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn deck() -> SlideDeck {
        SlideDeck {
            slides: vec![
                SlideSpec::scene(SceneKind::Hypercube, TiltShiftSettings::default()),
                SlideSpec::scene(SceneKind::WaveField, TiltShiftSettings::default()),
                SlideSpec::scene(SceneKind::HypercubeSwapped, TiltShiftSettings::default()),
            ],
            title: "MAKE\nFUN".to_string(),
        }
    }

    fn engine() -> HeroEngine {
        let mut engine = HeroEngine::new(
            &deck(),
            EngineOptions {
                grid_size: 6,
                seed: Some(11),
                scene_target_size: 48,
            },
        )
        .expect("engine construction");
        engine.resize(96, 96);
        engine
    }

    fn run(engine: &mut HeroEngine, seconds: f32) {
        let steps = (seconds / DT).ceil() as u32;
        for _ in 0..steps {
            engine.advance(DT);
        }
    }

    #[test]
    fn test_autoplay_walks_the_deck_in_order() {
        let mut engine = engine();
        let mut seen = vec![engine.current_slide()];

        // Initial delay is 1s, each later advance waits 2s plus the flip
        for _ in 0..4 {
            let before = engine.current_slide();
            for _ in 0..1_200 {
                engine.advance(DT);
                if engine.current_slide() != before {
                    break;
                }
            }
            seen.push(engine.current_slide());
        }

        assert_eq!(seen, vec![0, 1, 2, 0, 1]);
    }

    #[test]
    fn test_drag_left_advances_forward() {
        let mut engine = engine();

        engine.handle_event(InputEvent::PointerDown { x: 80.0, y: 48.0 });
        for step in 1..=10 {
            engine.handle_event(InputEvent::PointerMoved {
                x: 80.0 - step as f32 * 20.0,
                y: 48.0,
            });
            engine.advance(DT);
        }
        engine.handle_event(InputEvent::PointerUp {
            x: -120.0,
            y: 48.0,
            click: false,
        });

        run(&mut engine, 2.0);
        assert_eq!(engine.current_slide(), 1);
    }

    #[test]
    fn test_drag_right_wraps_backward() {
        let mut engine = engine();

        engine.handle_event(InputEvent::PointerDown { x: 10.0, y: 48.0 });
        engine.handle_event(InputEvent::PointerMoved { x: 250.0, y: 48.0 });
        engine.advance(DT);
        engine.handle_event(InputEvent::PointerUp {
            x: 250.0,
            y: 48.0,
            click: false,
        });

        run(&mut engine, 2.0);
        assert_eq!(engine.current_slide(), 2, "backward from 0 wraps to the last slide");
    }

    #[test]
    fn test_click_spawns_and_expires_a_wave() {
        let mut engine = engine();

        engine.handle_event(InputEvent::PointerDown { x: 48.0, y: 48.0 });
        engine.handle_event(InputEvent::PointerUp {
            x: 48.0,
            y: 48.0,
            click: true,
        });
        assert_eq!(engine.active_wave_count(), 1);

        // 1.5 * 6 / 30 + 0.5 fade < 1s of life for a 6x6 grid
        run(&mut engine, 1.5);
        assert_eq!(engine.active_wave_count(), 0);
    }

    #[test]
    fn test_click_before_layout_is_dropped() {
        // No resize yet, so there is no frustum to pick tiles through
        let mut engine = HeroEngine::new(
            &deck(),
            EngineOptions {
                grid_size: 6,
                seed: Some(11),
                scene_target_size: 48,
            },
        )
        .expect("engine construction");

        engine.handle_event(InputEvent::PointerUp {
            x: 10.0,
            y: 10.0,
            click: true,
        });
        assert_eq!(engine.active_wave_count(), 0);
    }

    #[test]
    fn test_scroll_keeps_the_frame_opaque() {
        let mut engine = engine();
        engine.handle_event(InputEvent::Scrolled { delta: 48.0 });
        run(&mut engine, 1.0);

        let frame = engine.frame();
        assert_eq!(frame.width(), 96);
        let opaque = frame.pixels().chunks_exact(4).filter(|p| p[3] == 255).count();
        assert_eq!(opaque, 96 * 96);
    }

    #[test]
    fn test_resize_mid_run() {
        let mut engine = engine();
        run(&mut engine, 0.5);

        engine.handle_event(InputEvent::Resized {
            width: 200,
            height: 100,
        });
        run(&mut engine, 0.5);

        assert_eq!(engine.frame().width(), 200);
        assert_eq!(engine.frame().height(), 100);
    }

    #[test]
    fn test_deck_loads_from_json_file() {
        let path = std::env::temp_dir().join("hero_grid_deck_test.json");
        std::fs::write(
            &path,
            r#"{
                "slides": [
                    { "type": "scene", "kind": "wave_field" },
                    { "type": "scene", "kind": "hypercube",
                      "tilt_shift": { "focus_area": 0.8, "feather": 0.4, "blur": 0.08 } }
                ],
                "title": "HELLO"
            }"#,
        )
        .expect("write temp deck");

        let deck = SlideDeck::load(path.to_str().expect("utf8 path")).expect("load deck");
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.title, "HELLO");

        let mut engine = HeroEngine::new(&deck, EngineOptions::default()).expect("engine");
        engine.resize(64, 64);
        engine.advance(DT);
        std::fs::remove_file(&path).ok();
    }
}
