use macroquad::prelude::*;
use refract::helpers::{draw_readout, draw_scene};
use refract::scene::Scene;
use refract::settings;
use tracing::{error, warn};

/// Degrees per second while an angle key is held.
const ANGLE_RATE: f64 = 20.0;
/// Index units per second while an index key is held.
const INDEX_RATE: f64 = 0.25;
/// Smallest refractive index the controls will reach.
const MIN_INDEX: f64 = 0.01;
const FONT_SIZE: f32 = 20.0;

fn window_conf() -> Conf {
    Conf {
        window_title: "refract".to_owned(),
        window_width: 1000,
        window_height: 600,
        ..Default::default()
    }
}

/// Applies one frame of keyboard input to `value`.
fn adjust(value: &mut f64, up: KeyCode, down: KeyCode, rate: f64, dt: f64) {
    if is_key_down(up) {
        *value += rate * dt;
    }
    if is_key_down(down) {
        *value -= rate * dt;
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    if let Err(err) = refract::logging::init() {
        eprintln!("Failed to initialise logging: {:#}", err);
    }
    let settings = match settings::load_config() {
        Ok(settings) => settings,
        Err(err) => {
            error!("{:#}", err);
            return;
        }
    };

    let canvas = settings.canvas;
    let (mut alpha, mut n1, mut n2) = (settings.alpha, settings.n1, settings.n2);
    let mut scene = Scene::build(&canvas, alpha, n1, n2).ok();

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        let dt = get_frame_time() as f64;
        let before = (alpha, n1, n2);
        adjust(&mut alpha, KeyCode::Up, KeyCode::Down, ANGLE_RATE, dt);
        adjust(&mut n1, KeyCode::Q, KeyCode::A, INDEX_RATE, dt);
        adjust(&mut n2, KeyCode::W, KeyCode::S, INDEX_RATE, dt);
        alpha = alpha.clamp(0.0, 90.0);
        n1 = n1.max(MIN_INDEX);
        n2 = n2.max(MIN_INDEX);

        if (alpha, n1, n2) != before {
            scene = match Scene::build(&canvas, alpha, n1, n2) {
                Ok(scene) => Some(scene),
                Err(err) => {
                    warn!("{}", err);
                    None
                }
            };
        }

        clear_background(BLACK);
        let offset_x = (screen_width() - canvas.width as f32) / 2.0;
        let offset_y = (screen_height() - canvas.height as f32) / 2.0;
        if let Some(scene) = &scene {
            draw_scene(scene, offset_x, offset_y);
            draw_readout(scene, FONT_SIZE);
        }

        next_frame().await
    }
}
