use anyhow::Context;
use pixels::{Pixels, SurfaceTexture};
use seeker_evo::assets::Texture;
use seeker_evo::render::{Frame, draw_scene};
use seeker_evo::{GenerationController, RandomSource, SimConfig};
use std::time::Instant;
use tracing::{error, info};
use winit::dpi::LogicalSize;
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

const CONFIG_PATH: &str = "seeker-evo.json";

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = SimConfig::load(CONFIG_PATH)?;
    let car = Texture::load(&config.sprite_path).inspect_err(|e| error!("{e}"))?;
    let sprite = car.scaled_size(config.sprite_scale);

    let mut rng = config.seed.map_or_else(RandomSource::from_clock, RandomSource::seeded);
    info!(
        seed = rng.seed(),
        agents = config.num_agents,
        sprite_w = sprite.0,
        sprite_h = sprite.1,
        "starting simulation"
    );

    let (width, height) = (config.width, config.height);
    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();

    let window = WindowBuilder::new()
        .with_title(config.title.as_str())
        .with_inner_size(LogicalSize::new(width, height))
        .with_resizable(false)
        .build(&event_loop)
        .context("failed to create window")?;

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(width, height, surface_texture)?
    };

    let mut sim = GenerationController::new(config, sprite, &mut rng);
    let mut generation_clock = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        if let Event::RedrawRequested(_) = event {
            {
                let mut frame = Frame::new(pixels.frame_mut(), width, height);
                draw_scene(&mut frame, &sim, &car);
            }
            if let Err(e) = pixels.render() {
                error!("render failed: {e}");
                *control_flow = ControlFlow::ExitWithCode(1);
                return;
            }
        }

        if input.update(&event) {
            if input.key_pressed(VirtualKeyCode::Escape) || input.close_requested() || input.destroyed() {
                info!(generation = sim.generation(), "window closed");
                *control_flow = ControlFlow::Exit;
                return;
            }

            let elapsed = generation_clock.elapsed().as_secs_f32();
            match sim.tick(elapsed, &mut rng) {
                Ok(Some(_)) => generation_clock = Instant::now(),
                Ok(None) => {}
                Err(e) => {
                    error!("simulation step failed: {e}");
                    *control_flow = ControlFlow::ExitWithCode(1);
                    return;
                }
            }

            window.request_redraw();
        }
    });
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
