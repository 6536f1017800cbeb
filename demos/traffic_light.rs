//! Traffic Light State Machine
//!
//! This demo drives a cyclic machine from a fixed-step loop.
//!
//! Key concepts:
//! - States request their own successor from `on_update`
//! - Requests are applied on the following tick
//! - History and snapshots for inspection
//!
//! Run with: RUST_LOG=tickfsm=debug cargo run --example traffic_light

use tickfsm::{Context, State, StateMachineBuilder};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
enum Light {
    Red,
    Green,
    Yellow,
}

struct Signal {
    light: Light,
    next: Light,
    ticks: u32,
    remaining: u32,
}

impl Signal {
    fn new(light: Light, next: Light, ticks: u32) -> Self {
        Self {
            light,
            next,
            ticks,
            remaining: 0,
        }
    }
}

impl State<Light> for Signal {
    fn id(&self) -> Light {
        self.light
    }

    fn on_enter(&mut self, ctx: &mut Context<'_, Light>) {
        self.remaining = self.ticks;
        info!(light = ?self.light, tick = ctx.ticks(), "light on");
    }

    fn on_update(&mut self, ctx: &mut Context<'_, Light>) {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            ctx.request_transition(self.next);
        }
    }

    fn on_exit(&mut self, _ctx: &mut Context<'_, Light>) {
        info!(light = ?self.light, "light off");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let mut machine = StateMachineBuilder::new()
        .name("crossing")
        .history_capacity(16)
        .state(Signal::new(Light::Red, Light::Green, 4))
        .state(Signal::new(Light::Green, Light::Yellow, 3))
        .state(Signal::new(Light::Yellow, Light::Red, 1))
        .initial(Light::Red)
        .build()?;

    for _ in 0..20 {
        machine.tick();
    }

    let path: Vec<_> = machine.history().get_path();
    info!(?path, "transitions applied");
    println!("{}", machine.snapshot().to_json()?);

    Ok(())
}
