//! Launcher menu driven entirely through the interaction core
//!
//! Arrow keys move focus, Enter activates, the mouse hovers and clicks,
//! Escape quits and R rebinds the `jump` action to the next key pressed.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use anyhow::Context as _;
use clap::Parser;
use hearth::app::input::{Callback, DeviceCode, DeviceKind, InputCollector, RawEvent, Transition, keys};
use hearth::app::ui::DrawList;
use hearth::app::{AppConfig, InteractionContext, window_attributes_from_config};
use hearth::{build_info, health};
use tracing::{debug, error, info, trace, warn};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

const REBIND_PROMPT: &str = "rebind_prompt";
const REBIND_ACTION: &str = "jump";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration profile to load (defaults to APP_PROFILE, then "release")
    #[arg(short, long)]
    profile: Option<String>,

    /// Run the startup health checks and exit with their status
    #[arg(long)]
    check: bool,

    /// Print the bindings, actions and element table after loading, then exit
    #[arg(long)]
    dump: bool,
}

/// Flags the menu callbacks raise for the host loop
#[derive(Debug, Default)]
struct Signals {
    quit: Cell<bool>,
    rebind: Cell<bool>,
}

/// What the rebind capture did with one raw event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Captured {
    /// Not consumed; dispatch as usual
    Pass,
    /// Key chosen for the action
    Chosen(DeviceCode),
    Cancelled,
    /// Release of the captured key, kept from the router like its press
    Swallowed,
}

/// Takes the next key press while armed, and hides that key's release too
#[derive(Debug, Default)]
struct RebindCapture {
    armed: bool,
    held: Option<DeviceCode>,
}

impl RebindCapture {
    fn arm(&mut self) -> bool {
        !std::mem::replace(&mut self.armed, true)
    }

    fn filter(&mut self, event: RawEvent) -> Captured {
        let RawEvent::Button {
            kind: DeviceKind::Key,
            code,
            transition,
        } = event
        else {
            return Captured::Pass;
        };

        match transition {
            Transition::Released if self.held == Some(code) => {
                self.held = None;
                Captured::Swallowed
            }
            Transition::Pressed if self.armed => {
                self.armed = false;
                self.held = Some(code);
                if code == keys::ESCAPE {
                    Captured::Cancelled
                } else {
                    Captured::Chosen(code)
                }
            }
            _ => Captured::Pass,
        }
    }
}

struct Launcher {
    config: AppConfig,
    window: Option<Window>,
    collector: InputCollector,
    ctx: InteractionContext,
    signals: Rc<Signals>,
    capture: RebindCapture,
    canvas: DrawList,
    last_update: Option<Instant>,
}

impl Launcher {
    fn new(config: AppConfig) -> anyhow::Result<Self> {
        let signals = Rc::new(Signals::default());
        let mut ctx = InteractionContext::new();
        ctx.register_navigation_callbacks();

        let quit = signals.clone();
        ctx.register_callback(Callback::new("quit", move || {
            quit.quit.set(true);
            Ok(())
        }));
        let rebind = signals.clone();
        ctx.register_callback(Callback::new("rebind", move || {
            rebind.rebind.set(true);
            Ok(())
        }));
        ctx.register_callback(Callback::new("start", || {
            info!("Start selected");
            Ok(())
        }));
        ctx.register_callback(Callback::new("options", || {
            info!("Options selected");
            Ok(())
        }));

        ctx.load_scene(&config.scene())
            .with_context(|| format!("Failed to load scene for profile '{}'", config.profile))?;
        if config.debug.dump_on_load {
            info!("Interaction state after load:\n{}", ctx.debug_dump());
        }

        Ok(Self {
            config,
            window: None,
            collector: InputCollector::new(),
            ctx,
            signals,
            capture: RebindCapture::default(),
            canvas: DrawList::new(),
            last_update: None,
        })
    }

    fn set_prompt_visible(&self, visible: bool) {
        let Ok(mut ui) = self.ctx.ui().try_borrow_mut() else {
            warn!("UI registry busy, rebind prompt unchanged");
            return;
        };
        if let Err(e) = ui.set_visible(REBIND_PROMPT, visible) {
            debug!(error = %e, "No rebind prompt in this scene");
        }
    }

    /// Applies the captured key to the rebind action
    fn finish_rebind(&mut self, code: DeviceCode) {
        self.set_prompt_visible(false);
        let mapping = self
            .ctx
            .input()
            .actions()
            .get(REBIND_ACTION)
            .copied()
            .unwrap_or_default()
            .with(DeviceKind::Key, code);
        self.ctx.input_mut().map_action_all(REBIND_ACTION, mapping);
        info!(action = REBIND_ACTION, %code, "Action rebound");
    }
}

impl ApplicationHandler for Launcher {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match event_loop.create_window(window_attributes_from_config(&self.config.window)) {
            Ok(window) => {
                let size = window.inner_size();
                info!(window.width = size.width, window.height = size.height, "Window created");
                self.collector.set_scale_factor(window.scale_factor() as f32);
                self.window = Some(window);
                self.last_update = Some(Instant::now());
            }
            Err(e) => {
                error!(error = %e, "Failed to create window");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                event_loop.exit();
                return;
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.collector.set_scale_factor(*scale_factor as f32);
            }
            WindowEvent::CursorLeft { .. } => {
                self.ctx.set_pointer(None);
            }
            WindowEvent::RedrawRequested => {
                self.canvas.clear();
                self.ctx.render(&mut self.canvas);
                trace!(commands = self.canvas.len(), "Frame drawn");
            }
            _ => {}
        }

        let Some(raw) = self.collector.handle_window_event(&event) else {
            return;
        };
        match self.capture.filter(raw) {
            Captured::Pass => self.ctx.dispatch(raw),
            Captured::Chosen(code) => self.finish_rebind(code),
            Captured::Cancelled => {
                self.set_prompt_visible(false);
                info!("Rebind cancelled");
            }
            Captured::Swallowed => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(last_update) = self.last_update else {
            return;
        };
        let now = Instant::now();
        let dt = (now - last_update).as_secs_f32();
        self.last_update = Some(now);

        if self.signals.rebind.take() && self.capture.arm() {
            self.set_prompt_visible(true);
            info!(action = REBIND_ACTION, "Waiting for a key");
        }

        // Poll before update settles the press edges
        if self.ctx.input().is_action_just_pressed(REBIND_ACTION) {
            info!("Jump");
        }
        self.ctx.update(dt);

        if self.signals.quit.get() {
            info!("Quit requested");
            event_loop.exit();
            return;
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    info!("{}", build_info::banner());

    if args.check {
        let report = health::run_all_checks();
        health::print_report(&report);
        std::process::exit(report.exit_code());
    }

    let loaded = match &args.profile {
        Some(profile) => AppConfig::load(profile),
        None => AppConfig::load_from_env(),
    };
    let config = loaded.unwrap_or_else(|e| {
        let profile = args.profile.as_deref().unwrap_or("release");
        warn!(error = %e, profile, "Failed to load config, using built-in defaults");
        AppConfig::fallback(profile)
    });
    info!(profile = %config.profile, "Configuration loaded");

    let mut launcher = Launcher::new(config)?;
    if args.dump {
        println!("{}", launcher.ctx.debug_dump());
        return Ok(());
    }

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut launcher).context("Event loop failed")?;
    Ok(())
}
