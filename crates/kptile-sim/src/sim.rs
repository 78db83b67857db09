//! The `run` and `bindings` subcommands.

use std::{sync::Arc, time::Duration};

use config::Settings;
use humantime::format_duration;
use parking_lot::Mutex;
use tile_engine::{Engine, Hosts, driver};
use tile_host::{WindowHost, WindowId, mock::MockHost};
use tokio::{
    runtime::Builder,
    time::{self, Instant},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    cli::{BindingsArgs, RunArgs},
    error::{Error, Result},
    scenario::Scenario,
};

/// Keysym for Return.
const RETURN: u32 = 0xff0d;

/// Run a scenario and print the final geometry of every window.
pub fn run(args: &RunArgs) -> Result<()> {
    let scenario = Scenario::load(&args.scenario)?;
    let settings = config::load_or_default(args.config.as_deref())?;
    let host = MockHost::new(scenario.area);
    host.set_settle_delay(args.wayland);
    let ids: Vec<WindowId> = scenario
        .windows
        .iter()
        .map(|w| host.add_window(w.state()))
        .collect();
    if let Some(i) = scenario.focus {
        host.set_focus(ids.get(i).copied());
    }
    info!(
        windows = ids.len(),
        area = %scenario.area,
        wayland = args.wayland,
        "scenario_loaded"
    );

    // Paused time: sleeps advance the clock instantly and deterministically.
    let rt = Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()?;
    let (engine, elapsed) = rt.block_on(drive(host.clone(), settings, args))?;

    println!("after {} (simulated):", format_duration(elapsed));
    for (spec, id) in scenario.windows.iter().zip(&ids) {
        print_window(&host, &engine, *id, &spec.title);
    }
    engine.disable();
    Ok(())
}

/// Dispatch every binding with the driver running, then hand the engine back.
async fn drive(host: MockHost, settings: Settings, args: &RunArgs) -> Result<(Engine, Duration)> {
    let start = Instant::now();
    let engine = Arc::new(Mutex::new(Engine::enable(Hosts::single(host), settings)));
    let cancel = CancellationToken::new();
    let task = driver::spawn(engine.clone(), cancel.clone());

    for name in &args.bindings {
        engine.lock().dispatch(name)?;
        time::sleep(args.settle).await;
        if engine.lock().popup_state().is_some() {
            finish_popup(&engine, args)?;
            time::sleep(args.settle).await;
        }
        debug!(binding = %name, idle = engine.lock().is_idle(), "binding_done");
    }

    cancel.cancel();
    task.await
        .map_err(|e| Error::Other(format!("driver task failed: {e}")))?;
    let engine = Arc::try_unwrap(engine)
        .map_err(|_| Error::Other("engine still shared after driver stopped".into()))?
        .into_inner();
    Ok((engine, start.elapsed()))
}

fn finish_popup(engine: &Mutex<Engine>, args: &RunArgs) -> Result<()> {
    let mut e = engine.lock();
    if let Some(i) = args.select {
        e.popup_select(i)?;
    }
    if args.cancel {
        e.popup_modifiers_released()?;
    } else if args.confirm {
        if !e.popup_key_press(RETURN) {
            warn!("confirm key not consumed");
            return Err(Error::Other("popup closed before the confirm key".into()));
        }
    } else {
        e.popup_no_mods_timeout()?;
    }
    Ok(())
}

fn print_window(host: &MockHost, engine: &Engine, id: WindowId, title: &str) {
    let Some(state) = host.window_state(id) else {
        println!("  {id} {title}: gone");
        return;
    };
    let mut flags = Vec::new();
    if !state.maximized.is_empty() {
        flags.push(format!("max={:?}", state.maximized));
    }
    if state.minimized {
        flags.push("minimized".to_string());
    }
    if host.focus_window() == Some(id) {
        flags.push("focused".to_string());
    }
    if let Some(r) = engine.remembered(id) {
        flags.push(format!("remembers {r}"));
    }
    println!("  {id} {title}: {} {}", state.frame, flags.join(" "));
}

/// Print the accelerator table.
pub fn bindings(args: &BindingsArgs) -> Result<()> {
    let settings = config::load_or_default(args.config.as_deref())?;
    for (name, accel) in settings.keybindings() {
        if accel.is_disabled() {
            println!("{name:<12} (disabled)");
        } else {
            println!("{name:<12} {accel}");
        }
    }
    println!(
        "disable_animations={} center_when_unmaximizing={}",
        settings.disable_animations, settings.center_when_unmaximizing
    );
    Ok(())
}
