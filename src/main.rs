//! SecFlow CLI - Run a playback scenario headless and print the step timeline.

use std::path::PathBuf;
use std::sync::Arc;

use secflow::{
    playback::{ActivationCause, PlaybackEngine, PlaybackEvent},
    schema::Scenario,
};

fn print_usage(program: &str) {
    eprintln!("Usage: {} [scenario.json] [--fps N] [--max-seconds S]", program);
    eprintln!();
    eprintln!("Play a SecFlow scenario in auto-play mode and print each step.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  scenario.json    Path to scenario file (default: built-in scenario)");
    eprintln!("  --fps N          Simulated frame rate (default: 60)");
    eprintln!("  --max-seconds S  Stop after S simulated seconds (default: 300)");
    eprintln!();
    eprintln!("Print the built-in scenario as JSON with --example.");
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    let mut scenario_path: Option<PathBuf> = None;
    let mut fps: f32 = 60.0;
    let mut max_seconds: f32 = 300.0;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--example" => {
                print_example_scenario();
                return;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                return;
            }
            "--fps" => {
                fps = iter
                    .next()
                    .and_then(|s| s.parse().ok())
                    .filter(|&v: &f32| v > 0.0)
                    .unwrap_or_else(|| {
                        eprintln!("--fps expects a positive number");
                        std::process::exit(1);
                    });
            }
            "--max-seconds" => {
                max_seconds = iter
                    .next()
                    .and_then(|s| s.parse().ok())
                    .filter(|&v: &f32| v > 0.0)
                    .unwrap_or_else(|| {
                        eprintln!("--max-seconds expects a positive number");
                        std::process::exit(1);
                    });
            }
            path => scenario_path = Some(PathBuf::from(path)),
        }
    }

    // Load scenario
    let scenario = match &scenario_path {
        Some(path) => Scenario::from_path(path).unwrap_or_else(|e| {
            eprintln!("Error loading scenario {}: {}", path.display(), e);
            std::process::exit(1);
        }),
        None => Scenario::default(),
    };

    let mut engine = PlaybackEngine::new(Arc::new(scenario)).unwrap_or_else(|e| {
        eprintln!("Invalid scenario: {}", e);
        std::process::exit(1);
    });

    let scenario = Arc::clone(engine.scenario());
    println!("{}", scenario.title);
    println!("{}", "=".repeat(scenario.title.len()));
    if !scenario.subtitle.is_empty() {
        println!("{}", scenario.subtitle);
    }
    println!("Steps: {}", scenario.steps.len());
    println!(
        "Speed: {} segments/s, advance delay: {}s",
        scenario.playback.speed, scenario.playback.advance_delay
    );
    println!();

    let dt = 1.0 / fps;
    let max_frames = (max_seconds * fps).ceil() as u64;

    print_step(&scenario, 0, 0.0);
    engine.play_pause();

    let mut finished = false;
    for _ in 0..max_frames {
        engine.update(dt);

        for event in engine.drain_events() {
            match event {
                PlaybackEvent::StepActivated {
                    index,
                    cause: ActivationCause::AutoAdvance,
                } => print_step(&scenario, index, engine.elapsed()),
                PlaybackEvent::StepCompleted { index } => {
                    println!("         completed step {}", index);
                }
                PlaybackEvent::SequenceFinished => finished = true,
                _ => {}
            }
        }

        if finished {
            break;
        }
    }

    println!();
    if finished {
        println!("Sequence finished after {:.2}s", engine.elapsed());
    } else {
        let state = engine.state();
        println!(
            "Stopped after {:.2}s on step {} (playing: {}, auto-play: {})",
            engine.elapsed(),
            state.current_step,
            state.is_playing,
            state.auto_play
        );
        if engine.tracker().is_stationary() && !engine.tracker().is_complete() {
            println!("Step {} is stationary and waits for manual input.", state.current_step);
        }
    }
}

fn print_step(scenario: &Scenario, index: usize, elapsed: f64) {
    let step = &scenario.steps[index];
    let route: Vec<&str> = step.path.iter().map(|kind| kind.display_name()).collect();
    println!("[{:>6.2}s] {}", elapsed, step.title);
    println!("         {}", route.join(" -> "));
}

fn print_example_scenario() {
    let scenario = Scenario::default();

    println!("Example scenario (scenario.json):");
    match serde_json::to_string_pretty(&scenario) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing scenario: {}", e);
            std::process::exit(1);
        }
    }
}
