use audio_stream::constants::POLL_INTERVAL_MILLIS;
use audio_stream::{Config, HttpTransport, RodioEngine, StreamController};
use std::io::BufRead;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::time::Duration;

// App version and metadata
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_NAME: &str = "Audio Stream";

/// Commands accepted on stdin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShellCommand {
    Toggle,
    Next,
    Previous,
    Status,
    Quit,
}

impl ShellCommand {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "p" | "play" | "pause" | "toggle" => Some(ShellCommand::Toggle),
            "n" | "next" => Some(ShellCommand::Next),
            "b" | "prev" | "previous" => Some(ShellCommand::Previous),
            "s" | "status" => Some(ShellCommand::Status),
            "q" | "quit" | "exit" => Some(ShellCommand::Quit),
            _ => None,
        }
    }
}

fn main() {
    // Initialize logger with default settings
    // Set RUST_LOG=debug for verbose output, RUST_LOG=info for normal logs
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("reqwest", log::LevelFilter::Warn)
        .filter_module("hyper_util", log::LevelFilter::Warn)
        .init();

    log::info!("[Main] Starting {} v{}", APP_NAME, APP_VERSION);

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("[Main] Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    log::info!(
        "[Main] Stream server {} | playlist of {} tracks | timeout {:?}",
        config.stream_url,
        config.playlist.len(),
        config.request_timeout
    );

    let transport = HttpTransport::new(config.request_timeout);
    let mut controller =
        StreamController::from_config(&config, RodioEngine::new(), Box::new(transport));
    let updates = controller.subscribe();
    let commands = spawn_stdin_reader();

    println!("Commands: [enter]/play/pause, next, prev, status, quit");
    println!("{}", controller.now_playing());

    run(&mut controller, &commands, &updates);
    log::info!("[Main] {} exited", APP_NAME);
}

/// Owner loop: every transition happens on this thread
fn run(
    controller: &mut StreamController<RodioEngine>,
    commands: &Receiver<ShellCommand>,
    updates: &Receiver<audio_stream::NowPlaying>,
) {
    loop {
        loop {
            match commands.try_recv() {
                Ok(ShellCommand::Toggle) => controller.toggle(),
                Ok(ShellCommand::Next) => controller.next(),
                Ok(ShellCommand::Previous) => controller.previous(),
                Ok(ShellCommand::Status) => println!("{}", controller.now_playing()),
                Ok(ShellCommand::Quit) | Err(TryRecvError::Disconnected) => return,
                Err(TryRecvError::Empty) => break,
            }
        }

        controller.poll();

        while let Ok(now_playing) = updates.try_recv() {
            println!("{}", now_playing);
        }

        std::thread::sleep(Duration::from_millis(POLL_INTERVAL_MILLIS));
    }
}

fn spawn_stdin_reader() -> Receiver<ShellCommand> {
    let (tx, rx) = channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    log::error!("[Main] Failed to read stdin: {}", e);
                    break;
                }
            };
            match ShellCommand::parse(&line) {
                Some(cmd) => {
                    if tx.send(cmd).is_err() || cmd == ShellCommand::Quit {
                        break;
                    }
                }
                None => println!("Unknown command: {}", line.trim()),
            }
        }
    });
    rx
}
