use std::env;
use std::io::{self, Write};
use crossterm::{
    cursor::{Hide, Show},
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size},
};
use log::{error, info};

use arcade_shooter::app::App;
use arcade_shooter::constants::LOG_FILE;
use arcade_shooter::options::LaunchOptions;
use arcade_shooter::terminal_io::SimulatedInput;

fn main() -> io::Result<()> {
    simple_logging::log_to_file(LOG_FILE, log::LevelFilter::Info)?;
    info!("Starting arcade-shooter application.");

    let args: Vec<String> = env::args().collect();
    let options = LaunchOptions::from_args(&args);

    if options.debug_mode {
        info!("Debug mode enabled.");
        info!("Debug resolution set to {}x{}", options.debug_width, options.debug_height);
        let frames = options.max_frames.unwrap_or_default();
        let script = SimulatedInput::demo_script(frames.saturating_sub(1));
        let mut app = App::headless(options.debug_width, options.debug_height, script, 0, frames);
        return app.run();
    }

    info!("Attempting to enable raw mode.");
    enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide).map_err(|e| { error!("Failed to prepare screen: {}", e); e })?;

    // Key-release reporting; terminals without the protocol fall back to
    // hold-window expiry in the key tracker.
    let keyboard_enhanced = execute!(
        stdout,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )
    .is_ok();
    info!("Keyboard enhancement available: {}", keyboard_enhanced);

    let result = size()
        .map_err(|e| { error!("Failed to get terminal size: {}", e); e })
        .and_then(|(width, height)| {
            info!("Terminal size: {}x{}", width, height);
            App::interactive(width, height, keyboard_enhanced, options.max_frames).run()
        });

    // Always restore the terminal, even when the run failed.
    if keyboard_enhanced {
        let _ = execute!(stdout, PopKeyboardEnhancementFlags);
    }
    let _ = execute!(stdout, Show, LeaveAlternateScreen);
    let _ = stdout.flush();
    let _ = disable_raw_mode();

    if let Err(e) = &result {
        error!("Game loop failed: {}", e);
    }
    info!("Exiting application.");
    result
}
