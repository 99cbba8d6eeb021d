use crate::constants::{DEBUG_DEFAULT_FRAMES, DEBUG_DEFAULT_HEIGHT, DEBUG_DEFAULT_WIDTH};

/// Command line:
///   `arcade-shooter [frames]`
///   `arcade-shooter --debug [width height [frames]]`
#[derive(Clone, Debug, PartialEq)]
pub struct LaunchOptions {
    pub debug_mode: bool,
    pub debug_width: u16,
    pub debug_height: u16,
    pub max_frames: Option<u64>,
}

impl LaunchOptions {
    /// `args` includes the program name, as from `std::env::args`.
    pub fn from_args(args: &[String]) -> Self {
        let debug_mode = args.len() > 1 && args[1] == "--debug";

        if !debug_mode {
            return LaunchOptions {
                debug_mode,
                debug_width: DEBUG_DEFAULT_WIDTH,
                debug_height: DEBUG_DEFAULT_HEIGHT,
                max_frames: args.get(1).and_then(|s| s.parse::<u64>().ok()),
            };
        }

        let mut debug_width = DEBUG_DEFAULT_WIDTH;
        let mut debug_height = DEBUG_DEFAULT_HEIGHT;
        if args.len() >= 4 {
            debug_width = args[2].parse::<u16>().unwrap_or(DEBUG_DEFAULT_WIDTH);
            debug_height = args[3].parse::<u16>().unwrap_or(DEBUG_DEFAULT_HEIGHT);
        }
        let max_frames = args
            .get(4)
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEBUG_DEFAULT_FRAMES);

        LaunchOptions { debug_mode, debug_width, debug_height, max_frames: Some(max_frames) }
    }
}
