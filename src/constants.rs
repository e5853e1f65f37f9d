pub const DEFAULT_WIDTH: i32 = 1280;          // Initial window width
pub const DEFAULT_HEIGHT: i32 = 720;          // Initial window height
pub const FPS: u32 = 60;                      // Frames per second (particle engine cap)
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Nominal time per frame (seconds)

pub const SPLASH_DURATION: f32 = 2.5;         // Loading -> Revealing timer (seconds)
pub const OVERLAY_FADE_DELAY: f32 = 1.5;      // Extra delay before the overlay fades (seconds)
pub const OVERLAY_FADE_DURATION: f32 = 1.0;   // Overlay fade-out (seconds)
pub const CONTENT_FADE_DELAY: f32 = 2.5;      // Main content fade-in start, from mount (seconds)
pub const CONTENT_FADE_DURATION: f32 = 0.5;   // Main content fade-in (seconds)
pub const ICON_FADE_DURATION: f32 = 0.75;     // Splash icon enter/exit (seconds)

pub const VERY_SMALL_BREAKPOINT: i32 = 423;   // max-width for the compact header
pub const MOBILE_BREAKPOINT: i32 = 600;       // max-width for the mobile layout
pub const WIDE_BREAKPOINT: i32 = 900;         // min-width for large control icons

pub const STRIP_SPRING_MASS: f32 = 3.0;
pub const STRIP_SPRING_STIFFNESS: f32 = 400.0;
pub const STRIP_SPRING_DAMPING: f32 = 50.0;

pub const PAN_SPRING_MASS: f32 = 1.0;
pub const PAN_SPRING_STIFFNESS: f32 = 100.0;
pub const PAN_SPRING_DAMPING: f32 = 20.0;
pub const PAN_AMOUNT: f32 = 75.0;             // Background parallax per card (pixels)

pub const CARD_MAX_WIDTH: f32 = 400.0;
pub const CARD_MIN_WIDTH: f32 = 200.0;
pub const CONTAINER_MAX_WIDTH: f32 = 1200.0;
pub const WATERMARK_SIZE: f32 = 250.0;
pub const WATERMARK_OPACITY: f32 = 0.08;

pub const MAX_PARTICLE_COUNT: u32 = 2000;     // Configured count per density area
pub const MAX_PARTICLES: usize = 20_000;      // Hard cap after scaling to the layer size
pub const MAX_EXPORT_DURATION: f32 = 3600.0;  // Longest exported video (seconds)

pub const FOOTER_LINK: &str = "https://www.instagram.com/dpmun.i/";
