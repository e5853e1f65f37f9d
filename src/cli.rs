use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;

#[derive(Parser, Debug)]
#[clap(author, version, about = "GSL Tournament committee showcase", long_about = None)]
pub struct Args {
    /// TOML settings file; built-in committees are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding icon.png and unemblem.png
    #[arg(short, long)]
    pub assets: Option<PathBuf>,

    /// Window or video size, e.g. 1280x720
    #[arg(short, long, value_parser = parse_size)]
    pub size: Option<(i32, i32)>,

    /// Render offscreen at a fixed frame rate and pipe frames to ffmpeg
    #[arg(short, long)]
    pub record: Option<PathBuf>,

    /// Seconds of video to record
    #[arg(long)]
    pub duration: Option<f32>,

    /// Seconds between automatic carousel advances (always on when recording)
    #[arg(long)]
    pub autoplay: Option<f32>,
}

impl Args {
    /// Command line values win over the settings file.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(assets) = &self.assets {
            settings.assets_dir = assets.clone();
        }
        if let Some((width, height)) = self.size {
            settings.window.width = width;
            settings.window.height = height;
        }
        if let Some(duration) = self.duration {
            settings.export.duration = duration;
        }
        if let Some(autoplay) = self.autoplay {
            settings.export.autoplay = autoplay;
        }
    }
}

pub fn parse_size(s: &str) -> Result<(i32, i32), String> {
    let (width, height) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let parse = |v: &str| match v.trim().parse::<i32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("'{v}' is not a positive integer")),
    };
    Ok((parse(width)?, parse(height)?))
}
