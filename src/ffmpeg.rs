use std::io::Write;
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};

use anyhow::{Context, Result, bail};
use raylib::prelude::*;

/// ffmpeg child process fed raw RGBA frames on stdin.
pub struct Ffmpeg {
    process: Child,
    stdin: Option<ChildStdin>,
}

impl Ffmpeg {
    pub fn spawn(width: i32, height: i32, fps: u32, output: &Path) -> Result<Ffmpeg> {
        let mut process = Command::new("ffmpeg")
            .stdin(Stdio::piped())
            .args(["-loglevel", "error"])
            .arg("-y")
            .args(["-f", "rawvideo"])
            .args(["-pixel_format", "rgba"])
            .args(["-video_size", &format!("{}x{}", width, height)])
            .args(["-framerate", &format!("{}", fps)])
            .args(["-i", "-"])
            .args(["-c:v", "libx264"])
            .args(["-pix_fmt", "yuv420p"])
            .arg(output)
            .spawn()
            .context("failed to start ffmpeg, is it on PATH?")?;
        let stdin = process.stdin.take().context("failed to open ffmpeg stdin")?;
        log::info!("recording {}x{} @ {} fps to {}", width, height, fps, output.display());
        Ok(Ffmpeg { process, stdin: Some(stdin) })
    }

    pub fn write(&mut self, image: &Image) -> Result<()> {
        let width = image.width() as usize;
        let height = image.height() as usize;
        let row_len = width * 4; // 4 bytes per pixel (RGBA)

        let pixels = unsafe { std::slice::from_raw_parts(image.data() as *const u8, row_len * height) };
        let stdin = self.stdin.as_mut().context("ffmpeg stdin already closed")?;
        write_flipped(stdin, pixels, row_len).context("failed to write frame to ffmpeg")
    }

    /// Closes stdin and waits for ffmpeg to flush the file.
    pub fn finish(mut self) -> Result<()> {
        self.stdin = None;
        let status = self.process.wait().context("failed to wait for ffmpeg")?;
        if !status.success() {
            bail!("ffmpeg exited with {status}");
        }
        Ok(())
    }
}

/// Render textures come back bottom-up; ffmpeg wants rows top to bottom.
pub fn write_flipped(out: &mut impl Write, pixels: &[u8], row_len: usize) -> std::io::Result<()> {
    if row_len == 0 {
        return Ok(());
    }
    for row in pixels.chunks_exact(row_len).rev() {
        out.write_all(row)?;
    }
    Ok(())
}

impl Drop for Ffmpeg {
    fn drop(&mut self) {
        // Only reached without finish() on an error path
        if self.stdin.take().is_some() {
            if let Err(e) = self.process.wait() {
                log::warn!("failed to wait for ffmpeg: {e}");
            }
        }
    }
}
