//! Video export.
//!
//! [`export_to_file`] drives every frame of an animation in order, rasterizes
//! it and streams it to a [`VideoEncoder`]. The default encoder pipes raw
//! `rgb24` frames into `ffmpeg`.
//!
//! Progress goes to a status writer using carriage returns, so a terminal
//! shows a single updating line:
//!
//! ```text
//! Generating 300 frames
//! Generating frame number 299
//! Saved as ballistic.mp4
//! ```

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};

use scene::{Rasterizer, RenderError};
use thiserror::Error;
use tracing::{debug, info};

use crate::animation::Animation;
use crate::config::{ENCODER_ENV, ExportSettings};

/// Export error.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The encoder program could not be started.
    #[error("video encoder `{program}` is not available (install ffmpeg or set {ENCODER_ENV}): {source}")]
    EncoderUnavailable {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The encoder exited unsuccessfully.
    #[error("video encoder `{program}` failed with {status}: {stderr}")]
    EncoderFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    /// A frame could not be drawn.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Writing frames or progress failed.
    #[error("export i/o error: {0}")]
    Io(#[from] io::Error),

    /// The animation has no frames to encode.
    #[error("animation has no frames")]
    NoFrames,
}

/// What the encoder is asked to produce.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSpec {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub bitrate_kbps: u32,
    pub codec: String,
}

/// Consumes `rgb24` frames and writes a video.
pub trait VideoEncoder {
    /// Prepares to receive frames for `spec`.
    fn begin(&mut self, spec: &VideoSpec) -> Result<(), ExportError>;

    /// Accepts one frame of `width × height × 3` bytes.
    fn write_frame(&mut self, rgb: &[u8]) -> Result<(), ExportError>;

    /// Completes the video.
    fn finish(&mut self) -> Result<(), ExportError>;
}

/// Frames written by a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub frames: usize,
    pub width: u32,
    pub height: u32,
}

/// Renders frames `0..F` of `animation` and encodes them into `path`.
///
/// The scene is left showing the last frame.
///
/// # Errors
///
/// Fails if the encoder is missing or fails, or if a frame cannot be drawn
/// or written.
pub fn export_to_file(
    animation: &mut Animation,
    encoder: &mut dyn VideoEncoder,
    path: &Path,
    settings: &ExportSettings,
    status: &mut dyn Write,
) -> Result<ExportSummary, ExportError> {
    let frames = animation.frame_count();
    if frames == 0 {
        return Err(ExportError::NoFrames);
    }

    let rasterizer = Rasterizer::for_style(animation.scene().style(), settings.dpi);
    let (width, height) = rasterizer.dimensions();
    let spec = VideoSpec {
        path: path.to_path_buf(),
        width,
        height,
        fps: settings.fps,
        bitrate_kbps: settings.bitrate_kbps,
        codec: settings.codec.clone(),
    };
    info!(
        animation = animation.name(),
        frames,
        width,
        height,
        path = %path.display(),
        "exporting"
    );

    writeln!(status, "Generating {frames} frames")?;
    encoder.begin(&spec)?;

    let mut rgb = vec![0; rasterizer.frame_len()];
    for frame in 0..frames {
        animation.render_frame(frame);
        write!(status, "Generating frame number {frame}\r")?;
        status.flush()?;
        rasterizer.render_into(animation.scene(), &mut rgb)?;
        encoder.write_frame(&rgb)?;
    }
    encoder.finish()?;

    writeln!(status, "\nSaved as {}", path.display())?;
    status.flush()?;
    info!(path = %path.display(), "export finished");

    Ok(ExportSummary {
        path: spec.path,
        frames,
        width,
        height,
    })
}

/// Streams frames to an `ffmpeg` child process.
#[derive(Debug)]
pub struct FfmpegEncoder {
    program: String,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
}

impl FfmpegEncoder {
    /// An encoder running `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            child: None,
            stdin: None,
        }
    }

    /// An encoder running the program named by `settings`.
    pub fn from_settings(settings: &ExportSettings) -> Self {
        Self::new(settings.encoder_program())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Command-line arguments for `spec`.
    pub fn args(spec: &VideoSpec) -> Vec<OsString> {
        let size = format!("{}x{}", spec.width, spec.height);
        let fps = spec.fps.to_string();
        let bitrate = format!("{}k", spec.bitrate_kbps);
        let mut args: Vec<OsString> = [
            "-hide_banner",
            "-loglevel",
            "error",
            "-y",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-s",
            size.as_str(),
            "-r",
            fps.as_str(),
            "-i",
            "-",
            "-an",
            "-c:v",
            spec.codec.as_str(),
            "-b:v",
            bitrate.as_str(),
            "-pix_fmt",
            "yuv420p",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        args.push(spec.path.clone().into_os_string());
        args
    }

    /// Waits for the child after a failed write and reports why it stopped.
    fn failure(&mut self, err: io::Error) -> ExportError {
        self.stdin = None;
        let Some(child) = self.child.take() else {
            return ExportError::Io(err);
        };
        match child.wait_with_output() {
            Ok(output) if !output.status.success() => ExportError::EncoderFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            },
            _ => ExportError::Io(err),
        }
    }
}

impl VideoEncoder for FfmpegEncoder {
    fn begin(&mut self, spec: &VideoSpec) -> Result<(), ExportError> {
        let args = Self::args(spec);
        debug!(program = %self.program, ?args, "starting encoder");

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound {
                    ExportError::EncoderUnavailable {
                        program: self.program.clone(),
                        source,
                    }
                } else {
                    ExportError::Io(source)
                }
            })?;

        self.stdin = child.stdin.take();
        self.child = Some(child);
        Ok(())
    }

    fn write_frame(&mut self, rgb: &[u8]) -> Result<(), ExportError> {
        let result = match self.stdin.as_mut() {
            Some(stdin) => stdin.write_all(rgb),
            None => Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "encoder has not been started",
            )),
        };
        result.map_err(|err| self.failure(err))
    }

    fn finish(&mut self) -> Result<(), ExportError> {
        // Closing stdin signals the end of the stream
        self.stdin = None;
        let Some(child) = self.child.take() else {
            return Ok(());
        };
        let output = child.wait_with_output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ExportError::EncoderFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        self.stdin = None;
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LissajousConfig;

    #[derive(Default)]
    struct MemoryEncoder {
        spec: Option<VideoSpec>,
        frames: Vec<Vec<u8>>,
        finished: bool,
    }

    impl VideoEncoder for MemoryEncoder {
        fn begin(&mut self, spec: &VideoSpec) -> Result<(), ExportError> {
            self.spec = Some(spec.clone());
            Ok(())
        }

        fn write_frame(&mut self, rgb: &[u8]) -> Result<(), ExportError> {
            self.frames.push(rgb.to_vec());
            Ok(())
        }

        fn finish(&mut self) -> Result<(), ExportError> {
            self.finished = true;
            Ok(())
        }
    }

    fn small_lissajous() -> (Animation, ExportSettings) {
        let mut config = LissajousConfig::default();
        config.playback.frames = 4;
        config.points = 200;
        config.export.dpi = 10.0;
        let settings = config.export.clone();
        (Animation::lissajous(&config), settings)
    }

    #[test]
    fn exports_every_frame_in_order() {
        let (mut animation, settings) = small_lissajous();
        let mut encoder = MemoryEncoder::default();
        let mut status = Vec::new();

        let summary = export_to_file(
            &mut animation,
            &mut encoder,
            Path::new("out.mp4"),
            &settings,
            &mut status,
        )
        .unwrap();

        assert_eq!(summary.frames, 4);
        assert_eq!((summary.width, summary.height), (100, 80));
        assert_eq!(encoder.frames.len(), 4);
        assert!(encoder.frames.iter().all(|f| f.len() == 100 * 80 * 3));
        assert!(encoder.finished);
        assert_eq!(animation.current_frame(), Some(3));

        let spec = encoder.spec.unwrap();
        assert_eq!(spec.fps, 60);
        assert_eq!(spec.bitrate_kbps, 1500);
    }

    #[test]
    fn progress_lines_match_protocol() {
        let (mut animation, settings) = small_lissajous();
        let mut status = Vec::new();
        export_to_file(
            &mut animation,
            &mut MemoryEncoder::default(),
            Path::new("lissajou4.mp4"),
            &settings,
            &mut status,
        )
        .unwrap();

        let text = String::from_utf8(status).unwrap();
        assert_eq!(
            text,
            "Generating 4 frames\n\
             Generating frame number 0\r\
             Generating frame number 1\r\
             Generating frame number 2\r\
             Generating frame number 3\r\
             \nSaved as lissajou4.mp4\n"
        );
    }

    #[test]
    fn ffmpeg_arguments() {
        let spec = VideoSpec {
            path: PathBuf::from("ballistic.mp4"),
            width: 1000,
            height: 800,
            fps: 60,
            bitrate_kbps: 1000,
            codec: "h264".into(),
        };
        let args: Vec<String> = FfmpegEncoder::args(&spec)
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        let joined = args.join(" ");

        assert!(joined.contains("-f rawvideo -pix_fmt rgb24 -s 1000x800 -r 60 -i -"));
        assert!(joined.contains("-c:v h264 -b:v 1000k -pix_fmt yuv420p"));
        assert_eq!(args.last().map(String::as_str), Some("ballistic.mp4"));
    }

    #[test]
    fn missing_encoder_is_unavailable() {
        let (mut animation, settings) = small_lissajous();
        let mut encoder = FfmpegEncoder::new("kinetoscope-no-such-encoder-binary");
        let err = export_to_file(
            &mut animation,
            &mut encoder,
            Path::new("never.mp4"),
            &settings,
            &mut io::sink(),
        )
        .unwrap_err();

        assert!(matches!(err, ExportError::EncoderUnavailable { .. }));
        assert!(err.to_string().contains("kinetoscope-no-such-encoder-binary"));
    }

    #[cfg(unix)]
    #[test]
    fn failing_encoder_reports_status() {
        let (mut animation, settings) = small_lissajous();
        let mut encoder = FfmpegEncoder::new("false");
        let err = export_to_file(
            &mut animation,
            &mut encoder,
            Path::new("never.mp4"),
            &settings,
            &mut io::sink(),
        )
        .unwrap_err();

        assert!(matches!(err, ExportError::EncoderFailed { .. }), "{err:?}");
    }
}
