//! An animation: a scene, the driver that moves it, and its settings.

use std::fmt;

use kinematics::{Ballistic, Lissajous, LissajousSampler, TrajectorySet};
use scene::{LineHandle, Scene, SceneBuilder};
use tracing::debug;

use crate::config::{BallisticConfig, ExportSettings, LissajousConfig, PlaybackSettings};
use crate::driver::{BallisticDriver, FrameDriver, LissajousDriver};

/// A scene together with the driver that updates it frame by frame.
pub struct Animation {
    name: String,
    scene: Scene,
    driver: Box<dyn FrameDriver>,
    playback: PlaybackSettings,
    export: ExportSettings,
    current: Option<usize>,
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("name", &self.name)
            .field("frames", &self.frame_count())
            .field("current", &self.current)
            .field("playback", &self.playback)
            .field("export", &self.export)
            .finish_non_exhaustive()
    }
}

impl Animation {
    /// Assembles an animation from parts.
    pub fn new(
        name: impl Into<String>,
        scene: Scene,
        driver: Box<dyn FrameDriver>,
        playback: PlaybackSettings,
        export: ExportSettings,
    ) -> Self {
        Self {
            name: name.into(),
            scene,
            driver,
            playback,
            export,
            current: None,
        }
    }

    /// Projectile trajectories, one line per launch angle.
    ///
    /// The configuration is expected to be validated.
    pub fn ballistic(config: &BallisticConfig) -> Self {
        let ballistic = Ballistic::new(config.initial_speed, config.gravity);
        let trajectories =
            TrajectorySet::sample(&ballistic, &config.angles, config.duration, config.points);

        let mut builder = SceneBuilder::new(config.style.clone());
        let lines: Vec<LineHandle> = config.angles.iter().map(|_| builder.add_line()).collect();
        debug!(
            angles = ?config.angles,
            points = config.points,
            frames = config.playback.frames,
            "sampled ballistic trajectories"
        );

        let driver = BallisticDriver::new(trajectories, lines, config.playback.frames);
        Self::new(
            "ballistic",
            builder.build(),
            Box::new(driver),
            config.playback.clone(),
            config.export.clone(),
        )
    }

    /// A single Lissajous curve with a rotating y phase.
    ///
    /// The configuration is expected to be validated.
    pub fn lissajous(config: &LissajousConfig) -> Self {
        let curve = Lissajous::new(config.amplitude, config.freq_x, config.freq_y);
        let sampler = LissajousSampler::new(curve, config.points, config.playback.frames);

        let mut builder = SceneBuilder::new(config.style.clone());
        let line = builder.add_line();
        debug!(
            freq_x = config.freq_x,
            freq_y = config.freq_y,
            points = config.points,
            frames = config.playback.frames,
            "sampled lissajous curve"
        );

        Self::new(
            "lissajous",
            builder.build(),
            Box::new(LissajousDriver::new(sampler, line)),
            config.playback.clone(),
            config.export.clone(),
        )
    }

    /// Short name used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Frames in one pass.
    pub fn frame_count(&self) -> usize {
        self.driver.frame_count()
    }

    /// Updates the scene to show `frame`.
    pub fn render_frame(&mut self, frame: usize) {
        self.driver.render(&mut self.scene, frame);
        self.current = Some(frame);
    }

    /// The last rendered frame, if any.
    pub const fn current_frame(&self) -> Option<usize> {
        self.current
    }

    /// Returns every line to its initial empty state.
    pub fn reset(&mut self) {
        self.scene.clear();
        self.current = None;
    }

    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    pub const fn playback(&self) -> &PlaybackSettings {
        &self.playback
    }

    pub const fn export_settings(&self) -> &ExportSettings {
        &self.export
    }

    /// Title for the terminal window.
    pub fn window_title(&self) -> &str {
        self.scene
            .style()
            .window_title
            .as_deref()
            .unwrap_or("kinetoscope")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ballistic_has_one_line_per_angle() {
        let animation = Animation::ballistic(&BallisticConfig::default());
        assert_eq!(animation.scene().lines().len(), 6);
        assert_eq!(animation.frame_count(), 300);
        assert_eq!(animation.window_title(), "Ballistic trajectories");
        assert!(animation.scene().lines().iter().all(|l| l.is_empty()));
    }

    #[test]
    fn lines_follow_the_palette() {
        let config = BallisticConfig::default();
        let animation = Animation::ballistic(&config);
        for (index, line) in animation.scene().lines().iter().enumerate() {
            assert_eq!(line.color(), config.style.palette[index % config.style.palette.len()]);
        }
    }

    #[test]
    fn render_and_reset() {
        let mut animation = Animation::ballistic(&BallisticConfig::default());
        animation.render_frame(42);
        assert_eq!(animation.current_frame(), Some(42));
        assert!(animation.scene().lines().iter().all(|l| l.len() == 42));

        animation.reset();
        assert_eq!(animation.current_frame(), None);
        assert!(animation.scene().lines().iter().all(|l| l.is_empty()));
    }

    #[test]
    fn reveal_advances_one_sample_per_frame() {
        let config = BallisticConfig::default();
        let mut animation = Animation::ballistic(&config);
        let last = animation.frame_count() - 1;
        animation.render_frame(last);
        assert!(animation.scene().lines().iter().all(|l| l.len() == config.points - 1));

        animation.render_frame(config.points);
        assert!(animation.scene().lines().iter().all(|l| l.len() == config.points));
    }

    #[test]
    fn lissajous_has_single_full_line() {
        let mut animation = Animation::lissajous(&LissajousConfig::default());
        assert_eq!(animation.scene().lines().len(), 1);
        assert_eq!(animation.frame_count(), 480);

        animation.render_frame(0);
        assert_eq!(animation.scene().lines()[0].len(), 2000);
        assert_eq!(animation.export_settings().bitrate_kbps, 1500);
    }

    #[test]
    fn frame_count_follows_playback_settings() {
        let mut config = LissajousConfig::default();
        config.playback.frames = 24;
        let animation = Animation::lissajous(&config);
        assert_eq!(animation.frame_count(), 24);
        assert_eq!(animation.playback().frames, 24);
    }
}
