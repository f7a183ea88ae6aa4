#![forbid(unsafe_code)]

//! # Kinetoscope CLI
//!
//! ```bash
//! kinetoscope ballistic              # view, then ask whether to save
//! kinetoscope lissajous --save       # view, then export
//! kinetoscope config ballistic       # print the default configuration
//! ```

use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use kinetoscope::cli::{AnimationKind, Cli, Command, RunArgs};
use kinetoscope::{
    Animation, BallisticConfig, FfmpegEncoder, LissajousConfig, Player, export_to_file, logging,
    prompt_save,
};
use tracing::{debug, error, info, warn};

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.log_level());

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Config { animation } => {
            let text = match animation {
                AnimationKind::Ballistic => BallisticConfig::default().to_toml()?,
                AnimationKind::Lissajous => LissajousConfig::default().to_toml()?,
            };
            print!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Ballistic(args) => {
            let config = match &args.config {
                Some(path) => BallisticConfig::load(path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => BallisticConfig::default(),
            };
            debug!(?config, "ballistic configuration");
            play(Animation::ballistic(&config), &args)
        }
        Command::Lissajous(args) => {
            let config = match &args.config {
                Some(path) => LissajousConfig::load(path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => LissajousConfig::default(),
            };
            debug!(?config, "lissajous configuration");
            play(Animation::lissajous(&config), &args)
        }
    }
}

/// Views the animation, asks whether to save it, then exports.
fn play(mut animation: Animation, args: &RunArgs) -> anyhow::Result<ExitCode> {
    let mut settings = animation.export_settings().clone();
    if let Some(output) = &args.output {
        settings.file_name.clone_from(output);
    }
    if let Some(encoder) = &args.encoder {
        settings.encoder = Some(encoder.clone());
    }

    if args.no_view {
        debug!("interactive view disabled");
    } else if io::stdout().is_terminal() {
        let interval = Duration::from_millis(animation.playback().frame_interval_ms);
        let mut player = Player::new(animation)
            .with_frame_interval(interval)
            .colored(!args.no_color);
        if !args.no_alt_screen {
            player = player.with_alt_screen();
        }
        animation = player.run().context("interactive view failed")?;
        animation.reset();
    } else {
        info!("stdout is not a terminal, skipping the interactive view");
    }

    let save = match args.save_answer() {
        Some(answer) => answer,
        None => prompt_save(&settings.file_name, &mut io::stdin().lock(), &mut io::stdout())
            .context("reading the save answer")?,
    };
    if !save {
        info!("animation not saved");
        return Ok(ExitCode::SUCCESS);
    }

    scene::load_font(args.font.as_deref()).context("loading font")?;
    let mut encoder = FfmpegEncoder::from_settings(&settings);
    let path = settings.file_name.clone();
    let mut stdout = io::stdout().lock();

    match export_to_file(&mut animation, &mut encoder, &path, &settings, &mut stdout) {
        Ok(summary) => {
            debug!(?summary, "export complete");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            if let Err(write_err) = writeln!(stdout) {
                warn!(%write_err, "cannot end the progress line");
            }
            error!(%err, "export failed");
            eprintln!("Export failed: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}
