//! Headless runner: steps a network at a fixed frame rate, applies scripted
//! commands, and exports the last frame as SVG.

mod error;
mod paths;
mod svg;

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use neuroviz::prelude::*;

use error::CliError;
use paths::AppPaths;

const USAGE: &str = "\
usage: neuroviz <command> [options]

commands:
  run        step the network and optionally export the last frame
  config     print the default run config as JSON
  patterns   list activation patterns
  help       show this message

run options:
  --config <path>   run config JSON (default: <config dir>/neuroviz/config.json if present)
  --frames <n>      number of frames to run
  --fps <n>         frame rate
  --svg <path>      write the last frame as SVG
  --stats <n>       log frame stats every n frames (0 = off)
  --fast            do not pace frames to wall time";

/// A command to submit before a given frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ScriptStep {
    frame: u64,
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct RunConfig {
    network: NetworkConfig,
    width: f64,
    height: f64,
    fps: u32,
    frames: u64,
    script: Vec<ScriptStep>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            width: 800.0,
            height: 600.0,
            fps: 60,
            frames: 300,
            script: Vec::new(),
        }
    }
}

impl RunConfig {
    fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
struct RunArgs {
    config: Option<PathBuf>,
    frames: Option<u64>,
    fps: Option<u32>,
    svg: Option<PathBuf>,
    stats_every: u64,
    fast: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Cli {
    Run(RunArgs),
    PrintConfig,
    Patterns,
    Help,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Cli, CliError> {
    let mut it = args.into_iter();
    let cmd = match it.next() {
        Some(c) => c,
        None => return Ok(Cli::Help),
    };

    fn value<T: std::str::FromStr>(
        flag: &str,
        it: &mut impl Iterator<Item = String>,
    ) -> Result<T, CliError> {
        let raw = it
            .next()
            .ok_or_else(|| CliError::Usage(format!("{flag} needs a value")))?;
        raw.parse()
            .map_err(|_| CliError::Usage(format!("{flag}: invalid value `{raw}`")))
    }

    match cmd.as_str() {
        "run" => {
            let mut run = RunArgs::default();
            while let Some(flag) = it.next() {
                match flag.as_str() {
                    "--config" => run.config = Some(value(&flag, &mut it)?),
                    "--frames" => run.frames = Some(value(&flag, &mut it)?),
                    "--fps" => run.fps = Some(value(&flag, &mut it)?),
                    "--svg" => run.svg = Some(value(&flag, &mut it)?),
                    "--stats" => run.stats_every = value(&flag, &mut it)?,
                    "--fast" => run.fast = true,
                    other => return Err(CliError::Usage(format!("unknown option `{other}`"))),
                }
            }
            Ok(Cli::Run(run))
        }
        "config" => Ok(Cli::PrintConfig),
        "patterns" => Ok(Cli::Patterns),
        "help" | "--help" | "-h" => Ok(Cli::Help),
        other => Err(CliError::Usage(format!("unknown command `{other}`"))),
    }
}

fn resolve_config(args: &RunArgs) -> Result<RunConfig, CliError> {
    let mut cfg = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => match AppPaths::new() {
            Ok(paths) if paths.config_file().exists() => {
                info!("Using config {:?}", paths.config_file());
                RunConfig::load(&paths.config_file())?
            }
            Ok(_) => RunConfig::default(),
            Err(e) => {
                warn!("{}; using defaults", e);
                RunConfig::default()
            }
        },
    };
    if let Some(frames) = args.frames {
        cfg.frames = frames;
    }
    if let Some(fps) = args.fps {
        cfg.fps = fps;
    }
    cfg.fps = cfg.fps.clamp(1, 1000);
    cfg.network.validate()?;
    cfg.script.sort_by_key(|s| s.frame);
    Ok(cfg)
}

async fn run(args: RunArgs) -> Result<(), CliError> {
    let cfg = resolve_config(&args)?;
    let canvas = CanvasSize::new(cfg.width, cfg.height);
    let mut net = Network::new(cfg.network.clone(), canvas);
    info!(
        "Running {} frames at {} FPS: {} layers x {} neurons, {} pattern",
        cfg.frames,
        cfg.fps,
        cfg.network.layers,
        cfg.network.neurons,
        cfg.network.pattern.display_name()
    );

    let mut scheduler = FixedStep::from_fps(cfg.fps);
    let mut pacer = tokio::time::interval(Duration::from_secs_f64(1.0 / cfg.fps as f64));
    pacer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut script: VecDeque<ScriptStep> = cfg.script.into();
    let mut surface = RecordingSurface::new();
    let mut last = FrameOutput::default();

    for frame in 0..cfg.frames {
        if !args.fast {
            tokio::select! {
                _ = pacer.tick() => {}
                _ = &mut ctrl_c => {
                    info!("Ctrl-C: stopping after {} frames", frame);
                    break;
                }
            }
        }

        while script.front().is_some_and(|s| s.frame <= frame) {
            if let Some(step) = script.pop_front() {
                net.submit(step.command);
            }
        }

        surface.clear_ops();
        last = net.tick_with(&mut scheduler, &mut surface);

        if args.stats_every > 0 && (frame + 1) % args.stats_every == 0 {
            let s = net.stats();
            info!(
                "frame {}: {} active signals, {} arrivals, mean activation {:.3}",
                s.frame, s.active_signals, s.arrivals, s.mean_activation
            );
        }
    }

    if let Some(tooltip) = &last.tooltip {
        info!("Hover: {}", tooltip.lines.join(" | "));
    }

    if let Some(path) = &args.svg {
        let doc = svg::render_svg(&surface.shapes(), net.canvas(), Some(svg::DEFAULT_BACKGROUND));
        fs::write(path, doc).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
        info!("Wrote {:?}", path);
    }

    let stats = serde_json::to_string_pretty(&net.stats()).map_err(|source| CliError::Json {
        path: PathBuf::from("<stdout>"),
        source,
    })?;
    println!("{stats}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match parse_args(std::env::args().skip(1))? {
        Cli::Run(args) => run(args).await?,
        Cli::PrintConfig => println!("{}", serde_json::to_string_pretty(&RunConfig::default())?),
        Cli::Patterns => {
            for p in ActivationPattern::all() {
                println!("{:<12}{}", p.label(), p.display_name());
            }
        }
        Cli::Help => println!("{USAGE}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn parses_run_flags() {
        let cli = parse_args(args("run --frames 10 --fps 30 --svg out.svg --stats 5 --fast")).unwrap();
        assert_eq!(
            cli,
            Cli::Run(RunArgs {
                config: None,
                frames: Some(10),
                fps: Some(30),
                svg: Some(PathBuf::from("out.svg")),
                stats_every: 5,
                fast: true,
            })
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(parse_args(args("run --frames")), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(args("run --fps fast")), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(args("run --bogus")), Err(CliError::Usage(_))));
        assert!(matches!(parse_args(args("fly")), Err(CliError::Usage(_))));
        assert_eq!(parse_args(Vec::new()).unwrap(), Cli::Help);
    }

    #[test]
    fn run_config_json_with_script() {
        let json = r#"{
            "network": {"layers": 4, "pattern": "sequential", "seed": 3},
            "frames": 20,
            "script": [
                {"frame": 10, "command": {"type": "SetSpeed", "speed": 2.0}},
                {"frame": 5, "command": {"type": "Reset"}}
            ]
        }"#;
        let cfg: RunConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.network.layers, 4);
        assert_eq!(cfg.network.neurons, 5);
        assert_eq!(cfg.fps, 60);
        assert_eq!(cfg.frames, 20);
        assert_eq!(cfg.script.len(), 2);
        assert_eq!(cfg.script[1].command, Command::Reset);
    }

    #[test]
    fn flags_override_file_and_script_is_sorted() {
        let dir = std::env::temp_dir().join(format!("neuroviz-cli-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("run.json");
        fs::write(
            &path,
            r#"{"fps": 5000, "script": [{"frame": 9, "command": {"type": "Reset"}}, {"frame": 1, "command": {"type": "PointerLeft"}}]}"#,
        )
        .unwrap();

        let cfg = resolve_config(&RunArgs {
            config: Some(path),
            frames: Some(3),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(cfg.frames, 3);
        assert_eq!(cfg.fps, 1000);
        assert_eq!(cfg.script[0].frame, 1);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn invalid_network_config_is_an_error() {
        let dir = std::env::temp_dir().join(format!("neuroviz-cli-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("run.json");
        fs::write(&path, r#"{"network": {"layers": 40}}"#).unwrap();

        let err = resolve_config(&RunArgs {
            config: Some(path),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Layers(40))));

        let _ = fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn fast_run_writes_svg() {
        let dir = std::env::temp_dir().join(format!("neuroviz-cli-svg-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let cfg_path = dir.join("run.json");
        fs::write(&cfg_path, r#"{"network": {"seed": 1}, "frames": 30}"#).unwrap();
        let svg_path = dir.join("frame.svg");

        run(RunArgs {
            config: Some(cfg_path),
            svg: Some(svg_path.clone()),
            fast: true,
            ..Default::default()
        })
        .await
        .unwrap();

        let doc = fs::read_to_string(&svg_path).unwrap();
        assert!(doc.starts_with("<svg"));
        assert!(doc.contains("<circle"));

        let _ = fs::remove_dir_all(&dir);
    }
}
