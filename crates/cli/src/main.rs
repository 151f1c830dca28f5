mod provenance;

use provenance::ClipRecord;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

use pathclip::api::{
    calculate_path_bounds, contains, decimate, double_path, intersection_with_cfg, parse_path,
    path_to_string, polygonize, reflect_path, reverse_path, rotate_path, Domain, FillRule,
    PathSegment, Point, Rotation,
};
use pathclip::cfg::{MAX_CLIP_ITERATIONS, POLYGONIZE_PRECISION};
use pathclip::KernelCfg;

#[derive(Parser)]
#[command(name = "pathclip-cli")]
#[command(about = "Containment and clipping of paths on planar and geographic domains")]
struct Cmd {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DomainArg {
    Plane,
    Geoid,
}

impl DomainArg {
    fn domain(self) -> Domain {
        match self {
            DomainArg::Plane => Domain::infinite_plane(),
            DomainArg::Geoid => Domain::geoid(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            DomainArg::Plane => "plane",
            DomainArg::Geoid => "geoid",
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RuleArg {
    Left,
    Positive,
    Odd,
}

impl From<RuleArg> for FillRule {
    fn from(rule: RuleArg) -> Self {
        match rule {
            RuleArg::Left => FillRule::Left,
            RuleArg::Positive => FillRule::Positive,
            RuleArg::Odd => FillRule::Odd,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Op {
    Reverse,
    Double,
    Rotate90,
    Reflect,
    Polygonize,
    Decimate,
}

#[derive(Subcommand)]
enum Action {
    /// Which side of a region a point lies on
    Contains {
        #[arg(long)]
        region: String,
        /// Point as `s,t`
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        point: Point,
        #[arg(long, value_enum, default_value_t = RuleArg::Left)]
        rule: RuleArg,
        #[arg(long, value_enum, default_value_t = DomainArg::Plane)]
        domain: DomainArg,
    },
    /// Clip a subject path to a window region
    Clip {
        #[arg(long, allow_hyphen_values = true)]
        subject: String,
        #[arg(long, allow_hyphen_values = true)]
        window: String,
        #[arg(long, value_enum, default_value_t = DomainArg::Plane)]
        domain: DomainArg,
        /// Keep cut ends open instead of closing them along the window
        #[arg(long)]
        open: bool,
        /// Give up after this many work-queue iterations
        #[arg(long, default_value_t = MAX_CLIP_ITERATIONS)]
        max_iterations: usize,
        /// Write the result here, with a clip record next to it
        #[arg(long)]
        out: Option<String>,
    },
    /// Bounding box of a path
    Bounds {
        #[arg(long, allow_hyphen_values = true)]
        path: String,
    },
    /// Apply a whole-path transform
    Transform {
        #[arg(long, allow_hyphen_values = true)]
        path: String,
        #[arg(long, value_enum)]
        op: Op,
        /// Decimation tolerance
        #[arg(long, default_value_t = 0.1)]
        tolerance: f64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let out = match cmd.action {
        Action::Contains {
            region,
            point,
            rule,
            domain,
        } => run_contains(&region, point, rule, domain)?,
        Action::Clip {
            subject,
            window,
            domain,
            open,
            max_iterations,
            out,
        } => run_clip(&subject, &window, domain, open, max_iterations, out.as_deref())?,
        Action::Bounds { path } => run_bounds(&path)?,
        Action::Transform {
            path,
            op,
            tolerance,
        } => run_transform(&path, op, tolerance)?,
        Action::Report => report(),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn parse_point(text: &str) -> Result<Point> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    let [s, t] = parts.as_slice() else {
        bail!("expected `s,t`, got `{text}`");
    };
    Ok(Point::new(
        s.parse().with_context(|| format!("bad s in `{text}`"))?,
        t.parse().with_context(|| format!("bad t in `{text}`"))?,
    ))
}

fn read_path(text: &str, what: &str) -> Result<Vec<PathSegment>> {
    parse_path(text).with_context(|| format!("parsing {what}"))
}

fn run_contains(region: &str, point: Point, rule: RuleArg, domain: DomainArg) -> Result<Value> {
    let region = read_path(region, "region")?;
    tracing::info!(s = point.x, t = point.y, ?rule, ?domain, "contains");
    let side = contains(&region, point, &domain.domain(), rule.into())
        .context("containment query failed")?;
    Ok(json!({
        "point": [point.x, point.y],
        "rule": format!("{rule:?}").to_lowercase(),
        "side": format!("{side:?}").to_lowercase(),
    }))
}

fn run_clip(
    subject: &str,
    window: &str,
    domain: DomainArg,
    open: bool,
    max_iterations: usize,
    out: Option<&str>,
) -> Result<Value> {
    let subject = read_path(subject, "subject")?;
    let window = read_path(window, "window")?;
    tracing::info!(segments = subject.len(), ?domain, open, max_iterations, "clip");
    let cfg = KernelCfg {
        max_iterations,
        ..KernelCfg::default()
    };
    let clipped = intersection_with_cfg(&subject, &window, &domain.domain(), !open, &cfg)
        .context("clipping failed")?;
    let result = json!({
        "path": path_to_string(&clipped),
        "segments": clipped.len(),
    });
    if let Some(out) = out {
        let out_path = Path::new(out);
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        std::fs::write(out_path, serde_json::to_vec_pretty(&result)?)
            .with_context(|| format!("writing {out}"))?;
        let record = ClipRecord {
            subject: path_to_string(&subject),
            window: path_to_string(&window),
            domain: domain.name(),
            close_path: !open,
            max_iterations,
            kernel_version: pathclip::VERSION,
            code_rev: provenance::current_git_rev(),
        };
        let record_path = record.write_beside(out_path)?;
        tracing::info!(out, record = %record_path.display(), "wrote clip result");
    }
    Ok(result)
}

#[derive(Serialize)]
struct BoundsOut {
    s_min: f64,
    s_max: f64,
    t_min: f64,
    t_max: f64,
}

fn run_bounds(path: &str) -> Result<Value> {
    let path = read_path(path, "path")?;
    let b = calculate_path_bounds(&path).context("computing bounds")?;
    Ok(serde_json::to_value(BoundsOut {
        s_min: b.s_min,
        s_max: b.s_max,
        t_min: b.t_min,
        t_max: b.t_max,
    })?)
}

fn run_transform(path: &str, op: Op, tolerance: f64) -> Result<Value> {
    let path = read_path(path, "path")?;
    let transformed = match op {
        Op::Reverse => reverse_path(&path)?,
        Op::Double => double_path(&path)?,
        Op::Rotate90 => rotate_path(&path, Rotation::Quarter),
        Op::Reflect => reflect_path(&path),
        Op::Polygonize => polygonize(&path, POLYGONIZE_PRECISION)?,
        Op::Decimate => decimate(&path, tolerance)?,
    };
    tracing::debug!(?op, before = path.len(), after = transformed.len(), "transform");
    Ok(json!({ "path": path_to_string(&transformed) }))
}

fn report() -> Value {
    json!({
        "code_rev": provenance::current_git_rev(),
        "version": pathclip::VERSION,
        "params": {},
        "outputs": []
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SQUARE: &str = "M0,0 L0,1 L1,1 L1,0 L0,0";

    #[test]
    fn points_parse_from_pairs() {
        assert_eq!(parse_point("1.5, -2").unwrap(), Point::new(1.5, -2.0));
        assert!(parse_point("1").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn contains_reports_the_side() {
        let v = run_contains(SQUARE, Point::new(0.5, 0.5), RuleArg::Left, DomainArg::Plane).unwrap();
        assert_eq!(v["side"], "in");
        let v = run_contains(SQUARE, Point::new(0.0, 0.5), RuleArg::Odd, DomainArg::Plane).unwrap();
        assert_eq!(v["side"], "borderline");
    }

    #[test]
    fn clip_writes_result_and_record() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("clip.json");
        let out_str = out.to_string_lossy().to_string();
        let v = run_clip(
            "M0.5,0.1 L0.5,0.9 L1.5,0.5 L0.5,0.1",
            SQUARE,
            DomainArg::Plane,
            false,
            MAX_CLIP_ITERATIONS,
            Some(&out_str),
        )
        .unwrap();
        assert_eq!(v["segments"], 5);
        assert!(out.exists());
        let record = dir.path().join("nested").join("clip.clip-record.json");
        let parsed: Value = serde_json::from_slice(&std::fs::read(record).unwrap()).unwrap();
        assert_eq!(parsed["close_path"], true);
        assert_eq!(parsed["domain"], "plane");
        assert_eq!(parsed["max_iterations"], MAX_CLIP_ITERATIONS);
    }

    #[test]
    fn clip_surfaces_library_errors() {
        let err = run_clip("M0,0 L1,0", SQUARE, DomainArg::Plane, false, MAX_CLIP_ITERATIONS, None)
            .unwrap_err();
        assert!(format!("{err:#}").contains("open"));
        let err = run_clip(
            "M0.5,0.1 L0.5,0.9 L1.5,0.5 L0.5,0.1",
            SQUARE,
            DomainArg::Plane,
            false,
            0,
            None,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("clipping failed"));
    }

    #[test]
    fn transforms_and_bounds() {
        let v = run_transform("M0,0 L1,0 L1,1 Z", Op::Reverse, 0.1).unwrap();
        assert_eq!(v["path"], "M1,1 L1,0 L0,0 Z");
        let v = run_bounds("M0,0 L2,-1").unwrap();
        assert_eq!(v["t_min"], -1.0);
        assert_eq!(report()["version"], pathclip::VERSION);
    }
}
