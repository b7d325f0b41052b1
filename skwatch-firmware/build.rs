//! Build script for skwatch-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates watchface.toml at compile time
//! - Records the build time as the initial wall clock

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    setup_linker(&out_dir);
    validate_config();
    write_build_time(&out_dir);
}

/// Copy memory.x next to the build output and point the linker at it
fn setup_linker(out_dir: &Path) {
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(include_bytes!("memory.x")).expect("write memory.x");

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Local wall time of the build, used until the clock is set otherwise
fn write_build_time(out_dir: &Path) {
    let local = chrono::Local::now().naive_local().and_utc().timestamp();
    let mut f = File::create(out_dir.join("build_time.rs")).expect("create build_time.rs");
    writeln!(f, "pub const BUILD_LOCAL_EPOCH: i64 = {};", local).expect("write build_time.rs");
}

fn validate_config() {
    println!("cargo:rerun-if-changed=watchface.toml");

    let config_path = Path::new("watchface.toml");
    if !config_path.exists() {
        fail(
            "watchface.toml not found",
            &["The firmware embeds watchface.toml from the crate directory.".into()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read watchface.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in watchface.toml",
            &e.to_string().lines().map(String::from).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    if let Some(table) = config.as_table() {
        for (name, _) in table {
            if !["weather", "steps", "battery"].contains(&name.as_str()) {
                errors.push(format!("unknown section [{}]", name));
            }
        }
    }
    validate_weather(&config, &mut errors);
    validate_steps(&config, &mut errors);
    validate_battery(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid watchface.toml", &errors);
    }

    println!("cargo:warning=watchface.toml validated successfully");
}

fn validate_weather(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(weather) = config.get("weather") else {
        return;
    };
    if let Some(value) = weather.get("refresh_minutes") {
        match value.as_integer() {
            Some(1..=60) => {}
            _ => errors.push("[weather] refresh_minutes must be 1-60".into()),
        }
    }
    if let Some(value) = weather.get("degree_glyph") {
        if !value.is_bool() {
            errors.push("[weather] degree_glyph must be true or false".into());
        }
    }
}

fn validate_steps(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(steps) = config.get("steps") else {
        return;
    };
    if let Some(value) = steps.get("baseline") {
        if !matches!(value.as_str(), Some("goal" | "average")) {
            errors.push("[steps] baseline must be 'goal' or 'average'".into());
        }
    }
    if let Some(value) = steps.get("sensor") {
        if !value.is_bool() {
            errors.push("[steps] sensor must be true or false".into());
        }
    }
}

fn validate_battery(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(battery) = config.get("battery") else {
        return;
    };
    if let Some(value) = battery.get("sample_secs") {
        match value.as_integer() {
            Some(1..=65535) => {}
            _ => errors.push("[battery] sample_secs must be 1-65535".into()),
        }
    }

    let Some(curve) = battery.get("curve") else {
        return;
    };
    let Some(points) = curve.as_array() else {
        errors.push("[battery] curve must be an array of [mv, pct] pairs".into());
        return;
    };
    if !(2..=8).contains(&points.len()) {
        errors.push("[battery] curve needs 2-8 points".into());
    }

    let mut previous: Option<(i64, i64)> = None;
    for (i, point) in points.iter().enumerate() {
        let pair = point
            .as_array()
            .filter(|p| p.len() == 2)
            .and_then(|p| Some((p[0].as_integer()?, p[1].as_integer()?)));
        let Some((mv, pct)) = pair else {
            errors.push(format!("[battery] curve point {} must be [mv, pct]", i));
            continue;
        };
        if !(0..=65535).contains(&mv) || !(0..=100).contains(&pct) {
            errors.push(format!("[battery] curve point {} out of range", i));
        }
        if let Some((prev_mv, prev_pct)) = previous {
            if mv <= prev_mv || pct < prev_pct {
                errors.push(format!("[battery] curve point {} must ascend", i));
            }
        }
        previous = Some((mv, pct));
    }
}

/// Abort the build with a boxed message
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let line = if line.chars().count() > 62 {
                format!("{}...", line.chars().take(59).collect::<String>())
            } else {
                line.clone()
            };
            format!("║  • {:<62} ║", line)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}
