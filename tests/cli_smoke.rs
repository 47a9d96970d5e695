use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_canvas-playground")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "canvas-playground.exe"
            } else {
                "canvas-playground"
            });
            p
        })
}

fn smoke_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("cli_smoke").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn cli_routes_lists_every_page() {
    let out = std::process::Command::new(exe())
        .arg("routes")
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    for path in [
        "/painter",
        "/moving-box",
        "/controllable-box",
        "/transforming",
        "/racing-car",
    ] {
        assert!(stdout.contains(path), "missing {path} in:\n{stdout}");
    }
}

#[test]
fn cli_frame_writes_png() {
    let dir = smoke_dir("frame");
    let config_path = dir.join("config.json");
    let out_path = dir.join("out.png");
    let _ = std::fs::remove_file(&out_path);

    std::fs::write(
        &config_path,
        r##"{ "moving_box": { "canvas": { "width": 64, "height": 48 }, "color": "#ff0000" } }"##,
    )
    .unwrap();

    let config_arg = config_path.to_string_lossy().to_string();
    let out_arg = out_path.to_string_lossy().to_string();

    let status = std::process::Command::new(exe())
        .args(["frame", "--route", "/moving-box", "--frames", "3", "--out"])
        .arg(out_arg.as_str())
        .args(["--config", config_arg.as_str()])
        .status()
        .unwrap();

    assert!(status.success());
    let img = image::open(&out_path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (64, 48));
    assert_eq!(img.get_pixel(20, 20).0, [255, 0, 0, 255]);
}

#[test]
fn cli_play_writes_final_and_per_frame_pngs() {
    let dir = smoke_dir("play");
    let script_path = dir.join("script.json");
    let out_path = dir.join("out.png");
    let frames_dir = dir.join("frames");
    let _ = std::fs::remove_file(&out_path);
    let _ = std::fs::remove_dir_all(&frames_dir);

    std::fs::write(
        &script_path,
        r#"{
            "route": "/painter",
            "frames": 3,
            "events": [
                { "frame": 0, "event": { "type": "pointer_down", "x": 10, "y": 10 } },
                { "frame": 1, "event": { "type": "pointer_move", "x": 10, "y": 10 } },
                { "frame": 1, "event": { "type": "pointer_move", "x": 300, "y": 200 } },
                { "frame": 2, "event": { "type": "pointer_up" } }
            ]
        }"#,
    )
    .unwrap();

    let script_arg = script_path.to_string_lossy().to_string();
    let out_arg = out_path.to_string_lossy().to_string();
    let frames_arg = frames_dir.to_string_lossy().to_string();

    let status = std::process::Command::new(exe())
        .args(["play", "--script", script_arg.as_str(), "--out"])
        .arg(out_arg.as_str())
        .args(["--frames-dir", frames_arg.as_str()])
        .status()
        .unwrap();

    assert!(status.success());
    assert!(out_path.exists());
    for i in 0..3 {
        assert!(frames_dir.join(format!("frame_{i:05}.png")).exists());
    }
}

#[test]
fn cli_rejects_unknown_route() {
    let dir = smoke_dir("bad_route");
    let out_path = dir.join("out.png");
    let out_arg = out_path.to_string_lossy().to_string();

    let status = std::process::Command::new(exe())
        .args(["frame", "--route", "/nowhere", "--out"])
        .arg(out_arg.as_str())
        .status()
        .unwrap();
    assert!(!status.success());
}
