use std::env;
use std::path::PathBuf;

// ffmpeg-sys-next finds FFmpeg through pkg-config everywhere except Windows,
// where FFMPEG_DIR must point at an install. Point users at a vcpkg one.
fn main() {
    for variable in ["FFMPEG_DIR", "VCPKG_ROOT", "VCPKGRS_TRIPLET"] {
        println!("cargo:rerun-if-env-changed={variable}");
    }

    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows"
        || env::var_os("FFMPEG_DIR").is_some()
    {
        return;
    }

    let Ok(vcpkg_root) = env::var("VCPKG_ROOT") else {
        println!(
            "cargo:warning=framestamp needs FFmpeg: set FFMPEG_DIR to an FFmpeg install (e.g. from vcpkg)."
        );
        return;
    };

    let triplet = env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| "x64-windows".to_string());
    let candidate = PathBuf::from(vcpkg_root).join("installed").join(triplet);
    if candidate.exists() {
        println!(
            "cargo:warning=FFMPEG_DIR is unset; vcpkg FFmpeg found at {0}. Set FFMPEG_DIR={0}.",
            candidate.display()
        );
    } else {
        println!(
            "cargo:warning=FFMPEG_DIR is unset and {} holds no vcpkg FFmpeg.",
            candidate.display()
        );
    }
}
