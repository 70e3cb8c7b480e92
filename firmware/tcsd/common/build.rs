use std::process::Command;

/// Pass the short Git revision to the firmware as `FIRMWARE_REVISION`.
fn emit_firmware_revision() {
    let revision = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".into());

    println!("cargo:rustc-env=FIRMWARE_REVISION={}", revision);
    println!("cargo:rerun-if-changed=../../../.git/HEAD");
}

fn main() {
    emit_firmware_revision();
}
