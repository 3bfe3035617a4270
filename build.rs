use std::path::Path;
use std::process::Command;

fn main() {
    let revision = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".into());

    println!("cargo:rustc-env=KEYGUARD_GIT_HASH={revision}");

    // Worktrees and submodules use a `.git` file instead of a directory; those
    // builds simply rerun on every change to the package.
    let git_dir = Path::new(".git");
    if git_dir.is_dir() {
        for watched in ["HEAD", "refs", "packed-refs", "index"] {
            let path = git_dir.join(watched);
            if path.exists() {
                println!("cargo:rerun-if-changed={}", path.display());
            }
        }
    }
}
