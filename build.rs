use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Copy the sample splash.toml next to the built executable so the
    // demo binary picks it up without extra setup.
    let Ok(out_dir) = env::var("OUT_DIR") else {
        return;
    };
    // OUT_DIR is something like target/<triple>/release/build/splash-screen-xxx/out
    let out_path = Path::new(&out_dir);

    // Navigate up: out -> splash-screen-xxx -> build -> release
    if let Some(profile_dir) = out_path.ancestors().nth(3) {
        let src = Path::new("splash.toml");
        let dst = profile_dir.join("splash.toml");

        println!("cargo:rerun-if-changed=splash.toml");
        if src.exists() {
            if let Err(e) = fs::copy(src, &dst) {
                println!("cargo:warning=Failed to copy splash.toml: {}", e);
            }
        }
    }
}
