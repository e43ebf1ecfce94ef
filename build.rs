use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Copy the sample core.toml next to the built executable so the
    // exe-dir config lookup finds it during development.
    let out_dir = env::var("OUT_DIR").unwrap();
    // OUT_DIR is something like target/debug/build/ctxswitch-xxx/out
    let out_path = Path::new(&out_dir);

    // Navigate up: out -> ctxswitch-xxx -> build -> <profile>
    if let Some(profile_dir) = out_path.ancestors().nth(3) {
        let src = Path::new("core.toml");
        let dst = profile_dir.join("core.toml");

        println!("cargo:rerun-if-changed=core.toml");
        if src.exists() {
            if let Err(e) = fs::copy(src, &dst) {
                println!("cargo:warning=Failed to copy core.toml: {}", e);
            }
        }
    }
}
