use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=YICES_SYS_LIB_DIR");
    println!("cargo:rerun-if-env-changed=YICES_SYS_STATIC");
    if let Ok(dir) = env::var("YICES_SYS_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", dir);
    }
    let kind = if env::var("YICES_SYS_STATIC").is_ok() {
        "static"
    } else {
        "dylib"
    };
    println!("cargo:rustc-link-lib={}=yices", kind);
}
