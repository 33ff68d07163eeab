use std::env;
use std::fs;
use std::path::Path;

#[path = "src/data_format.rs"]
mod data_format;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    // Data files live under the crate directory so they are included in the
    // crate tarball and `cargo publish` / `cargo install` work correctly.
    let data_dir = Path::new(&manifest_dir).join("assets").join("data");

    compile_confusables(&data_dir, &out_dir);

    println!("cargo:rerun-if-changed=assets/data/confusables.txt");
    println!("cargo:rerun-if-changed=src/data_format.rs");
    println!("cargo:rerun-if-changed=build.rs");
}

fn compile_confusables(data_dir: &Path, out_dir: &str) {
    let confusables_path = data_dir.join("confusables.txt");
    let content = fs::read_to_string(&confusables_path)
        .unwrap_or_else(|e| panic!("Failed to read confusables.txt: {e}"));

    let entries = data_format::parse(&content)
        .unwrap_or_else(|e| panic!("Invalid confusables.txt: {e}"));
    if entries.is_empty() {
        panic!("confusables.txt produced an empty table");
    }
    let version = data_format::data_version(&content).unwrap_or("unknown");

    let mut code = String::new();
    code.push_str("// Auto-generated from assets/data/confusables.txt by build.rs.\n");
    code.push_str("// DO NOT EDIT. Modify the data file instead.\n\n");
    code.push_str("/// Confusable source code points and their prototypes, sorted by source.\n");
    code.push_str("pub const CONFUSABLE_TABLE: &[(char, &str)] = &[\n");
    for (src, tgt) in &entries {
        code.push_str(&format!("    ('\\u{{{:04X}}}', {tgt:?}),\n", *src as u32));
    }
    code.push_str("];\n");
    let count = entries.len();
    code.push_str(&format!("\npub const CONFUSABLE_COUNT: usize = {count};\n"));
    code.push_str(&format!(
        "\npub const CONFUSABLE_DATA_VERSION: &str = {version:?};\n"
    ));

    let out_path = Path::new(out_dir).join("confusables_gen.rs");
    fs::write(&out_path, code).unwrap();
}
