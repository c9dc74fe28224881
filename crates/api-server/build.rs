fn main() {
    // Re-embed frontend files when source changes
    println!("cargo:rerun-if-changed=../../frontend/index.html");
    println!("cargo:rerun-if-changed=../../frontend/app.js");
    println!("cargo:rerun-if-changed=../../frontend/styles.css");
}
