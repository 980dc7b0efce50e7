fn main() {
    // Only the desktop shell has a tauri.conf.json to process.
    #[cfg(feature = "desktop")]
    tauri_build::build();
}
