// src/lib.rs
// Project indexing, search and sandboxed preview serving for the static site editor.
// The Tauri shell on top of it is compiled only with the `desktop` feature.

pub mod app_settings;
pub mod archive;
pub mod config;
pub mod db;
pub mod error;
pub mod ignore_handler;
pub mod indexer;
pub mod launch_args;
pub mod network_policy;
pub mod path_guard;
pub mod project;
pub mod responder;
pub mod search;
pub mod types;

#[cfg(feature = "desktop")]
pub mod commands;

pub use error::{EditorError, Result};
pub use types::{OpenedProject, ProjectIndex, SearchHit, TreeNode};

#[cfg(feature = "desktop")]
pub fn run() {
    use commands::AppState;
    use config::EditorConfig;
    use project::SessionState;
    use std::sync::{Arc, Mutex};
    use tauri::{Manager, WebviewUrl, WebviewWindowBuilder};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let context = tauri::generate_context!();

    tauri::Builder::default()
        .register_uri_scheme_protocol(responder::PREVIEW_SCHEME, |ctx, request| {
            let root = ctx
                .app_handle()
                .try_state::<AppState>()
                .and_then(|state| state.current_root());
            responder::respond(root.as_deref(), request.method(), request.uri().path())
        })
        .setup(|app| {
            let app_handle = app.handle().clone();

            let data_dir = app.path().app_data_dir()?;
            let conn = match db::init_connection(&data_dir) {
                Ok(c) => c,
                Err(e) => {
                    log::error!("FATAL: settings database failed during setup: {}", e);
                    return Err(e.into());
                }
            };
            let config = EditorConfig::load(&conn, &data_dir)?;

            app.manage(AppState {
                conn: Arc::new(Mutex::new(conn)),
                session: Mutex::new(SessionState::default()),
                config,
            });

            WebviewWindowBuilder::new(app, "main", WebviewUrl::App("index.html".into()))
                .title("Static Site Editor")
                .inner_size(1400.0, 900.0)
                .on_navigation(|url| {
                    let allowed = network_policy::is_shell_url(url.as_str())
                        || network_policy::is_request_allowed(url.as_str());
                    if !allowed {
                        log::warn!("[NETWORK] Blocked navigation to {}", url);
                    }
                    allowed
                })
                .build()?;

            if let Some(zip_path) = launch_args::zip_path_from_args(std::env::args().skip(1)) {
                std::thread::spawn(move || {
                    let state = app_handle.state::<AppState>();
                    commands::open_launch_archive(app_handle.clone(), &state, zip_path);
                });
            }

            Ok(())
        })
        .plugin(tauri_plugin_dialog::init())
        .invoke_handler(tauri::generate_handler![
            commands::open_project_folder,
            commands::open_project_archive,
            commands::current_project,
            commands::read_project_file,
            commands::write_project_file,
            commands::replace_project_asset,
            commands::search_project,
            app_settings::commands::get_app_setting_cmd,
            app_settings::commands::set_app_setting_cmd
        ])
        .run(context)
        .expect("error while running tauri application");
}
