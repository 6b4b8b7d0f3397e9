use chrono::Duration;
use progress_api::app::create_app;
use progress_api::auth::create_access_token;
use progress_api::config::{load_config, save_default_config, Config};
use progress_api::constants::{CONFIG_PATH, DATABASE_PATH, DATA_DIR, OBJECTS_DIR};
use progress_api::database::{create_pool, init_database};
use progress_api::logging::{init_logging, install_panic_hook};
use progress_api::storage::{LocalObjectStore, ObjectStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

fn init_directories() {
    for dir in [&*DATA_DIR, &*OBJECTS_DIR] {
        if let Err(e) = std::fs::create_dir_all(dir) {
            error!("Failed to create {:?}: {}", dir, e);
        }
    }
}

/// Prints a 30-day token for `user_id`, signed like the identity provider would.
fn issue_token(user_id: &str, config: &Config) -> ! {
    match create_access_token(user_id, None, Duration::days(30), config) {
        Ok(token) => {
            println!("{}", token);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Failed to issue token: {}", e);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "--init-config") {
        match save_default_config(&CONFIG_PATH) {
            Ok(_) => {
                println!("Default configuration saved to {:?}", *CONFIG_PATH);
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("Failed to save default configuration: {}", e);
                std::process::exit(1);
            }
        }
    }

    if let Some(position) = args.iter().position(|arg| arg == "--issue-token") {
        let Some(user_id) = args.get(position + 1) else {
            eprintln!("Usage: --issue-token <user-id>");
            std::process::exit(2);
        };
        issue_token(user_id, &load_config(&CONFIG_PATH));
    }

    // Initialize logging
    init_logging();
    install_panic_hook();

    let config = Arc::new(load_config(&CONFIG_PATH));

    init_directories();

    let pool = create_pool(&DATABASE_PATH).expect("Failed to create database pool");
    {
        let conn = pool.get().expect("Failed to get connection");
        init_database(&conn).expect("Failed to initialize database");
    }

    let store: Arc<dyn ObjectStore> = Arc::new(LocalObjectStore::new(OBJECTS_DIR.as_path()));

    let app = create_app(Arc::clone(&config), pool, store);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], config.server.port)));
    info!("Starting Progress API on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server failed");
}
