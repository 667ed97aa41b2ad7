use actix_web::{middleware, web, App, HttpServer};
use codepad::api::{configure_routes, cors_policy, json_config, AppState};
use codepad::{banner, config};

fn startup_error(e: codepad::errors::CodepadError) -> std::io::Error {
    std::io::Error::other(e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    banner::print_banner();

    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  No .env file loaded ({}); using environment and defaults", e);
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let app_config = config::AppConfig::from_env().map_err(startup_error)?;
    let host = app_config.host.clone();
    let port = app_config.port;

    let state = AppState::from_config(app_config).await.map_err(startup_error)?;
    log::info!(
        "Bundling with '{}' in {}",
        state.config.bundler.binary,
        state.transpiler.work_dir().display()
    );

    println!("🚀 Server running on http://localhost:{}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(json_config(state.config.json_limit))
            .wrap(cors_policy(&state.config.allowed_origin))
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
