use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizgrade_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
    services::seed::seed_sample_quiz,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    config.validate_for_production();

    let bind = (config.web_server_host.clone(), config.web_server_port);
    let seed = config.seed_sample_quiz;

    let state = AppState::new(config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    if seed {
        if let Err(err) = seed_sample_quiz(&state.quiz_service).await {
            log::error!("Failed to seed sample quiz: {}", err);
        }
    }

    log::info!("Starting HTTP server on {}:{}", bind.0, bind.1);

    let state = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure)
    })
    .bind(bind)?
    .run()
    .await
}
